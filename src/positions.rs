// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Position sets: the intermediate result beneath followed-by operators.
//!
//! A boolean can't say *where* a sub-query matched, and followed-by needs
//! exactly that. So below a followed-by node every sub-query evaluates to a
//! `PositionSet` instead.
//!
//! **Invariant**: `positions` is strictly ascending whenever a set leaves an
//! evaluator function. Leaf lookups are also at most `MAX_POSITIONS` long;
//! merge results are not truncated.
//!
//! **Verified by**:
//! - `check_positions_normalized`, `check_positions_sorted` (verify/contracts.rs)
//! - `prop_normalize_*` (tests/property/normalize.rs)

use crate::limits::MAX_POSITIONS;

/// Where a sub-query matches, how wide one match is, and whether the list is
/// inverted.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PositionSet {
    /// Positions of the *last* lexeme of each match; with `invert`, the
    /// positions where the sub-query fails.
    pub positions: Vec<u32>,
    /// Lexeme slots between the first and last term of one match. A bare
    /// term has width 0; `a <2> b` has width 2.
    pub width: u32,
    /// `positions` lists failures instead of matches. Set by NOT and carried
    /// upward so negation never has to enumerate "everywhere else".
    pub invert: bool,
}

impl PositionSet {
    /// A non-inverted, zero-width set over already-normalized positions.
    pub fn new(positions: Vec<u32>) -> Self {
        Self {
            positions,
            width: 0,
            invert: false,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.positions.is_empty()
    }

    pub fn len(&self) -> usize {
        self.positions.len()
    }
}

/// Sort, collapse duplicates, then keep the first `MAX_POSITIONS`.
///
/// Applied to leaf lookups. Truncation happens after sorting so the lowest
/// positions survive.
/// Normalizing an already-normal list returns it unchanged.
pub fn normalize_positions(mut positions: Vec<u32>) -> Vec<u32> {
    if positions.len() > 1 {
        positions.sort_unstable();
        positions.dedup();
    }
    if positions.len() > MAX_POSITIONS {
        log::trace!(
            "truncating position set from {} to {}",
            positions.len(),
            MAX_POSITIONS
        );
        positions.truncate(MAX_POSITIONS);
    }
    positions
}
