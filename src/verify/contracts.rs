// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Debug-mode assertions for vector and position-set invariants.
//!
//! # INVARIANTS (DO NOT REMOVE THESE CHECKS)
//!
//! | Contract Function            | Invariant                                      |
//! |------------------------------|------------------------------------------------|
//! | `check_positions_sorted`     | ascending, unique                              |
//! | `check_positions_normalized` | ascending, unique, `len <= MAX_POSITIONS`      |
//! | `check_vector_well_formed`   | lexemes strictly ascending, positions normal   |
//!
//! Leaf lookups are normalized. Merge results are only sorted: a union of two
//! full leaves legitimately holds more than `MAX_POSITIONS` entries.
//!
//! # Usage
//!
//! ```ignore
//! // In debug builds, this panics if the list is unsorted or oversized
//! check_positions_normalized(&leaf);
//!
//! // Merge outputs may be longer, so only order is checked
//! check_positions_sorted(&set.positions);
//!
//! // In release builds, this is a no-op
//! ```

use crate::limits::{MAX_ENTRY_POS, MAX_POSITIONS};
use crate::types::LexemeEntry;

// ============================================================================
// POSITION-SET CONTRACTS
// ============================================================================

/// Check that a position list is strictly ascending and within the size cap.
///
/// # Panics (debug builds only)
/// Panics on the first out-of-order or repeated position, or if the list is
/// longer than `MAX_POSITIONS`.
#[inline]
pub fn check_positions_normalized(positions: &[u32]) {
    debug_assert!(
        positions.len() <= MAX_POSITIONS,
        "Contract violation: PositionSet.Bounded - len {} > {}",
        positions.len(),
        MAX_POSITIONS
    );
    check_positions_sorted(positions);
}

/// Check that a position list is strictly ascending. No length bound.
///
/// # Panics (debug builds only)
/// Panics on the first out-of-order or repeated position.
#[inline]
pub fn check_positions_sorted(positions: &[u32]) {
    for i in 1..positions.len() {
        debug_assert!(
            positions[i - 1] < positions[i],
            "Contract violation: PositionSet.SortedUnique - \
             positions[{}] = {} >= positions[{}] = {}",
            i - 1,
            positions[i - 1],
            i,
            positions[i]
        );
    }
}

// ============================================================================
// VECTOR CONTRACTS
// ============================================================================

/// Check that vector entries are sorted, unique, and carry normalized positions.
///
/// # Panics (debug builds only)
/// Panics if two adjacent lexemes are out of order or equal, or if any
/// position list is unsorted, repeated, oversized or out of range.
#[inline]
pub fn check_vector_well_formed(entries: &[LexemeEntry]) {
    for i in 1..entries.len() {
        debug_assert!(
            entries[i - 1].lexeme < entries[i].lexeme,
            "Contract violation: TsVector.SortedUnique - \
             entries[{}] ('{}') >= entries[{}] ('{}')",
            i - 1,
            entries[i - 1].lexeme,
            i,
            entries[i].lexeme
        );
    }

    for entry in entries {
        debug_assert!(
            entry.positions.len() <= MAX_POSITIONS,
            "Contract violation: TsVector.Bounded - '{}' has {} positions",
            entry.lexeme,
            entry.positions.len()
        );

        for (i, pair) in entry.positions.windows(2).enumerate() {
            debug_assert!(
                pair[0].position < pair[1].position,
                "Contract violation: TsVector.PositionsSorted - '{}' at {}: {} >= {}",
                entry.lexeme,
                i,
                pair[0].position,
                pair[1].position
            );
        }

        if let Some(last) = entry.positions.last() {
            debug_assert!(
                last.position <= MAX_ENTRY_POS,
                "Contract violation: TsVector.PositionRange - '{}' has position {}",
                entry.lexeme,
                last.position
            );
        }
    }
}
