// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Offset-aware merge of two sorted position lists.
//!
//! This one function implements AND, OR and followed-by beneath proximity
//! operators. Each side is shifted by its own offset, then the two lists are
//! walked once in lockstep. What comes out depends on `EmitMode`:
//!
//! | Mode              | Emits                                          |
//! |-------------------|------------------------------------------------|
//! | `MATCHES`         | adjusted positions present on both sides       |
//! | `LEFT_UNMATCHED`  | adjusted left positions absent on the right    |
//! | `RIGHT_UNMATCHED` | adjusted right positions absent on the left    |
//!
//! Any combination is allowed; all three together is a union.
//!
//! # INVARIANTS (DO NOT VIOLATE)
//!
//! 1. **INPUT_SORTED**: both inputs strictly ascending
//! 2. **OUTPUT_SORTED**: output is ascending; it is strictly ascending unless
//!    an adjusted position saturated at `u32::MAX`
//! 3. **LINEAR**: each input element is visited exactly once

use crate::verify::contracts::check_positions_sorted;
use bitflags::bitflags;

bitflags! {
    /// Which parts of the merge to emit.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    pub struct EmitMode: u8 {
        /// Positions where the adjusted left and right coincide.
        const MATCHES = 1 << 0;
        /// Adjusted left positions with no right counterpart.
        const LEFT_UNMATCHED = 1 << 1;
        /// Adjusted right positions with no left counterpart.
        const RIGHT_UNMATCHED = 1 << 2;
    }
}

enum Step {
    Left(u32),
    Both(u32),
    Right(u32),
}

/// Merge `left + left_offset` with `right + right_offset`.
///
/// When one side runs out, the other keeps going only if its unmatched
/// positions are being emitted; the exhausted side then behaves as if it
/// held an infinitely large position.
///
/// ```
/// use tsmatch::{merge_positions, EmitMode};
///
/// // 'a' at 1 and 4, 'b' at 2 and 9: only (1, 2) is one apart.
/// let hits = merge_positions(&[1, 4], &[2, 9], 1, 0, EmitMode::MATCHES);
/// assert_eq!(hits, vec![2]);
/// ```
pub fn merge_positions(
    left: &[u32],
    right: &[u32],
    left_offset: u32,
    right_offset: u32,
    mode: EmitMode,
) -> Vec<u32> {
    check_positions_sorted(left);
    check_positions_sorted(right);

    let mut out = Vec::new();
    let (mut i, mut j) = (0usize, 0usize);

    loop {
        let l = left.get(i).map(|p| p.saturating_add(left_offset));
        let r = right.get(j).map(|p| p.saturating_add(right_offset));

        let step = match (l, r) {
            (Some(lp), Some(rp)) if lp < rp => Step::Left(lp),
            (Some(lp), Some(rp)) if lp > rp => Step::Right(rp),
            (Some(_), Some(rp)) => Step::Both(rp),
            (Some(lp), None) if mode.contains(EmitMode::LEFT_UNMATCHED) => Step::Left(lp),
            (None, Some(rp)) if mode.contains(EmitMode::RIGHT_UNMATCHED) => Step::Right(rp),
            _ => break,
        };

        match step {
            Step::Left(pos) => {
                if mode.contains(EmitMode::LEFT_UNMATCHED) {
                    out.push(pos);
                }
                i += 1;
            }
            Step::Both(pos) => {
                if mode.contains(EmitMode::MATCHES) {
                    out.push(pos);
                }
                i += 1;
                j += 1;
            }
            Step::Right(pos) => {
                if mode.contains(EmitMode::RIGHT_UNMATCHED) {
                    out.push(pos);
                }
                j += 1;
            }
        }
    }

    log::trace!(
        "merge {:?}: left={} (+{}) right={} (+{}) -> {}",
        mode,
        left.len(),
        left_offset,
        right.len(),
        right_offset,
        out.len()
    );
    out
}
