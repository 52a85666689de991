// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Position-set evaluation beneath followed-by operators.
//!
//! Every sub-query evaluates to a [`PositionSet`]. NOT only flips the
//! `invert` flag, so "where it does not match" is never enumerated. The
//! binary operators then pick a merge mode by De Morgan over the two flags:
//!
//! | l.invert | r.invert | AND / FOLLOWED-BY           | OR                           |
//! |----------|----------|-----------------------------|------------------------------|
//! | false    | false    | matches                     | all (union)                  |
//! | true     | false    | right unmatched             | left unmatched, inverted     |
//! | false    | true     | left unmatched              | right unmatched, inverted    |
//! | true     | true     | all (union), inverted       | matches, inverted            |
//!
//! Width alignment: AND and OR shift the narrower side by the difference in
//! widths so both spans end together. Followed-by shifts the left side by
//! `distance + right.width`, so a hit lands on the right side's position.
//!
//! Only leaf lookups are capped at `MAX_POSITIONS`. Merge results are kept
//! whole, so a union of two full leaves can still feed a followed-by.

use super::merge::{merge_positions, EmitMode};
use super::{lookup, Evaluator, Node};
use crate::error::EvalError;
use crate::positions::PositionSet;
use crate::verify::contracts::{check_positions_normalized, check_positions_sorted};

/// Merge mode and result inversion for AND and followed-by.
fn and_mode(left_invert: bool, right_invert: bool) -> (EmitMode, bool) {
    match (left_invert, right_invert) {
        (false, false) => (EmitMode::MATCHES, false),
        (true, false) => (EmitMode::RIGHT_UNMATCHED, false),
        (false, true) => (EmitMode::LEFT_UNMATCHED, false),
        (true, true) => (EmitMode::all(), true),
    }
}

/// Merge mode and result inversion for OR.
fn or_mode(left_invert: bool, right_invert: bool) -> (EmitMode, bool) {
    match (left_invert, right_invert) {
        (false, false) => (EmitMode::all(), false),
        (true, false) => (EmitMode::LEFT_UNMATCHED, true),
        (false, true) => (EmitMode::RIGHT_UNMATCHED, true),
        (true, true) => (EmitMode::MATCHES, true),
    }
}

/// Offsets that make two spans of different widths end together.
fn align(left: &PositionSet, right: &PositionSet) -> (u32, u32, u32) {
    let width = left.width.max(right.width);
    (width - left.width, width - right.width, width)
}

impl Evaluator<'_> {
    /// Evaluate the sub-tree rooted at `idx` to a position set.
    ///
    /// Both operands are always evaluated; nothing short-circuits here.
    pub(crate) fn eval_positions(&self, idx: usize) -> Result<PositionSet, EvalError> {
        let set = match self.node(idx)? {
            Node::Term(operand) => {
                let positions = lookup::positions(self.vector, operand);
                check_positions_normalized(&positions);
                PositionSet::new(positions)
            }
            Node::Not { operand } => {
                let mut set = self.eval_positions(operand)?;
                set.invert = !set.invert;
                set
            }
            Node::Or { left, right } => {
                let l = self.eval_positions(left)?;
                let r = self.eval_positions(right)?;
                let (l_off, r_off, width) = align(&l, &r);
                let (mode, invert) = or_mode(l.invert, r.invert);
                combine(&l, &r, l_off, r_off, width, mode, invert)
            }
            Node::And { left, right } => {
                let l = self.eval_positions(left)?;
                let r = self.eval_positions(right)?;
                let (l_off, r_off, width) = align(&l, &r);
                let (mode, invert) = and_mode(l.invert, r.invert);
                combine(&l, &r, l_off, r_off, width, mode, invert)
            }
            Node::FollowedBy {
                left,
                right,
                distance,
            } => {
                let l = self.eval_positions(left)?;
                let r = self.eval_positions(right)?;
                let l_off = u32::from(distance).saturating_add(r.width);
                let width = l_off.saturating_add(l.width);
                let (mode, invert) = and_mode(l.invert, r.invert);
                combine(&l, &r, l_off, 0, width, mode, invert)
            }
        };

        check_positions_sorted(&set.positions);
        Ok(set)
    }
}

fn combine(
    left: &PositionSet,
    right: &PositionSet,
    left_offset: u32,
    right_offset: u32,
    width: u32,
    mode: EmitMode,
    invert: bool,
) -> PositionSet {
    let mut merged = merge_positions(
        &left.positions,
        &right.positions,
        left_offset,
        right_offset,
        mode,
    );
    // Saturated offsets are the only source of repeats.
    merged.dedup();
    PositionSet {
        positions: merged,
        width,
        invert,
    }
}
