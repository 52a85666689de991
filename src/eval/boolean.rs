// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Boolean evaluation of the query above any followed-by node.

use super::{lookup, Evaluator, Node};
use crate::error::EvalError;

impl Evaluator<'_> {
    /// Evaluate the sub-tree rooted at `idx` to a single boolean.
    ///
    /// AND and OR short-circuit: the right operand is never decoded when the
    /// left one already decides the result, so a malformed right operand goes
    /// unnoticed in that case.
    pub(crate) fn eval_bool(&self, idx: usize) -> Result<bool, EvalError> {
        match self.node(idx)? {
            Node::Term(operand) => Ok(lookup::contains(self.vector, operand)),
            Node::Not { operand } => Ok(!self.eval_bool(operand)?),
            Node::And { left, right } => {
                if !self.eval_bool(left)? {
                    return Ok(false);
                }
                self.eval_bool(right)
            }
            Node::Or { left, right } => {
                if self.eval_bool(left)? {
                    return Ok(true);
                }
                self.eval_bool(right)
            }
            // Proximity needs positions; hand the whole sub-tree over.
            Node::FollowedBy { .. } => Ok(!self.eval_positions(idx)?.is_empty()),
        }
    }
}
