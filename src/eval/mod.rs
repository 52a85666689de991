// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Query evaluation against a single document vector.
//!
//! Two evaluators share one walk over the flat query items:
//!
//! ```text
//!   evaluate()
//!       │
//!       ▼
//!   boolean.rs  ── and/or/not, short-circuiting ──┐
//!       │                                          │
//!       │ followed-by node                         │ leaf
//!       ▼                                          ▼
//!   phrase.rs   ── position sets, invert flag ── lookup.rs
//!       │
//!       ▼
//!   merge.rs    ── offset-aware sorted-list merge
//! ```
//!
//! The boolean evaluator handles everything above the first followed-by node.
//! From there down, the whole sub-tree is evaluated to position sets, because
//! proximity needs to know *where* each operand matched.

mod boolean;
mod lookup;
mod merge;
mod phrase;

pub use merge::{merge_positions, EmitMode};

use crate::error::EvalError;
use crate::positions::PositionSet;
use crate::types::{Operator, QueryItem, QueryOperand, TsQuery, TsVector};
#[cfg(feature = "parallel")]
use rayon::prelude::*;

/// Whether `vector` satisfies `query`.
///
/// An empty query matches nothing. The only error is a malformed item array.
///
/// ```
/// use tsmatch::{evaluate, LexemeEntry, TsQuery, TsVector, WordPos};
///
/// let vector = TsVector::new(vec![
///     LexemeEntry::new("cat", [WordPos::from(1)]),
///     LexemeEntry::new("dog", [WordPos::from(2)]),
/// ])
/// .unwrap();
///
/// let query = TsQuery::term("cat").followed_by(TsQuery::term("dog"), 1);
/// assert!(evaluate(&query, &vector).unwrap());
/// ```
pub fn evaluate(query: &TsQuery, vector: &TsVector) -> Result<bool, EvalError> {
    if query.is_empty() {
        log::debug!("empty query matches nothing");
        return Ok(false);
    }
    let matched = Evaluator::new(query, vector).eval_bool(0)?;
    log::trace!("query of {} items matched={}", query.len(), matched);
    Ok(matched)
}

/// Evaluate the whole query in position-set mode.
///
/// This is what a followed-by node sees of its operands: match positions,
/// width, and whether the list is inverted. An empty query yields an empty,
/// non-inverted set.
pub fn evaluate_positions(query: &TsQuery, vector: &TsVector) -> Result<PositionSet, EvalError> {
    if query.is_empty() {
        return Ok(PositionSet::default());
    }
    Evaluator::new(query, vector).eval_positions(0)
}

/// Evaluate one query against many vectors.
///
/// Runs on rayon's global pool with the `parallel` feature, sequentially
/// otherwise. Any error aborts the batch.
pub fn evaluate_batch(query: &TsQuery, vectors: &[TsVector]) -> Result<Vec<bool>, EvalError> {
    log::debug!(
        "evaluating query of {} items against {} vectors",
        query.len(),
        vectors.len()
    );

    #[cfg(feature = "parallel")]
    let results: Result<Vec<bool>, EvalError> = vectors
        .par_iter()
        .map(|vector| evaluate(query, vector))
        .collect();

    #[cfg(not(feature = "parallel"))]
    let results: Result<Vec<bool>, EvalError> = vectors
        .iter()
        .map(|vector| evaluate(query, vector))
        .collect();

    results
}

/// A query item with its operand indices resolved.
#[derive(Debug, Clone, Copy)]
pub(crate) enum Node<'a> {
    Term(&'a QueryOperand),
    Not {
        operand: usize,
    },
    And {
        left: usize,
        right: usize,
    },
    Or {
        left: usize,
        right: usize,
    },
    FollowedBy {
        left: usize,
        right: usize,
        distance: u16,
    },
}

/// Call-scoped evaluation state: borrowed inputs, nothing else.
pub(crate) struct Evaluator<'a> {
    items: &'a [QueryItem],
    vector: &'a TsVector,
}

impl<'a> Evaluator<'a> {
    pub(crate) fn new(query: &'a TsQuery, vector: &'a TsVector) -> Self {
        Self {
            items: query.items(),
            vector,
        }
    }

    /// Decode the item at `idx`.
    ///
    /// Operands always sit after their operator, so following them can only
    /// move forward through the array and recursion terminates. A binary
    /// operator may not use one item as both operands: a chain of those would
    /// revisit the shared sub-tree twice per level.
    pub(crate) fn node(&self, idx: usize) -> Result<Node<'a>, EvalError> {
        let len = self.items.len();
        let item = self.items.get(idx).ok_or(EvalError::DanglingOperand {
            item: idx,
            target: idx,
            len,
        })?;

        let op = match item {
            QueryItem::Operand(operand) => return Ok(Node::Term(operand)),
            QueryItem::Operator(op) => op,
        };

        let kind = op.kind().ok_or(EvalError::InvalidOperator {
            code: op.code,
            item: idx,
        })?;

        let right = self.operand_index(idx, 1)?;
        if kind == Operator::Not {
            return Ok(Node::Not { operand: right });
        }
        if op.left == 1 {
            return Err(EvalError::OverlappingOperands { item: idx });
        }
        let left = self.operand_index(idx, op.left as usize)?;

        Ok(match kind {
            Operator::And => Node::And { left, right },
            Operator::Or => Node::Or { left, right },
            Operator::Phrase => Node::FollowedBy {
                left,
                right,
                distance: op.distance,
            },
            Operator::Not => Node::Not { operand: right },
        })
    }

    fn operand_index(&self, idx: usize, offset: usize) -> Result<usize, EvalError> {
        let target = idx.saturating_add(offset);
        if offset == 0 || target >= self.items.len() {
            return Err(EvalError::DanglingOperand {
                item: idx,
                target,
                len: self.items.len(),
            });
        }
        Ok(target)
    }
}
