// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Error types.
//!
//! Evaluation has exactly one failure class: the query items do not form a
//! well-formed tree. That only happens when something upstream hand-built or
//! corrupted the items, so it is reported as a defect rather than a "no match".
//! Everything a user can cause (absent terms, empty inputs) is `Ok(false)`.

use thiserror::Error;

/// A malformed query reached the evaluator.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum EvalError {
    /// Operator item carries a code outside NOT/AND/OR/PHRASE.
    #[error("invalid operator {code} at query item {item}")]
    InvalidOperator { code: u8, item: usize },

    /// Operator points at an operand outside the item array, or at itself.
    #[error("operator at query item {item} references missing operand {target} (query has {len} items)")]
    DanglingOperand {
        item: usize,
        target: usize,
        len: usize,
    },

    /// Binary operator whose left and right operands are the same item.
    #[error("operator at query item {item} points both operands at the same item")]
    OverlappingOperands { item: usize },
}

/// A document vector could not be built from the given entries.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum VectorError {
    #[error("lexeme of {len} bytes exceeds the maximum of {max}")]
    LexemeTooLong { len: usize, max: usize },
}
