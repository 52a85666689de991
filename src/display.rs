// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Text rendering of vectors and queries.
//!
//! Output follows PostgreSQL's `tsvector`/`tsquery` syntax so that logs and
//! CLI output can be pasted straight into it:
//!
//! ```text
//! vector:  'cat':1A 'dog':2,5 'stripped'
//! query:   'cat':* <-> 'dog' & !( 'bird' | 'fish' )
//! ```
//!
//! Parentheses appear when a child binds looser than its parent
//! (OR < AND < FOLLOWED-BY < NOT), and around a followed-by that is the right
//! operand of another followed-by.

use crate::types::{Operator, QueryItem, QueryOperand, TsQuery, TsVector, Weight, WeightMarker};
use std::fmt::{self, Write};

/// Quote a lexeme, doubling embedded quotes and backslashes.
fn write_quoted(f: &mut fmt::Formatter<'_>, lexeme: &str) -> fmt::Result {
    f.write_char('\'')?;
    for ch in lexeme.chars() {
        if ch == '\'' || ch == '\\' {
            f.write_char(ch)?;
        }
        f.write_char(ch)?;
    }
    f.write_char('\'')
}

impl fmt::Display for TsVector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, entry) in self.entries().iter().enumerate() {
            if i > 0 {
                f.write_char(' ')?;
            }
            write_quoted(f, &entry.lexeme)?;
            for (j, pos) in entry.positions.iter().enumerate() {
                f.write_char(if j == 0 { ':' } else { ',' })?;
                write!(f, "{}", pos.position)?;
                if pos.weight != Weight::D {
                    f.write_char(pos.weight.as_char())?;
                }
            }
        }
        Ok(())
    }
}

impl fmt::Display for QueryOperand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write_quoted(f, &self.lexeme)?;
        if !self.weights.is_empty() {
            f.write_char(':')?;
            for marker in &self.weights {
                match marker {
                    WeightMarker::Prefix => f.write_char('*')?,
                    WeightMarker::Class(weight) => f.write_char(weight.as_char())?,
                }
            }
        }
        Ok(())
    }
}

impl fmt::Display for TsQuery {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_empty() {
            return Ok(());
        }
        write_infix(f, self.items(), 0, 0, false)
    }
}

/// Render the sub-tree at `idx`.
fn write_infix(
    f: &mut fmt::Formatter<'_>,
    items: &[QueryItem],
    idx: usize,
    parent_priority: u8,
    right_of_phrase: bool,
) -> fmt::Result {
    let op = match items.get(idx) {
        Some(QueryItem::Operand(operand)) => return write!(f, "{}", operand),
        Some(QueryItem::Operator(op)) => op,
        None => return f.write_str("<invalid>"),
    };
    let Some(kind) = op.kind() else {
        return f.write_str("<invalid>");
    };
    let priority = kind.priority();

    if kind == Operator::Not {
        f.write_char('!')?;
        return write_infix(f, items, idx + 1, priority, false);
    }

    let left = op.left as usize;
    if left == 0 {
        return f.write_str("<invalid>");
    }

    let parens = priority < parent_priority || (kind == Operator::Phrase && right_of_phrase);
    if parens {
        f.write_str("( ")?;
    }

    write_infix(f, items, idx + left, priority, false)?;
    match kind {
        Operator::Or => f.write_str(" | ")?,
        Operator::And => f.write_str(" & ")?,
        Operator::Phrase if op.distance == 1 => f.write_str(" <-> ")?,
        Operator::Phrase => write!(f, " <{}> ", op.distance)?,
        Operator::Not => {}
    }
    write_infix(f, items, idx + 1, priority, kind == Operator::Phrase)?;

    if parens {
        f.write_str(" )")?;
    }
    Ok(())
}
