// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! The two inputs of every evaluation: a document vector and a query.
//!
//! Both arrive already parsed. The types here only carry the structure and the
//! invariants the evaluator leans on; they never re-check lexeme normalization.
//!
//! # Invariants (the stuff that breaks if you ignore it)
//!
//! - **TsVector**: lexemes strictly ascending by byte order. Every position
//!   list is ascending, unique by position, at most `MAX_POSITIONS` long, and
//!   every position is `<= MAX_ENTRY_POS`. `TsVector::new` establishes all of
//!   this; there is no other way to build one.
//!
//! - **TsQuery**: items in prefix order. An operator at index `i` has its right
//!   (or only) operand at `i + 1` and its left operand at `i + left`. The
//!   builders below always produce well-formed item arrays. `from_items` takes
//!   whatever the upstream parser produced, and the evaluator reports a
//!   malformed array as `EvalError`.

use crate::error::VectorError;
use crate::limits::{MAX_ENTRY_POS, MAX_LEXEME_LEN, MAX_PHRASE_DISTANCE, MAX_POSITIONS};
use crate::verify::contracts;
use serde::{Deserialize, Serialize};
use std::ops::{BitAnd, BitOr, Not};

// =============================================================================
// DOCUMENT VECTOR
// =============================================================================

/// Weight class of one occurrence.
///
/// Declared weakest first so the derived `Ord` ranks `A` highest.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
pub enum Weight {
    #[default]
    D,
    C,
    B,
    A,
}

impl Weight {
    /// The letter used in the text form.
    pub fn as_char(self) -> char {
        match self {
            Weight::A => 'A',
            Weight::B => 'B',
            Weight::C => 'C',
            Weight::D => 'D',
        }
    }
}

/// One occurrence of a lexeme: where it sits and how heavy it is.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct WordPos {
    pub position: u16,
    #[serde(default)]
    pub weight: Weight,
}

impl WordPos {
    pub fn new(position: u16, weight: Weight) -> Self {
        Self { position, weight }
    }
}

impl From<u16> for WordPos {
    fn from(position: u16) -> Self {
        Self {
            position,
            weight: Weight::D,
        }
    }
}

/// A lexeme and every place it occurs.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LexemeEntry {
    pub lexeme: String,
    #[serde(default)]
    pub positions: Vec<WordPos>,
}

impl LexemeEntry {
    pub fn new(lexeme: impl Into<String>, positions: impl IntoIterator<Item = WordPos>) -> Self {
        Self {
            lexeme: lexeme.into(),
            positions: positions.into_iter().collect(),
        }
    }
}

/// A parsed document: lexemes sorted and unique, each with its positions.
///
/// Deserialization goes through [`TsVector::new`], so a vector read from JSON
/// satisfies the same invariants as one built in code.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "Vec<LexemeEntry>", into = "Vec<LexemeEntry>")]
pub struct TsVector {
    entries: Vec<LexemeEntry>,
}

impl TsVector {
    /// Build a vector from entries in any order.
    ///
    /// Duplicate lexemes are merged. Each position list is clamped to
    /// `MAX_ENTRY_POS`, sorted, deduplicated (keeping the strongest weight of
    /// a repeated position) and truncated to `MAX_POSITIONS`.
    pub fn new(entries: Vec<LexemeEntry>) -> Result<Self, VectorError> {
        if let Some(entry) = entries.iter().find(|e| e.lexeme.len() > MAX_LEXEME_LEN) {
            return Err(VectorError::LexemeTooLong {
                len: entry.lexeme.len(),
                max: MAX_LEXEME_LEN,
            });
        }

        let mut entries = entries;
        entries.sort_by(|a, b| a.lexeme.cmp(&b.lexeme));

        let mut merged: Vec<LexemeEntry> = Vec::with_capacity(entries.len());
        for entry in entries {
            match merged.last_mut() {
                Some(last) if last.lexeme == entry.lexeme => {
                    last.positions.extend(entry.positions);
                }
                _ => merged.push(entry),
            }
        }

        for entry in &mut merged {
            normalize_word_positions(&entry.lexeme, &mut entry.positions);
        }

        contracts::check_vector_well_formed(&merged);
        Ok(Self { entries: merged })
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// All entries, in lexeme order.
    pub fn entries(&self) -> &[LexemeEntry] {
        &self.entries
    }

    /// Exact lookup of one lexeme.
    pub fn get(&self, lexeme: &str) -> Option<&LexemeEntry> {
        self.entries
            .binary_search_by(|e| e.lexeme.as_str().cmp(lexeme))
            .ok()
            .map(|i| &self.entries[i])
    }
}

impl TryFrom<Vec<LexemeEntry>> for TsVector {
    type Error = VectorError;

    fn try_from(entries: Vec<LexemeEntry>) -> Result<Self, Self::Error> {
        TsVector::new(entries)
    }
}

impl From<TsVector> for Vec<LexemeEntry> {
    fn from(vector: TsVector) -> Self {
        vector.entries
    }
}

/// Clamp, sort, dedupe and truncate one lexeme's positions in place.
fn normalize_word_positions(lexeme: &str, positions: &mut Vec<WordPos>) {
    let mut clamped = 0usize;
    for pos in positions.iter_mut() {
        if pos.position > MAX_ENTRY_POS {
            pos.position = MAX_ENTRY_POS;
            clamped += 1;
        }
    }
    if clamped > 0 {
        log::debug!(
            "clamped {} position(s) of '{}' to {}",
            clamped,
            lexeme,
            MAX_ENTRY_POS
        );
    }

    positions.sort_by_key(|p| p.position);
    positions.dedup_by(|next, kept| {
        if next.position == kept.position {
            kept.weight = kept.weight.max(next.weight);
            true
        } else {
            false
        }
    });

    if positions.len() > MAX_POSITIONS {
        log::debug!(
            "truncated positions of '{}' from {} to {}",
            lexeme,
            positions.len(),
            MAX_POSITIONS
        );
        positions.truncate(MAX_POSITIONS);
    }
}

// =============================================================================
// QUERY
// =============================================================================

/// Annotation attached to a query operand.
///
/// Weight classes restrict matching in ranking-aware engines; this crate only
/// interprets `Prefix`, and only when it comes first.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum WeightMarker {
    Prefix,
    Class(Weight),
}

/// A query leaf: the lexeme to look for and its annotations.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QueryOperand {
    pub lexeme: String,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub weights: Vec<WeightMarker>,
}

impl QueryOperand {
    /// Exact-match operand with no annotations.
    pub fn new(lexeme: impl Into<String>) -> Self {
        Self {
            lexeme: lexeme.into(),
            weights: Vec::new(),
        }
    }

    /// Prefix-match operand (`lexeme:*`).
    pub fn prefix(lexeme: impl Into<String>) -> Self {
        Self {
            lexeme: lexeme.into(),
            weights: vec![WeightMarker::Prefix],
        }
    }

    /// Whether this operand matches every lexeme starting with `lexeme`.
    pub fn is_prefix(&self) -> bool {
        matches!(self.weights.first(), Some(WeightMarker::Prefix))
    }
}

/// Query operators, with the codes used in the flat item layout.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum Operator {
    Not = 1,
    And = 2,
    Or = 3,
    /// Followed-by at an exact distance (`<->`, `<N>`).
    Phrase = 4,
}

impl Operator {
    pub fn code(self) -> u8 {
        self as u8
    }

    pub fn from_code(code: u8) -> Option<Self> {
        match code {
            1 => Some(Operator::Not),
            2 => Some(Operator::And),
            3 => Some(Operator::Or),
            4 => Some(Operator::Phrase),
            _ => None,
        }
    }

    /// Binding strength in the text form; higher binds tighter.
    pub(crate) fn priority(self) -> u8 {
        match self {
            Operator::Or => 1,
            Operator::And => 2,
            Operator::Phrase => 3,
            Operator::Not => 4,
        }
    }
}

/// An operator item in the flat layout.
///
/// `code` stays a raw byte so that items handed over by an upstream parser are
/// taken verbatim; [`QueryOperator::kind`] decodes it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct QueryOperator {
    pub code: u8,
    /// Followed-by distance; zero for every other operator.
    #[serde(default)]
    pub distance: u16,
    /// Offset from this item to its left operand; unused by NOT.
    #[serde(default)]
    pub left: u32,
}

impl QueryOperator {
    pub fn new(op: Operator, distance: u16, left: u32) -> Self {
        Self {
            code: op.code(),
            distance,
            left,
        }
    }

    pub fn kind(&self) -> Option<Operator> {
        Operator::from_code(self.code)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum QueryItem {
    Operand(QueryOperand),
    Operator(QueryOperator),
}

/// A parsed query in prefix order.
///
/// ```
/// use tsmatch::TsQuery;
///
/// // 'cat' <-> 'dog' & !'bird'
/// let query = TsQuery::term("cat").followed_by(TsQuery::term("dog"), 1) & !TsQuery::term("bird");
/// assert_eq!(query.to_string(), "'cat' <-> 'dog' & !'bird'");
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TsQuery {
    items: Vec<QueryItem>,
}

impl TsQuery {
    /// Take items from an upstream parser as-is.
    pub fn from_items(items: Vec<QueryItem>) -> Self {
        Self { items }
    }

    /// Single exact-match term.
    pub fn term(lexeme: impl Into<String>) -> Self {
        QueryOperand::new(lexeme).into()
    }

    /// Single prefix-match term.
    pub fn prefix(lexeme: impl Into<String>) -> Self {
        QueryOperand::prefix(lexeme).into()
    }

    pub fn items(&self) -> &[QueryItem] {
        &self.items
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// An empty query has no items and matches nothing.
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn and(self, rhs: TsQuery) -> TsQuery {
        self.combine(Operator::And, 0, rhs)
    }

    pub fn or(self, rhs: TsQuery) -> TsQuery {
        self.combine(Operator::Or, 0, rhs)
    }

    /// `self <distance> rhs`: `rhs` must occur exactly `distance` positions
    /// after `self`. Distances above `MAX_PHRASE_DISTANCE` are clamped.
    pub fn followed_by(self, rhs: TsQuery, distance: u16) -> TsQuery {
        self.combine(Operator::Phrase, distance.min(MAX_PHRASE_DISTANCE), rhs)
    }

    /// `!self`. Negating an empty query leaves it empty.
    pub fn negate(self) -> TsQuery {
        if self.items.is_empty() {
            return self;
        }
        let mut items = Vec::with_capacity(self.items.len() + 1);
        items.push(QueryItem::Operator(QueryOperator::new(Operator::Not, 0, 0)));
        items.extend(self.items);
        TsQuery { items }
    }

    /// Layout: operator, right subtree, left subtree. An empty side drops out
    /// and the other side is returned unchanged.
    fn combine(self, op: Operator, distance: u16, rhs: TsQuery) -> TsQuery {
        if self.items.is_empty() {
            return rhs;
        }
        if rhs.items.is_empty() {
            return self;
        }
        let left = (rhs.items.len() + 1) as u32;
        let mut items = Vec::with_capacity(1 + rhs.items.len() + self.items.len());
        items.push(QueryItem::Operator(QueryOperator::new(op, distance, left)));
        items.extend(rhs.items);
        items.extend(self.items);
        TsQuery { items }
    }
}

impl From<QueryOperand> for TsQuery {
    fn from(operand: QueryOperand) -> Self {
        TsQuery {
            items: vec![QueryItem::Operand(operand)],
        }
    }
}

impl BitAnd for TsQuery {
    type Output = TsQuery;

    fn bitand(self, rhs: TsQuery) -> TsQuery {
        self.and(rhs)
    }
}

impl BitOr for TsQuery {
    type Output = TsQuery;

    fn bitor(self, rhs: TsQuery) -> TsQuery {
        self.or(rhs)
    }
}

impl Not for TsQuery {
    type Output = TsQuery;

    fn not(self) -> TsQuery {
        self.negate()
    }
}
