//! Reference oracles for differential testing.
//!
//! Obviously-correct evaluators over `BTreeSet`s. They know nothing about the
//! flat item layout or merge modes; they spell out what each operator means
//! and nothing else. The one engine limit they model is the leaf cap: a
//! prefix leaf keeps its lowest `MAX_POSITIONS` positions. If an oracle and
//! the engine disagree, the oracle is right.
//!
//! Negation is left out on purpose: below a followed-by its meaning depends on
//! the inverted-list encoding, which is pinned down by targeted tests instead.

use super::common::{Doc, t, p};
use proptest::prelude::*;
use std::collections::BTreeSet;
use tsmatch::{TsQuery, MAX_POSITIONS};

// =============================================================================
// QUERY MODEL
// =============================================================================

/// A negation-free query as a plain tree.
#[derive(Debug, Clone)]
pub enum Expr {
    Term(String),
    Prefix(String),
    And(Box<Expr>, Box<Expr>),
    Or(Box<Expr>, Box<Expr>),
    FollowedBy(Box<Expr>, Box<Expr>, u16),
}

impl Expr {
    /// Build the equivalent engine query.
    pub fn to_query(&self) -> TsQuery {
        match self {
            Expr::Term(lexeme) => t(lexeme),
            Expr::Prefix(lexeme) => p(lexeme),
            Expr::And(l, r) => l.to_query() & r.to_query(),
            Expr::Or(l, r) => l.to_query() | r.to_query(),
            Expr::FollowedBy(l, r, d) => l.to_query().followed_by(r.to_query(), *d),
        }
    }
}

// =============================================================================
// ORACLE IMPLEMENTATIONS
// =============================================================================

fn leaf_entries<'d>(doc: &'d Doc, expr: &Expr) -> Vec<&'d BTreeSet<u16>> {
    match expr {
        Expr::Term(lexeme) => doc.get(lexeme).into_iter().collect(),
        Expr::Prefix(prefix) => doc
            .iter()
            .filter(|(lexeme, _)| lexeme.starts_with(prefix.as_str()))
            .map(|(_, positions)| positions)
            .collect(),
        _ => Vec::new(),
    }
}

/// Where `expr` matches, as (end positions, width).
///
/// AND and OR line both spans up at their ends; followed-by requires the
/// right span to end exactly `d + right width` after the left span ends.
pub fn oracle_positions(expr: &Expr, doc: &Doc) -> (BTreeSet<u32>, u32) {
    match expr {
        Expr::Term(_) | Expr::Prefix(_) => {
            let positions: BTreeSet<u32> = leaf_entries(doc, expr)
                .into_iter()
                .flatten()
                .map(|&p| u32::from(p))
                .collect();
            (positions.into_iter().take(MAX_POSITIONS).collect(), 0)
        }
        Expr::And(l, r) | Expr::Or(l, r) => {
            let (lp, lw) = oracle_positions(l, doc);
            let (rp, rw) = oracle_positions(r, doc);
            let width = lw.max(rw);
            let ls: BTreeSet<u32> = lp.iter().map(|p| p + (width - lw)).collect();
            let rs: BTreeSet<u32> = rp.iter().map(|p| p + (width - rw)).collect();
            let positions = if matches!(expr, Expr::And(..)) {
                ls.intersection(&rs).copied().collect()
            } else {
                ls.union(&rs).copied().collect()
            };
            (positions, width)
        }
        Expr::FollowedBy(l, r, d) => {
            let (lp, lw) = oracle_positions(l, doc);
            let (rp, rw) = oracle_positions(r, doc);
            let shift = u32::from(*d) + rw;
            let positions = lp
                .iter()
                .map(|p| p + shift)
                .filter(|p| rp.contains(p))
                .collect();
            (positions, shift + lw)
        }
    }
}

/// Whether `expr` matches `doc` at all.
///
/// Leaves only need the lexeme to be present, positions or not.
pub fn oracle_matches(expr: &Expr, doc: &Doc) -> bool {
    match expr {
        Expr::Term(_) | Expr::Prefix(_) => !leaf_entries(doc, expr).is_empty(),
        Expr::And(l, r) => oracle_matches(l, doc) && oracle_matches(r, doc),
        Expr::Or(l, r) => oracle_matches(l, doc) || oracle_matches(r, doc),
        Expr::FollowedBy(..) => !oracle_positions(expr, doc).0.is_empty(),
    }
}

// =============================================================================
// STRATEGIES
// =============================================================================

/// Small vocabulary with shared prefixes so prefix terms hit several entries.
pub const VOCAB: &[&str] = &["a", "ab", "abc", "b", "ba", "c", "cat", "catalog"];

pub const PREFIXES: &[&str] = &["a", "ab", "b", "ca", "cat", "z"];

/// Documents over `VOCAB` with sparse positions; some lexemes carry none.
pub fn doc_strategy() -> impl Strategy<Value = Doc> {
    prop::collection::btree_map(
        prop::sample::select(VOCAB).prop_map(str::to_string),
        prop::collection::btree_set(1u16..60, 0..6),
        0..7,
    )
}

/// Documents whose lexemes each hold up to `MAX_POSITIONS` positions, so
/// unions and prefix leaves run past the cap.
pub fn dense_doc_strategy() -> impl Strategy<Value = Doc> {
    prop::collection::btree_map(
        prop::sample::select(VOCAB).prop_map(str::to_string),
        prop::collection::btree_set(1u16..1024, 128..=MAX_POSITIONS),
        1..5,
    )
}

pub fn expr_strategy() -> impl Strategy<Value = Expr> {
    let leaf = prop_oneof![
        3 => prop::sample::select(VOCAB).prop_map(|w| Expr::Term(w.to_string())),
        1 => prop::sample::select(PREFIXES).prop_map(|w| Expr::Prefix(w.to_string())),
    ];
    leaf.prop_recursive(4, 16, 2, |inner| {
        prop_oneof![
            (inner.clone(), inner.clone())
                .prop_map(|(l, r)| Expr::And(Box::new(l), Box::new(r))),
            (inner.clone(), inner.clone())
                .prop_map(|(l, r)| Expr::Or(Box::new(l), Box::new(r))),
            (inner.clone(), inner, 0u16..4)
                .prop_map(|(l, r, d)| Expr::FollowedBy(Box::new(l), Box::new(r), d)),
        ]
    })
}

// =============================================================================
// ORACLE SELF-CHECKS
// =============================================================================

#[test]
fn oracle_followed_by_basics() {
    let doc: Doc = [
        ("cat".to_string(), BTreeSet::from([1, 7])),
        ("dog".to_string(), BTreeSet::from([2, 10])),
    ]
    .into_iter()
    .collect();

    let adjacent = Expr::FollowedBy(
        Box::new(Expr::Term("cat".into())),
        Box::new(Expr::Term("dog".into())),
        1,
    );
    assert_eq!(oracle_positions(&adjacent, &doc), (BTreeSet::from([2]), 1));
    assert!(oracle_matches(&adjacent, &doc));

    let three_apart = Expr::FollowedBy(
        Box::new(Expr::Term("cat".into())),
        Box::new(Expr::Term("dog".into())),
        3,
    );
    assert_eq!(oracle_positions(&three_apart, &doc), (BTreeSet::from([10]), 3));
}
