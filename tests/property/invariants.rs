//! Algebraic laws of the evaluator, including negation.

use super::common::{t, to_vector};
use super::oracles::{doc_strategy, expr_strategy, VOCAB};
use proptest::prelude::*;
use tsmatch::{evaluate, evaluate_positions, TsQuery};

fn term_strategy() -> impl Strategy<Value = TsQuery> {
    prop::sample::select(VOCAB).prop_map(t)
}

/// Occurrences of `lexeme`, or none.
fn occurrences(doc: &super::common::Doc, lexeme: &str) -> Vec<u32> {
    doc.get(lexeme)
        .map(|ps| ps.iter().map(|&p| u32::from(p)).collect())
        .unwrap_or_default()
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(500))]

    /// Top-level negation is boolean negation, whatever the operand.
    #[test]
    fn prop_not_negates(expr in expr_strategy(), doc in doc_strategy()) {
        let vector = to_vector(&doc);
        let query = expr.to_query();
        prop_assert_eq!(
            evaluate(&!query.clone(), &vector).unwrap(),
            !evaluate(&query, &vector).unwrap()
        );
    }

    /// De Morgan holds above followed-by.
    #[test]
    fn prop_de_morgan(a in expr_strategy(), b in expr_strategy(), doc in doc_strategy()) {
        let vector = to_vector(&doc);
        let (a, b) = (a.to_query(), b.to_query());

        let lhs = !(a.clone() & b.clone());
        let rhs = !a.clone() | !b.clone();
        prop_assert_eq!(evaluate(&lhs, &vector).unwrap(), evaluate(&rhs, &vector).unwrap());

        let lhs = !(a.clone() | b.clone());
        let rhs = !a & !b;
        prop_assert_eq!(evaluate(&lhs, &vector).unwrap(), evaluate(&rhs, &vector).unwrap());
    }

    /// AND and OR are commutative in boolean mode.
    #[test]
    fn prop_commutative(a in expr_strategy(), b in expr_strategy(), doc in doc_strategy()) {
        let vector = to_vector(&doc);
        let (a, b) = (a.to_query(), b.to_query());
        prop_assert_eq!(
            evaluate(&(a.clone() & b.clone()), &vector).unwrap(),
            evaluate(&(b.clone() & a.clone()), &vector).unwrap()
        );
        prop_assert_eq!(
            evaluate(&(a.clone() | b.clone()), &vector).unwrap(),
            evaluate(&(b | a), &vector).unwrap()
        );
    }

    /// `a <d> b` matches iff some `p` in `a` has `p + d` in `b`.
    #[test]
    fn prop_followed_by_exact(
        a in prop::sample::select(VOCAB),
        b in prop::sample::select(VOCAB),
        d in 0u16..5,
        doc in doc_strategy(),
    ) {
        let vector = to_vector(&doc);
        let (pa, pb) = (occurrences(&doc, a), occurrences(&doc, b));
        let expected = pa.iter().any(|p| pb.contains(&(p + u32::from(d))));
        prop_assert_eq!(evaluate(&t(a).followed_by(t(b), d), &vector).unwrap(), expected);
    }

    /// `!a <d> b`: some `b` occurrence has no `a` exactly `d` before it.
    #[test]
    fn prop_negated_left_under_followed_by(
        a in prop::sample::select(VOCAB),
        b in prop::sample::select(VOCAB),
        d in 0u16..5,
        doc in doc_strategy(),
    ) {
        let vector = to_vector(&doc);
        let (pa, pb) = (occurrences(&doc, a), occurrences(&doc, b));
        let expected = pb.iter().any(|q| !pa.iter().any(|p| p + u32::from(d) == *q));

        let query = (!t(a)).followed_by(t(b), d);
        let set = evaluate_positions(&query, &vector).unwrap();
        prop_assert!(!set.invert);
        prop_assert_eq!(evaluate(&query, &vector).unwrap(), expected);
    }

    /// `a <d> !b`: some `a` occurrence has no `b` exactly `d` after it.
    #[test]
    fn prop_negated_right_under_followed_by(
        a in prop::sample::select(VOCAB),
        b in prop::sample::select(VOCAB),
        d in 0u16..5,
        doc in doc_strategy(),
    ) {
        let vector = to_vector(&doc);
        let (pa, pb) = (occurrences(&doc, a), occurrences(&doc, b));
        let expected = pa.iter().any(|p| !pb.contains(&(p + u32::from(d))));

        let query = t(a).followed_by(!t(b), d);
        prop_assert_eq!(evaluate(&query, &vector).unwrap(), expected);
    }

    /// Evaluation never errors on builder-made queries.
    #[test]
    fn prop_builders_are_well_formed(a in term_strategy(), b in term_strategy(), doc in doc_strategy()) {
        let vector = to_vector(&doc);
        for query in [
            a.clone() & b.clone(),
            !(a.clone() | b.clone()),
            (!a.clone()).followed_by(!b.clone(), 2),
            a.followed_by(b, 0),
        ] {
            prop_assert!(evaluate(&query, &vector).is_ok());
            prop_assert!(evaluate_positions(&query, &vector).is_ok());
        }
    }
}
