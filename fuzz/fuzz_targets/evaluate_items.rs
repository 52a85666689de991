// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Fuzz target for evaluation of raw query items.
//!
//! Upstream parsers hand over flat item arrays that the evaluator takes
//! verbatim. Whatever they contain, evaluation must return `Ok` or `Err` and
//! never panic, loop or walk off the array. Rendering must not panic either.

#![no_main]

use libfuzzer_sys::fuzz_target;
use tsmatch::{
    evaluate, evaluate_positions, LexemeEntry, QueryItem, QueryOperand, QueryOperator, TsQuery,
    TsVector, WordPos,
};

const LEXEMES: &[&str] = &["a", "ab", "b", "cat", "catalog", "dog"];

/// Items and a small document, both drawn from a tiny vocabulary so lookups hit.
#[derive(Debug)]
struct EvalInput {
    query: TsQuery,
    vector: TsVector,
}

impl<'a> arbitrary::Arbitrary<'a> for EvalInput {
    fn arbitrary(u: &mut arbitrary::Unstructured<'a>) -> arbitrary::Result<Self> {
        // Left offsets past the right sub-tree still share operands, so keep arrays short.
        let len = u.int_in_range(0..=16)?;
        let mut items = Vec::with_capacity(len);
        for _ in 0..len {
            let item = if u.ratio(1, 2)? {
                let lexeme = *u.choose(LEXEMES)?;
                QueryItem::Operand(if u.ratio(1, 4)? {
                    QueryOperand::prefix(lexeme)
                } else {
                    QueryOperand::new(lexeme)
                })
            } else {
                QueryItem::Operator(QueryOperator {
                    // Mostly valid codes, sometimes garbage
                    code: if u.ratio(1, 8)? { u.arbitrary()? } else { u.int_in_range(1..=4)? },
                    distance: u.int_in_range(0..=4)?,
                    left: u.int_in_range(0..=len as u32)?,
                })
            };
            items.push(item);
        }

        let mut entries = Vec::new();
        for lexeme in LEXEMES {
            if u.ratio(1, 2)? {
                let positions: Vec<u16> = u.arbitrary()?;
                entries.push(LexemeEntry::new(
                    *lexeme,
                    positions.into_iter().map(|p| WordPos::from(p % 64)),
                ));
            }
        }
        let vector = TsVector::new(entries).map_err(|_| arbitrary::Error::IncorrectFormat)?;

        Ok(EvalInput {
            query: TsQuery::from_items(items),
            vector,
        })
    }
}

fuzz_target!(|input: EvalInput| {
    let EvalInput { query, vector } = input;

    let _ = query.to_string();

    let matched = evaluate(&query, &vector);
    if let Ok(set) = evaluate_positions(&query, &vector) {
        // INVARIANT: position sets leave the evaluator strictly ascending
        assert!(set.positions.windows(2).all(|w| w[0] < w[1]));
    }

    // INVARIANT: top-level NOT is boolean negation
    if let Ok(matched) = matched {
        if !query.is_empty() {
            assert_eq!(evaluate(&!query, &vector), Ok(!matched));
        }
    }
});
