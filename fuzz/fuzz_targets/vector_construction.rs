// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Fuzz target for document vector construction.
//!
//! Any entries, in any order, with any positions and weights, must either be
//! rejected for an overlong lexeme or come out sorted, unique, clamped and
//! truncated. The JSON form must read back to the same vector.

#![no_main]

use libfuzzer_sys::fuzz_target;
use tsmatch::{
    LexemeEntry, TsVector, Weight, WordPos, MAX_ENTRY_POS, MAX_LEXEME_LEN, MAX_POSITIONS,
};

fn weight(bits: u8) -> Weight {
    match bits % 4 {
        0 => Weight::D,
        1 => Weight::C,
        2 => Weight::B,
        _ => Weight::A,
    }
}

fuzz_target!(|raw: Vec<(String, Vec<(u16, u8)>)>| {
    let too_long = raw.iter().any(|(lexeme, _)| lexeme.len() > MAX_LEXEME_LEN);
    let entries: Vec<LexemeEntry> = raw
        .iter()
        .map(|(lexeme, positions)| {
            LexemeEntry::new(
                lexeme.clone(),
                positions.iter().map(|&(p, w)| WordPos::new(p, weight(w))),
            )
        })
        .collect();

    let vector = match TsVector::new(entries) {
        Ok(vector) => vector,
        Err(_) => {
            assert!(too_long, "only overlong lexemes are rejected");
            return;
        }
    };
    assert!(!too_long);

    // INVARIANT: lexemes strictly ascending
    for pair in vector.entries().windows(2) {
        assert!(pair[0].lexeme < pair[1].lexeme);
    }

    for entry in vector.entries() {
        // INVARIANT: positions strictly ascending, bounded, capped
        assert!(entry.positions.len() <= MAX_POSITIONS);
        for pair in entry.positions.windows(2) {
            assert!(pair[0].position < pair[1].position);
        }
        assert!(entry.positions.iter().all(|p| p.position <= MAX_ENTRY_POS));
    }

    // Every input lexeme is findable
    for (lexeme, _) in &raw {
        assert!(vector.get(lexeme).is_some());
    }

    let json = serde_json::to_string(&vector).expect("vectors serialize");
    let back: TsVector = serde_json::from_str(&json).expect("serialized vectors read back");
    assert_eq!(back, vector);
});
