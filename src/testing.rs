//! Vector builders shared by unit and integration tests.
//!
//! Compiled into the library so integration tests can share them; hidden from docs.

#![doc(hidden)]

use crate::types::{LexemeEntry, TsVector, WordPos};

/// Build a vector from `(lexeme, positions)` pairs, all with weight D.
pub fn vector_from(entries: &[(&str, &[u16])]) -> TsVector {
    TsVector::new(
        entries
            .iter()
            .map(|(lexeme, positions)| {
                LexemeEntry::new(*lexeme, positions.iter().copied().map(WordPos::from))
            })
            .collect(),
    )
    .expect("test lexemes are short")
}

/// Build a vector holding a single lexeme at a single position.
pub fn term_vector(lexeme: &str, position: u16) -> TsVector {
    vector_from(&[(lexeme, &[position])])
}

/// Build a vector from a whitespace-separated sentence, numbering words from 1.
///
/// Repeated words collect all their positions, as a document parser would.
pub fn sentence_vector(text: &str) -> TsVector {
    let entries = text
        .split_whitespace()
        .enumerate()
        .map(|(i, word)| LexemeEntry::new(word, [WordPos::from((i + 1) as u16)]))
        .collect();
    TsVector::new(entries).expect("test lexemes are short")
}

/// Positions of `lexeme` in `vector`, or empty if absent.
pub fn positions_of(vector: &TsVector, lexeme: &str) -> Vec<u16> {
    vector
        .get(lexeme)
        .map(|e| e.positions.iter().map(|p| p.position).collect())
        .unwrap_or_default()
}
