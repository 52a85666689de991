//! Shared test utilities and fixtures.

#![allow(dead_code)]

use std::collections::{BTreeMap, BTreeSet};
use tsmatch::{LexemeEntry, TsQuery, TsVector, WordPos, MAX_ENTRY_POS, MAX_POSITIONS};

// Re-export canonical test utilities from tsmatch::testing
pub use tsmatch::testing::{positions_of, sentence_vector, term_vector, vector_from};

// ============================================================================
// QUERY SHORTHAND
// ============================================================================

/// Exact term.
pub fn t(lexeme: &str) -> TsQuery {
    TsQuery::term(lexeme)
}

/// Prefix term (`lexeme:*`).
pub fn p(lexeme: &str) -> TsQuery {
    TsQuery::prefix(lexeme)
}

// ============================================================================
// DOCUMENT MODEL
// ============================================================================

/// A document as a plain map from lexeme to position set.
///
/// The form the oracles read; `to_vector` turns it into the real thing.
pub type Doc = BTreeMap<String, BTreeSet<u16>>;

pub fn to_vector(doc: &Doc) -> TsVector {
    TsVector::new(
        doc.iter()
            .map(|(lexeme, positions)| {
                LexemeEntry::new(lexeme.clone(), positions.iter().copied().map(WordPos::from))
            })
            .collect(),
    )
    .expect("generated lexemes are short")
}

// ============================================================================
// INVARIANT CHECKS
// ============================================================================

/// Assert a position list is strictly ascending and within the size cap.
pub fn assert_positions_normalized(positions: &[u32]) {
    assert!(
        positions.len() <= MAX_POSITIONS,
        "position list has {} entries",
        positions.len()
    );
    assert_positions_sorted(positions);
}

/// Assert a position list is strictly ascending. Merge results may exceed the cap.
pub fn assert_positions_sorted(positions: &[u32]) {
    for pair in positions.windows(2) {
        assert!(pair[0] < pair[1], "positions not strictly ascending: {:?}", pair);
    }
}

/// Assert a vector's entries are sorted, unique and carry normalized positions.
pub fn assert_vector_well_formed(vector: &TsVector) {
    for pair in vector.entries().windows(2) {
        assert!(
            pair[0].lexeme < pair[1].lexeme,
            "lexemes out of order: {:?} >= {:?}",
            pair[0].lexeme,
            pair[1].lexeme
        );
    }
    for entry in vector.entries() {
        let positions: Vec<u32> = entry.positions.iter().map(|p| u32::from(p.position)).collect();
        assert_positions_normalized(&positions);
        assert!(positions.iter().all(|&p| p <= u32::from(MAX_ENTRY_POS)));
    }
}

// ============================================================================
// FIXTURE FILES
// ============================================================================

/// Create a fresh temporary directory for fixture files.
pub fn create_temp_dir() -> tempfile::TempDir {
    tempfile::TempDir::new().expect("Failed to create temp directory")
}

/// Serialize `value` as JSON into `dir/name` and return the path.
pub fn write_json<T: serde::Serialize>(
    dir: &tempfile::TempDir,
    name: &str,
    value: &T,
) -> std::path::PathBuf {
    let path = dir.path().join(name);
    let json = serde_json::to_string_pretty(value).expect("Failed to serialize fixture");
    std::fs::write(&path, json).expect("Failed to write fixture");
    path
}
