//! Full-text predicate evaluation over lexeme position vectors.
//!
//! This crate answers one question: does a parsed document vector satisfy a
//! parsed query? Queries combine terms with `&`, `|`, `!` and the followed-by
//! operator `<N>`, which requires its right operand exactly `N` positions after
//! its left one. Negation under followed-by is exact: `!a <-> b` matches a `b`
//! that is *not* directly preceded by `a`, which a plain boolean evaluator
//! cannot express.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────┐     ┌──────────────┐     ┌──────────────────┐
//! │  types.rs   │────▶│  eval/       │────▶│  positions.rs    │
//! │ (TsVector,  │     │ (boolean,    │     │ (PositionSet,    │
//! │  TsQuery)   │     │  phrase,     │     │  normalize)      │
//! └─────────────┘     │  lookup,     │     └──────────────────┘
//!        │            │  merge)      │              │
//!        ▼            └──────────────┘              ▼
//! ┌─────────────────────────────────────────────────────┐
//! │                 verify/contracts.rs                 │
//! │   (sorted/unique/bounded checks, debug builds)      │
//! └─────────────────────────────────────────────────────┘
//! ```
//!
//! # Usage
//!
//! ```
//! use tsmatch::{evaluate, LexemeEntry, TsQuery, TsVector, WordPos};
//!
//! let vector = TsVector::new(vec![
//!     LexemeEntry::new("cat", [WordPos::from(1)]),
//!     LexemeEntry::new("dog", [WordPos::from(5)]),
//! ])
//! .unwrap();
//!
//! let adjacent = TsQuery::term("cat").followed_by(TsQuery::term("dog"), 1);
//! assert!(!evaluate(&adjacent, &vector).unwrap());
//! assert!(evaluate(&!adjacent, &vector).unwrap());
//! ```

// Module declarations
mod display;
pub mod error;
mod eval;
pub mod limits;
mod positions;
pub mod testing;
mod types;
pub mod verify;

// Re-exports for public API
pub use error::{EvalError, VectorError};
pub use eval::{evaluate, evaluate_batch, evaluate_positions, merge_positions, EmitMode};
pub use limits::{MAX_ENTRY_POS, MAX_LEXEME_LEN, MAX_PHRASE_DISTANCE, MAX_POSITIONS};
pub use positions::{normalize_positions, PositionSet};
pub use types::{
    LexemeEntry, Operator, QueryItem, QueryOperand, QueryOperator, TsQuery, TsVector, Weight,
    WeightMarker, WordPos,
};
