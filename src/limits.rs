// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Domain limits shared by vector construction and query evaluation.
//!
//! These mirror PostgreSQL's `tsvector` storage bounds. They are the only
//! place the numbers appear; everything else refers to them by name.
//!
//! | Constant              | Value  | Enforced by                                     |
//! |-----------------------|--------|-------------------------------------------------|
//! | `MAX_POSITIONS`       | 256    | `normalize_positions` (leaves), `TsVector::new` |
//! | `MAX_ENTRY_POS`       | 16383  | `TsVector::new` (clamps)                        |
//! | `MAX_LEXEME_LEN`      | 2047   | `TsVector::new` (rejects)                       |
//! | `MAX_PHRASE_DISTANCE` | 16384  | `TsQuery::followed_by` (clamps)                 |

/// Maximum number of positions kept per lexeme and per leaf lookup.
///
/// Longer lists are truncated after sorting, never rejected.
pub const MAX_POSITIONS: usize = 256;

/// Largest storable occurrence position (14 bits).
///
/// Positions beyond this are clamped to it when a vector is built.
pub const MAX_ENTRY_POS: u16 = (1 << 14) - 1;

/// Longest lexeme accepted into a vector, in bytes.
pub const MAX_LEXEME_LEN: usize = (1 << 11) - 1;

/// Largest distance a followed-by operator may carry.
pub const MAX_PHRASE_DISTANCE: u16 = 1 << 14;

const _: () = {
    // Positions must fit in the bits left over by the 2-bit weight.
    assert!(MAX_ENTRY_POS < (1 << 14));
    assert!(MAX_POSITIONS <= u16::MAX as usize);
};
