// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Term lookup in the sorted document vector.
//!
//! Exact and prefix lookups share one binary search for the first entry
//! `>= target`. Because entries are sorted by lexeme, every entry starting
//! with `target` sits in one contiguous run from that point on.

use crate::positions::normalize_positions;
use crate::types::{LexemeEntry, QueryOperand, TsVector};

/// The run of entries an operand matches: zero or one for an exact operand,
/// any number for a prefix operand.
pub(crate) fn matching_entries<'v>(vector: &'v TsVector, operand: &QueryOperand) -> &'v [LexemeEntry] {
    let entries = vector.entries();
    let target = operand.lexeme.as_str();

    // Binary search: find first entry where lexeme >= target
    let start = entries.partition_point(|e| e.lexeme.as_str() < target);
    let rest = &entries[start..];

    let run = if operand.is_prefix() {
        rest.iter()
            .take_while(|e| e.lexeme.starts_with(target))
            .count()
    } else {
        usize::from(rest.first().is_some_and(|e| e.lexeme == target))
    };

    &rest[..run]
}

/// Whether any entry matches the operand.
pub(crate) fn contains(vector: &TsVector, operand: &QueryOperand) -> bool {
    !matching_entries(vector, operand).is_empty()
}

/// Every position of every matching entry, normalized.
pub(crate) fn positions(vector: &TsVector, operand: &QueryOperand) -> Vec<u32> {
    let collected: Vec<u32> = matching_entries(vector, operand)
        .iter()
        .flat_map(|e| e.positions.iter().map(|p| u32::from(p.position)))
        .collect();
    normalize_positions(collected)
}
