// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Fuzz target for the offset-aware position merge.
//!
//! Checks the merge against set arithmetic on the shifted inputs, for every
//! emit mode and arbitrary offsets. Inputs are normalized first, since the
//! merge requires strictly ascending lists, and kept small enough that
//! shifting never saturates.

#![no_main]

use libfuzzer_sys::fuzz_target;
use std::collections::BTreeSet;
use tsmatch::{merge_positions, normalize_positions, EmitMode};

fuzz_target!(|input: (Vec<u32>, Vec<u32>, u16, u16, u8)| {
    let (left, right, left_offset, right_offset, bits) = input;
    let left = normalize_positions(left.into_iter().map(|p| p >> 8).collect());
    let right = normalize_positions(right.into_iter().map(|p| p >> 8).collect());
    let (left_offset, right_offset) = (u32::from(left_offset), u32::from(right_offset));
    let mode = EmitMode::from_bits_truncate(bits);

    let out = merge_positions(&left, &right, left_offset, right_offset, mode);

    // INVARIANT: output strictly ascending, never longer than both inputs together
    assert!(out.windows(2).all(|w| w[0] < w[1]));
    assert!(out.len() <= left.len() + right.len());

    let ls: BTreeSet<u32> = left.iter().map(|p| p.saturating_add(left_offset)).collect();
    let rs: BTreeSet<u32> = right.iter().map(|p| p.saturating_add(right_offset)).collect();
    let got: BTreeSet<u32> = out.iter().copied().collect();

    // Every mode emits a subset of the union.
    assert!(got.iter().all(|p| ls.contains(p) || rs.contains(p)));

    if mode == EmitMode::MATCHES {
        let both: BTreeSet<u32> = ls.intersection(&rs).copied().collect();
        assert_eq!(got, both);
    }
    if mode.is_all() {
        let union: BTreeSet<u32> = ls.union(&rs).copied().collect();
        assert_eq!(got, union);
    }
    if mode == EmitMode::LEFT_UNMATCHED {
        let only: BTreeSet<u32> = ls.difference(&rs).copied().collect();
        assert_eq!(got, only);
    }
    if mode == EmitMode::RIGHT_UNMATCHED {
        let only: BTreeSet<u32> = rs.difference(&ls).copied().collect();
        assert_eq!(got, only);
    }
});
