// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! The verification layer: runtime contracts for the data the merge relies on.
//!
//! The followed-by merge walks two position lists in a single forward pass.
//! That is only correct if both lists are sorted and unique, and a silent
//! violation gives wrong answers instead of a crash. The contracts here panic
//! in debug builds the moment a list breaks the rules, and compile to nothing
//! in release.

pub mod contracts;
