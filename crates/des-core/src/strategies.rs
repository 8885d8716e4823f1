// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Reusable `proptest` strategies for the primitives this crate defines,
//! exported behind `test-support` so downstream crates' property tests can
//! generate the same shapes of id/string data this crate's own tests do.

use proptest::prelude::*;

/// ASCII identifier-ish strings, short enough to exercise `short()`/`IdBuf`
/// truncation behavior from both sides (shorter than and longer than a
/// requested length).
pub fn arb_short_string() -> impl Strategy<Value = String> {
    "[a-zA-Z0-9_-]{0,40}"
}
