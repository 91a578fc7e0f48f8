// SPDX-License-Identifier: MIT
// Copyright (c) 2025 Thomas Junier
// Modifications (c) 2026 The seqfetch authors

use seqfetch::errors::SeqfetchError;

fn main() -> Result<(), SeqfetchError> {
    seqfetch::run()
}
