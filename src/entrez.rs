// SPDX-License-Identifier: MIT
// Copyright (c) 2026 The seqfetch authors

pub mod client;
pub mod format;
pub mod search;
pub mod session;
