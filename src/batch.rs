// SPDX-License-Identifier: MIT
// Copyright (c) 2026 The seqfetch authors

pub mod page;
pub mod retriever;
pub mod source;
