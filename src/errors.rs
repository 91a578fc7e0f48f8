// SPDX-License-Identifier: MIT
// Copyright (c) 2025 Thomas Junier
// Modifications (c) 2026 The seqfetch authors

use std::{fmt, io};

#[derive(Debug)]
pub enum SeqfetchError {
    // Rejected before any request is sent.
    InvalidArgument(String),
    // Remote fetch failed: network, HTTP status, bad session.
    Transport(String),
    // Output sink could not be opened, written or flushed.
    Sink(io::Error),
    Config(String),
    // Unexpected shape of a server response.
    Format(String),
    Io(io::Error),
}

impl SeqfetchError {
    pub fn is_transport(&self) -> bool {
        matches!(self, SeqfetchError::Transport(_))
    }

    pub fn is_sink(&self) -> bool {
        matches!(self, SeqfetchError::Sink(_))
    }
}

// These allow conversion to SeqfetchError, required for main() to return Result<()> and for '?'
// to work. Note that plain I/O errors are _not_ sink errors: the retriever wraps its writes
// explicitly.

impl From<io::Error> for SeqfetchError {
    fn from(e: io::Error) -> Self {
        SeqfetchError::Io(e)
    }
}

impl From<reqwest::Error> for SeqfetchError {
    fn from(e: reqwest::Error) -> Self {
        SeqfetchError::Transport(e.to_string())
    }
}

impl From<serde_json::Error> for SeqfetchError {
    fn from(e: serde_json::Error) -> Self {
        SeqfetchError::Format(e.to_string())
    }
}

impl fmt::Display for SeqfetchError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SeqfetchError::InvalidArgument(msg) => write!(f, "Invalid argument: {}", msg),
            SeqfetchError::Transport(msg) => write!(f, "Transport error: {}", msg),
            SeqfetchError::Sink(e) => write!(f, "Output error: {}", e),
            SeqfetchError::Config(msg) => write!(f, "Configuration error: {}", msg),
            SeqfetchError::Format(msg) => write!(f, "Format error: {}", msg),
            SeqfetchError::Io(e) => write!(f, "I/O error: {}", e),
        }
    }
}

impl std::error::Error for SeqfetchError {}
