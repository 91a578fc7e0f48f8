// SPDX-License-Identifier: MIT
// Copyright (c) 2026 The seqfetch authors

use std::fmt;

// Server-side handle on a previous esearch (its "history"). Both values are opaque; they are only
// ever echoed back to the server.

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RetrievalSession {
    web_env: String,
    query_key: String,
}

impl RetrievalSession {
    pub fn new(web_env: impl Into<String>, query_key: impl Into<String>) -> Self {
        RetrievalSession {
            web_env: web_env.into(),
            query_key: query_key.into(),
        }
    }

    pub fn web_env(&self) -> &str {
        &self.web_env
    }

    pub fn query_key(&self) -> &str {
        &self.query_key
    }
}

impl fmt::Display for RetrievalSession {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        // WebEnv strings are long; the head is enough to tell sessions apart in logs.
        let head: String = self.web_env.chars().take(12).collect();
        write!(f, "query #{} @ {}…", self.query_key, head)
    }
}
