// SPDX-License-Identifier: MIT
// Copyright (c) 2025 Thomas Junier
// Modifications (c) 2026 The seqfetch authors

use std::path::PathBuf;

use seqfetch::{
    batch::{page::Page, source::RecordSource},
    entrez::{format::RecordFormat, session::RetrievalSession},
    errors::SeqfetchError,
};

// In-memory stand-in for efetch: record i of the "search" is a small FastA entry.
#[allow(dead_code)]
pub struct ScriptedSource {
    pub calls: usize,
    pub fail_on_call: Option<usize>,
}

#[allow(dead_code)]
impl ScriptedSource {
    pub fn new() -> Self {
        ScriptedSource {
            calls: 0,
            fail_on_call: None,
        }
    }

    pub fn failing_on_call(n: usize) -> Self {
        ScriptedSource {
            calls: 0,
            fail_on_call: Some(n),
        }
    }
}

#[allow(dead_code)]
pub fn fasta_record(i: usize) -> String {
    format!(">NM_{:06}.1 Homo sapiens BRCA1 variant {}\nATGGATTTATCTGCTCTTCGCGTTGAAGAAG\n", i, i)
}

#[allow(dead_code)]
pub fn fasta_records(range: std::ops::Range<usize>) -> String {
    range.map(fasta_record).collect()
}

impl RecordSource for ScriptedSource {
    fn fetch(
        &mut self,
        _session: &RetrievalSession,
        page: Page,
        _format: RecordFormat,
    ) -> Result<Vec<u8>, SeqfetchError> {
        self.calls += 1;
        if self.fail_on_call == Some(self.calls) {
            return Err(SeqfetchError::Transport(format!(
                "efetch: HTTP 500 on records {} to {}",
                page.start + 1,
                page.end
            )));
        }
        Ok(fasta_records(page.start..page.end).into_bytes())
    }
}

#[allow(dead_code)]
pub fn session() -> RetrievalSession {
    RetrievalSession::new("MCID_65f0c1a2b3c4d5e6f7a8b9c0", "1")
}

// Per-process, per-test scratch file.
#[allow(dead_code)]
pub fn scratch_path(name: &str) -> PathBuf {
    let mut path = std::env::temp_dir();
    path.push(format!("seqfetch-test-{}-{}", std::process::id(), name));
    path
}
