// SPDX-License-Identifier: MIT
// Copyright (c) 2026 The seqfetch authors

use std::{
    fs::File,
    io::{BufWriter, Write},
    path::Path,
};

use log::{debug, info};

use crate::batch::{
    page::{Page, Pages},
    source::RecordSource,
};
use crate::entrez::{format::RecordFormat, session::RetrievalSession};
use crate::errors::SeqfetchError;

/// Records per request used by the CLI when none is given.
pub const DEFAULT_PAGE_SIZE: usize = 500;

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct RetrievalSummary {
    pub pages: usize,
    // Records requested, which is not necessarily what the server sent back.
    pub records: usize,
    pub bytes: u64,
}

/// Downloads all records of a search session, one page per request, appending each page's
/// payload to a sink in page order.
#[derive(Debug, Clone)]
pub struct BatchRetriever {
    page_size: usize,
    format: RecordFormat,
}

impl BatchRetriever {
    pub fn new(page_size: usize, format: RecordFormat) -> Result<Self, SeqfetchError> {
        // Fails on a zero page size.
        Pages::new(0, page_size)?;
        Ok(BatchRetriever { page_size, format })
    }

    pub fn plan(&self, count: usize) -> Result<Pages, SeqfetchError> {
        Pages::new(count, self.page_size)
    }

    /// Fetches `[0, count)` page by page into `sink`. Stops at the first error; whatever was
    /// appended before it stays in the sink.
    pub fn retrieve<S, W>(
        &self,
        source: &mut S,
        session: &RetrievalSession,
        count: usize,
        sink: &mut W,
    ) -> Result<RetrievalSummary, SeqfetchError>
    where
        S: RecordSource + ?Sized,
        W: Write + ?Sized,
    {
        let pages = self.plan(count)?;
        debug!(
            "Retrieving {} records in {} page(s) of {} ({}), {}",
            count,
            pages.len(),
            self.page_size,
            self.format,
            session
        );
        let mut summary = RetrievalSummary::default();
        for page in pages {
            let payload = self.fetch_page(source, session, page)?;
            sink.write_all(&payload).map_err(SeqfetchError::Sink)?;
            summary.pages += 1;
            summary.records += page.len();
            summary.bytes += payload.len() as u64;
        }
        Ok(summary)
    }

    /// Same as retrieve(), into a file that is created (or truncated) first. The file is flushed
    /// and closed on every exit path; on error it holds the pages written before the failure.
    pub fn retrieve_to_path<S, P>(
        &self,
        source: &mut S,
        session: &RetrievalSession,
        count: usize,
        path: P,
    ) -> Result<RetrievalSummary, SeqfetchError>
    where
        S: RecordSource + ?Sized,
        P: AsRef<Path>,
    {
        let file = File::create(path.as_ref()).map_err(SeqfetchError::Sink)?;
        let mut writer = BufWriter::new(file);
        let outcome = self.retrieve(source, session, count, &mut writer);
        let flushed = writer.flush().map_err(SeqfetchError::Sink);
        // An error from the loop takes precedence over a flush error.
        let summary = outcome?;
        flushed?;
        info!(
            "Wrote {} bytes ({} records) to {}",
            summary.bytes,
            summary.records,
            path.as_ref().display()
        );
        Ok(summary)
    }

    fn fetch_page<S>(
        &self,
        source: &mut S,
        session: &RetrievalSession,
        page: Page,
    ) -> Result<Vec<u8>, SeqfetchError>
    where
        S: RecordSource + ?Sized,
    {
        info!("Going to download record {} to {}", page.start + 1, page.end);
        source.fetch(session, page, self.format)
    }
}
