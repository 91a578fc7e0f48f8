// SPDX-License-Identifier: MIT
// Copyright (c) 2026 The seqfetch authors

use crate::batch::page::Page;
use crate::entrez::{format::RecordFormat, session::RetrievalSession};
use crate::errors::SeqfetchError;

/// Anything that can return the raw records of one page of a search session.
///
/// Implementations must return the records of `page` in the order of the search's id list. They
/// are not expected to retry: any error aborts the whole retrieval.
pub trait RecordSource {
    fn fetch(
        &mut self,
        session: &RetrievalSession,
        page: Page,
        format: RecordFormat,
    ) -> Result<Vec<u8>, SeqfetchError>;
}
