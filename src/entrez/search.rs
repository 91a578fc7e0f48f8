// SPDX-License-Identifier: MIT
// Copyright (c) 2026 The seqfetch authors

use serde::Deserialize;

use crate::entrez::session::RetrievalSession;
use crate::errors::SeqfetchError;

// Default size of the id list returned by esearch (same as the server's).
pub const DEFAULT_RETMAX: usize = 20;

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum IdType {
    // Numeric GI/UID (the server's default).
    Uid,
    // Accession.version
    Accession,
}

#[derive(Debug, Clone)]
pub struct SearchRequest {
    pub db: String,
    pub term: String,
    pub retmax: usize,
    pub use_history: bool,
    pub id_type: IdType,
}

impl SearchRequest {
    pub fn new(db: impl Into<String>, term: impl Into<String>) -> Self {
        SearchRequest {
            db: db.into(),
            term: term.into(),
            retmax: DEFAULT_RETMAX,
            use_history: false,
            id_type: IdType::Uid,
        }
    }

    pub fn retmax(mut self, retmax: usize) -> Self {
        self.retmax = retmax;
        self
    }

    pub fn with_history(mut self) -> Self {
        self.use_history = true;
        self
    }

    pub fn id_type(mut self, id_type: IdType) -> Self {
        self.id_type = id_type;
        self
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchResult {
    // Total number of hits on the server, not the length of id_list.
    pub count: usize,
    pub ret_max: usize,
    pub ret_start: usize,
    pub id_list: Vec<String>,
    // Present only if the search was run with history.
    pub session: Option<RetrievalSession>,
}

impl SearchResult {
    /// Number of records to download when at most `limit` are wanted.
    pub fn records_to_fetch(&self, limit: Option<usize>) -> usize {
        match limit {
            Some(n) => self.count.min(n),
            None => self.count,
        }
    }
}

// Wire shape of esearch's JSON output. Numbers come as strings.

#[derive(Debug, Deserialize)]
struct RawSearchResponse {
    esearchresult: Option<RawSearchResult>,
    error: Option<String>,
}

#[derive(Debug, Deserialize)]
struct RawSearchResult {
    count: Option<String>,
    retmax: Option<String>,
    retstart: Option<String>,
    #[serde(default)]
    idlist: Vec<String>,
    webenv: Option<String>,
    querykey: Option<String>,
    #[serde(rename = "ERROR")]
    error: Option<String>,
}

fn parse_count(field: &str, value: Option<String>) -> Result<usize, SeqfetchError> {
    let value =
        value.ok_or_else(|| SeqfetchError::Format(format!("Missing '{}' in search result", field)))?;
    value.trim().parse::<usize>().map_err(|_| {
        SeqfetchError::Format(format!("Bad '{}' in search result: {:?}", field, value))
    })
}

pub fn parse_search_response(json: &str) -> Result<SearchResult, SeqfetchError> {
    let raw: RawSearchResponse = serde_json::from_str(json)?;
    if let Some(msg) = raw.error {
        return Err(SeqfetchError::Transport(msg));
    }
    let result = raw
        .esearchresult
        .ok_or_else(|| SeqfetchError::Format(String::from("Missing 'esearchresult'")))?;
    if let Some(msg) = result.error {
        return Err(SeqfetchError::Transport(msg));
    }

    let session = match (result.webenv, result.querykey) {
        (Some(web_env), Some(query_key)) => Some(RetrievalSession::new(web_env, query_key)),
        _ => None,
    };

    Ok(SearchResult {
        count: parse_count("count", result.count)?,
        ret_max: parse_count("retmax", result.retmax)?,
        ret_start: parse_count("retstart", result.retstart)?,
        id_list: result.idlist,
        session,
    })
}
