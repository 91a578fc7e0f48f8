// SPDX-License-Identifier: MIT
// Copyright (c) 2026 The seqfetch authors

use log::debug;
use reqwest::blocking::Client;

use crate::batch::{page::Page, source::RecordSource};
use crate::config::EntrezConfig;
use crate::entrez::{
    format::RecordFormat,
    search::{parse_search_response, IdType, SearchRequest, SearchResult},
    session::RetrievalSession,
};
use crate::errors::SeqfetchError;

type Params = Vec<(&'static str, String)>;

// Parameters sent with every request: who is calling, and the API key if there is one.
fn identity_params(config: &EntrezConfig) -> Params {
    let mut params: Params = vec![("tool", config.tool.clone())];
    if let Some(email) = &config.email {
        params.push(("email", email.clone()));
    }
    if let Some(key) = &config.api_key {
        params.push(("api_key", key.clone()));
    }
    params
}

fn push_id_type(params: &mut Params, id_type: IdType) {
    if id_type == IdType::Accession {
        params.push(("idtype", String::from("acc")));
    }
}

fn push_format(params: &mut Params, format: RecordFormat) {
    params.push(("rettype", String::from(format.rettype())));
    params.push(("retmode", String::from(format.retmode())));
}

pub fn einfo_params(config: &EntrezConfig, db: Option<&str>) -> Params {
    let mut params = identity_params(config);
    params.push(("retmode", String::from("json")));
    if let Some(db) = db {
        params.push(("db", String::from(db)));
    }
    params
}

pub fn esearch_params(config: &EntrezConfig, request: &SearchRequest) -> Params {
    let mut params = identity_params(config);
    params.push(("db", request.db.clone()));
    params.push(("term", request.term.clone()));
    params.push(("retmax", request.retmax.to_string()));
    params.push(("retmode", String::from("json")));
    if request.use_history {
        params.push(("usehistory", String::from("y")));
    }
    push_id_type(&mut params, request.id_type);
    params
}

pub fn efetch_ids_params(
    config: &EntrezConfig,
    db: &str,
    ids: &[String],
    format: RecordFormat,
) -> Params {
    let mut params = identity_params(config);
    params.push(("db", String::from(db)));
    params.push(("id", ids.join(",")));
    push_format(&mut params, format);
    params
}

/// Parameters of one page of a history-based efetch. `retmax` is the page's length, so the last
/// page never asks for more than what remains.
pub fn efetch_page_params(
    config: &EntrezConfig,
    db: &str,
    session: &RetrievalSession,
    page: Page,
    format: RecordFormat,
    id_type: IdType,
) -> Params {
    let mut params = identity_params(config);
    params.push(("db", String::from(db)));
    params.push(("WebEnv", String::from(session.web_env())));
    params.push(("query_key", String::from(session.query_key())));
    params.push(("retstart", page.start.to_string()));
    params.push(("retmax", page.len().to_string()));
    push_format(&mut params, format);
    push_id_type(&mut params, id_type);
    params
}

pub struct EntrezClient {
    http: Client,
    config: EntrezConfig,
}

impl EntrezClient {
    pub fn new(config: EntrezConfig) -> Result<Self, SeqfetchError> {
        let http = Client::builder()
            .user_agent(format!("{}/{}", config.tool, env!("CARGO_PKG_VERSION")))
            .build()?;
        Ok(EntrezClient { http, config })
    }

    /// Lists the available databases, or describes `db`. Returns the server's JSON as is.
    pub fn einfo(&self, db: Option<&str>) -> Result<String, SeqfetchError> {
        let body = self.get("einfo", &einfo_params(&self.config, db))?;
        String::from_utf8(body).map_err(|e| SeqfetchError::Format(e.to_string()))
    }

    pub fn esearch(&self, request: &SearchRequest) -> Result<SearchResult, SeqfetchError> {
        let body = self.get("esearch", &esearch_params(&self.config, request))?;
        let text = String::from_utf8(body).map_err(|e| SeqfetchError::Format(e.to_string()))?;
        parse_search_response(&text)
    }

    /// Fetches records by id. A single id is just a one-element list.
    pub fn efetch_ids(
        &self,
        db: &str,
        ids: &[String],
        format: RecordFormat,
    ) -> Result<Vec<u8>, SeqfetchError> {
        if ids.is_empty() {
            return Err(SeqfetchError::InvalidArgument(String::from(
                "no record ids to fetch",
            )));
        }
        // Long id lists would overflow a GET URL; efetch accepts the same parameters as a form.
        let params = efetch_ids_params(&self.config, db, ids, format);
        let url = self.config.endpoint("efetch");
        debug!("POST {} ({} ids)", url, ids.len());
        let response = self.http.post(&url).form(&params).send()?;
        read_body("efetch", response)
    }

    /// Adapts the client to a RecordSource for history-based fetches from `db`.
    pub fn pager<'a>(&'a self, db: &'a str, id_type: IdType) -> EntrezPager<'a> {
        EntrezPager {
            client: self,
            db,
            id_type,
        }
    }

    fn get(&self, utility: &str, params: &Params) -> Result<Vec<u8>, SeqfetchError> {
        let url = self.config.endpoint(utility);
        debug!("GET {}", url);
        let response = self.http.get(&url).query(params).send()?;
        read_body(utility, response)
    }
}

fn read_body(
    utility: &str,
    response: reqwest::blocking::Response,
) -> Result<Vec<u8>, SeqfetchError> {
    let status = response.status();
    if !status.is_success() {
        let body = response.text().unwrap_or_default();
        let snippet: String = body.chars().take(200).collect();
        return Err(SeqfetchError::Transport(format!(
            "{}: HTTP {}: {}",
            utility,
            status,
            snippet.trim()
        )));
    }
    Ok(response.bytes()?.to_vec())
}

pub struct EntrezPager<'a> {
    client: &'a EntrezClient,
    db: &'a str,
    id_type: IdType,
}

impl RecordSource for EntrezPager<'_> {
    fn fetch(
        &mut self,
        session: &RetrievalSession,
        page: Page,
        format: RecordFormat,
    ) -> Result<Vec<u8>, SeqfetchError> {
        let params = efetch_page_params(
            &self.client.config,
            self.db,
            session,
            page,
            format,
            self.id_type,
        );
        self.client.get("efetch", &params)
    }
}
