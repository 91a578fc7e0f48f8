// SPDX-License-Identifier: MIT
// Copyright (c) 2025 Thomas Junier
// Modifications (c) 2026 The seqfetch authors

use std::{
    fs,
    path::{Path, PathBuf},
};

use log::debug;
use serde::{Deserialize, Serialize};

use crate::errors::SeqfetchError;

pub const DEFAULT_BASE_URL: &str = "https://eutils.ncbi.nlm.nih.gov/entrez/eutils/";
pub const DEFAULT_TOOL: &str = "seqfetch";
pub const CONFIG_FILENAME: &str = ".seqfetchconfig";

pub const EMAIL_ENV_VAR: &str = "NCBI_EMAIL";
pub const API_KEY_ENV_VAR: &str = "NCBI_API_KEY";

// Credentials and endpoint for E-utilities. NCBI asks every client to identify itself (tool +
// email); an API key raises the allowed request rate. This is passed explicitly to the client
// rather than set once for the whole process.

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct EntrezConfig {
    pub email: Option<String>,
    pub api_key: Option<String>,
    pub tool: String,
    pub base_url: String,
}

impl Default for EntrezConfig {
    fn default() -> Self {
        EntrezConfig {
            email: None,
            api_key: None,
            tool: String::from(DEFAULT_TOOL),
            base_url: String::from(DEFAULT_BASE_URL),
        }
    }
}

// Values given on the command line; any that are Some take precedence over everything else.
#[derive(Debug, Default, Clone)]
pub struct ConfigOverrides {
    pub email: Option<String>,
    pub api_key: Option<String>,
    pub base_url: Option<String>,
}

impl EntrezConfig {
    pub fn from_file(path: &Path) -> Result<Self, SeqfetchError> {
        let text = fs::read_to_string(path)
            .map_err(|e| SeqfetchError::Config(format!("{}: {}", path.display(), e)))?;
        Self::from_json(&text)
            .map_err(|e| SeqfetchError::Config(format!("{}: {}", path.display(), e)))
    }

    pub fn from_json(text: &str) -> Result<Self, SeqfetchError> {
        Ok(serde_json::from_str(text)?)
    }

    /// Replaces email and API key with values from the environment, where those are set and
    /// non-empty.
    pub fn with_env<F>(mut self, lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(email) = lookup(EMAIL_ENV_VAR).filter(|v| !v.is_empty()) {
            self.email = Some(email);
        }
        if let Some(key) = lookup(API_KEY_ENV_VAR).filter(|v| !v.is_empty()) {
            self.api_key = Some(key);
        }
        self
    }

    pub fn with_overrides(mut self, overrides: ConfigOverrides) -> Self {
        if let Some(email) = overrides.email {
            self.email = Some(email);
        }
        if let Some(key) = overrides.api_key {
            self.api_key = Some(key);
        }
        if let Some(url) = overrides.base_url {
            self.base_url = url;
        }
        self
    }

    // Request URLs are built by appending the utility name (e.g. "efetch.fcgi").
    pub fn endpoint(&self, utility: &str) -> String {
        if self.base_url.ends_with('/') {
            format!("{}{}.fcgi", self.base_url, utility)
        } else {
            format!("{}/{}.fcgi", self.base_url, utility)
        }
    }
}

pub fn find_config_file() -> Option<PathBuf> {
    if let Ok(home) = std::env::var("HOME") {
        let path = PathBuf::from(home).join(CONFIG_FILENAME);
        if path.exists() {
            return Some(path);
        }
    }
    if let Ok(cwd) = std::env::current_dir() {
        let path = cwd.join(CONFIG_FILENAME);
        if path.exists() {
            return Some(path);
        }
    }
    None
}

/// Builds the effective configuration: command line > environment > file > defaults. An
/// explicitly named file must exist; the default lookup is silently skipped if nothing is found.
pub fn load_config(
    explicit_path: Option<&Path>,
    overrides: ConfigOverrides,
) -> Result<EntrezConfig, SeqfetchError> {
    let base = match explicit_path {
        Some(path) => EntrezConfig::from_file(path)?,
        None => match find_config_file() {
            Some(path) => {
                debug!("Reading configuration from {}", path.display());
                EntrezConfig::from_file(&path)?
            }
            None => EntrezConfig::default(),
        },
    };
    Ok(base
        .with_env(|name| std::env::var(name).ok())
        .with_overrides(overrides))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let cfg = EntrezConfig::default();
        assert_eq!(cfg.tool, "seqfetch");
        assert_eq!(cfg.email, None);
        assert_eq!(
            cfg.endpoint("esearch"),
            "https://eutils.ncbi.nlm.nih.gov/entrez/eutils/esearch.fcgi"
        );
    }

    #[test]
    fn test_partial_json() {
        let cfg = EntrezConfig::from_json(r#"{ "email": "someone@example.org" }"#)
            .expect("valid config");
        assert_eq!(cfg.email.as_deref(), Some("someone@example.org"));
        assert_eq!(cfg.base_url, DEFAULT_BASE_URL);
    }

    #[test]
    fn test_malformed_json() {
        assert!(EntrezConfig::from_json("{ email: ").is_err());
    }

    #[test]
    fn test_endpoint_without_trailing_slash() {
        let cfg = EntrezConfig {
            base_url: String::from("http://localhost:8080/eutils"),
            ..Default::default()
        };
        assert_eq!(cfg.endpoint("efetch"), "http://localhost:8080/eutils/efetch.fcgi");
    }

    #[test]
    fn test_precedence() {
        let file_cfg = EntrezConfig {
            email: Some(String::from("file@example.org")),
            ..Default::default()
        };
        let cfg = file_cfg
            .with_env(|name| match name {
                EMAIL_ENV_VAR => Some(String::from("env@example.org")),
                API_KEY_ENV_VAR => Some(String::from("envkey")),
                _ => None,
            })
            .with_overrides(ConfigOverrides {
                api_key: Some(String::from("clikey")),
                ..Default::default()
            });
        // Environment wins over the file, CLI wins over both.
        assert_eq!(cfg.email.as_deref(), Some("env@example.org"));
        assert_eq!(cfg.api_key.as_deref(), Some("clikey"));
    }

    #[test]
    fn test_empty_env_ignored() {
        let file_cfg = EntrezConfig {
            email: Some(String::from("file@example.org")),
            ..Default::default()
        };
        let cfg = file_cfg.with_env(|_| Some(String::new()));
        assert_eq!(cfg.email.as_deref(), Some("file@example.org"));
        assert_eq!(cfg.api_key, None);
    }
}
