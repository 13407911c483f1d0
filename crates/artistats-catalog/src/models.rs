//! Catalog request and response models

use serde::{Deserialize, Serialize};
use std::fmt;

/// Short-lived OAuth bearer token.
///
/// Not persisted and never refreshed; one token serves one run. The value is
/// kept out of `Debug` output.
#[derive(Clone, PartialEq, Eq)]
pub struct BearerToken(String);

impl BearerToken {
    /// Wrap a raw access token
    pub fn new(value: impl Into<String>) -> Self {
        Self(value.into())
    }

    /// The raw token for the `Authorization` header
    pub fn secret(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for BearerToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("BearerToken").field(&"<redacted>").finish()
    }
}

/// Body returned by the token endpoint
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct TokenResponse {
    /// The bearer token; absent on some error bodies
    pub access_token: Option<String>,
    /// Usually "Bearer"
    pub token_type: Option<String>,
    /// Lifetime in seconds
    pub expires_in: Option<u64>,
}

/// Parameters of one search request
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchQuery {
    /// Search term
    pub term: String,
    /// Result type filter (`artist`, `track`, ...)
    pub kind: String,
    /// Page size
    pub limit: u32,
    /// Market / region code
    pub market: String,
}

impl Default for SearchQuery {
    fn default() -> Self {
        Self {
            term: "drake".to_string(),
            kind: "artist".to_string(),
            limit: 10,
            market: "CA".to_string(),
        }
    }
}

impl SearchQuery {
    /// Query string pairs in the order the endpoint documents them
    pub fn to_params(&self) -> Vec<(&'static str, String)> {
        vec![
            ("query", self.term.clone()),
            ("type", self.kind.clone()),
            ("limit", self.limit.to_string()),
            ("market", self.market.clone()),
        ]
    }
}

/// Raw search response, handed to the aggregator without interpretation
#[derive(Debug, Clone, PartialEq)]
pub struct CatalogResult(serde_json::Value);

impl CatalogResult {
    /// Wrap a parsed JSON body
    pub fn new(value: serde_json::Value) -> Self {
        Self(value)
    }

    /// Borrow the raw JSON
    pub fn as_json(&self) -> &serde_json::Value {
        &self.0
    }

    /// Take the raw JSON
    pub fn into_json(self) -> serde_json::Value {
        self.0
    }
}

impl From<serde_json::Value> for CatalogResult {
    fn from(value: serde_json::Value) -> Self {
        Self(value)
    }
}
