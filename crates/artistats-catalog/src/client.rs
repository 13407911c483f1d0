//! Spotify Web API client
//!
//! Performs the client-credentials exchange and a single authenticated
//! search request. There is no retry, no token cache and no refresh: every
//! call is one attempt bounded by the configured timeout.

use crate::models::{BearerToken, CatalogResult, SearchQuery, TokenResponse};
use artistats_common::{describe_reqwest_error, ArtistatsError, Result};
use reqwest::Client;
use std::fmt;
use std::time::Duration;
use tracing::{debug, error, info, instrument};

/// Configuration for the catalog client
#[derive(Clone)]
pub struct CatalogConfig {
    /// OAuth client id
    pub client_id: String,
    /// OAuth client secret
    pub client_secret: String,
    /// Token endpoint (e.g., "https://accounts.spotify.com/api/token")
    pub token_url: String,
    /// Web API base (e.g., "https://api.spotify.com")
    pub api_base_url: String,
    /// Request timeout in seconds (default: 10)
    pub timeout_secs: u64,
}

impl fmt::Debug for CatalogConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CatalogConfig")
            .field("client_id", &self.client_id)
            .field("client_secret", &"<redacted>")
            .field("token_url", &self.token_url)
            .field("api_base_url", &self.api_base_url)
            .field("timeout_secs", &self.timeout_secs)
            .finish()
    }
}

impl CatalogConfig {
    /// Create a configuration against the public Spotify endpoints
    pub fn new(client_id: impl Into<String>, client_secret: impl Into<String>) -> Self {
        Self {
            client_id: client_id.into(),
            client_secret: client_secret.into(),
            token_url: "https://accounts.spotify.com/api/token".to_string(),
            api_base_url: "https://api.spotify.com".to_string(),
            timeout_secs: 10,
        }
    }

    /// Point the token exchange at a different endpoint
    pub fn with_token_url(mut self, token_url: impl Into<String>) -> Self {
        self.token_url = token_url.into();
        self
    }

    /// Point searches at a different API base
    pub fn with_api_base_url(mut self, api_base_url: impl Into<String>) -> Self {
        self.api_base_url = api_base_url.into();
        self
    }

    /// Set the request timeout
    pub fn with_timeout(mut self, timeout_secs: u64) -> Self {
        self.timeout_secs = timeout_secs;
        self
    }
}

/// Spotify Web API client
#[derive(Debug, Clone)]
pub struct CatalogClient {
    client: Client,
    config: CatalogConfig,
}

impl CatalogClient {
    /// Create a new client with the given configuration
    pub fn new(config: CatalogConfig) -> Result<Self> {
        if config.timeout_secs == 0 {
            return Err(ArtistatsError::config_parse(
                "HTTP timeout must be greater than 0",
            ));
        }

        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .map_err(|e| ArtistatsError::ConfigParse {
                message: "Failed to create HTTP client".to_string(),
                path: None,
                source: Some(Box::new(e)),
            })?;

        Ok(Self { client, config })
    }

    /// Client configuration
    pub fn config(&self) -> &CatalogConfig {
        &self.config
    }

    fn search_url(&self) -> String {
        format!("{}/v1/search", self.config.api_base_url.trim_end_matches('/'))
    }

    /// Trade the client id/secret for a bearer token
    ///
    /// One form-encoded POST using the client-credentials grant. Any
    /// non-success status, unreadable body, or body without a non-empty
    /// `access_token` fails with [`ArtistatsError::Auth`].
    #[instrument(skip(self), fields(token_url = %self.config.token_url))]
    pub async fn exchange_token(&self) -> Result<BearerToken> {
        debug!("Requesting client-credentials token");

        let form = [
            ("grant_type", "client_credentials"),
            ("client_id", self.config.client_id.as_str()),
            ("client_secret", self.config.client_secret.as_str()),
        ];

        let response = self
            .client
            .post(&self.config.token_url)
            .form(&form)
            .send()
            .await
            .map_err(|e| {
                error!("Token request failed: {}", e);
                ArtistatsError::auth_with_source(
                    format!("Token request failed: {}", describe_reqwest_error(&e)),
                    e,
                )
            })?;

        let status = response.status();
        if !status.is_success() {
            error!("Token endpoint returned {}", status);
            return Err(ArtistatsError::auth_with_status(
                format!("Token endpoint returned {status}"),
                status.as_u16(),
            ));
        }

        let body = response
            .text()
            .await
            .map_err(|e| ArtistatsError::auth_with_source("Failed to read token response", e))?;

        let token: TokenResponse = serde_json::from_str(&body)
            .map_err(|e| ArtistatsError::auth_with_source("Token response is not valid JSON", e))?;

        match token.access_token {
            Some(access_token) if !access_token.is_empty() => {
                info!(
                    expires_in = ?token.expires_in,
                    "Obtained bearer token"
                );
                Ok(BearerToken::new(access_token))
            }
            _ => {
                error!("Token response has no access_token field");
                Err(ArtistatsError::auth("Token response has no access_token field"))
            }
        }
    }

    /// Run one authenticated search and return the raw response
    ///
    /// Failures are logged with their cause and then propagated as
    /// [`ArtistatsError::Fetch`].
    #[instrument(skip(self, token), fields(term = %query.term, kind = %query.kind))]
    pub async fn search(&self, token: &BearerToken, query: &SearchQuery) -> Result<CatalogResult> {
        let url = self.search_url();
        debug!("Making request to: {}", url);

        let result = self.send_search(&url, token, query).await;
        if let Err(e) = &result {
            error!(error = %e, "Error loading data from Spotify");
            error!("Please check your Spotify API credentials and network connection.");
        }
        result
    }

    async fn send_search(
        &self,
        url: &str,
        token: &BearerToken,
        query: &SearchQuery,
    ) -> Result<CatalogResult> {
        let response = self
            .client
            .get(url)
            .query(&query.to_params())
            .bearer_auth(token.secret())
            .send()
            .await
            .map_err(|e| {
                ArtistatsError::fetch_with_source(
                    format!("Search request failed: {}", describe_reqwest_error(&e)),
                    e,
                )
            })?;

        let status = response.status();
        if !status.is_success() {
            return Err(ArtistatsError::fetch_with_status(
                format!("Search endpoint returned {status}"),
                status.as_u16(),
            ));
        }

        let body = response
            .text()
            .await
            .map_err(|e| ArtistatsError::fetch_with_source("Failed to read search response", e))?;

        let value: serde_json::Value = serde_json::from_str(&body)
            .map_err(|e| ArtistatsError::fetch_with_source("Search response is not valid JSON", e))?;

        info!("Data has been loaded");
        Ok(CatalogResult::new(value))
    }
}
