//! Error types and utilities for artistats

use thiserror::Error;

/// Result type alias for artistats operations
pub type Result<T> = std::result::Result<T, ArtistatsError>;

/// Main error type for artistats operations
///
/// Each variant maps to one stage of the analysis run. Configuration,
/// authentication and fetch failures are fatal to a run; notification
/// failures are reported but never abort a finished analysis.
#[derive(Error, Debug)]
pub enum ArtistatsError {
    /// A configuration source could not be read
    #[error("Configuration not found: {path}")]
    ConfigNotFound {
        path: String,
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    /// A configuration source is not a well-formed key/value document
    #[error("Configuration parse error: {message}")]
    ConfigParse {
        message: String,
        path: Option<String>,
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    /// A required configuration key is absent or has the wrong type
    #[error("Missing required configuration key: {key}")]
    MissingKey { key: String },

    /// Client-credentials exchange failed
    #[error("Auth error: {message}")]
    Auth {
        message: String,
        status_code: Option<u16>,
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    /// Catalog search request failed
    #[error("Fetch error: {message}")]
    Fetch {
        message: String,
        status_code: Option<u16>,
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    /// Catalog response lacks the expected nested fields
    #[error("Malformed response: {message}")]
    MalformedResponse {
        message: String,
        field: Option<String>,
    },

    /// Statistics were requested over an empty record sequence
    #[error("Empty result: {message}")]
    EmptyResult { message: String },

    /// Chart rendering or writing failed
    #[error("Render error: {message}")]
    Render {
        message: String,
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    /// Push notification delivery failed
    #[error("Notify error: {message}")]
    Notify {
        message: String,
        status_code: Option<u16>,
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },
}

impl ArtistatsError {
    /// Create a new config-not-found error
    pub fn config_not_found(path: impl Into<String>) -> Self {
        Self::ConfigNotFound {
            path: path.into(),
            source: None,
        }
    }

    /// Create a new config-not-found error with source
    pub fn config_not_found_with_source(
        path: impl Into<String>,
        source: impl std::error::Error + Send + Sync + 'static,
    ) -> Self {
        Self::ConfigNotFound {
            path: path.into(),
            source: Some(Box::new(source)),
        }
    }

    /// Create a new configuration parse error
    pub fn config_parse(msg: impl Into<String>) -> Self {
        Self::ConfigParse {
            message: msg.into(),
            path: None,
            source: None,
        }
    }

    /// Create a new configuration parse error for a given source path
    pub fn config_parse_at(
        msg: impl Into<String>,
        path: impl Into<String>,
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    ) -> Self {
        Self::ConfigParse {
            message: msg.into(),
            path: Some(path.into()),
            source,
        }
    }

    /// Create a new missing-key error
    pub fn missing_key(key: impl Into<String>) -> Self {
        Self::MissingKey { key: key.into() }
    }

    /// Create a new auth error
    pub fn auth(msg: impl Into<String>) -> Self {
        Self::Auth {
            message: msg.into(),
            status_code: None,
            source: None,
        }
    }

    /// Create a new auth error with status code
    pub fn auth_with_status(msg: impl Into<String>, status: u16) -> Self {
        Self::Auth {
            message: msg.into(),
            status_code: Some(status),
            source: None,
        }
    }

    /// Create a new auth error with source
    pub fn auth_with_source(
        msg: impl Into<String>,
        source: impl std::error::Error + Send + Sync + 'static,
    ) -> Self {
        Self::Auth {
            message: msg.into(),
            status_code: None,
            source: Some(Box::new(source)),
        }
    }

    /// Create a new fetch error with status code
    pub fn fetch_with_status(msg: impl Into<String>, status: u16) -> Self {
        Self::Fetch {
            message: msg.into(),
            status_code: Some(status),
            source: None,
        }
    }

    /// Create a new fetch error with source
    pub fn fetch_with_source(
        msg: impl Into<String>,
        source: impl std::error::Error + Send + Sync + 'static,
    ) -> Self {
        Self::Fetch {
            message: msg.into(),
            status_code: None,
            source: Some(Box::new(source)),
        }
    }

    /// Create a new malformed-response error naming the offending field
    pub fn malformed(msg: impl Into<String>, field: impl Into<String>) -> Self {
        Self::MalformedResponse {
            message: msg.into(),
            field: Some(field.into()),
        }
    }

    /// Create a new empty-result error
    pub fn empty_result(msg: impl Into<String>) -> Self {
        Self::EmptyResult {
            message: msg.into(),
        }
    }

    /// Create a new render error
    pub fn render(msg: impl Into<String>) -> Self {
        Self::Render {
            message: msg.into(),
            source: None,
        }
    }

    /// Create a new render error with source
    pub fn render_with_source(
        msg: impl Into<String>,
        source: impl std::error::Error + Send + Sync + 'static,
    ) -> Self {
        Self::Render {
            message: msg.into(),
            source: Some(Box::new(source)),
        }
    }

    /// Create a new notify error with status code
    pub fn notify_with_status(msg: impl Into<String>, status: u16) -> Self {
        Self::Notify {
            message: msg.into(),
            status_code: Some(status),
            source: None,
        }
    }

    /// Create a new notify error with source
    pub fn notify_with_source(
        msg: impl Into<String>,
        source: impl std::error::Error + Send + Sync + 'static,
    ) -> Self {
        Self::Notify {
            message: msg.into(),
            status_code: None,
            source: Some(Box::new(source)),
        }
    }

    /// HTTP status code attached to the error, if any
    pub fn status_code(&self) -> Option<u16> {
        match self {
            Self::Auth { status_code, .. }
            | Self::Fetch { status_code, .. }
            | Self::Notify { status_code, .. } => *status_code,
            _ => None,
        }
    }

    /// Whether this error must abort an analysis run
    pub fn is_fatal(&self) -> bool {
        !matches!(self, Self::Notify { .. })
    }
}

/// Convert from serde_yaml::Error to ArtistatsError
impl From<serde_yaml::Error> for ArtistatsError {
    fn from(err: serde_yaml::Error) -> Self {
        Self::ConfigParse {
            message: format!("YAML parsing error: {err}"),
            path: None,
            source: Some(Box::new(err)),
        }
    }
}

/// Describe a reqwest failure the same way for every endpoint
pub fn describe_reqwest_error(err: &reqwest::Error) -> String {
    if err.is_timeout() {
        "Request timeout".to_string()
    } else if err.is_connect() {
        "Connection failed".to_string()
    } else if let Some(status) = err.status() {
        format!("HTTP error: {}", status.as_u16())
    } else {
        "Network request failed".to_string()
    }
}

#[cfg(feature = "plotters")]
/// Convert from plotters drawing errors to ArtistatsError
impl<T> From<plotters::drawing::DrawingAreaErrorKind<T>> for ArtistatsError
where
    T: std::error::Error + Send + Sync + 'static,
{
    fn from(err: plotters::drawing::DrawingAreaErrorKind<T>) -> Self {
        Self::render_with_source("Chart rendering failed", err)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::{error::Error, io};

    #[test]
    fn test_error_display_formatting() {
        let err = ArtistatsError::config_not_found("configuration/system_config.yml");
        assert_eq!(
            err.to_string(),
            "Configuration not found: configuration/system_config.yml"
        );

        let err = ArtistatsError::auth_with_status("token endpoint rejected credentials", 401);
        assert_eq!(err.to_string(), "Auth error: token endpoint rejected credentials");
        assert_eq!(err.status_code(), Some(401));

        let err = ArtistatsError::missing_key("spotify_client_id");
        assert_eq!(
            err.to_string(),
            "Missing required configuration key: spotify_client_id"
        );

        let err = ArtistatsError::empty_result("no artists returned");
        assert_eq!(err.to_string(), "Empty result: no artists returned");
    }

    #[test]
    fn test_error_with_source() {
        let io_error = io::Error::new(io::ErrorKind::NotFound, "No such file");
        let err = ArtistatsError::config_not_found_with_source("missing.yml", io_error);

        assert!(err.source().is_some());
        assert!(err.to_string().contains("missing.yml"));

        let err = ArtistatsError::render_with_source(
            "Failed to write chart",
            io::Error::new(io::ErrorKind::PermissionDenied, "Access denied"),
        );
        assert!(err.source().is_some());
    }

    #[test]
    fn test_yaml_error_conversion() {
        let yaml_error = serde_yaml::from_str::<serde_yaml::Value>("key: [unclosed").unwrap_err();
        let err: ArtistatsError = yaml_error.into();

        assert!(matches!(err, ArtistatsError::ConfigParse { .. }));
        assert!(err.to_string().contains("YAML parsing error"));
    }

    #[test]
    fn test_malformed_names_field() {
        let err = ArtistatsError::malformed("field is absent", "artists.items");
        match err {
            ArtistatsError::MalformedResponse { field, .. } => {
                assert_eq!(field.as_deref(), Some("artists.items"));
            }
            other => panic!("Expected MalformedResponse, got {other:?}"),
        }
    }

    #[test]
    fn test_only_notify_is_non_fatal() {
        assert!(!ArtistatsError::notify_with_status("relay down", 503).is_fatal());
        assert!(ArtistatsError::fetch_with_status("server error", 500).is_fatal());
        assert!(ArtistatsError::auth("no token").is_fatal());
        assert!(ArtistatsError::render("disk full").is_fatal());
    }

    #[test]
    fn test_error_chain_preservation() {
        let root = io::Error::new(io::ErrorKind::ConnectionRefused, "Root cause");
        let err = ArtistatsError::notify_with_source("Relay unreachable", root);

        let mut current: &dyn Error = &err;
        let mut depth = 0;
        while let Some(source) = current.source() {
            current = source;
            depth += 1;
        }
        assert_eq!(depth, 1);
    }
}
