//! Typed application configuration built from merged [`Settings`]

use crate::Settings;
use artistats_common::{ArtistatsError, Result};
use std::fmt;
use std::path::PathBuf;
use url::Url;

/// Default Spotify token endpoint
pub const DEFAULT_TOKEN_URL: &str = "https://accounts.spotify.com/api/token";
/// Default Spotify Web API base
pub const DEFAULT_API_BASE_URL: &str = "https://api.spotify.com";
/// Default push relay
pub const DEFAULT_NTFY_BASE_URL: &str = "https://ntfy.sh";
/// Default per-request timeout
pub const DEFAULT_HTTP_TIMEOUT_SECS: u64 = 10;
/// Default completion message
pub const DEFAULT_NOTIFY_MESSAGE: &str = "Your Spotify data analysis is completed.";

/// Main application configuration
#[derive(Debug, Clone, PartialEq)]
pub struct AppConfig {
    /// Spotify credentials and endpoints
    pub spotify: SpotifyConfig,
    /// Search request parameters
    pub search: SearchConfig,
    /// Chart labels and output path
    pub plot: PlotConfig,
    /// Push notification settings
    pub notify: NotifyConfig,
    /// Timeout applied to every HTTP request
    pub http_timeout_secs: u64,
    /// Log level filter
    pub log_level: String,
}

/// Spotify API configuration
#[derive(Clone, PartialEq)]
pub struct SpotifyConfig {
    /// OAuth client id
    pub client_id: String,
    /// OAuth client secret
    pub client_secret: String,
    /// Token endpoint for the client-credentials exchange
    pub token_url: String,
    /// Base URL of the Web API
    pub api_base_url: String,
}

impl fmt::Debug for SpotifyConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SpotifyConfig")
            .field("client_id", &self.client_id)
            .field("client_secret", &"<redacted>")
            .field("token_url", &self.token_url)
            .field("api_base_url", &self.api_base_url)
            .finish()
    }
}

/// Search request configuration
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchConfig {
    /// Search term
    pub query: String,
    /// Result type filter
    pub kind: String,
    /// Page size (1..=50)
    pub limit: u32,
    /// Market / region code
    pub market: String,
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            query: "drake".to_string(),
            kind: "artist".to_string(),
            limit: 10,
            market: "CA".to_string(),
        }
    }
}

/// Chart configuration
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlotConfig {
    /// Horizontal axis label
    pub x_label: String,
    /// Vertical axis label
    pub y_label: String,
    /// Chart title
    pub title: String,
    /// Output image path
    pub save_path: PathBuf,
}

impl Default for PlotConfig {
    fn default() -> Self {
        Self {
            x_label: "Popularity".to_string(),
            y_label: "Name".to_string(),
            title: "Popularity of Artists".to_string(),
            save_path: PathBuf::from("output_plot.png"),
        }
    }
}

/// ntfy notification configuration
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NotifyConfig {
    /// Topic the completion message is published to
    pub topic: String,
    /// Relay base URL
    pub base_url: String,
    /// Message body
    pub message: String,
    /// Whether to send the notification at all
    pub enabled: bool,
}

impl AppConfig {
    /// Build and validate the typed configuration
    pub fn from_settings(settings: &Settings) -> Result<Self> {
        let spotify = SpotifyConfig {
            client_id: settings.require_str("spotify_client_id")?,
            client_secret: settings.require_str("spotify_client_secret")?,
            token_url: validated_url(settings, "token_url", DEFAULT_TOKEN_URL)?,
            api_base_url: validated_url(settings, "api_base_url", DEFAULT_API_BASE_URL)?,
        };

        let defaults = SearchConfig::default();
        let search = SearchConfig {
            query: settings.get_str("search_query").unwrap_or(defaults.query),
            kind: settings.get_str("search_type").unwrap_or(defaults.kind),
            limit: bounded(settings, "search_limit", 1, 50, u64::from(defaults.limit))? as u32,
            market: settings.get_str("search_market").unwrap_or(defaults.market),
        };

        let defaults = PlotConfig::default();
        let plot = PlotConfig {
            x_label: settings.get_str("plot_x_label").unwrap_or(defaults.x_label),
            y_label: settings.get_str("plot_y_label").unwrap_or(defaults.y_label),
            title: settings.get_str("plot_title").unwrap_or(defaults.title),
            save_path: settings
                .get_str("plot_save_path")
                .map(PathBuf::from)
                .unwrap_or(defaults.save_path),
        };

        let notify = NotifyConfig {
            topic: settings.require_str("topicname")?,
            base_url: validated_url(settings, "ntfy_base_url", DEFAULT_NTFY_BASE_URL)?,
            message: settings
                .get_str("notify_message")
                .unwrap_or_else(|| DEFAULT_NOTIFY_MESSAGE.to_string()),
            enabled: match settings.get("notify_enabled") {
                None => true,
                Some(_) => settings.get_bool("notify_enabled").ok_or_else(|| {
                    ArtistatsError::config_parse("notify_enabled must be true or false")
                })?,
            },
        };

        if notify.topic.contains('/') {
            return Err(ArtistatsError::config_parse(
                "topicname must be a single path segment",
            ));
        }

        Ok(Self {
            spotify,
            search,
            plot,
            notify,
            http_timeout_secs: bounded(
                settings,
                "http_timeout_secs",
                1,
                300,
                DEFAULT_HTTP_TIMEOUT_SECS,
            )?,
            log_level: settings
                .get_str("log_level")
                .unwrap_or_else(|| "info".to_string()),
        })
    }
}

/// Optional URL setting, falling back to `default`; must parse as http(s)
fn validated_url(settings: &Settings, key: &str, default: &str) -> Result<String> {
    let value = settings
        .get_str(key)
        .unwrap_or_else(|| default.to_string());
    let parsed = Url::parse(&value).map_err(|e| ArtistatsError::ConfigParse {
        message: format!("{key} must be a valid URL"),
        path: None,
        source: Some(Box::new(e)),
    })?;

    match parsed.scheme() {
        "http" | "https" => Ok(value.trim_end_matches('/').to_string()),
        scheme => Err(ArtistatsError::config_parse(format!(
            "{key} must use http or https, not {scheme}"
        ))),
    }
}

/// Optional integer setting within `min..=max`, falling back to `default`
fn bounded(settings: &Settings, key: &str, min: u64, max: u64, default: u64) -> Result<u64> {
    if !settings.contains(key) {
        return Ok(default);
    }

    settings
        .get_i64(key)
        .and_then(|v| u64::try_from(v).ok())
        .filter(|v| (min..=max).contains(v))
        .ok_or_else(|| {
            ArtistatsError::config_parse(format!("{key} must be an integer between {min} and {max}"))
        })
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_yaml::Value;

    fn required() -> Vec<(&'static str, Value)> {
        vec![
            ("spotify_client_id", Value::from("id")),
            ("spotify_client_secret", Value::from("secret")),
            ("topicname", Value::from("artistats-topic")),
        ]
    }

    fn settings_with(extra: Vec<(&'static str, Value)>) -> Settings {
        required().into_iter().chain(extra).collect()
    }

    #[test]
    fn test_defaults_applied() {
        let config = AppConfig::from_settings(&settings_with(vec![])).unwrap();

        assert_eq!(config.spotify.token_url, DEFAULT_TOKEN_URL);
        assert_eq!(config.spotify.api_base_url, DEFAULT_API_BASE_URL);
        assert_eq!(config.search, SearchConfig::default());
        assert_eq!(config.plot, PlotConfig::default());
        assert_eq!(config.plot.save_path, PathBuf::from("output_plot.png"));
        assert_eq!(config.notify.base_url, DEFAULT_NTFY_BASE_URL);
        assert_eq!(config.notify.message, DEFAULT_NOTIFY_MESSAGE);
        assert!(config.notify.enabled);
        assert_eq!(config.http_timeout_secs, 10);
        assert_eq!(config.log_level, "info");
    }

    #[test]
    fn test_missing_required_keys() {
        for key in ["spotify_client_id", "spotify_client_secret", "topicname"] {
            let settings: Settings = required().into_iter().filter(|(k, _)| *k != key).collect();
            let err = AppConfig::from_settings(&settings).unwrap_err();
            assert!(
                matches!(err, ArtistatsError::MissingKey { key: ref missing } if missing == key),
                "expected MissingKey for {key}, got {err:?}"
            );
        }
    }

    #[test]
    fn test_overrides_read() {
        let config = AppConfig::from_settings(&settings_with(vec![
            ("plot_title", Value::from("Top Artists")),
            ("plot_save_path", Value::from("charts/out.png")),
            ("search_limit", Value::from(25)),
            ("search_market", Value::from("US")),
            ("notify_enabled", Value::from(false)),
            ("ntfy_base_url", Value::from("http://localhost:8080/")),
        ]))
        .unwrap();

        assert_eq!(config.plot.title, "Top Artists");
        assert_eq!(config.plot.save_path, PathBuf::from("charts/out.png"));
        assert_eq!(config.search.limit, 25);
        assert_eq!(config.search.market, "US");
        assert!(!config.notify.enabled);
        assert_eq!(config.notify.base_url, "http://localhost:8080");
    }

    #[test]
    fn test_out_of_range_values_rejected() {
        let err = AppConfig::from_settings(&settings_with(vec![("search_limit", Value::from(0))]))
            .unwrap_err();
        assert!(matches!(err, ArtistatsError::ConfigParse { .. }));

        let err =
            AppConfig::from_settings(&settings_with(vec![("http_timeout_secs", Value::from(-5))]))
                .unwrap_err();
        assert!(matches!(err, ArtistatsError::ConfigParse { .. }));
    }

    #[test]
    fn test_invalid_urls_rejected() {
        let err = AppConfig::from_settings(&settings_with(vec![("token_url", Value::from("not a url"))]))
            .unwrap_err();
        assert!(matches!(err, ArtistatsError::ConfigParse { .. }));

        let err = AppConfig::from_settings(&settings_with(vec![(
            "api_base_url",
            Value::from("ftp://api.spotify.com"),
        )]))
        .unwrap_err();
        assert!(err.to_string().contains("http or https"));
    }

    #[test]
    fn test_topic_must_be_single_segment() {
        let settings: Settings = vec![
            ("spotify_client_id", Value::from("id")),
            ("spotify_client_secret", Value::from("secret")),
            ("topicname", Value::from("a/b")),
        ]
        .into_iter()
        .collect();
        assert!(AppConfig::from_settings(&settings).is_err());
    }

    #[test]
    fn test_debug_redacts_secret() {
        let config = AppConfig::from_settings(&settings_with(vec![])).unwrap();
        let debug = format!("{:?}", config.spotify);
        assert!(debug.contains("<redacted>"));
        assert!(!debug.contains("\"secret\""));
    }
}
