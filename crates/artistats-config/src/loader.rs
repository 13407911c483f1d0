//! Configuration loading utilities

use crate::Settings;
use artistats_common::{ArtistatsError, Result};
use serde_yaml::Value;
use std::env;
use std::path::{Path, PathBuf};
use tracing::{debug, info};

/// System-level configuration document, read first
pub const SYSTEM_CONFIG_PATH: &str = "configuration/system_config.yml";

/// User-level configuration document, read last so its keys win
pub const USER_CONFIG_PATH: &str = "configuration/user_config.yml";

/// Environment variables that override merged settings, as (variable, key)
pub const ENV_OVERRIDES: &[(&str, &str)] = &[
    ("SPOTIFY_CLIENT_ID", "spotify_client_id"),
    ("SPOTIFY_CLIENT_SECRET", "spotify_client_secret"),
    ("NTFY_TOPIC", "topicname"),
    ("ARTISTATS_LOG_LEVEL", "log_level"),
];

/// Loads and merges an ordered list of YAML key/value documents.
///
/// Documents are merged left to right; a key in a later document replaces
/// the same key from an earlier one.
#[derive(Debug, Clone)]
pub struct ConfigLoader {
    sources: Vec<PathBuf>,
    env_overrides: bool,
}

impl Default for ConfigLoader {
    fn default() -> Self {
        Self::new([SYSTEM_CONFIG_PATH, USER_CONFIG_PATH])
    }
}

impl ConfigLoader {
    /// Create a loader over the given sources, merged in order
    pub fn new<I, P>(sources: I) -> Self
    where
        I: IntoIterator<Item = P>,
        P: Into<PathBuf>,
    {
        Self {
            sources: sources.into_iter().map(Into::into).collect(),
            env_overrides: false,
        }
    }

    /// Apply [`ENV_OVERRIDES`] after all documents are merged
    pub fn with_env_overrides(mut self, enabled: bool) -> Self {
        self.env_overrides = enabled;
        self
    }

    /// Configured sources in merge order
    pub fn sources(&self) -> &[PathBuf] {
        &self.sources
    }

    /// Read every source and merge them into one [`Settings`]
    pub fn load(&self) -> Result<Settings> {
        let mut settings = Settings::new();

        for path in &self.sources {
            let document = Self::read_document(path)?;
            let count = document.len();
            for (key, value) in document {
                settings.insert(key, value);
            }
            debug!("Merged {} keys from {}", count, path.display());
        }

        if self.env_overrides {
            Self::apply_env_overrides(&mut settings);
        }

        info!(
            "Loaded configuration from {} sources ({} keys)",
            self.sources.len(),
            settings.len()
        );
        Ok(settings)
    }

    /// Read one source as a flat list of (key, value) pairs
    fn read_document(path: &Path) -> Result<Vec<(String, Value)>> {
        let display = path.display().to_string();
        let content = std::fs::read_to_string(path)
            .map_err(|e| ArtistatsError::config_not_found_with_source(&display, e))?;

        let root: Value = serde_yaml::from_str(&content).map_err(|e| {
            ArtistatsError::config_parse_at(
                format!("{display} is not valid YAML"),
                &display,
                Some(Box::new(e)),
            )
        })?;

        let mapping = match root {
            Value::Null => return Ok(Vec::new()),
            Value::Mapping(mapping) => mapping,
            _ => {
                return Err(ArtistatsError::config_parse_at(
                    format!("{display} is not a key/value document"),
                    &display,
                    None,
                ))
            }
        };

        mapping
            .into_iter()
            .map(|(key, value)| match key {
                Value::String(key) => Ok((key, value)),
                other => Err(ArtistatsError::config_parse_at(
                    format!("{display} has a non-string key: {other:?}"),
                    &display,
                    None,
                )),
            })
            .collect()
    }

    fn apply_env_overrides(settings: &mut Settings) {
        for (var, key) in ENV_OVERRIDES {
            if let Ok(value) = env::var(var) {
                debug!("Overriding '{}' from {}", key, var);
                settings.insert(*key, Value::String(value));
            }
        }
    }
}
