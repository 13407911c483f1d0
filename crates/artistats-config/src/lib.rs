//! # Artistats Config
//!
//! Loads the system and user YAML documents, merges them into flat
//! [`Settings`], and exposes a validated [`AppConfig`] view.

#![warn(clippy::all)]
#![allow(clippy::module_name_repetitions)]

pub mod app_config;
pub mod loader;
pub mod settings;

pub use app_config::{AppConfig, NotifyConfig, PlotConfig, SearchConfig, SpotifyConfig};
pub use loader::{ConfigLoader, SYSTEM_CONFIG_PATH, USER_CONFIG_PATH};
pub use settings::Settings;
