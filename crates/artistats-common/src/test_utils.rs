//! Test utilities and shared fixtures for the artistats workspace.
//!
//! Enabled for unit tests of this crate and, through the `testing` feature,
//! for the integration tests of the other crates.

use serde_json::{json, Value};
use std::path::Path;
use std::sync::Once;
use tracing_subscriber::{fmt, EnvFilter};

static INIT: Once = Once::new();

/// Initialize logging for tests with a sensible default configuration.
/// Safe to call multiple times; only the first call installs a subscriber.
pub fn init_test_logging() {
    INIT.call_once(|| {
        let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("debug"));
        let _ = fmt().with_test_writer().with_env_filter(filter).try_init();
    });
}

/// Create a temporary directory for tests that automatically cleans up.
#[cfg(feature = "tempfile")]
pub fn create_temp_dir() -> tempfile::TempDir {
    tempfile::tempdir().expect("Failed to create temporary directory")
}

/// Write `contents` to `dir/name` and return the full path.
pub fn write_file(dir: &Path, name: &str, contents: &str) -> std::path::PathBuf {
    let path = dir.join(name);
    std::fs::write(&path, contents).expect("Failed to write test file");
    path
}

/// Assert that two floating point numbers are approximately equal within a tolerance.
pub fn assert_approx_eq(left: f64, right: f64, tolerance: f64) {
    let diff = (left - right).abs();
    assert!(
        diff <= tolerance,
        "assertion failed: `{left}` is not approximately equal to `{right}` (tolerance: {tolerance}, diff: {diff})"
    );
}

/// Catalog response fixtures shaped like the Spotify search endpoint.
pub mod catalog_fixtures {
    use super::*;

    /// Build a search response from `(name, popularity)` pairs.
    pub fn search_response(artists: &[(&str, u32)]) -> Value {
        let items: Vec<Value> = artists
            .iter()
            .enumerate()
            .map(|(i, (name, popularity))| {
                json!({
                    "id": format!("artist{i}"),
                    "name": name,
                    "popularity": popularity,
                    "type": "artist",
                    "genres": [],
                })
            })
            .collect();

        json!({
            "artists": {
                "href": "https://api.spotify.com/v1/search?query=drake&type=artist&offset=0&limit=10",
                "limit": 10,
                "offset": 0,
                "total": items.len(),
                "items": items,
            }
        })
    }

    /// The three-artist response used throughout the test suite.
    pub fn three_artists() -> Value {
        search_response(&[("Artist1", 80), ("Artist2", 75), ("Artist3", 90)])
    }

    /// A successful token endpoint body.
    pub fn token_response(token: &str) -> Value {
        json!({
            "access_token": token,
            "token_type": "Bearer",
            "expires_in": 3600,
        })
    }
}

/// Configuration document fixtures.
pub mod config_fixtures {
    /// System-level document with exchange credentials.
    pub const SYSTEM_CONFIG: &str = "spotify_client_id: test-client-id\nspotify_client_secret: test-client-secret\nhttp_timeout_secs: 10\n";

    /// User-level document with the notification topic.
    pub const USER_CONFIG: &str = "topicname: artistats-test-topic\nplot_title: Popularity of Artists\n";
}
