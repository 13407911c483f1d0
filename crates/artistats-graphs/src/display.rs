//! Interactive display of rendered charts

use artistats_common::{ArtistatsError, Result};
use std::path::Path;
use tracing::debug;
use url::Url;

/// Somewhere a rendered chart can be shown to a person
pub trait DisplaySurface: Send + Sync {
    /// Short name used in log lines
    fn name(&self) -> &'static str;

    /// Whether showing an image can work in this environment
    fn is_available(&self) -> bool;

    /// Show the image at `path`
    fn show(&self, path: &Path) -> Result<()>;
}

/// Surface for environments without a display; never shows anything
#[derive(Debug, Clone, Copy, Default)]
pub struct HeadlessDisplay;

impl DisplaySurface for HeadlessDisplay {
    fn name(&self) -> &'static str {
        "headless"
    }

    fn is_available(&self) -> bool {
        false
    }

    fn show(&self, _path: &Path) -> Result<()> {
        Ok(())
    }
}

/// Opens the image with the desktop's default viewer
#[derive(Debug, Clone, Copy, Default)]
pub struct DesktopDisplay;

impl DisplaySurface for DesktopDisplay {
    fn name(&self) -> &'static str {
        "desktop"
    }

    fn is_available(&self) -> bool {
        has_graphical_session()
    }

    fn show(&self, path: &Path) -> Result<()> {
        let absolute = path
            .canonicalize()
            .map_err(|e| ArtistatsError::render_with_source("Chart image is not readable", e))?;
        let url = Url::from_file_path(&absolute).map_err(|()| {
            ArtistatsError::render(format!("Cannot build a file URL for {}", absolute.display()))
        })?;

        debug!("Opening {} in the default viewer", url);
        webbrowser::open(url.as_str())
            .map_err(|e| ArtistatsError::render_with_source("Failed to open chart viewer", e))
    }
}

#[cfg(any(target_os = "macos", target_os = "windows"))]
fn has_graphical_session() -> bool {
    true
}

#[cfg(not(any(target_os = "macos", target_os = "windows")))]
fn has_graphical_session() -> bool {
    ["DISPLAY", "WAYLAND_DISPLAY"]
        .iter()
        .any(|var| std::env::var(var).map(|v| !v.is_empty()).unwrap_or(false))
}

/// Pick the desktop viewer when a graphical session exists, headless otherwise
pub fn detect_display() -> Box<dyn DisplaySurface> {
    if has_graphical_session() {
        Box::new(DesktopDisplay)
    } else {
        Box::new(HeadlessDisplay)
    }
}
