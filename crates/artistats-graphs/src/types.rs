//! Chart labels, styling and render output

use plotters::style::RGBColor;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Axis labels and title of the popularity chart
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChartLabels {
    pub x_label: String,
    pub y_label: String,
    pub title: String,
}

impl Default for ChartLabels {
    fn default() -> Self {
        Self {
            x_label: "Popularity".to_string(),
            y_label: "Name".to_string(),
            title: "Popularity of Artists".to_string(),
        }
    }
}

impl ChartLabels {
    pub fn new(
        x_label: impl Into<String>,
        y_label: impl Into<String>,
        title: impl Into<String>,
    ) -> Self {
        Self {
            x_label: x_label.into(),
            y_label: y_label.into(),
            title: title.into(),
        }
    }
}

/// Font configuration
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FontConfig {
    pub family: String,
    pub size: u32,
}

impl FontConfig {
    pub fn new(family: impl Into<String>, size: u32) -> Self {
        Self {
            family: family.into(),
            size,
        }
    }
}

/// Margin configuration in pixels
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MarginConfig {
    pub top: u32,
    pub right: u32,
    pub bottom: u32,
    pub left: u32,
}

impl Default for MarginConfig {
    fn default() -> Self {
        Self {
            top: 20,
            right: 50,
            bottom: 60,
            left: 150,
        }
    }
}

/// Visual styling of the horizontal bar chart
#[derive(Debug, Clone, PartialEq)]
pub struct ChartStyle {
    /// Image width in pixels
    pub width: u32,
    /// Minimum image height in pixels
    pub min_height: u32,
    /// Pixels added to the height per bar
    pub row_height: u32,
    pub bar_color: RGBColor,
    pub background: RGBColor,
    pub title_font: FontConfig,
    pub label_font: FontConfig,
    pub margins: MarginConfig,
    /// Names longer than this are shortened with an ellipsis
    pub max_name_len: usize,
    /// Print the popularity value at the end of each bar
    pub show_values: bool,
}

impl Default for ChartStyle {
    fn default() -> Self {
        Self {
            width: 800,
            min_height: 400,
            row_height: 40,
            bar_color: RGBColor(135, 206, 235),
            background: RGBColor(255, 255, 255),
            title_font: FontConfig::new("sans-serif", 24),
            label_font: FontConfig::new("sans-serif", 14),
            margins: MarginConfig::default(),
            max_name_len: 20,
            show_values: true,
        }
    }
}

impl ChartStyle {
    /// Image size for a chart with `bars` bars
    pub fn dimensions(&self, bars: usize) -> (u32, u32) {
        let rows = u32::try_from(bars).unwrap_or(u32::MAX);
        let height = self
            .row_height
            .saturating_mul(rows)
            .saturating_add(self.margins.top + self.margins.bottom);
        (self.width, height.max(self.min_height))
    }
}

/// A chart written to disk
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderedFigure {
    /// Where the image was written
    pub path: PathBuf,
    pub width: u32,
    pub height: u32,
    /// One bar per aggregated record
    pub bar_count: usize,
    pub labels: ChartLabels,
    /// Whether a display surface showed the image
    pub displayed: bool,
}
