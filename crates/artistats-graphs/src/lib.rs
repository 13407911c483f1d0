//! Popularity aggregation and chart rendering for artistats

pub mod aggregator;
pub mod chart;
pub mod display;
pub mod types;

pub use aggregator::{AggregateResult, ArtistRecord, PopularityAggregator};
pub use chart::PopularityChart;
pub use display::{detect_display, DesktopDisplay, DisplaySurface, HeadlessDisplay};
pub use types::{ChartLabels, ChartStyle, FontConfig, MarginConfig, RenderedFigure};
