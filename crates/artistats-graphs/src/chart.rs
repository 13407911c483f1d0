//! Horizontal popularity bar chart

use crate::aggregator::AggregateResult;
use crate::display::DisplaySurface;
use crate::types::{ChartLabels, ChartStyle, RenderedFigure};
use artistats_common::{ArtistatsError, Result};
use plotters::prelude::*;
use std::path::Path;
use tracing::{debug, info, instrument, warn};

/// Renders one bar per artist, first record at the top
#[derive(Debug, Clone, Default)]
pub struct PopularityChart {
    style: ChartStyle,
}

impl PopularityChart {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_style(style: ChartStyle) -> Self {
        Self { style }
    }

    pub fn style(&self) -> &ChartStyle {
        &self.style
    }

    /// Draw `aggregate` to a PNG at `path`, then offer it to `surface`.
    ///
    /// Drawing and writing failures are [`ArtistatsError::Render`]. A display
    /// failure is only logged; the figure on disk is still returned.
    #[instrument(skip(self, aggregate, labels, surface), fields(path = %path.display()))]
    pub fn render(
        &self,
        aggregate: &AggregateResult,
        labels: &ChartLabels,
        path: &Path,
        surface: &dyn DisplaySurface,
    ) -> Result<RenderedFigure> {
        if aggregate.is_empty() {
            return Err(ArtistatsError::render("No records to chart"));
        }
        ensure_parent_exists(path)?;

        let (width, height) = self.style.dimensions(aggregate.len());
        self.draw(aggregate, labels, path, (width, height))?;
        info!(
            "Rendered popularity chart with {} bars to {}",
            aggregate.len(),
            path.display()
        );

        let surface_name = surface.name();
        let displayed = if surface.is_available() {
            match surface.show(path) {
                Ok(()) => true,
                Err(e) => {
                    warn!(error = %e, surface = surface_name, "Could not display chart");
                    false
                }
            }
        } else {
            debug!(surface = surface_name, "No display available, chart saved only");
            false
        };

        Ok(RenderedFigure {
            path: path.to_path_buf(),
            width,
            height,
            bar_count: aggregate.len(),
            labels: labels.clone(),
            displayed,
        })
    }

    fn draw(
        &self,
        aggregate: &AggregateResult,
        labels: &ChartLabels,
        path: &Path,
        size: (u32, u32),
    ) -> Result<()> {
        let records = aggregate.records();
        let last_row = (records.len() - 1) as u32;
        let x_max = x_axis_max(aggregate.max_popularity());
        let style = &self.style;

        let root = BitMapBackend::new(path, size).into_drawing_area();
        root.fill(&style.background)?;

        let title_font = (style.title_font.family.as_str(), style.title_font.size);
        let label_font = (style.label_font.family.as_str(), style.label_font.size);

        let mut chart = ChartBuilder::on(&root)
            .caption(&labels.title, title_font)
            .margin(style.margins.top)
            .margin_right(style.margins.right)
            .x_label_area_size(style.margins.bottom)
            .y_label_area_size(style.margins.left)
            .build_cartesian_2d(0u32..x_max, (0u32..last_row).into_segmented())?;

        // Row 0 sits at the bottom, so the first record maps to the last row.
        let row_label = |value: &SegmentValue<u32>| match value {
            SegmentValue::CenterOf(row) | SegmentValue::Exact(row) => records
                .get((last_row - (*row).min(last_row)) as usize)
                .map(|record| truncate_name(&record.name, style.max_name_len))
                .unwrap_or_default(),
            SegmentValue::Last => String::new(),
        };

        chart
            .configure_mesh()
            .disable_y_mesh()
            .x_desc(labels.x_label.as_str())
            .y_desc(labels.y_label.as_str())
            .y_labels(records.len())
            .y_label_formatter(&row_label)
            .label_style(label_font)
            .axis_desc_style(label_font)
            .draw()?;

        chart.draw_series(
            Histogram::horizontal(&chart)
                .style(style.bar_color.filled())
                .margin(6)
                .data(
                    records
                        .iter()
                        .enumerate()
                        .map(|(i, record)| (last_row - i as u32, record.popularity)),
                ),
        )?;

        if style.show_values {
            let value_font = label_font.into_font().color(&BLACK);
            chart.draw_series(records.iter().enumerate().map(|(i, record)| {
                Text::new(
                    record.popularity.to_string(),
                    (
                        record.popularity.saturating_add(1),
                        SegmentValue::CenterOf(last_row - i as u32),
                    ),
                    value_font.clone(),
                )
            }))?;
        }

        root.present()?;
        Ok(())
    }
}

/// Popularity axis upper bound with some headroom for value labels
fn x_axis_max(max_popularity: u32) -> u32 {
    max_popularity
        .saturating_add(max_popularity / 10)
        .saturating_add(5)
        .max(10)
}

/// Shorten `name` to at most `max_len` characters, ending in "..."
fn truncate_name(name: &str, max_len: usize) -> String {
    if name.chars().count() <= max_len {
        return name.to_string();
    }
    let kept: String = name.chars().take(max_len.saturating_sub(3)).collect();
    format!("{kept}...")
}

fn ensure_parent_exists(path: &Path) -> Result<()> {
    match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() && !parent.is_dir() => {
            Err(ArtistatsError::render(format!(
                "Output directory does not exist: {}",
                parent.display()
            )))
        }
        _ => Ok(()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::aggregator::ArtistRecord;
    use crate::display::HeadlessDisplay;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use tempfile::tempdir;

    fn three_artists() -> AggregateResult {
        AggregateResult::from_records(vec![
            ArtistRecord::new("Artist1", 80),
            ArtistRecord::new("Artist2", 75),
            ArtistRecord::new("Artist3", 90),
        ])
        .unwrap()
    }

    struct CountingDisplay {
        shown: AtomicUsize,
        fail: bool,
    }

    impl DisplaySurface for CountingDisplay {
        fn name(&self) -> &'static str {
            "counting"
        }

        fn is_available(&self) -> bool {
            true
        }

        fn show(&self, _path: &Path) -> Result<()> {
            self.shown.fetch_add(1, Ordering::SeqCst);
            if self.fail {
                Err(ArtistatsError::render("viewer crashed"))
            } else {
                Ok(())
            }
        }
    }

    #[test]
    fn test_truncate_name() {
        assert_eq!(truncate_name("Drake", 20), "Drake");
        assert_eq!(truncate_name("A Very Long Artist Name Indeed", 10), "A Very ...");
        assert_eq!(truncate_name("Beyoncé Knowles", 10), "Beyoncé...");
    }

    #[test]
    fn test_x_axis_max() {
        assert_eq!(x_axis_max(0), 10);
        assert_eq!(x_axis_max(90), 104);
        assert_eq!(x_axis_max(100), 115);
        assert_eq!(x_axis_max(u32::MAX), u32::MAX);
    }

    #[test]
    fn test_extreme_popularity_renders() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("extreme.png");
        let aggregate = AggregateResult::from_records(vec![
            ArtistRecord::new("Loud", u32::MAX),
            ArtistRecord::new("Quiet", 1),
        ])
        .unwrap();

        let figure = PopularityChart::new()
            .render(&aggregate, &ChartLabels::default(), &path, &HeadlessDisplay)
            .unwrap();
        assert_eq!(figure.bar_count, 2);
        assert!(path.exists());
    }

    #[test]
    fn test_render_writes_png() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("output_plot.png");

        let figure = PopularityChart::new()
            .render(&three_artists(), &ChartLabels::default(), &path, &HeadlessDisplay)
            .unwrap();

        assert!(path.exists());
        assert_eq!(figure.bar_count, 3);
        assert_eq!((figure.width, figure.height), (800, 400));
        assert!(!figure.displayed);
        assert_eq!(figure.labels, ChartLabels::default());
    }

    #[test]
    fn test_single_record_renders() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("one.png");
        let aggregate = AggregateResult::from_records(vec![ArtistRecord::new("Solo", 0)]).unwrap();

        let figure = PopularityChart::new()
            .render(&aggregate, &ChartLabels::default(), &path, &HeadlessDisplay)
            .unwrap();
        assert_eq!(figure.bar_count, 1);
        assert!(path.exists());
    }

    #[test]
    fn test_missing_directory_is_render_error() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("missing").join("chart.png");

        let err = PopularityChart::new()
            .render(&three_artists(), &ChartLabels::default(), &path, &HeadlessDisplay)
            .unwrap_err();
        assert!(matches!(err, ArtistatsError::Render { .. }));
    }

    #[test]
    fn test_display_is_offered_the_chart() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("shown.png");
        let display = CountingDisplay {
            shown: AtomicUsize::new(0),
            fail: false,
        };

        let figure = PopularityChart::new()
            .render(&three_artists(), &ChartLabels::default(), &path, &display)
            .unwrap();
        assert!(figure.displayed);
        assert_eq!(display.shown.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn test_display_failure_keeps_figure() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("failed_view.png");
        let display = CountingDisplay {
            shown: AtomicUsize::new(0),
            fail: true,
        };

        let figure = PopularityChart::new()
            .render(&three_artists(), &ChartLabels::default(), &path, &display)
            .unwrap();
        assert!(!figure.displayed);
        assert!(path.exists());
    }
}
