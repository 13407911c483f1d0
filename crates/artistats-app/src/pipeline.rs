//! End-to-end analysis run: exchange, search, aggregate, render, notify

use crate::notifier::Notifier;
use artistats_catalog::{CatalogClient, CatalogConfig, SearchQuery};
use artistats_common::Result;
use artistats_config::AppConfig;
use artistats_graphs::{
    detect_display, AggregateResult, ChartLabels, DisplaySurface, PopularityAggregator,
    PopularityChart, RenderedFigure,
};
use std::path::PathBuf;
use tracing::{info, instrument, warn};

/// Outcome of one successful run
#[derive(Debug, Clone)]
pub struct PipelineReport {
    pub aggregate: AggregateResult,
    pub figure: RenderedFigure,
    /// Whether the completion notification was delivered
    pub notified: bool,
}

impl PipelineReport {
    /// Headline number of the run
    pub fn median(&self) -> i64 {
        self.aggregate.median()
    }

    pub fn mean(&self) -> f64 {
        self.aggregate.mean()
    }
}

/// Runs the stages strictly in order; the first fatal error stops the run
pub struct Pipeline {
    catalog: CatalogClient,
    query: SearchQuery,
    aggregator: PopularityAggregator,
    chart: PopularityChart,
    labels: ChartLabels,
    output: PathBuf,
    display: Box<dyn DisplaySurface>,
    notifier: Option<Notifier>,
    message: String,
}

impl std::fmt::Debug for Pipeline {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Pipeline")
            .field("catalog", &self.catalog)
            .field("query", &self.query)
            .field("labels", &self.labels)
            .field("output", &self.output)
            .field("display", &self.display.name())
            .field("notifier", &self.notifier)
            .finish()
    }
}

impl Pipeline {
    /// Build every stage from `config`
    pub fn new(config: &AppConfig) -> Result<Self> {
        let catalog = CatalogClient::new(
            CatalogConfig::new(&config.spotify.client_id, &config.spotify.client_secret)
                .with_token_url(&config.spotify.token_url)
                .with_api_base_url(&config.spotify.api_base_url)
                .with_timeout(config.http_timeout_secs),
        )?;

        let notifier = if config.notify.enabled {
            Some(Notifier::from_config(&config.notify, config.http_timeout_secs)?)
        } else {
            None
        };

        Ok(Self {
            catalog,
            query: SearchQuery {
                term: config.search.query.clone(),
                kind: config.search.kind.clone(),
                limit: config.search.limit,
                market: config.search.market.clone(),
            },
            aggregator: PopularityAggregator::new(),
            chart: PopularityChart::new(),
            labels: ChartLabels::new(
                &config.plot.x_label,
                &config.plot.y_label,
                &config.plot.title,
            ),
            output: config.plot.save_path.clone(),
            display: detect_display(),
            notifier,
            message: config.notify.message.clone(),
        })
    }

    /// Write the chart somewhere other than the configured path
    pub fn with_output(mut self, output: impl Into<PathBuf>) -> Self {
        self.output = output.into();
        self
    }

    pub fn with_display(mut self, display: Box<dyn DisplaySurface>) -> Self {
        self.display = display;
        self
    }

    /// Skip the completion notification
    pub fn without_notification(mut self) -> Self {
        self.notifier = None;
        self
    }

    pub fn output(&self) -> &PathBuf {
        &self.output
    }

    /// Execute one analysis run
    #[instrument(skip(self), fields(term = %self.query.term))]
    pub async fn run(&self) -> Result<PipelineReport> {
        info!("Starting popularity analysis");

        let token = self.catalog.exchange_token().await?;
        let result = self.catalog.search(&token, &self.query).await?;
        let aggregate = self.aggregator.aggregate(&result)?;
        let figure =
            self.chart
                .render(&aggregate, &self.labels, &self.output, self.display.as_ref())?;

        let notified = match &self.notifier {
            Some(notifier) => match notifier.notify(&self.message).await {
                Ok(()) => true,
                Err(e) => {
                    warn!(error = %e, "Failed to send completion notification");
                    false
                }
            },
            None => false,
        };

        info!(
            median = aggregate.median(),
            notified, "Analysis complete, chart saved to {}",
            figure.path.display()
        );

        Ok(PipelineReport {
            aggregate,
            figure,
            notified,
        })
    }
}
