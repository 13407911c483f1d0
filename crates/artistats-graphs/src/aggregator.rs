//! Popularity aggregation over catalog search results

use artistats_catalog::CatalogResult;
use artistats_common::{ArtistatsError, Result};
use serde::Serialize;
use serde_json::Value;
use tracing::{debug, info, instrument};

/// Highest popularity score the catalog reports
pub const MAX_POPULARITY: u64 = 100;

/// One artist projected out of the search response
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ArtistRecord {
    pub name: String,
    pub popularity: u32,
}

impl ArtistRecord {
    pub fn new(name: impl Into<String>, popularity: u32) -> Self {
        Self {
            name: name.into(),
            popularity,
        }
    }
}

/// Ordered artist records with their mean and truncated median popularity.
///
/// Never empty: construction fails with [`ArtistatsError::EmptyResult`]
/// instead of producing NaN statistics.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AggregateResult {
    records: Vec<ArtistRecord>,
    mean: f64,
    median: i64,
}

impl AggregateResult {
    /// Compute statistics over `records`, keeping their order
    pub fn from_records(records: Vec<ArtistRecord>) -> Result<Self> {
        let values: Vec<u32> = records.iter().map(|r| r.popularity).collect();
        let mean = mean(&values)?;
        let median = truncated_median(&values)?;
        Ok(Self {
            records,
            mean,
            median,
        })
    }

    /// Records in catalog order
    pub fn records(&self) -> &[ArtistRecord] {
        &self.records
    }

    /// Arithmetic mean popularity
    pub fn mean(&self) -> f64 {
        self.mean
    }

    /// Median popularity truncated toward zero
    pub fn median(&self) -> i64 {
        self.median
    }

    /// Number of records (always at least one)
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Always false; kept for the `len`/`is_empty` pairing
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Highest popularity among the records
    pub fn max_popularity(&self) -> u32 {
        self.records.iter().map(|r| r.popularity).max().unwrap_or(0)
    }
}

/// Arithmetic mean of `values`
pub fn mean(values: &[u32]) -> Result<f64> {
    if values.is_empty() {
        return Err(ArtistatsError::empty_result(
            "cannot compute mean of an empty sequence",
        ));
    }
    let sum: u64 = values.iter().map(|&v| u64::from(v)).sum();
    Ok(sum as f64 / values.len() as f64)
}

/// Statistical median of `values`; even counts average the two middle values
pub fn median(values: &[u32]) -> Result<f64> {
    if values.is_empty() {
        return Err(ArtistatsError::empty_result(
            "cannot compute median of an empty sequence",
        ));
    }
    let mut sorted = values.to_vec();
    sorted.sort_unstable();

    let mid = sorted.len() / 2;
    if sorted.len() % 2 == 0 {
        Ok((f64::from(sorted[mid - 1]) + f64::from(sorted[mid])) / 2.0)
    } else {
        Ok(f64::from(sorted[mid]))
    }
}

/// Median truncated toward zero, so 77.5 becomes 77 rather than 78
pub fn truncated_median(values: &[u32]) -> Result<i64> {
    Ok(median(values)?.trunc() as i64)
}

/// Projects catalog results into [`AggregateResult`]s
#[derive(Debug, Clone)]
pub struct PopularityAggregator {
    /// Emit one line per record plus a summary line
    pub emit_diagnostics: bool,
}

impl Default for PopularityAggregator {
    fn default() -> Self {
        Self {
            emit_diagnostics: true,
        }
    }
}

impl PopularityAggregator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Aggregator that stays silent
    pub fn quiet() -> Self {
        Self {
            emit_diagnostics: false,
        }
    }

    /// Extract records from `result` and compute their statistics
    #[instrument(skip_all)]
    pub fn aggregate(&self, result: &CatalogResult) -> Result<AggregateResult> {
        let records = extract_records(result)?;
        debug!("Extracted {} artist records", records.len());

        if records.is_empty() {
            return Err(ArtistatsError::empty_result(
                "catalog returned no artists",
            ));
        }

        if self.emit_diagnostics {
            for record in &records {
                info!("Name: {}, Popularity: {}", record.name, record.popularity);
            }
        }

        let aggregate = AggregateResult::from_records(records)?;

        if self.emit_diagnostics {
            info!("Mean Popularity: {}", aggregate.mean());
            info!("Median Popularity: {}", aggregate.median());
        }

        Ok(aggregate)
    }
}

/// Schema-checked projection of `artists.items[]` into records
pub fn extract_records(result: &CatalogResult) -> Result<Vec<ArtistRecord>> {
    let artists = result
        .as_json()
        .get("artists")
        .ok_or_else(|| ArtistatsError::malformed("response has no artists object", "artists"))?;

    let items = artists
        .get("items")
        .ok_or_else(|| ArtistatsError::malformed("artists has no items", "artists.items"))?
        .as_array()
        .ok_or_else(|| ArtistatsError::malformed("items is not an array", "artists.items"))?;

    items
        .iter()
        .enumerate()
        .map(|(i, item)| project_item(i, item))
        .collect()
}

fn project_item(index: usize, item: &Value) -> Result<ArtistRecord> {
    let name = item.get("name").and_then(Value::as_str).ok_or_else(|| {
        ArtistatsError::malformed(
            "artist entry has no string name",
            format!("artists.items[{index}].name"),
        )
    })?;

    let popularity = item
        .get("popularity")
        .and_then(Value::as_u64)
        .filter(|p| *p <= MAX_POPULARITY)
        .ok_or_else(|| {
            ArtistatsError::malformed(
                format!("artist entry has no popularity between 0 and {MAX_POPULARITY}"),
                format!("artists.items[{index}].popularity"),
            )
        })?;

    Ok(ArtistRecord::new(name, popularity as u32))
}
