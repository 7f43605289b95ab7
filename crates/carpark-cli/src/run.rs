//! One collection run: fetch, extract, enrich, persist.
//!
//! The fetch happens before anything is written, so a network failure leaves
//! every output file as it was.

use std::path::PathBuf;

use anyhow::Context;
use chrono::{DateTime, Utc};

use carpark_core::{enrich, AppConfig, CarparkNames};
use carpark_scraper::{extract_with_source, AvailabilityClient, ExtractionSource};
use carpark_store::{archive_raw_response, ensure_data_dir, load_capacity, persist, PersistSummary};

#[derive(Debug)]
pub(crate) struct RunSummary {
    pub source: ExtractionSource,
    pub extracted: usize,
    pub persisted: PersistSummary,
    pub raw_path: PathBuf,
}

/// Run a single collection at `now`.
///
/// `now` stamps every record and drives the request's cache-busting
/// parameter.
///
/// # Errors
///
/// Returns an error if the fetch fails (nothing is written in that case) or
/// any local file cannot be read or written.
pub(crate) async fn run_collect(
    config: &AppConfig,
    names: &CarparkNames,
    now: DateTime<Utc>,
) -> anyhow::Result<RunSummary> {
    let client = AvailabilityClient::from_config(config)
        .context("failed to build availability client")?;

    let response = client
        .fetch(&config.endpoint, &config.carpark_ids, &config.category, now)
        .await
        .context("failed to fetch carpark availability")?;

    ensure_data_dir(&config.data_dir)?;
    let raw_path = archive_raw_response(&config.data_dir, &response.body, now)?;

    let extraction = extract_with_source(&response.body, &response.content_type, names);
    tracing::info!(
        source = %extraction.source,
        rows = extraction.records.len(),
        content_type = %response.content_type,
        "extracted availability rows"
    );

    let capacity = load_capacity(&config.capacity_path())?;
    if capacity.is_empty() {
        tracing::warn!(
            path = %config.capacity_path().display(),
            "capacity table is empty; occupancy will not be computed"
        );
    }

    let records = enrich(&extraction.records, &capacity, names, now);
    let persisted = persist(&records, &config.latest_path(), &config.history_path())?;

    Ok(RunSummary {
        source: extraction.source,
        extracted: extraction.records.len(),
        persisted,
        raw_path,
    })
}

#[cfg(test)]
#[path = "run_test.rs"]
mod tests;
