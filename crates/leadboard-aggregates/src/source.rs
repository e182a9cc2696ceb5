//! Data-access seam feeding the pipeline

use crate::LeadFilter;
use async_trait::async_trait;
use chrono_tz::Tz;
use leadboard_common::{LeadRecord, LeadboardError, Result};
use std::path::{Path, PathBuf};
use tracing::{debug, instrument};

/// Anything able to return the leads matching a filter.
///
/// Retries and pagination are the implementation's concern; the pipeline
/// only sees the final record set.
#[async_trait]
pub trait LeadSource: Send + Sync {
    async fn fetch(&self, filter: &LeadFilter) -> Result<Vec<LeadRecord>>;
}

/// Source over records already held in memory.
#[derive(Debug, Clone)]
pub struct InMemorySource {
    records: Vec<LeadRecord>,
    timezone: Tz,
}

impl InMemorySource {
    pub fn new(records: Vec<LeadRecord>) -> Self {
        Self::with_timezone(records, Tz::UTC)
    }

    /// Date-range filters are evaluated in `timezone`.
    pub fn with_timezone(records: Vec<LeadRecord>, timezone: Tz) -> Self {
        Self { records, timezone }
    }

    pub fn records(&self) -> &[LeadRecord] {
        &self.records
    }
}

fn apply_filter(records: &[LeadRecord], filter: &LeadFilter, timezone: &Tz) -> Vec<LeadRecord> {
    records
        .iter()
        .filter(|record| filter.matches(record, timezone))
        .cloned()
        .collect()
}

#[async_trait]
impl LeadSource for InMemorySource {
    async fn fetch(&self, filter: &LeadFilter) -> Result<Vec<LeadRecord>> {
        Ok(apply_filter(&self.records, filter, &self.timezone))
    }
}

/// Source reading a JSON array of lead rows from disk on every fetch.
#[derive(Debug, Clone)]
pub struct JsonFileSource {
    path: PathBuf,
    timezone: Tz,
}

impl JsonFileSource {
    pub fn new(path: impl Into<PathBuf>, timezone: Tz) -> Self {
        Self {
            path: path.into(),
            timezone,
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Every record in the export, unfiltered.
    #[instrument(skip(self), fields(path = %self.path.display()))]
    pub async fn load_all(&self) -> Result<Vec<LeadRecord>> {
        let content = tokio::fs::read_to_string(&self.path).await.map_err(|e| {
            LeadboardError::source_failure_with(
                format!("Failed to read lead export {}", self.path.display()),
                e,
            )
        })?;

        let records = parse_records(&content).map_err(|e| {
            LeadboardError::source_failure_with(
                format!("Failed to parse lead export {}", self.path.display()),
                e,
            )
        })?;

        debug!(records = records.len(), "Loaded lead export");
        Ok(records)
    }
}

/// Parse a JSON array of lead rows.
pub fn parse_records(content: &str) -> std::result::Result<Vec<LeadRecord>, serde_json::Error> {
    serde_json::from_str(content)
}

#[async_trait]
impl LeadSource for JsonFileSource {
    async fn fetch(&self, filter: &LeadFilter) -> Result<Vec<LeadRecord>> {
        let records = self.load_all().await?;
        Ok(apply_filter(&records, filter, &self.timezone))
    }
}
