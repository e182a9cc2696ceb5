//! Fetch-then-compute refreshes that a newer refresh can supersede

use crate::{compute_aggregates_in, AggregationSettings, Aggregates, LeadFilter, LeadSource, PeriodContext};
use chrono::{DateTime, Utc};
use leadboard_common::Result;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use tokio::sync::{watch, Mutex};
use tracing::{debug, info, instrument};

/// How a refresh ended.
#[derive(Debug, Clone)]
pub enum RefreshOutcome {
    /// The snapshot was published.
    Applied {
        generation: u64,
        aggregates: Arc<Aggregates>,
    },
    /// A later refresh started first; the result was discarded.
    Superseded { generation: u64 },
}

impl RefreshOutcome {
    pub fn generation(&self) -> u64 {
        match self {
            Self::Applied { generation, .. } | Self::Superseded { generation } => *generation,
        }
    }

    pub fn is_applied(&self) -> bool {
        matches!(self, Self::Applied { .. })
    }
}

/// Re-runs the pipeline whenever the filter changes and publishes the newest
/// snapshot on a watch channel.
///
/// Each call to [`refresh`](Self::refresh) takes a generation number up front.
/// A result is published only if no later generation has started, and
/// publication happens under a lock so an older snapshot can never replace a
/// newer one.
pub struct AggregateRefresher<S> {
    source: S,
    settings: AggregationSettings,
    generation: AtomicU64,
    publish_lock: Mutex<()>,
    sender: watch::Sender<Option<Arc<Aggregates>>>,
}

impl<S: LeadSource> AggregateRefresher<S> {
    pub fn new(source: S, settings: AggregationSettings) -> Self {
        let (sender, _) = watch::channel(None);
        Self {
            source,
            settings,
            generation: AtomicU64::new(0),
            publish_lock: Mutex::new(()),
            sender,
        }
    }

    pub fn settings(&self) -> &AggregationSettings {
        &self.settings
    }

    /// Receiver observing every published snapshot.
    pub fn subscribe(&self) -> watch::Receiver<Option<Arc<Aggregates>>> {
        self.sender.subscribe()
    }

    /// Most recently published snapshot, if any.
    pub fn latest(&self) -> Option<Arc<Aggregates>> {
        self.sender.borrow().clone()
    }

    fn is_stale(&self, generation: u64) -> bool {
        self.generation.load(Ordering::SeqCst) != generation
    }

    /// Fetch the records for `filter`, compute the snapshot and publish it
    /// unless a newer refresh has started meanwhile.
    ///
    /// Fetch errors are returned as is; nothing is published for them.
    #[instrument(skip_all)]
    pub async fn refresh(&self, filter: &LeadFilter, as_of: DateTime<Utc>) -> Result<RefreshOutcome> {
        let generation = self.generation.fetch_add(1, Ordering::SeqCst) + 1;
        info!(generation, "Starting aggregate refresh");

        let records = self.source.fetch(filter).await?;
        let previous_total = match filter.previous_period() {
            Some(previous) => Some(self.source.fetch(&previous).await?.len()),
            None => None,
        };

        if self.is_stale(generation) {
            info!(generation, "Refresh superseded before compute");
            return Ok(RefreshOutcome::Superseded { generation });
        }

        let period = PeriodContext::for_filter(filter, previous_total);
        let aggregates = Arc::new(compute_aggregates_in(&records, &self.settings, &period, as_of));

        let _guard = self.publish_lock.lock().await;
        if self.is_stale(generation) {
            info!(generation, "Refresh superseded before publish");
            return Ok(RefreshOutcome::Superseded { generation });
        }
        self.sender.send_replace(Some(Arc::clone(&aggregates)));
        debug!(generation, records = records.len(), "Published aggregate snapshot");

        Ok(RefreshOutcome::Applied {
            generation,
            aggregates,
        })
    }
}
