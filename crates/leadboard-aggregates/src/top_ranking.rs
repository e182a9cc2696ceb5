//! Most frequent values of one attribution field

use crate::{CategoryCount, DataAggregator, Grouping, TopNRanking};
use leadboard_common::{LeadField, LeadRecord};
use tracing::{debug, instrument};

/// Number of entries kept when no limit is configured.
pub const DEFAULT_TOP_N: usize = 5;

/// Ranks the distinct values of `field` by frequency.
///
/// Records whose field is missing are excluded entirely rather than mapped
/// to a placeholder.
#[derive(Debug, Clone, Copy)]
pub struct TopNRanker {
    field: LeadField,
    limit: usize,
}

impl TopNRanker {
    pub fn new(field: LeadField) -> Self {
        Self {
            field,
            limit: DEFAULT_TOP_N,
        }
    }

    pub fn with_limit(mut self, limit: usize) -> Self {
        self.limit = limit;
        self
    }

    pub fn field(&self) -> LeadField {
        self.field
    }

    pub fn limit(&self) -> usize {
        self.limit
    }
}

impl DataAggregator for TopNRanker {
    type Output = TopNRanking;

    #[instrument(skip_all, fields(field = %self.field, limit = self.limit))]
    fn aggregate(&self, records: &[LeadRecord]) -> TopNRanking {
        let grouping: Grouping<&str, &LeadRecord> = records
            .iter()
            .filter_map(|record| record.field(self.field).map(|value| (value, record)))
            .collect();

        let ranking: TopNRanking = grouping
            .ranked()
            .into_iter()
            .take(self.limit)
            .map(|(name, value)| CategoryCount::new(name, value))
            .collect();

        debug!(
            distinct = grouping.len(),
            kept = ranking.len(),
            "Ranked attribution values"
        );
        ranking
    }
}
