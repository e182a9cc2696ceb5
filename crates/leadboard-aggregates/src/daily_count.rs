//! Leads per calendar day

use crate::{DailyCount, DailyCountPoint, DataAggregator, Grouping};
use chrono_tz::Tz;
use leadboard_common::{parse_creation_time, LeadRecord};
use tracing::{debug, instrument, warn};

/// Buckets records by the literal day prefix of their creation timestamp.
///
/// Records without a parseable timestamp are left out.
#[derive(Debug, Clone, Copy, Default)]
pub struct DailyCountAggregator;

impl DailyCountAggregator {
    pub fn new() -> Self {
        Self
    }
}

impl DataAggregator for DailyCountAggregator {
    type Output = DailyCount;

    #[instrument(skip_all, fields(records = records.len()))]
    fn aggregate(&self, records: &[LeadRecord]) -> DailyCount {
        // The day key is never shifted, so any zone gives the same buckets.
        let grouping: Grouping<String, ()> = records
            .iter()
            .filter_map(|record| record.created_on.as_deref())
            .filter_map(|raw| parse_creation_time(raw, &Tz::UTC))
            .map(|parsed| (parsed.date_key, ()))
            .collect();

        let dated: usize = grouping.counts().iter().map(|(_, count)| count).sum();
        if dated < records.len() {
            warn!(skipped = records.len() - dated, "Skipped leads without a usable creation time");
        }

        let mut days: DailyCount = grouping
            .counts()
            .into_iter()
            .map(|(date, count)| DailyCountPoint { date, count })
            .collect();
        days.sort_by(|a, b| a.date.cmp(&b.date));

        debug!(days = days.len(), "Aggregated daily counts");
        days
    }
}
