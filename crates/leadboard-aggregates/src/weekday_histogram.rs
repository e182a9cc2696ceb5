//! Leads per day of the week

use crate::{DataAggregator, WeekdayHistogram};
use chrono::Datelike;
use chrono_tz::Tz;
use leadboard_common::{parse_creation_time, LeadRecord};
use tracing::{debug, instrument};

/// Counts records by the weekday of their creation time in `timezone`.
#[derive(Debug, Clone, Copy)]
pub struct WeekdayHistogramBuilder {
    timezone: Tz,
}

impl WeekdayHistogramBuilder {
    pub fn new(timezone: Tz) -> Self {
        Self { timezone }
    }
}

impl Default for WeekdayHistogramBuilder {
    fn default() -> Self {
        Self::new(Tz::UTC)
    }
}

impl DataAggregator for WeekdayHistogramBuilder {
    type Output = WeekdayHistogram;

    #[instrument(skip_all, fields(records = records.len(), timezone = %self.timezone))]
    fn aggregate(&self, records: &[LeadRecord]) -> WeekdayHistogram {
        let mut histogram = WeekdayHistogram::new();
        let mut skipped = 0usize;

        for record in records {
            match record
                .created_on
                .as_deref()
                .and_then(|raw| parse_creation_time(raw, &self.timezone))
            {
                Some(parsed) => histogram.increment(parsed.local.weekday()),
                None => skipped += 1,
            }
        }

        debug!(counted = histogram.total(), skipped, "Aggregated weekday histogram");
        histogram
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Weekday;
    use leadboard_common::test_utils::LeadBuilder;

    #[test]
    fn test_sunday_is_bucket_zero() {
        // 2024-01-07 was a Sunday, 2024-01-13 a Saturday
        let records = vec![
            LeadBuilder::new(1).created("2024-01-07T09:00:00").build(),
            LeadBuilder::new(2).created("2024-01-13T09:00:00").build(),
            LeadBuilder::new(3).created("2024-01-13").build(),
        ];

        let histogram = WeekdayHistogramBuilder::default().aggregate(&records);
        assert_eq!(histogram.counts(), &[1, 0, 0, 0, 0, 0, 2]);
    }

    #[test]
    fn test_offset_timestamps_use_reporting_timezone() {
        // Monday 02:00 UTC is still Sunday evening in Sao Paulo
        let records = vec![LeadBuilder::new(1).created("2024-01-08T02:00:00Z").build()];

        let utc = WeekdayHistogramBuilder::new(Tz::UTC).aggregate(&records);
        let brt = WeekdayHistogramBuilder::new(Tz::America__Sao_Paulo).aggregate(&records);
        assert_eq!(utc.get(Weekday::Mon), 1);
        assert_eq!(brt.get(Weekday::Sun), 1);
    }

    #[test]
    fn test_unparseable_records_are_skipped() {
        let records = vec![
            LeadBuilder::new(1).created("soon").build(),
            LeadBuilder::new(2).build(),
        ];
        let histogram = WeekdayHistogramBuilder::default().aggregate(&records);
        assert_eq!(histogram.total(), 0);
    }
}
