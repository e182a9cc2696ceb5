//! Headline lead metrics

use crate::DataAggregator;
use leadboard_common::{LeadField, LeadRecord};
use serde::{Deserialize, Serialize};
use tracing::{debug, instrument};

/// Period length assumed when the filter has no full date range.
pub const DEFAULT_PERIOD_DAYS: u32 = 30;

/// Summary counters shown above the charts.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LeadMetrics {
    pub total_leads: usize,
    pub organic_leads: usize,
    pub tracked_leads: usize,
    pub average_leads_per_day: f64,
    /// Change against the previous period, in percent
    #[serde(skip_serializing_if = "Option::is_none")]
    pub percent_change: Option<f64>,
}

/// Computes [`LeadMetrics`] for one period.
#[derive(Debug, Clone)]
pub struct MetricsAggregator {
    organic_label: String,
    period_days: u32,
    previous_total: Option<usize>,
}

impl MetricsAggregator {
    pub fn new(organic_label: impl Into<String>) -> Self {
        Self {
            organic_label: organic_label.into(),
            period_days: DEFAULT_PERIOD_DAYS,
            previous_total: None,
        }
    }

    /// Days the averaged period spans; zero is treated as one.
    pub fn with_period_days(mut self, days: u32) -> Self {
        self.period_days = days.max(1);
        self
    }

    pub fn with_previous_total(mut self, previous_total: Option<usize>) -> Self {
        self.previous_total = previous_total;
        self
    }

    fn is_organic(&self, source: &str) -> bool {
        source.trim().to_lowercase() == self.organic_label.trim().to_lowercase()
    }
}

impl DataAggregator for MetricsAggregator {
    type Output = LeadMetrics;

    #[instrument(skip_all, fields(records = records.len(), period_days = self.period_days))]
    fn aggregate(&self, records: &[LeadRecord]) -> LeadMetrics {
        let total_leads = records.len();
        let (organic_leads, tracked_leads) = records
            .iter()
            .filter_map(|record| record.field(LeadField::Source))
            .fold((0, 0), |(organic, tracked), source| {
                if self.is_organic(source) {
                    (organic + 1, tracked)
                } else {
                    (organic, tracked + 1)
                }
            });

        let percent_change = self
            .previous_total
            .filter(|&previous| previous > 0)
            .map(|previous| (total_leads as f64 - previous as f64) / previous as f64 * 100.0);

        let metrics = LeadMetrics {
            total_leads,
            organic_leads,
            tracked_leads,
            average_leads_per_day: total_leads as f64 / f64::from(self.period_days.max(1)),
            percent_change,
        };

        debug!(
            organic = metrics.organic_leads,
            tracked = metrics.tracked_leads,
            "Computed lead metrics"
        );
        metrics
    }
}
