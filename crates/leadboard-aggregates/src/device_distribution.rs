//! Leads per device category

use crate::{CategoryCount, CategoryDistribution, DataAggregator, Grouping};
use leadboard_common::{LeadField, LeadRecord};
use tracing::{debug, instrument};

/// Bucket name for records without a device.
pub const UNKNOWN_DEVICE: &str = "Unknown";

/// Groups records by `dispositivo`, largest bucket first.
#[derive(Debug, Clone, Copy, Default)]
pub struct DeviceDistributionAggregator;

impl DeviceDistributionAggregator {
    pub fn new() -> Self {
        Self
    }
}

impl DataAggregator for DeviceDistributionAggregator {
    type Output = CategoryDistribution;

    #[instrument(skip_all, fields(records = records.len()))]
    fn aggregate(&self, records: &[LeadRecord]) -> CategoryDistribution {
        let grouping: Grouping<&str, &LeadRecord> = records
            .iter()
            .map(|record| {
                let device = record.field(LeadField::Device).unwrap_or(UNKNOWN_DEVICE);
                (device, record)
            })
            .collect();

        let distribution: CategoryDistribution = grouping
            .ranked()
            .into_iter()
            .map(|(name, value)| CategoryCount::new(name, value))
            .collect();

        debug!(buckets = distribution.len(), "Aggregated device distribution");
        distribution
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use leadboard_common::test_utils::LeadBuilder;

    #[test]
    fn test_missing_devices_share_unknown_bucket() {
        let records = vec![
            LeadBuilder::new(1).device("Mobile").build(),
            LeadBuilder::new(2).build(),
            LeadBuilder::new(3).device("  ").build(),
            LeadBuilder::new(4).device("Desktop").build(),
            LeadBuilder::new(5).device("Mobile").build(),
            LeadBuilder::new(6).device("Mobile").build(),
        ];

        let distribution = DeviceDistributionAggregator::new().aggregate(&records);
        assert_eq!(
            distribution,
            vec![
                CategoryCount::new("Mobile", 3),
                CategoryCount::new(UNKNOWN_DEVICE, 2),
                CategoryCount::new("Desktop", 1),
            ]
        );
    }

    #[test]
    fn test_ties_keep_first_seen_order() {
        let records = vec![
            LeadBuilder::new(1).device("Tablet").build(),
            LeadBuilder::new(2).device("Desktop").build(),
        ];

        let distribution = DeviceDistributionAggregator::new().aggregate(&records);
        assert_eq!(distribution[0].name, "Tablet");
        assert_eq!(distribution[1].name, "Desktop");
    }

    #[test]
    fn test_values_are_case_sensitive() {
        let records = vec![
            LeadBuilder::new(1).device("mobile").build(),
            LeadBuilder::new(2).device("Mobile").build(),
        ];
        assert_eq!(DeviceDistributionAggregator::new().aggregate(&records).len(), 2);
    }
}
