//! Choices offered by the filter bar

use crate::DataAggregator;
use leadboard_common::{LeadField, LeadRecord};
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

/// Distinct present values of each attribution tier, sorted ascending.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FilterOptions {
    #[serde(rename = "fonte")]
    pub sources: Vec<String>,
    #[serde(rename = "campanha")]
    pub campaigns: Vec<String>,
    #[serde(rename = "conjunto")]
    pub ad_sets: Vec<String>,
    #[serde(rename = "anuncio")]
    pub ads: Vec<String>,
}

#[derive(Debug, Clone, Copy, Default)]
pub struct FilterOptionsCollector;

impl FilterOptionsCollector {
    pub fn new() -> Self {
        Self
    }
}

fn distinct(records: &[LeadRecord], field: LeadField) -> Vec<String> {
    records
        .iter()
        .filter_map(|record| record.field(field))
        .collect::<BTreeSet<_>>()
        .into_iter()
        .map(str::to_string)
        .collect()
}

impl DataAggregator for FilterOptionsCollector {
    type Output = FilterOptions;

    fn aggregate(&self, records: &[LeadRecord]) -> FilterOptions {
        FilterOptions {
            sources: distinct(records, LeadField::Source),
            campaigns: distinct(records, LeadField::Campaign),
            ad_sets: distinct(records, LeadField::AdSet),
            ads: distinct(records, LeadField::Ad),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use leadboard_common::test_utils::{lead, sample_leads};

    #[test]
    fn test_options_are_sorted_and_distinct() {
        let options = FilterOptionsCollector::new().aggregate(&sample_leads());

        assert_eq!(options.sources, vec!["Facebook", "Google", "Orgânico"]);
        assert_eq!(options.campaigns, vec!["Brand", "Retargeting"]);
        assert_eq!(options.ad_sets, vec!["Desktop", "Mixed", "Mobile"]);
        assert_eq!(options.ads, vec!["Banner A", "Carousel", "Video 01"]);
    }

    #[test]
    fn test_options_serialize_with_column_names() {
        let options =
            FilterOptionsCollector::new().aggregate(&[lead(1, ["G", "B", "D", "A"], "2024-01-01")]);
        let json = serde_json::to_value(&options).unwrap();
        assert_eq!(json["fonte"][0], "G");
        assert_eq!(json["anuncio"][0], "A");
    }
}
