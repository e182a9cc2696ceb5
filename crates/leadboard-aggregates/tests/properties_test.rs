//! Property-based tests for the aggregation pipeline.
//!
//! These tests cover:
//! - Sum invariants of the date-dependent aggregates
//! - Structural invariants of the flow graph
//! - Ranking bounds and ordering
//! - Idempotence of every aggregator

use chrono::{TimeZone, Utc};
use chrono_tz::Tz;
use leadboard_aggregates::*;
use leadboard_common::{parse_creation_time, LeadField, LeadRecord};
use proptest::prelude::*;
use std::collections::HashSet;

// =============================================================================
// Strategies
// =============================================================================

fn field_value() -> impl Strategy<Value = Option<String>> {
    prop_oneof![
        Just(None),
        Just(Some(String::new())),
        Just(Some("  ".to_string())),
        prop::sample::select(vec!["Google", "Facebook", "Brand", "Retargeting", "Mobile", "a->b"])
            .prop_map(|v| Some(v.to_string())),
    ]
}

fn timestamp() -> impl Strategy<Value = Option<String>> {
    prop_oneof![
        Just(None),
        Just(Some("not a date".to_string())),
        (2023i32..2026, 1u32..13, 1u32..29, 0u32..24).prop_map(|(y, m, d, h)| {
            Some(format!("{y:04}-{m:02}-{d:02}T{h:02}:15:00"))
        }),
        (2023i32..2026, 1u32..13, 1u32..29, 0u32..24).prop_map(|(y, m, d, h)| {
            Some(format!("{y:04}-{m:02}-{d:02} {h:02}:15:00+00:00"))
        }),
    ]
}

prop_compose! {
    fn lead_record()(
        id in 0i64..10_000,
        source in field_value(),
        campaign in field_value(),
        ad_set in field_value(),
        ad in field_value(),
        device in field_value(),
        created_on in timestamp(),
    ) -> LeadRecord {
        LeadRecord {
            id,
            source,
            campaign,
            ad_set,
            ad,
            device,
            created_on,
            ..LeadRecord::default()
        }
    }
}

fn lead_records() -> impl Strategy<Value = Vec<LeadRecord>> {
    prop::collection::vec(lead_record(), 0..40)
}

fn parseable(records: &[LeadRecord]) -> usize {
    records
        .iter()
        .filter(|r| {
            r.created_on
                .as_deref()
                .and_then(|raw| parse_creation_time(raw, &Tz::UTC))
                .is_some()
        })
        .count()
}

// =============================================================================
// Properties
// =============================================================================

proptest! {
    #[test]
    fn prop_daily_counts_sum_to_parseable_records(records in lead_records()) {
        let days = DailyCountAggregator::new().aggregate(&records);
        let total: usize = days.iter().map(|d| d.count).sum();
        prop_assert_eq!(total, parseable(&records));

        // ascending and distinct
        for pair in days.windows(2) {
            prop_assert!(pair[0].date < pair[1].date);
        }
    }

    #[test]
    fn prop_weekday_histogram_has_seven_keys(records in lead_records()) {
        let histogram = WeekdayHistogramBuilder::new(Tz::America__Sao_Paulo).aggregate(&records);
        prop_assert_eq!(histogram.total(), parseable(&records));

        let value = serde_json::to_value(histogram).unwrap();
        let map = value.as_object().unwrap();
        prop_assert_eq!(map.len(), 7);
        for day in 0..7 {
            prop_assert!(map.contains_key(&day.to_string()));
        }
    }

    #[test]
    fn prop_device_distribution_covers_every_record(records in lead_records()) {
        let distribution = DeviceDistributionAggregator::new().aggregate(&records);
        let total: usize = distribution.iter().map(|c| c.value).sum();
        prop_assert_eq!(total, records.len());
        for pair in distribution.windows(2) {
            prop_assert!(pair[0].value >= pair[1].value);
        }
    }

    #[test]
    fn prop_flow_graph_links_are_valid(records in lead_records()) {
        let outcome = FlowGraphBuilder::new().aggregate(&records);
        let failed = matches!(outcome, FlowGraphOutcome::Failed { .. });
        prop_assert!(!failed, "flow graph build failed: {:?}", outcome);

        let graph = outcome.display_graph();
        let mut pairs = HashSet::new();
        for link in &graph.links {
            prop_assert!(link.source < graph.nodes.len());
            prop_assert!(link.target < graph.nodes.len());
            prop_assert_ne!(link.source, link.target);
            prop_assert!(link.value > 0);
            prop_assert!(pairs.insert((link.source, link.target)));
        }

        if records.is_empty() {
            prop_assert_eq!(outcome, FlowGraphOutcome::Empty);
        }
    }

    #[test]
    fn prop_flow_graph_tiers_never_collapse(records in lead_records()) {
        if let FlowGraphOutcome::Ready(graph) = FlowGraphBuilder::new().aggregate(&records) {
            let names: HashSet<&str> = graph.nodes.iter().map(|n| n.name.as_str()).collect();
            prop_assert_eq!(names.len(), graph.nodes.len());

            // every step carries the full record count
            for step in 0..3 {
                let from = FunnelTier::ALL[step].label();
                let flow: usize = graph
                    .links
                    .iter()
                    .filter(|l| graph.nodes[l.source].name.starts_with(from))
                    .map(|l| l.value)
                    .sum();
                prop_assert_eq!(flow, records.len());
            }
        }
    }

    #[test]
    fn prop_top_n_is_bounded_and_sorted(records in lead_records(), limit in 1usize..8) {
        for field in [LeadField::Campaign, LeadField::AdSet, LeadField::Ad] {
            let ranking = TopNRanker::new(field).with_limit(limit).aggregate(&records);
            prop_assert!(ranking.len() <= limit);
            for entry in &ranking {
                prop_assert!(entry.value > 0);
                prop_assert!(!entry.name.trim().is_empty());
            }
            for pair in ranking.windows(2) {
                prop_assert!(pair[0].value >= pair[1].value);
            }
        }

        let default_ranking = TopNRanker::new(LeadField::Campaign).aggregate(&records);
        prop_assert!(default_ranking.len() <= 5);
    }

    #[test]
    fn prop_aggregators_are_idempotent(records in lead_records()) {
        let settings = AggregationSettings::default();
        let as_of = Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap();
        let first = compute_aggregates(&records, &settings, as_of);
        let second = compute_aggregates(&records, &settings, as_of);

        prop_assert_eq!(
            serde_json::to_string(&first).unwrap(),
            serde_json::to_string(&second).unwrap()
        );
    }
}
