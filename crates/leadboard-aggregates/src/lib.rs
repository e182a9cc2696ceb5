//! # Leadboard Aggregates
//!
//! Turns a snapshot of lead records into the views behind the dashboard
//! charts: leads per day, device mix, the source → campaign → ad set → ad
//! flow graph, top campaign/ad set/ad rankings and the weekday histogram,
//! plus headline metrics and the recent leads table.
//!
//! Every aggregator is a pure function of its input. [`AggregateRefresher`]
//! wraps them with a fetch step whose stale results are discarded.

#![warn(clippy::all)]
#![allow(clippy::module_name_repetitions)]

pub mod aggregator;
pub mod daily_count;
pub mod device_distribution;
pub mod filter;
pub mod flow_graph;
pub mod grouping;
pub mod metrics;
pub mod options;
pub mod pipeline;
pub mod recent;
pub mod refresh;
pub mod source;
pub mod top_ranking;
pub mod types;
pub mod weekday_histogram;

pub use aggregator::DataAggregator;
pub use daily_count::DailyCountAggregator;
pub use device_distribution::{DeviceDistributionAggregator, UNKNOWN_DEVICE};
pub use filter::{DateRange, LeadFilter};
pub use flow_graph::{
    validate_graph, FlowGraphBuilder, FlowGraphOutcome, FunnelTier, ERROR_NODE, NO_DATA_NODE,
    UNKNOWN_TIER_VALUE,
};
pub use grouping::Grouping;
pub use metrics::{LeadMetrics, MetricsAggregator, DEFAULT_PERIOD_DAYS};
pub use options::{FilterOptions, FilterOptionsCollector};
pub use pipeline::{
    compute_aggregates, compute_aggregates_in, AggregationSettings, Aggregates, PeriodContext,
};
pub use recent::{RecentLeads, DEFAULT_RECENT_LIMIT};
pub use refresh::{AggregateRefresher, RefreshOutcome};
pub use source::{parse_records, InMemorySource, JsonFileSource, LeadSource};
pub use top_ranking::{TopNRanker, DEFAULT_TOP_N};
pub use types::*;
pub use weekday_histogram::WeekdayHistogramBuilder;
