//! Full snapshot computation over one record set

use crate::{
    CategoryDistribution, DailyCount, DailyCountAggregator, DataAggregator,
    DeviceDistributionAggregator, FlowGraphBuilder, FlowGraphOutcome, LeadFilter, LeadMetrics,
    MetricsAggregator, RecentLeads, TopNRanker, TopNRanking, WeekdayHistogram,
    WeekdayHistogramBuilder, DEFAULT_PERIOD_DAYS, DEFAULT_RECENT_LIMIT, DEFAULT_TOP_N,
};
use chrono::{DateTime, Utc};
use chrono_tz::Tz;
use leadboard_common::{LeadField, LeadRecord, LeadboardError};
use leadboard_config::AggregationConfig;
use serde::Serialize;
use tracing::{info, instrument};

/// Runtime parameters of the aggregation stages.
#[derive(Debug, Clone, PartialEq)]
pub struct AggregationSettings {
    pub top_n_limit: usize,
    pub recent_leads_limit: usize,
    /// Page of the recent leads table, from 1.
    pub recent_leads_page: usize,
    pub timezone: Tz,
    pub organic_source_label: String,
}

impl Default for AggregationSettings {
    fn default() -> Self {
        Self {
            top_n_limit: DEFAULT_TOP_N,
            recent_leads_limit: DEFAULT_RECENT_LIMIT,
            recent_leads_page: 1,
            timezone: Tz::UTC,
            organic_source_label: "Orgânico".to_string(),
        }
    }
}

impl TryFrom<&AggregationConfig> for AggregationSettings {
    type Error = LeadboardError;

    fn try_from(config: &AggregationConfig) -> Result<Self, Self::Error> {
        let timezone = config.timezone.parse::<Tz>().map_err(|e| {
            LeadboardError::validation_field(
                format!("unknown timezone '{}': {}", config.timezone, e),
                "aggregation.timezone",
            )
        })?;

        Ok(Self {
            top_n_limit: config.top_n_limit,
            recent_leads_limit: config.recent_leads_limit,
            recent_leads_page: 1,
            timezone,
            organic_source_label: config.organic_source_label.clone(),
        })
    }
}

/// Period information the metrics need beyond the records themselves.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PeriodContext {
    pub days: u32,
    pub previous_total: Option<usize>,
}

impl Default for PeriodContext {
    fn default() -> Self {
        Self {
            days: DEFAULT_PERIOD_DAYS,
            previous_total: None,
        }
    }
}

impl PeriodContext {
    /// Period of `filter`'s date range, or the default window when open.
    pub fn for_filter(filter: &LeadFilter, previous_total: Option<usize>) -> Self {
        Self {
            days: filter.date_range.days().unwrap_or(DEFAULT_PERIOD_DAYS),
            previous_total,
        }
    }
}

/// Every derived view of one record snapshot.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Aggregates {
    pub as_of: DateTime<Utc>,
    pub total_records: usize,
    pub daily_counts: DailyCount,
    pub device_distribution: CategoryDistribution,
    pub flow_graph: FlowGraphOutcome,
    pub top_campaigns: TopNRanking,
    pub top_ad_sets: TopNRanking,
    pub top_ads: TopNRanking,
    pub weekday_histogram: WeekdayHistogram,
    pub metrics: LeadMetrics,
    pub recent_leads: Vec<LeadRecord>,
}

/// Compute every aggregate with the default metrics period.
pub fn compute_aggregates(
    records: &[LeadRecord],
    settings: &AggregationSettings,
    as_of: DateTime<Utc>,
) -> Aggregates {
    compute_aggregates_in(records, settings, &PeriodContext::default(), as_of)
}

/// Compute every aggregate for a snapshot taken over `period`.
///
/// `as_of` is stamped onto the result as given; no clock is read here.
#[instrument(skip_all, fields(records = records.len(), as_of = %as_of))]
pub fn compute_aggregates_in(
    records: &[LeadRecord],
    settings: &AggregationSettings,
    period: &PeriodContext,
    as_of: DateTime<Utc>,
) -> Aggregates {
    let rank = |field| {
        TopNRanker::new(field)
            .with_limit(settings.top_n_limit)
            .aggregate(records)
    };

    let aggregates = Aggregates {
        as_of,
        total_records: records.len(),
        daily_counts: DailyCountAggregator::new().aggregate(records),
        device_distribution: DeviceDistributionAggregator::new().aggregate(records),
        flow_graph: FlowGraphBuilder::new().aggregate(records),
        top_campaigns: rank(LeadField::Campaign),
        top_ad_sets: rank(LeadField::AdSet),
        top_ads: rank(LeadField::Ad),
        weekday_histogram: WeekdayHistogramBuilder::new(settings.timezone).aggregate(records),
        metrics: MetricsAggregator::new(settings.organic_source_label.as_str())
            .with_period_days(period.days)
            .with_previous_total(period.previous_total)
            .aggregate(records),
        recent_leads: RecentLeads::new(settings.recent_leads_limit, settings.timezone)
            .with_page(settings.recent_leads_page)
            .aggregate(records),
    };

    info!(
        days = aggregates.daily_counts.len(),
        flow_ready = aggregates.flow_graph.is_ready(),
        "Computed aggregate snapshot"
    );
    aggregates
}
