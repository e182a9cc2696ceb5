//! One-shot run: load leads, refresh the aggregates, render JSON

use crate::{AppError, AppResult, Args};
use chrono::{DateTime, Utc};
use leadboard_aggregates::{
    parse_records, AggregateRefresher, Aggregates, AggregationSettings, DataAggregator,
    FilterOptionsCollector, FlowGraph, InMemorySource, JsonFileSource, LeadFilter, LeadSource,
    RefreshOutcome,
};
use leadboard_common::LeadRecord;
use leadboard_config::{Config, ConfigError, ConfigLoader};
use serde::Serialize;
use tokio::io::AsyncReadExt;
use tracing::{debug, info, instrument};

/// Aggregate snapshot as printed by the binary.
///
/// The flow graph keeps its status and is accompanied by the graph the
/// chart should draw, sentinel included.
#[derive(Debug, Serialize)]
pub struct Report<'a> {
    pub filter: &'a LeadFilter,
    #[serde(flatten)]
    pub aggregates: &'a Aggregates,
    pub flow_graph_display: FlowGraph,
}

/// Resolve configuration from the file named on the command line (or the
/// default discovery), then apply command line overrides.
pub fn load_config(args: &Args) -> AppResult<Config> {
    let mut config = match &args.config {
        Some(path) => ConfigLoader::load_config(path)?,
        None => ConfigLoader::load()?,
    };

    args.apply_overrides(&mut config);
    config
        .validate_all()
        .map_err(ConfigError::ValidationError)?;

    Ok(config)
}

/// Run once and return the JSON document to print.
#[instrument(skip_all, fields(options = args.options))]
pub async fn run(args: &Args, config: &Config, as_of: DateTime<Utc>) -> AppResult<String> {
    let mut settings = AggregationSettings::try_from(&config.aggregation)?;
    settings.recent_leads_page = usize::try_from(args.page).unwrap_or(usize::MAX);
    let filter = args.filter()?;

    let output = match &config.input.path {
        Some(path) => {
            info!(path = %path.display(), "Reading lead export");
            let source = JsonFileSource::new(path, settings.timezone);
            if args.options {
                let records = source.load_all().await?;
                render(&FilterOptionsCollector::new().aggregate(&records), config)?
            } else {
                report(source, settings, &filter, as_of, config).await?
            }
        }
        None => {
            info!("Reading lead export from stdin");
            let records = read_stdin().await?;
            if args.options {
                render(&FilterOptionsCollector::new().aggregate(&records), config)?
            } else {
                let source = InMemorySource::with_timezone(records, settings.timezone);
                report(source, settings, &filter, as_of, config).await?
            }
        }
    };

    Ok(output)
}

async fn report<S: LeadSource>(
    source: S,
    settings: AggregationSettings,
    filter: &LeadFilter,
    as_of: DateTime<Utc>,
    config: &Config,
) -> AppResult<String> {
    let refresher = AggregateRefresher::new(source, settings);

    let aggregates = match refresher.refresh(filter, as_of).await? {
        RefreshOutcome::Applied { aggregates, .. } => aggregates,
        RefreshOutcome::Superseded { generation } => return Err(AppError::Superseded(generation)),
    };
    debug!(records = aggregates.total_records, "Aggregates ready");

    let report = Report {
        filter,
        aggregates: &aggregates,
        flow_graph_display: aggregates.flow_graph.display_graph(),
    };
    render(&report, config)
}

async fn read_stdin() -> AppResult<Vec<LeadRecord>> {
    let mut content = String::new();
    tokio::io::stdin().read_to_string(&mut content).await?;
    Ok(parse_records(&content)?)
}

fn render<T: Serialize>(value: &T, config: &Config) -> AppResult<String> {
    let output = if config.output.pretty {
        serde_json::to_string_pretty(value)?
    } else {
        serde_json::to_string(value)?
    };
    Ok(output)
}
