//! Command line arguments

use crate::AppResult;
use chrono::NaiveDate;
use clap::Parser;
use leadboard_aggregates::{DateRange, LeadFilter};
use leadboard_common::LeadField;
use leadboard_config::Config;
use std::path::PathBuf;

/// Aggregate a lead export into dashboard views
#[derive(Parser, Debug, Clone, Default)]
#[command(author, version, about, long_about = None)]
pub struct Args {
    /// Configuration file path
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// JSON export of lead rows (stdin when omitted and not configured)
    #[arg(short, long)]
    pub input: Option<PathBuf>,

    /// Log level, overriding the configured one
    #[arg(short, long)]
    pub log_level: Option<String>,

    /// Only leads owned by this client (`user_id`)
    #[arg(long)]
    pub client: Option<String>,

    /// First day of the date range (YYYY-MM-DD)
    #[arg(long)]
    pub from: Option<NaiveDate>,

    /// Last day of the date range (YYYY-MM-DD)
    #[arg(long)]
    pub to: Option<NaiveDate>,

    /// Exact source (`fonte`)
    #[arg(long)]
    pub fonte: Option<String>,

    /// Exact campaign (`campanha`)
    #[arg(long)]
    pub campanha: Option<String>,

    /// Exact ad set (`conjunto`)
    #[arg(long)]
    pub conjunto: Option<String>,

    /// Exact ad (`anuncio`)
    #[arg(long)]
    pub anuncio: Option<String>,

    /// Case-insensitive search on name or phone
    #[arg(short, long)]
    pub search: Option<String>,

    /// Page of the recent leads table, from 1
    #[arg(long, default_value_t = 1, value_parser = clap::value_parser!(u64).range(1..))]
    pub page: u64,

    /// Print the filter choices of the whole export instead of aggregates
    #[arg(long)]
    pub options: bool,

    /// Single-line JSON output
    #[arg(long)]
    pub compact: bool,
}

impl Args {
    /// Filter described by the selection flags.
    pub fn filter(&self) -> AppResult<LeadFilter> {
        let mut filter = LeadFilter::new().with_date_range(DateRange::new(self.from, self.to)?);

        if let Some(client) = &self.client {
            filter = filter.with_client(client.as_str());
        }
        let selections = [
            (LeadField::Source, &self.fonte),
            (LeadField::Campaign, &self.campanha),
            (LeadField::AdSet, &self.conjunto),
            (LeadField::Ad, &self.anuncio),
        ];
        for (field, value) in selections {
            if let Some(value) = value {
                filter = filter.with_selection(field, value.as_str());
            }
        }
        if let Some(search) = &self.search {
            filter = filter.with_search(search.as_str());
        }

        Ok(filter)
    }

    /// Apply flags that take precedence over file and environment settings.
    pub fn apply_overrides(&self, config: &mut Config) {
        if let Some(input) = &self.input {
            config.input.path = Some(input.clone());
        }
        if let Some(level) = &self.log_level {
            config.logging.level = level.clone();
        }
        if self.compact {
            config.output.pretty = false;
        }
    }
}
