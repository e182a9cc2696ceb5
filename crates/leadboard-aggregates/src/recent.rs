//! Most recently created leads

use crate::DataAggregator;
use chrono::NaiveDateTime;
use chrono_tz::Tz;
use leadboard_common::{parse_creation_time, LeadRecord};
use std::cmp::Ordering;

/// Rows shown when no limit is configured.
pub const DEFAULT_RECENT_LIMIT: usize = 10;

/// Newest leads first; undated leads sort last and ties keep input order.
///
/// Returns one page of `limit` rows. Pages are numbered from 1.
#[derive(Debug, Clone, Copy)]
pub struct RecentLeads {
    limit: usize,
    page: usize,
    timezone: Tz,
}

impl RecentLeads {
    pub fn new(limit: usize, timezone: Tz) -> Self {
        Self {
            limit,
            page: 1,
            timezone,
        }
    }

    /// Select a page; 0 is treated as the first page.
    pub fn with_page(mut self, page: usize) -> Self {
        self.page = page.max(1);
        self
    }

    pub fn page(&self) -> usize {
        self.page
    }

    fn offset(&self) -> usize {
        (self.page - 1).saturating_mul(self.limit)
    }
}

impl Default for RecentLeads {
    fn default() -> Self {
        Self::new(DEFAULT_RECENT_LIMIT, Tz::UTC)
    }
}

fn newest_first(a: &Option<NaiveDateTime>, b: &Option<NaiveDateTime>) -> Ordering {
    match (a, b) {
        (Some(a), Some(b)) => b.cmp(a),
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => Ordering::Equal,
    }
}

impl DataAggregator for RecentLeads {
    type Output = Vec<LeadRecord>;

    fn aggregate(&self, records: &[LeadRecord]) -> Vec<LeadRecord> {
        let mut keyed: Vec<(Option<NaiveDateTime>, &LeadRecord)> = records
            .iter()
            .map(|record| {
                let created = record
                    .created_on
                    .as_deref()
                    .and_then(|raw| parse_creation_time(raw, &self.timezone))
                    .map(|parsed| parsed.local);
                (created, record)
            })
            .collect();
        keyed.sort_by(|a, b| newest_first(&a.0, &b.0));

        keyed
            .into_iter()
            .skip(self.offset())
            .take(self.limit)
            .map(|(_, record)| record.clone())
            .collect()
    }
}
