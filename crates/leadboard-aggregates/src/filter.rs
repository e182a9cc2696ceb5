//! Filter values mirroring the dashboard filter bar
//!
//! The aggregators never filter; these types describe what a lead source
//! should return and carry the matching rules used by in-memory sources.

use chrono::{Duration, NaiveDate};
use chrono_tz::Tz;
use leadboard_common::{bail, parse_creation_time, ClientId, LeadField, LeadRecord, Result};
use serde::{Deserialize, Serialize};

/// Inclusive calendar-date window; either end may be open.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DateRange {
    from: Option<NaiveDate>,
    to: Option<NaiveDate>,
}

impl DateRange {
    /// Build a range, rejecting `from` after `to`.
    pub fn new(from: Option<NaiveDate>, to: Option<NaiveDate>) -> Result<Self> {
        if let (Some(start), Some(end)) = (from, to) {
            if start > end {
                bail!(validation: "date range starts on {} after it ends on {}", start, end);
            }
        }
        Ok(Self { from, to })
    }

    /// Range open on both ends.
    pub fn unbounded() -> Self {
        Self::default()
    }

    pub fn from(&self) -> Option<NaiveDate> {
        self.from
    }

    pub fn to(&self) -> Option<NaiveDate> {
        self.to
    }

    pub fn is_bounded(&self) -> bool {
        self.from.is_some() || self.to.is_some()
    }

    pub fn contains(&self, date: NaiveDate) -> bool {
        self.from.map_or(true, |from| date >= from) && self.to.map_or(true, |to| date <= to)
    }

    /// Number of days covered when both ends are set.
    pub fn days(&self) -> Option<u32> {
        match (self.from, self.to) {
            (Some(from), Some(to)) => u32::try_from((to - from).num_days() + 1).ok(),
            _ => None,
        }
    }

    /// The equally long window ending the day before `from`.
    pub fn previous(&self) -> Option<Self> {
        let (from, days) = (self.from?, self.days()?);
        let to = from.checked_sub_signed(Duration::days(1))?;
        let start = to.checked_sub_signed(Duration::days(i64::from(days) - 1))?;
        Some(Self {
            from: Some(start),
            to: Some(to),
        })
    }
}

/// Immutable selection applied by a lead source before aggregation.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LeadFilter {
    pub client_id: Option<ClientId>,
    pub date_range: DateRange,
    pub fonte: Option<String>,
    pub campanha: Option<String>,
    pub conjunto: Option<String>,
    pub anuncio: Option<String>,
    pub search: Option<String>,
}

impl LeadFilter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_client(mut self, client_id: impl Into<String>) -> Self {
        self.client_id = Some(ClientId::new(client_id));
        self
    }

    pub fn with_date_range(mut self, date_range: DateRange) -> Self {
        self.date_range = date_range;
        self
    }

    /// Set the exact-match selection for one attribution tier.
    ///
    /// Fields outside the four tiers are ignored.
    pub fn with_selection(mut self, field: LeadField, value: impl Into<String>) -> Self {
        let value = Some(value.into());
        match field {
            LeadField::Source => self.fonte = value,
            LeadField::Campaign => self.campanha = value,
            LeadField::AdSet => self.conjunto = value,
            LeadField::Ad => self.anuncio = value,
            LeadField::Keyword | LeadField::Device => {}
        }
        self
    }

    pub fn with_search(mut self, search: impl Into<String>) -> Self {
        self.search = Some(search.into());
        self
    }

    /// Whether `record` passes every set criterion, dates read in `timezone`.
    pub fn matches(&self, record: &LeadRecord, timezone: &Tz) -> bool {
        if let Some(client) = &self.client_id {
            if &record.client_id != client {
                return false;
            }
        }

        if self.date_range.is_bounded() {
            let local_date = record
                .created_on
                .as_deref()
                .and_then(|raw| parse_creation_time(raw, timezone))
                .map(|parsed| parsed.local_date());
            match local_date {
                Some(date) if self.date_range.contains(date) => {}
                _ => return false,
            }
        }

        let selections = [
            (&self.fonte, &record.source),
            (&self.campanha, &record.campaign),
            (&self.conjunto, &record.ad_set),
            (&self.anuncio, &record.ad),
        ];
        for (selected, actual) in selections {
            if let Some(selected) = selected {
                if actual.as_deref() != Some(selected.as_str()) {
                    return false;
                }
            }
        }

        match self.search.as_deref().map(str::trim) {
            Some(term) if !term.is_empty() => {
                let needle = term.to_lowercase();
                record.name.to_lowercase().contains(&needle)
                    || record.phone.to_lowercase().contains(&needle)
            }
            _ => true,
        }
    }

    /// Same filter over the preceding period of equal length.
    pub fn previous_period(&self) -> Option<Self> {
        Some(Self {
            date_range: self.date_range.previous()?,
            ..self.clone()
        })
    }
}
