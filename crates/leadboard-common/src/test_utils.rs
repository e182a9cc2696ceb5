//! Test utilities and shared fixtures for the Leadboard workspace.
//!
//! Enabled for dependents through the `testing` feature.

use crate::{ClientId, LeadRecord};
use std::sync::Once;
use tracing_subscriber::{fmt, EnvFilter};

static INIT: Once = Once::new();

/// Initialize logging for tests once per test binary.
pub fn init_test_logging() {
    INIT.call_once(|| {
        let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("debug"));
        let _ = fmt().with_test_writer().with_env_filter(filter).try_init();
    });
}

/// Builder for lead records with sensible defaults.
#[derive(Debug, Clone, Default)]
pub struct LeadBuilder {
    record: LeadRecord,
}

impl LeadBuilder {
    pub fn new(id: i64) -> Self {
        Self {
            record: LeadRecord {
                id,
                name: format!("Lead {id}"),
                phone: format!("+55 11 9{id:04}-0000"),
                client_id: ClientId::new("1"),
                ..LeadRecord::default()
            },
        }
    }

    pub fn name(mut self, name: &str) -> Self {
        self.record.name = name.to_string();
        self
    }

    pub fn phone(mut self, phone: &str) -> Self {
        self.record.phone = phone.to_string();
        self
    }

    pub fn client(mut self, client: &str) -> Self {
        self.record.client_id = ClientId::new(client);
        self
    }

    pub fn source(mut self, value: &str) -> Self {
        self.record.source = Some(value.to_string());
        self
    }

    pub fn campaign(mut self, value: &str) -> Self {
        self.record.campaign = Some(value.to_string());
        self
    }

    pub fn ad_set(mut self, value: &str) -> Self {
        self.record.ad_set = Some(value.to_string());
        self
    }

    pub fn ad(mut self, value: &str) -> Self {
        self.record.ad = Some(value.to_string());
        self
    }

    pub fn device(mut self, value: &str) -> Self {
        self.record.device = Some(value.to_string());
        self
    }

    pub fn created(mut self, value: &str) -> Self {
        self.record.created_on = Some(value.to_string());
        self
    }

    /// Set all four attribution tiers at once.
    pub fn funnel(self, source: &str, campaign: &str, ad_set: &str, ad: &str) -> Self {
        self.source(source).campaign(campaign).ad_set(ad_set).ad(ad)
    }

    pub fn build(self) -> LeadRecord {
        self.record
    }
}

/// Shorthand for a fully attributed lead.
pub fn lead(id: i64, funnel: [&str; 4], created: &str) -> LeadRecord {
    LeadBuilder::new(id)
        .funnel(funnel[0], funnel[1], funnel[2], funnel[3])
        .created(created)
        .build()
}

/// A small mixed data set: two sources, repeated campaigns, one organic lead,
/// one lead with missing attribution and one with a malformed timestamp.
pub fn sample_leads() -> Vec<LeadRecord> {
    vec![
        LeadBuilder::new(1)
            .funnel("Google", "Brand", "Desktop", "Banner A")
            .device("Desktop")
            .created("2024-01-01T10:00:00")
            .build(),
        LeadBuilder::new(2)
            .funnel("Google", "Brand", "Mobile", "Video 01")
            .device("Mobile")
            .created("2024-01-01T18:30:00")
            .build(),
        LeadBuilder::new(3)
            .funnel("Facebook", "Retargeting", "Mobile", "Carousel")
            .device("Mobile")
            .created("2024-01-02T09:15:00")
            .build(),
        LeadBuilder::new(4)
            .source("Orgânico")
            .device("Mobile")
            .created("2024-01-03T12:00:00")
            .build(),
        LeadBuilder::new(5).created("2024-01-06T08:00:00").build(),
        LeadBuilder::new(6)
            .funnel("Facebook", "Brand", "Mixed", "Banner A")
            .device("Tablet")
            .created("not a date")
            .build(),
    ]
}
