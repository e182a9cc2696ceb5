//! Lead record model and newtype wrappers for domain modeling.
//!
//! Field names on the wire follow the data store's column names
//! (`fonte`, `campanha`, `conjunto`, `anuncio`, `dispositivo`, `data_criacao`, ...).

use crate::utils::normalize_field;
use serde::{Deserialize, Deserializer, Serialize};
use std::fmt;

/// Identifier of the client (account owner) a lead belongs to.
///
/// The store exposes `user_id` as an integer column while tokens and filters
/// carry it as text, so both shapes deserialize into the same string form.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize)]
#[serde(transparent)]
pub struct ClientId(pub String);

impl ClientId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ClientId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<&str> for ClientId {
    fn from(value: &str) -> Self {
        Self(value.to_string())
    }
}

impl<'de> Deserialize<'de> for ClientId {
    fn deserialize<D>(deserializer: D) -> std::result::Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        #[derive(Deserialize)]
        #[serde(untagged)]
        enum RawClientId {
            Number(i64),
            Text(String),
        }

        Ok(match Option::<RawClientId>::deserialize(deserializer)? {
            Some(RawClientId::Number(n)) => ClientId(n.to_string()),
            Some(RawClientId::Text(s)) => ClientId(s),
            None => ClientId::default(),
        })
    }
}

/// Attribution and device columns of a lead that aggregators group by.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LeadField {
    /// `fonte`
    Source,
    /// `campanha`
    Campaign,
    /// `conjunto`
    AdSet,
    /// `anuncio`
    Ad,
    /// `palavra_chave`
    Keyword,
    /// `dispositivo`
    Device,
}

impl LeadField {
    /// Column name in the data store.
    pub fn column(self) -> &'static str {
        match self {
            Self::Source => "fonte",
            Self::Campaign => "campanha",
            Self::AdSet => "conjunto",
            Self::Ad => "anuncio",
            Self::Keyword => "palavra_chave",
            Self::Device => "dispositivo",
        }
    }
}

impl fmt::Display for LeadField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.column())
    }
}

/// One captured contact with its ad attribution and creation timestamp.
///
/// Records are read-only inputs: aggregators borrow slices of them and never
/// mutate or reorder the caller's data.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct LeadRecord {
    pub id: i64,
    #[serde(rename = "nome", default, deserialize_with = "null_as_empty")]
    pub name: String,
    #[serde(rename = "numero_de_telefone", default, deserialize_with = "null_as_empty")]
    pub phone: String,
    #[serde(rename = "user_id", default)]
    pub client_id: ClientId,
    #[serde(rename = "fonte", default)]
    pub source: Option<String>,
    #[serde(rename = "campanha", default)]
    pub campaign: Option<String>,
    #[serde(rename = "conjunto", default)]
    pub ad_set: Option<String>,
    #[serde(rename = "anuncio", default)]
    pub ad: Option<String>,
    #[serde(rename = "palavra_chave", default)]
    pub keyword: Option<String>,
    #[serde(default)]
    pub browser: Option<String>,
    #[serde(default)]
    pub location: Option<String>,
    #[serde(rename = "dispositivo", default)]
    pub device: Option<String>,
    #[serde(rename = "data_criacao", default)]
    pub created_on: Option<String>,
    #[serde(default)]
    pub created_at: Option<String>,
}

impl LeadRecord {
    /// Normalized value of a grouping column; `None` when absent or blank.
    pub fn field(&self, field: LeadField) -> Option<&str> {
        let raw = match field {
            LeadField::Source => &self.source,
            LeadField::Campaign => &self.campaign,
            LeadField::AdSet => &self.ad_set,
            LeadField::Ad => &self.ad,
            LeadField::Keyword => &self.keyword,
            LeadField::Device => &self.device,
        };
        normalize_field(raw.as_deref())
    }
}

fn null_as_empty<'de, D>(deserializer: D) -> std::result::Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<String>::deserialize(deserializer)?.unwrap_or_default())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_deserialize_store_row() {
        let json = r#"{
            "id": 42,
            "nome": "Maria",
            "numero_de_telefone": "+55 11 99999-0000",
            "user_id": 7,
            "fonte": "Google",
            "campanha": "Brand",
            "conjunto": null,
            "anuncio": "",
            "dispositivo": "Mobile",
            "data_criacao": "2024-01-01T10:00:00"
        }"#;

        let lead: LeadRecord = serde_json::from_str(json).unwrap();
        assert_eq!(lead.id, 42);
        assert_eq!(lead.client_id, ClientId::new("7"));
        assert_eq!(lead.field(LeadField::Source), Some("Google"));
        assert_eq!(lead.field(LeadField::AdSet), None);
        assert_eq!(lead.field(LeadField::Ad), None);
        assert_eq!(lead.field(LeadField::Keyword), None);
        assert_eq!(lead.created_on.as_deref(), Some("2024-01-01T10:00:00"));
    }

    #[test]
    fn test_deserialize_text_client_and_null_name() {
        let json = r#"{"id": 1, "nome": null, "user_id": "abc"}"#;
        let lead: LeadRecord = serde_json::from_str(json).unwrap();
        assert_eq!(lead.name, "");
        assert_eq!(lead.phone, "");
        assert_eq!(lead.client_id.as_str(), "abc");
        assert!(lead.device.is_none());
    }

    #[test]
    fn test_serialize_uses_column_names() {
        let lead = LeadRecord {
            id: 3,
            source: Some("Facebook".to_string()),
            client_id: ClientId::new("9"),
            ..LeadRecord::default()
        };
        let value = serde_json::to_value(&lead).unwrap();
        assert_eq!(value["fonte"], "Facebook");
        assert_eq!(value["user_id"], "9");
        assert!(value.get("source").is_none());
    }

    #[test]
    fn test_field_keeps_untrimmed_value() {
        let lead = LeadRecord {
            campaign: Some(" Brand ".to_string()),
            device: Some("   ".to_string()),
            ..LeadRecord::default()
        };
        assert_eq!(lead.field(LeadField::Campaign), Some(" Brand "));
        assert_eq!(lead.field(LeadField::Device), None);
    }

    #[test]
    fn test_lead_field_display() {
        assert_eq!(LeadField::AdSet.to_string(), "conjunto");
        assert_eq!(LeadField::Device.column(), "dispositivo");
    }
}
