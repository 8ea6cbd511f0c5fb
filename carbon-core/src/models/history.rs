use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Deserializer, Serialize};

/// A past estimate as stored by the backend.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HistoryEntry {
    #[serde(default)]
    pub id: Option<i64>,
    /// `"quick"` or `"detailed"`
    #[serde(default)]
    pub log_type: Option<String>,
    pub total_carbon: Decimal,
    #[serde(default, deserialize_with = "deserialize_breakdown")]
    pub breakdown: BTreeMap<String, Decimal>,
    #[serde(default)]
    pub created_at: Option<String>,
}

/// The backend stores the breakdown as a JSON column, so it may arrive either
/// as an object or as a JSON-encoded string.
fn deserialize_breakdown<'de, D>(deserializer: D) -> Result<BTreeMap<String, Decimal>, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Raw {
        Map(BTreeMap<String, Decimal>),
        Encoded(String),
        Null(()),
    }

    match Raw::deserialize(deserializer)? {
        Raw::Map(map) => Ok(map),
        Raw::Encoded(s) if s.trim().is_empty() => Ok(BTreeMap::new()),
        Raw::Encoded(s) => serde_json::from_str(&s).map_err(serde::de::Error::custom),
        Raw::Null(()) => Ok(BTreeMap::new()),
    }
}

impl HistoryEntry {
    /// Timestamp of the entry. The backend emits RFC 2822 dates; RFC 3339 is
    /// accepted as well.
    pub fn created_at_utc(&self) -> Option<DateTime<Utc>> {
        let raw = self.created_at.as_deref()?.trim();
        DateTime::parse_from_rfc2822(raw)
            .or_else(|_| DateTime::parse_from_rfc3339(raw))
            .map(|dt| dt.with_timezone(&Utc))
            .ok()
    }
}
