use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize};

/// Category of a live-data feed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LiveDataType {
    Market,
    News,
    Company,
}

impl LiveDataType {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Market => "market",
            Self::News => "news",
            Self::Company => "company",
        }
    }
}

/// One item returned by a live-data source.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LiveItem {
    pub id: String,
    #[serde(default)]
    pub title: String,
    pub content: String,
    /// Human-readable feed label, e.g. "RealTime Market Data".
    #[serde(default)]
    pub source: String,
    /// RFC 3339 string or epoch milliseconds on the wire.
    #[serde(default, deserialize_with = "flexible_timestamp")]
    pub timestamp: Option<DateTime<Utc>>,
    /// Relevance supplied by the source; computed by the fetcher when absent.
    #[serde(default, alias = "relevanceScore")]
    pub relevance: Option<f64>,
    #[serde(default)]
    pub metadata: BTreeMap<String, serde_json::Value>,
}

fn flexible_timestamp<'de, D>(deserializer: D) -> Result<Option<DateTime<Utc>>, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Raw {
        Millis(i64),
        Text(String),
    }

    match Option::<Raw>::deserialize(deserializer)? {
        None => Ok(None),
        Some(Raw::Millis(ms)) => DateTime::from_timestamp_millis(ms)
            .map(Some)
            .ok_or_else(|| serde::de::Error::custom(format!("timestamp {ms} out of range"))),
        Some(Raw::Text(text)) => DateTime::parse_from_rfc3339(&text)
            .map(|dt| Some(dt.with_timezone(&Utc)))
            .map_err(serde::de::Error::custom),
    }
}
