//! HTTP JSON live-source adapter.
//!
//! Issues `GET {endpoint}?q={query}` and accepts either a bare JSON array of
//! items or an object wrapping one under `items` or `data`. Items are decoded
//! one at a time; a malformed item is skipped, the rest of the batch kept.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::header::{HeaderMap, HeaderName, HeaderValue};
use serde::Deserialize;
use tracing::{debug, warn};
use vantage_core::config::LiveSourceConfig;
use vantage_core::errors::{FetchError, VantageError, VantageResult};
use vantage_core::models::{LiveDataType, LiveItem};
use vantage_core::traits::ILiveSource;

#[derive(Deserialize)]
#[serde(untagged)]
enum Payload {
    Items(Vec<serde_json::Value>),
    Wrapped {
        #[serde(alias = "data")]
        items: Vec<serde_json::Value>,
    },
}

impl Payload {
    fn into_items(self, source_name: &str) -> Vec<LiveItem> {
        let raw = match self {
            Self::Items(items) | Self::Wrapped { items } => items,
        };
        raw.into_iter()
            .enumerate()
            .filter_map(|(index, value)| match serde_json::from_value::<LiveItem>(value) {
                Ok(item) => Some(item),
                Err(e) => {
                    warn!(source = %source_name, index, error = %e, "skipping malformed live item");
                    None
                }
            })
            .collect()
    }
}

pub struct HttpJsonSource {
    client: reqwest::Client,
    config: LiveSourceConfig,
}

impl HttpJsonSource {
    pub fn new(config: LiveSourceConfig) -> VantageResult<Self> {
        let mut headers = HeaderMap::new();
        for (name, value) in &config.headers {
            let name = HeaderName::from_bytes(name.as_bytes()).map_err(|e| {
                VantageError::configuration(format!("realtime.sources.{}", config.name), e.to_string())
            })?;
            let value = HeaderValue::from_str(value).map_err(|e| {
                VantageError::configuration(format!("realtime.sources.{}", config.name), e.to_string())
            })?;
            headers.insert(name, value);
        }

        let client = reqwest::Client::builder()
            .default_headers(headers)
            .build()
            .map_err(|e| VantageError::configuration("realtime", e.to_string()))?;

        Ok(Self { client, config })
    }
}

#[async_trait]
impl ILiveSource for HttpJsonSource {
    fn name(&self) -> &str {
        &self.config.name
    }

    fn data_type(&self) -> LiveDataType {
        self.config.data_type
    }

    fn priority(&self) -> f64 {
        self.config.priority
    }

    fn quota(&self) -> u32 {
        self.config.rate_limit
    }

    fn timeout(&self) -> Duration {
        Duration::from_secs(self.config.effective_timeout_secs())
    }

    async fn fetch(&self, query: &str) -> VantageResult<Vec<LiveItem>> {
        let source_name = self.config.name.clone();
        let response = self
            .client
            .get(&self.config.endpoint)
            .query(&[("q", query)])
            .send()
            .await
            .map_err(|e| FetchError::RequestFailed {
                source_name: source_name.clone(),
                reason: e.to_string(),
            })?;

        let status = response.status();
        if !status.is_success() {
            return Err(FetchError::BadStatus {
                source_name,
                status: status.as_u16(),
            }
            .into());
        }

        let payload: Payload = response.json().await.map_err(|e| FetchError::DecodeFailed {
            source_name: source_name.clone(),
            reason: e.to_string(),
        })?;
        let items = payload.into_items(&source_name);
        debug!(source = %source_name, items = items.len(), "live source responded");
        Ok(items)
    }
}
