use async_trait::async_trait;
use chrono::{DateTime, TimeZone, Utc};
use serde::Deserialize;
use std::collections::HashMap;
use tracing::{debug, warn};

use crate::config::{ApiVersion, AppConfig};
use crate::currency_provider::CurrencyRateProvider;
use crate::error::RateError;

const V4_BASE_URL: &str = "https://api.exchangerate-api.com/v4";
const V6_BASE_URL: &str = "https://v6.exchangerate-api.com/v6";

/// Client for the exchangerate-api.com `latest` endpoint.
///
/// One instance serves one API generation. The v6 key is baked into the base
/// URL at construction and never appears anywhere else in the request; v4
/// ignores the key entirely. The destination code is never sent upstream:
/// one GET returns the full rate table for the source code, and the
/// destination is resolved locally by table lookup.
pub struct ExchangeRateApiProvider {
    base_url: String,
    version: ApiVersion,
}

impl ExchangeRateApiProvider {
    pub fn new(api_key: &str, version: ApiVersion) -> Self {
        let base_url = match version {
            ApiVersion::V6 => format!("{V6_BASE_URL}/{api_key}"),
            ApiVersion::V4 => V4_BASE_URL.to_string(),
        };
        ExchangeRateApiProvider { base_url, version }
    }

    /// Point the provider at an alternate deployment of the API.
    pub fn with_base_url(base_url: &str, version: ApiVersion) -> Self {
        ExchangeRateApiProvider {
            base_url: base_url.to_string(),
            version,
        }
    }

    pub fn from_config(config: &AppConfig) -> Self {
        Self::new(&config.api_key, config.version)
    }
}

#[derive(Debug, Deserialize)]
struct ApiV4Response {
    base: String,
    date: Option<String>,
    time_last_updated: Option<i64>,
    rates: HashMap<String, f64>,
}

#[derive(Debug, Deserialize)]
struct ApiV6Response {
    result: String,
    base_code: String,
    time_last_update_unix: Option<i64>,
    time_last_update_utc: Option<String>,
    time_next_update_unix: Option<i64>,
    time_next_update_utc: Option<String>,
    conversion_rates: HashMap<String, f64>,
}

fn from_unix(unix: Option<i64>) -> Option<DateTime<Utc>> {
    unix.and_then(|secs| Utc.timestamp_opt(secs, 0).single())
}

#[async_trait]
impl CurrencyRateProvider for ExchangeRateApiProvider {
    async fn get_rate(&self, from: &str, to: &str) -> Result<f64, RateError> {
        let url = format!("{}/latest/{}", self.base_url, from);
        debug!("Requesting conversion rates from {}", url);

        let client = reqwest::Client::builder()
            .user_agent("fxrate/0.1")
            .build()
            .map_err(|e| RateError::Network {
                url: url.clone(),
                source: e,
            })?;

        let response = client
            .get(&url)
            .send()
            .await
            .map_err(|e| RateError::Network {
                url: url.clone(),
                source: e,
            })?;

        let status = response.status();
        if !status.is_success() {
            return Err(RateError::UpstreamStatus { url, status });
        }

        let body = response.text().await.map_err(|e| RateError::BodyRead {
            url: url.clone(),
            source: e,
        })?;

        // Exactly one of the two shapes is decoded per call, selected solely
        // by the configured version.
        let rates = match self.version {
            ApiVersion::V4 => {
                let decoded: ApiV4Response =
                    serde_json::from_str(&body).map_err(|e| RateError::Decode {
                        url: url.clone(),
                        version: self.version,
                        source: e,
                    })?;
                debug!(
                    base = %decoded.base,
                    date = ?decoded.date,
                    updated = ?from_unix(decoded.time_last_updated),
                    "Decoded v4 rate table"
                );
                decoded.rates
            }
            ApiVersion::V6 => {
                let decoded: ApiV6Response =
                    serde_json::from_str(&body).map_err(|e| RateError::Decode {
                        url: url.clone(),
                        version: self.version,
                        source: e,
                    })?;
                if decoded.result != "success" {
                    warn!(
                        result = %decoded.result,
                        "Upstream reported a non-success result for {}",
                        decoded.base_code
                    );
                }
                debug!(
                    base = %decoded.base_code,
                    updated = ?from_unix(decoded.time_last_update_unix),
                    updated_utc = ?decoded.time_last_update_utc,
                    next_update = ?from_unix(decoded.time_next_update_unix),
                    next_update_utc = ?decoded.time_next_update_utc,
                    "Decoded v6 rate table"
                );
                decoded.conversion_rates
            }
        };

        rates
            .get(to)
            .copied()
            .ok_or_else(|| RateError::MissingRate {
                code: to.to_string(),
            })
    }
}
