//! Environment-variable configuration for the rate fetcher.

use std::env;
use std::fmt;
use tracing::warn;

/// Upstream API generation. The v6 API requires a key; v4 is keyless.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ApiVersion {
    V4,
    V6,
}

impl ApiVersion {
    /// Map a version string to an API generation. Exactly `"v6"` selects the
    /// keyed v6 API; an empty value keeps the historical v4 default.
    pub fn parse(value: &str) -> Self {
        match value {
            "v6" => ApiVersion::V6,
            "" | "v4" => ApiVersion::V4,
            other => {
                warn!("Unknown API_VERSION '{other}', falling back to v4");
                ApiVersion::V4
            }
        }
    }
}

impl fmt::Display for ApiVersion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ApiVersion::V4 => f.write_str("v4"),
            ApiVersion::V6 => f.write_str("v6"),
        }
    }
}

#[derive(Clone)]
pub struct AppConfig {
    pub api_key: String,
    pub version: ApiVersion,
    pub source: String,
    pub dest: String,
}

// Keeps the API key out of debug logs.
impl fmt::Debug for AppConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AppConfig")
            .field("api_key", &"<redacted>")
            .field("version", &self.version)
            .field("source", &self.source)
            .field("dest", &self.dest)
            .finish()
    }
}

impl AppConfig {
    /// Read `API_KEY`, `API_VERSION`, `CURRENCY_SOURCE` and `CURRENCY_DEST`.
    /// Unset or empty variables take their defaults.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| env::var(key).ok())
    }

    fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str, default: &str| {
            lookup(key)
                .filter(|value| !value.is_empty())
                .unwrap_or_else(|| default.to_string())
        };

        AppConfig {
            api_key: get("API_KEY", "API-KEY"),
            version: ApiVersion::parse(&get("API_VERSION", "v4")),
            source: get("CURRENCY_SOURCE", "GBP"),
            dest: get("CURRENCY_DEST", "USD"),
        }
    }
}
