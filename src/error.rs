//! Error taxonomy for conversion rate lookups.

use crate::config::ApiVersion;
use thiserror::Error;

/// Failures a single rate lookup can produce.
///
/// Every kind is distinguishable by the caller, so a failed lookup can never
/// be mistaken for a plausible rate.
#[derive(Debug, Error)]
pub enum RateError {
    /// Transport-level failure: connect, DNS, timeout.
    #[error("request to {url} failed: {source}")]
    Network {
        url: String,
        #[source]
        source: reqwest::Error,
    },

    /// The upstream answered with a non-success HTTP status.
    #[error("unexpected HTTP status {status} from {url}")]
    UpstreamStatus {
        url: String,
        status: reqwest::StatusCode,
    },

    /// The response body could not be read to completion.
    #[error("failed to read response body from {url}: {source}")]
    BodyRead {
        url: String,
        #[source]
        source: reqwest::Error,
    },

    /// The body was not valid JSON for the selected API generation.
    #[error("failed to decode {version} response from {url}: {source}")]
    Decode {
        url: String,
        version: ApiVersion,
        #[source]
        source: serde_json::Error,
    },

    /// The destination code is absent from the returned rate table.
    #[error("no rate for {code} in the returned table")]
    MissingRate { code: String },
}
