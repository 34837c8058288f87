//! Bounded-time JSON GET shared by all quote sources

use super::SourceError;
use reqwest::header::{ACCEPT, CACHE_CONTROL};
use reqwest::Client;
use serde_json::Value;
use std::time::Duration;

/// Default per-request bound
pub const DEFAULT_TIMEOUT: Duration = Duration::from_millis(5000);

/// Thin wrapper around a shared reqwest client
#[derive(Debug, Clone)]
pub struct HttpFetcher {
    client: Client,
    timeout: Duration,
}

impl HttpFetcher {
    /// Create a fetcher whose requests are bounded by `timeout`
    pub fn new(timeout: Duration) -> Result<Self, SourceError> {
        let client = Client::builder()
            .timeout(timeout)
            .user_agent(concat!("goldfeed/", env!("CARGO_PKG_VERSION")))
            .build()?;

        Ok(Self { client, timeout })
    }

    /// Per-request bound
    pub fn timeout(&self) -> Duration {
        self.timeout
    }

    /// GET `url` and return the parsed JSON body
    ///
    /// Non-success statuses, timeouts and non-JSON bodies all come back as
    /// `SourceError`; nothing here panics on upstream data.
    pub async fn get_json(&self, url: &str) -> Result<Value, SourceError> {
        tracing::trace!(url = %url, "GET");

        let response = self
            .client
            .get(url)
            .header(ACCEPT, "application/json")
            .header(CACHE_CONTROL, "no-cache")
            .send()
            .await
            .map_err(|e| self.classify(e))?;

        let status = response.status();
        if !status.is_success() {
            return Err(SourceError::Status(status));
        }

        let body = response.bytes().await.map_err(|e| self.classify(e))?;
        Ok(serde_json::from_slice(&body)?)
    }

    fn classify(&self, err: reqwest::Error) -> SourceError {
        if err.is_timeout() {
            SourceError::Timeout(self.timeout)
        } else {
            SourceError::Http(err)
        }
    }
}

/// Read a JSON value that may be a number or a numeric string
pub(crate) fn number_field(value: &Value, field: &'static str) -> Result<f64, SourceError> {
    match value.get(field) {
        Some(Value::Number(n)) => n.as_f64().ok_or(SourceError::MissingField(field)),
        Some(Value::String(s)) => s
            .trim()
            .parse::<f64>()
            .map_err(|_| SourceError::NotANumber {
                field,
                value: s.clone(),
            }),
        _ => Err(SourceError::MissingField(field)),
    }
}
