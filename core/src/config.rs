//! Gateway configuration: where the API lives and how the transport talks to it.
//!
//! `GatewayConfig` deserializes from whatever configuration format the host
//! application already uses, or can be read from the environment.

use std::time::Duration;

use serde::{Deserialize, Serialize};

pub const BASE_URL_VAR: &str = "RECORDS_API_URL";
pub const TIMEOUT_VAR: &str = "RECORDS_API_TIMEOUT_MS";

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("environment variable {0} is not set")]
    MissingVar(&'static str),

    #[error("{var} must be a whole number of milliseconds, got {value:?}")]
    InvalidTimeout {
        var: &'static str,
        value: String,
        #[source]
        source: std::num::ParseIntError,
    },
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GatewayConfig {
    pub base_url: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub timeout_ms: Option<u64>,
    /// Sent with every request by transports that support default headers.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub default_headers: Vec<(String, String)>,
}

impl GatewayConfig {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            timeout_ms: None,
            default_headers: Vec::new(),
        }
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout_ms = Some(u64::try_from(timeout.as_millis()).unwrap_or(u64::MAX));
        self
    }

    pub fn with_header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.default_headers.push((name.into(), value.into()));
        self
    }

    pub fn timeout(&self) -> Option<Duration> {
        self.timeout_ms.map(Duration::from_millis)
    }

    /// Read `RECORDS_API_URL` and, optionally, `RECORDS_API_TIMEOUT_MS`.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|var| std::env::var(var).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let base_url = lookup(BASE_URL_VAR).ok_or(ConfigError::MissingVar(BASE_URL_VAR))?;
        let timeout_ms = lookup(TIMEOUT_VAR)
            .map(|value| {
                value
                    .trim()
                    .parse::<u64>()
                    .map_err(|source| ConfigError::InvalidTimeout {
                        var: TIMEOUT_VAR,
                        value,
                        source,
                    })
            })
            .transpose()?;
        Ok(Self {
            base_url,
            timeout_ms,
            default_headers: Vec::new(),
        })
    }
}
