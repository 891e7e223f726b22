//! YAML-backed configuration for the HTTP transport client.
//!
//! Expected shape:
//! ```yaml
//! http:
//!     timeout: 30
//!     connect_timeout: 10
//!     user_agent: "storefront-search/1.0"
//! ```
//! Timeouts belong to the transport client, not to the fetcher; the fetcher
//! itself enforces none.

use std::{fs, path::Path, time::Duration};

use serde::Deserialize;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("YAML parsing error: {0}")]
    YamlParse(#[from] serde_yaml::Error),
}

/// Read a YAML config file into a value callers can slice up.
pub fn load_config(path: impl AsRef<Path>) -> Result<serde_yaml::Value, ConfigError> {
    let content = fs::read_to_string(path)?;
    Ok(serde_yaml::from_str(&content)?)
}

/// Parameters for building the reqwest client behind [`crate::HttpTransport`].
#[derive(Debug, Clone, Deserialize)]
pub struct HttpClientParams {
    /// Whole-request timeout, seconds.
    pub timeout: u64,
    /// Connect timeout, seconds.
    pub connect_timeout: u64,
    pub user_agent: String,
}

impl HttpClientParams {
    /// Extract params from the `http:` mapping of a larger config.
    pub fn from_config(http_config: &serde_yaml::Value) -> Result<Self, ConfigError> {
        Ok(serde_yaml::from_value(http_config.clone())?)
    }
}

/// Build an HTTP client with rustls TLS, timeouts and user agent applied.
#[cfg(feature = "http")]
pub fn build_http_client(
    params: &HttpClientParams,
) -> Result<reqwest::Client, reqwest::Error> {
    reqwest::ClientBuilder::new()
        .use_rustls_tls()
        .timeout(Duration::from_secs(params.timeout))
        .connect_timeout(Duration::from_secs(params.connect_timeout))
        .user_agent(params.user_agent.as_str())
        .build()
}
