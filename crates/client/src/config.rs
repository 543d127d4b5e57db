use std::time::Duration;

use reqwest::Url;

/// Client configuration loaded from environment variables.
#[derive(Debug, Clone)]
pub struct ClientConfig {
    /// Origin the `/api/...` paths are resolved against.
    pub base_url: Url,
    /// Per-request timeout applied to the HTTP client.
    pub request_timeout: Duration,
}

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("{var} has an invalid value: {value}")]
    Invalid { var: &'static str, value: String },
}

impl ClientConfig {
    pub fn new(base_url: Url) -> Self {
        Self {
            base_url,
            request_timeout: Duration::from_secs(30),
        }
    }

    /// Load configuration from environment variables with defaults.
    ///
    /// | Env Var                       | Default                 |
    /// |-------------------------------|-------------------------|
    /// | `GROCER_API_URL`              | `http://localhost:5173` |
    /// | `GROCER_REQUEST_TIMEOUT_SECS` | `30`                    |
    pub fn from_env() -> Result<Self, ConfigError> {
        let raw_url =
            std::env::var("GROCER_API_URL").unwrap_or_else(|_| "http://localhost:5173".into());
        let base_url = Url::parse(&raw_url).map_err(|_| ConfigError::Invalid {
            var: "GROCER_API_URL",
            value: raw_url.clone(),
        })?;

        let timeout =
            std::env::var("GROCER_REQUEST_TIMEOUT_SECS").unwrap_or_else(|_| "30".into());
        let request_timeout_secs: u64 = timeout.parse().map_err(|_| ConfigError::Invalid {
            var: "GROCER_REQUEST_TIMEOUT_SECS",
            value: timeout.clone(),
        })?;

        Ok(Self {
            base_url,
            request_timeout: Duration::from_secs(request_timeout_secs),
        })
    }

    /// Build a [`reqwest::Client`] honouring the configured timeout.
    pub fn http_client(&self) -> Result<reqwest::Client, reqwest::Error> {
        reqwest::Client::builder()
            .timeout(self.request_timeout)
            .build()
    }
}
