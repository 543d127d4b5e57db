use std::str::FromStr;
use std::time::Duration;

/// One-shot failures the fake injects to exercise client error paths.
///
/// Each enabled fault fires on the first matching request only.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct FaultPlan {
    /// First `GET /api/list` answers 500 with a maintenance error envelope.
    pub fail_first_list: bool,
    /// First `GET /api/cart` aborts the connection without a usable body.
    pub drop_first_cart_read: bool,
}

impl FaultPlan {
    pub fn none() -> Self {
        Self::default()
    }

    pub fn all() -> Self {
        Self {
            fail_first_list: true,
            drop_first_cart_read: true,
        }
    }
}

impl FromStr for FaultPlan {
    type Err = ConfigError;

    /// Parse a comma-separated list of `list`, `cart`, `all` or `none`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut plan = FaultPlan::none();
        for part in s.split(',').map(str::trim).filter(|p| !p.is_empty()) {
            match part {
                "list" => plan.fail_first_list = true,
                "cart" => plan.drop_first_cart_read = true,
                "all" => plan = FaultPlan::all(),
                "none" => plan = FaultPlan::none(),
                other => {
                    return Err(ConfigError::Invalid {
                        var: "FAKE_FAULTS",
                        value: other.to_string(),
                    })
                }
            }
        }
        Ok(plan)
    }
}

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("{var} has an invalid value: {value}")]
    Invalid { var: &'static str, value: String },
}

/// Fake backend configuration.
///
/// [`Default`] is what tests want: ephemeral port, no latency, no faults.
/// [`FakeConfig::from_env`] mirrors the interactive demo setup instead.
#[derive(Debug, Clone)]
pub struct FakeConfig {
    /// Bind address.
    pub host: String,
    /// Bind port (`0` picks an ephemeral port).
    pub port: u16,
    /// Artificial latency applied to read endpoints.
    pub read_delay: Duration,
    /// Artificial latency applied to the cart write endpoint.
    pub write_delay: Duration,
    /// Faults to inject.
    pub faults: FaultPlan,
    /// Allowed CORS origins.
    pub cors_origins: Vec<String>,
}

impl Default for FakeConfig {
    fn default() -> Self {
        Self {
            host: "127.0.0.1".into(),
            port: 0,
            read_delay: Duration::ZERO,
            write_delay: Duration::ZERO,
            faults: FaultPlan::none(),
            cors_origins: Vec::new(),
        }
    }
}

impl FakeConfig {
    /// Load configuration from environment variables with defaults.
    ///
    /// | Env Var               | Default                 |
    /// |-----------------------|-------------------------|
    /// | `FAKE_HOST`           | `127.0.0.1`             |
    /// | `FAKE_PORT`           | `5173`                  |
    /// | `FAKE_READ_DELAY_MS`  | `1200`                  |
    /// | `FAKE_WRITE_DELAY_MS` | `8000`                  |
    /// | `FAKE_FAULTS`         | `list,cart`             |
    /// | `CORS_ORIGINS`        | `http://localhost:5173` |
    pub fn from_env() -> Result<Self, ConfigError> {
        let host = std::env::var("FAKE_HOST").unwrap_or_else(|_| "127.0.0.1".into());
        let port = parse_var("FAKE_PORT", "5173")?;
        let read_delay = Duration::from_millis(parse_var("FAKE_READ_DELAY_MS", "1200")?);
        let write_delay = Duration::from_millis(parse_var("FAKE_WRITE_DELAY_MS", "8000")?);
        let faults = parse_var("FAKE_FAULTS", "list,cart")?;

        let cors_origins: Vec<String> = std::env::var("CORS_ORIGINS")
            .unwrap_or_else(|_| "http://localhost:5173".into())
            .split(',')
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .collect();

        Ok(Self {
            host,
            port,
            read_delay,
            write_delay,
            faults,
            cors_origins,
        })
    }
}

fn parse_var<T: FromStr>(var: &'static str, default: &str) -> Result<T, ConfigError> {
    let value = std::env::var(var).unwrap_or_else(|_| default.into());
    value
        .parse()
        .map_err(|_| ConfigError::Invalid { var, value })
}
