use crate::analytics::bottleneck::{validate_top_n, RangePolicy, ReportOptions, DEFAULT_TOP_N};
use std::env;
use std::fmt;
use std::net::{IpAddr, SocketAddr};

/// Distinguishes runtime behavior for different stages of the service.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AppEnvironment {
    Development,
    Test,
    Production,
}

impl AppEnvironment {
    fn from_str(value: &str) -> Self {
        match value.trim().to_ascii_lowercase().as_str() {
            "prod" | "production" => Self::Production,
            "test" | "ci" => Self::Test,
            _ => Self::Development,
        }
    }
}

/// Top-level configuration for the application.
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub environment: AppEnvironment,
    pub server: ServerConfig,
    pub telemetry: TelemetryConfig,
    pub scoring: ScoringConfig,
}

impl AppConfig {
    pub fn load() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();

        let environment = AppEnvironment::from_str(
            &env::var("APP_ENV").unwrap_or_else(|_| "development".to_string()),
        );

        let host = env::var("APP_HOST").unwrap_or_else(|_| "127.0.0.1".to_string());
        let port = env::var("APP_PORT")
            .unwrap_or_else(|_| "3000".to_string())
            .parse::<u16>()
            .map_err(|_| ConfigError::InvalidPort)?;

        let log_level = env::var("APP_LOG_LEVEL").unwrap_or_else(|_| "info".to_string());

        let top_n = match env::var("ZEPHYRUS_TOP_N") {
            Ok(raw) => raw
                .trim()
                .parse::<usize>()
                .ok()
                .and_then(|value| validate_top_n(value).ok())
                .ok_or(ConfigError::InvalidTopN)?,
            Err(_) => DEFAULT_TOP_N,
        };
        let range_policy = match env::var("ZEPHYRUS_RANGE_POLICY") {
            Ok(raw) => raw
                .parse::<RangePolicy>()
                .map_err(|_| ConfigError::InvalidRangePolicy { value: raw })?,
            Err(_) => RangePolicy::default(),
        };

        Ok(Self {
            environment,
            server: ServerConfig { host, port },
            telemetry: TelemetryConfig { log_level },
            scoring: ScoringConfig {
                top_n,
                range_policy,
            },
        })
    }
}

/// Settings controlling the HTTP server binding.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

impl ServerConfig {
    pub fn socket_addr(&self) -> Result<SocketAddr, ConfigError> {
        if self.host.eq_ignore_ascii_case("localhost") {
            return Ok(SocketAddr::new(IpAddr::from([127, 0, 0, 1]), self.port));
        }

        let ip: IpAddr = self
            .host
            .parse()
            .map_err(|source| ConfigError::InvalidHost { source })?;

        Ok(SocketAddr::new(ip, self.port))
    }
}

/// Tracing and metrics controls.
#[derive(Debug, Clone)]
pub struct TelemetryConfig {
    pub log_level: String,
}

/// Defaults applied to every bottleneck ranking unless a request overrides them.
#[derive(Debug, Clone, Copy)]
pub struct ScoringConfig {
    pub top_n: usize,
    pub range_policy: RangePolicy,
}

impl ScoringConfig {
    pub fn report_options(&self) -> ReportOptions {
        ReportOptions {
            top_n: self.top_n,
            range_policy: self.range_policy,
            hour: None,
        }
    }
}

#[derive(Debug)]
pub enum ConfigError {
    InvalidPort,
    InvalidHost { source: std::net::AddrParseError },
    InvalidTopN,
    InvalidRangePolicy { value: String },
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::InvalidPort => write!(f, "APP_PORT must be a valid u16"),
            ConfigError::InvalidHost { .. } => {
                write!(f, "APP_HOST must parse to an IPv4 or IPv6 address")
            }
            ConfigError::InvalidTopN => write!(f, "ZEPHYRUS_TOP_N must be a positive integer"),
            ConfigError::InvalidRangePolicy { value } => write!(
                f,
                "ZEPHYRUS_RANGE_POLICY '{}' must be reject, clamp, or pass-through",
                value
            ),
        }
    }
}

impl std::error::Error for ConfigError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ConfigError::InvalidHost { source } => Some(source),
            ConfigError::InvalidPort
            | ConfigError::InvalidTopN
            | ConfigError::InvalidRangePolicy { .. } => None,
        }
    }
}

/// Serializes tests that mutate process environment variables.
#[cfg(test)]
pub(crate) fn env_guard() -> &'static std::sync::Mutex<()> {
    static GUARD: std::sync::OnceLock<std::sync::Mutex<()>> = std::sync::OnceLock::new();
    GUARD.get_or_init(|| std::sync::Mutex::new(()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::env;

    fn reset_env() {
        env::remove_var("APP_ENV");
        env::remove_var("APP_HOST");
        env::remove_var("APP_PORT");
        env::remove_var("APP_LOG_LEVEL");
        env::remove_var("ZEPHYRUS_TOP_N");
        env::remove_var("ZEPHYRUS_RANGE_POLICY");
    }

    #[test]
    fn load_uses_defaults_when_env_missing() {
        let _lock = env_guard().lock().expect("env mutex poisoned");
        reset_env();
        let config = AppConfig::load().expect("config loads with defaults");
        assert_eq!(config.environment, AppEnvironment::Development);
        assert_eq!(config.server.host, "127.0.0.1");
        assert_eq!(config.server.port, 3000);
        assert_eq!(config.telemetry.log_level, "info");
        assert_eq!(config.scoring.top_n, 5);
        assert_eq!(config.scoring.range_policy, RangePolicy::Reject);
    }

    #[test]
    fn accepts_localhost_host() {
        let _lock = env_guard().lock().expect("env mutex poisoned");
        reset_env();
        env::set_var("APP_HOST", "localhost");
        let config = AppConfig::load().expect("config loads");
        let addr = config.server.socket_addr().expect("localhost resolves");
        assert_eq!(addr, SocketAddr::new(IpAddr::from([127, 0, 0, 1]), 3000));
    }

    #[test]
    fn scoring_overrides_are_parsed() {
        let _lock = env_guard().lock().expect("env mutex poisoned");
        reset_env();
        env::set_var("ZEPHYRUS_TOP_N", "3");
        env::set_var("ZEPHYRUS_RANGE_POLICY", "clamp");
        let config = AppConfig::load().expect("config loads");
        assert_eq!(config.scoring.top_n, 3);
        assert_eq!(config.scoring.range_policy, RangePolicy::Clamp);
    }

    #[test]
    fn rejects_zero_top_n_and_unknown_policy() {
        let _lock = env_guard().lock().expect("env mutex poisoned");
        reset_env();
        env::set_var("ZEPHYRUS_TOP_N", "0");
        assert!(matches!(AppConfig::load(), Err(ConfigError::InvalidTopN)));

        reset_env();
        env::set_var("ZEPHYRUS_RANGE_POLICY", "ignore");
        assert!(matches!(
            AppConfig::load(),
            Err(ConfigError::InvalidRangePolicy { .. })
        ));
        reset_env();
    }
}
