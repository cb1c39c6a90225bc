//! Server configuration management.
//!
//! Consolidates all environment variable reads and provides validated configuration.

use connect4::GameConfig;
use std::net::{Ipv4Addr, SocketAddr};

/// Default HTTP port.
pub const DEFAULT_PORT: u16 = 5000;

/// Complete server configuration loaded from environment variables
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// HTTP bind address
    pub bind: SocketAddr,
    /// Prometheus scrape address; metrics are not exported when unset
    pub metrics_bind: Option<SocketAddr>,
    /// Game service configuration
    pub game: GameConfig,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind: SocketAddr::from((Ipv4Addr::LOCALHOST, DEFAULT_PORT)),
            metrics_bind: None,
            game: GameConfig::default(),
        }
    }
}

impl ServerConfig {
    /// Load configuration from environment variables
    ///
    /// # Arguments
    ///
    /// * `bind_override` - Optional bind address override (from CLI args)
    /// * `metrics_bind_override` - Optional metrics address override (from CLI args)
    /// * `inbox_capacity_override` - Optional game inbox capacity override (from CLI args)
    ///
    /// # Errors
    ///
    /// Returns error if a variable is set but cannot be parsed
    pub fn from_env(
        bind_override: Option<SocketAddr>,
        metrics_bind_override: Option<SocketAddr>,
        inbox_capacity_override: Option<usize>,
    ) -> Result<Self, ConfigError> {
        let defaults = Self::default();

        let bind = match bind_override {
            Some(bind) => bind,
            None => parse_env("SERVER_BIND")?.unwrap_or(defaults.bind),
        };

        let metrics_bind = match metrics_bind_override {
            Some(addr) => Some(addr),
            None => parse_env("METRICS_BIND")?,
        };

        let inbox_capacity = match inbox_capacity_override {
            Some(capacity) => capacity,
            None => parse_env("GAME_INBOX_CAPACITY")?.unwrap_or(defaults.game.inbox_capacity),
        };

        Ok(ServerConfig {
            bind,
            metrics_bind,
            game: GameConfig { inbox_capacity },
        })
    }

    /// Validate configuration after loading
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.game
            .validate()
            .map_err(|reason| ConfigError::Invalid {
                var: "GAME_INBOX_CAPACITY".to_string(),
                reason,
            })?;

        if self.metrics_bind == Some(self.bind) {
            return Err(ConfigError::Invalid {
                var: "METRICS_BIND".to_string(),
                reason: format!("Must differ from the server bind address ({})", self.bind),
            });
        }

        Ok(())
    }
}

/// Configuration error types
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Invalid configuration for {var}: {reason}")]
    Invalid { var: String, reason: String },
}

/// Parse an optional environment variable. Unset is `None`; set but
/// unparsable is an error.
fn parse_env<T>(key: &str) -> Result<Option<T>, ConfigError>
where
    T: std::str::FromStr,
    T::Err: std::fmt::Display,
{
    match std::env::var(key) {
        Ok(value) => value
            .trim()
            .parse()
            .map(Some)
            .map_err(|e: T::Err| ConfigError::Invalid {
                var: key.to_string(),
                reason: format!("{value:?}: {e}"),
            }),
        Err(_) => Ok(None),
    }
}
