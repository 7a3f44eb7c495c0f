//! Application configuration
//!
//! Centralized configuration management with environment variable support
//! and sensible defaults.

use std::env;

/// Default tracing filter used when `RUST_LOG` is not set
pub const DEFAULT_LOG_FILTER: &str = "filmorate_backend=info,tower_http=info";

/// Number of films returned by the popular ranking when the caller omits `count`
pub const DEFAULT_POPULAR_COUNT: usize = 10;

/// Application configuration
#[derive(Debug, Clone)]
pub struct Config {
    /// Server configuration
    pub server: ServerConfig,
    /// Logging configuration
    pub logging: LoggingConfig,
    /// Film catalogue configuration
    pub films: FilmsConfig,
}

/// Server configuration
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// Port to bind the server to
    pub port: u16,
    /// Host address to bind to
    pub host: String,
}

/// Logging configuration
#[derive(Debug, Clone)]
pub struct LoggingConfig {
    /// `tracing_subscriber::EnvFilter` directive string
    pub filter: String,
}

/// Film catalogue configuration
#[derive(Debug, Clone)]
pub struct FilmsConfig {
    /// Default `count` for `GET /films/popular`
    pub popular_default_count: usize,
}

impl Config {
    /// Load configuration from environment variables with defaults
    pub fn from_env() -> Self {
        Self {
            server: ServerConfig {
                port: env::var("PORT")
                    .ok()
                    .and_then(|p| p.parse().ok())
                    .unwrap_or(8080),
                host: env::var("HOST").unwrap_or_else(|_| "0.0.0.0".to_string()),
            },
            logging: LoggingConfig {
                filter: env::var("RUST_LOG")
                    .ok()
                    .filter(|f| !f.trim().is_empty())
                    .unwrap_or_else(|| DEFAULT_LOG_FILTER.to_string()),
            },
            films: FilmsConfig {
                popular_default_count: env::var("POPULAR_FILMS_DEFAULT_COUNT")
                    .ok()
                    .and_then(|c| c.parse().ok())
                    .filter(|c: &usize| *c > 0)
                    .unwrap_or(DEFAULT_POPULAR_COUNT),
            },
        }
    }

    /// Get the server address as a string
    pub fn server_addr(&self) -> String {
        format!("{}:{}", self.server.host, self.server.port)
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            server: ServerConfig {
                port: 8080,
                host: "0.0.0.0".to_string(),
            },
            logging: LoggingConfig {
                filter: DEFAULT_LOG_FILTER.to_string(),
            },
            films: FilmsConfig {
                popular_default_count: DEFAULT_POPULAR_COUNT,
            },
        }
    }
}
