//! Server configuration from environment variables.
//!
//! Loaded once at startup and held immutably for the life of the process.

use std::env;
use std::net::{IpAddr, SocketAddr};
use std::str::FromStr;
use std::time::Duration;

/// Longest accepted token lifetime (ten years).
pub const MAX_JWT_EXPIRY_HOURS: u64 = 24 * 365 * 10;

/// Server configuration.
#[derive(Clone)]
pub struct ServerConfig {
    /// Address to bind.
    pub address: IpAddr,
    /// Server port to listen on.
    pub port: u16,
    /// Time allowed for reading a request.
    pub read_timeout: Duration,
    /// Time allowed for writing a response.
    pub write_timeout: Duration,
    /// Deadline applied to every individual storage call.
    pub storage_timeout: Duration,
    /// HMAC secret for signing bearer tokens.
    pub jwt_secret: String,
    /// Token lifetime in hours.
    pub jwt_expiry_hours: u64,
    /// Log level (trace, debug, info, warn, error).
    pub log_level: String,
    /// CORS allowed origins (comma-separated or "*" for all).
    pub cors_allowed_origins: String,
    /// Sustained request rate allowed across the whole process.
    pub rate_limit_per_second: u32,
    /// Requests allowed in a burst above the sustained rate.
    pub rate_limit_burst: u32,
}

impl ServerConfig {
    /// Load configuration from environment variables.
    ///
    /// Required:
    /// - `JWT_SECRET`: Token signing secret
    ///
    /// Optional:
    /// - `SERVER_ADDRESS`: Bind address (default: "0.0.0.0")
    /// - `SERVER_PORT`: Server port (default: 8080)
    /// - `READ_TIMEOUT` / `WRITE_TIMEOUT`: Seconds (default: 5 each)
    /// - `STORAGE_TIMEOUT_MS`: Per-call storage deadline (default: 3000)
    /// - `JWT_EXPIRY_HOURS`: Token lifetime (default: 24, at most 87600)
    /// - `LOG_LEVEL`: Logging level (default: "info")
    /// - `CORS_ALLOWED_ORIGINS`: Allowed CORS origins (default: "*")
    /// - `RATE_LIMIT_PER_SECOND` / `RATE_LIMIT_BURST`: (default: 2 / 5)
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|name| env::var(name).ok())
    }

    /// Load configuration through an arbitrary variable lookup.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let jwt_secret = lookup("JWT_SECRET")
            .filter(|s| !s.is_empty())
            .ok_or_else(|| ConfigError::MissingEnvVar("JWT_SECRET".to_string()))?;

        let address = parse_or(&lookup, "SERVER_ADDRESS", IpAddr::from([0, 0, 0, 0]))?;
        let port = parse_or(&lookup, "SERVER_PORT", 8080u16)?;
        let read_timeout = Duration::from_secs(parse_or(&lookup, "READ_TIMEOUT", 5u64)?);
        let write_timeout = Duration::from_secs(parse_or(&lookup, "WRITE_TIMEOUT", 5u64)?);
        let storage_timeout =
            Duration::from_millis(parse_or(&lookup, "STORAGE_TIMEOUT_MS", 3000u64)?);
        let jwt_expiry_hours = parse_or(&lookup, "JWT_EXPIRY_HOURS", 24u64)?;
        let rate_limit_per_second = parse_or(&lookup, "RATE_LIMIT_PER_SECOND", 2u32)?;
        let rate_limit_burst = parse_or(&lookup, "RATE_LIMIT_BURST", 5u32)?;

        let log_level = lookup("LOG_LEVEL").unwrap_or_else(|| "info".to_string());
        let cors_allowed_origins =
            lookup("CORS_ALLOWED_ORIGINS").unwrap_or_else(|| "*".to_string());

        for (name, value) in [
            ("JWT_EXPIRY_HOURS", jwt_expiry_hours),
            ("RATE_LIMIT_PER_SECOND", u64::from(rate_limit_per_second)),
            ("RATE_LIMIT_BURST", u64::from(rate_limit_burst)),
            ("STORAGE_TIMEOUT_MS", storage_timeout.as_millis() as u64),
        ] {
            if value == 0 {
                return Err(ConfigError::InvalidValue {
                    name: name.to_string(),
                    reason: "must be greater than zero".to_string(),
                });
            }
        }
        if jwt_expiry_hours > MAX_JWT_EXPIRY_HOURS {
            return Err(ConfigError::InvalidValue {
                name: "JWT_EXPIRY_HOURS".to_string(),
                reason: format!("must be at most {}", MAX_JWT_EXPIRY_HOURS),
            });
        }

        Ok(Self {
            address,
            port,
            read_timeout,
            write_timeout,
            storage_timeout,
            jwt_secret,
            jwt_expiry_hours,
            log_level,
            cors_allowed_origins,
            rate_limit_per_second,
            rate_limit_burst,
        })
    }

    /// Get the socket address for the server.
    pub fn socket_addr(&self) -> SocketAddr {
        SocketAddr::new(self.address, self.port)
    }

    /// Upper bound on the lifetime of a single request.
    pub fn request_timeout(&self) -> Duration {
        self.read_timeout + self.write_timeout
    }
}

impl std::fmt::Debug for ServerConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ServerConfig")
            .field("address", &self.address)
            .field("port", &self.port)
            .field("read_timeout", &self.read_timeout)
            .field("write_timeout", &self.write_timeout)
            .field("storage_timeout", &self.storage_timeout)
            .field("jwt_expiry_hours", &self.jwt_expiry_hours)
            .field("log_level", &self.log_level)
            .field("cors_allowed_origins", &self.cors_allowed_origins)
            .field("rate_limit_per_second", &self.rate_limit_per_second)
            .field("rate_limit_burst", &self.rate_limit_burst)
            .finish_non_exhaustive()
    }
}

fn parse_or<F, T>(lookup: &F, name: &str, default: T) -> Result<T, ConfigError>
where
    F: Fn(&str) -> Option<String>,
    T: FromStr,
    T::Err: std::fmt::Display,
{
    match lookup(name) {
        None => Ok(default),
        Some(raw) => raw.trim().parse().map_err(|e: T::Err| ConfigError::InvalidValue {
            name: name.to_string(),
            reason: e.to_string(),
        }),
    }
}

/// Configuration errors.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// Required environment variable is missing.
    #[error("missing required environment variable: {0}")]
    MissingEnvVar(String),

    /// Invalid environment variable value.
    #[error("invalid value for environment variable {name}: {reason}")]
    InvalidValue { name: String, reason: String },
}
