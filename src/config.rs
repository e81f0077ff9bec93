// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! # Runtime Configuration
//!
//! Configuration is loaded from the environment once at startup. A missing
//! session secret is fatal: the server refuses to start rather than sign
//! tokens with a guessable key.
//!
//! ## Environment Variables
//!
//! | Variable | Description | Default |
//! |----------|-------------|---------|
//! | `SESSION_SECRET` | HMAC key for session tokens | Required |
//! | `HOST` | Server bind address | `0.0.0.0` |
//! | `PORT` | Server bind port | `3001` |
//! | `NONCE_TTL_SECS` | Lifetime of an issued login nonce | `300` |
//! | `NONCE_CAPACITY` | Max outstanding nonces kept in memory | `10000` |
//! | `LOGIN_REQUIRE_NONCE` | Require the signed message to embed an issued nonce | `true` |
//! | `LOG_FORMAT` | Logging format (`json` or `pretty`) | `pretty` |
//! | `RUST_LOG` | Log level filter | `info,tower_http=debug` |

use std::fmt;
use std::time::Duration;

use thiserror::Error;

pub const SESSION_SECRET_ENV: &str = "SESSION_SECRET";
pub const HOST_ENV: &str = "HOST";
pub const PORT_ENV: &str = "PORT";
pub const NONCE_TTL_ENV: &str = "NONCE_TTL_SECS";
pub const NONCE_CAPACITY_ENV: &str = "NONCE_CAPACITY";
pub const LOGIN_REQUIRE_NONCE_ENV: &str = "LOGIN_REQUIRE_NONCE";
pub const LOG_FORMAT_ENV: &str = "LOG_FORMAT";

pub const DEFAULT_HOST: &str = "0.0.0.0";
pub const DEFAULT_PORT: u16 = 3001;
pub const DEFAULT_NONCE_TTL_SECS: u64 = 300;
pub const DEFAULT_NONCE_CAPACITY: usize = 10_000;

/// Secrets shorter than this are accepted but logged as weak.
pub const RECOMMENDED_SECRET_LEN: usize = 32;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("{0} must be set")]
    MissingSecret(&'static str),
    #[error("invalid value for {name}: {value:?}")]
    InvalidValue { name: &'static str, value: String },
    #[error("secure random source unavailable: {0}")]
    EntropyUnavailable(String),
}

/// HMAC key used to sign session tokens.
///
/// `Debug` is redacted so the key never ends up in logs.
#[derive(Clone)]
pub struct SessionSecret(Vec<u8>);

impl SessionSecret {
    pub fn new(bytes: impl Into<Vec<u8>>) -> Result<Self, ConfigError> {
        let bytes = bytes.into();
        if bytes.is_empty() {
            return Err(ConfigError::MissingSecret(SESSION_SECRET_ENV));
        }
        Ok(Self(bytes))
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.0
    }

    pub fn is_weak(&self) -> bool {
        self.0.len() < RECOMMENDED_SECRET_LEN
    }
}

impl fmt::Debug for SessionSecret {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("SessionSecret(<redacted>)")
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogFormat {
    Pretty,
    Json,
}

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub host: String,
    pub port: u16,
    pub session_secret: SessionSecret,
    pub nonce_ttl: Duration,
    pub nonce_capacity: usize,
    pub require_nonce: bool,
    pub log_format: LogFormat,
}

impl AppConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Build the configuration from an arbitrary variable source.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let secret = lookup(SESSION_SECRET_ENV)
            .ok_or(ConfigError::MissingSecret(SESSION_SECRET_ENV))?;
        let session_secret = SessionSecret::new(secret.into_bytes())?;

        let host = lookup(HOST_ENV).unwrap_or_else(|| DEFAULT_HOST.to_string());
        let port = parse_or(&lookup, PORT_ENV, DEFAULT_PORT)?;
        let nonce_ttl_secs = parse_or(&lookup, NONCE_TTL_ENV, DEFAULT_NONCE_TTL_SECS)?;
        let nonce_capacity = parse_or(&lookup, NONCE_CAPACITY_ENV, DEFAULT_NONCE_CAPACITY)?;
        if nonce_capacity == 0 {
            return Err(ConfigError::InvalidValue {
                name: NONCE_CAPACITY_ENV,
                value: "0".to_string(),
            });
        }
        let require_nonce = parse_or(&lookup, LOGIN_REQUIRE_NONCE_ENV, true)?;

        let log_format = match lookup(LOG_FORMAT_ENV).as_deref() {
            None | Some("pretty") => LogFormat::Pretty,
            Some("json") => LogFormat::Json,
            Some(other) => {
                return Err(ConfigError::InvalidValue {
                    name: LOG_FORMAT_ENV,
                    value: other.to_string(),
                })
            }
        };

        Ok(Self {
            host,
            port,
            session_secret,
            nonce_ttl: Duration::from_secs(nonce_ttl_secs),
            nonce_capacity,
            require_nonce,
            log_format,
        })
    }

    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

fn parse_or<F, T>(lookup: &F, name: &'static str, default: T) -> Result<T, ConfigError>
where
    F: Fn(&str) -> Option<String>,
    T: std::str::FromStr,
{
    match lookup(name) {
        None => Ok(default),
        Some(raw) => raw
            .trim()
            .parse()
            .map_err(|_| ConfigError::InvalidValue { name, value: raw }),
    }
}
