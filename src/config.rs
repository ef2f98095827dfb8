//! Configuration loaded from environment variables.
//!
//! # Environment Variables
//!
//! ## Optional
//! - `HOST` - Bind address (default: 0.0.0.0)
//! - `PORT` - Listen port (default: 3000)
//! - `DATA_DIR` - Directory holding the record files (default: data)
//! - `USER_ID_PREFIX` - Prefix of generated user IDs (default: DT)
//!
//! ## Optional (admin, all three or none)
//! - `ADMIN_USERNAME` - Administrator login name
//! - `ADMIN_PASSWORD_HASH` - argon2 PHC string, see `visitor-checkin hash-password`.
//!   In `.env` wrap it in single quotes (`'$argon2id$...'`), otherwise dotenvy
//!   expands each `$...` as a variable and the hash is mangled.
//! - `ADMIN_TOKEN_SECRET` - HMAC secret for admin session tokens
//! - `ADMIN_TOKEN_TTL_HOURS` - Session token lifetime (default: 12)

use std::net::{IpAddr, Ipv4Addr, SocketAddr};
use std::path::PathBuf;

use thiserror::Error;

use crate::domain::{
    models::admin::{AdminCredential, HashedPassword},
    services::id_allocator::DEFAULT_USER_ID_PREFIX,
};
use crate::infrastructure::jwt_token_generator::DEFAULT_EXPIRATION_HOURS;

const DEFAULT_PORT: u16 = 3000;
const DEFAULT_DATA_DIR: &str = "data";

/// Configuration errors that can occur during loading.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Missing environment variable: {0}")]
    MissingEnvVar(String),
    #[error("Invalid environment variable {0}: {1}")]
    InvalidEnvVar(String, String),
}

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub host: IpAddr,
    pub port: u16,
    pub data_dir: PathBuf,
    pub user_id_prefix: String,
    /// None disables admin login
    pub admin: Option<AdminConfig>,
}

#[derive(Clone)]
pub struct AdminConfig {
    pub username: String,
    pub password_hash: HashedPassword,
    pub token_secret: String,
    pub token_ttl_hours: i64,
}

impl std::fmt::Debug for AdminConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AdminConfig")
            .field("username", &self.username)
            .field("password_hash", &"[REDACTED]")
            .field("token_secret", &"[REDACTED]")
            .field("token_ttl_hours", &self.token_ttl_hours)
            .finish()
    }
}

impl AdminConfig {
    pub fn credential(&self) -> AdminCredential {
        AdminCredential::new(self.username.clone(), self.password_hash.clone())
    }
}

impl AppConfig {
    /// Load from the process environment (after `.env`, if present).
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| dotenvy::var(key).ok())
    }

    /// Load using an arbitrary key lookup. Empty values count as unset.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        let host: IpAddr = match get("HOST") {
            Some(v) => v
                .parse()
                .map_err(|e| ConfigError::InvalidEnvVar("HOST".to_string(), format!("{e}")))?,
            None => IpAddr::V4(Ipv4Addr::UNSPECIFIED),
        };
        let port: u16 = match get("PORT") {
            Some(v) => v
                .parse()
                .map_err(|e| ConfigError::InvalidEnvVar("PORT".to_string(), format!("{e}")))?,
            None => DEFAULT_PORT,
        };
        let data_dir = PathBuf::from(get("DATA_DIR").unwrap_or_else(|| DEFAULT_DATA_DIR.to_string()));

        let user_id_prefix = get("USER_ID_PREFIX").unwrap_or_else(|| DEFAULT_USER_ID_PREFIX.to_string());
        if !user_id_prefix.chars().all(|c| c.is_ascii_alphanumeric()) {
            return Err(ConfigError::InvalidEnvVar(
                "USER_ID_PREFIX".to_string(),
                "must contain only ASCII letters and digits".to_string(),
            ));
        }

        let admin = Self::admin_from_lookup(&get)?;

        Ok(Self {
            host,
            port,
            data_dir,
            user_id_prefix,
            admin,
        })
    }

    fn admin_from_lookup<F>(get: &F) -> Result<Option<AdminConfig>, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        const REQUIRED: [&str; 3] = ["ADMIN_USERNAME", "ADMIN_PASSWORD_HASH", "ADMIN_TOKEN_SECRET"];

        if REQUIRED.iter().all(|&key| get(key).is_none()) {
            return Ok(None);
        }
        let require = |key: &str| get(key).ok_or_else(|| ConfigError::MissingEnvVar(key.to_string()));
        let username = require(REQUIRED[0])?;
        let password_hash = require(REQUIRED[1])?;
        let token_secret = require(REQUIRED[2])?;

        if !password_hash.starts_with("$argon2") {
            return Err(ConfigError::InvalidEnvVar(
                "ADMIN_PASSWORD_HASH".to_string(),
                "expected an argon2 PHC string".to_string(),
            ));
        }

        let token_ttl_hours: i64 = match get("ADMIN_TOKEN_TTL_HOURS") {
            Some(v) => v.parse().map_err(|e| {
                ConfigError::InvalidEnvVar("ADMIN_TOKEN_TTL_HOURS".to_string(), format!("{e}"))
            })?,
            None => DEFAULT_EXPIRATION_HOURS,
        };

        Ok(Some(AdminConfig {
            username,
            password_hash: HashedPassword::new(password_hash),
            token_secret,
            token_ttl_hours,
        }))
    }

    pub fn socket_addr(&self) -> SocketAddr {
        SocketAddr::new(self.host, self.port)
    }
}
