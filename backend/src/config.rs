//! Runtime configuration read from the environment.
//!
//! `main` loads a `.env` file first (through `dotenvy`), so every variable can
//! also be set there.

use anyhow::{Context, Result};
use std::env;
use std::net::SocketAddr;
use std::path::PathBuf;

pub const DEFAULT_DATABASE_URL: &str = "sqlite:budget.db";
pub const DEFAULT_BIND_ADDRESS: &str = "127.0.0.1:3000";
pub const DEFAULT_STATIC_DIR: &str = "static";

#[derive(Debug, Clone, PartialEq)]
pub struct AppConfig {
    pub database_url: String,
    pub bind_address: SocketAddr,
    /// Directory served for every path outside `/api`
    pub static_dir: PathBuf,
    /// Only this origin may call the API when set; any origin otherwise
    pub cors_allowed_origin: Option<String>,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            database_url: DEFAULT_DATABASE_URL.to_string(),
            bind_address: SocketAddr::from(([127, 0, 0, 1], 3000)),
            static_dir: PathBuf::from(DEFAULT_STATIC_DIR),
            cors_allowed_origin: None,
        }
    }
}

impl AppConfig {
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Build the configuration from any key lookup; unset or blank keys use defaults
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).filter(|value| !value.trim().is_empty());

        let bind_text = get("BIND_ADDRESS").unwrap_or_else(|| DEFAULT_BIND_ADDRESS.to_string());
        let bind_address = bind_text
            .parse::<SocketAddr>()
            .with_context(|| format!("Invalid BIND_ADDRESS '{}'", bind_text))?;

        Ok(Self {
            database_url: get("DATABASE_URL").unwrap_or_else(|| DEFAULT_DATABASE_URL.to_string()),
            bind_address,
            static_dir: PathBuf::from(get("STATIC_DIR").unwrap_or_else(|| DEFAULT_STATIC_DIR.to_string())),
            cors_allowed_origin: get("CORS_ALLOWED_ORIGIN"),
        })
    }
}
