//! Gateway Configuration
//!
//! Read once at startup from the environment and handed to each component
//! explicitly. `from_lookup` lets tests supply variables without touching the
//! process environment.

use anyhow::{Context, Result, anyhow};
use std::net::SocketAddr;
use std::path::PathBuf;
use std::time::Duration;

pub const DEFAULT_BIND: &str = "127.0.0.1:8787";
pub const DEFAULT_FIGMA_API_BASE: &str = "https://api.figma.com";
/// 30 days, matching the `max-age` the serving path advertises.
pub const DEFAULT_EDGE_CACHE_TTL_SECS: u64 = 60 * 60 * 24 * 30;
pub const DEFAULT_EDGE_CACHE_MAX_BYTES: u64 = 256 * 1024 * 1024;

/// The single admin credential guarding mutation and listing routes.
#[derive(Clone)]
pub struct AdminCredentials {
    pub username: String,
    pub password: String,
}

impl std::fmt::Debug for AdminCredentials {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AdminCredentials")
            .field("username", &self.username)
            .field("password", &"<redacted>")
            .finish()
    }
}

#[derive(Debug, Clone)]
pub struct GatewayConfig {
    pub bind_addr: SocketAddr,
    pub figma_token: String,
    pub figma_api_base: String,
    pub admin: AdminCredentials,
    /// Root of the directory-backed stores; `None` selects the in-memory stores.
    pub storage_dir: Option<PathBuf>,
    pub edge_cache_ttl: Duration,
    pub edge_cache_max_bytes: u64,
}

impl GatewayConfig {
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let required = |name: &str| {
            lookup(name)
                .filter(|value| !value.is_empty())
                .ok_or_else(|| anyhow!("{} must be set", name))
        };

        let bind_addr = lookup("GATEWAY_BIND")
            .unwrap_or_else(|| DEFAULT_BIND.to_string())
            .parse()
            .context("GATEWAY_BIND is not a socket address")?;

        let edge_cache_ttl_secs = match lookup("EDGE_CACHE_TTL_SECS") {
            Some(raw) => raw
                .parse()
                .context("EDGE_CACHE_TTL_SECS is not a number of seconds")?,
            None => DEFAULT_EDGE_CACHE_TTL_SECS,
        };

        let edge_cache_max_bytes = match lookup("EDGE_CACHE_MAX_BYTES") {
            Some(raw) => raw
                .parse()
                .context("EDGE_CACHE_MAX_BYTES is not a byte count")?,
            None => DEFAULT_EDGE_CACHE_MAX_BYTES,
        };

        Ok(Self {
            bind_addr,
            figma_token: required("FIGMA_TOKEN")?,
            figma_api_base: lookup("FIGMA_API_BASE")
                .unwrap_or_else(|| DEFAULT_FIGMA_API_BASE.to_string()),
            admin: AdminCredentials {
                username: required("ADMIN_USER")?,
                password: required("ADMIN_PASS")?,
            },
            storage_dir: lookup("STORAGE_DIR")
                .filter(|value| !value.is_empty())
                .map(PathBuf::from),
            edge_cache_ttl: Duration::from_secs(edge_cache_ttl_secs),
            edge_cache_max_bytes,
        })
    }

    /// Applies `--bind <addr:port>` from the command line, if present.
    pub fn with_args(mut self, args: &[String]) -> Result<Self> {
        let mut i = 1;
        while i < args.len() {
            match args[i].as_str() {
                "--bind" => {
                    let value = args
                        .get(i + 1)
                        .ok_or_else(|| anyhow!("--bind requires an address"))?;
                    self.bind_addr = value.parse().context("--bind is not a socket address")?;
                    i += 2;
                }
                _ => {
                    i += 1;
                }
            }
        }
        Ok(self)
    }
}

#[cfg(test)]
mod tests;
