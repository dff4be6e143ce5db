//! Process configuration loaded from environment variables.
//!
//! | Variable | Default |
//! |----------|---------|
//! | `SERVER_HOST` | `0.0.0.0` |
//! | `SERVER_PORT` (fallback `PORT`) | `3000` |
//! | `CORS_ALLOWED_ORIGINS` | unset |
//! | `REAPER_INTERVAL_SECS` | `3600` |
//! | `SESSION_IDLE_TIMEOUT_SECS` | `3600` |
//! | `SESSION_ID_PREFIX` | `ucronie-` |

use std::net::SocketAddr;
use std::time::Duration;

const DEFAULT_HOST: &str = "0.0.0.0";
const DEFAULT_PORT: u16 = 3000;
const DEFAULT_REAPER_INTERVAL_SECS: u64 = 60 * 60;
const DEFAULT_IDLE_TIMEOUT_SECS: u64 = 60 * 60;
pub const DEFAULT_SESSION_ID_PREFIX: &str = "ucronie-";

/// Engine settings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Settings {
    pub server_host: String,
    pub server_port: u16,
    /// `*` or a comma-separated origin list; `None` disables CORS handling
    pub cors_allowed_origins: Option<String>,
    /// How often the reaper sweeps
    pub reaper_interval: Duration,
    /// How long a fully offline session may sit idle before eviction
    pub session_idle_timeout: Duration,
    pub session_id_prefix: String,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            server_host: DEFAULT_HOST.to_string(),
            server_port: DEFAULT_PORT,
            cors_allowed_origins: None,
            reaper_interval: Duration::from_secs(DEFAULT_REAPER_INTERVAL_SECS),
            session_idle_timeout: Duration::from_secs(DEFAULT_IDLE_TIMEOUT_SECS),
            session_id_prefix: DEFAULT_SESSION_ID_PREFIX.to_string(),
        }
    }
}

impl Settings {
    /// Load from the process environment.
    pub fn from_env() -> Result<Self, SettingsError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Load from an arbitrary key lookup. Empty values count as unset.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, SettingsError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| {
            lookup(key)
                .map(|v| v.trim().to_string())
                .filter(|v| !v.is_empty())
        };
        let defaults = Self::default();

        let port_source = get("SERVER_PORT")
            .map(|raw| ("SERVER_PORT", raw))
            .or_else(|| get("PORT").map(|raw| ("PORT", raw)));
        let server_port = match port_source {
            Some((key, raw)) => raw
                .parse::<u16>()
                .map_err(|_| SettingsError::invalid(key, &raw))?,
            None => defaults.server_port,
        };

        Ok(Self {
            server_host: get("SERVER_HOST").unwrap_or(defaults.server_host),
            server_port,
            cors_allowed_origins: get("CORS_ALLOWED_ORIGINS"),
            reaper_interval: secs(get("REAPER_INTERVAL_SECS"), "REAPER_INTERVAL_SECS")?
                .unwrap_or(defaults.reaper_interval),
            session_idle_timeout: secs(
                get("SESSION_IDLE_TIMEOUT_SECS"),
                "SESSION_IDLE_TIMEOUT_SECS",
            )?
            .unwrap_or(defaults.session_idle_timeout),
            session_id_prefix: get("SESSION_ID_PREFIX").unwrap_or(defaults.session_id_prefix),
        })
    }

    /// Socket address to listen on.
    pub fn bind_addr(&self) -> Result<SocketAddr, SettingsError> {
        let raw = format!("{}:{}", self.server_host, self.server_port);
        raw.parse()
            .map_err(|_| SettingsError::invalid("SERVER_HOST", &self.server_host))
    }
}

/// Parse a positive number of seconds.
fn secs(raw: Option<String>, key: &'static str) -> Result<Option<Duration>, SettingsError> {
    let Some(raw) = raw else {
        return Ok(None);
    };
    match raw.parse::<u64>() {
        Ok(0) | Err(_) => Err(SettingsError::invalid(key, &raw)),
        Ok(n) => Ok(Some(Duration::from_secs(n))),
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SettingsError {
    #[error("Invalid value for {key}: {value:?}")]
    Invalid { key: &'static str, value: String },
}

impl SettingsError {
    fn invalid(key: &'static str, value: &str) -> Self {
        Self::Invalid {
            key,
            value: value.to_string(),
        }
    }
}
