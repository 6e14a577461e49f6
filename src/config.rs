//! Server configuration parsed from environment variables.
//!
//! The page title and layout are fixed at compile time. Only server plumbing
//! (listen port, cookie flags, session lifetimes) is read from the
//! environment.

use std::time::Duration;

pub const PAGE_TITLE: &str = "Custom-Level Tutor";
pub const PAGE_CAPTION: &str = "Ask the level-adjusted tutor anything.";
pub const DEFAULT_PORT: u16 = 3000;
pub const DEFAULT_SESSION_IDLE_TTL_SECS: u64 = 24 * 60 * 60;
pub const DEFAULT_SESSION_SWEEP_INTERVAL_SECS: u64 = 300;

/// Page layout mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize)]
#[serde(rename_all = "snake_case")]
pub enum LayoutMode {
    /// Use the full browser width.
    Wide,
    /// Fixed-width centered column.
    Centered,
}

impl LayoutMode {
    #[must_use]
    pub fn css_class(self) -> &'static str {
        match self {
            Self::Wide => "layout--wide",
            Self::Centered => "layout--centered",
        }
    }
}

pub const LAYOUT: LayoutMode = LayoutMode::Wide;

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("invalid {key}: {value:?}")]
    Invalid { key: &'static str, value: String },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppConfig {
    pub port: u16,
    pub page_title: &'static str,
    pub layout: LayoutMode,
    /// Mark the session cookie `Secure` (HTTPS deployments).
    pub cookie_secure: bool,
    /// Sessions untouched for longer than this are dropped.
    pub session_idle_ttl: Duration,
    pub session_sweep_interval: Duration,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            port: DEFAULT_PORT,
            page_title: PAGE_TITLE,
            layout: LAYOUT,
            cookie_secure: false,
            session_idle_ttl: Duration::from_secs(DEFAULT_SESSION_IDLE_TTL_SECS),
            session_sweep_interval: Duration::from_secs(DEFAULT_SESSION_SWEEP_INTERVAL_SECS),
        }
    }
}

impl AppConfig {
    /// Build config from environment variables.
    ///
    /// Optional:
    /// - `PORT`: default 3000, must be a valid port
    /// - `COOKIE_SECURE`: `true`/`false`, default false
    /// - `SESSION_IDLE_TTL_SECS`: default 86400
    /// - `SESSION_SWEEP_INTERVAL_SECS`: default 300
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Invalid`] if `PORT` is set but not a port number.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build config from an arbitrary key lookup.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Invalid`] if `PORT` is set but not a port number.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let port = match lookup("PORT") {
            Some(raw) => raw
                .trim()
                .parse::<u16>()
                .map_err(|_| ConfigError::Invalid { key: "PORT", value: raw })?,
            None => DEFAULT_PORT,
        };

        let cookie_secure = lookup("COOKIE_SECURE")
            .as_deref()
            .and_then(parse_bool)
            .unwrap_or(false);

        let session_idle_ttl = Duration::from_secs(parse_or(
            lookup("SESSION_IDLE_TTL_SECS"),
            DEFAULT_SESSION_IDLE_TTL_SECS,
        ));
        let session_sweep_interval = Duration::from_secs(parse_or(
            lookup("SESSION_SWEEP_INTERVAL_SECS"),
            DEFAULT_SESSION_SWEEP_INTERVAL_SECS,
        ));

        Ok(Self { port, cookie_secure, session_idle_ttl, session_sweep_interval, ..Self::default() })
    }
}

pub(crate) fn parse_bool(raw: &str) -> Option<bool> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" => Some(false),
        _ => None,
    }
}

fn parse_or(raw: Option<String>, default: u64) -> u64 {
    raw.and_then(|v| v.trim().parse::<u64>().ok())
        .filter(|v| *v > 0)
        .unwrap_or(default)
}

#[cfg(test)]
#[path = "config_test.rs"]
mod tests;
