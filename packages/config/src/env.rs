// ABOUTME: Environment-backed configuration for the BAAC client
// ABOUTME: Reads BAAC_* variables with defaults suitable for local development

use std::env;
use std::time::Duration;

use tracing::warn;

use crate::constants::{
    BAAC_HTTP_TIMEOUT_SECS, BAAC_ROLLOVER_POLL_SECS, BAAC_SERVER_URL, BAAC_SESSION_USER,
    DEFAULT_HTTP_TIMEOUT_SECS, DEFAULT_ROLLOVER_POLL_SECS, DEFAULT_SERVER_URL,
};

/// Runtime configuration resolved from the environment.
#[derive(Debug, Clone)]
pub struct Config {
    /// Base URL of the BAAC backend, without a trailing slash.
    pub server_url: String,
    /// Timeout applied to every backend request.
    pub http_timeout: Duration,
    /// Interval between day-rollover checks.
    pub rollover_poll: Duration,
    /// Signed-in username, if the host session provides one.
    pub session_user: Option<String>,
}

impl Config {
    pub fn from_env() -> Self {
        let server_url = env::var(BAAC_SERVER_URL)
            .map(|url| normalize_server_url(&url))
            .unwrap_or_else(|_| DEFAULT_SERVER_URL.to_string());

        let http_timeout =
            Duration::from_secs(read_secs(BAAC_HTTP_TIMEOUT_SECS, DEFAULT_HTTP_TIMEOUT_SECS));
        let rollover_poll =
            Duration::from_secs(read_secs(BAAC_ROLLOVER_POLL_SECS, DEFAULT_ROLLOVER_POLL_SECS));

        let session_user = env::var(BAAC_SESSION_USER)
            .ok()
            .map(|user| user.trim().to_string())
            .filter(|user| !user.is_empty());

        Config {
            server_url,
            http_timeout,
            rollover_poll,
            session_user,
        }
    }
}

fn normalize_server_url(raw: &str) -> String {
    raw.trim().trim_end_matches('/').to_string()
}

/// Reads a positive seconds value, falling back to `default` on anything else.
fn read_secs(name: &str, default: u64) -> u64 {
    match env::var(name) {
        Ok(raw) => match raw.parse::<u64>() {
            Ok(secs) if secs > 0 => secs,
            _ => {
                warn!("Invalid {} value '{}', using {}s", name, raw, default);
                default
            }
        },
        Err(_) => default,
    }
}
