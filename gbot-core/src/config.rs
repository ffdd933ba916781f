//! Router configuration loaded from environment variables.

use std::env;
use std::time::Duration;

use anyhow::Result;

/// Configuration for the aggregator and the stock handlers. Every field has
/// a default, so `load` succeeds on an empty environment.
pub struct BotConfig {
    pub log_file: String,
    /// How many handlers may run at once during one dispatch.
    pub concurrency: usize,
    /// Per-handler deadline; a handler that misses it counts as abstaining.
    pub handler_timeout: Duration,
    /// Usernames exempt from ban handlers.
    pub super_users: Vec<String>,
    pub min_ban: Duration,
    pub max_ban: Duration,
    pub jokes_api_url: String,
    pub chuck_api_url: String,
}

impl BotConfig {
    /// Loads configuration from environment variables, falling back to
    /// defaults for anything unset or unparsable.
    pub fn load() -> Result<Self> {
        let log_file = env::var("LOG_FILE").unwrap_or_else(|_| "logs/gbot.log".to_string());
        let concurrency = env::var("HANDLER_CONCURRENCY")
            .ok()
            .and_then(|s| s.parse().ok())
            .unwrap_or(4);
        let handler_timeout = Duration::from_secs(
            env::var("HANDLER_TIMEOUT_SECS")
                .ok()
                .and_then(|s| s.parse().ok())
                .unwrap_or(30),
        );
        let super_users = env::var("SUPER_USERS")
            .map(|s| {
                s.split(',')
                    .map(|u| u.trim().to_string())
                    .filter(|u| !u.is_empty())
                    .collect()
            })
            .unwrap_or_default();
        let min_ban = Duration::from_secs(
            env::var("MIN_BAN_SECS")
                .ok()
                .and_then(|s| s.parse().ok())
                .unwrap_or(60),
        );
        let max_ban = Duration::from_secs(
            env::var("MAX_BAN_SECS")
                .ok()
                .and_then(|s| s.parse().ok())
                .unwrap_or(900),
        );
        let jokes_api_url = env::var("JOKES_API_URL")
            .unwrap_or_else(|_| "https://jokesrv.rubedo.cloud".to_string());
        let chuck_api_url =
            env::var("CHUCK_API_URL").unwrap_or_else(|_| "http://api.icndb.com".to_string());

        Ok(Self {
            log_file,
            concurrency,
            handler_timeout,
            super_users,
            min_ban,
            max_ban,
            jokes_api_url,
            chuck_api_url,
        })
    }
}
