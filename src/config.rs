use std::time::Duration;

use crate::error::ConfigError;

/// Process configuration, read once at startup from the environment.
#[derive(Debug, Clone)]
pub struct Config {
    /// Base URL of the document store, e.g. `http://localhost:9200/`.
    pub es_url: String,
    pub es_username: Option<String>,
    pub es_password: Option<String>,
    /// Outbound webhook for the expensive-sold alert side-car. Disabled if absent.
    pub discord_hook: Option<String>,
    /// Reserved for the out-of-scope chat-command gateway; read but unused on the core path.
    #[allow(dead_code)]
    pub discord_token: Option<String>,
    /// Minimum spacing between upstream feed requests.
    pub rate_limit: Duration,
}

impl Config {
    pub fn from_env() -> Result<Self, ConfigError> {
        let es_url = require_var("ES_URL")?;
        let rate_limit = match std::env::var("RATE_LIMIT") {
            Ok(raw) => humantime::parse_duration(&raw).map_err(|e| ConfigError::InvalidVar {
                name: "RATE_LIMIT",
                value: raw,
                msg: e.to_string(),
            })?,
            Err(_) => Duration::from_millis(500),
        };

        Ok(Self {
            es_url,
            es_username: optional_var("ES_USERNAME"),
            es_password: optional_var("ES_PASSWORD"),
            discord_hook: optional_var("DISCORD_HOOK"),
            discord_token: optional_var("DISCORD_TOKEN"),
            rate_limit,
        })
    }

    pub fn basic_auth(&self) -> Option<(&str, Option<&str>)> {
        self.es_username
            .as_deref()
            .map(|user| (user, self.es_password.as_deref()))
    }
}

fn require_var(name: &'static str) -> Result<String, ConfigError> {
    std::env::var(name).map_err(|_| ConfigError::MissingVar(name))
}

fn optional_var(name: &str) -> Option<String> {
    std::env::var(name).ok().filter(|v| !v.is_empty())
}
