//! Configuration module for environment variable parsing.
//!
//! Both values are read once at startup. Nothing in the request path touches
//! the process environment.

use std::env;
use std::fmt;

use thiserror::Error;
use url::Url;

/// Shared secret Slack sends with every slash command.
pub const TOKEN_VAR: &str = "INCOMING_SLACK_TOKEN";

/// Incoming webhook that receives the anonymous messages.
pub const WEBHOOK_VAR: &str = "INCOMING_SLACK_WEBHOOK";

/// Errors raised while loading configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("environment variable {0} is not set")]
    Missing(&'static str),

    #[error("invalid webhook url: {0}")]
    InvalidWebhookUrl(#[from] url::ParseError),
}

/// Application configuration loaded from environment variables.
#[derive(Clone)]
pub struct Config {
    /// Token the slash command must present
    pub incoming_token: String,

    /// Incoming webhook URL for outbound notifications
    pub webhook_url: Url,
}

impl Config {
    /// Load configuration from environment variables.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_vars(env::var(TOKEN_VAR).ok(), env::var(WEBHOOK_VAR).ok())
    }

    /// Build configuration from raw values. Empty or whitespace-only values
    /// count as missing.
    pub fn from_vars(token: Option<String>, webhook: Option<String>) -> Result<Self, ConfigError> {
        let incoming_token = non_empty(token).ok_or(ConfigError::Missing(TOKEN_VAR))?;
        let webhook = non_empty(webhook).ok_or(ConfigError::Missing(WEBHOOK_VAR))?;

        Ok(Config {
            incoming_token,
            webhook_url: Url::parse(webhook.trim())?,
        })
    }
}

// The token is a credential and the webhook URL embeds one too.
impl fmt::Debug for Config {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Config")
            .field("incoming_token", &"<redacted>")
            .field("webhook_host", &self.webhook_url.host_str())
            .finish()
    }
}

fn non_empty(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.trim().is_empty())
}
