//! Slash command interpretation.
//!
//! A command goes through three checks before anything is sent:
//! 1. The shared token matches
//! 2. The `text` field is present
//! 3. The text names a recipient first
//!
//! Every outcome, good or bad, is a line of text for the person who typed
//! the command.

use thiserror::Error;
use tracing::{info, warn};

use crate::auth::verify_token;
use crate::directive::Directive;
use crate::forward::{ForwardError, Forwarder};

/// Reply when the token is missing or wrong.
pub const CONFIG_ERROR: &str = "Config error.";

/// Reply when Slack omits the `text` field.
pub const MISSING_TEXT: &str = "Slack bug; inform the team.";

/// Reply when the text does not start with a recipient.
pub const USAGE_HINT: &str = "Failed; message should be like: /anon @ashwin hey what's up?";

/// Reply when the webhook call fails.
pub const SEND_FAILED: &str = "Failed to send message.";

/// Slash command form payload.
///
/// Slack sends form-encoded data. Only `token` and `text` are used; the rest
/// are kept so the shape is documented.
/// Reference: https://api.slack.com/interactivity/slash-commands#app_command_handling
#[derive(Debug, Default)]
pub struct SlashCommand {
    pub token: Option<String>,
    pub text: Option<String>,
    pub team_id: Option<String>,
    pub team_domain: Option<String>,
    pub channel_id: Option<String>,
    pub channel_name: Option<String>,
    pub user_id: Option<String>,
    pub user_name: Option<String>,
    pub command: Option<String>,
    pub response_url: Option<String>,
    pub trigger_id: Option<String>,
}

impl SlashCommand {
    /// Build from decoded form pairs.
    ///
    /// A key sent more than once keeps its first value. Unknown keys are
    /// ignored.
    pub fn from_pairs(pairs: impl IntoIterator<Item = (String, String)>) -> Self {
        let mut command = SlashCommand::default();

        for (key, value) in pairs {
            let slot = match key.as_str() {
                "token" => &mut command.token,
                "text" => &mut command.text,
                "team_id" => &mut command.team_id,
                "team_domain" => &mut command.team_domain,
                "channel_id" => &mut command.channel_id,
                "channel_name" => &mut command.channel_name,
                "user_id" => &mut command.user_id,
                "user_name" => &mut command.user_name,
                "command" => &mut command.command,
                "response_url" => &mut command.response_url,
                "trigger_id" => &mut command.trigger_id,
                _ => continue,
            };
            slot.get_or_insert(value);
        }

        command
    }
}

/// Terminal outcome of a command that did not go through.
///
/// `Display` is the exact reply sent back to Slack.
#[derive(Debug, Error)]
pub enum CommandError {
    /// The form body could not be read; carries the parser's own message.
    #[error("{0}")]
    Malformed(String),

    #[error("{}", CONFIG_ERROR)]
    Unauthorized,

    #[error("{}", MISSING_TEXT)]
    MissingText,

    #[error("{}", USAGE_HINT)]
    Usage,

    /// The cause is logged, never shown.
    #[error("{}", SEND_FAILED)]
    Delivery(#[source] ForwardError),
}

/// Validates slash commands and hands them to the [`Forwarder`].
pub struct Relay {
    token: String,
    forwarder: Forwarder,
}

impl Relay {
    pub fn new(token: impl Into<String>, forwarder: Forwarder) -> Self {
        Self {
            token: token.into(),
            forwarder,
        }
    }

    /// Check the token and parse the text, without sending anything.
    pub fn interpret(&self, command: &SlashCommand) -> Result<Directive, CommandError> {
        if !verify_token(&self.token, command.token.as_deref()) {
            return Err(CommandError::Unauthorized);
        }

        let text = command.text.as_deref().ok_or_else(|| {
            warn!(command = ?command.command, "slash_command_text_missing");
            CommandError::MissingText
        })?;

        Directive::parse(text).ok_or_else(|| {
            info!(text_length = text.len(), "slash_command_usage_error");
            CommandError::Usage
        })
    }

    /// Interpret the command and forward it.
    ///
    /// On success returns the confirmation shown to the sender.
    pub async fn handle(&self, command: SlashCommand) -> Result<String, CommandError> {
        let directive = self.interpret(&command)?;

        self.forwarder
            .forward(&directive)
            .await
            .map_err(CommandError::Delivery)?;

        Ok(format!(
            "Anonymously sent [{}] to {}",
            directive.message, directive.recipient
        ))
    }
}
