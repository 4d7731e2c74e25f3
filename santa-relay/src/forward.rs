//! Delivery of anonymous messages to the Slack incoming webhook.

use std::sync::Arc;

use reqwest::{header::CONTENT_TYPE, Client, StatusCode};
use serde::Serialize;
use thiserror::Error;
use tracing::{error, info};
use url::Url;

use crate::directive::Directive;
use crate::identity::NameGenerator;

/// Payload accepted by a Slack incoming webhook.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Notification {
    pub text: String,
    /// Anonymous animal sender
    pub username: String,
    /// Recipient user or channel
    pub channel: String,
}

impl Notification {
    pub fn new(directive: &Directive, username: String) -> Self {
        Self {
            text: directive.message.clone(),
            username,
            channel: directive.recipient.clone(),
        }
    }
}

/// Why a notification was not delivered.
#[derive(Debug, Error)]
pub enum ForwardError {
    #[error("failed to serialize notification: {0}")]
    Serialize(#[from] serde_json::Error),

    #[error("webhook request failed: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("webhook rejected notification with status {0}")]
    Status(StatusCode),
}

/// Posts notifications to the configured webhook, one attempt each.
#[derive(Clone)]
pub struct Forwarder {
    client: Client,
    webhook_url: Url,
    names: Arc<NameGenerator>,
}

impl Forwarder {
    pub fn new(client: Client, webhook_url: Url, names: Arc<NameGenerator>) -> Self {
        Self {
            client,
            webhook_url,
            names,
        }
    }

    /// Send `directive` under a fresh pseudonym.
    ///
    /// Returns the notification that was delivered. There is no retry and no
    /// timeout beyond the client's own.
    pub async fn forward(&self, directive: &Directive) -> Result<Notification, ForwardError> {
        let notification = Notification::new(directive, self.names.display_name());
        let body = serde_json::to_vec(&notification)?;

        let response = self
            .client
            .post(self.webhook_url.clone())
            .header(CONTENT_TYPE, "application/json")
            .body(body)
            .send()
            .await
            .map_err(|e| {
                error!(
                    recipient = %notification.channel,
                    is_timeout = e.is_timeout(),
                    is_connect = e.is_connect(),
                    error = %e,
                    "webhook_request_error"
                );
                ForwardError::Transport(e)
            })?;

        let status = response.status();
        if !status.is_success() {
            error!(
                recipient = %notification.channel,
                status_code = status.as_u16(),
                "webhook_rejected"
            );
            return Err(ForwardError::Status(status));
        }

        info!(
            recipient = %notification.channel,
            username = %notification.username,
            message_length = notification.text.len(),
            "webhook_delivered"
        );

        Ok(notification)
    }
}
