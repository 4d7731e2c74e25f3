//! Santa - anonymous Slack messages from a slash command.
//!
//! ## Architecture
//!
//! ```text
//! Slash command → web → Relay (token, text) → Forwarder → Slack webhook
//! ```
//!
//! The sender appears as "Santa <Animal>", picked at random per message.

pub mod auth;
pub mod command;
pub mod config;
pub mod directive;
pub mod forward;
pub mod identity;
pub mod web;

// Re-export commonly used types
pub use command::{CommandError, Relay, SlashCommand};
pub use config::{Config, ConfigError};
pub use directive::Directive;
pub use forward::{ForwardError, Forwarder, Notification};
pub use identity::{NameGenerator, ANIMALS};
pub use web::AppState;
