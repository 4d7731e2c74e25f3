//! Slash command token verification.
//!
//! Slack sends the app's verification token in the `token` form field.
//! Reference: https://api.slack.com/interactivity/slash-commands#app_command_handling

use tracing::warn;

/// Verify the token submitted with a slash command.
///
/// A missing token and a wrong token are both rejected. Callers must not
/// tell the two apart in their response.
///
/// # Arguments
///
/// * `expected` - The configured shared secret
/// * `provided` - The `token` field from the form, if present
pub fn verify_token(expected: &str, provided: Option<&str>) -> bool {
    let provided = match provided {
        Some(token) if !token.is_empty() => token,
        _ => {
            warn!("slash_command_token_missing");
            return false;
        }
    };

    if expected.is_empty() {
        warn!("slash_command_token_not_configured");
        return false;
    }

    let valid = constant_time_compare(expected, provided);

    if !valid {
        warn!(
            expected_length = expected.len(),
            actual_length = provided.len(),
            "slash_command_token_mismatch"
        );
    }

    valid
}

/// Constant-time string comparison to prevent timing attacks.
fn constant_time_compare(a: &str, b: &str) -> bool {
    if a.len() != b.len() {
        return false;
    }

    let mut result = 0u8;
    for (x, y) in a.bytes().zip(b.bytes()) {
        result |= x ^ y;
    }
    result == 0
}
