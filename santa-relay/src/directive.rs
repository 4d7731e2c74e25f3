//! Parsing of the slash command text into a recipient and a message.
//!
//! The recipient comes first and keeps its sigil:
//!
//! ```text
//! @ashwin: hey what's up?   → (@ashwin, hey what's up?)
//! #general hello            → (#general, hello)
//! ```

/// A parsed `(recipient, message)` pair.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Directive {
    /// User (`@name`) or channel (`#name`) to deliver to
    pub recipient: String,
    /// Message body, trimmed. May be empty.
    pub message: String,
}

impl Directive {
    /// Parse slash command text.
    ///
    /// Returns `None` unless the trimmed text starts with `@` or `#` followed
    /// by at least one character. The recipient runs until the first
    /// whitespace or colon; a single colon after it is dropped.
    pub fn parse(text: &str) -> Option<Self> {
        let text = text.trim();

        let body = text
            .strip_prefix('@')
            .or_else(|| text.strip_prefix('#'))?;

        let end = body
            .find(|c: char| c.is_whitespace() || c == ':')
            .unwrap_or(body.len());
        if end == 0 {
            return None;
        }

        // Sigils are one byte, so the recipient is text[..end + 1].
        let (recipient, rest) = text.split_at(end + 1);
        let rest = rest.strip_prefix(':').unwrap_or(rest);

        Some(Directive {
            recipient: recipient.to_string(),
            message: rest.trim().to_string(),
        })
    }
}
