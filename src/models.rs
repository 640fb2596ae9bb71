//! Data types passed between the pipeline stages.
//!
//! - [`Recipient`]: who receives the Telegram message
//! - [`Status`]: what one pipeline run concluded

use std::fmt;
use teloxide::types::{ChatId, Recipient as ChatRecipient};

/// Target of the notification message.
///
/// Opaque apart from being non-empty. When sent, a value that parses as an
/// `i64` is a numeric chat id; anything else is a channel username such as
/// `@my_channel`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Recipient(String);

impl Recipient {
    /// Returns `None` for an empty (or all-whitespace) identifier.
    pub fn new(id: impl Into<String>) -> Option<Self> {
        let id = id.into();
        if id.trim().is_empty() {
            None
        } else {
            Some(Self(id))
        }
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Recipient {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl From<&Recipient> for ChatRecipient {
    fn from(r: &Recipient) -> Self {
        match r.0.trim().parse::<i64>() {
            Ok(id) => ChatRecipient::Id(ChatId(id)),
            Err(_) => ChatRecipient::ChannelUsername(r.0.clone()),
        }
    }
}

/// Outcome of a single successful pipeline run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Status {
    /// The marker world is still listed; nothing was sent.
    Congested,
    /// The marker world is gone and the notification went out.
    Notified,
}
