//! Domain model structs held in the in-memory store.
//!
//! Every struct derives `Serialize` and `Deserialize` so it can be handed
//! directly to a frontend layer without an intermediate DTO.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Author label used for the sender's own copy of a direct message.
pub const SELF_LABEL: &str = "You";

/// A single chat message as stored in one conversation's history.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct MessageEntry {
    /// Unique message identifier.
    pub id: Uuid,
    /// Label shown before the text: `"You"` on the sender's side, the
    /// sender's name on the recipient's side, `"<name> (Group)"` in groups.
    pub author: String,
    /// The message text, stored verbatim.
    pub text: String,
    /// When the entry was appended locally.
    pub sent_at: DateTime<Utc>,
}

impl MessageEntry {
    /// Create a new entry stamped with a fresh id and the current time.
    pub fn new(author: impl Into<String>, text: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v4(),
            author: author.into(),
            text: text.into(),
            sent_at: Utc::now(),
        }
    }
}

impl std::fmt::Display for MessageEntry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {}", self.author, self.text)
    }
}
