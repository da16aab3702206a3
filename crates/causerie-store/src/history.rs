//! Append-only message history for one conversation.

use crate::models::MessageEntry;

/// Placeholder line rendered in place of an empty history.
pub const EMPTY_HISTORY_LINE: &str = "No messages yet.";

/// Ordered, append-only record of the messages in one conversation.
///
/// A history is owned either by one side of a direct conversation or by a
/// group. Entries are never edited or removed; the only mutation is
/// [`append`](Self::append).
#[derive(Debug, Clone, Default)]
pub struct ChatHistory {
    entries: Vec<MessageEntry>,
}

impl ChatHistory {
    /// Create a new, empty history.
    pub fn new() -> Self {
        Self::default()
    }

    /// Append one entry at the end. Always succeeds.
    pub fn append(&mut self, author: impl Into<String>, text: impl Into<String>) {
        self.entries.push(MessageEntry::new(author, text));
    }

    /// Render the full history as display lines, one per entry, in append
    /// order.
    ///
    /// An empty history renders as the single placeholder line
    /// [`EMPTY_HISTORY_LINE`]. That is a display convenience only; callers
    /// that need to know whether the log holds messages must use
    /// [`is_empty`](Self::is_empty) or [`len`](Self::len) instead.
    pub fn render(&self) -> Vec<String> {
        if self.entries.is_empty() {
            return vec![EMPTY_HISTORY_LINE.to_string()];
        }
        self.entries.iter().map(ToString::to_string).collect()
    }

    /// All entries, in append order.
    pub fn entries(&self) -> &[MessageEntry] {
        &self.entries
    }

    /// The most recently appended entry, if any.
    pub fn last(&self) -> Option<&MessageEntry> {
        self.entries.last()
    }

    /// Number of entries in the history.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the history holds no entries.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_append_preserves_order() {
        let mut history = ChatHistory::new();
        history.append("You", "first");
        history.append("bob", "second");
        history.append("You", "third");

        assert_eq!(
            history.render(),
            vec!["You: first", "bob: second", "You: third"]
        );
        assert_eq!(history.len(), 3);
        assert_eq!(history.last().unwrap().text, "third");
    }

    #[test]
    fn test_empty_history_renders_placeholder() {
        let history = ChatHistory::new();

        // The placeholder is a rendering convenience, not an entry.
        assert_eq!(history.render(), vec![EMPTY_HISTORY_LINE]);
        assert!(history.is_empty());
        assert_eq!(history.len(), 0);
        assert!(history.entries().is_empty());
    }

    #[test]
    fn test_single_entry_not_confused_with_placeholder() {
        let mut history = ChatHistory::new();
        history.append("alice", "No messages yet.");

        assert_eq!(history.render(), vec!["alice: No messages yet."]);
        assert!(!history.is_empty());
    }
}
