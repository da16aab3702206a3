//! User registry and per-user conversation indexes.
//!
//! Each registered [`User`] owns one [`ChatHistory`] per counterpart it has
//! ever exchanged a direct message with. The two sides of a direct
//! conversation are independently-owned histories kept consistent by the
//! router's dual append; they are not a shared structure.

use std::collections::HashMap;

use tracing::{debug, info};

use crate::config::Limits;
use crate::error::{Result, StoreError};
use crate::history::ChatHistory;
use crate::models::SELF_LABEL;

/// A registered user and the conversations it holds.
#[derive(Debug, Clone)]
pub struct User {
    name: String,
    /// Counterpart names in first-contact order.
    contacts: Vec<String>,
    conversations: HashMap<String, ChatHistory>,
}

impl User {
    fn new(name: &str) -> Self {
        Self {
            name: name.to_string(),
            contacts: Vec::new(),
            conversations: HashMap::new(),
        }
    }

    /// The user's unique name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Counterpart names in first-contact order.
    pub fn contacts(&self) -> &[String] {
        &self.contacts
    }

    /// Number of distinct counterparts this user holds conversations with.
    pub fn conversation_count(&self) -> usize {
        self.conversations.len()
    }

    /// The history shared with `counterpart`, if one exists.
    ///
    /// Read-only: never creates a conversation.
    pub fn conversation(&self, counterpart: &str) -> Option<&ChatHistory> {
        self.conversations.get(counterpart)
    }

    /// Whether a message involving `counterpart` could be recorded without
    /// hitting the conversation limit. Existing counterparts always pass.
    pub fn can_accept_conversation(&self, counterpart: &str, max: usize) -> bool {
        self.conversations.contains_key(counterpart) || self.conversations.len() < max
    }

    /// Record an outgoing direct message to `to` under the sender's own
    /// author label.
    pub(crate) fn record_sent(&mut self, to: &str, text: &str, max: usize) -> Result<()> {
        self.resolve(to, max)?.append(SELF_LABEL, text);
        Ok(())
    }

    /// Record an incoming direct message from `from` under the sender's name.
    pub(crate) fn record_received(&mut self, from: &str, text: &str, max: usize) -> Result<()> {
        self.resolve(from, max)?.append(from, text);
        Ok(())
    }

    /// Look up the history for `counterpart`, creating an empty one on first
    /// contact. Lookup is by exact string equality.
    fn resolve(&mut self, counterpart: &str, max: usize) -> Result<&mut ChatHistory> {
        if !self.conversations.contains_key(counterpart) {
            if self.conversations.len() >= max {
                return Err(StoreError::CapacityExceeded {
                    resource: "Conversation",
                    limit: max,
                });
            }
            self.contacts.push(counterpart.to_string());
            debug!(user = %self.name, counterpart, "Opened conversation");
        }
        Ok(self.conversations.entry(counterpart.to_string()).or_default())
    }
}

/// Registry of all users, keyed by unique name.
#[derive(Debug, Clone)]
pub struct UserDirectory {
    users: HashMap<String, User>,
    max_users: usize,
    max_conversations: usize,
}

impl UserDirectory {
    /// Create an empty directory bounded by the given limits.
    pub fn new(limits: &Limits) -> Self {
        Self {
            users: HashMap::new(),
            max_users: limits.max_users,
            max_conversations: limits.max_conversations_per_user,
        }
    }

    /// Register a new user with an empty conversation index.
    pub fn register(&mut self, name: &str) -> Result<()> {
        if self.users.contains_key(name) {
            return Err(StoreError::DuplicateUser(name.to_string()));
        }
        if self.users.len() >= self.max_users {
            return Err(StoreError::CapacityExceeded {
                resource: "User",
                limit: self.max_users,
            });
        }
        self.users.insert(name.to_string(), User::new(name));
        info!(user = %name, "User registered");
        Ok(())
    }

    /// Look up a user by name.
    pub fn get(&self, name: &str) -> Result<&User> {
        self.users
            .get(name)
            .ok_or_else(|| StoreError::UserNotFound(name.to_string()))
    }

    /// Look up a user by name, mutably.
    pub fn get_mut(&mut self, name: &str) -> Result<&mut User> {
        self.users
            .get_mut(name)
            .ok_or_else(|| StoreError::UserNotFound(name.to_string()))
    }

    /// Whether `name` is registered.
    pub fn contains(&self, name: &str) -> bool {
        self.users.contains_key(name)
    }

    /// Number of registered users.
    pub fn user_count(&self) -> usize {
        self.users.len()
    }

    /// Per-user conversation limit this directory enforces.
    pub fn max_conversations(&self) -> usize {
        self.max_conversations
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn directory(limits: Limits) -> UserDirectory {
        UserDirectory::new(&limits)
    }

    #[test]
    fn test_register_and_lookup() {
        let mut dir = directory(Limits::default());
        dir.register("alice").unwrap();

        assert!(dir.contains("alice"));
        assert_eq!(dir.get("alice").unwrap().name(), "alice");
        assert_eq!(dir.user_count(), 1);
    }

    #[test]
    fn test_duplicate_registration_rejected() {
        let mut dir = directory(Limits::default());
        dir.register("alice").unwrap();

        let err = dir.register("alice").unwrap_err();
        assert!(matches!(err, StoreError::DuplicateUser(name) if name == "alice"));
        assert_eq!(dir.user_count(), 1);
    }

    #[test]
    fn test_user_limit() {
        let mut dir = directory(Limits {
            max_users: 2,
            ..Limits::default()
        });
        dir.register("a").unwrap();
        dir.register("b").unwrap();

        let err = dir.register("c").unwrap_err();
        assert!(matches!(
            err,
            StoreError::CapacityExceeded { limit: 2, .. }
        ));
        assert_eq!(dir.user_count(), 2);
    }

    #[test]
    fn test_lookup_unknown_user() {
        let dir = directory(Limits::default());
        assert!(matches!(
            dir.get("ghost").unwrap_err(),
            StoreError::UserNotFound(name) if name == "ghost"
        ));
    }

    #[test]
    fn test_names_are_case_sensitive() {
        let mut dir = directory(Limits::default());
        dir.register("Alice").unwrap();

        assert!(!dir.contains("alice"));
        dir.register("alice").unwrap();
        assert_eq!(dir.user_count(), 2);
    }

    #[test]
    fn test_contacts_keep_first_contact_order() {
        let mut user = User::new("a");
        user.record_sent("carol", "hi", 10).unwrap();
        user.record_sent("bob", "hi", 10).unwrap();
        user.record_received("dave", "yo", 10).unwrap();
        user.record_sent("bob", "again", 10).unwrap();

        assert_eq!(user.contacts(), ["carol", "bob", "dave"]);
        assert_eq!(user.conversation_count(), 3);
    }

    #[test]
    fn test_conversation_limit_only_blocks_new_counterparts() {
        let mut user = User::new("a");
        user.record_sent("bob", "hi", 1).unwrap();

        let err = user.record_sent("carol", "hi", 1).unwrap_err();
        assert!(matches!(
            err,
            StoreError::CapacityExceeded { limit: 1, .. }
        ));
        assert_eq!(user.conversation_count(), 1);

        // The existing counterpart still resolves.
        user.record_sent("bob", "again", 1).unwrap();
        assert_eq!(user.conversation("bob").unwrap().len(), 2);
    }

    #[test]
    fn test_conversation_read_never_creates() {
        let user = User::new("a");
        assert!(user.conversation("bob").is_none());
        assert_eq!(user.conversation_count(), 0);
    }

    #[test]
    fn test_send_and_receive_labels() {
        let mut user = User::new("a");
        user.record_sent("bob", "hello", 10).unwrap();
        user.record_received("bob", "hey", 10).unwrap();

        let history = user.conversation("bob").unwrap();
        assert_eq!(history.render(), vec!["You: hello", "bob: hey"]);
    }
}
