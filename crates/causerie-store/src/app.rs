//! Top-level store façade.
//!
//! [`ChatApp`] owns the user and group directories and is the only mutation
//! path a frontend should use. Each operation validates the referenced
//! entities, then delegates the log appends to their owners. Operations
//! return outcomes as values; formatting them is the frontend's job.

use tracing::debug;

use crate::config::Limits;
use crate::error::{Result, StoreError};
use crate::groups::GroupDirectory;
use crate::history::ChatHistory;
use crate::users::UserDirectory;

/// The in-process conversation store.
///
/// Construct one instance at process start and pass it by reference to the
/// frontend; all state lives inside it and is lost on drop.
#[derive(Debug, Clone)]
pub struct ChatApp {
    users: UserDirectory,
    groups: GroupDirectory,
}

impl ChatApp {
    /// Create an empty store bounded by the given limits.
    pub fn new(limits: Limits) -> Self {
        Self {
            users: UserDirectory::new(&limits),
            groups: GroupDirectory::new(&limits),
        }
    }

    /// Register a new user.
    pub fn register_user(&mut self, name: &str) -> Result<()> {
        self.users.register(name)
    }

    /// Send a direct message from `from` to `to`.
    ///
    /// On success exactly one entry lands in each participant's log for the
    /// other: `"You: {text}"` on the sender's side, `"{from}: {text}"` on the
    /// recipient's side. The append is all-or-nothing: both sides' capacity
    /// is checked before either log is touched, so a failure never leaves a
    /// one-sided entry behind.
    pub fn send_message(&mut self, from: &str, to: &str, text: &str) -> Result<()> {
        let max = self.users.max_conversations();

        if !self.users.get(from)?.can_accept_conversation(to, max) {
            return Err(StoreError::CapacityExceeded {
                resource: "Conversation",
                limit: max,
            });
        }
        if !self.users.get(to)?.can_accept_conversation(from, max) {
            return Err(StoreError::CapacityExceeded {
                resource: "Conversation",
                limit: max,
            });
        }

        self.users.get_mut(from)?.record_sent(to, text, max)?;
        self.users.get_mut(to)?.record_received(from, text, max)?;

        debug!(from, to, "Direct message delivered");
        Ok(())
    }

    /// Render `viewer`'s conversation with `counterpart`.
    ///
    /// Returns `None` when no conversation exists; viewing is read-only and
    /// never opens one.
    pub fn view_chat(&self, viewer: &str, counterpart: &str) -> Result<Option<Vec<String>>> {
        let user = self.users.get(viewer)?;
        Ok(user.conversation(counterpart).map(ChatHistory::render))
    }

    /// Create a group with the given initial members.
    ///
    /// Member names that are not registered users are silently skipped;
    /// creation succeeds even when no member survives. Returns the number of
    /// members actually added.
    pub fn create_group(&mut self, name: &str, members: &[String]) -> Result<usize> {
        let registered: Vec<&str> = members
            .iter()
            .map(String::as_str)
            .filter(|member| self.users.contains(member))
            .collect();
        if registered.len() < members.len() {
            debug!(
                group = %name,
                skipped = members.len() - registered.len(),
                "Skipping unregistered member names"
            );
        }
        self.groups.create(name, &registered)
    }

    /// Add a registered user to an existing group.
    pub fn add_group_member(&mut self, group: &str, user: &str) -> Result<()> {
        if !self.users.contains(user) {
            return Err(StoreError::UserNotFound(user.to_string()));
        }
        self.groups.add_member(group, user)
    }

    /// Post a message from `sender` to a group's shared log.
    ///
    /// Only members may post; the entry carries the `"{sender} (Group)"`
    /// author label.
    pub fn send_group_message(&mut self, sender: &str, group: &str, text: &str) -> Result<()> {
        let target = self.groups.get_mut(group)?;
        if !target.is_member(sender) {
            return Err(StoreError::NotAMember {
                user: sender.to_string(),
                group: group.to_string(),
            });
        }
        target.post(sender, text);
        Ok(())
    }

    /// Render a group's shared log.
    pub fn view_group_chat(&self, group: &str) -> Result<Vec<String>> {
        Ok(self.groups.get(group)?.history().render())
    }

    /// The user directory.
    pub fn users(&self) -> &UserDirectory {
        &self.users
    }

    /// The group directory.
    pub fn groups(&self) -> &GroupDirectory {
        &self.groups
    }
}

impl Default for ChatApp {
    fn default() -> Self {
        Self::new(Limits::default())
    }
}
