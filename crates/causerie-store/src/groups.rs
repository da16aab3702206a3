//! Group registry: named member sets with one shared message history.

use std::collections::{HashMap, HashSet};

use tracing::{debug, info};

use crate::config::Limits;
use crate::error::{Result, StoreError};
use crate::history::ChatHistory;

/// A named group: a set of member names and the history they share.
#[derive(Debug, Clone)]
pub struct Group {
    name: String,
    members: HashSet<String>,
    history: ChatHistory,
}

impl Group {
    fn new(name: &str) -> Self {
        Self {
            name: name.to_string(),
            members: HashSet::new(),
            history: ChatHistory::new(),
        }
    }

    /// The group's unique name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Whether `user` may post to this group.
    pub fn is_member(&self, user: &str) -> bool {
        self.members.contains(user)
    }

    /// Number of members.
    pub fn member_count(&self) -> usize {
        self.members.len()
    }

    /// Member names, sorted for stable output.
    pub fn members(&self) -> Vec<String> {
        let mut members: Vec<String> = self.members.iter().cloned().collect();
        members.sort();
        members
    }

    /// The shared message history.
    pub fn history(&self) -> &ChatHistory {
        &self.history
    }

    /// Append a group message from `sender` under the `"<name> (Group)"`
    /// author label. Membership must have been checked by the caller.
    pub(crate) fn post(&mut self, sender: &str, text: &str) {
        self.history.append(format!("{sender} (Group)"), text);
        debug!(group = %self.name, sender, "Group message recorded");
    }

    /// Add `user` to the member set. Adding an existing member is a no-op;
    /// membership never shrinks, so the set can only grow up to `max`.
    pub(crate) fn add_member(&mut self, user: &str, max: usize) -> Result<()> {
        if self.members.contains(user) {
            return Ok(());
        }
        if self.members.len() >= max {
            return Err(StoreError::CapacityExceeded {
                resource: "Group member",
                limit: max,
            });
        }
        self.members.insert(user.to_string());
        debug!(group = %self.name, user, "Member added");
        Ok(())
    }
}

/// Registry of all groups, keyed by unique name.
///
/// Group names live in their own namespace: a group may share its name with
/// a user without conflict.
#[derive(Debug, Clone)]
pub struct GroupDirectory {
    groups: HashMap<String, Group>,
    max_groups: usize,
    max_members: usize,
}

impl GroupDirectory {
    /// Create an empty directory bounded by the given limits.
    pub fn new(limits: &Limits) -> Self {
        Self {
            groups: HashMap::new(),
            max_groups: limits.max_groups,
            max_members: limits.max_group_members,
        }
    }

    /// Create a group with the given initial members.
    ///
    /// Member names must already be resolved against the user directory by
    /// the caller; this registry only enforces its own bounds. The create is
    /// all-or-nothing: if the members would exceed the per-group limit, no
    /// group is created. Returns the number of members added.
    pub fn create(&mut self, name: &str, members: &[&str]) -> Result<usize> {
        if self.groups.contains_key(name) {
            return Err(StoreError::DuplicateGroup(name.to_string()));
        }
        if self.groups.len() >= self.max_groups {
            return Err(StoreError::CapacityExceeded {
                resource: "Group",
                limit: self.max_groups,
            });
        }

        let unique: HashSet<&str> = members.iter().copied().collect();
        if unique.len() > self.max_members {
            return Err(StoreError::CapacityExceeded {
                resource: "Group member",
                limit: self.max_members,
            });
        }

        let mut group = Group::new(name);
        for member in &unique {
            group.members.insert((*member).to_string());
        }
        let added = group.member_count();
        self.groups.insert(name.to_string(), group);

        info!(group = %name, members = added, "Group created");
        Ok(added)
    }

    /// Add one member to an existing group.
    pub fn add_member(&mut self, name: &str, user: &str) -> Result<()> {
        let max = self.max_members;
        self.get_mut(name)?.add_member(user, max)
    }

    /// Look up a group by name.
    pub fn get(&self, name: &str) -> Result<&Group> {
        self.groups
            .get(name)
            .ok_or_else(|| StoreError::GroupNotFound(name.to_string()))
    }

    /// Look up a group by name, mutably.
    pub fn get_mut(&mut self, name: &str) -> Result<&mut Group> {
        self.groups
            .get_mut(name)
            .ok_or_else(|| StoreError::GroupNotFound(name.to_string()))
    }

    /// Whether `name` names an existing group.
    pub fn contains(&self, name: &str) -> bool {
        self.groups.contains_key(name)
    }

    /// Number of groups.
    pub fn group_count(&self) -> usize {
        self.groups.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn directory(limits: Limits) -> GroupDirectory {
        GroupDirectory::new(&limits)
    }

    #[test]
    fn test_create_and_lookup() {
        let mut dir = directory(Limits::default());
        let added = dir.create("team", &["alice", "bob"]).unwrap();

        assert_eq!(added, 2);
        let group = dir.get("team").unwrap();
        assert_eq!(group.name(), "team");
        assert!(group.is_member("alice"));
        assert!(group.is_member("bob"));
        assert!(!group.is_member("carol"));
        assert_eq!(group.members(), ["alice", "bob"]);
    }

    #[test]
    fn test_create_with_no_members_succeeds() {
        let mut dir = directory(Limits::default());
        assert_eq!(dir.create("empty", &[]).unwrap(), 0);
        assert_eq!(dir.get("empty").unwrap().member_count(), 0);
    }

    #[test]
    fn test_duplicate_group_rejected() {
        let mut dir = directory(Limits::default());
        dir.create("team", &[]).unwrap();

        let err = dir.create("team", &["alice"]).unwrap_err();
        assert!(matches!(err, StoreError::DuplicateGroup(name) if name == "team"));
        assert_eq!(dir.group_count(), 1);
    }

    #[test]
    fn test_group_limit() {
        let mut dir = directory(Limits {
            max_groups: 1,
            ..Limits::default()
        });
        dir.create("one", &[]).unwrap();

        let err = dir.create("two", &[]).unwrap_err();
        assert!(matches!(err, StoreError::CapacityExceeded { limit: 1, .. }));
        assert_eq!(dir.group_count(), 1);
    }

    #[test]
    fn test_member_limit_fails_create_whole() {
        let mut dir = directory(Limits {
            max_group_members: 2,
            ..Limits::default()
        });

        let err = dir.create("team", &["a", "b", "c"]).unwrap_err();
        assert!(matches!(err, StoreError::CapacityExceeded { limit: 2, .. }));
        // All-or-nothing: the group must not exist half-populated.
        assert!(!dir.contains("team"));
    }

    #[test]
    fn test_duplicate_initial_members_collapse() {
        let mut dir = directory(Limits::default());
        let added = dir.create("team", &["alice", "alice", "bob"]).unwrap();
        assert_eq!(added, 2);
    }

    #[test]
    fn test_add_member_limit_surfaces_error() {
        let mut dir = directory(Limits {
            max_group_members: 1,
            ..Limits::default()
        });
        dir.create("team", &["alice"]).unwrap();

        let err = dir.add_member("team", "bob").unwrap_err();
        assert!(matches!(err, StoreError::CapacityExceeded { limit: 1, .. }));
        assert_eq!(dir.get("team").unwrap().member_count(), 1);
    }

    #[test]
    fn test_add_existing_member_is_noop_even_at_limit() {
        let mut dir = directory(Limits {
            max_group_members: 1,
            ..Limits::default()
        });
        dir.create("team", &["alice"]).unwrap();

        dir.add_member("team", "alice").unwrap();
        assert_eq!(dir.get("team").unwrap().member_count(), 1);
    }

    #[test]
    fn test_add_member_to_unknown_group() {
        let mut dir = directory(Limits::default());
        assert!(matches!(
            dir.add_member("ghost", "alice").unwrap_err(),
            StoreError::GroupNotFound(name) if name == "ghost"
        ));
    }

    #[test]
    fn test_post_uses_group_label() {
        let mut dir = directory(Limits::default());
        dir.create("team", &["alice"]).unwrap();

        dir.get_mut("team").unwrap().post("alice", "hello team");
        assert_eq!(
            dir.get("team").unwrap().history().render(),
            vec!["alice (Group): hello team"]
        );
    }
}
