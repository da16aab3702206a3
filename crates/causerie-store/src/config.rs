//! Capacity limits loaded from environment variables.
//!
//! All limits have coded defaults so the store can be constructed with zero
//! configuration. A limit bounds how large a collection may grow; reaching it
//! makes the corresponding operation fail with
//! [`StoreError::CapacityExceeded`](crate::StoreError::CapacityExceeded)
//! rather than silently dropping data.

/// Default maximum number of registered users.
pub const DEFAULT_MAX_USERS: usize = 100;

/// Default maximum number of groups.
pub const DEFAULT_MAX_GROUPS: usize = 100;

/// Default maximum number of distinct conversation counterparts per user.
pub const DEFAULT_MAX_CONVERSATIONS_PER_USER: usize = 100;

/// Default maximum number of members in a single group.
pub const DEFAULT_MAX_GROUP_MEMBERS: usize = 100;

/// Capacity limits for every bounded collection in the store.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Limits {
    /// Maximum number of registered users.
    /// Env: `MAX_USERS`
    /// Default: `100`
    pub max_users: usize,

    /// Maximum number of groups.
    /// Env: `MAX_GROUPS`
    /// Default: `100`
    pub max_groups: usize,

    /// Maximum number of distinct counterparts one user may hold
    /// conversations with. Existing conversations are never affected.
    /// Env: `MAX_CONVERSATIONS_PER_USER`
    /// Default: `100`
    pub max_conversations_per_user: usize,

    /// Maximum number of members in a single group.
    /// Env: `MAX_GROUP_MEMBERS`
    /// Default: `100`
    pub max_group_members: usize,
}

impl Default for Limits {
    fn default() -> Self {
        Self {
            max_users: DEFAULT_MAX_USERS,
            max_groups: DEFAULT_MAX_GROUPS,
            max_conversations_per_user: DEFAULT_MAX_CONVERSATIONS_PER_USER,
            max_group_members: DEFAULT_MAX_GROUP_MEMBERS,
        }
    }
}

impl Limits {
    /// Load limits from environment variables, falling back to defaults.
    pub fn from_env() -> Self {
        let mut limits = Self::default();

        limits.max_users = read_limit("MAX_USERS", limits.max_users);
        limits.max_groups = read_limit("MAX_GROUPS", limits.max_groups);
        limits.max_conversations_per_user = read_limit(
            "MAX_CONVERSATIONS_PER_USER",
            limits.max_conversations_per_user,
        );
        limits.max_group_members = read_limit("MAX_GROUP_MEMBERS", limits.max_group_members);

        limits
    }
}

/// Read one numeric limit from the environment, keeping `default` when the
/// variable is unset or unparsable.
fn read_limit(var: &str, default: usize) -> usize {
    match std::env::var(var) {
        Ok(val) => match val.parse::<usize>() {
            Ok(n) => n,
            Err(_) => {
                tracing::warn!(var, value = %val, "Invalid limit, using default");
                default
            }
        },
        Err(_) => default,
    }
}
