use thiserror::Error;

/// Errors produced by the store layer.
///
/// Every variant is a recoverable outcome reported to the caller as a value;
/// no store operation aborts the process or leaves a partial mutation behind.
#[derive(Error, Debug)]
pub enum StoreError {
    /// The referenced user is not registered.
    #[error("User '{0}' not found")]
    UserNotFound(String),

    /// The referenced group does not exist.
    #[error("Group '{0}' not found")]
    GroupNotFound(String),

    /// Registration attempted with a name that is already taken.
    #[error("Username '{0}' already exists")]
    DuplicateUser(String),

    /// Group creation attempted with a name that is already taken.
    #[error("Group '{0}' already exists")]
    DuplicateGroup(String),

    /// The sender is not allowed to post to the group.
    #[error("'{user}' is not a member of group '{group}'")]
    NotAMember { user: String, group: String },

    /// A bounded collection is full.
    #[error("{resource} limit reached ({limit})")]
    CapacityExceeded {
        resource: &'static str,
        limit: usize,
    },
}

/// Convenience alias used throughout the crate.
pub type Result<T> = std::result::Result<T, StoreError>;
