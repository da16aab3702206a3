//! # causerie-store
//!
//! In-process, memory-resident conversation store: direct chats and named
//! groups among a closed set of users.
//!
//! The crate exposes a synchronous [`ChatApp`] façade that validates every
//! operation, keeps the two sides of a direct conversation mirrored, and
//! enforces explicit capacity limits instead of silently dropping data.
//! Nothing is persisted; all state dies with the process.

pub mod app;
pub mod config;
pub mod groups;
pub mod history;
pub mod models;
pub mod users;

mod error;

pub use app::ChatApp;
pub use config::Limits;
pub use error::{Result, StoreError};
pub use history::ChatHistory;
pub use models::MessageEntry;
