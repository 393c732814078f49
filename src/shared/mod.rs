//! Shared Module
//!
//! Domain types used by every layer of the application: typed identifiers,
//! the user record and the Board → List → Item hierarchy.
//!
//! # Overview
//!
//! These types are storage-agnostic. The store implementations map them to
//! rows or in-memory collections; the view layer serializes them into template
//! contexts.

/// Typed identifiers
pub mod ids;

/// User record
pub mod user;

/// Boards, lists, items and comments
pub mod board;

/// Shared error types
pub mod error;

/// Re-export commonly used types for convenience
pub use ids::{BoardId, CommentId, ItemId, ListId, UserId};
pub use user::{User, GOOGLE_USERNAME_PREFIX};
pub use board::{Board, Comment, CommentAuthor, Item, ItemStatus, List};
pub use error::SharedError;
