//! Store Module
//!
//! The data access layer. Handlers never talk to a database directly; they go
//! through the [`Store`] trait, which has two implementations:
//!
//! - **`postgres`** - `PgStore`, sqlx over PostgreSQL (production)
//! - **`memory`** - `MemoryStore`, `tokio::sync::RwLock` over hash maps
//!   (no `DATABASE_URL`, and the test suite)
//!
//! # Module Structure
//!
//! ```text
//! store/
//! ├── mod.rs      - Traits and error type
//! ├── memory.rs   - In-memory implementation
//! └── postgres.rs - PostgreSQL implementation
//! ```
//!
//! # Consistency
//!
//! Updates are last-write-wins with no version check. The store does not
//! enforce referential integrity: a board may name a list that no longer
//! exists, and the board traversal reports that as a missing record.

use async_trait::async_trait;
use thiserror::Error;

use crate::shared::{Board, BoardId, Item, ItemId, List, ListId, User, UserId};

/// In-memory implementation
pub mod memory;

/// PostgreSQL implementation
pub mod postgres;

pub use memory::MemoryStore;
pub use postgres::PgStore;

/// Data layer errors
#[derive(Debug, Error)]
pub enum StoreError {
    /// A uniqueness constraint rejected the write
    #[error("duplicate {entity}: {key}")]
    Duplicate {
        /// Kind of record
        entity: &'static str,
        /// The conflicting key
        key: String,
    },

    /// A stored value could not be decoded into a domain type
    #[error("corrupt record: {message}")]
    Corrupt {
        /// Human-readable error message
        message: String,
    },

    /// Database driver error
    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),

    /// Schema migration failure
    #[error("migration error: {0}")]
    Migration(#[from] sqlx::migrate::MigrateError),
}

/// Result alias for store operations
pub type StoreResult<T> = Result<T, StoreError>;

/// Lookups needed to resolve a board's full graph
///
/// Split out of [`Store`] so the traversal only depends on the three reads it
/// performs.
#[async_trait]
pub trait BoardReader: Send + Sync {
    /// Find a board by id
    async fn find_board(&self, id: BoardId) -> StoreResult<Option<Board>>;

    /// Find a list by id
    async fn find_list(&self, id: ListId) -> StoreResult<Option<List>>;

    /// Find an item by id
    async fn find_item(&self, id: ItemId) -> StoreResult<Option<Item>>;
}

/// Full data access interface
#[async_trait]
pub trait Store: BoardReader {
    /// Insert a new user
    ///
    /// Fails with [`StoreError::Duplicate`] when the username is taken; no
    /// record is written in that case.
    async fn insert_user(&self, user: User) -> StoreResult<User>;

    /// Find a user by id
    async fn find_user(&self, id: UserId) -> StoreResult<Option<User>>;

    /// Find a user by username
    async fn find_user_by_username(&self, username: &str) -> StoreResult<Option<User>>;

    /// Find the user linked to a Google subject id, creating one if needed
    async fn find_or_create_google_user(
        &self,
        google_id: &str,
        email: Option<&str>,
    ) -> StoreResult<User>;

    /// Overwrite a user's secret, returning the updated user
    async fn set_user_secret(&self, id: UserId, secret: &str) -> StoreResult<Option<User>>;

    /// All users whose secret is set, oldest first
    async fn users_with_secrets(&self) -> StoreResult<Vec<User>>;

    /// Insert a board together with its lists and items, all or nothing
    async fn insert_board_graph(
        &self,
        board: Board,
        lists: Vec<List>,
        items: Vec<Item>,
    ) -> StoreResult<Board>;

    /// Boards the user owns or collaborates on, oldest first
    async fn boards_for_member(&self, user: UserId) -> StoreResult<Vec<Board>>;

    /// Overwrite a list's title, returning the updated list
    async fn update_list_title(&self, id: ListId, title: &str) -> StoreResult<Option<List>>;

    /// Overwrite an item's title and content, returning the updated item
    async fn update_item_text(
        &self,
        id: ItemId,
        title: &str,
        content: &str,
    ) -> StoreResult<Option<Item>>;
}
