//! Boards Module
//!
//! The board pages and the traversal that resolves a board for display.
//!
//! ```text
//! boards/
//! ├── mod.rs       - Module exports
//! ├── traversal.rs - Board → lists → items resolution
//! └── handlers.rs  - HTTP handlers
//! ```

pub mod traversal;

pub mod handlers;

pub use traversal::{resolve_board, BoardAggregate, BoardColumn};
