//! Organize - Main Library
//!
//! Organize is a small task board web application: users register or sign in
//! with Google, create boards, and edit the lists and items on them.
//!
//! # Module Structure
//!
//! - **`shared`** - Domain types
//!   - Typed ids, users, boards, lists, items
//!   - Validation errors
//!
//! - **`backend`** - Server-side code
//!   - Axum HTTP server, routes and handlers
//!   - Storage trait with PostgreSQL and in-memory implementations
//!   - Session tokens, password hashing, Google OAuth
//!   - Board traversal and HTML views
//!
//! # Usage
//!
//! ```rust,no_run
//! use organize::backend::server::{config::ServerConfig, init::create_app};
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let config = ServerConfig::from_env()?;
//! let app = create_app(config).await?;
//! // Serve `app` with axum::serve
//! # Ok(())
//! # }
//! ```
//!
//! # Error Handling
//!
//! - `Result<T, E>` for fallible operations
//! - `shared::error::SharedError` for input validation
//! - `backend::store::StoreError` for the data layer
//! - `backend::error::BackendError` for HTTP responses

/// Shared types and data structures
pub mod shared;

/// Backend server-side code
pub mod backend;
