//! Middleware Module
//!
//! Request processing that runs before handlers.
//!
//! - **`auth`** - session resolution and the `CurrentUser` extractor
//!
//! # Example
//!
//! ```rust,no_run
//! use organize::backend::middleware::CurrentUser;
//!
//! async fn handler(CurrentUser(user): CurrentUser) -> String {
//!     user.username
//! }
//! ```

pub mod auth;

pub use auth::{current_identity, CurrentUser};
