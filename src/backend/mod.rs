//! Backend Module
//!
//! This module contains all server-side code for the Organize application.
//!
//! # Architecture
//!
//! The backend is organized into focused submodules:
//!
//! - **`server`** - Server initialization, application state, configuration
//! - **`routes`** - HTTP route configuration and router assembly
//! - **`store`** - Storage trait and its PostgreSQL / in-memory implementations
//! - **`auth`** - Registration, login, session tokens, Google OAuth
//! - **`middleware`** - Identity extraction for protected routes
//! - **`access`** - Owner/collaborator capability checks
//! - **`boards`** - Dashboard, board traversal, list and item updates
//! - **`secrets`** - The secrets page
//! - **`views`** - Tera templates
//! - **`error`** - Backend-specific error types
//!
//! # Request Flow
//!
//! request → identity extraction → (traversal or direct store call) →
//! render or redirect. Every failure becomes a definite HTTP response via
//! [`BackendError`].
//!
//! # Thread Safety
//!
//! - The store is shared as `Arc<dyn Store>`; implementations are `Send + Sync`
//! - Session keys, views and configuration are immutable after start-up

/// Server setup and configuration
pub mod server;

/// Route configuration
pub mod routes;

/// Data access layer
pub mod store;

/// Authentication and user management
pub mod auth;

/// Middleware for request processing
pub mod middleware;

/// Capability checks
pub mod access;

/// Boards, lists and items
pub mod boards;

/// Secrets page
pub mod secrets;

/// HTML rendering
pub mod views;

/// Backend error types
pub mod error;

/// Re-export commonly used types
pub use server::create_app;
pub use error::BackendError;
pub use store::{MemoryStore, Store};
