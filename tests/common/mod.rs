//! Common test utilities and helpers
//!
//! - `app` - an application over an in-memory store, driven with `oneshot`
//! - `database` - PostgreSQL store for tests when `DATABASE_URL` is set
//! - `google` - wiremock stand-in for Google's OAuth endpoints
//! - `slow_store` - a store that delays list lookups
//! - `assertions` - status and redirect assertions

pub mod app;

pub use app::*;
pub use assertions::*;
