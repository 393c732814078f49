//! Route Configuration Module
//!
//! HTTP routes grouped by feature. Each `configure_*` function adds its
//! group to a `Router<AppState>`; `router::create_router` assembles them.
//!
//! # Module Structure
//!
//! ```text
//! routes/
//! ├── mod.rs           - Module exports and documentation
//! ├── router.rs        - Main router creation
//! ├── board_routes.rs  - Landing page, dashboard, boards, updates
//! ├── auth_routes.rs   - Register, login, logout, Google sign-in
//! └── secret_routes.rs - Secrets pages
//! ```
//!
//! # Route Table
//!
//! | Method | Path | Auth |
//! |---|---|---|
//! | GET | `/` | none |
//! | GET, POST | `/dashboard` | required |
//! | GET | `/board/{id}` | required |
//! | POST | `/updateList`, `/updateItem` | required |
//! | GET, POST | `/register`, `/login` | none |
//! | GET | `/logout` | required |
//! | GET | `/auth/google`, `/auth/google/secrets` | none |
//! | GET | `/secrets` | required |
//! | GET, POST | `/submit` | required |
//!
//! Requests to a protected route without a session are redirected to
//! `/login`.

/// Main router creation
pub mod router;

pub mod board_routes;

pub mod auth_routes;

pub mod secret_routes;

pub use router::create_router;
