//! Authentication Module
//!
//! Identity for the application: local accounts, Google sign-in, and the
//! session token that ties later requests to a user.
//!
//! - **`users`** - registration and password checks over the store
//! - **`sessions`** - JWT issue/verify and cookie helpers
//! - **`google`** - Google OAuth 2.0 client
//! - **`handlers`** - HTTP handlers for the auth pages and callbacks
//!
//! # Module Structure
//!
//! ```text
//! auth/
//! ├── mod.rs       - Module exports and documentation
//! ├── users.rs     - Registration and authentication
//! ├── sessions.rs  - JWT token management and cookies
//! ├── google.rs    - Google OAuth client
//! └── handlers/    - HTTP handlers
//! ```
//!
//! # Security
//!
//! - Passwords are hashed using bcrypt before storage
//! - Sessions are HS256 JWTs in an `HttpOnly` cookie
//! - Invalid credentials return 401 without saying which part was wrong

pub mod users;

pub mod sessions;

pub mod google;

pub mod handlers;

pub use sessions::{Claims, SessionKeys};
pub use users::{authenticate, register_user};
