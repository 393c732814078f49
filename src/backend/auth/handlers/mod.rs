//! Authentication Handlers Module
//!
//! # Module Structure
//!
//! ```text
//! handlers/
//! ├── mod.rs      - Module exports and documentation
//! ├── types.rs    - Form and query types
//! ├── register.rs - GET/POST /register
//! ├── login.rs    - GET/POST /login
//! ├── logout.rs   - GET /logout
//! └── oauth.rs    - Google sign-in redirect and callback
//! ```
//!
//! Every successful sign-in, whichever way it happens, ends the same way: a
//! session cookie and a 303 redirect to `/dashboard`.

/// Form and query types
pub mod types;

/// Registration handlers
pub mod register;

/// Login handlers
pub mod login;

/// Logout handler
pub mod logout;

/// Google sign-in handlers
pub mod oauth;

pub use login::{login, login_page};
pub use logout::logout;
pub use oauth::{google_callback, google_redirect};
pub use register::{register, register_page};
pub use types::{CredentialsForm, OAuthCallback};
