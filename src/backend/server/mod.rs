//! Server Module
//!
//! Everything needed to turn configuration into a running Axum application.
//!
//! - **`config`** - `ServerConfig` from the environment, store selection
//! - **`state`** - `AppState` and its `FromRef` implementations
//! - **`init`** - application assembly
//!
//! # Module Structure
//!
//! ```text
//! server/
//! ├── mod.rs    - Module exports and documentation
//! ├── config.rs - Configuration loading
//! ├── state.rs  - AppState and FromRef implementations
//! └── init.rs   - Server initialization and app creation
//! ```
//!
//! # Example
//!
//! ```rust,no_run
//! use organize::backend::server::{create_app, ServerConfig};
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let config = ServerConfig::from_env()?;
//! let app = create_app(config).await?;
//! # let _ = app;
//! # Ok(())
//! # }
//! ```

/// Application state management
pub mod state;

/// Server configuration loading
pub mod config;

/// Server initialization
pub mod init;

pub use config::{ConfigError, GoogleCredentials, ServerConfig};
pub use init::{build_app, build_app_with_oauth, create_app};
pub use state::AppState;
