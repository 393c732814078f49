/**
 * Server Configuration
 *
 * Configuration is read from environment variables (after `.env` has been
 * loaded), with defaults suitable for local development.
 *
 * # Variables
 *
 * - `SERVER_PORT` - listen port (3000)
 * - `DATABASE_URL` - PostgreSQL URL; unset means the in-memory store
 * - `SECRET` - session signing key
 * - `CLIENT_ID`, `CLIENT_SECRET`, `OAUTH_REDIRECT_URL` - Google sign-in
 * - `SENDGRID_API_KEY` - outbound mail key, carried but unused
 * - `REQUEST_TIMEOUT_MS` - board traversal deadline (5000)
 * - `SESSION_TTL_HOURS` - session lifetime (720)
 * - `BCRYPT_COST` - password hashing cost
 * - `STATIC_DIR` - directory served under `/static` (`public`)
 * - `SECURE_COOKIES` - mark the session cookie `Secure` (false); set it
 *   whenever the site is reached over HTTPS
 *
 * # Error Handling
 *
 * Malformed numbers are a [`ConfigError`]. Services that fail to initialize
 * are logged and replaced: an unreachable database falls back to the
 * in-memory store and the server keeps starting.
 */

use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use thiserror::Error;

use crate::backend::store::{MemoryStore, PgStore, Store};

const DEFAULT_PORT: u16 = 3000;
const DEFAULT_TIMEOUT_MS: u64 = 5000;
const DEFAULT_SESSION_TTL_HOURS: u64 = 720;
const DEFAULT_REDIRECT_URL: &str = "http://localhost:3000/auth/google/secrets";
const DEV_SECRET: &str = "organize-development-secret-change-me";

/// Configuration errors
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    /// A variable was set but could not be parsed
    #[error("invalid value for {name}: {value:?}")]
    Invalid {
        name: &'static str,
        value: String,
    },
}

/// Google OAuth client registration
#[derive(Clone)]
pub struct GoogleCredentials {
    pub client_id: String,
    pub client_secret: String,
    /// Callback URL registered with Google
    pub redirect_url: String,
}

/// Everything the server needs to start
#[derive(Clone)]
pub struct ServerConfig {
    pub port: u16,
    pub database_url: Option<String>,
    pub session_secret: String,
    pub google: Option<GoogleCredentials>,
    pub sendgrid_api_key: Option<String>,
    pub request_timeout: Duration,
    pub session_ttl: Duration,
    pub bcrypt_cost: u32,
    pub static_dir: PathBuf,
    pub secure_cookies: bool,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            port: DEFAULT_PORT,
            database_url: None,
            session_secret: DEV_SECRET.to_string(),
            google: None,
            sendgrid_api_key: None,
            request_timeout: Duration::from_millis(DEFAULT_TIMEOUT_MS),
            session_ttl: Duration::from_secs(DEFAULT_SESSION_TTL_HOURS * 3600),
            bcrypt_cost: bcrypt::DEFAULT_COST,
            static_dir: PathBuf::from("public"),
            secure_cookies: false,
        }
    }
}

impl ServerConfig {
    /// Read configuration from the process environment
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Read configuration through `lookup`, treating blank values as unset
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |name: &str| lookup(name).filter(|v| !v.trim().is_empty());
        let defaults = Self::default();

        let session_secret = match get("SECRET") {
            Some(secret) => secret,
            None => {
                tracing::warn!("SECRET not set. Using the development session key.");
                defaults.session_secret
            }
        };

        let google = match (get("CLIENT_ID"), get("CLIENT_SECRET")) {
            (Some(client_id), Some(client_secret)) => Some(GoogleCredentials {
                client_id,
                client_secret,
                redirect_url: get("OAUTH_REDIRECT_URL")
                    .unwrap_or_else(|| DEFAULT_REDIRECT_URL.to_string()),
            }),
            (None, None) => None,
            _ => {
                tracing::warn!("Only one of CLIENT_ID/CLIENT_SECRET set. Google sign-in disabled.");
                None
            }
        };

        Ok(Self {
            port: parse(&get, "SERVER_PORT")?.unwrap_or(defaults.port),
            database_url: get("DATABASE_URL"),
            session_secret,
            google,
            sendgrid_api_key: get("SENDGRID_API_KEY"),
            request_timeout: parse(&get, "REQUEST_TIMEOUT_MS")?
                .map(Duration::from_millis)
                .unwrap_or(defaults.request_timeout),
            session_ttl: parse::<u64, _>(&get, "SESSION_TTL_HOURS")?
                .map(|h| Duration::from_secs(h * 3600))
                .unwrap_or(defaults.session_ttl),
            bcrypt_cost: parse(&get, "BCRYPT_COST")?.unwrap_or(defaults.bcrypt_cost),
            static_dir: get("STATIC_DIR")
                .map(PathBuf::from)
                .unwrap_or(defaults.static_dir),
            secure_cookies: parse(&get, "SECURE_COOKIES")?.unwrap_or(defaults.secure_cookies),
        })
    }

    pub fn with_session_secret(mut self, secret: impl Into<String>) -> Self {
        self.session_secret = secret.into();
        self
    }

    pub fn with_request_timeout(mut self, timeout: Duration) -> Self {
        self.request_timeout = timeout;
        self
    }

    pub fn with_bcrypt_cost(mut self, cost: u32) -> Self {
        self.bcrypt_cost = cost;
        self
    }

    pub fn with_secure_cookies(mut self, secure: bool) -> Self {
        self.secure_cookies = secure;
        self
    }
}

fn parse<T, F>(get: &F, name: &'static str) -> Result<Option<T>, ConfigError>
where
    T: std::str::FromStr,
    F: Fn(&str) -> Option<String>,
{
    get(name)
        .map(|value| {
            value.trim().parse().map_err(|_| ConfigError::Invalid {
                name,
                value: value.clone(),
            })
        })
        .transpose()
}

/// Open the configured store
///
/// - `PgStore` when `DATABASE_URL` is set and reachable
/// - `MemoryStore` when it is unset or the connection fails
///
/// Migration failures are logged and start-up continues.
pub async fn load_store(config: &ServerConfig) -> Arc<dyn Store> {
    let Some(database_url) = config.database_url.as_deref() else {
        tracing::warn!("DATABASE_URL not set. Using the in-memory store; data is lost on restart.");
        return Arc::new(MemoryStore::new());
    };

    tracing::info!("Connecting to database...");

    let store = match PgStore::connect(database_url).await {
        Ok(store) => store,
        Err(e) => {
            tracing::error!("Failed to create database connection pool: {:?}", e);
            tracing::warn!("Falling back to the in-memory store.");
            return Arc::new(MemoryStore::new());
        }
    };

    tracing::info!("Running database migrations...");
    match store.migrate().await {
        Ok(()) => tracing::info!("Database migrations completed successfully"),
        Err(e) => {
            tracing::error!("Failed to run database migrations: {}", e);
            tracing::warn!("Continuing without migrations - database might not be up to date");
        }
    }

    Arc::new(store)
}
