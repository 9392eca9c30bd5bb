//! Configuration loading
//!
//! Layered as: serde defaults, then an optional TOML file, then
//! `EVPLAN__*` environment variables (highest precedence):
//!
//! ```toml
//! [database]
//! path = "/var/lib/evplan/evplan.db"
//! busy_timeout_ms = 5000
//!
//! [logging]
//! profile = "production"
//! filter = "evplan=debug"
//! ```
//!
//! - `EVPLAN__DATABASE__PATH=/tmp/evplan.db`
//! - `EVPLAN__LOGGING__PROFILE=production`

use std::path::{Path, PathBuf};
use std::time::Duration;

use config::{Config as ConfigBuilder, Environment, File};
use serde::{Deserialize, Serialize};

use crate::errors::{ExError, ExErrorKind, Result};
use crate::logging_facility::Profile;

/// Environment variable prefix for configuration overrides
pub const ENV_PREFIX: &str = "EVPLAN";

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AppConfig {
    #[serde(default)]
    pub database: DatabaseConfig,
    #[serde(default)]
    pub logging: LoggingConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DatabaseConfig {
    /// SQLite database file
    #[serde(default = "default_database_path")]
    pub path: PathBuf,

    /// How long a unit of work waits for the write lock before failing
    #[serde(default = "default_busy_timeout_ms")]
    pub busy_timeout_ms: u64,
}

impl DatabaseConfig {
    pub fn busy_timeout(&self) -> Duration {
        Duration::from_millis(self.busy_timeout_ms)
    }
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self {
            path: default_database_path(),
            busy_timeout_ms: default_busy_timeout_ms(),
        }
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct LoggingConfig {
    #[serde(default)]
    pub profile: Profile,

    /// Fallback `EnvFilter` directive when `RUST_LOG` is unset
    #[serde(default)]
    pub filter: Option<String>,
}

fn default_database_path() -> PathBuf {
    PathBuf::from(".evplan").join("evplan.db")
}

fn default_busy_timeout_ms() -> u64 {
    5000
}

/// Load `.env` from the working directory into the process environment
///
/// Missing files are ignored.
pub fn load_dotenv() {
    if let Ok(path) = dotenvy::dotenv() {
        tracing::debug!(path = %path.display(), "Loaded environment file");
    }
}

/// Load configuration
///
/// `path` names an optional TOML file; a missing file is not an error.
pub fn load(path: Option<&Path>) -> Result<AppConfig> {
    let mut builder = ConfigBuilder::builder();
    if let Some(path) = path {
        builder = builder.add_source(File::from(path).required(false));
    }
    builder = builder.add_source(
        Environment::with_prefix(ENV_PREFIX)
            .separator("__")
            .try_parsing(true),
    );

    builder
        .build()
        .and_then(|config| config.try_deserialize::<AppConfig>())
        .map_err(|e| {
            ExError::new(ExErrorKind::Config)
                .with_op("load_config")
                .with_message(e.to_string())
        })
}
