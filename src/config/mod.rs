//! Configuration management for the diario crate.
//!
//! This module handles loading and validating configuration settings from
//! environment variables, with sensible defaults. The only setting is the
//! data directory where the key-value store lives.
//!
//! # Environment Variables
//!
//! - `DIARIO_DIR`: Path to the data directory (defaults to ~/.diario)
//! - `HOME`: Used for expanding the default data directory path

use crate::constants;
use crate::errors::{AppError, AppResult};
use std::env;
use std::fmt;
use std::path::PathBuf;

/// Configuration for the diario crate.
///
/// This struct holds the settings needed to open the persistent key-value
/// store: the directory where the application keeps its private data.
///
/// # Examples
///
/// Creating a configuration manually:
/// ```
/// use diario::Config;
/// use std::path::PathBuf;
///
/// let config = Config {
///     data_dir: PathBuf::from("/path/to/data"),
/// };
/// assert!(config.validate().is_ok());
/// ```
///
/// Loading configuration from environment variables:
/// ```no_run
/// use diario::Config;
///
/// let config = Config::load().expect("Failed to load configuration");
/// let db_path = config.database_path();
/// ```
pub struct Config {
    /// Directory where the application stores its data.
    ///
    /// Loaded from the `DIARIO_DIR` environment variable with a fallback to
    /// `~/.diario` if not specified.
    pub data_dir: PathBuf,
}

impl fmt::Debug for Config {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Config")
            .field("data_dir", &"[REDACTED_PATH]")
            .finish()
    }
}

impl Config {
    /// Loads configuration from environment variables with sensible defaults.
    ///
    /// Reads `DIARIO_DIR`, falling back to `~/.diario` when unset, and
    /// expands `~` and environment variable references via `shellexpand`.
    ///
    /// # Errors
    ///
    /// Returns `AppError::Config` if the path expansion fails or the
    /// resulting path is empty.
    pub fn load() -> AppResult<Self> {
        let data_dir_str = env::var(constants::ENV_VAR_DIARIO_DIR).unwrap_or_else(|_| {
            let home = env::var(constants::ENV_VAR_HOME).unwrap_or_else(|_| "".to_string());
            format!("{}/{}", home, constants::DEFAULT_DATA_SUBDIR)
        });

        let expanded_path = shellexpand::full(&data_dir_str)
            .map_err(|e| AppError::Config(format!("Failed to expand path: {}", e)))?;

        let data_dir = PathBuf::from(expanded_path.into_owned());

        if data_dir.as_os_str().is_empty() {
            return Err(AppError::Config("Data directory path is empty".to_string()));
        }

        Ok(Config { data_dir })
    }

    /// Validates that the configuration is usable.
    ///
    /// # Errors
    ///
    /// Returns `AppError::Config` if the data directory path is empty or
    /// relative.
    pub fn validate(&self) -> AppResult<()> {
        if self.data_dir.as_os_str().is_empty() {
            return Err(AppError::Config("Data directory path is empty".to_string()));
        }

        if !self.data_dir.is_absolute() {
            return Err(AppError::Config(
                "Data directory must be an absolute path".to_string(),
            ));
        }

        Ok(())
    }

    /// Path of the key-value store database inside the data directory.
    pub fn database_path(&self) -> PathBuf {
        self.data_dir.join(constants::DB_FILE_NAME)
    }
}
