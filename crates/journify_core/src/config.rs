//! Runtime configuration resolved from the environment.
//!
//! | Variable              | Default                          |
//! |-----------------------|----------------------------------|
//! | `JOURNIFY_DB_PATH`    | `<temp_dir>/journify.sqlite3`    |
//! | `JOURNIFY_LOG_LEVEL`  | `default_log_level()`            |
//! | `JOURNIFY_LOG_DIR`    | unset: file logging stays off    |

use crate::logging::{default_log_level, init_logging};
use std::path::PathBuf;

pub const DB_PATH_ENV: &str = "JOURNIFY_DB_PATH";
pub const LOG_LEVEL_ENV: &str = "JOURNIFY_LOG_LEVEL";
pub const LOG_DIR_ENV: &str = "JOURNIFY_LOG_DIR";

const DEFAULT_DB_FILE_NAME: &str = "journify.sqlite3";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CoreConfig {
    pub db_path: PathBuf,
    pub log_level: String,
    pub log_dir: Option<PathBuf>,
}

impl CoreConfig {
    pub fn from_env() -> Self {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Resolves configuration through `lookup`; blank values count as unset.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let read = |name: &str| {
            lookup(name)
                .map(|value| value.trim().to_string())
                .filter(|value| !value.is_empty())
        };

        Self {
            db_path: read(DB_PATH_ENV)
                .map(PathBuf::from)
                .unwrap_or_else(|| std::env::temp_dir().join(DEFAULT_DB_FILE_NAME)),
            log_level: read(LOG_LEVEL_ENV).unwrap_or_else(|| default_log_level().to_string()),
            log_dir: read(LOG_DIR_ENV).map(PathBuf::from),
        }
    }

    /// Starts file logging when a log directory is configured.
    ///
    /// Returns `Ok(false)` when logging is left off.
    pub fn init_logging(&self) -> Result<bool, String> {
        let Some(log_dir) = &self.log_dir else {
            return Ok(false);
        };
        let log_dir = log_dir
            .to_str()
            .ok_or_else(|| format!("log_dir `{}` is not valid UTF-8", log_dir.display()))?;
        init_logging(&self.log_level, log_dir)?;
        Ok(true)
    }
}
