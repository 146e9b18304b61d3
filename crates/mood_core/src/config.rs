//! Runtime configuration for journal hosts.
//!
//! # Responsibility
//! - Resolve database path, log directory and log level from the environment.
//! - Validate values once, before any storage or logging is touched.
//!
//! # Invariants
//! - Blank environment values fall back to defaults.
//! - An unsupported log level is an error, never silently replaced.

use std::error::Error;
use std::fmt::{Display, Formatter};
use std::path::{Path, PathBuf};

pub const DB_PATH_ENV: &str = "MOOD_JOURNAL_DB_PATH";
pub const LOG_DIR_ENV: &str = "MOOD_JOURNAL_LOG_DIR";
pub const LOG_LEVEL_ENV: &str = "MOOD_JOURNAL_LOG_LEVEL";

const DEFAULT_DB_FILE_NAME: &str = "mood_journal.sqlite3";
const DEFAULT_LOG_DIR_NAME: &str = "mood_journal_logs";

/// Supported log verbosity levels.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogLevel {
    Trace,
    Debug,
    Info,
    Warn,
    Error,
}

impl LogLevel {
    /// Parses a case-insensitive level name; `warning` is accepted as `warn`.
    pub fn parse(value: &str) -> Result<Self, ConfigError> {
        match value.trim().to_ascii_lowercase().as_str() {
            "trace" => Ok(Self::Trace),
            "debug" => Ok(Self::Debug),
            "info" => Ok(Self::Info),
            "warn" | "warning" => Ok(Self::Warn),
            "error" => Ok(Self::Error),
            other => Err(ConfigError::UnsupportedLogLevel(other.to_string())),
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Trace => "trace",
            Self::Debug => "debug",
            Self::Info => "info",
            Self::Warn => "warn",
            Self::Error => "error",
        }
    }

    /// `Debug` for debug builds, `Info` for release builds.
    pub fn build_default() -> Self {
        if cfg!(debug_assertions) {
            Self::Debug
        } else {
            Self::Info
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigError {
    UnsupportedLogLevel(String),
    RelativeLogDir(PathBuf),
}

impl Display for ConfigError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::UnsupportedLogLevel(value) => write!(
                f,
                "unsupported log level `{value}`; expected trace|debug|info|warn|error"
            ),
            Self::RelativeLogDir(path) => write!(
                f,
                "log_dir must be an absolute path, got `{}`",
                path.display()
            ),
        }
    }
}

impl Error for ConfigError {}

/// Resolved host configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct JournalConfig {
    /// SQLite database file holding all entries.
    pub db_path: PathBuf,
    /// Absolute directory for rolling log files.
    pub log_dir: PathBuf,
    pub log_level: LogLevel,
}

impl Default for JournalConfig {
    fn default() -> Self {
        let temp_dir = std::env::temp_dir();
        Self {
            db_path: temp_dir.join(DEFAULT_DB_FILE_NAME),
            log_dir: temp_dir.join(DEFAULT_LOG_DIR_NAME),
            log_level: LogLevel::build_default(),
        }
    }
}

impl JournalConfig {
    /// Resolves configuration from process environment variables.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Resolves configuration from an arbitrary key lookup.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let defaults = Self::default();
        let non_blank = |key: &str| {
            lookup(key)
                .map(|value| value.trim().to_string())
                .filter(|value| !value.is_empty())
        };

        let db_path = non_blank(DB_PATH_ENV)
            .map(PathBuf::from)
            .unwrap_or(defaults.db_path);
        let log_dir = non_blank(LOG_DIR_ENV)
            .map(PathBuf::from)
            .unwrap_or(defaults.log_dir);
        if !log_dir.is_absolute() {
            return Err(ConfigError::RelativeLogDir(log_dir));
        }
        let log_level = match non_blank(LOG_LEVEL_ENV) {
            Some(value) => LogLevel::parse(&value)?,
            None => defaults.log_level,
        };

        Ok(Self {
            db_path,
            log_dir,
            log_level,
        })
    }

    /// Replaces the database path, e.g. from a command-line flag.
    pub fn with_db_path(mut self, db_path: impl AsRef<Path>) -> Self {
        self.db_path = db_path.as_ref().to_path_buf();
        self
    }
}

#[cfg(test)]
mod tests {
    use super::{
        ConfigError, JournalConfig, LogLevel, DB_PATH_ENV, LOG_DIR_ENV, LOG_LEVEL_ENV,
    };
    use std::collections::HashMap;
    use std::path::PathBuf;

    fn lookup_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map = pairs
            .iter()
            .map(|(key, value)| (key.to_string(), value.to_string()))
            .collect::<HashMap<_, _>>();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn log_level_accepts_known_values() {
        assert_eq!(LogLevel::parse("INFO").unwrap(), LogLevel::Info);
        assert_eq!(LogLevel::parse(" warning ").unwrap(), LogLevel::Warn);
        assert!(matches!(
            LogLevel::parse("verbose"),
            Err(ConfigError::UnsupportedLogLevel(_))
        ));
    }

    #[test]
    fn blank_values_fall_back_to_defaults() {
        let config = JournalConfig::from_lookup(lookup_from(&[(DB_PATH_ENV, "   ")])).unwrap();
        assert_eq!(config, JournalConfig::default());
    }

    #[test]
    fn explicit_values_override_defaults() {
        let log_dir = std::env::temp_dir().join("mood-config-test");
        let config = JournalConfig::from_lookup(lookup_from(&[
            (DB_PATH_ENV, "/data/journal.sqlite3"),
            (LOG_DIR_ENV, log_dir.to_str().unwrap()),
            (LOG_LEVEL_ENV, "error"),
        ]))
        .unwrap();

        assert_eq!(config.db_path, PathBuf::from("/data/journal.sqlite3"));
        assert_eq!(config.log_dir, log_dir);
        assert_eq!(config.log_level, LogLevel::Error);
    }

    #[test]
    fn relative_log_dir_is_rejected() {
        let err = JournalConfig::from_lookup(lookup_from(&[(LOG_DIR_ENV, "logs/dev")]))
            .unwrap_err();
        assert_eq!(err, ConfigError::RelativeLogDir(PathBuf::from("logs/dev")));
    }
}
