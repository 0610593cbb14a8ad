//! Runtime configuration resolved from the environment.
//!
//! # Responsibility
//! - Resolve database location and logging options for front ends.
//!
//! # Invariants
//! - Blank variables are treated as unset.
//! - Logging stays disabled unless a log directory is configured.

use crate::logging::{default_log_level, normalize_level};
use std::path::PathBuf;

pub const DB_PATH_VAR: &str = "CONTACTS_DB_PATH";
pub const LOG_LEVEL_VAR: &str = "CONTACTS_LOG_LEVEL";
pub const LOG_DIR_VAR: &str = "CONTACTS_LOG_DIR";

const DEFAULT_DB_FILE_NAME: &str = "contacts.sqlite3";

/// Resolved runtime configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContactsConfig {
    /// SQLite database file.
    pub db_path: PathBuf,
    /// Normalized log level (`trace|debug|info|warn|error`).
    pub log_level: &'static str,
    /// Absolute log directory; `None` disables file logging.
    pub log_dir: Option<String>,
}

impl Default for ContactsConfig {
    fn default() -> Self {
        Self {
            db_path: PathBuf::from(DEFAULT_DB_FILE_NAME),
            log_level: default_log_level(),
            log_dir: None,
        }
    }
}

impl ContactsConfig {
    /// Reads configuration from process environment variables.
    pub fn from_env() -> Result<Self, String> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Reads configuration through an arbitrary variable lookup.
    ///
    /// # Errors
    /// - Returns an error when the configured log level is unsupported.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, String> {
        let read = |key: &str| {
            lookup(key)
                .map(|value| value.trim().to_string())
                .filter(|value| !value.is_empty())
        };

        let mut config = Self::default();
        if let Some(path) = read(DB_PATH_VAR) {
            config.db_path = PathBuf::from(path);
        }
        if let Some(level) = read(LOG_LEVEL_VAR) {
            config.log_level =
                normalize_level(&level).map_err(|err| format!("{LOG_LEVEL_VAR}: {err}"))?;
        }
        config.log_dir = read(LOG_DIR_VAR);

        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::{ContactsConfig, DB_PATH_VAR, LOG_DIR_VAR, LOG_LEVEL_VAR};
    use std::collections::HashMap;
    use std::path::PathBuf;

    fn lookup(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let vars: HashMap<String, String> = pairs
            .iter()
            .map(|(key, value)| (key.to_string(), value.to_string()))
            .collect();
        move |key| vars.get(key).cloned()
    }

    #[test]
    fn empty_environment_uses_defaults() {
        let config = ContactsConfig::from_lookup(lookup(&[])).unwrap();
        assert_eq!(config, ContactsConfig::default());
        assert_eq!(config.db_path, PathBuf::from("contacts.sqlite3"));
        assert!(config.log_dir.is_none());
    }

    #[test]
    fn variables_override_defaults() {
        let config = ContactsConfig::from_lookup(lookup(&[
            (DB_PATH_VAR, "/var/lib/contacts.db"),
            (LOG_LEVEL_VAR, "WARNING"),
            (LOG_DIR_VAR, " /var/log/contacts "),
        ]))
        .unwrap();

        assert_eq!(config.db_path, PathBuf::from("/var/lib/contacts.db"));
        assert_eq!(config.log_level, "warn");
        assert_eq!(config.log_dir.as_deref(), Some("/var/log/contacts"));
    }

    #[test]
    fn blank_variables_are_ignored_and_bad_levels_rejected() {
        let config = ContactsConfig::from_lookup(lookup(&[(DB_PATH_VAR, "  ")])).unwrap();
        assert_eq!(config.db_path, PathBuf::from("contacts.sqlite3"));

        let err = ContactsConfig::from_lookup(lookup(&[(LOG_LEVEL_VAR, "loud")])).unwrap_err();
        assert!(err.starts_with(LOG_LEVEL_VAR));
    }
}
