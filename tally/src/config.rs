//! Session configuration
//!
//! Defaults are relative to the working directory and can be overridden
//! from the environment.

use std::env;
use std::path::PathBuf;
use tally_history::DEFAULT_HISTORY_FILE;
use tally_plugin::DEFAULT_PLUGIN_DIR;

pub const HISTORY_FILE_ENV: &str = "TALLY_HISTORY_FILE";
pub const PLUGIN_DIR_ENV: &str = "TALLY_PLUGIN_DIR";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    pub history_file: PathBuf,
    pub plugin_dir: PathBuf,
}

impl Config {
    pub fn from_env() -> Self {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Build from an arbitrary variable lookup; empty values are ignored
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let get = |key: &str| lookup(key).filter(|v| !v.trim().is_empty()).map(PathBuf::from);
        let defaults = Self::default();
        Self {
            history_file: get(HISTORY_FILE_ENV).unwrap_or(defaults.history_file),
            plugin_dir: get(PLUGIN_DIR_ENV).unwrap_or(defaults.plugin_dir),
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            history_file: PathBuf::from(DEFAULT_HISTORY_FILE),
            plugin_dir: PathBuf::from(DEFAULT_PLUGIN_DIR),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = Config::from_lookup(|_| None);
        assert_eq!(config.history_file, PathBuf::from("data/history.csv"));
        assert_eq!(config.plugin_dir, PathBuf::from("plugins"));
    }

    #[test]
    fn test_env_overrides() {
        let config = Config::from_lookup(|key| match key {
            HISTORY_FILE_ENV => Some("/tmp/h.csv".to_string()),
            PLUGIN_DIR_ENV => Some("  ".to_string()),
            _ => None,
        });
        assert_eq!(config.history_file, PathBuf::from("/tmp/h.csv"));
        assert_eq!(config.plugin_dir, PathBuf::from("plugins"));
    }
}
