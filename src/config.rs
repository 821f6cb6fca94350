//! Configuration for termscribe.
//!
//! This module provides:
//! - TOML configuration file loading from `~/.termscribe/config.toml`
//! - Defaults matching the built-in greeting demo
//!
//! # Configuration File
//!
//! The configuration file is located at `~/.termscribe/config.toml`:
//!
//! ```toml
//! # Greeting text printed before the entered name
//! greeting = "Hi there"
//!
//! # Rows the greeting is rendered at
//! rows = [3, 5, 10, 20]
//!
//! # Column = row + column_offset
//! column_offset = 5
//!
//! # Force a terminal type instead of reading $TERM (optional)
//! term = "xterm-256color"
//! ```

use std::fs;
use std::path::PathBuf;

use serde::{Deserialize, Serialize};

/// Main configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Greeting text printed before the entered name
    pub greeting: String,
    /// Rows the greeting is rendered at
    pub rows: Vec<u16>,
    /// Column offset added to each row to form the column
    pub column_offset: u16,
    /// Fixed terminal type; `None` means resolve from `$TERM`
    pub term: Option<String>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            greeting: "Hi there".to_string(),
            rows: vec![3, 5, 10, 20],
            column_offset: 5,
            term: None,
        }
    }
}

impl Config {
    /// Load configuration from file
    pub fn load() -> Self {
        if let Some(path) = Self::get_config_path() {
            if path.exists() {
                if let Ok(content) = fs::read_to_string(&path) {
                    if let Ok(config) = toml::from_str(&content) {
                        return config;
                    }
                }
            }
        }
        Self::default()
    }

    /// Get config file path
    fn get_config_path() -> Option<PathBuf> {
        home_dir().map(|home| home.join(".termscribe").join("config.toml"))
    }
}

// Get home directory
pub fn home_dir() -> Option<PathBuf> {
    std::env::var_os("HOME")
        .or_else(|| std::env::var_os("USERPROFILE"))
        .map(PathBuf::from)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = Config::default();
        assert_eq!(config.greeting, "Hi there");
        assert_eq!(config.rows, vec![3, 5, 10, 20]);
        assert_eq!(config.column_offset, 5);
        assert!(config.term.is_none());
    }

    #[test]
    fn test_partial_file_keeps_defaults() {
        let config: Config = toml::from_str("greeting = \"Hello\"").unwrap();
        assert_eq!(config.greeting, "Hello");
        assert_eq!(config.rows, vec![3, 5, 10, 20]);
    }

    #[test]
    fn test_full_file() {
        let config: Config = toml::from_str(
            "greeting = \"Hey\"\nrows = [1, 2]\ncolumn_offset = 3\nterm = \"vt100\"",
        )
        .unwrap();
        assert_eq!(config.greeting, "Hey");
        assert_eq!(config.rows, vec![1, 2]);
        assert_eq!(config.column_offset, 3);
        assert_eq!(config.term.as_deref(), Some("vt100"));
    }
}
