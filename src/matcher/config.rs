//! Options for matching strings against templates

use std::path::Path;

use serde::Deserialize;
use thiserror::Error;

/// Errors that can occur when loading match options
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to read match options file: {0}")]
    IoError(#[from] std::io::Error),
    #[error("Failed to parse match options TOML: {0}")]
    ParseError(#[from] toml::de::Error),
}

/// Configuration options for [`Template::unformat_with`](crate::Template::unformat_with)
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct MatchOptions {
    /// Accept a blank value for a parameter that ends the template
    pub allow_blank_tail: bool,

    /// Strip surrounding whitespace from bound values
    pub trim_values: bool,
}

/// TOML layout: options live under a `[match]` table
#[derive(Deserialize)]
struct TomlConfig {
    #[serde(rename = "match", default)]
    matching: MatchOptions,
}

impl MatchOptions {
    /// Create a new configuration with default values
    pub fn new() -> Self {
        Self::default()
    }

    /// Set whether a trailing parameter may bind a blank value
    pub fn with_allow_blank_tail(mut self, allow: bool) -> Self {
        self.allow_blank_tail = allow;
        self
    }

    /// Set whether bound values are trimmed
    pub fn with_trim_values(mut self, trim: bool) -> Self {
        self.trim_values = trim;
        self
    }

    /// Load options from a TOML file
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)?;
        Self::from_str(&content)
    }

    /// Load options from a TOML string
    pub fn from_str(content: &str) -> Result<Self, ConfigError> {
        let parsed: TomlConfig = toml::from_str(content)?;
        Ok(parsed.matching)
    }
}
