//! TOML configuration file support.
//!
//! Instead of passing flags on every run, settings can live in a config file:
//!
//! ```toml
//! # phyloxml.toml
//! [writer]
//! indent = 4
//! branch_length = "attribute"
//!
//! [parser]
//! validate = true
//! ```
//!
//! Command-line flags take precedence over file values.

use anyhow::{Context, Result};
use serde::Deserialize;
use std::path::Path;

use phyloxml::phyloxml::WriterConfig;

/// Root configuration structure for phyloxml.toml files.
#[derive(Debug, Default, Deserialize)]
pub struct Config {
    /// Output layout.
    #[serde(default)]
    pub writer: WriterConfig,

    /// Input handling.
    #[serde(default)]
    pub parser: ParserConfig,
}

/// Configuration for reading input files.
#[derive(Debug, Default, Deserialize)]
pub struct ParserConfig {
    /// Run structural validation before parsing.
    pub validate: Option<bool>,
}

impl Config {
    /// Load configuration from a TOML file.
    pub fn from_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;

        Self::from_str(&content)
    }

    /// Parse configuration from a TOML string.
    pub fn from_str(content: &str) -> Result<Self> {
        toml::from_str(content).context("Failed to parse TOML configuration")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use phyloxml::phyloxml::BranchLengthMode;

    #[test]
    fn test_parse_config() {
        let toml = r#"
            [writer]
            indent = 4
            branch_length = "attribute"

            [parser]
            validate = true
        "#;

        let config = Config::from_str(toml).unwrap();
        assert_eq!(config.writer.indent, 4);
        assert_eq!(config.writer.branch_length, BranchLengthMode::Attribute);
        assert_eq!(config.parser.validate, Some(true));
    }

    #[test]
    fn test_partial_config() {
        let toml = r#"
            [writer]
            indent = 0
        "#;

        let config = Config::from_str(toml).unwrap();
        assert_eq!(config.writer.indent, 0);
        assert_eq!(config.writer.branch_length, BranchLengthMode::Element);
        assert_eq!(config.parser.validate, None);
    }

    #[test]
    fn test_empty_config() {
        let config = Config::from_str("").unwrap();
        assert_eq!(config.writer, WriterConfig::default());
        assert_eq!(config.parser.validate, None);
    }

    #[test]
    fn test_unknown_branch_length_is_rejected() {
        let toml = r#"
            [writer]
            branch_length = "sideways"
        "#;
        assert!(Config::from_str(toml).is_err());
    }
}
