//! Reader and writer options.
//!
//! [`NpfConfig`] can be built in code or loaded from TOML. Partial files are
//! accepted; unspecified values keep their defaults:
//!
//! ```toml
//! [reader]
//! strict_revision = true
//!
//! [writer]
//! line_ending = "crlf"
//! ```

use std::path::Path;

use npf_core::{NpfError, NpfResult};
use serde::{Deserialize, Serialize};

/// Options for every load and save entry point.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct NpfConfig {
    pub reader: ReaderConfig,
    pub writer: WriterConfig,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ReaderConfig {
    /// Lines starting with this character (after indentation) are skipped.
    pub comment_marker: char,

    /// Reject files whose NPF_REVISION differs from the supported revision
    /// instead of logging a warning.
    pub strict_revision: bool,
}

impl Default for ReaderConfig {
    fn default() -> Self {
        Self {
            comment_marker: '#',
            strict_revision: false,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct WriterConfig {
    pub line_ending: LineEnding,

    /// Separate consecutive sections with an empty line.
    pub blank_line_between_sections: bool,
}

impl Default for WriterConfig {
    fn default() -> Self {
        Self {
            line_ending: LineEnding::Lf,
            blank_line_between_sections: true,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum LineEnding {
    #[default]
    Lf,
    Crlf,
}

impl LineEnding {
    pub fn as_str(&self) -> &'static str {
        match self {
            LineEnding::Lf => "\n",
            LineEnding::Crlf => "\r\n",
        }
    }
}

impl NpfConfig {
    /// Parse a (possibly partial) TOML document.
    pub fn from_toml_str(contents: &str) -> NpfResult<Self> {
        toml::from_str(contents).map_err(|e| NpfError::Config(e.to_string()))
    }

    /// Load configuration from a TOML file.
    pub fn load_from(path: impl AsRef<Path>) -> NpfResult<Self> {
        let contents = std::fs::read_to_string(path)?;
        Self::from_toml_str(&contents)
    }

    /// Save configuration as TOML.
    pub fn save_to(&self, path: impl AsRef<Path>) -> NpfResult<()> {
        let contents =
            toml::to_string_pretty(self).map_err(|e| NpfError::Config(e.to_string()))?;
        std::fs::write(path, contents)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::NamedTempFile;

    #[test]
    fn test_default_config() {
        let config = NpfConfig::default();
        assert_eq!(config.reader.comment_marker, '#');
        assert!(!config.reader.strict_revision);
        assert_eq!(config.writer.line_ending, LineEnding::Lf);
        assert!(config.writer.blank_line_between_sections);
    }

    #[test]
    fn test_partial_config_parsing() {
        let toml = r#"
            [reader]
            strict_revision = true

            [writer]
            line_ending = "crlf"
        "#;

        let config = NpfConfig::from_toml_str(toml).unwrap();
        assert!(config.reader.strict_revision);
        assert_eq!(config.writer.line_ending, LineEnding::Crlf);

        // Defaults for unset values
        assert_eq!(config.reader.comment_marker, '#');
        assert!(config.writer.blank_line_between_sections);
    }

    #[test]
    fn test_invalid_config_is_reported() {
        let err = NpfConfig::from_toml_str("[writer]\nline_ending = \"cr\"").unwrap_err();
        assert!(matches!(err, NpfError::Config(_)));
    }

    #[test]
    fn test_save_and_load() {
        let file = NamedTempFile::new().unwrap();
        let mut config = NpfConfig::default();
        config.reader.comment_marker = ';';
        config.writer.blank_line_between_sections = false;
        config.save_to(file.path()).unwrap();

        let loaded = NpfConfig::load_from(file.path()).unwrap();
        assert_eq!(loaded, config);
    }
}
