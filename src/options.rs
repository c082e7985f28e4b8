//! Parser options: which extension delimiters are recognized

use crate::delimiter::DelimiterKind;
use crate::error::ConfigError;
use serde::{Deserialize, Serialize};
use std::path::Path;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Options {
    /// `~~text~~` renders as `<del>`.
    pub strikethrough: bool,
    /// `||text||` renders as `<spoiler>`.
    pub spoiler: bool,
}

impl Default for Options {
    fn default() -> Self {
        Options {
            strikethrough: true,
            spoiler: true,
        }
    }
}

impl Options {
    /// CommonMark emphasis only, no extensions.
    pub fn commonmark() -> Self {
        Options {
            strikethrough: false,
            spoiler: false,
        }
    }

    pub fn enables(&self, kind: DelimiterKind) -> bool {
        match kind {
            DelimiterKind::Asterisk | DelimiterKind::Underscore => true,
            DelimiterKind::Tilde => self.strikethrough,
            DelimiterKind::Pipe => self.spoiler,
        }
    }

    pub fn from_toml_str(text: &str) -> Result<Self, toml::de::Error> {
        toml::from_str(text)
    }

    pub fn load_from_path<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml_str(&content).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use tempfile::TempDir;

    #[test]
    fn test_empty_toml_is_default() {
        assert_eq!(Options::from_toml_str("").unwrap(), Options::default());
    }

    #[test]
    fn test_partial_toml() {
        let options = Options::from_toml_str("spoiler = false\n").unwrap();
        assert!(options.strikethrough);
        assert!(!options.spoiler);
        assert!(!options.enables(DelimiterKind::Pipe));
        assert!(options.enables(DelimiterKind::Asterisk));
    }

    #[test]
    fn test_unknown_key_is_rejected() {
        assert!(Options::from_toml_str("superscript = true\n").is_err());
    }

    #[test]
    fn test_missing_file_reports_path() {
        let err = Options::load_from_path("/nonexistent/inlinemark.toml").unwrap_err();
        assert!(matches!(err, ConfigError::Read { .. }));
        assert!(err.to_string().contains("/nonexistent/inlinemark.toml"));
    }

    #[test]
    fn test_load_from_file() {
        let temp_dir = TempDir::new().unwrap();
        let config_file = temp_dir.path().join("inlinemark.toml");
        std::fs::write(&config_file, "strikethrough = false\n").unwrap();

        let options = Options::load_from_path(&config_file).unwrap();
        assert!(!options.strikethrough);
        assert!(options.spoiler);
    }

    #[test]
    fn test_invalid_toml_reports_path() {
        let temp_dir = TempDir::new().unwrap();
        let config_file = temp_dir.path().join("inlinemark.toml");
        std::fs::write(&config_file, "spoiler = [not toml\n").unwrap();

        let err = Options::load_from_path(&config_file).unwrap_err();
        assert!(matches!(err, ConfigError::Parse { .. }));
        assert!(err.to_string().contains(&config_file.display().to_string()));
    }
}
