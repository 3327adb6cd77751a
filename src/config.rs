//! Configuration for layout reconstruction.

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// Default vertical distance (in detection pixels) below which two fragments
/// share a line.
pub const DEFAULT_LINE_THRESHOLD: f32 = 20.0;

/// Style block prepended to serialized tables.
pub const DEFAULT_TABLE_STYLE: &str = "<style>table{border-collapse:collapse;}\
table,th,td{border:1px solid black;padding:5px;}</style>";

/// Layout reconstruction configuration.
///
/// The line threshold is resolution dependent: it is expressed in the same
/// units as the detector's coordinates and is not derived from font metrics.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LayoutConfig {
    /// Maximum vertical offset between a fragment and its line anchor.
    pub line_threshold: f32,

    /// Separator between fragments of a line and between fragments of a cell.
    pub word_separator: String,

    /// Separator between lines of reading-order text.
    pub line_separator: String,

    /// Style block prepended to table markup.
    pub table_style: String,

    /// HTML-escape cell content before inserting it into table markup.
    pub escape_cell_text: bool,
}

impl Default for LayoutConfig {
    fn default() -> Self {
        Self::new()
    }
}

impl LayoutConfig {
    /// Create new configuration with defaults.
    pub fn new() -> Self {
        Self {
            line_threshold: DEFAULT_LINE_THRESHOLD,
            word_separator: " ".to_string(),
            line_separator: "\n".to_string(),
            table_style: DEFAULT_TABLE_STYLE.to_string(),
            escape_cell_text: false,
        }
    }

    /// Set the line clustering threshold.
    pub fn with_line_threshold(mut self, threshold: f32) -> Self {
        self.line_threshold = threshold;
        self
    }

    /// Set the separator used between fragments.
    pub fn with_word_separator(mut self, separator: impl Into<String>) -> Self {
        self.word_separator = separator.into();
        self
    }

    /// Set the separator used between lines.
    pub fn with_line_separator(mut self, separator: impl Into<String>) -> Self {
        self.line_separator = separator.into();
        self
    }

    /// Set the style block prepended to table markup.
    pub fn with_table_style(mut self, style: impl Into<String>) -> Self {
        self.table_style = style.into();
        self
    }

    /// Enable HTML escaping of cell content.
    pub fn with_escape_cell_text(mut self, enable: bool) -> Self {
        self.escape_cell_text = enable;
        self
    }

    /// Check that all values are usable.
    pub fn validate(&self) -> Result<()> {
        if !self.line_threshold.is_finite() || self.line_threshold < 0.0 {
            return Err(Error::InvalidConfig(format!(
                "line_threshold must be a finite non-negative number, got {}",
                self.line_threshold
            )));
        }
        Ok(())
    }

    /// Load configuration from JSON. Missing fields take their defaults.
    pub fn from_json(json: &str) -> Result<Self> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Serialize configuration to JSON.
    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = LayoutConfig::default();
        assert_eq!(config.line_threshold, 20.0);
        assert_eq!(config.word_separator, " ");
        assert_eq!(config.line_separator, "\n");
        assert!(config.table_style.starts_with("<style>"));
        assert!(config.table_style.ends_with("</style>"));
        assert!(!config.escape_cell_text);
    }

    #[test]
    fn test_builder() {
        let config = LayoutConfig::new()
            .with_line_threshold(12.5)
            .with_word_separator("")
            .with_escape_cell_text(true);
        assert_eq!(config.line_threshold, 12.5);
        assert_eq!(config.word_separator, "");
        assert!(config.escape_cell_text);
    }

    #[test]
    fn test_validate_rejects_bad_threshold() {
        assert!(LayoutConfig::new().with_line_threshold(-1.0).validate().is_err());
        assert!(LayoutConfig::new().with_line_threshold(f32::NAN).validate().is_err());
        assert!(LayoutConfig::new().with_line_threshold(f32::INFINITY).validate().is_err());
        assert!(LayoutConfig::new().with_line_threshold(0.0).validate().is_ok());
    }

    #[test]
    fn test_from_json_partial() {
        let config = LayoutConfig::from_json(r#"{"line_threshold": 8.0}"#).unwrap();
        assert_eq!(config.line_threshold, 8.0);
        assert_eq!(config.word_separator, " ");
    }

    #[test]
    fn test_from_json_invalid_threshold() {
        let result = LayoutConfig::from_json(r#"{"line_threshold": -3.0}"#);
        assert!(matches!(result, Err(Error::InvalidConfig(_))));
    }

    #[test]
    fn test_json_roundtrip() {
        let config = LayoutConfig::new().with_line_separator("\r\n");
        let json = config.to_json().unwrap();
        assert_eq!(LayoutConfig::from_json(&json).unwrap(), config);
    }
}
