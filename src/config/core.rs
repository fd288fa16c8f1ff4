use serde::{Deserialize, Serialize};

use crate::errors::{Error, Result};
use crate::formatting::ColorMode;
use crate::io::output::OutputFormat;
use crate::risk::AlertLevel;

/// Root configuration structure, read from `.derivapp.toml`
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
pub struct DerivappConfig {
    /// Report format settings
    #[serde(default)]
    pub output: Option<OutputConfig>,

    /// Terminal display settings
    #[serde(default)]
    pub display: Option<DisplayConfig>,

    /// Which cases appear in reports
    #[serde(default)]
    pub filter: Option<FilterConfig>,
}

#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
pub struct OutputConfig {
    /// `terminal` or `json`
    pub default_format: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
pub struct DisplayConfig {
    /// `auto`, `always` or `never`
    pub color: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
pub struct FilterConfig {
    /// Hide cases below this alert level
    pub min_level: Option<String>,
    /// List at most this many cases
    pub top: Option<usize>,
}

impl DerivappConfig {
    /// Check every field, reporting all problems at once.
    pub fn validate(&self) -> Result<()> {
        let mut problems = Vec::new();

        if let Some(format) = self.output.as_ref().and_then(|o| o.default_format.as_deref()) {
            if OutputFormat::parse(format).is_none() {
                problems.push(format!(
                    "output.default_format: unknown format '{format}' (expected terminal or json)"
                ));
            }
        }

        if let Some(color) = self.display.as_ref().and_then(|d| d.color.as_deref()) {
            if ColorMode::parse(color).is_none() {
                problems.push(format!(
                    "display.color: unknown mode '{color}' (expected auto, always or never)"
                ));
            }
        }

        if let Some(filter) = &self.filter {
            if let Some(Err(e)) = filter.min_level.as_deref().map(str::parse::<AlertLevel>) {
                problems.push(format!("filter.min_level: {e}"));
            }
            if filter.top == Some(0) {
                problems.push("filter.top: must be at least 1".to_string());
            }
        }

        if problems.is_empty() {
            Ok(())
        } else {
            Err(Error::Configuration(problems.join("; ")))
        }
    }

    pub fn default_format(&self) -> OutputFormat {
        self.output
            .as_ref()
            .and_then(|o| o.default_format.as_deref())
            .and_then(OutputFormat::parse)
            .unwrap_or(OutputFormat::Terminal)
    }

    pub fn color_mode(&self) -> ColorMode {
        self.display
            .as_ref()
            .and_then(|d| d.color.as_deref())
            .and_then(ColorMode::parse)
            .unwrap_or(ColorMode::Auto)
    }

    pub fn min_level(&self) -> AlertLevel {
        self.filter
            .as_ref()
            .and_then(|f| f.min_level.as_deref())
            .and_then(|level| level.parse().ok())
            .unwrap_or(AlertLevel::NoneLow)
    }

    pub fn top(&self) -> Option<usize> {
        self.filter.as_ref().and_then(|f| f.top)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_config_uses_defaults() {
        let config = DerivappConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.default_format(), OutputFormat::Terminal);
        assert_eq!(config.color_mode(), ColorMode::Auto);
        assert_eq!(config.min_level(), AlertLevel::NoneLow);
        assert_eq!(config.top(), None);
    }

    #[test]
    fn validation_reports_every_problem() {
        let config = DerivappConfig {
            output: Some(OutputConfig {
                default_format: Some("xml".into()),
            }),
            display: Some(DisplayConfig {
                color: Some("sometimes".into()),
            }),
            filter: Some(FilterConfig {
                min_level: Some("severe".into()),
                top: Some(0),
            }),
        };
        let message = config.validate().unwrap_err().to_string();
        assert!(message.contains("output.default_format"));
        assert!(message.contains("display.color"));
        assert!(message.contains("filter.min_level"));
        assert!(message.contains("filter.top"));
    }

    #[test]
    fn typed_accessors_read_valid_values() {
        let config = DerivappConfig {
            output: Some(OutputConfig {
                default_format: Some("json".into()),
            }),
            display: Some(DisplayConfig {
                color: Some("never".into()),
            }),
            filter: Some(FilterConfig {
                min_level: Some("high".into()),
                top: Some(5),
            }),
        };
        assert!(config.validate().is_ok());
        assert_eq!(config.default_format(), OutputFormat::Json);
        assert_eq!(config.color_mode(), ColorMode::Never);
        assert_eq!(config.min_level(), AlertLevel::High);
        assert_eq!(config.top(), Some(5));
    }
}
