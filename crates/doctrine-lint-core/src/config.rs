//! Configuration types for doctrine-lint.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::PathBuf;

use crate::capability::Marker;
use crate::types::Severity;

/// Top-level configuration for doctrine-lint.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    /// Preset to use (e.g., "recommended", "strict", "minimal").
    #[serde(default)]
    pub preset: Option<String>,

    /// Severity threshold for test failure (default: "error").
    #[serde(default)]
    pub fail_on: Option<String>,

    /// Analyzer configuration.
    #[serde(default)]
    pub analyzer: AnalyzerConfig,

    /// Additional capability markers, on top of the built-in registry.
    #[serde(default)]
    pub capabilities: Vec<Marker>,

    /// Per-rule configurations, keyed by rule name or ID.
    #[serde(default)]
    pub rules: HashMap<String, RuleConfig>,
}

impl Config {
    /// Creates a new default configuration.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Loads configuration from a TOML file.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or parsed.
    pub fn from_file(path: &std::path::Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|e| ConfigError::Io {
            path: path.to_path_buf(),
            source: e,
        })?;
        Self::parse(&content)
    }

    /// Parses configuration from a TOML string.
    ///
    /// # Errors
    ///
    /// Returns an error if the TOML is invalid.
    pub fn parse(content: &str) -> Result<Self, ConfigError> {
        toml::from_str(content).map_err(|e| ConfigError::Parse {
            message: e.to_string(),
        })
    }

    /// Gets the configuration for a rule, looked up by name first, then ID.
    #[must_use]
    pub fn rule(&self, code: &str, name: &str) -> Option<&RuleConfig> {
        self.rules.get(name).or_else(|| self.rules.get(code))
    }

    /// Checks if a rule is enabled.
    #[must_use]
    pub fn is_rule_enabled(&self, code: &str, name: &str) -> bool {
        self.rule(code, name)
            .map_or(true, |c| c.enabled.unwrap_or(true))
    }

    /// Gets the severity override for a rule.
    #[must_use]
    pub fn rule_severity(&self, code: &str, name: &str) -> Option<Severity> {
        self.rule(code, name).and_then(|c| c.severity)
    }

    /// Resolves `fail_on`, defaulting to `error`.
    ///
    /// # Errors
    ///
    /// Returns an error if the configured name is not a severity.
    pub fn fail_on_severity(&self) -> Result<Severity, ConfigError> {
        let name = self.fail_on.as_deref().unwrap_or("error");
        Severity::from_name(name).ok_or_else(|| ConfigError::UnknownSeverity {
            name: name.to_string(),
        })
    }
}

/// Analyzer-level configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AnalyzerConfig {
    /// Maximum number of worker threads; `1` evaluates sequentially.
    #[serde(default)]
    pub parallelism: Option<usize>,
}

/// Per-rule configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RuleConfig {
    /// Whether this rule is enabled.
    #[serde(default)]
    pub enabled: Option<bool>,

    /// Severity override for this rule.
    #[serde(default)]
    pub severity: Option<Severity>,

    /// Rule-specific options as key-value pairs.
    #[serde(flatten)]
    pub options: HashMap<String, toml::Value>,
}

impl RuleConfig {
    /// Gets an option value as a specific type.
    #[must_use]
    pub fn get_option<T: serde::de::DeserializeOwned>(&self, key: &str) -> Option<T> {
        self.options
            .get(key)
            .and_then(|v| v.clone().try_into().ok())
    }

    /// Gets a string array option.
    #[must_use]
    pub fn get_str_array(&self, key: &str) -> Vec<String> {
        self.options
            .get(key)
            .and_then(|v| v.as_array())
            .map(|arr| {
                arr.iter()
                    .filter_map(|v| v.as_str().map(String::from))
                    .collect()
            })
            .unwrap_or_default()
    }
}

/// Configuration errors.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// IO error reading config file.
    #[error("Failed to read config file {path}: {source}")]
    Io {
        /// Path that failed to read.
        path: PathBuf,
        /// Underlying IO error.
        source: std::io::Error,
    },

    /// Parse error in config file.
    #[error("Failed to parse config: {message}")]
    Parse {
        /// Parse error message.
        message: String,
    },

    /// Preset name that is not `recommended`, `strict` or `minimal`.
    #[error("Unknown preset `{name}`. Valid presets: recommended, strict, minimal")]
    UnknownPreset {
        /// The offending name.
        name: String,
    },

    /// Severity name that is not `error`, `warning` or `info`.
    #[error("Unknown severity `{name}`. Valid values: error, warning, info")]
    UnknownSeverity {
        /// The offending name.
        name: String,
    },
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::capability::Capability;

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert!(config.rules.is_empty());
        assert!(config.capabilities.is_empty());
        assert!(config.is_rule_enabled("ZNT1001A", "concrete-type-must-be-sealed"));
        assert_eq!(config.fail_on_severity().ok(), Some(Severity::Error));
    }

    #[test]
    fn test_parse_config() {
        let toml = r#"
preset = "strict"
fail_on = "warning"

[analyzer]
parallelism = 2

[[capabilities]]
name = "Acme.Contracts.IOutcome"
arity = 0
capabilities = ["result"]

[rules.properties-must-be-get-only]
enabled = true
severity = "warning"

[rules.ZNT1001A]
enabled = false

[rules.result-required-properties]
additional-properties = ["Metadata", "CorrelationId"]
"#;

        let config = Config::parse(toml).expect("Failed to parse");
        assert_eq!(config.preset.as_deref(), Some("strict"));
        assert_eq!(config.analyzer.parallelism, Some(2));
        assert_eq!(config.capabilities.len(), 1);
        assert_eq!(config.capabilities[0].capabilities, vec![Capability::Result]);
        assert_eq!(config.fail_on_severity().ok(), Some(Severity::Warning));

        assert!(config.is_rule_enabled("ZNT1001B", "properties-must-be-get-only"));
        assert_eq!(
            config.rule_severity("ZNT1001B", "properties-must-be-get-only"),
            Some(Severity::Warning)
        );
        // Lookup by ID works too.
        assert!(!config.is_rule_enabled("ZNT1001A", "concrete-type-must-be-sealed"));

        let rule_config = config
            .rule("ZNT1003A", "result-required-properties")
            .expect("rule config present");
        assert_eq!(
            rule_config.get_str_array("additional-properties"),
            vec!["Metadata", "CorrelationId"]
        );
        assert_eq!(
            rule_config.get_option::<Vec<String>>("additional-properties"),
            Some(vec!["Metadata".to_string(), "CorrelationId".to_string()])
        );
    }

    #[test]
    fn unknown_fail_on_is_an_error() {
        let config = Config::parse("fail_on = \"critical\"").expect("parses");
        let err = config.fail_on_severity().expect_err("should reject");
        assert!(err.to_string().contains("Unknown severity `critical`"));
    }

    #[test]
    fn from_file_reads_toml() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("doctrine-lint.toml");
        std::fs::write(&path, "preset = \"minimal\"\n").expect("write");
        let config = Config::from_file(&path).expect("loads");
        assert_eq!(config.preset.as_deref(), Some("minimal"));
    }

    #[test]
    fn from_file_reports_missing_file() {
        let err = Config::from_file(std::path::Path::new("/nonexistent/doctrine-lint.toml"))
            .expect_err("missing file");
        assert!(matches!(err, ConfigError::Io { .. }));
    }
}
