//! Config-file driven analyzer loading and checking.
//!
//! Hosts that keep their settings in `doctrine-lint.toml` go through here:
//! the file picks the preset, rule options and failure threshold, and an
//! explicit argument always beats the file.

use doctrine_lint_core::{
    Analyzer, AnalyzerError, Config, ConfigError, LintResult, Severity, TypeDescriptor,
};
use doctrine_lint_rules::{all_descriptors, Preset};
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::{debug, info, warn};

/// Config file names to search for, in priority order.
pub const CONFIG_CANDIDATES: &[&str] = &["doctrine-lint.toml", ".doctrine-lint.toml"];

/// Errors that can occur while assembling an analyzer.
#[derive(Debug, Error)]
pub enum LoadError {
    /// The configuration could not be read, parsed or resolved.
    #[error(transparent)]
    Config(#[from] ConfigError),

    /// The analyzer could not be built.
    #[error(transparent)]
    Analyzer(#[from] AnalyzerError),
}

/// Errors returned by [`run_check`].
#[derive(Debug, Error)]
pub enum CheckError {
    /// Loading failed before any type was evaluated.
    #[error("doctrine-lint: {0}")]
    Load(#[from] LoadError),

    /// Evaluation stopped early.
    #[error("doctrine-lint: analysis failed: {0}")]
    Analysis(#[source] AnalyzerError),

    /// Violations at or above the failure threshold were found.
    #[error("{report}")]
    Failed {
        /// The formatted report.
        report: String,
        /// The full result, including violations below the threshold.
        result: LintResult,
    },
}

/// Builds an analyzer from the TOML config at `config_path`.
///
/// The preset comes from the file's `preset` key, defaulting to
/// `recommended`.
///
/// # Errors
///
/// Returns an error if the file cannot be read or parsed, names an unknown
/// preset, or asks for a worker pool that cannot be created.
pub fn load_analyzer(config_path: &Path) -> Result<Analyzer, LoadError> {
    let config = Config::from_file(config_path)?;
    debug!("Loaded config from {}", config_path.display());
    build_analyzer(None, config)
}

/// Builds an analyzer from an already parsed config.
///
/// `preset` overrides the config's own `preset` key.
///
/// # Errors
///
/// Returns an error if the preset is unknown or the worker pool cannot be
/// created.
pub fn build_analyzer(preset: Option<&str>, config: Config) -> Result<Analyzer, LoadError> {
    warn_unknown_rules(&config);
    let preset = resolve_preset(preset, &config)?;
    let rules = preset.rules_with_config(&config);
    info!("Using {:?} preset with {} rules", preset, rules.len());

    Ok(Analyzer::builder().rules(rules).config(config).build()?)
}

/// Evaluates `types` and fails if any violation reaches the threshold.
///
/// Without `config_path`, the first of [`CONFIG_CANDIDATES`] found in the
/// current directory is used; with none present, defaults apply.
///
/// # Errors
///
/// Returns [`CheckError::Failed`] with a formatted report when violations at
/// or above `fail_on` are found, and the other variants when loading or
/// evaluation fails.
pub fn run_check(
    types: &[TypeDescriptor],
    preset: Option<&str>,
    config_path: Option<&Path>,
    fail_on: Option<&str>,
) -> Result<LintResult, CheckError> {
    let config = match config_path {
        Some(path) => Config::from_file(path).map_err(LoadError::from)?,
        None => std::env::current_dir()
            .ok()
            .and_then(|dir| find_config(&dir))
            .map(|path| Config::from_file(&path))
            .transpose()
            .map_err(LoadError::from)?
            .unwrap_or_default(),
    };

    let threshold = resolve_fail_on(fail_on, &config).map_err(LoadError::from)?;
    let analyzer = build_analyzer(preset, config)?;
    let result = analyzer.analyze(types).map_err(CheckError::Analysis)?;

    if result.has_violations_at(threshold) {
        return Err(CheckError::Failed {
            report: result.format_test_report(threshold),
            result,
        });
    }
    Ok(result)
}

/// Returns the first config candidate present in `root`.
#[must_use]
pub fn find_config(root: &Path) -> Option<PathBuf> {
    CONFIG_CANDIDATES
        .iter()
        .map(|candidate| root.join(candidate))
        .find(|path| path.is_file())
}

/// Resolves the effective preset from explicit argument > config > default.
///
/// # Errors
///
/// Returns [`ConfigError::UnknownPreset`] for an unrecognized name.
pub fn resolve_preset(explicit: Option<&str>, config: &Config) -> Result<Preset, ConfigError> {
    explicit
        .or(config.preset.as_deref())
        .map_or(Ok(Preset::default()), str::parse)
}

/// Resolves the effective `fail_on` severity.
///
/// Priority: explicit argument > config file > default ("error").
///
/// # Errors
///
/// Returns [`ConfigError::UnknownSeverity`] for an unrecognized name.
pub fn resolve_fail_on(explicit: Option<&str>, config: &Config) -> Result<Severity, ConfigError> {
    match explicit {
        Some(name) => Severity::from_name(name).ok_or_else(|| ConfigError::UnknownSeverity {
            name: name.to_string(),
        }),
        None => config.fail_on_severity(),
    }
}

/// Logs rule sections that match no known rule ID or name.
fn warn_unknown_rules(config: &Config) {
    let mut keys: Vec<&String> = config.rules.keys().collect();
    keys.sort();
    for key in keys {
        let known = all_descriptors()
            .iter()
            .any(|d| d.id == key.as_str() || d.name == key.as_str());
        if !known {
            warn!("Unknown rule `{key}` in config; it has no effect");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn resolve_preset_defaults_to_recommended() {
        let config = Config::default();
        assert_eq!(
            resolve_preset(None, &config).ok(),
            Some(Preset::Recommended)
        );
    }

    #[test]
    fn resolve_preset_explicit_takes_precedence() {
        let mut config = Config::default();
        config.preset = Some("minimal".to_string());
        // explicit "strict" overrides config "minimal"
        assert_eq!(
            resolve_preset(Some("strict"), &config).ok(),
            Some(Preset::Strict)
        );
    }

    #[test]
    fn resolve_preset_from_config() {
        let mut config = Config::default();
        config.preset = Some("strict".to_string());
        assert_eq!(resolve_preset(None, &config).ok(), Some(Preset::Strict));
    }

    #[test]
    fn resolve_preset_invalid_is_an_error() {
        let config = Config::default();
        let err = resolve_preset(Some("nonexistent"), &config).expect_err("unknown preset");
        assert!(err.to_string().contains("Unknown preset `nonexistent`"));
    }

    #[test]
    fn resolve_fail_on_defaults_to_error() {
        let config = Config::default();
        assert_eq!(resolve_fail_on(None, &config).ok(), Some(Severity::Error));
    }

    #[test]
    fn resolve_fail_on_from_config() {
        let mut config = Config::default();
        config.fail_on = Some("warning".to_string());
        assert_eq!(resolve_fail_on(None, &config).ok(), Some(Severity::Warning));
    }

    #[test]
    fn resolve_fail_on_explicit_overrides_config() {
        let mut config = Config::default();
        config.fail_on = Some("info".to_string());
        assert_eq!(
            resolve_fail_on(Some("warning"), &config).ok(),
            Some(Severity::Warning)
        );

        config.fail_on = Some("warning".to_string());
        assert_eq!(
            resolve_fail_on(Some("error"), &config).ok(),
            Some(Severity::Error)
        );
    }

    #[test]
    fn resolve_fail_on_invalid_is_an_error() {
        let config = Config::default();
        let err = resolve_fail_on(Some("critical"), &config).expect_err("unknown severity");
        assert!(matches!(err, ConfigError::UnknownSeverity { ref name } if name == "critical"));
    }

    #[test]
    fn find_config_prefers_plain_name() {
        let dir = tempfile::tempdir().expect("tempdir");
        assert_eq!(find_config(dir.path()), None);

        std::fs::write(dir.path().join(".doctrine-lint.toml"), "").expect("write");
        assert_eq!(
            find_config(dir.path()),
            Some(dir.path().join(".doctrine-lint.toml"))
        );

        std::fs::write(dir.path().join("doctrine-lint.toml"), "").expect("write");
        assert_eq!(
            find_config(dir.path()),
            Some(dir.path().join("doctrine-lint.toml"))
        );
    }

    #[test]
    fn build_analyzer_uses_config_preset() {
        let config = Config::parse("preset = \"minimal\"\n").expect("config");
        let analyzer = build_analyzer(None, config).expect("analyzer");
        assert!(!analyzer.rule_codes().contains(&"ZNT1004"));
        assert!(analyzer.rule_codes().contains(&"ZNT1003A"));
    }

    #[test]
    fn build_analyzer_tolerates_unknown_rule_keys() {
        let config = Config::parse("[rules.no-such-rule]\nenabled = false\n").expect("config");
        let analyzer = build_analyzer(Some("recommended"), config).expect("analyzer");
        assert_eq!(analyzer.rule_count(), all_descriptors().len());
    }
}
