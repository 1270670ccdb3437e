//! Integration tests for analyzers assembled from `doctrine-lint.toml`.

use doctrine_lint::{
    load_analyzer, run_check, CheckError, ConfigError, LoadError, PropertyDescriptor, Severity,
    TypeDescriptor,
};
use std::path::PathBuf;
use tempfile::TempDir;

const RESULT: &str = "Zentient.Abstractions.Results.IResult";

fn write_config(content: &str) -> (TempDir, PathBuf) {
    let dir = tempfile::tempdir().expect("tempdir");
    let path = dir.path().join("doctrine-lint.toml");
    std::fs::write(&path, content).expect("write config");
    (dir, path)
}

/// An unsealed result with a settable `IsSuccess`.
fn drifting_result() -> TypeDescriptor {
    TypeDescriptor::class("LegacyResult")
        .implements(RESULT)
        .property(PropertyDescriptor::get_only("Messages"))
        .property(PropertyDescriptor::get_only("Errors"))
        .property(PropertyDescriptor::get_only("IsSuccess").with_setter(doctrine_lint::Accessibility::Public))
}

fn codes(types: &[TypeDescriptor], config: &str) -> Vec<String> {
    let (_dir, path) = write_config(config);
    let analyzer = load_analyzer(&path).expect("analyzer");
    types
        .iter()
        .flat_map(|ty| analyzer.evaluate_type(ty))
        .map(|v| v.code)
        .collect()
}

#[test]
fn empty_config_uses_recommended_preset() {
    assert_eq!(
        codes(&[drifting_result()], ""),
        vec!["ZNT1001A", "ZNT1001B", "ZNT1002A", "ZNT1002B"]
    );
}

#[test]
fn minimal_preset_skips_derivation_rules() {
    assert_eq!(
        codes(&[drifting_result()], "preset = \"minimal\"\n"),
        vec!["ZNT1001A", "ZNT1001B"]
    );
}

#[test]
fn strict_preset_requires_is_success() {
    let ty = TypeDescriptor::class("OkResult")
        .sealed()
        .implements(RESULT)
        .property(PropertyDescriptor::get_only("Messages"))
        .property(PropertyDescriptor::get_only("Errors"));
    assert!(codes(std::slice::from_ref(&ty), "").is_empty());
    assert_eq!(codes(&[ty], "preset = \"strict\"\n"), vec!["ZNT1003A"]);
}

#[test]
fn rules_can_be_disabled_by_name_or_id() {
    let config = r#"
[rules.concrete-type-must-be-sealed]
enabled = false

[rules.ZNT1002B]
enabled = false
"#;
    assert_eq!(
        codes(&[drifting_result()], config),
        vec!["ZNT1001B", "ZNT1002A"]
    );
}

#[test]
fn severity_override_applies_to_rule_violations() {
    let (_dir, path) = write_config(
        r#"
[rules.properties-must-be-get-only]
severity = "info"
"#,
    );
    let analyzer = load_analyzer(&path).expect("analyzer");
    let violations = analyzer.evaluate_type(&drifting_result());
    let get_only: Vec<_> = violations.iter().filter(|v| v.code == "ZNT1001B").collect();
    assert_eq!(get_only.len(), 1);
    assert_eq!(get_only[0].severity, Severity::Info);
    assert!(violations
        .iter()
        .filter(|v| v.code != "ZNT1001B")
        .all(|v| v.severity == Severity::Error));
}

#[test]
fn additional_required_properties_from_config() {
    let ty = TypeDescriptor::class("OkResult")
        .sealed()
        .implements(RESULT)
        .property(PropertyDescriptor::get_only("Messages"))
        .property(PropertyDescriptor::get_only("Errors"));
    let config = r#"
[rules.result-required-properties]
additional-properties = ["CorrelationId"]
"#;
    assert_eq!(codes(&[ty], config), vec!["ZNT1003A"]);
}

#[test]
fn custom_markers_extend_classification() {
    let ty = TypeDescriptor::class("Outcome").implements("Acme.Results.IOutcome");
    let config = r#"
[[capabilities]]
name = "Acme.Results.IOutcome"
capabilities = ["result"]
"#;
    assert_eq!(
        codes(&[ty], config),
        vec!["ZNT1001A", "ZNT1003A", "ZNT1003A"]
    );
}

#[test]
fn missing_config_file_is_an_io_error() {
    let dir = tempfile::tempdir().expect("tempdir");
    let err = load_analyzer(&dir.path().join("absent.toml")).expect_err("missing file");
    assert!(matches!(err, LoadError::Config(ConfigError::Io { .. })));
}

#[test]
fn unknown_preset_in_config_is_rejected() {
    let (_dir, path) = write_config("preset = \"lenient\"\n");
    let err = load_analyzer(&path).expect_err("unknown preset");
    assert!(matches!(
        err,
        LoadError::Config(ConfigError::UnknownPreset { ref name }) if name == "lenient"
    ));
}

#[test]
fn run_check_fails_with_report() {
    let (_dir, path) = write_config("");
    let err = run_check(&[drifting_result()], None, Some(&path), None).expect_err("violations");
    let CheckError::Failed { report, result } = err else {
        panic!("expected a failed check");
    };
    assert_eq!(result.types_checked, 1);
    assert!(report.contains("=== doctrine-lint: 4 violation(s) ==="));
    assert!(report.contains("concrete-type-must-be-sealed [ZNT1001A]"));
    assert!(report.ends_with("Total: 4 error(s), 0 warning(s), 0 info(s) in 1 type(s)"));
}

#[test]
fn run_check_respects_fail_on_threshold() {
    let (_dir, path) = write_config(
        r#"
fail_on = "warning"

[rules.ZNT1001A]
severity = "info"

[rules.ZNT1001B]
severity = "info"

[rules.ZNT1002A]
severity = "info"

[rules.ZNT1002B]
severity = "info"
"#,
    );
    let result = run_check(&[drifting_result()], None, Some(&path), None).expect("below threshold");
    assert_eq!(result.violations.len(), 4);

    // An explicit threshold beats the file.
    let err = run_check(&[drifting_result()], None, Some(&path), Some("info"))
        .expect_err("at threshold");
    assert!(matches!(err, CheckError::Failed { .. }));
}

#[test]
fn run_check_explicit_preset_beats_config() {
    let (_dir, path) = write_config("preset = \"strict\"\n");
    let ty = TypeDescriptor::class("OkResult")
        .sealed()
        .implements(RESULT)
        .property(PropertyDescriptor::get_only("Messages"))
        .property(PropertyDescriptor::get_only("Errors"));
    assert!(run_check(std::slice::from_ref(&ty), None, Some(&path), None).is_err());
    assert!(run_check(&[ty], Some("recommended"), Some(&path), None).is_ok());
}

#[test]
fn run_check_rejects_unknown_fail_on() {
    let (_dir, path) = write_config("fail_on = \"fatal\"\n");
    let err = run_check(&[], None, Some(&path), None).expect_err("bad severity");
    assert!(matches!(
        err,
        CheckError::Load(LoadError::Config(ConfigError::UnknownSeverity { .. }))
    ));
}
