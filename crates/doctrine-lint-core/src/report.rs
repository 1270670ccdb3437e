//! Evaluation results and their rendering.

use miette::{Diagnostic, SourceSpan};
use serde::{Deserialize, Serialize};
use std::fmt::Write;

use crate::types::{Severity, Violation};

/// Converts a Violation to a miette Diagnostic for rich error display.
#[derive(Debug, thiserror::Error, Diagnostic)]
#[error("{message}")]
pub struct ViolationDiagnostic {
    message: String,
    #[help]
    help: Option<String>,
    #[label("{label_message}")]
    span: SourceSpan,
    label_message: String,
}

impl ViolationDiagnostic {
    /// Returns the rendered `[code] message` text.
    #[must_use]
    pub fn message(&self) -> &str {
        &self.message
    }

    /// Returns the help text, if the violation carried a suggestion.
    #[must_use]
    pub fn help_text(&self) -> Option<&str> {
        self.help.as_deref()
    }
}

impl From<&Violation> for ViolationDiagnostic {
    fn from(v: &Violation) -> Self {
        Self {
            message: format!("[{}] {}", v.code, v.message),
            help: v.suggestion.as_ref().map(|s| s.message.clone()),
            span: SourceSpan::from((v.location.offset, v.location.length)),
            label_message: v.rule.clone(),
        }
    }
}

/// Result of evaluating a set of types.
#[derive(Debug, Default, Clone, Serialize, Deserialize)]
pub struct LintResult {
    /// All violations found.
    pub violations: Vec<Violation>,
    /// Number of concrete classes evaluated.
    pub types_checked: usize,
}

impl LintResult {
    /// Creates a new empty result.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns true if there are any errors.
    #[must_use]
    pub fn has_errors(&self) -> bool {
        self.has_violations_at(Severity::Error)
    }

    /// Checks if any violations meet or exceed the given severity threshold.
    #[must_use]
    pub fn has_violations_at(&self, severity: Severity) -> bool {
        self.violations.iter().any(|v| v.severity >= severity)
    }

    /// Returns the violations reported under a rule ID.
    #[must_use]
    pub fn by_rule(&self, code: &str) -> Vec<&Violation> {
        self.violations.iter().filter(|v| v.code == code).collect()
    }

    /// Counts violations by severity as `(errors, warnings, infos)`.
    #[must_use]
    pub fn count_by_severity(&self) -> (usize, usize, usize) {
        self.violations
            .iter()
            .fold((0, 0, 0), |(e, w, i), v| match v.severity {
                Severity::Error => (e + 1, w, i),
                Severity::Warning => (e, w + 1, i),
                Severity::Info => (e, w, i + 1),
            })
    }

    /// Adds violations from another result.
    pub fn extend(&mut self, other: Self) {
        self.violations.extend(other.violations);
        self.types_checked += other.types_checked;
    }

    /// Converts every violation into a miette diagnostic.
    #[must_use]
    pub fn diagnostics(&self) -> Vec<ViolationDiagnostic> {
        self.violations.iter().map(ViolationDiagnostic::from).collect()
    }

    /// Formats violations as a test failure report.
    ///
    /// Produces a human-readable multi-line report suitable for `panic!()`
    /// messages in `cargo test` integration.
    #[must_use]
    pub fn format_test_report(&self, fail_on: Severity) -> String {
        let failing: Vec<&Violation> = self
            .violations
            .iter()
            .filter(|v| v.severity >= fail_on)
            .collect();

        let mut report = String::new();
        let _ = writeln!(
            report,
            "\n=== doctrine-lint: {} violation(s) ===\n",
            failing.len()
        );

        for v in &failing {
            let _ = writeln!(
                report,
                "{} [{}] at {}:{}:{}",
                v.rule,
                v.code,
                v.location.file.display(),
                v.location.line,
                v.location.column,
            );
            let _ = writeln!(report, "  {}: {}", v.severity, v.message);
            if let Some(suggestion) = &v.suggestion {
                let _ = writeln!(report, "  = help: {}", suggestion.message);
            }
            let _ = writeln!(report);
        }

        let _ = write!(report, "Total: {}", self.summary());
        report
    }

    fn summary(&self) -> String {
        let (errors, warnings, infos) = self.count_by_severity();
        format!(
            "{errors} error(s), {warnings} warning(s), {infos} info(s) in {} type(s)",
            self.types_checked
        )
    }
}

/// Output format for rendered results.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// Multi-line human-readable output with help text.
    #[default]
    Text,
    /// One line per violation.
    Compact,
    /// Pretty-printed JSON.
    Json,
}

/// Renders a [`LintResult`] in a chosen [`OutputFormat`].
#[derive(Debug, Clone, Copy, Default)]
pub struct Reporter {
    format: OutputFormat,
}

impl Reporter {
    /// Creates a reporter for `format`.
    #[must_use]
    pub fn new(format: OutputFormat) -> Self {
        Self { format }
    }

    /// Renders `result`.
    ///
    /// # Errors
    ///
    /// Returns an error if JSON serialization fails.
    pub fn render(&self, result: &LintResult) -> Result<String, serde_json::Error> {
        match self.format {
            OutputFormat::Text => Ok(render_text(result)),
            OutputFormat::Compact => Ok(render_compact(result)),
            OutputFormat::Json => serde_json::to_string_pretty(result),
        }
    }
}

fn render_text(result: &LintResult) -> String {
    let mut out = String::new();
    for violation in &result.violations {
        out.push_str(&violation.format());
        out.push('\n');
    }
    let _ = writeln!(out, "Found {}", result.summary());
    out
}

fn render_compact(result: &LintResult) -> String {
    let mut out = String::new();
    for violation in &result.violations {
        let _ = writeln!(out, "{violation}");
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{Location, Suggestion};

    fn make_violation(code: &str, severity: Severity) -> Violation {
        Violation::new(
            code,
            "concrete-type-must-be-sealed",
            severity,
            Location::new("src/OkResult.cs", 12, 5),
            "Concrete type 'OkResult' must be declared 'sealed'",
        )
    }

    fn sample() -> LintResult {
        let mut result = LintResult::new();
        result.types_checked = 2;
        result.violations.push(
            make_violation("ZNT1001A", Severity::Error)
                .with_suggestion(Suggestion::new("Seal the type")),
        );
        result
            .violations
            .push(make_violation("ZNT1001B", Severity::Warning));
        result
    }

    #[test]
    fn has_violations_at_error_only() {
        let mut result = LintResult::new();
        result.violations.push(make_violation("ZNT1001A", Severity::Warning));
        assert!(!result.has_errors());
        assert!(!result.has_violations_at(Severity::Error));
        assert!(result.has_violations_at(Severity::Warning));
    }

    #[test]
    fn counts_and_by_rule() {
        let result = sample();
        assert_eq!(result.count_by_severity(), (1, 1, 0));
        assert_eq!(result.by_rule("ZNT1001B").len(), 1);
        assert!(result.by_rule("ZNT1007").is_empty());
    }

    #[test]
    fn extend_accumulates() {
        let mut result = sample();
        result.extend(sample());
        assert_eq!(result.violations.len(), 4);
        assert_eq!(result.types_checked, 4);
    }

    #[test]
    fn format_test_report_filters_by_severity() {
        let report = sample().format_test_report(Severity::Error);
        assert!(report.contains("1 violation(s)"));
        assert!(report.contains("= help: Seal the type"));
        assert!(report.ends_with("Total: 1 error(s), 1 warning(s), 0 info(s) in 2 type(s)"));
    }

    #[test]
    fn compact_render() {
        let out = Reporter::new(OutputFormat::Compact)
            .render(&sample())
            .expect("render");
        insta::assert_snapshot!(out, @r"
        src/OkResult.cs:12:5: error [ZNT1001A] Concrete type 'OkResult' must be declared 'sealed'
        src/OkResult.cs:12:5: warning [ZNT1001B] Concrete type 'OkResult' must be declared 'sealed'
        ");
    }

    #[test]
    fn text_render_ends_with_summary() {
        let out = Reporter::default().render(&sample()).expect("render");
        assert!(out.starts_with("ZNT1001A concrete-type-must-be-sealed at src/OkResult.cs:12:5"));
        assert!(out.ends_with("Found 1 error(s), 1 warning(s), 0 info(s) in 2 type(s)\n"));
    }

    #[test]
    fn json_render_round_trips() {
        let out = Reporter::new(OutputFormat::Json)
            .render(&sample())
            .expect("render");
        let parsed: LintResult = serde_json::from_str(&out).expect("valid json");
        assert_eq!(parsed.violations, sample().violations);
    }

    #[test]
    fn diagnostic_carries_code_and_help() {
        let result = sample();
        let diagnostics = result.diagnostics();
        assert_eq!(
            diagnostics[0].message(),
            "[ZNT1001A] Concrete type 'OkResult' must be declared 'sealed'"
        );
        assert_eq!(diagnostics[0].help_text(), Some("Seal the type"));
        assert_eq!(diagnostics[1].help_text(), None);
    }
}
