//! Core analyzer for orchestrating doctrine evaluation.

use crate::capability::{CapabilityRegistry, Marker};
use crate::config::{Config, RuleConfig};
use crate::context::TypeContext;
use crate::model::TypeDescriptor;
use crate::report::LintResult;
use crate::rule::{Rule, RuleBox};
use crate::suppression::{check_suppression, missing_reason_violation, AllowCheck};
use crate::types::Violation;

use rayon::prelude::*;
use std::sync::atomic::{AtomicBool, Ordering};
use thiserror::Error;
use tracing::{debug, info};

/// Errors that can occur during analysis.
#[derive(Debug, Error)]
pub enum AnalyzerError {
    /// The dedicated worker pool could not be created.
    #[error("Failed to build worker pool: {0}")]
    ThreadPool(#[from] rayon::ThreadPoolBuildError),

    /// The caller requested cancellation before all types were evaluated.
    #[error("Analysis cancelled")]
    Cancelled,
}

/// How [`Analyzer::analyze`] spreads work across threads.
#[derive(Debug)]
enum Execution {
    Sequential,
    GlobalPool,
    Pool(rayon::ThreadPool),
}

/// Builder for configuring an [`Analyzer`].
#[derive(Default)]
pub struct AnalyzerBuilder {
    rules: Vec<RuleBox>,
    registry: Option<CapabilityRegistry>,
    markers: Vec<Marker>,
    config: Option<Config>,
    parallelism: Option<usize>,
}

impl AnalyzerBuilder {
    /// Creates a new builder with default settings.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a rule to the analyzer.
    #[must_use]
    pub fn rule<R: Rule + 'static>(mut self, rule: R) -> Self {
        self.rules.push(Box::new(rule));
        self
    }

    /// Adds a boxed rule to the analyzer.
    #[must_use]
    pub fn rule_box(mut self, rule: RuleBox) -> Self {
        self.rules.push(rule);
        self
    }

    /// Adds several boxed rules, keeping their order.
    #[must_use]
    pub fn rules<I: IntoIterator<Item = RuleBox>>(mut self, rules: I) -> Self {
        self.rules.extend(rules);
        self
    }

    /// Replaces the capability registry (default: the Zentient markers).
    #[must_use]
    pub fn registry(mut self, registry: CapabilityRegistry) -> Self {
        self.registry = Some(registry);
        self
    }

    /// Adds a capability marker on top of the registry.
    #[must_use]
    pub fn marker(mut self, marker: Marker) -> Self {
        self.markers.push(marker);
        self
    }

    /// Sets the configuration.
    #[must_use]
    pub fn config(mut self, config: Config) -> Self {
        self.config = Some(config);
        self
    }

    /// Bounds the number of worker threads, overriding the configuration.
    ///
    /// `1` evaluates sequentially on the calling thread.
    #[must_use]
    pub fn parallelism(mut self, threads: usize) -> Self {
        self.parallelism = Some(threads);
        self
    }

    /// Builds the analyzer.
    ///
    /// # Errors
    ///
    /// Returns an error if a dedicated worker pool cannot be created.
    pub fn build(self) -> Result<Analyzer, AnalyzerError> {
        let threads = self
            .parallelism
            .or(self.config.as_ref().and_then(|c| c.analyzer.parallelism));

        let execution = match threads {
            Some(1) => Execution::Sequential,
            Some(0) | None => Execution::GlobalPool,
            Some(threads) => Execution::Pool(
                rayon::ThreadPoolBuilder::new()
                    .num_threads(threads)
                    .thread_name(|i| format!("doctrine-lint-{i}"))
                    .build()?,
            ),
        };

        Ok(self.finish(execution))
    }

    /// Builds an analyzer that evaluates on the calling thread.
    ///
    /// Ignores any configured parallelism, so it cannot fail.
    #[must_use]
    pub fn build_sequential(self) -> Analyzer {
        self.finish(Execution::Sequential)
    }

    fn finish(self, execution: Execution) -> Analyzer {
        let config = self.config.unwrap_or_default();

        let registry = self
            .registry
            .unwrap_or_default()
            .with_markers(config.capabilities.iter().cloned())
            .with_markers(self.markers);

        Analyzer {
            rules: self.rules,
            registry,
            config,
            execution,
        }
    }
}

/// The main analyzer that evaluates types against doctrine rules.
///
/// Use [`Analyzer::builder()`] to construct an instance. An analyzer is
/// immutable after construction and can be shared across threads.
pub struct Analyzer {
    rules: Vec<RuleBox>,
    registry: CapabilityRegistry,
    config: Config,
    execution: Execution,
}

impl std::fmt::Debug for Analyzer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Analyzer")
            .field("rules", &self.rule_codes())
            .field("registry", &self.registry)
            .field("config", &self.config)
            .field("execution", &self.execution)
            .finish()
    }
}

impl Analyzer {
    /// Creates a new builder for configuring an analyzer.
    #[must_use]
    pub fn builder() -> AnalyzerBuilder {
        AnalyzerBuilder::new()
    }

    /// Returns the number of registered rules.
    #[must_use]
    pub fn rule_count(&self) -> usize {
        self.rules.len()
    }

    /// Returns the codes of the registered rules, in evaluation order.
    #[must_use]
    pub fn rule_codes(&self) -> Vec<&'static str> {
        self.rules.iter().map(|r| r.code()).collect()
    }

    /// Returns the capability registry in use.
    #[must_use]
    pub fn registry(&self) -> &CapabilityRegistry {
        &self.registry
    }

    /// Returns the configuration in use.
    #[must_use]
    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Gets the rule configuration for a specific rule, by code or name.
    #[must_use]
    pub fn rule_config(&self, code: &str, name: &str) -> Option<&RuleConfig> {
        self.config.rule(code, name)
    }

    /// Evaluates a single type and returns its violations.
    ///
    /// Interfaces, structs and abstract classes yield nothing.
    #[must_use]
    pub fn evaluate_type(&self, ty: &TypeDescriptor) -> Vec<Violation> {
        self.evaluate(ty).unwrap_or_default()
    }

    /// Evaluates all types and returns the combined result.
    ///
    /// # Errors
    ///
    /// Never returns [`AnalyzerError::Cancelled`]; kept fallible to match
    /// [`Analyzer::analyze_with_cancel`].
    pub fn analyze(&self, types: &[TypeDescriptor]) -> Result<LintResult, AnalyzerError> {
        self.analyze_with_cancel(types, &AtomicBool::new(false))
    }

    /// Evaluates all types, checking `cancel` before each one.
    ///
    /// Violations are ordered by location (file, line, column); within one
    /// location, rule order is preserved.
    ///
    /// # Errors
    ///
    /// Returns [`AnalyzerError::Cancelled`] once `cancel` is observed set.
    pub fn analyze_with_cancel(
        &self,
        types: &[TypeDescriptor],
        cancel: &AtomicBool,
    ) -> Result<LintResult, AnalyzerError> {
        info!(
            "Starting analysis of {} types with {} rules",
            types.len(),
            self.rules.len()
        );

        let run = |ty: &TypeDescriptor| {
            if cancel.load(Ordering::Relaxed) {
                return Err(AnalyzerError::Cancelled);
            }
            Ok(self.evaluate(ty))
        };

        let outcomes: Vec<Option<Vec<Violation>>> = match &self.execution {
            Execution::Sequential => types.iter().map(&run).collect::<Result<_, _>>()?,
            Execution::GlobalPool => types.par_iter().map(&run).collect::<Result<_, _>>()?,
            Execution::Pool(pool) => {
                pool.install(|| types.par_iter().map(&run).collect::<Result<_, _>>())?
            }
        };

        let mut result = LintResult::new();
        for violations in outcomes.into_iter().flatten() {
            result.types_checked += 1;
            result.violations.extend(violations);
        }

        result.violations.sort_by(|a, b| {
            a.location
                .file
                .cmp(&b.location.file)
                .then(a.location.line.cmp(&b.location.line))
                .then(a.location.column.cmp(&b.location.column))
        });

        info!(
            "Analysis complete: {} violations in {} types",
            result.violations.len(),
            result.types_checked
        );

        Ok(result)
    }

    /// Evaluates one type; `None` means the type is not a concrete class.
    fn evaluate(&self, ty: &TypeDescriptor) -> Option<Vec<Violation>> {
        if !ty.is_concrete_class() {
            debug!("Skipping non-concrete type: {}", ty.name);
            return None;
        }

        let classification = self.registry.classify(ty);
        if classification.is_empty() {
            debug!("No doctrine markers on {}", ty.name);
            return Some(Vec::new());
        }

        let ctx = TypeContext::new(ty, &classification, &self.registry);
        let mut violations = Vec::new();

        for rule in &self.rules {
            if !rule.applies_to(&classification) {
                continue;
            }
            if !self.config.is_rule_enabled(rule.code(), rule.name()) {
                debug!("Skipping disabled rule: {}", rule.name());
                continue;
            }

            let found = rule.check(&ctx);
            if found.is_empty() {
                continue;
            }

            if let AllowCheck::Allowed { reason } = check_suppression(ty, rule.as_ref()) {
                debug!("Suppressed {} on {}", rule.code(), ty.name);
                if rule.requires_allow_reason() && reason.is_none() {
                    violations.push(missing_reason_violation(ty, rule.as_ref()));
                }
                continue;
            }

            violations.extend(self.apply_severity_override(rule.as_ref(), found));
        }

        Some(violations)
    }

    /// Applies severity overrides from configuration.
    fn apply_severity_override(&self, rule: &dyn Rule, violations: Vec<Violation>) -> Vec<Violation> {
        match self.config.rule_severity(rule.code(), rule.name()) {
            Some(severity) => violations
                .into_iter()
                .map(|v| v.with_severity(severity))
                .collect(),
            None => violations,
        }
    }
}
