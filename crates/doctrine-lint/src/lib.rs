//! # doctrine-lint
//!
//! Type-doctrine checker for immutable result, envelope, error and
//! validation contracts.
//!
//! This is the main facade crate that re-exports the core framework and the
//! built-in rules. The host supplies an already-resolved type model; the
//! checker classifies each concrete class by the capability markers it
//! implements and reports where it breaks its doctrine.
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use doctrine_lint::{PropertyDescriptor, TypeDescriptor};
//!
//! let ty = TypeDescriptor::class("OkResult")
//!     .implements("Zentient.Abstractions.Results.IResult")
//!     .property(PropertyDescriptor::get_only("Messages"))
//!     .property(PropertyDescriptor::get_only("Errors"));
//!
//! for violation in doctrine_lint::evaluate_type(&ty) {
//!     println!("{violation}");
//! }
//! ```
//!
//! ## Config-Driven Checks
//!
//! ```toml
//! # doctrine-lint.toml
//! preset = "strict"
//! fail_on = "warning"
//!
//! [rules.concrete-type-must-be-sealed]
//! severity = "warning"
//!
//! [rules.ZNT1003A]
//! additional-properties = ["CorrelationId"]
//! ```
//!
//! ```rust,ignore
//! let result = doctrine_lint::run_check(&types, None, None, None)?;
//! ```
//!
//! ## Suppressions
//!
//! A type can opt out of a rule by ID, name or `all`. Error-level rules
//! expect a justification; suppressing one without it still reports a
//! warning.
//!
//! ```rust,ignore
//! let ty = TypeDescriptor::class("LegacyResult")
//!     .implements("Zentient.Abstractions.Results.IResult")
//!     .suppress("ZNT1001A", Some("Proxied by the ORM"));
//! ```

#![forbid(unsafe_code)]

use std::sync::OnceLock;

// Re-export core types and traits
pub use doctrine_lint_core::*;

/// Built-in rules and presets.
pub mod rules {
    pub use doctrine_lint_rules::*;
}

mod runner;

pub use runner::{
    build_analyzer, find_config, load_analyzer, resolve_fail_on, resolve_preset, run_check,
    CheckError, LoadError, CONFIG_CANDIDATES,
};

/// Evaluates one type with the recommended preset and the built-in marker
/// registry.
///
/// The shared analyzer is built on first use and evaluates on the calling
/// thread.
#[must_use]
pub fn evaluate_type(ty: &TypeDescriptor) -> Vec<Violation> {
    default_analyzer().evaluate_type(ty)
}

/// The analyzer behind [`evaluate_type`].
#[must_use]
pub fn default_analyzer() -> &'static Analyzer {
    static DEFAULT: OnceLock<Analyzer> = OnceLock::new();
    DEFAULT.get_or_init(|| {
        Analyzer::builder()
            .rules(rules::recommended_rules())
            .build_sequential()
    })
}
