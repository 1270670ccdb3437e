//! # doctrine-lint-core
//!
//! Core framework for type-doctrine linting over an already-resolved type
//! model.
//!
//! This crate provides the foundational types for building doctrine
//! checkers. It includes:
//!
//! - [`TypeDescriptor`] and friends, the host-provided shape of a type
//! - [`CapabilityRegistry`] for classifying types by their marker interfaces
//! - [`Rule`] trait and [`RuleDescriptor`] for defining doctrine rules
//! - [`Analyzer`] for orchestrating evaluation
//! - [`Violation`] and [`LintResult`] for representing findings
//!
//! ## Example
//!
//! ```ignore
//! use doctrine_lint_core::{Analyzer, TypeDescriptor};
//!
//! let analyzer = Analyzer::builder()
//!     .rule(MyRule)
//!     .build()?;
//!
//! let ty = TypeDescriptor::class("OkResult")
//!     .implements("Zentient.Abstractions.Results.IResult");
//! for violation in analyzer.evaluate_type(&ty) {
//!     println!("{violation}");
//! }
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod analyzer;
mod capability;
mod config;
mod context;
mod descriptor;
mod model;
mod report;
mod rule;
mod suppression;
mod types;

/// Identifier scanning used to build computed bodies from source text.
pub mod syntax;

pub use analyzer::{Analyzer, AnalyzerBuilder, AnalyzerError};
pub use capability::{
    split_generic_arity, Capability, CapabilityRegistry, Classification, DoctrineCategory, Marker,
};
pub use config::{AnalyzerConfig, Config, ConfigError, RuleConfig};
pub use context::TypeContext;
pub use descriptor::RuleDescriptor;
pub use model::{
    Accessibility, ConstructorDescriptor, FieldDescriptor, Getter, GetterBody, MethodBody,
    MethodDescriptor, PropertyDescriptor, Suppression, TypeDescriptor, TypeKind, TypeRef,
};
pub use report::{LintResult, OutputFormat, Reporter, ViolationDiagnostic};
pub use rule::{Rule, RuleBox};
pub use suppression::{check_suppression, AllowCheck};
pub use types::{Location, Severity, Suggestion, Violation};
