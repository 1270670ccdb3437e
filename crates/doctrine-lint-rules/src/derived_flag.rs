//! `IsSuccess` derivation rules for results and envelopes.
//!
//! # Rationale
//!
//! `IsSuccess` mirrors the state of `Errors` (or, for envelopes, of `Code`).
//! Stored as independent data it can drift out of sync, so it must be a
//! computed getter that references the member it is derived from.
//!
//! # Detected Patterns
//!
//! - `public bool IsSuccess { get; set; }` (settable and not derived)
//! - `public bool IsSuccess { get; }` (auto-implemented)
//! - `public bool IsSuccess => _ok;` (computed but unrelated to `Errors`)
//!
//! Absence of `IsSuccess` is not reported here.

use doctrine_lint_core::{
    Capability, Classification, PropertyDescriptor, Rule, RuleDescriptor, TypeContext, Violation,
};

use crate::descriptors::{
    IS_SUCCESS_DERIVED_FROM_ERRORS, IS_SUCCESS_DERIVED_FROM_ERRORS_OR_CODE,
    IS_SUCCESS_NOT_SETTABLE,
};

/// Property name of the success flag.
pub const IS_SUCCESS: &str = "IsSuccess";

/// Returns true if `property` has a computed getter that references any of
/// `sources`.
pub(crate) fn is_derived_from(property: &PropertyDescriptor, sources: &[&str]) -> bool {
    property
        .getter
        .as_ref()
        .is_some_and(|g| sources.iter().any(|s| g.body.references(s)))
}

/// Forbids a visible setter on `IsSuccess`.
#[derive(Debug, Clone, Copy, Default)]
pub struct IsSuccessNotSettable;

impl Rule for IsSuccessNotSettable {
    fn descriptor(&self) -> &'static RuleDescriptor {
        &IS_SUCCESS_NOT_SETTABLE
    }

    fn applies_to(&self, classification: &Classification) -> bool {
        classification.has_any(&[Capability::Result, Capability::Envelope])
    }

    fn check(&self, ctx: &TypeContext<'_>) -> Vec<Violation> {
        match ctx.property(IS_SUCCESS) {
            Some(p) if p.has_visible_setter() => {
                vec![ctx.at(self.descriptor(), &p.location, vec![ctx.ty.name.clone()])]
            }
            _ => Vec::new(),
        }
    }
}

/// Requires `IsSuccess` to be computed from a set of source members.
#[derive(Debug, Clone, Copy)]
pub struct IsSuccessDerived {
    descriptor: &'static RuleDescriptor,
    capability: Capability,
    sources: &'static [&'static str],
}

impl IsSuccessDerived {
    /// ZNT1002B: results derive `IsSuccess` from `Errors`.
    #[must_use]
    pub fn from_errors() -> Self {
        Self {
            descriptor: &IS_SUCCESS_DERIVED_FROM_ERRORS,
            capability: Capability::Result,
            sources: &["Errors"],
        }
    }

    /// ZNT1002C: envelopes derive `IsSuccess` from `Errors` or `Code`.
    #[must_use]
    pub fn from_errors_or_code() -> Self {
        Self {
            descriptor: &IS_SUCCESS_DERIVED_FROM_ERRORS_OR_CODE,
            capability: Capability::Envelope,
            sources: &["Errors", "Code"],
        }
    }
}

impl Rule for IsSuccessDerived {
    fn descriptor(&self) -> &'static RuleDescriptor {
        self.descriptor
    }

    fn applies_to(&self, classification: &Classification) -> bool {
        classification.has(self.capability)
    }

    fn check(&self, ctx: &TypeContext<'_>) -> Vec<Violation> {
        match ctx.property(IS_SUCCESS) {
            Some(p) if !is_derived_from(p, self.sources) => {
                vec![ctx.at(self.descriptor, &p.location, vec![ctx.ty.name.clone()])]
            }
            _ => Vec::new(),
        }
    }
}
