//! Envelope value rule.
//!
//! An unsuccessful envelope carries no value. Proving `Value` is null on
//! every failure path would need dataflow; the rule checks what the shape
//! can show instead: a `Value` setter anywhere but `private` lets code
//! outside the envelope's own factories attach a value after the fact.

use doctrine_lint_core::{
    Accessibility, Capability, Classification, Rule, RuleDescriptor, TypeContext, Violation,
};

use crate::descriptors::ENVELOPE_VALUE_ONLY_ON_SUCCESS;

const VALUE: &str = "Value";

/// Forbids a non-private `Value` setter on value-carrying envelopes.
#[derive(Debug, Clone, Copy, Default)]
pub struct EnvelopeValueOnlyOnSuccess;

impl Rule for EnvelopeValueOnlyOnSuccess {
    fn descriptor(&self) -> &'static RuleDescriptor {
        &ENVELOPE_VALUE_ONLY_ON_SUCCESS
    }

    fn applies_to(&self, classification: &Classification) -> bool {
        classification.has(Capability::EnvelopeOfValue)
    }

    fn check(&self, ctx: &TypeContext<'_>) -> Vec<Violation> {
        match ctx.property(VALUE) {
            Some(p) if p.setter.is_some_and(|s| s != Accessibility::Private) => vec![ctx.at(
                self.descriptor(),
                &p.location,
                vec![VALUE.to_string(), ctx.ty.name.clone()],
            )],
            _ => Vec::new(),
        }
    }
}
