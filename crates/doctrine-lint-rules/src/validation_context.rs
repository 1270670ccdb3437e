//! Validation context `IsSuccessful` rules.

use doctrine_lint_core::{Rule, RuleDescriptor, TypeContext, Violation};

use crate::descriptors::{IS_SUCCESSFUL_COMPUTED, IS_SUCCESSFUL_NOT_SETTABLE};

const IS_SUCCESSFUL: &str = "IsSuccessful";

/// Forbids a visible setter on `IsSuccessful`.
#[derive(Debug, Clone, Copy, Default)]
pub struct IsSuccessfulNotSettable;

impl Rule for IsSuccessfulNotSettable {
    fn descriptor(&self) -> &'static RuleDescriptor {
        &IS_SUCCESSFUL_NOT_SETTABLE
    }

    fn check(&self, ctx: &TypeContext<'_>) -> Vec<Violation> {
        match ctx.property(IS_SUCCESSFUL) {
            Some(p) if p.has_visible_setter() => {
                vec![ctx.at(self.descriptor(), &p.location, vec![ctx.ty.name.clone()])]
            }
            _ => Vec::new(),
        }
    }
}

/// Requires `IsSuccessful` to have a computed getter.
///
/// Unlike `IsSuccess`, no particular member has to be referenced.
#[derive(Debug, Clone, Copy, Default)]
pub struct IsSuccessfulComputed;

impl Rule for IsSuccessfulComputed {
    fn descriptor(&self) -> &'static RuleDescriptor {
        &IS_SUCCESSFUL_COMPUTED
    }

    fn check(&self, ctx: &TypeContext<'_>) -> Vec<Violation> {
        match ctx.property(IS_SUCCESSFUL) {
            Some(p) if !p.is_computed() => {
                vec![ctx.at(self.descriptor(), &p.location, vec![ctx.ty.name.clone()])]
            }
            _ => Vec::new(),
        }
    }
}
