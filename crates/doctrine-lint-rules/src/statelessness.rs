//! Handler and policy statelessness rule.

use doctrine_lint_core::{Rule, RuleDescriptor, TypeContext, Violation};

use crate::descriptors::HANDLERS_MUST_BE_STATELESS;

/// Reports every mutable instance field on a handler or policy.
///
/// Injected dependencies live in `readonly` fields; `const` and `static`
/// fields are not per-instance state.
#[derive(Debug, Clone, Copy, Default)]
pub struct HandlersMustBeStateless;

impl Rule for HandlersMustBeStateless {
    fn descriptor(&self) -> &'static RuleDescriptor {
        &HANDLERS_MUST_BE_STATELESS
    }

    fn check(&self, ctx: &TypeContext<'_>) -> Vec<Violation> {
        ctx.ty
            .fields
            .iter()
            .filter(|f| f.is_mutable_instance_state())
            .map(|f| {
                ctx.at(
                    self.descriptor(),
                    &f.location,
                    vec![ctx.ty.name.clone(), f.name.clone()],
                )
            })
            .collect()
    }
}
