//! Structural immutability rules.
//!
//! # Rationale
//!
//! Results, envelopes, codes, error info, metadata and validation contexts
//! are data contracts: once created they never change. The same structural
//! checks apply to the whole immutable-contract family:
//! - the concrete type is `sealed`
//! - no property has a setter visible outside the type
//! - no constructor is `public` or `internal`
//!
//! Validation contexts additionally need a static factory, since they have
//! no dedicated builder.
//!
//! # Good Patterns
//!
//! ```text
//! public sealed class OkResult : IResult
//! {
//!     private OkResult(IReadOnlyList<IErrorInfo> errors) { Errors = errors; }
//!     public IReadOnlyList<IErrorInfo> Errors { get; }
//!     public static OkResult Success() => new(Array.Empty<IErrorInfo>());
//! }
//! ```

use doctrine_lint_core::{Capability, Rule, RuleDescriptor, TypeContext, Violation};

use crate::descriptors::{
    CONCRETE_TYPE_MUST_BE_SEALED, MUST_HAVE_STATIC_FACTORY_METHODS, NO_PUBLIC_CONSTRUCTORS,
    PROPERTIES_MUST_BE_GET_ONLY,
};

/// Requires concrete immutable types to be `sealed`.
#[derive(Debug, Clone, Copy, Default)]
pub struct ConcreteTypeMustBeSealed;

impl Rule for ConcreteTypeMustBeSealed {
    fn descriptor(&self) -> &'static RuleDescriptor {
        &CONCRETE_TYPE_MUST_BE_SEALED
    }

    fn check(&self, ctx: &TypeContext<'_>) -> Vec<Violation> {
        if ctx.ty.is_sealed {
            return Vec::new();
        }
        vec![ctx.at_type(self.descriptor(), vec![ctx.ty.name.clone()])]
    }
}

/// Forbids externally visible setters (including `init`).
#[derive(Debug, Clone, Copy, Default)]
pub struct PropertiesMustBeGetOnly;

impl Rule for PropertiesMustBeGetOnly {
    fn descriptor(&self) -> &'static RuleDescriptor {
        &PROPERTIES_MUST_BE_GET_ONLY
    }

    fn check(&self, ctx: &TypeContext<'_>) -> Vec<Violation> {
        ctx.ty
            .properties
            .iter()
            .filter(|p| p.has_visible_setter())
            .map(|p| {
                ctx.at(
                    self.descriptor(),
                    &p.location,
                    vec![p.name.clone(), ctx.ty.name.clone()],
                )
            })
            .collect()
    }
}

/// Forbids `public`, `internal` and `protected internal` constructors.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoPublicConstructors;

impl Rule for NoPublicConstructors {
    fn descriptor(&self) -> &'static RuleDescriptor {
        &NO_PUBLIC_CONSTRUCTORS
    }

    fn check(&self, ctx: &TypeContext<'_>) -> Vec<Violation> {
        ctx.ty
            .constructors
            .iter()
            .filter(|c| c.accessibility.is_externally_visible())
            .map(|c| ctx.at(self.descriptor(), &c.location, vec![ctx.ty.name.clone()]))
            .collect()
    }
}

/// Requires validation contexts to expose a static factory method.
///
/// A qualifying method is `static`, visible within the assembly, and returns the
/// declaring type or another validation context. Methods that miss any of
/// these are ignored; only the absence of every qualifying method is
/// reported, once.
#[derive(Debug, Clone, Copy, Default)]
pub struct MustHaveStaticFactoryMethods;

impl Rule for MustHaveStaticFactoryMethods {
    fn descriptor(&self) -> &'static RuleDescriptor {
        &MUST_HAVE_STATIC_FACTORY_METHODS
    }

    fn check(&self, ctx: &TypeContext<'_>) -> Vec<Violation> {
        let has_factory = ctx.ty.methods.iter().any(|m| {
            m.is_static
                && m.accessibility.is_externally_visible()
                && (ctx.ty.is_named_by(&m.return_type)
                    || ctx.type_ref_has(&m.return_type, Capability::ValidationContext))
        });
        if has_factory {
            return Vec::new();
        }
        vec![ctx.at_type(self.descriptor(), vec![ctx.ty.name.clone()])]
    }
}
