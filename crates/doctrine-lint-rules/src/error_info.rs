//! Error info rules.
//!
//! - `InnerErrors` is never null: declared non-nullable and not initialized
//!   to `null`. Checked on the type annotation and initializer text only.
//! - An error info builder's `Build` method references every mandatory
//!   member. This is an intra-type syntactic check on the method body: a
//!   member counts as set when the body mentions it, as a property
//!   (`Code`) or a backing field (`_code`).

use doctrine_lint_core::{
    Capability, Classification, PropertyDescriptor, Rule, RuleDescriptor, TypeContext, Violation,
};

use crate::descriptors::{ERROR_INFO_BUILDER_SETS_REQUIRED, ERROR_INFO_INNER_ERRORS_NON_NULLABLE};

const INNER_ERRORS: &str = "InnerErrors";
const BUILD: &str = "Build";

/// Members an error info builder must set before building.
pub const MANDATORY_MEMBERS: [&str; 4] = ["ErrorDefinition", "Code", "Message", "InstanceId"];

/// Requires `InnerErrors` to be non-nullable and never initialized to null.
#[derive(Debug, Clone, Copy, Default)]
pub struct InnerErrorsNonNullable;

impl InnerErrorsNonNullable {
    fn is_nullable(property: &PropertyDescriptor) -> bool {
        // A `?` anywhere covers both `List<IErrorInfo>?` and `List<IErrorInfo?>`.
        property.is_nullable || property.type_name.contains('?')
    }

    fn initialized_to_null(property: &PropertyDescriptor) -> bool {
        property.initializer.as_deref().is_some_and(|init| {
            matches!(
                init.trim().trim_end_matches(';').trim(),
                "null" | "null!" | "default" | "default!"
            )
        })
    }
}

impl Rule for InnerErrorsNonNullable {
    fn descriptor(&self) -> &'static RuleDescriptor {
        &ERROR_INFO_INNER_ERRORS_NON_NULLABLE
    }

    fn applies_to(&self, classification: &Classification) -> bool {
        classification.has(Capability::ErrorInfo)
    }

    fn check(&self, ctx: &TypeContext<'_>) -> Vec<Violation> {
        match ctx.property(INNER_ERRORS) {
            Some(p) if Self::is_nullable(p) || Self::initialized_to_null(p) => {
                vec![ctx.at(self.descriptor(), &p.location, vec![ctx.ty.name.clone()])]
            }
            _ => Vec::new(),
        }
    }
}

/// Requires an error info builder's `Build` body to set every mandatory
/// member.
#[derive(Debug, Clone, Copy, Default)]
pub struct ErrorInfoBuilderSetsRequired;

fn same_member(identifier: &str, member: &str) -> bool {
    identifier.trim_start_matches('_').eq_ignore_ascii_case(member)
}

impl Rule for ErrorInfoBuilderSetsRequired {
    fn descriptor(&self) -> &'static RuleDescriptor {
        &ERROR_INFO_BUILDER_SETS_REQUIRED
    }

    fn applies_to(&self, classification: &Classification) -> bool {
        classification.has(Capability::ErrorInfoBuilder)
    }

    fn check(&self, ctx: &TypeContext<'_>) -> Vec<Violation> {
        let Some(body) = ctx
            .ty
            .methods
            .iter()
            .filter(|m| m.name == BUILD)
            .find_map(|m| m.body.as_ref())
        else {
            return Vec::new();
        };

        let missing: Vec<&str> = MANDATORY_MEMBERS
            .iter()
            .copied()
            .filter(|member| {
                !body
                    .referenced_members
                    .iter()
                    .any(|ident| same_member(ident, member))
            })
            .collect();

        if missing.is_empty() {
            return Vec::new();
        }
        vec![ctx.at_type(
            self.descriptor(),
            vec![ctx.ty.name.clone(), missing.join(", ")],
        )]
    }
}
