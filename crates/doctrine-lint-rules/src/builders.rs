//! Builder rules: metadata builders terminate in `Build()`, and every other
//! public method of a builder chains.

use doctrine_lint_core::{
    Accessibility, Capability, Classification, MethodDescriptor, Rule, RuleDescriptor,
    TypeContext, Violation,
};

use crate::descriptors::{BUILDER_METHODS_RETURN_BUILDER, METADATA_BUILDER_MUST_BUILD};

/// Capabilities that make a return type a builder.
const BUILDER_CAPABILITIES: [Capability; 3] = [
    Capability::ErrorInfoBuilder,
    Capability::MetadataBuilder,
    Capability::EnvelopeBuilder,
];

/// Requires a metadata builder to expose `public Build()`, an instance
/// method without parameters.
#[derive(Debug, Clone, Copy, Default)]
pub struct MetadataBuilderMustBuild;

impl Rule for MetadataBuilderMustBuild {
    fn descriptor(&self) -> &'static RuleDescriptor {
        &METADATA_BUILDER_MUST_BUILD
    }

    fn applies_to(&self, classification: &Classification) -> bool {
        classification.has(Capability::MetadataBuilder)
    }

    fn check(&self, ctx: &TypeContext<'_>) -> Vec<Violation> {
        let can_build = ctx.ty.methods.iter().any(|m| {
            m.name == "Build"
                && !m.is_static
                && m.parameter_count == 0
                && m.accessibility == Accessibility::Public
        });
        if can_build {
            return Vec::new();
        }
        vec![ctx.at_type(self.descriptor(), vec![ctx.ty.name.clone()])]
    }
}

/// Requires every public instance method of a builder, `Build()` aside, to
/// return the builder itself or a builder interface.
#[derive(Debug, Clone, Copy, Default)]
pub struct BuilderMethodsReturnBuilder;

impl BuilderMethodsReturnBuilder {
    fn chains(ctx: &TypeContext<'_>, method: &MethodDescriptor) -> bool {
        ctx.ty.is_named_by(&method.return_type)
            || BUILDER_CAPABILITIES
                .iter()
                .any(|c| ctx.type_ref_has(&method.return_type, *c))
    }
}

impl Rule for BuilderMethodsReturnBuilder {
    fn descriptor(&self) -> &'static RuleDescriptor {
        &BUILDER_METHODS_RETURN_BUILDER
    }

    fn check(&self, ctx: &TypeContext<'_>) -> Vec<Violation> {
        ctx.ty
            .methods
            .iter()
            .filter(|m| m.accessibility == Accessibility::Public && !m.is_static)
            .filter(|m| m.name != "Build")
            .filter(|m| !Self::chains(ctx, m))
            .map(|m| ctx.at(self.descriptor(), &m.location, vec![m.name.clone()]))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::{
        check, codes, ENVELOPE, ENVELOPE_BUILDER, ERROR_INFO_BUILDER, METADATA, METADATA_BUILDER,
    };
    use doctrine_lint_core::{Location, TypeDescriptor, TypeRef};

    fn builder() -> TypeDescriptor {
        TypeDescriptor::class("TagsBuilder").implements(METADATA_BUILDER)
    }

    fn build() -> MethodDescriptor {
        MethodDescriptor::new("Build", TypeRef::named(METADATA))
    }

    #[test]
    fn public_parameterless_build_passes() {
        let ty = builder().method(build());
        assert!(check(&MetadataBuilderMustBuild, &ty).is_empty());
    }

    #[test]
    fn missing_build_reports_once_at_type() {
        let violations = check(&MetadataBuilderMustBuild, &builder());
        assert_eq!(violations.len(), 1);
        insta::assert_snapshot!(violations[0].message, @"Metadata builder 'TagsBuilder' must expose a public, parameterless 'Build()' method");
    }

    #[test]
    fn near_misses_do_not_count() {
        let ty = builder()
            .method(build().with_parameters(1))
            .method(build().static_method())
            .method(build().with_accessibility(Accessibility::Internal));
        assert_eq!(check(&MetadataBuilderMustBuild, &ty).len(), 1);
    }

    #[test]
    fn builders_skip_immutability_family() {
        use doctrine_lint_core::{CapabilityRegistry, DoctrineCategory};
        let classification = CapabilityRegistry::zentient().classify(&builder());
        assert!(!classification.in_category(DoctrineCategory::ImmutableContract));
    }

    fn envelope_builder() -> TypeDescriptor {
        TypeDescriptor::class("EnvelopeBuilder")
            .with_qualified_name("App.Envelopes.EnvelopeBuilder")
            .implements(ENVELOPE_BUILDER)
    }

    #[test]
    fn chaining_methods_pass() {
        let ty = envelope_builder()
            .method(MethodDescriptor::new("WithCode", TypeRef::named(ENVELOPE_BUILDER)))
            .method(MethodDescriptor::new(
                "WithErrors",
                TypeRef::named("App.Envelopes.EnvelopeBuilder"),
            ))
            .method(MethodDescriptor::new(
                "WithHeaders",
                TypeRef::named("App.Envelopes.HeaderedBuilder").implementing(ENVELOPE_BUILDER),
            ))
            .method(MethodDescriptor::new("Build", TypeRef::named(ENVELOPE)));
        assert!(check(&BuilderMethodsReturnBuilder, &ty).is_empty());
    }

    #[test]
    fn non_chaining_method_reports_at_method() {
        let ty = envelope_builder()
            .method(MethodDescriptor::new("WithCode", TypeRef::named(ENVELOPE_BUILDER)))
            .method(
                MethodDescriptor::new("Reset", TypeRef::named("void"))
                    .at(Location::new("src/EnvelopeBuilder.cs", 31, 17)),
            );
        let violations = check(&BuilderMethodsReturnBuilder, &ty);
        assert_eq!(codes(&violations), vec!["ZNT3002"]);
        assert_eq!(violations[0].location.line, 31);
        insta::assert_snapshot!(violations[0].message, @"Method 'Reset' on a builder type does not return a builder instance, which breaks fluent chaining");
    }

    #[test]
    fn static_private_and_build_methods_are_exempt() {
        let void = TypeRef::named("void");
        let ty = envelope_builder()
            .method(MethodDescriptor::new("Create", void.clone()).static_method())
            .method(MethodDescriptor::new("Validate", void.clone()).with_accessibility(Accessibility::Private))
            .method(MethodDescriptor::new("Build", void));
        assert!(check(&BuilderMethodsReturnBuilder, &ty).is_empty());
    }

    #[test]
    fn applies_to_every_builder_kind() {
        let string = TypeRef::named("string");
        for marker in [ERROR_INFO_BUILDER, METADATA_BUILDER, ENVELOPE_BUILDER] {
            let ty = TypeDescriptor::class("AnyBuilder")
                .implements(marker)
                .method(MethodDescriptor::new("Describe", string.clone()));
            assert_eq!(codes(&check(&BuilderMethodsReturnBuilder, &ty)), vec!["ZNT3002"], "{marker}");
        }
    }

    #[test]
    fn non_builders_are_ignored() {
        let ty = TypeDescriptor::class("Formatter")
            .implements(METADATA)
            .method(MethodDescriptor::new("Describe", TypeRef::named("string")));
        assert!(check(&BuilderMethodsReturnBuilder, &ty).is_empty());
    }
}
