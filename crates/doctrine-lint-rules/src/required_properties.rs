//! Per-capability required properties.
//!
//! Each capability mandates a fixed set of readable properties. A property
//! that is absent, or whose getter is not `public`/`internal`, is reported
//! at the type declaration since there may be no member to point at.
//!
//! | Rule | Capability | Required |
//! |------|------------|----------|
//! | ZNT1003A | `IResult` | `Messages`, `Errors` (+ `Value` for `IResult<T>`) |
//! | ZNT1003B | `IEnvelope` | `Messages`, `Errors`, `Code` (+ `Value` when carrying one) |
//! | ZNT1003C | `IHeaderedEnvelope` | `Headers` |
//! | ZNT1003D | `IStreamableEnvelope` | `Stream` |
//! | ZNT1003E | `ICode` | `Definition` |
//! | ZNT1003F | `IErrorInfo` | `ErrorDefinition`, `Code`, `Message`, `InstanceId` |
//! | ZNT1003G | `IValidationContext` | `Definition` |
//!
//! Metadata has no entry; it is covered by the immutability rules.

use doctrine_lint_core::{Capability, Classification, Rule, RuleDescriptor, TypeContext, Violation};

use crate::descriptors::{
    CODE_REQUIRED_PROPERTIES, ENVELOPE_REQUIRED_PROPERTIES, ERROR_INFO_REQUIRED_PROPERTIES,
    HEADERED_ENVELOPE_REQUIRED_PROPERTIES, RESULT_REQUIRED_PROPERTIES,
    STREAMABLE_ENVELOPE_REQUIRED_PROPERTIES, VALIDATION_CONTEXT_REQUIRED_PROPERTIES,
};

/// Option key for extra required property names.
pub const ADDITIONAL_PROPERTIES: &str = "additional-properties";

/// Requires a set of readable properties on types with one capability.
#[derive(Debug, Clone)]
pub struct RequiredProperties {
    descriptor: &'static RuleDescriptor,
    capability: Capability,
    required: Vec<String>,
    /// Capability that additionally requires `Value`.
    value_capability: Option<Capability>,
}

impl RequiredProperties {
    fn new(
        descriptor: &'static RuleDescriptor,
        capability: Capability,
        required: &[&str],
    ) -> Self {
        Self {
            descriptor,
            capability,
            required: required.iter().map(ToString::to_string).collect(),
            value_capability: None,
        }
    }

    /// ZNT1003A: `Messages`, `Errors`, and `Value` on `IResult<T>`.
    #[must_use]
    pub fn result() -> Self {
        let mut rule = Self::new(
            &RESULT_REQUIRED_PROPERTIES,
            Capability::Result,
            &["Messages", "Errors"],
        );
        rule.value_capability = Some(Capability::ResultOfValue);
        rule
    }

    /// ZNT1003B: `Messages`, `Errors`, `Code`, and `Value` on value envelopes.
    #[must_use]
    pub fn envelope() -> Self {
        let mut rule = Self::new(
            &ENVELOPE_REQUIRED_PROPERTIES,
            Capability::Envelope,
            &["Messages", "Errors", "Code"],
        );
        rule.value_capability = Some(Capability::EnvelopeOfValue);
        rule
    }

    /// ZNT1003C: `Headers`.
    #[must_use]
    pub fn headered_envelope() -> Self {
        Self::new(
            &HEADERED_ENVELOPE_REQUIRED_PROPERTIES,
            Capability::HeaderedEnvelope,
            &["Headers"],
        )
    }

    /// ZNT1003D: `Stream`.
    #[must_use]
    pub fn streamable_envelope() -> Self {
        Self::new(
            &STREAMABLE_ENVELOPE_REQUIRED_PROPERTIES,
            Capability::StreamableEnvelope,
            &["Stream"],
        )
    }

    /// ZNT1003E: `Definition`.
    #[must_use]
    pub fn code() -> Self {
        Self::new(&CODE_REQUIRED_PROPERTIES, Capability::Code, &["Definition"])
    }

    /// ZNT1003F: `ErrorDefinition`, `Code`, `Message`, `InstanceId`.
    #[must_use]
    pub fn error_info() -> Self {
        Self::new(
            &ERROR_INFO_REQUIRED_PROPERTIES,
            Capability::ErrorInfo,
            &["ErrorDefinition", "Code", "Message", "InstanceId"],
        )
    }

    /// ZNT1003G: `Definition`.
    #[must_use]
    pub fn validation_context() -> Self {
        Self::new(
            &VALIDATION_CONTEXT_REQUIRED_PROPERTIES,
            Capability::ValidationContext,
            &["Definition"],
        )
    }

    /// Every required-property rule with its base table.
    #[must_use]
    pub fn all() -> Vec<Self> {
        vec![
            Self::result(),
            Self::envelope(),
            Self::headered_envelope(),
            Self::streamable_envelope(),
            Self::code(),
            Self::error_info(),
            Self::validation_context(),
        ]
    }

    /// Adds a required property name.
    #[must_use]
    pub fn require(mut self, name: impl Into<String>) -> Self {
        let name = name.into();
        if !self.required.contains(&name) {
            self.required.push(name);
        }
        self
    }

    /// Adds several required property names.
    #[must_use]
    pub fn require_all<I, S>(self, names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        names.into_iter().fold(self, Self::require)
    }

    /// The capability this rule applies to.
    #[must_use]
    pub fn capability(&self) -> Capability {
        self.capability
    }

    fn required_for<'a>(&'a self, ctx: &TypeContext<'_>) -> impl Iterator<Item = &'a str> {
        let value = self
            .value_capability
            .filter(|c| ctx.has(*c))
            .map(|_| "Value");
        self.required.iter().map(String::as_str).chain(value)
    }
}

impl Rule for RequiredProperties {
    fn descriptor(&self) -> &'static RuleDescriptor {
        self.descriptor
    }

    fn applies_to(&self, classification: &Classification) -> bool {
        classification.has(self.capability)
    }

    fn check(&self, ctx: &TypeContext<'_>) -> Vec<Violation> {
        self.required_for(ctx)
            .filter(|name| !ctx.property(name).is_some_and(|p| p.is_readable()))
            .map(|name| {
                ctx.at_type(
                    self.descriptor,
                    vec![ctx.ty.name.clone(), name.to_string()],
                )
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::{
        check, codes, CODE, ENVELOPE, ENVELOPE_OF_VALUE, ERROR_INFO, HEADERED_ENVELOPE, RESULT,
        RESULT_OF_VALUE, STREAMABLE_ENVELOPE, VALIDATION_CONTEXT,
    };
    use doctrine_lint_core::{Accessibility, GetterBody, Location, PropertyDescriptor, TypeDescriptor};

    fn missing(rule: &RequiredProperties, ty: &TypeDescriptor) -> Vec<String> {
        check(rule, ty)
            .into_iter()
            .map(|v| v.arguments[1].clone())
            .collect()
    }

    fn with_props(ty: TypeDescriptor, names: &[&str]) -> TypeDescriptor {
        names
            .iter()
            .fold(ty, |ty, n| ty.property(PropertyDescriptor::get_only(*n)))
    }

    #[test]
    fn result_requires_messages_and_errors() {
        let ty = TypeDescriptor::class("OkResult")
            .implements(RESULT)
            .at(Location::new("OkResult.cs", 1, 14));
        let violations = check(&RequiredProperties::result(), &ty);
        assert_eq!(codes(&violations), vec!["ZNT1003A", "ZNT1003A"]);
        assert_eq!(violations[0].arguments, vec!["OkResult", "Messages"]);
        assert_eq!(violations[1].arguments, vec!["OkResult", "Errors"]);
        assert_eq!(violations[0].location, Location::new("OkResult.cs", 1, 14));
        insta::assert_snapshot!(violations[0].message, @"Type 'OkResult' implements IResult but is missing a readable 'Messages' property");
    }

    #[test]
    fn generic_result_requires_value() {
        let ty = with_props(
            TypeDescriptor::class("ValueResult").implements(RESULT_OF_VALUE),
            &["Messages", "Errors"],
        );
        assert_eq!(missing(&RequiredProperties::result(), &ty), vec!["Value"]);
    }

    #[test]
    fn complete_result_passes() {
        let ty = with_props(
            TypeDescriptor::class("ValueResult").implements(RESULT_OF_VALUE),
            &["Messages", "Errors", "Value"],
        );
        assert!(check(&RequiredProperties::result(), &ty).is_empty());
    }

    #[test]
    fn private_getter_is_unreadable() {
        let ty = with_props(TypeDescriptor::class("OkResult").implements(RESULT), &["Messages"])
            .property(
                PropertyDescriptor::get_only("Errors")
                    .with_getter(Accessibility::Private, GetterBody::Auto),
            );
        assert_eq!(missing(&RequiredProperties::result(), &ty), vec!["Errors"]);
    }

    #[test]
    fn setter_only_is_unreadable() {
        let ty = with_props(TypeDescriptor::class("OkResult").implements(RESULT), &["Messages"])
            .property(
                PropertyDescriptor::get_only("Errors")
                    .without_getter()
                    .with_setter(Accessibility::Public),
            );
        assert_eq!(missing(&RequiredProperties::result(), &ty), vec!["Errors"]);
    }

    #[test]
    fn envelope_requires_code_and_value() {
        let plain = TypeDescriptor::class("Envelope").implements(ENVELOPE);
        assert_eq!(
            missing(&RequiredProperties::envelope(), &plain),
            vec!["Messages", "Errors", "Code"]
        );
        let valued = with_props(
            TypeDescriptor::class("Envelope").implements(ENVELOPE_OF_VALUE),
            &["Messages", "Errors", "Code"],
        );
        assert_eq!(missing(&RequiredProperties::envelope(), &valued), vec!["Value"]);
    }

    #[test]
    fn headers_and_stream_only_for_their_markers() {
        let plain = TypeDescriptor::class("Envelope").implements(ENVELOPE);
        assert!(check(&RequiredProperties::headered_envelope(), &plain).is_empty());
        assert!(check(&RequiredProperties::streamable_envelope(), &plain).is_empty());

        let headered = TypeDescriptor::class("Envelope").implements(HEADERED_ENVELOPE);
        assert_eq!(
            missing(&RequiredProperties::headered_envelope(), &headered),
            vec!["Headers"]
        );
        let streamable = TypeDescriptor::class("Envelope").implements(STREAMABLE_ENVELOPE);
        assert_eq!(
            missing(&RequiredProperties::streamable_envelope(), &streamable),
            vec!["Stream"]
        );
        // The streamable marker at arity 3 also carries a value.
        assert!(missing(&RequiredProperties::envelope(), &streamable).contains(&"Value".to_string()));
    }

    #[test]
    fn code_error_info_and_validation_context() {
        let code = TypeDescriptor::class("HttpCode").implements(CODE);
        assert_eq!(missing(&RequiredProperties::code(), &code), vec!["Definition"]);

        let error = with_props(
            TypeDescriptor::class("ErrorInfo").implements(ERROR_INFO),
            &["ErrorDefinition", "Message"],
        );
        assert_eq!(
            missing(&RequiredProperties::error_info(), &error),
            vec!["Code", "InstanceId"]
        );

        let context = TypeDescriptor::class("Ctx").implements(VALIDATION_CONTEXT);
        assert_eq!(
            missing(&RequiredProperties::validation_context(), &context),
            vec!["Definition"]
        );
    }

    #[test]
    fn additional_properties_are_required_once() {
        let rule = RequiredProperties::result().require_all(["IsSuccess", "Errors", "IsSuccess"]);
        let ty = with_props(
            TypeDescriptor::class("OkResult").implements(RESULT),
            &["Messages", "Errors"],
        );
        assert_eq!(missing(&rule, &ty), vec!["IsSuccess"]);
    }

    #[test]
    fn unrelated_capabilities_are_skipped() {
        let ty = TypeDescriptor::class("HttpCode").implements(CODE);
        for rule in RequiredProperties::all() {
            if rule.capability() != Capability::Code {
                assert!(check(&rule, &ty).is_empty(), "{} fired", rule.code());
            }
        }
    }
}
