//! Shared helpers for rule unit tests.

use doctrine_lint_core::{CapabilityRegistry, Rule, TypeContext, TypeDescriptor, Violation};

pub const RESULT: &str = "Zentient.Abstractions.Results.IResult";
pub const RESULT_OF_VALUE: &str = "Zentient.Abstractions.Results.IResult<string>";
pub const ENVELOPE: &str = "Zentient.Abstractions.Envelopes.IEnvelope<ICode, IErrorInfo>";
pub const ENVELOPE_OF_VALUE: &str =
    "Zentient.Abstractions.Envelopes.IEnvelope<ICode, IErrorInfo, int>";
pub const HEADERED_ENVELOPE: &str =
    "Zentient.Abstractions.Envelopes.IHeaderedEnvelope<ICode, IErrorInfo>";
pub const STREAMABLE_ENVELOPE: &str =
    "Zentient.Abstractions.Envelopes.IStreamableEnvelope<ICode, IErrorInfo, Stream>";
pub const CODE: &str = "Zentient.Abstractions.Codes.ICode<HttpCodeDefinition>";
pub const ERROR_INFO: &str = "Zentient.Abstractions.Errors.IErrorInfo<ValidationError>";
pub const VALIDATION_CONTEXT: &str = "Zentient.Abstractions.Validation.IValidationContext";
pub const ERROR_INFO_BUILDER: &str =
    "Zentient.Abstractions.Errors.Builders.IErrorInfoBuilder<ValidationError>";
pub const ENVELOPE_BUILDER: &str =
    "Zentient.Abstractions.Envelopes.Builders.IEnvelopeBuilder<ICode, IErrorInfo>";
pub const HANDLER: &str = "Zentient.Abstractions.Handlers.IHandler<CreateOrder, OrderId>";
pub const POLICY: &str = "Zentient.Abstractions.Policies.IPolicy<Order>";
pub const METADATA: &str = "Zentient.Abstractions.Metadata.IMetadata";
pub const METADATA_BUILDER: &str = "Zentient.Abstractions.Metadata.Builders.IMetadataBuilder";

/// Runs one rule against a type the way the analyzer would, honoring
/// `applies_to`.
pub fn check(rule: &dyn Rule, ty: &TypeDescriptor) -> Vec<Violation> {
    let registry = CapabilityRegistry::zentient();
    let classification = registry.classify(ty);
    if !rule.applies_to(&classification) {
        return Vec::new();
    }
    rule.check(&TypeContext::new(ty, &classification, &registry))
}

pub fn codes(violations: &[Violation]) -> Vec<&str> {
    violations.iter().map(|v| v.code.as_str()).collect()
}
