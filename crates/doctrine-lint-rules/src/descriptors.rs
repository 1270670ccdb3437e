//! The canonical rule table.
//!
//! One [`RuleDescriptor`] per rule ID. Rules reference these statics; hosts
//! enumerate them through [`all_descriptors`].

use doctrine_lint_core::{DoctrineCategory, RuleDescriptor, Severity};

use DoctrineCategory::{
    BuilderContract, EnvelopeContract, ErrorContract, ImmutableContract, MetadataContract,
    ResultContract, StatelessComponent, ValidationContract,
};

/// ZNT1001A: concrete immutable types are sealed.
pub static CONCRETE_TYPE_MUST_BE_SEALED: RuleDescriptor = RuleDescriptor {
    id: "ZNT1001A",
    name: "concrete-type-must-be-sealed",
    category: ImmutableContract,
    severity: Severity::Error,
    title: "Concrete immutable type must be sealed",
    message_format: "Concrete type '{0}' implementing a core immutable abstraction must be declared 'sealed'",
    description: "Concrete implementations of immutable contracts are sealed so that no subclass can \
                  add mutable state or bypass the designated builders and factories.",
};

/// ZNT1001B: properties are get-only.
pub static PROPERTIES_MUST_BE_GET_ONLY: RuleDescriptor = RuleDescriptor {
    id: "ZNT1001B",
    name: "properties-must-be-get-only",
    category: ImmutableContract,
    severity: Severity::Error,
    title: "Properties must be get-only",
    message_format: "Property '{0}' on type '{1}' must be get-only",
    description: "A setter visible outside the type lets callers alter an instance after creation.",
};

/// ZNT1001C: no public or internal constructors.
pub static NO_PUBLIC_CONSTRUCTORS: RuleDescriptor = RuleDescriptor {
    id: "ZNT1001C",
    name: "no-public-constructors",
    category: ImmutableContract,
    severity: Severity::Error,
    title: "Use a builder or factory instead of a public constructor",
    message_format: "Type '{0}' must not contain a public or internal constructor",
    description: "Immutable types are created through builders or static factory methods only.",
};

/// ZNT1001D: validation contexts expose static factories.
pub static MUST_HAVE_STATIC_FACTORY_METHODS: RuleDescriptor = RuleDescriptor {
    id: "ZNT1001D",
    name: "must-have-static-factory-methods",
    category: ValidationContract,
    severity: Severity::Error,
    title: "Type must provide static factory methods",
    message_format: "Type '{0}' must provide static factory methods for creation instead of public constructors",
    description: "Types without a dedicated builder are created through a public or internal static \
                  method returning the type itself or another validation context.",
};

/// ZNT1002A: `IsSuccess` has no visible setter.
pub static IS_SUCCESS_NOT_SETTABLE: RuleDescriptor = RuleDescriptor {
    id: "ZNT1002A",
    name: "is-success-not-settable",
    category: ResultContract,
    severity: Severity::Error,
    title: "IsSuccess must not be settable",
    message_format: "The IsSuccess property on type '{0}' must not have a setter",
    description: "IsSuccess reflects the state of the errors, it is never independent data.",
};

/// ZNT1002B: result `IsSuccess` is computed from `Errors`.
pub static IS_SUCCESS_DERIVED_FROM_ERRORS: RuleDescriptor = RuleDescriptor {
    id: "ZNT1002B",
    name: "is-success-derived-from-errors",
    category: ResultContract,
    severity: Severity::Error,
    title: "IsSuccess must be a derived, computed property",
    message_format: "The IsSuccess property on type '{0}' must be computed from the Errors collection",
    description: "A result is successful exactly when its Errors collection is empty.",
};

/// ZNT1002C: envelope `IsSuccess` is computed from `Errors` or `Code`.
pub static IS_SUCCESS_DERIVED_FROM_ERRORS_OR_CODE: RuleDescriptor = RuleDescriptor {
    id: "ZNT1002C",
    name: "is-success-derived-from-errors-or-code",
    category: EnvelopeContract,
    severity: Severity::Error,
    title: "Envelope IsSuccess must be derived from Errors or Code",
    message_format: "The IsSuccess property on envelope type '{0}' must be computed from Errors or Code",
    description: "An envelope's success is derived from its errors or its outcome code.",
};

/// ZNT1003A: result shape.
pub static RESULT_REQUIRED_PROPERTIES: RuleDescriptor = RuleDescriptor {
    id: "ZNT1003A",
    name: "result-required-properties",
    category: ResultContract,
    severity: Severity::Error,
    title: "Result types must expose the required properties",
    message_format: "Type '{0}' implements IResult but is missing a readable '{1}' property",
    description: "Results expose readable Messages and Errors, and Value when generic.",
};

/// ZNT1003B: envelope shape.
pub static ENVELOPE_REQUIRED_PROPERTIES: RuleDescriptor = RuleDescriptor {
    id: "ZNT1003B",
    name: "envelope-required-properties",
    category: EnvelopeContract,
    severity: Severity::Error,
    title: "Envelope types must expose the required properties",
    message_format: "Type '{0}' implements IEnvelope but is missing a readable '{1}' property",
    description: "Envelopes expose readable Messages, Errors and Code, and Value when they carry one.",
};

/// ZNT1003C: headered envelope shape.
pub static HEADERED_ENVELOPE_REQUIRED_PROPERTIES: RuleDescriptor = RuleDescriptor {
    id: "ZNT1003C",
    name: "headered-envelope-required-properties",
    category: EnvelopeContract,
    severity: Severity::Error,
    title: "Headered envelopes must expose Headers",
    message_format: "Type '{0}' implements IHeaderedEnvelope but is missing a readable '{1}' property",
    description: "Headered envelopes expose their transport headers.",
};

/// ZNT1003D: streamable envelope shape.
pub static STREAMABLE_ENVELOPE_REQUIRED_PROPERTIES: RuleDescriptor = RuleDescriptor {
    id: "ZNT1003D",
    name: "streamable-envelope-required-properties",
    category: EnvelopeContract,
    severity: Severity::Error,
    title: "Streamable envelopes must expose Stream",
    message_format: "Type '{0}' implements IStreamableEnvelope but is missing a readable '{1}' property",
    description: "Streamable envelopes expose their payload stream.",
};

/// ZNT1003E: code shape.
pub static CODE_REQUIRED_PROPERTIES: RuleDescriptor = RuleDescriptor {
    id: "ZNT1003E",
    name: "code-required-properties",
    category: ImmutableContract,
    severity: Severity::Error,
    title: "Codes must expose their definition",
    message_format: "Type '{0}' implements ICode but is missing a readable '{1}' property",
    description: "Every code carries the definition it was created from.",
};

/// ZNT1003F: error info shape.
pub static ERROR_INFO_REQUIRED_PROPERTIES: RuleDescriptor = RuleDescriptor {
    id: "ZNT1003F",
    name: "error-info-required-properties",
    category: ErrorContract,
    severity: Severity::Error,
    title: "Error info types must expose the required properties",
    message_format: "Type '{0}' implements IErrorInfo but is missing a readable '{1}' property",
    description: "Error info exposes ErrorDefinition, Code, Message and InstanceId.",
};

/// ZNT1003G: validation context shape.
pub static VALIDATION_CONTEXT_REQUIRED_PROPERTIES: RuleDescriptor = RuleDescriptor {
    id: "ZNT1003G",
    name: "validation-context-required-properties",
    category: ValidationContract,
    severity: Severity::Error,
    title: "Validation contexts must expose their definition",
    message_format: "Type '{0}' implements IValidationContext but is missing a readable '{1}' property",
    description: "Every validation context carries the definition it validates against.",
};

/// ZNT1004: envelope values are not settable.
pub static ENVELOPE_VALUE_ONLY_ON_SUCCESS: RuleDescriptor = RuleDescriptor {
    id: "ZNT1004",
    name: "envelope-value-only-on-success",
    category: EnvelopeContract,
    severity: Severity::Error,
    title: "Envelope value must only exist on success",
    message_format: "Property '{0}' on envelope type '{1}' must not be settable; a value only exists on success",
    description: "An unsuccessful envelope carries no value. Keeping the setter private leaves the \
                  value under the control of the envelope's own factories.",
};

/// ZNT1005A: `InnerErrors` is never null.
pub static ERROR_INFO_INNER_ERRORS_NON_NULLABLE: RuleDescriptor = RuleDescriptor {
    id: "ZNT1005A",
    name: "error-info-inner-errors-non-nullable",
    category: ErrorContract,
    severity: Severity::Error,
    title: "InnerErrors must be non-nullable",
    message_format: "Property 'InnerErrors' on type '{0}' must be a non-nullable collection that is never initialized to null",
    description: "Consumers iterate inner errors without null checks; an empty collection means none.",
};

/// ZNT1005B: error builders set every mandatory member.
pub static ERROR_INFO_BUILDER_SETS_REQUIRED: RuleDescriptor = RuleDescriptor {
    id: "ZNT1005B",
    name: "error-info-builder-sets-required",
    category: ErrorContract,
    severity: Severity::Error,
    title: "Error info builders must set all mandatory members",
    message_format: "Build method on builder '{0}' never sets mandatory member(s): {1}",
    description: "An error info built without its definition, code, message or instance id is incomplete.",
};

/// ZNT1006A: `IsSuccessful` has no visible setter.
pub static IS_SUCCESSFUL_NOT_SETTABLE: RuleDescriptor = RuleDescriptor {
    id: "ZNT1006A",
    name: "is-successful-not-settable",
    category: ValidationContract,
    severity: Severity::Error,
    title: "IsSuccessful must not be settable",
    message_format: "The IsSuccessful property on validation context '{0}' must not have a setter",
    description: "A validation outcome is derived from the context, never assigned.",
};

/// ZNT1006B: `IsSuccessful` is computed.
pub static IS_SUCCESSFUL_COMPUTED: RuleDescriptor = RuleDescriptor {
    id: "ZNT1006B",
    name: "is-successful-computed",
    category: ValidationContract,
    severity: Severity::Error,
    title: "IsSuccessful must be a computed property",
    message_format: "The IsSuccessful property on validation context '{0}' must be computed, not auto-implemented",
    description: "A validation outcome is derived from the context, never stored.",
};

/// ZNT1007: metadata builders can build.
pub static METADATA_BUILDER_MUST_BUILD: RuleDescriptor = RuleDescriptor {
    id: "ZNT1007",
    name: "metadata-builder-must-build",
    category: MetadataContract,
    severity: Severity::Error,
    title: "Metadata builders must expose Build()",
    message_format: "Metadata builder '{0}' must expose a public, parameterless 'Build()' method",
    description: "Every metadata builder terminates in a public instance Build() method.",
};

/// ZNT3002: builder methods chain.
pub static BUILDER_METHODS_RETURN_BUILDER: RuleDescriptor = RuleDescriptor {
    id: "ZNT3002",
    name: "builder-methods-return-builder",
    category: BuilderContract,
    severity: Severity::Error,
    title: "Builder methods must return the builder instance",
    message_format: "Method '{0}' on a builder type does not return a builder instance, which breaks fluent chaining",
    description: "Every public instance method of a builder other than Build() returns the builder \
                  itself or a builder interface so that calls can be chained.",
};

/// ZNT5001: handlers and policies hold no mutable state.
pub static HANDLERS_MUST_BE_STATELESS: RuleDescriptor = RuleDescriptor {
    id: "ZNT5001",
    name: "handlers-must-be-stateless",
    category: StatelessComponent,
    severity: Severity::Error,
    title: "Handlers and policies must be stateless",
    message_format: "Type '{0}' contains a mutable, non-injected, non-const instance field '{1}', which violates statelessness",
    description: "Handlers and policies are shared across calls. Dependencies are injected into \
                  readonly fields; anything else is const or static.",
};

static TABLE: [&RuleDescriptor; 22] = [
    &CONCRETE_TYPE_MUST_BE_SEALED,
    &PROPERTIES_MUST_BE_GET_ONLY,
    &NO_PUBLIC_CONSTRUCTORS,
    &MUST_HAVE_STATIC_FACTORY_METHODS,
    &IS_SUCCESS_NOT_SETTABLE,
    &IS_SUCCESS_DERIVED_FROM_ERRORS,
    &IS_SUCCESS_DERIVED_FROM_ERRORS_OR_CODE,
    &RESULT_REQUIRED_PROPERTIES,
    &ENVELOPE_REQUIRED_PROPERTIES,
    &HEADERED_ENVELOPE_REQUIRED_PROPERTIES,
    &STREAMABLE_ENVELOPE_REQUIRED_PROPERTIES,
    &CODE_REQUIRED_PROPERTIES,
    &ERROR_INFO_REQUIRED_PROPERTIES,
    &VALIDATION_CONTEXT_REQUIRED_PROPERTIES,
    &ENVELOPE_VALUE_ONLY_ON_SUCCESS,
    &ERROR_INFO_INNER_ERRORS_NON_NULLABLE,
    &ERROR_INFO_BUILDER_SETS_REQUIRED,
    &IS_SUCCESSFUL_NOT_SETTABLE,
    &IS_SUCCESSFUL_COMPUTED,
    &METADATA_BUILDER_MUST_BUILD,
    &BUILDER_METHODS_RETURN_BUILDER,
    &HANDLERS_MUST_BE_STATELESS,
];

/// Returns every rule descriptor, ordered by rule ID.
#[must_use]
pub fn all_descriptors() -> &'static [&'static RuleDescriptor] {
    &TABLE
}

/// Looks up a descriptor by rule ID (case-insensitive) or name.
#[must_use]
pub fn descriptor(key: &str) -> Option<&'static RuleDescriptor> {
    TABLE.iter().copied().find(|d| d.matches(key))
}
