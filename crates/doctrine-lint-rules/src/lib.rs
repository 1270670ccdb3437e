//! # doctrine-lint-rules
//!
//! Built-in doctrine rules for doctrine-lint.
//!
//! ## Available Rules
//!
//! | Code | Name | Applies to |
//! |------|------|------------|
//! | ZNT1001A | `concrete-type-must-be-sealed` | immutable contracts |
//! | ZNT1001B | `properties-must-be-get-only` | immutable contracts |
//! | ZNT1001C | `no-public-constructors` | immutable contracts |
//! | ZNT1001D | `must-have-static-factory-methods` | validation contexts |
//! | ZNT1002A | `is-success-not-settable` | results, envelopes |
//! | ZNT1002B | `is-success-derived-from-errors` | results |
//! | ZNT1002C | `is-success-derived-from-errors-or-code` | envelopes |
//! | ZNT1003A-G | `*-required-properties` | one capability each |
//! | ZNT1004 | `envelope-value-only-on-success` | value envelopes |
//! | ZNT1005A | `error-info-inner-errors-non-nullable` | error info |
//! | ZNT1005B | `error-info-builder-sets-required` | error info builders |
//! | ZNT1006A | `is-successful-not-settable` | validation contexts |
//! | ZNT1006B | `is-successful-computed` | validation contexts |
//! | ZNT1007 | `metadata-builder-must-build` | metadata builders |
//! | ZNT3002 | `builder-methods-return-builder` | error info, metadata and envelope builders |
//! | ZNT5001 | `handlers-must-be-stateless` | handlers, policies |
//!
//! ## Usage
//!
//! ```ignore
//! use doctrine_lint_core::Analyzer;
//! use doctrine_lint_rules::{recommended_rules, ConcreteTypeMustBeSealed};
//!
//! let analyzer = Analyzer::builder()
//!     .rules(recommended_rules())
//!     .build()?;
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod builders;
mod derived_flag;
mod descriptors;
mod envelope;
mod error_info;
mod immutability;
mod presets;
mod required_properties;
mod statelessness;
mod validation_context;

#[cfg(test)]
mod test_support;

pub use builders::{BuilderMethodsReturnBuilder, MetadataBuilderMustBuild};
pub use derived_flag::{IsSuccessDerived, IsSuccessNotSettable};
pub use descriptors::{all_descriptors, descriptor};
pub use envelope::EnvelopeValueOnlyOnSuccess;
pub use error_info::{ErrorInfoBuilderSetsRequired, InnerErrorsNonNullable, MANDATORY_MEMBERS};
pub use immutability::{
    ConcreteTypeMustBeSealed, MustHaveStaticFactoryMethods, NoPublicConstructors,
    PropertiesMustBeGetOnly,
};
pub use presets::{all_rules, minimal_rules, recommended_rules, strict_rules, Preset};
pub use required_properties::{RequiredProperties, ADDITIONAL_PROPERTIES};
pub use statelessness::HandlersMustBeStateless;
pub use validation_context::{IsSuccessfulComputed, IsSuccessfulNotSettable};

/// Re-export core types for convenience.
pub use doctrine_lint_core::{Rule, RuleDescriptor, Severity, Violation};
