//! Rule presets for common configurations.

use std::str::FromStr;

use doctrine_lint_core::{Capability, Config, ConfigError, Rule, RuleBox};

use crate::builders::{BuilderMethodsReturnBuilder, MetadataBuilderMustBuild};
use crate::derived_flag::{IsSuccessDerived, IsSuccessNotSettable, IS_SUCCESS};
use crate::envelope::EnvelopeValueOnlyOnSuccess;
use crate::error_info::{ErrorInfoBuilderSetsRequired, InnerErrorsNonNullable};
use crate::immutability::{
    ConcreteTypeMustBeSealed, MustHaveStaticFactoryMethods, NoPublicConstructors,
    PropertiesMustBeGetOnly,
};
use crate::required_properties::{RequiredProperties, ADDITIONAL_PROPERTIES};
use crate::statelessness::HandlersMustBeStateless;
use crate::validation_context::{IsSuccessfulComputed, IsSuccessfulNotSettable};

/// Preset configurations for doctrine-lint.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Preset {
    /// Every rule with its base property tables.
    #[default]
    Recommended,
    /// Every rule; results and envelopes must also declare `IsSuccess`.
    Strict,
    /// Structural immutability and required properties only, for gradual
    /// adoption.
    Minimal,
}

impl FromStr for Preset {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "recommended" => Ok(Self::Recommended),
            "strict" => Ok(Self::Strict),
            "minimal" => Ok(Self::Minimal),
            other => Err(ConfigError::UnknownPreset {
                name: other.to_string(),
            }),
        }
    }
}

impl Preset {
    /// Returns the rules for this preset.
    #[must_use]
    pub fn rules(self) -> Vec<RuleBox> {
        build(self, None)
    }

    /// Returns the rules for this preset with rule options from `config`
    /// applied.
    #[must_use]
    pub fn rules_with_config(self, config: &Config) -> Vec<RuleBox> {
        build(self, Some(config))
    }
}

/// Returns the recommended set of rules: every rule, in rule ID order.
#[must_use]
pub fn recommended_rules() -> Vec<RuleBox> {
    Preset::Recommended.rules()
}

/// Returns the strict set of rules.
///
/// Same rules as recommended, but `result-required-properties` and
/// `envelope-required-properties` also require `IsSuccess`.
#[must_use]
pub fn strict_rules() -> Vec<RuleBox> {
    Preset::Strict.rules()
}

/// Returns the minimal set of rules.
///
/// Includes:
/// - ZNT1001A-D, the structural immutability rules
/// - ZNT1003A-G, the required-property rules
#[must_use]
pub fn minimal_rules() -> Vec<RuleBox> {
    Preset::Minimal.rules()
}

/// Returns all available rules.
#[must_use]
pub fn all_rules() -> Vec<RuleBox> {
    recommended_rules()
}

fn build(preset: Preset, config: Option<&Config>) -> Vec<RuleBox> {
    let mut rules: Vec<RuleBox> = vec![
        Box::new(ConcreteTypeMustBeSealed),
        Box::new(PropertiesMustBeGetOnly),
        Box::new(NoPublicConstructors),
        Box::new(MustHaveStaticFactoryMethods),
    ];

    let full = preset != Preset::Minimal;
    if full {
        rules.push(Box::new(IsSuccessNotSettable));
        rules.push(Box::new(IsSuccessDerived::from_errors()));
        rules.push(Box::new(IsSuccessDerived::from_errors_or_code()));
    }

    for rule in RequiredProperties::all() {
        let rule = match rule.capability() {
            Capability::Result | Capability::Envelope if preset == Preset::Strict => {
                rule.require(IS_SUCCESS)
            }
            _ => rule,
        };
        rules.push(Box::new(configure(rule, config)));
    }

    if full {
        rules.push(Box::new(EnvelopeValueOnlyOnSuccess));
        rules.push(Box::new(InnerErrorsNonNullable));
        rules.push(Box::new(ErrorInfoBuilderSetsRequired));
        rules.push(Box::new(IsSuccessfulNotSettable));
        rules.push(Box::new(IsSuccessfulComputed));
        rules.push(Box::new(MetadataBuilderMustBuild));
        rules.push(Box::new(BuilderMethodsReturnBuilder));
        rules.push(Box::new(HandlersMustBeStateless));
    }

    rules
}

fn configure(rule: RequiredProperties, config: Option<&Config>) -> RequiredProperties {
    let extra = config
        .and_then(|c| c.rule(rule.code(), rule.name()))
        .map(|c| c.get_str_array(ADDITIONAL_PROPERTIES))
        .unwrap_or_default();
    rule.require_all(extra)
}
