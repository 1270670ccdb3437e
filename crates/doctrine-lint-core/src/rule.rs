//! Rule trait for defining doctrine rules.

use crate::capability::Classification;
use crate::context::TypeContext;
use crate::descriptor::RuleDescriptor;
use crate::types::{Severity, Violation};

/// A doctrine rule evaluated against one classified type.
///
/// Rules are pure: the same [`TypeContext`] always produces the same
/// violations, and nothing is retained between calls. Each rule is backed
/// by a static [`RuleDescriptor`] that supplies its ID, name, category,
/// default severity and message template.
///
/// # Example
///
/// ```ignore
/// use doctrine_lint_core::{Rule, RuleDescriptor, TypeContext, Violation};
///
/// pub struct MustBeSealed;
///
/// impl Rule for MustBeSealed {
///     fn descriptor(&self) -> &'static RuleDescriptor { &SEALED }
///
///     fn check(&self, ctx: &TypeContext) -> Vec<Violation> {
///         if ctx.ty.is_sealed {
///             return Vec::new();
///         }
///         vec![ctx.at_type(self.descriptor(), vec![ctx.ty.name.clone()])]
///     }
/// }
/// ```
pub trait Rule: Send + Sync {
    /// Returns the static descriptor backing this rule.
    fn descriptor(&self) -> &'static RuleDescriptor;

    /// Returns the kebab-case name of this rule.
    fn name(&self) -> &'static str {
        self.descriptor().name
    }

    /// Returns the rule code (e.g., "ZNT1001A").
    fn code(&self) -> &'static str {
        self.descriptor().id
    }

    /// Returns a brief description of what this rule checks.
    fn description(&self) -> &'static str {
        self.descriptor().title
    }

    /// Returns the default severity for violations from this rule.
    fn default_severity(&self) -> Severity {
        self.descriptor().severity
    }

    /// Whether suppressing this rule requires a justification.
    ///
    /// By default, rules with `Severity::Error` require one.
    fn requires_allow_reason(&self) -> bool {
        self.default_severity() == Severity::Error
    }

    /// Whether this rule applies to a type with the given classification.
    ///
    /// Defaults to membership in the descriptor's doctrine category.
    fn applies_to(&self, classification: &Classification) -> bool {
        classification.in_category(self.descriptor().category)
    }

    /// Checks one type and returns any violations found.
    fn check(&self, ctx: &TypeContext<'_>) -> Vec<Violation>;
}

/// Type alias for boxed Rule trait objects.
pub type RuleBox = Box<dyn Rule>;
