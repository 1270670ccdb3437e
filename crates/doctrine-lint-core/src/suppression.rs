//! Type-level rule suppressions.
//!
//! A host records suppressions on the [`TypeDescriptor`] itself, e.g. from
//! an attribute such as:
//! ```text
//! [SuppressDoctrine("ZNT1001A", Justification = "proxied by the ORM")]
//! ```
//! A suppression names a rule ID, a rule name, or `all`.

use crate::model::TypeDescriptor;
use crate::rule::Rule;
use crate::types::{Severity, Suggestion, Violation};

/// Result of looking up a suppression for a rule.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AllowCheck {
    /// Rule is not suppressed.
    Denied,
    /// Rule is suppressed with optional justification.
    Allowed {
        /// The justification provided (if any).
        reason: Option<String>,
    },
}

impl AllowCheck {
    /// Returns true if suppressed.
    #[must_use]
    pub fn is_allowed(&self) -> bool {
        matches!(self, Self::Allowed { .. })
    }

    /// Returns the justification if suppressed.
    #[must_use]
    pub fn reason(&self) -> Option<&str> {
        match self {
            Self::Allowed { reason } => reason.as_deref(),
            Self::Denied => None,
        }
    }
}

/// Looks up a suppression for `rule` on `ty`.
///
/// When several entries cover the rule, a justified one wins.
#[must_use]
pub fn check_suppression(ty: &TypeDescriptor, rule: &dyn Rule) -> AllowCheck {
    let mut found = None;
    for suppression in ty
        .suppressions
        .iter()
        .filter(|s| s.covers(rule.code(), rule.name()))
    {
        let reason = suppression
            .justification
            .as_deref()
            .map(str::trim)
            .filter(|r| !r.is_empty());
        if let Some(reason) = reason {
            return AllowCheck::Allowed {
                reason: Some(reason.to_string()),
            };
        }
        found = Some(AllowCheck::Allowed { reason: None });
    }
    found.unwrap_or(AllowCheck::Denied)
}

/// Warning emitted when a rule that demands a justification was suppressed
/// without one.
#[must_use]
pub fn missing_reason_violation(ty: &TypeDescriptor, rule: &dyn Rule) -> Violation {
    Violation::new(
        rule.code(),
        rule.name(),
        Severity::Warning,
        ty.location.clone(),
        format!(
            "Suppression of '{}' on '{}' is missing required justification",
            rule.name(),
            ty.name
        ),
    )
    .with_suggestion(Suggestion::new(
        "Add a justification explaining why this type is exempt",
    ))
}
