//! Static rule descriptors.
//!
//! Every rule is backed by one [`RuleDescriptor`]: its stable ID, kebab-case
//! name, doctrine category, default severity and a message template with
//! positional `{0}`, `{1}`, ... placeholders. Descriptors are `const`
//! data so the whole table can be enumerated by a host.

use serde::Serialize;

use crate::capability::DoctrineCategory;
use crate::types::Severity;

/// Immutable metadata for one rule.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct RuleDescriptor {
    /// Stable rule identifier (e.g., "ZNT1001A").
    pub id: &'static str,
    /// Kebab-case rule name (e.g., "concrete-type-must-be-sealed").
    pub name: &'static str,
    /// Doctrine category the rule enforces.
    pub category: DoctrineCategory,
    /// Default severity of violations.
    pub severity: Severity,
    /// Short title.
    pub title: &'static str,
    /// Message template with positional placeholders.
    pub message_format: &'static str,
    /// Longer description of the doctrine being enforced.
    pub description: &'static str,
}

impl RuleDescriptor {
    /// Renders the message template with positional arguments.
    ///
    /// `{N}` is replaced by `args[N]`; placeholders without a matching
    /// argument render as empty text. `{{` and `}}` produce literal braces.
    #[must_use]
    pub fn format_message<S: AsRef<str>>(&self, args: &[S]) -> String {
        let template = self.message_format;
        let mut out = String::with_capacity(template.len() + 16);
        let mut chars = template.char_indices().peekable();

        while let Some((i, c)) = chars.next() {
            match c {
                '{' if chars.peek().map(|&(_, n)| n) == Some('{') => {
                    chars.next();
                    out.push('{');
                }
                '}' if chars.peek().map(|&(_, n)| n) == Some('}') => {
                    chars.next();
                    out.push('}');
                }
                '{' => {
                    let rest = &template[i + 1..];
                    match rest.find('}') {
                        Some(end) if rest[..end].chars().all(|d| d.is_ascii_digit()) && end > 0 => {
                            if let Ok(index) = rest[..end].parse::<usize>() {
                                if let Some(arg) = args.get(index) {
                                    out.push_str(arg.as_ref());
                                }
                            }
                            for _ in 0..=end {
                                chars.next();
                            }
                        }
                        _ => out.push('{'),
                    }
                }
                other => out.push(other),
            }
        }

        out
    }

    /// Returns true if `key` names this rule by ID or by name.
    #[must_use]
    pub fn matches(&self, key: &str) -> bool {
        self.id.eq_ignore_ascii_case(key) || self.name == key
    }
}
