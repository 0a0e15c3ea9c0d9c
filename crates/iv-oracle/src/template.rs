//! Template placeholder helpers.
//!
//! Validation accepts any template string alongside any set of template
//! rolls. These helpers let callers check the two against each other when
//! they want to.

use crate::roll::RollResult;

/// Placeholder names in order of first appearance, without duplicates.
///
/// A placeholder is `{{name}}`; surrounding whitespace inside the braces is
/// trimmed and empty placeholders are skipped.
pub fn placeholders(template: &str) -> Vec<&str> {
    let mut names = Vec::new();
    let mut rest = template;
    while let Some(start) = rest.find("{{") {
        let after = &rest[start + 2..];
        let Some(end) = after.find("}}") else {
            break;
        };
        let name = after[..end].trim();
        if !name.is_empty() && !names.contains(&name) {
            names.push(name);
        }
        rest = &after[end + 2..];
    }
    names
}

/// Disagreement between a template string and its rolls.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct TemplateMismatch {
    /// Placeholders with no roll.
    pub missing: Vec<String>,
    /// Rolls no placeholder refers to.
    pub unused: Vec<String>,
}

impl TemplateMismatch {
    /// True when the template and rolls agree.
    pub fn is_empty(&self) -> bool {
        self.missing.is_empty() && self.unused.is_empty()
    }
}

impl RollResult {
    /// Compare a templated roll's placeholders with its rolls.
    ///
    /// Returns `None` for rolls that are not templated.
    pub fn template_mismatches(&self) -> Option<TemplateMismatch> {
        let Self::Templated {
            template_string,
            template_rolls,
            ..
        } = self
        else {
            return None;
        };
        let names = placeholders(template_string);
        Some(TemplateMismatch {
            missing: names
                .iter()
                .filter(|name| !template_rolls.contains_key(**name))
                .map(|name| name.to_string())
                .collect(),
            unused: template_rolls
                .keys()
                .filter(|key| !names.contains(&key.as_str()))
                .cloned()
                .collect(),
        })
    }
}
