//! Placeholder discovery and validation.
//!
//! Only well-formed `{{name}}` placeholders are recognised; a fragment such
//! as `{{name}` or `{name}}` is plain text. This matches what the substitution
//! engine replaces, so every name reported missing here is exactly one that
//! `resolve_string` would leave in place.

use super::substitution::VARIABLE_REGEX;
use std::collections::HashMap;

/// Returns the referenced variable names in order of appearance, duplicates included.
///
/// ```
/// use api_workspace::variables::extract_variables;
///
/// assert_eq!(
///     extract_variables("{{a}} and {{b}} and {{a}}"),
///     vec!["a", "b", "a"]
/// );
/// ```
pub fn extract_variables(template: &str) -> Vec<String> {
    if !template.contains("{{") {
        return Vec::new();
    }

    VARIABLE_REGEX
        .captures_iter(template)
        .map(|caps| caps[1].to_string())
        .collect()
}

/// Returns the referenced names that `vars` cannot satisfy, in extraction order.
///
/// An empty result means every placeholder in `template` is resolvable.
pub fn validate_variables(template: &str, vars: &HashMap<String, String>) -> Vec<String> {
    extract_variables(template)
        .into_iter()
        .filter(|name| !vars.contains_key(name))
        .collect()
}
