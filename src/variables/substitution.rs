//! Placeholder substitution.
//!
//! Replaces `{{variable}}` placeholders in strings, and in any nested value
//! built from strings, with values from a flat variable mapping. Substitution
//! is a single pass: a substituted value is inserted verbatim and is never
//! scanned for placeholders again. Unknown variables are left in place,
//! braces included.

use crate::models::{BodyField, Header};
use once_cell::sync::Lazy;
use regex::{Captures, Regex};
use serde_json::Value;
use std::collections::HashMap;

/// Cached regex pattern for matching `{{variableName}}`.
///
/// The name is any non-empty run of characters other than `}` and is used
/// verbatim, surrounding whitespace included.
pub(crate) static VARIABLE_REGEX: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\{\{([^}]+)\}\}").expect("Failed to compile variable regex"));

/// Returns true if `template` contains at least one well-formed placeholder.
pub fn has_placeholders(template: &str) -> bool {
    template.contains("{{") && VARIABLE_REGEX.is_match(template)
}

/// Substitutes every placeholder whose name is present in `vars`.
///
/// # Examples
///
/// ```
/// use api_workspace::variables::resolve_string;
/// use std::collections::HashMap;
///
/// let mut vars = HashMap::new();
/// vars.insert("name".to_string(), "World".to_string());
///
/// assert_eq!(resolve_string("Hello {{name}}!", &vars), "Hello World!");
/// assert_eq!(resolve_string("Hello {{other}}!", &vars), "Hello {{other}}!");
/// ```
pub fn resolve_string(template: &str, vars: &HashMap<String, String>) -> String {
    // Fast path: nothing to look at
    if vars.is_empty() || !template.contains("{{") {
        return template.to_string();
    }

    VARIABLE_REGEX
        .replace_all(template, |caps: &Captures| match vars.get(&caps[1]) {
            Some(value) => value.clone(),
            None => caps[0].to_string(),
        })
        .into_owned()
}

/// Values whose strings can be resolved against a variable mapping.
///
/// Implementations return a new value and never mutate `self`. Non-string
/// leaves (numbers, booleans, null) are copied unchanged.
pub trait Resolve {
    fn resolve(&self, vars: &HashMap<String, String>) -> Self;
}

impl Resolve for String {
    fn resolve(&self, vars: &HashMap<String, String>) -> Self {
        resolve_string(self, vars)
    }
}

impl Resolve for Value {
    fn resolve(&self, vars: &HashMap<String, String>) -> Self {
        match self {
            Value::String(s) => Value::String(resolve_string(s, vars)),
            Value::Array(items) => Value::Array(items.iter().map(|v| v.resolve(vars)).collect()),
            Value::Object(map) => Value::Object(
                map.iter()
                    .map(|(k, v)| (k.clone(), v.resolve(vars)))
                    .collect(),
            ),
            other => other.clone(),
        }
    }
}

impl<T: Resolve> Resolve for Vec<T> {
    fn resolve(&self, vars: &HashMap<String, String>) -> Self {
        self.iter().map(|item| item.resolve(vars)).collect()
    }
}

impl<T: Resolve> Resolve for Option<T> {
    fn resolve(&self, vars: &HashMap<String, String>) -> Self {
        self.as_ref().map(|item| item.resolve(vars))
    }
}

impl<T: Resolve> Resolve for HashMap<String, T> {
    fn resolve(&self, vars: &HashMap<String, String>) -> Self {
        self.iter()
            .map(|(k, v)| (k.clone(), v.resolve(vars)))
            .collect()
    }
}

impl Resolve for Header {
    fn resolve(&self, vars: &HashMap<String, String>) -> Self {
        Header {
            key: resolve_string(&self.key, vars),
            value: resolve_string(&self.value, vars),
        }
    }
}

impl Resolve for BodyField {
    fn resolve(&self, vars: &HashMap<String, String>) -> Self {
        BodyField {
            path: self.path.clone(),
            value: self.value.resolve(vars),
        }
    }
}

/// Recursively resolves every string inside `value`.
///
/// ```
/// use api_workspace::variables::resolve_deep;
/// use serde_json::json;
/// use std::collections::HashMap;
///
/// let vars = HashMap::from([("id".to_string(), "42".to_string())]);
/// let body = json!({"user": {"id": "{{id}}", "tags": ["{{id}}", 7]}});
///
/// assert_eq!(
///     resolve_deep(&body, &vars),
///     json!({"user": {"id": "42", "tags": ["42", 7]}})
/// );
/// ```
pub fn resolve_deep<T: Resolve>(value: &T, vars: &HashMap<String, String>) -> T {
    value.resolve(vars)
}
