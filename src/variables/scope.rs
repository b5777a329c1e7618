//! Variable resolution sets.
//!
//! Several variable mappings are flattened into one by applying them in
//! order, later mappings overriding earlier ones. The canonical order for a
//! request is defaults, then collection variables, then environment variables.

use crate::models::Environment;
use std::collections::HashMap;

/// Merges mappings in the given order; a later mapping wins on key collision.
///
/// # Examples
///
/// ```
/// use api_workspace::variables::merge_variables;
/// use std::collections::HashMap;
///
/// let staging = HashMap::from([("env".to_string(), "staging".to_string())]);
/// let production = HashMap::from([("env".to_string(), "production".to_string())]);
///
/// let merged = merge_variables([&staging, &production]);
/// assert_eq!(merged.get("env"), Some(&"production".to_string()));
/// assert!(merge_variables(Vec::<&HashMap<String, String>>::new()).is_empty());
/// ```
pub fn merge_variables<'a, I>(mappings: I) -> HashMap<String, String>
where
    I: IntoIterator<Item = &'a HashMap<String, String>>,
{
    let mut merged = HashMap::new();
    for mapping in mappings {
        for (key, value) in mapping {
            merged.insert(key.clone(), value.clone());
        }
    }
    merged
}

/// The layered variables available to one request.
///
/// Precedence, lowest first:
/// 1. Defaults (workspace configuration)
/// 2. Collection variables
/// 3. Environment variables
#[derive(Debug, Clone, Default, PartialEq)]
pub struct VariableScope {
    defaults: HashMap<String, String>,
    collection: HashMap<String, String>,
    environment: HashMap<String, String>,
}

impl VariableScope {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_defaults(mut self, defaults: HashMap<String, String>) -> Self {
        self.defaults = defaults;
        self
    }

    pub fn with_collection(mut self, variables: HashMap<String, String>) -> Self {
        self.collection = variables;
        self
    }

    pub fn with_environment(mut self, environment: Option<&Environment>) -> Self {
        self.environment = environment
            .map(|env| env.variables.clone())
            .unwrap_or_default();
        self
    }

    /// Looks a single name up through the layers without building the merged map.
    pub fn get(&self, name: &str) -> Option<&String> {
        self.environment
            .get(name)
            .or_else(|| self.collection.get(name))
            .or_else(|| self.defaults.get(name))
    }

    /// Flattens the layers into the mapping used for substitution.
    pub fn resolve(&self) -> HashMap<String, String> {
        merge_variables([&self.defaults, &self.collection, &self.environment])
    }
}
