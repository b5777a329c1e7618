//! Collection model.

use super::request::Request;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::PathBuf;

/// A named group of request templates plus collection-scoped variables.
///
/// A collection owns its requests: they have no existence outside of it and
/// disappear with it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Collection {
    /// Store-assigned identifier. Empty until the collection is created.
    #[serde(default)]
    pub id: String,

    pub name: String,

    #[serde(default)]
    pub description: String,

    /// Filesystem roots of the protocol schemas used by this collection's requests.
    #[serde(default)]
    pub proto_paths: Vec<PathBuf>,

    /// Collection-scoped variables.
    ///
    /// Overridden by environment variables when both define the same key.
    #[serde(default)]
    pub variables: HashMap<String, String>,

    /// Requests in display order.
    #[serde(default)]
    pub requests: Vec<Request>,

    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Collection {
    /// Creates an empty collection with an unassigned id and both timestamps set to now.
    pub fn new(name: impl Into<String>) -> Self {
        let now = Utc::now();
        Self {
            id: String::new(),
            name: name.into(),
            description: String::new(),
            proto_paths: Vec::new(),
            variables: HashMap::new(),
            requests: Vec::new(),
            created_at: now,
            updated_at: now,
        }
    }

    pub fn find_request(&self, request_id: &str) -> Option<&Request> {
        self.requests.iter().find(|r| r.id == request_id)
    }

    pub(crate) fn request_position(&self, request_id: &str) -> Option<usize> {
        self.requests.iter().position(|r| r.id == request_id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::HttpMethod;

    #[test]
    fn test_collection_new() {
        let collection = Collection::new("Users API");
        assert!(collection.id.is_empty());
        assert_eq!(collection.name, "Users API");
        assert!(collection.requests.is_empty());
        assert!(collection.variables.is_empty());
    }

    #[test]
    fn test_find_request() {
        let mut collection = Collection::new("c");
        let mut first = Request::new("first", HttpMethod::GET, "/a");
        first.id = "1".to_string();
        let mut second = Request::new("second", HttpMethod::POST, "/b");
        second.id = "2".to_string();
        collection.requests = vec![first, second];

        assert_eq!(collection.find_request("2").map(|r| r.name.as_str()), Some("second"));
        assert_eq!(collection.request_position("1"), Some(0));
        assert!(collection.find_request("3").is_none());
    }

    #[test]
    fn test_deserialization_defaults() {
        let json = r#"{
            "name": "Minimal",
            "created_at": "2024-01-01T00:00:00Z",
            "updated_at": "2024-01-01T00:00:00Z"
        }"#;
        let collection: Collection = serde_json::from_str(json).unwrap();
        assert_eq!(collection.name, "Minimal");
        assert!(collection.id.is_empty());
        assert!(collection.proto_paths.is_empty());
        assert!(collection.requests.is_empty());
    }
}
