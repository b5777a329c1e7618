//! HTTP request template models.
//!
//! This module defines the request templates stored inside a collection,
//! including the request method, ordered headers, dot-path body fields and
//! the optional cache of the last observed response.

use super::response::CachedResponse;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// HTTP request method.
///
/// Represents all standard HTTP methods as defined in RFC 7231 and RFC 5789.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum HttpMethod {
    /// HTTP GET method - retrieve a resource
    #[default]
    GET,
    /// HTTP POST method - submit data to create a resource
    POST,
    /// HTTP PUT method - replace a resource
    PUT,
    /// HTTP DELETE method - remove a resource
    DELETE,
    /// HTTP PATCH method - partially modify a resource
    PATCH,
    /// HTTP OPTIONS method - describe communication options
    OPTIONS,
    /// HTTP HEAD method - retrieve headers only
    HEAD,
    /// HTTP TRACE method - perform a message loop-back test
    TRACE,
    /// HTTP CONNECT method - establish a tunnel to the server
    CONNECT,
}

impl HttpMethod {
    /// Returns the string representation of the HTTP method.
    pub fn as_str(&self) -> &'static str {
        match self {
            HttpMethod::GET => "GET",
            HttpMethod::POST => "POST",
            HttpMethod::PUT => "PUT",
            HttpMethod::DELETE => "DELETE",
            HttpMethod::PATCH => "PATCH",
            HttpMethod::OPTIONS => "OPTIONS",
            HttpMethod::HEAD => "HEAD",
            HttpMethod::TRACE => "TRACE",
            HttpMethod::CONNECT => "CONNECT",
        }
    }

    /// Parses a method name, ignoring ASCII case.
    ///
    /// Returns `None` for empty or unknown names.
    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_ascii_uppercase().as_str() {
            "GET" => Some(HttpMethod::GET),
            "POST" => Some(HttpMethod::POST),
            "PUT" => Some(HttpMethod::PUT),
            "DELETE" => Some(HttpMethod::DELETE),
            "PATCH" => Some(HttpMethod::PATCH),
            "OPTIONS" => Some(HttpMethod::OPTIONS),
            "HEAD" => Some(HttpMethod::HEAD),
            "TRACE" => Some(HttpMethod::TRACE),
            "CONNECT" => Some(HttpMethod::CONNECT),
            _ => None,
        }
    }
}

impl std::fmt::Display for HttpMethod {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// A single header line. Order and duplicates are preserved.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Header {
    pub key: String,
    pub value: String,
}

impl Header {
    pub fn new(key: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            value: value.into(),
        }
    }
}

/// One body field addressed by a dot-separated path such as `user.address.city`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BodyField {
    pub path: String,
    pub value: Value,
}

impl BodyField {
    pub fn new(path: impl Into<String>, value: impl Into<Value>) -> Self {
        Self {
            path: path.into(),
            value: value.into(),
        }
    }
}

/// An HTTP request template owned by exactly one collection.
///
/// The URL, headers and string body values may contain `{{variable}}`
/// placeholders which are resolved by the [`crate::variables`] engine
/// before the request leaves the workspace.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Request {
    /// Identifier, unique within the owning collection.
    ///
    /// An empty id means "not yet assigned"; the store fills it in on create.
    #[serde(default)]
    pub id: String,

    /// Display name.
    pub name: String,

    /// HTTP method (GET, POST, PUT, DELETE, etc.).
    #[serde(default)]
    pub method: HttpMethod,

    /// URL template, may contain placeholders.
    pub url: String,

    /// Fully-qualified name of the request message type.
    ///
    /// Opaque to the workspace; interpreted only by the schema layer.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub request_type: Option<String>,

    /// Fully-qualified name of the success response message type.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub response_type: Option<String>,

    /// Fully-qualified name of the error response message type.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error_response_type: Option<String>,

    /// Request headers in declaration order.
    #[serde(default)]
    pub headers: Vec<Header>,

    /// Body fields in declaration order.
    #[serde(default)]
    pub body: Vec<BodyField>,

    /// Timeout in seconds.
    #[serde(default)]
    pub timeout: u64,

    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,

    /// The last response observed for this request, if any.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_response: Option<CachedResponse>,
}

impl Request {
    /// Creates a new request with an unassigned id and both timestamps set to now.
    pub fn new(name: impl Into<String>, method: HttpMethod, url: impl Into<String>) -> Self {
        let now = Utc::now();
        Self {
            id: String::new(),
            name: name.into(),
            method,
            url: url.into(),
            request_type: None,
            response_type: None,
            error_response_type: None,
            headers: Vec::new(),
            body: Vec::new(),
            timeout: 0,
            created_at: now,
            updated_at: now,
            last_response: None,
        }
    }

    /// Appends a header, keeping any existing header with the same key.
    pub fn add_header(&mut self, key: impl Into<String>, value: impl Into<String>) {
        self.headers.push(Header::new(key, value));
    }

    /// Appends a body field.
    pub fn add_body_field(&mut self, path: impl Into<String>, value: impl Into<Value>) {
        self.body.push(BodyField::new(path, value));
    }

    /// Returns the value of the first header matching `key`, ignoring case.
    pub fn header(&self, key: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|h| h.key.eq_ignore_ascii_case(key))
            .map(|h| h.value.as_str())
    }

    /// Gets the Content-Type header value if present.
    pub fn content_type(&self) -> Option<&str> {
        self.header("content-type")
    }

    pub fn has_body(&self) -> bool {
        !self.body.is_empty()
    }

    /// Folds the body fields into a nested JSON object.
    ///
    /// Fields are applied in order, so a later field overwrites an earlier one
    /// with the same path. A non-object value sitting on the way to a deeper
    /// path is replaced by an object.
    pub fn body_json(&self) -> Value {
        let mut root = Map::new();
        for field in &self.body {
            let segments: Vec<&str> = field.path.split('.').collect();
            insert_path(&mut root, &segments, field.value.clone());
        }
        Value::Object(root)
    }
}

fn insert_path(map: &mut Map<String, Value>, segments: &[&str], value: Value) {
    match segments {
        [] => {}
        [last] => {
            map.insert((*last).to_string(), value);
        }
        [head, rest @ ..] => {
            let entry = map
                .entry((*head).to_string())
                .or_insert_with(|| Value::Object(Map::new()));
            if !entry.is_object() {
                *entry = Value::Object(Map::new());
            }
            if let Value::Object(child) = entry {
                insert_path(child, rest, value);
            }
        }
    }
}
