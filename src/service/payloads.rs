//! Creation and update payloads accepted by the workspace service.
//!
//! These are what callers send; the service turns them into stored entities.
//! An update payload follows the "empty means unchanged" convention: a field
//! that is absent, an empty string, an empty list or zero leaves the stored
//! value as it is.

use crate::models::{BodyField, Header, HttpMethod, Request};
use serde::de::{self, Deserializer};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::PathBuf;

/// Payload for creating a collection.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct NewCollection {
    pub name: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub proto_paths: Vec<PathBuf>,
    #[serde(default)]
    pub variables: HashMap<String, String>,
}

impl NewCollection {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Default::default()
        }
    }
}

/// Payload for creating a request inside a collection.
///
/// A missing method or a zero timeout is filled from the workspace
/// configuration.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct NewRequest {
    pub name: String,
    #[serde(default, deserialize_with = "method_or_empty")]
    pub method: Option<HttpMethod>,
    pub url: String,
    #[serde(default)]
    pub request_type: Option<String>,
    #[serde(default)]
    pub response_type: Option<String>,
    #[serde(default)]
    pub error_response_type: Option<String>,
    #[serde(default)]
    pub headers: Vec<Header>,
    #[serde(default)]
    pub body: Vec<BodyField>,
    #[serde(default)]
    pub timeout: u64,
}

impl NewRequest {
    pub fn new(name: impl Into<String>, method: HttpMethod, url: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            method: Some(method),
            url: url.into(),
            ..Default::default()
        }
    }
}

/// Partial update of a request.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RequestUpdate {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default, deserialize_with = "method_or_empty")]
    pub method: Option<HttpMethod>,
    #[serde(default)]
    pub url: Option<String>,
    #[serde(default)]
    pub request_type: Option<String>,
    #[serde(default)]
    pub response_type: Option<String>,
    #[serde(default)]
    pub error_response_type: Option<String>,
    #[serde(default)]
    pub headers: Option<Vec<Header>>,
    #[serde(default)]
    pub body: Option<Vec<BodyField>>,
    #[serde(default)]
    pub timeout: Option<u64>,
}

fn non_empty(value: &Option<String>) -> Option<&String> {
    value.as_ref().filter(|s| !s.is_empty())
}

fn non_empty_list<T>(value: &Option<Vec<T>>) -> Option<&Vec<T>> {
    value.as_ref().filter(|items| !items.is_empty())
}

impl RequestUpdate {
    /// Returns true if applying this update would change nothing.
    pub fn is_empty(&self) -> bool {
        non_empty(&self.name).is_none()
            && self.method.is_none()
            && non_empty(&self.url).is_none()
            && non_empty(&self.request_type).is_none()
            && non_empty(&self.response_type).is_none()
            && non_empty(&self.error_response_type).is_none()
            && non_empty_list(&self.headers).is_none()
            && non_empty_list(&self.body).is_none()
            && self.timeout.unwrap_or(0) == 0
    }

    /// Overwrites each field of `request` for which this update carries a
    /// non-empty, non-zero value. Identity and timestamps are not touched.
    pub fn apply_to(&self, request: &mut Request) {
        if let Some(name) = non_empty(&self.name) {
            request.name = name.clone();
        }
        if let Some(method) = self.method {
            request.method = method;
        }
        if let Some(url) = non_empty(&self.url) {
            request.url = url.clone();
        }
        if let Some(request_type) = non_empty(&self.request_type) {
            request.request_type = Some(request_type.clone());
        }
        if let Some(response_type) = non_empty(&self.response_type) {
            request.response_type = Some(response_type.clone());
        }
        if let Some(error_response_type) = non_empty(&self.error_response_type) {
            request.error_response_type = Some(error_response_type.clone());
        }
        if let Some(headers) = non_empty_list(&self.headers) {
            request.headers = headers.clone();
        }
        if let Some(body) = non_empty_list(&self.body) {
            request.body = body.clone();
        }
        if let Some(timeout) = self.timeout.filter(|t| *t > 0) {
            request.timeout = timeout;
        }
    }
}

/// Accepts a method name, treating `null` and `""` as "not given".
fn method_or_empty<'de, D>(deserializer: D) -> Result<Option<HttpMethod>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = Option::<String>::deserialize(deserializer)?;
    match raw.as_deref().map(str::trim) {
        None | Some("") => Ok(None),
        Some(name) => HttpMethod::parse(name)
            .map(Some)
            .ok_or_else(|| de::Error::custom(format!("unknown HTTP method: {}", name))),
    }
}
