//! Cached response model.
//!
//! A request keeps the last response observed for it so that the
//! presentation layer can show it again without re-sending the request.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// The last response observed for a request.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CachedResponse {
    /// HTTP status code (e.g., 200, 404, 500).
    pub status_code: u16,

    /// HTTP status text (e.g., "OK", "Not Found").
    #[serde(default)]
    pub status_text: String,

    /// Response headers in the order they were received.
    #[serde(default)]
    pub headers: Vec<(String, String)>,

    /// Response body as raw bytes.
    ///
    /// Kept as `Vec<u8>` so binary protocol payloads survive unchanged.
    #[serde(default)]
    pub raw_body: Vec<u8>,

    /// Body decoded by the protocol layer, when it knew how.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub decoded_body: Option<Value>,

    /// When the response was received.
    pub received_at: DateTime<Utc>,
}

impl CachedResponse {
    pub fn new(status_code: u16, status_text: impl Into<String>) -> Self {
        Self {
            status_code,
            status_text: status_text.into(),
            headers: Vec::new(),
            raw_body: Vec::new(),
            decoded_body: None,
            received_at: Utc::now(),
        }
    }

    pub fn add_header(&mut self, name: impl Into<String>, value: impl Into<String>) {
        self.headers.push((name.into(), value.into()));
    }

    /// Checks if the status code indicates success (2xx).
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status_code)
    }

    /// Returns the raw body as text, replacing invalid UTF-8 sequences.
    pub fn body_text(&self) -> String {
        String::from_utf8_lossy(&self.raw_body).into_owned()
    }
}
