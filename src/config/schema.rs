//! Configuration schema for the workspace.
//!
//! This module defines the configuration structure and validation logic for
//! the defaults the workspace service applies to new entities.

use crate::models::HttpMethod;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use thiserror::Error;

/// Errors raised while loading or validating configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read configuration: {0}")]
    Io(#[from] std::io::Error),

    #[error("failed to parse configuration: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("invalid configuration: {0}")]
    Invalid(String),
}

/// Main configuration structure for the workspace.
///
/// Read from the "workspace" key of a settings document. Missing settings
/// fall back to sensible defaults.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WorkspaceConfig {
    /// Timeout in seconds given to new requests created without one.
    ///
    /// Defaults to 30. Must be greater than 0.
    #[serde(default = "default_timeout")]
    pub default_timeout: u64,

    /// Method given to new requests created without one. Defaults to GET.
    #[serde(default)]
    pub default_method: HttpMethod,

    /// Lowest-precedence variables, overridden by collection and environment
    /// variables. Defaults to empty.
    #[serde(default)]
    pub default_variables: HashMap<String, String>,

    /// Number of requests above which a collection is reported as oversized.
    ///
    /// Advisory only: exceeding it logs a warning. Defaults to 1000. Must be > 0.
    #[serde(default = "default_max_requests_per_collection")]
    pub max_requests_per_collection: usize,
}

impl Default for WorkspaceConfig {
    fn default() -> Self {
        Self {
            default_timeout: default_timeout(),
            default_method: HttpMethod::default(),
            default_variables: HashMap::new(),
            max_requests_per_collection: default_max_requests_per_collection(),
        }
    }
}

impl WorkspaceConfig {
    /// Validates the configuration.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.default_timeout == 0 {
            return Err(ConfigError::Invalid(
                "defaultTimeout must be greater than 0".to_string(),
            ));
        }

        if self.max_requests_per_collection == 0 {
            return Err(ConfigError::Invalid(
                "maxRequestsPerCollection must be greater than 0".to_string(),
            ));
        }

        Ok(())
    }

    /// Merges this configuration with another, using values from `other`.
    ///
    /// Default variables are combined, `other` winning on key collision.
    pub fn merge(&self, other: &WorkspaceConfig) -> Self {
        let mut default_variables = self.default_variables.clone();
        default_variables.extend(
            other
                .default_variables
                .iter()
                .map(|(k, v)| (k.clone(), v.clone())),
        );

        Self {
            default_timeout: other.default_timeout,
            default_method: other.default_method,
            default_variables,
            max_requests_per_collection: other.max_requests_per_collection,
        }
    }
}

// Default value functions for serde

fn default_timeout() -> u64 {
    30
}

fn default_max_requests_per_collection() -> usize {
    1000
}
