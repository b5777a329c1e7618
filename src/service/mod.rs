//! Workspace service.
//!
//! The layer callers talk to. It turns creation payloads into entities,
//! stamps timestamps, applies configured defaults and partial-update
//! semantics, then delegates to a [`WorkspaceStore`]. It holds no entity
//! state of its own and never recovers from a store error: every failure is
//! returned to the caller as the store reported it.
//!
//! It also assembles the variable resolution set for a request (defaults,
//! collection variables, environment variables) and produces fully
//! substituted copies of requests for the transport layer.

pub mod payloads;

pub use payloads::{NewCollection, NewRequest, RequestUpdate};

use crate::config::{get_config, WorkspaceConfig};
use crate::models::{CachedResponse, Collection, Environment, Request};
use crate::store::{EntityKind, StoreError, StoreResult, WorkspaceStore};
use crate::variables::{resolve_deep, resolve_string, validate_variables, VariableScope};
use chrono::Utc;
use log::{debug, warn};
use serde_json::Value;
use std::collections::HashMap;
use std::sync::Arc;

/// Stateless orchestration over a shared store.
#[derive(Clone)]
pub struct WorkspaceService {
    store: Arc<dyn WorkspaceStore>,
    config: WorkspaceConfig,
}

impl std::fmt::Debug for WorkspaceService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("WorkspaceService")
            .field("config", &self.config)
            .finish_non_exhaustive()
    }
}

impl WorkspaceService {
    /// Creates a service using a snapshot of the global configuration.
    pub fn new(store: Arc<dyn WorkspaceStore>) -> Self {
        Self::with_config(store, get_config())
    }

    pub fn with_config(store: Arc<dyn WorkspaceStore>, config: WorkspaceConfig) -> Self {
        Self { store, config }
    }

    pub fn store(&self) -> &Arc<dyn WorkspaceStore> {
        &self.store
    }

    pub fn config(&self) -> &WorkspaceConfig {
        &self.config
    }

    // Collections

    /// Creates an empty collection from `new`, stamping both timestamps.
    pub fn create_collection(&self, new: NewCollection) -> StoreResult<Collection> {
        let now = Utc::now();
        let collection = Collection {
            id: String::new(),
            name: new.name,
            description: new.description,
            proto_paths: new.proto_paths,
            variables: new.variables,
            requests: Vec::new(),
            created_at: now,
            updated_at: now,
        };

        let created = self.store.create_collection(collection)?;
        debug!("collection {} ({}) created", created.id, created.name);
        Ok(created)
    }

    pub fn get_collection(&self, id: &str) -> StoreResult<Collection> {
        self.store.get_collection(id)
    }

    pub fn list_collections(&self) -> StoreResult<Vec<Collection>> {
        self.store.list_collections()
    }

    /// Replaces a collection wholesale, re-stamping its update time.
    ///
    /// Unlike [`Self::update_request`] nothing is merged: `collection` must
    /// already be complete.
    pub fn update_collection(&self, mut collection: Collection) -> StoreResult<Collection> {
        collection.updated_at = Utc::now();
        self.store.update_collection(collection)
    }

    pub fn delete_collection(&self, id: &str) -> StoreResult<()> {
        self.store.delete_collection(id)
    }

    // Requests

    /// Creates a request in `collection_id` from `new`, stamping both
    /// timestamps and filling a missing method or timeout from configuration.
    pub fn create_request(&self, collection_id: &str, new: NewRequest) -> StoreResult<Request> {
        let now = Utc::now();
        let request = Request {
            id: String::new(),
            name: new.name,
            method: new.method.unwrap_or(self.config.default_method),
            url: new.url,
            request_type: new.request_type,
            response_type: new.response_type,
            error_response_type: new.error_response_type,
            headers: new.headers,
            body: new.body,
            timeout: if new.timeout > 0 {
                new.timeout
            } else {
                self.config.default_timeout
            },
            created_at: now,
            updated_at: now,
            last_response: None,
        };

        let created = self.store.create_request(collection_id, request)?;
        self.check_collection_size(collection_id);
        Ok(created)
    }

    pub fn get_request(&self, collection_id: &str, request_id: &str) -> StoreResult<Request> {
        self.store.get_request(collection_id, request_id)
    }

    /// Applies a partial update to an existing request.
    ///
    /// Only fields carrying a non-empty, non-zero value overwrite the stored
    /// request; see [`RequestUpdate::apply_to`].
    pub fn update_request(
        &self,
        collection_id: &str,
        request_id: &str,
        update: RequestUpdate,
    ) -> StoreResult<Request> {
        self.store
            .modify_request(collection_id, request_id, &mut |request| {
                update.apply_to(request);
                request.updated_at = Utc::now();
            })
    }

    pub fn delete_request(&self, collection_id: &str, request_id: &str) -> StoreResult<()> {
        self.store.delete_request(collection_id, request_id)
    }

    /// Stores `response` as the last observed response of a request.
    pub fn record_response(
        &self,
        collection_id: &str,
        request_id: &str,
        response: CachedResponse,
    ) -> StoreResult<Request> {
        let status = response.status_code;
        let mut response = Some(response);
        let recorded = self
            .store
            .modify_request(collection_id, request_id, &mut |request| {
                if let Some(response) = response.take() {
                    request.last_response = Some(response);
                }
                request.updated_at = Utc::now();
            })?;
        debug!(
            "recorded {} response for request {} in collection {}",
            status, request_id, collection_id
        );
        Ok(recorded)
    }

    // Environments

    pub fn create_environment(&self, environment: Environment) -> StoreResult<Environment> {
        self.store.create_environment(environment)
    }

    pub fn get_environment(&self, name: &str) -> StoreResult<Environment> {
        self.store.get_environment(name)
    }

    pub fn list_environments(&self) -> StoreResult<Vec<Environment>> {
        self.store.list_environments()
    }

    pub fn update_environment(&self, environment: Environment) -> StoreResult<Environment> {
        self.store.update_environment(environment)
    }

    pub fn delete_environment(&self, name: &str) -> StoreResult<()> {
        self.store.delete_environment(name)
    }

    // Resolution

    /// Builds the layered variables for requests of `collection_id`,
    /// optionally topped by the environment called `environment_name`.
    pub fn variable_scope(
        &self,
        collection_id: &str,
        environment_name: Option<&str>,
    ) -> StoreResult<VariableScope> {
        let collection = self.store.get_collection(collection_id)?;
        self.scope_for(&collection, environment_name)
    }

    /// Returns a copy of a request with its URL, headers and body resolved.
    ///
    /// The stored request is not modified. Placeholders with no matching
    /// variable are left in place; use [`Self::missing_variables`] to find them.
    pub fn resolve_request(
        &self,
        collection_id: &str,
        request_id: &str,
        environment_name: Option<&str>,
    ) -> StoreResult<Request> {
        let (request, vars) = self.resolution_input(collection_id, request_id, environment_name)?;

        let mut resolved = request.clone();
        resolved.url = resolve_string(&request.url, &vars);
        resolved.headers = resolve_deep(&request.headers, &vars);
        resolved.body = resolve_deep(&request.body, &vars);
        Ok(resolved)
    }

    /// Lists the variable names a request references that the resolution
    /// set cannot satisfy.
    ///
    /// Templates are checked in the order URL, headers, body; each name is
    /// reported once, at its first appearance.
    pub fn missing_variables(
        &self,
        collection_id: &str,
        request_id: &str,
        environment_name: Option<&str>,
    ) -> StoreResult<Vec<String>> {
        let (request, vars) = self.resolution_input(collection_id, request_id, environment_name)?;

        let mut templates: Vec<&str> = vec![request.url.as_str()];
        for header in &request.headers {
            templates.push(&header.key);
            templates.push(&header.value);
        }
        for field in &request.body {
            collect_strings(&field.value, &mut templates);
        }

        let mut missing: Vec<String> = Vec::new();
        for template in templates {
            for name in validate_variables(template, &vars) {
                if !missing.contains(&name) {
                    missing.push(name);
                }
            }
        }
        Ok(missing)
    }

    fn resolution_input(
        &self,
        collection_id: &str,
        request_id: &str,
        environment_name: Option<&str>,
    ) -> StoreResult<(Request, HashMap<String, String>)> {
        let collection = self.store.get_collection(collection_id)?;
        let request = collection
            .find_request(request_id)
            .cloned()
            .ok_or_else(|| StoreError::not_found(EntityKind::Request, request_id))?;
        let vars = self.scope_for(&collection, environment_name)?.resolve();
        Ok((request, vars))
    }

    fn scope_for(
        &self,
        collection: &Collection,
        environment_name: Option<&str>,
    ) -> StoreResult<VariableScope> {
        let environment = environment_name
            .map(|name| self.store.get_environment(name))
            .transpose()?;

        Ok(VariableScope::new()
            .with_defaults(self.config.default_variables.clone())
            .with_collection(collection.variables.clone())
            .with_environment(environment.as_ref()))
    }

    fn check_collection_size(&self, collection_id: &str) {
        let limit = self.config.max_requests_per_collection;
        if let Ok(count) = self.store.request_count(collection_id) {
            if count > limit {
                warn!(
                    "collection {} holds {} requests (limit {})",
                    collection_id, count, limit
                );
            }
        }
    }
}

fn collect_strings<'a>(value: &'a Value, out: &mut Vec<&'a str>) {
    match value {
        Value::String(s) => out.push(s),
        Value::Array(items) => items.iter().for_each(|v| collect_strings(v, out)),
        Value::Object(map) => map.values().for_each(|v| collect_strings(v, out)),
        _ => {}
    }
}
