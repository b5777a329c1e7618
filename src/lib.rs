//! API Workspace
//!
//! An in-memory workspace of API request definitions: named collections of
//! HTTP request templates, reusable environments of variables, and the
//! interpolation engine that turns templates into concrete requests.
//!
//! # Architecture
//!
//! The crate is organized into several modules:
//!
//! - **models**: Collections, request templates, environments and cached responses
//! - **variables**: Pure `{{variable}}` interpolation, merging and validation
//! - **store**: The synchronous CRUD contract and its in-memory implementation
//! - **service**: Defaults, timestamps and partial updates on top of a store
//! - **config**: Workspace configuration loading and the global settings singleton
//!
//! Sending requests over the network, encoding protocol messages and
//! presenting results are left to the caller.
//!
//! # Usage
//!
//! ```
//! use api_workspace::models::{Environment, HttpMethod};
//! use api_workspace::service::{NewCollection, NewRequest, WorkspaceService};
//! use api_workspace::store::MemoryStore;
//! use std::sync::Arc;
//!
//! let service = WorkspaceService::new(Arc::new(MemoryStore::new()));
//!
//! let collection = service.create_collection(NewCollection::new("C")).unwrap();
//! let request = service
//!     .create_request(&collection.id, NewRequest::new("R", HttpMethod::GET, "{{base_url}}/x"))
//!     .unwrap();
//!
//! let mut local = Environment::new("local");
//! local.set("base_url", "http://localhost:8080");
//! service.create_environment(local).unwrap();
//!
//! let resolved = service
//!     .resolve_request(&collection.id, &request.id, Some("local"))
//!     .unwrap();
//! assert_eq!(resolved.url, "http://localhost:8080/x");
//! ```

pub mod config;
pub mod models;
pub mod service;
pub mod store;
pub mod variables;

pub use config::{ConfigError, WorkspaceConfig};
pub use models::{BodyField, CachedResponse, Collection, Environment, Header, HttpMethod, Request};
pub use service::{NewCollection, NewRequest, RequestUpdate, WorkspaceService};
pub use store::{EntityKind, MemoryStore, StoreError, StoreResult, WorkspaceStore};
