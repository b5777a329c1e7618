//! Data models for the workspace.
//!
//! This module contains the entities held by the store: collections, the
//! request templates they own, environments, and cached responses.

pub mod collection;
pub mod environment;
pub mod request;
pub mod response;

pub use collection::Collection;
pub use environment::Environment;
pub use request::{BodyField, Header, HttpMethod, Request};
pub use response::CachedResponse;
