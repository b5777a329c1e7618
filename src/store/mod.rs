//! Entity store for collections, their requests, and environments.
//!
//! The [`WorkspaceStore`] trait is the synchronous CRUD contract every store
//! fulfils. [`MemoryStore`] is the in-process implementation; a durable store
//! or a test double can stand in for it anywhere a `dyn WorkspaceStore` is
//! accepted.
//!
//! # Identity
//!
//! Collections and requests receive store-generated identifiers when created
//! without one. Environments have no identifier: their name is the key, and
//! creating an environment with an existing name replaces it.

pub mod error;
pub mod memory;

pub use error::{EntityKind, StoreError, StoreResult};
pub use memory::MemoryStore;

use crate::models::{Collection, Environment, Request};

/// Synchronous CRUD contract over the workspace entities.
///
/// Reads return owned copies; callers never hold references into the store.
/// Each call is atomic: it either applies completely or returns an error and
/// leaves the store untouched.
pub trait WorkspaceStore: Send + Sync {
    /// Inserts a collection, assigning an identifier if it has none.
    fn create_collection(&self, collection: Collection) -> StoreResult<Collection>;
    /// Fetches a collection with its full request sequence.
    ///
    /// # Errors
    ///
    /// `NotFound(collection, id)` if no collection has this id.
    fn get_collection(&self, id: &str) -> StoreResult<Collection>;
    /// Lists all collections. Order is unspecified.
    fn list_collections(&self) -> StoreResult<Vec<Collection>>;
    /// Replaces the stored collection with the same id, every field included.
    ///
    /// Request ids in the replacement that are empty or repeated are
    /// reassigned, so ids stay unique within the collection.
    fn update_collection(&self, collection: Collection) -> StoreResult<Collection>;
    /// Removes a collection together with all of its requests.
    fn delete_collection(&self, id: &str) -> StoreResult<()>;

    /// Appends a request to a collection, assigning an identifier if it has none.
    fn create_request(&self, collection_id: &str, request: Request) -> StoreResult<Request>;
    /// Fetches one request of a collection.
    ///
    /// # Arguments
    ///
    /// * `collection_id` - The parent collection
    /// * `request_id` - The request within that collection
    ///
    /// # Errors
    ///
    /// `NotFound(collection, ..)` if the collection is missing, otherwise
    /// `NotFound(request, ..)` if it holds no such request.
    fn get_request(&self, collection_id: &str, request_id: &str) -> StoreResult<Request>;
    /// Replaces a request in place, keeping its position in the collection.
    fn update_request(&self, collection_id: &str, request: Request) -> StoreResult<Request>;
    /// Removes a request, keeping the relative order of the others.
    fn delete_request(&self, collection_id: &str, request_id: &str) -> StoreResult<()>;
    /// Reads, edits and writes back a request as one atomic step.
    ///
    /// `edit` runs while the store is locked, so no other write can land
    /// between the read and the write. The request keeps its id whatever
    /// `edit` does.
    ///
    /// # Returns
    ///
    /// The request as stored after the edit.
    fn modify_request(
        &self,
        collection_id: &str,
        request_id: &str,
        edit: &mut dyn FnMut(&mut Request),
    ) -> StoreResult<Request>;
    /// Number of requests in a collection, without copying them.
    fn request_count(&self, collection_id: &str) -> StoreResult<usize>;

    /// Inserts an environment, replacing any environment with the same name.
    fn create_environment(&self, environment: Environment) -> StoreResult<Environment>;
    /// Fetches an environment by name.
    fn get_environment(&self, name: &str) -> StoreResult<Environment>;
    /// Lists all environments. Order is unspecified.
    fn list_environments(&self) -> StoreResult<Vec<Environment>>;
    /// Replaces the variables of an existing environment.
    ///
    /// Unlike [`Self::create_environment`] this never inserts: an unknown
    /// name is `NotFound(environment, name)`.
    fn update_environment(&self, environment: Environment) -> StoreResult<Environment>;
    /// Removes an environment by name.
    fn delete_environment(&self, name: &str) -> StoreResult<()>;
}
