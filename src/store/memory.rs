//! In-memory store.
//!
//! All state (collections, environments and the identifier counter) lives
//! behind one readers-writer lock. Reads share the lock; every mutation takes
//! it exclusively for the whole operation, nested request edits included, so
//! no caller can observe a half-applied change.

use super::error::{EntityKind, StoreError, StoreResult};
use super::WorkspaceStore;
use crate::models::{Collection, Environment, Request};
use log::{debug, warn};
use parking_lot::RwLock;
use std::collections::{HashMap, HashSet};

#[derive(Debug, Default)]
struct StoreState {
    collections: HashMap<String, Collection>,
    environments: HashMap<String, Environment>,
    /// Last identifier handed out. Shared by collections and requests.
    next_id: u64,
}

/// Process-lifetime store. Nothing survives a restart.
#[derive(Debug, Default)]
pub struct MemoryStore {
    state: RwLock<StoreState>,
}

/// Draws decimal identifiers from `counter` until `is_free` accepts one.
fn allocate_id(counter: &mut u64, is_free: impl Fn(&str) -> bool) -> String {
    loop {
        *counter += 1;
        let id = counter.to_string();
        if is_free(&id) {
            return id;
        }
    }
}

/// Gives every request in `requests` a non-empty id unique within the list.
///
/// The first holder of an id keeps it; empty ids and later duplicates are
/// drawn from `counter`.
fn dedupe_request_ids(collection_id: &str, requests: &mut [Request], counter: &mut u64) {
    let mut taken: HashSet<String> = requests
        .iter()
        .filter(|r| !r.id.is_empty())
        .map(|r| r.id.clone())
        .collect();
    let mut seen: HashSet<String> = HashSet::new();

    for request in requests.iter_mut() {
        if !request.id.is_empty() && seen.insert(request.id.clone()) {
            continue;
        }
        let fresh = allocate_id(counter, |id| !taken.contains(id));
        warn!(
            "request id {:?} in collection {} is empty or repeated, assigning {}",
            request.id, collection_id, fresh
        );
        taken.insert(fresh.clone());
        seen.insert(fresh.clone());
        request.id = fresh;
    }
}

impl MemoryStore {
    /// Creates an empty store whose first generated id is `"1"`.
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stored collections.
    pub fn collection_count(&self) -> usize {
        self.state.read().collections.len()
    }

    /// Number of stored environments.
    pub fn environment_count(&self) -> usize {
        self.state.read().environments.len()
    }
}

impl WorkspaceStore for MemoryStore {
    fn create_collection(&self, mut collection: Collection) -> StoreResult<Collection> {
        let mut state = self.state.write();
        let StoreState {
            collections,
            next_id,
            ..
        } = &mut *state;

        if collection.id.is_empty() || collections.contains_key(&collection.id) {
            if !collection.id.is_empty() {
                warn!(
                    "collection id {} already taken, assigning a new one",
                    collection.id
                );
            }
            collection.id = allocate_id(next_id, |id| !collections.contains_key(id));
        }

        debug!("created collection {}", collection.id);
        collections.insert(collection.id.clone(), collection.clone());
        Ok(collection)
    }

    fn get_collection(&self, id: &str) -> StoreResult<Collection> {
        self.state
            .read()
            .collections
            .get(id)
            .cloned()
            .ok_or_else(|| StoreError::not_found(EntityKind::Collection, id))
    }

    fn list_collections(&self) -> StoreResult<Vec<Collection>> {
        Ok(self.state.read().collections.values().cloned().collect())
    }

    fn update_collection(&self, mut collection: Collection) -> StoreResult<Collection> {
        let mut state = self.state.write();
        let StoreState {
            collections,
            next_id,
            ..
        } = &mut *state;
        let Some(stored) = collections.get_mut(&collection.id) else {
            warn!("update of unknown collection {}", collection.id);
            return Err(StoreError::not_found(EntityKind::Collection, collection.id));
        };

        dedupe_request_ids(&collection.id, &mut collection.requests, next_id);
        *stored = collection.clone();
        debug!("updated collection {}", collection.id);
        Ok(collection)
    }

    fn delete_collection(&self, id: &str) -> StoreResult<()> {
        match self.state.write().collections.remove(id) {
            Some(removed) => {
                debug!(
                    "deleted collection {} with {} requests",
                    id,
                    removed.requests.len()
                );
                Ok(())
            }
            None => {
                warn!("delete of unknown collection {}", id);
                Err(StoreError::not_found(EntityKind::Collection, id))
            }
        }
    }

    fn create_request(&self, collection_id: &str, mut request: Request) -> StoreResult<Request> {
        let mut state = self.state.write();
        let StoreState {
            collections,
            next_id,
            ..
        } = &mut *state;

        let Some(collection) = collections.get_mut(collection_id) else {
            warn!("request created in unknown collection {}", collection_id);
            return Err(StoreError::not_found(EntityKind::Collection, collection_id));
        };

        if request.id.is_empty() || collection.request_position(&request.id).is_some() {
            if !request.id.is_empty() {
                warn!(
                    "request id {} already taken in collection {}, assigning a new one",
                    request.id, collection_id
                );
            }
            request.id = allocate_id(next_id, |id| collection.request_position(id).is_none());
        }

        debug!("created request {} in collection {}", request.id, collection_id);
        collection.requests.push(request.clone());
        Ok(request)
    }

    fn get_request(&self, collection_id: &str, request_id: &str) -> StoreResult<Request> {
        let state = self.state.read();
        let collection = state
            .collections
            .get(collection_id)
            .ok_or_else(|| StoreError::not_found(EntityKind::Collection, collection_id))?;

        collection
            .find_request(request_id)
            .cloned()
            .ok_or_else(|| StoreError::not_found(EntityKind::Request, request_id))
    }

    fn update_request(&self, collection_id: &str, request: Request) -> StoreResult<Request> {
        let mut state = self.state.write();
        let Some(collection) = state.collections.get_mut(collection_id) else {
            warn!("request updated in unknown collection {}", collection_id);
            return Err(StoreError::not_found(EntityKind::Collection, collection_id));
        };
        let Some(index) = collection.request_position(&request.id) else {
            warn!(
                "update of unknown request {} in collection {}",
                request.id, collection_id
            );
            return Err(StoreError::not_found(EntityKind::Request, request.id));
        };

        collection.requests[index] = request.clone();
        debug!("updated request {} in collection {}", request.id, collection_id);
        Ok(request)
    }

    fn delete_request(&self, collection_id: &str, request_id: &str) -> StoreResult<()> {
        let mut state = self.state.write();
        let Some(collection) = state.collections.get_mut(collection_id) else {
            warn!("request deleted from unknown collection {}", collection_id);
            return Err(StoreError::not_found(EntityKind::Collection, collection_id));
        };
        let Some(index) = collection.request_position(request_id) else {
            warn!(
                "delete of unknown request {} in collection {}",
                request_id, collection_id
            );
            return Err(StoreError::not_found(EntityKind::Request, request_id));
        };

        // Vec::remove shifts the tail left, keeping relative order
        collection.requests.remove(index);
        debug!("deleted request {} from collection {}", request_id, collection_id);
        Ok(())
    }

    fn modify_request(
        &self,
        collection_id: &str,
        request_id: &str,
        edit: &mut dyn FnMut(&mut Request),
    ) -> StoreResult<Request> {
        let mut state = self.state.write();
        let Some(collection) = state.collections.get_mut(collection_id) else {
            warn!("request modified in unknown collection {}", collection_id);
            return Err(StoreError::not_found(EntityKind::Collection, collection_id));
        };
        let Some(index) = collection.request_position(request_id) else {
            warn!(
                "modify of unknown request {} in collection {}",
                request_id, collection_id
            );
            return Err(StoreError::not_found(EntityKind::Request, request_id));
        };

        let request = &mut collection.requests[index];
        edit(request);
        request.id = request_id.to_string();
        debug!("modified request {} in collection {}", request_id, collection_id);
        Ok(request.clone())
    }

    fn request_count(&self, collection_id: &str) -> StoreResult<usize> {
        self.state
            .read()
            .collections
            .get(collection_id)
            .map(|c| c.requests.len())
            .ok_or_else(|| StoreError::not_found(EntityKind::Collection, collection_id))
    }

    fn create_environment(&self, environment: Environment) -> StoreResult<Environment> {
        let previous = self
            .state
            .write()
            .environments
            .insert(environment.name.clone(), environment.clone());

        if previous.is_some() {
            debug!("replaced environment {}", environment.name);
        } else {
            debug!("created environment {}", environment.name);
        }
        Ok(environment)
    }

    fn get_environment(&self, name: &str) -> StoreResult<Environment> {
        self.state
            .read()
            .environments
            .get(name)
            .cloned()
            .ok_or_else(|| StoreError::not_found(EntityKind::Environment, name))
    }

    fn list_environments(&self) -> StoreResult<Vec<Environment>> {
        Ok(self.state.read().environments.values().cloned().collect())
    }

    fn update_environment(&self, environment: Environment) -> StoreResult<Environment> {
        let mut state = self.state.write();
        let Some(stored) = state.environments.get_mut(&environment.name) else {
            warn!("update of unknown environment {}", environment.name);
            return Err(StoreError::not_found(
                EntityKind::Environment,
                environment.name,
            ));
        };

        *stored = environment.clone();
        debug!("updated environment {}", environment.name);
        Ok(environment)
    }

    fn delete_environment(&self, name: &str) -> StoreResult<()> {
        if self.state.write().environments.remove(name).is_none() {
            warn!("delete of unknown environment {}", name);
            return Err(StoreError::not_found(EntityKind::Environment, name));
        }
        debug!("deleted environment {}", name);
        Ok(())
    }
}
