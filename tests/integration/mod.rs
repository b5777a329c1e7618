//! Integration tests module for the workspace
//!
//! Shared setup for the integration tests.

pub mod concurrency_test;
pub mod workspace_flow_test;

use api_workspace::{MemoryStore, WorkspaceConfig, WorkspaceService};
use std::sync::{Arc, Once};

static INIT: Once = Once::new();

/// Initialize test environment (run once)
pub fn init_test_env() {
    INIT.call_once(|| {
        let _ = env_logger::builder().is_test(true).try_init();
    });
}

/// A service over a fresh store with default configuration.
pub fn fresh_service() -> WorkspaceService {
    init_test_env();
    WorkspaceService::with_config(Arc::new(MemoryStore::new()), WorkspaceConfig::default())
}
