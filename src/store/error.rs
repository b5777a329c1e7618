//! Store error types.

use std::fmt;

/// The kind of entity a lookup targeted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EntityKind {
    Collection,
    Request,
    Environment,
}

impl EntityKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            EntityKind::Collection => "collection",
            EntityKind::Request => "request",
            EntityKind::Environment => "environment",
        }
    }
}

impl fmt::Display for EntityKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Errors returned by a [`super::WorkspaceStore`].
///
/// Every operation either fully applies or returns one of these with no
/// effect on the store.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum StoreError {
    /// No entity of `kind` exists under `id`.
    ///
    /// For environments `id` is the environment name.
    #[error("{kind} not found: {id}")]
    NotFound { kind: EntityKind, id: String },
}

impl StoreError {
    pub fn not_found(kind: EntityKind, id: impl Into<String>) -> Self {
        StoreError::NotFound {
            kind,
            id: id.into(),
        }
    }

    pub fn kind(&self) -> EntityKind {
        match self {
            StoreError::NotFound { kind, .. } => *kind,
        }
    }

    pub fn id(&self) -> &str {
        match self {
            StoreError::NotFound { id, .. } => id,
        }
    }

    pub fn is_not_found(&self) -> bool {
        matches!(self, StoreError::NotFound { .. })
    }
}

pub type StoreResult<T> = Result<T, StoreError>;
