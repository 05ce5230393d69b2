//! Storage repositories
//!
//! Each entity has an `async_trait` repository so storage can be swapped
//! without touching the services. The in-memory implementations back the
//! `study-planner` binary and the tests.
//!
//! Every stored entity carries a version. `update` succeeds only when the
//! caller's copy has the stored version, and bumps it on success.

pub mod memory;
pub mod plans;
pub mod review_items;
pub mod sessions;

use thiserror::Error;
use uuid::Uuid;

pub use plans::{InMemoryPlanRepository, PlanRepository};
pub use review_items::{InMemoryReviewItemRepository, ReviewItemRepository};
pub use sessions::{InMemorySessionRepository, SessionRepository};

/// Error returned by repository operations
#[derive(Debug, Error)]
pub enum RepositoryError {
    #[error("{entity} {id} not found")]
    NotFound { entity: &'static str, id: Uuid },

    #[error("{entity} {id} was modified concurrently (expected version {expected}, found {found})")]
    Conflict {
        entity: &'static str,
        id: Uuid,
        expected: u64,
        found: u64,
    },

    #[error("Storage error: {0}")]
    Storage(#[from] anyhow::Error),
}

/// Result type alias for repository operations
pub type RepositoryResult<T> = Result<T, RepositoryError>;
