//! Versioned in-memory storage shared by the repository implementations

use super::{RepositoryError, RepositoryResult};
use std::collections::HashMap;
use study_planner_shared::{ReviewItem, StudyPlan, StudySession};
use tokio::sync::RwLock;
use tracing::warn;
use uuid::Uuid;

/// An entity with an id and an optimistic-lock version
pub trait Versioned: Clone + Send + Sync {
    const ENTITY: &'static str;

    fn id(&self) -> Uuid;
    fn version(&self) -> u64;
    fn set_version(&mut self, version: u64);
}

impl Versioned for StudyPlan {
    const ENTITY: &'static str = "plan";

    fn id(&self) -> Uuid {
        self.id
    }
    fn version(&self) -> u64 {
        self.version
    }
    fn set_version(&mut self, version: u64) {
        self.version = version;
    }
}

impl Versioned for StudySession {
    const ENTITY: &'static str = "session";

    fn id(&self) -> Uuid {
        self.id
    }
    fn version(&self) -> u64 {
        self.version
    }
    fn set_version(&mut self, version: u64) {
        self.version = version;
    }
}

impl Versioned for ReviewItem {
    const ENTITY: &'static str = "review item";

    fn id(&self) -> Uuid {
        self.id
    }
    fn version(&self) -> u64 {
        self.version
    }
    fn set_version(&mut self, version: u64) {
        self.version = version;
    }
}

/// Map of entities keyed by id behind an async lock
pub struct InMemoryStore<T: Versioned> {
    items: RwLock<HashMap<Uuid, T>>,
}

impl<T: Versioned> Default for InMemoryStore<T> {
    fn default() -> Self {
        Self {
            items: RwLock::new(HashMap::new()),
        }
    }
}

impl<T: Versioned> InMemoryStore<T> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Store a new entity, replacing any with the same id
    pub async fn insert(&self, item: T) -> T {
        self.items.write().await.insert(item.id(), item.clone());
        item
    }

    /// Replace a stored entity when the caller's version matches
    pub async fn update(&self, mut item: T) -> RepositoryResult<T> {
        let mut items = self.items.write().await;
        let stored = items.get(&item.id()).ok_or(RepositoryError::NotFound {
            entity: T::ENTITY,
            id: item.id(),
        })?;

        if stored.version() != item.version() {
            warn!(
                entity = T::ENTITY,
                id = %item.id(),
                expected = item.version(),
                found = stored.version(),
                "Rejected stale update"
            );
            return Err(RepositoryError::Conflict {
                entity: T::ENTITY,
                id: item.id(),
                expected: item.version(),
                found: stored.version(),
            });
        }

        item.set_version(stored.version() + 1);
        items.insert(item.id(), item.clone());
        Ok(item)
    }

    pub async fn get(&self, id: Uuid) -> Option<T> {
        self.items.read().await.get(&id).cloned()
    }

    pub async fn remove(&self, id: Uuid) -> RepositoryResult<()> {
        self.items
            .write()
            .await
            .remove(&id)
            .map(|_| ())
            .ok_or(RepositoryError::NotFound {
                entity: T::ENTITY,
                id,
            })
    }

    /// Every entity matching `predicate`, in no particular order
    pub async fn filter<F>(&self, predicate: F) -> Vec<T>
    where
        F: Fn(&T) -> bool,
    {
        self.items
            .read()
            .await
            .values()
            .filter(|item| predicate(item))
            .cloned()
            .collect()
    }
}
