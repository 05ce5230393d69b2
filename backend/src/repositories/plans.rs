//! Plan repository

use super::memory::InMemoryStore;
use super::{RepositoryError, RepositoryResult};
use async_trait::async_trait;
use study_planner_shared::StudyPlan;
use tracing::debug;
use uuid::Uuid;

#[async_trait]
pub trait PlanRepository: Send + Sync {
    async fn create(&self, plan: StudyPlan) -> RepositoryResult<StudyPlan>;

    /// Fails with `Conflict` when `plan.version` is stale
    async fn update(&self, plan: StudyPlan) -> RepositoryResult<StudyPlan>;

    async fn find_by_id(&self, id: Uuid) -> RepositoryResult<Option<StudyPlan>>;

    /// The user's plans, oldest first
    async fn find_by_user_id(&self, user_id: Uuid) -> RepositoryResult<Vec<StudyPlan>>;

    /// Every stored plan, oldest first
    async fn find_all(&self) -> RepositoryResult<Vec<StudyPlan>>;

    async fn delete(&self, id: Uuid) -> RepositoryResult<()>;

    /// Like `find_by_id` but a missing plan is an error
    async fn get(&self, id: Uuid) -> RepositoryResult<StudyPlan> {
        self.find_by_id(id)
            .await?
            .ok_or(RepositoryError::NotFound { entity: "plan", id })
    }
}

#[derive(Default)]
pub struct InMemoryPlanRepository {
    store: InMemoryStore<StudyPlan>,
}

impl InMemoryPlanRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

fn oldest_first(mut plans: Vec<StudyPlan>) -> Vec<StudyPlan> {
    plans.sort_by(|a, b| a.created_at.cmp(&b.created_at).then(a.id.cmp(&b.id)));
    plans
}

#[async_trait]
impl PlanRepository for InMemoryPlanRepository {
    async fn create(&self, plan: StudyPlan) -> RepositoryResult<StudyPlan> {
        debug!(plan_id = %plan.id, "Storing plan");
        Ok(self.store.insert(plan).await)
    }

    async fn update(&self, plan: StudyPlan) -> RepositoryResult<StudyPlan> {
        self.store.update(plan).await
    }

    async fn find_by_id(&self, id: Uuid) -> RepositoryResult<Option<StudyPlan>> {
        Ok(self.store.get(id).await)
    }

    async fn find_by_user_id(&self, user_id: Uuid) -> RepositoryResult<Vec<StudyPlan>> {
        Ok(oldest_first(self.store.filter(|p| p.user_id == user_id).await))
    }

    async fn find_all(&self) -> RepositoryResult<Vec<StudyPlan>> {
        Ok(oldest_first(self.store.filter(|_| true).await))
    }

    async fn delete(&self, id: Uuid) -> RepositoryResult<()> {
        self.store.remove(id).await
    }
}
