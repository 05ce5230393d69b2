//! Study session repository
//!
//! Date filters work on calendar days: a range covers every session from
//! the start of `start` to the end of `end`.

use super::memory::InMemoryStore;
use super::RepositoryResult;
use async_trait::async_trait;
use chrono::NaiveDate;
use study_planner_shared::StudySession;
use tracing::debug;
use uuid::Uuid;

#[async_trait]
pub trait SessionRepository: Send + Sync {
    async fn create(&self, session: StudySession) -> RepositoryResult<StudySession>;

    /// Fails with `NotFound` for an unknown id and `Conflict` for a stale version
    async fn update(&self, session: StudySession) -> RepositoryResult<StudySession>;

    async fn find_by_id(&self, id: Uuid) -> RepositoryResult<Option<StudySession>>;

    /// The plan's sessions sorted by date
    async fn find_by_plan_id(&self, plan_id: Uuid) -> RepositoryResult<Vec<StudySession>>;

    /// The user's sessions with `start <= day <= end`, sorted by date
    async fn find_by_user_id_and_date_range(
        &self,
        user_id: Uuid,
        start: NaiveDate,
        end: NaiveDate,
    ) -> RepositoryResult<Vec<StudySession>>;

    async fn delete(&self, id: Uuid) -> RepositoryResult<()>;
}

#[derive(Default)]
pub struct InMemorySessionRepository {
    store: InMemoryStore<StudySession>,
}

impl InMemorySessionRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

fn by_date(mut sessions: Vec<StudySession>) -> Vec<StudySession> {
    sessions.sort_by(|a, b| a.date.cmp(&b.date).then(a.id.cmp(&b.id)));
    sessions
}

#[async_trait]
impl SessionRepository for InMemorySessionRepository {
    async fn create(&self, session: StudySession) -> RepositoryResult<StudySession> {
        debug!(session_id = %session.id, plan_id = %session.plan_id, "Storing session");
        Ok(self.store.insert(session).await)
    }

    async fn update(&self, session: StudySession) -> RepositoryResult<StudySession> {
        self.store.update(session).await
    }

    async fn find_by_id(&self, id: Uuid) -> RepositoryResult<Option<StudySession>> {
        Ok(self.store.get(id).await)
    }

    async fn find_by_plan_id(&self, plan_id: Uuid) -> RepositoryResult<Vec<StudySession>> {
        Ok(by_date(self.store.filter(|s| s.plan_id == plan_id).await))
    }

    async fn find_by_user_id_and_date_range(
        &self,
        user_id: Uuid,
        start: NaiveDate,
        end: NaiveDate,
    ) -> RepositoryResult<Vec<StudySession>> {
        let sessions = self
            .store
            .filter(|s| s.user_id == user_id && s.day() >= start && s.day() <= end)
            .await;
        Ok(by_date(sessions))
    }

    async fn delete(&self, id: Uuid) -> RepositoryResult<()> {
        self.store.remove(id).await
    }
}
