//! Review item repository

use super::memory::InMemoryStore;
use super::RepositoryResult;
use async_trait::async_trait;
use chrono::NaiveDate;
use study_planner_shared::ReviewItem;
use uuid::Uuid;

#[async_trait]
pub trait ReviewItemRepository: Send + Sync {
    async fn create(&self, item: ReviewItem) -> RepositoryResult<ReviewItem>;

    async fn update(&self, item: ReviewItem) -> RepositoryResult<ReviewItem>;

    async fn find_by_id(&self, id: Uuid) -> RepositoryResult<Option<ReviewItem>>;

    /// Items whose next review falls on or before the end of `today`,
    /// earliest first
    async fn find_due_today(&self, user_id: Uuid, today: NaiveDate) -> RepositoryResult<Vec<ReviewItem>>;

    async fn find_by_plan_id(&self, plan_id: Uuid) -> RepositoryResult<Vec<ReviewItem>>;

    async fn delete(&self, id: Uuid) -> RepositoryResult<()>;
}

#[derive(Default)]
pub struct InMemoryReviewItemRepository {
    store: InMemoryStore<ReviewItem>,
}

impl InMemoryReviewItemRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

fn earliest_first(mut items: Vec<ReviewItem>) -> Vec<ReviewItem> {
    items.sort_by(|a, b| {
        a.next_review_date
            .cmp(&b.next_review_date)
            .then(a.id.cmp(&b.id))
    });
    items
}

#[async_trait]
impl ReviewItemRepository for InMemoryReviewItemRepository {
    async fn create(&self, item: ReviewItem) -> RepositoryResult<ReviewItem> {
        Ok(self.store.insert(item).await)
    }

    async fn update(&self, item: ReviewItem) -> RepositoryResult<ReviewItem> {
        self.store.update(item).await
    }

    async fn find_by_id(&self, id: Uuid) -> RepositoryResult<Option<ReviewItem>> {
        Ok(self.store.get(id).await)
    }

    async fn find_due_today(&self, user_id: Uuid, today: NaiveDate) -> RepositoryResult<Vec<ReviewItem>> {
        let due = self
            .store
            .filter(|item| item.user_id == user_id && item.is_due(today))
            .await;
        Ok(earliest_first(due))
    }

    async fn find_by_plan_id(&self, plan_id: Uuid) -> RepositoryResult<Vec<ReviewItem>> {
        Ok(earliest_first(self.store.filter(|item| item.plan_id == plan_id).await))
    }

    async fn delete(&self, id: Uuid) -> RepositoryResult<()> {
        self.store.remove(id).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, TimeZone, Utc};
    use study_planner_shared::ReviewAlgorithm;

    #[tokio::test]
    async fn test_due_today_includes_later_today() {
        let repo = InMemoryReviewItemRepository::new();
        let user = Uuid::new_v4();
        let morning = Utc.with_ymd_and_hms(2024, 3, 10, 6, 0, 0).unwrap();
        let today = morning.date_naive();

        for offset in [Duration::hours(17), Duration::days(-2), Duration::days(1)] {
            let item = ReviewItem::new(
                user,
                Uuid::new_v4(),
                "deck".to_string(),
                ReviewAlgorithm::Sm2,
                morning + offset,
                morning,
            );
            repo.create(item).await.unwrap();
        }

        let due = repo.find_due_today(user, today).await.unwrap();
        assert_eq!(due.len(), 2);
        assert!(due[0].next_review_date < due[1].next_review_date);
        assert!(repo.find_due_today(Uuid::new_v4(), today).await.unwrap().is_empty());
    }
}
