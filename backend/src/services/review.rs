//! Review service
//!
//! Records recall answers on review items and lists what is due. The item's
//! algorithm decides between the fixed one-week interval and SM-2.

use crate::error::{ServiceError, ServiceResult};
use crate::state::AppState;
use chrono::{DateTime, Duration, NaiveDate, Utc};
use study_planner_shared::{
    ReviewAlgorithm, ReviewAnswerRequest, ReviewItem, ReviewQuality, ReviewScheduler,
};
use tracing::info;
use uuid::Uuid;
use validator::Validate;

/// Review service for business logic
pub struct ReviewService;

impl ReviewService {
    fn scheduler(state: &AppState) -> ReviewScheduler {
        ReviewScheduler::new(state.config.review)
    }

    /// Queue material studied at `studied_at` for review
    ///
    /// Legacy items come back after the fixed interval, SM-2 items the
    /// next day.
    pub async fn add_item(
        state: &AppState,
        user_id: Uuid,
        plan_id: Uuid,
        content: String,
        algorithm: ReviewAlgorithm,
        studied_at: DateTime<Utc>,
    ) -> ServiceResult<ReviewItem> {
        let plan = state.plans.get(plan_id).await?;
        if plan.user_id != user_id {
            return Err(ServiceError::NotFound(format!("plan {} not found", plan_id)));
        }

        let first_review = match algorithm {
            ReviewAlgorithm::Legacy => Self::scheduler(state).schedule_legacy_review(studied_at),
            ReviewAlgorithm::Sm2 => studied_at + Duration::days(1),
        };
        let item = ReviewItem::new(user_id, plan_id, content, algorithm, first_review, studied_at);
        let item = state.review_items.create(item).await?;
        info!(item_id = %item.id, plan_id = %plan_id, next_review = %item.next_review_date, "Queued review item");
        Ok(item)
    }

    /// Apply a recall score and persist the rescheduled item
    pub async fn record_answer(
        state: &AppState,
        input: ReviewAnswerRequest,
        now: DateTime<Utc>,
    ) -> ServiceResult<ReviewItem> {
        input.validate()?;
        let quality = ReviewQuality::new(input.quality)?;
        let item = state
            .review_items
            .find_by_id(input.item_id)
            .await?
            .ok_or_else(|| ServiceError::NotFound(format!("review item {} not found", input.item_id)))?;

        let reviewed = Self::scheduler(state).schedule(&item, quality, now);
        let stored = state.review_items.update(reviewed).await?;
        info!(
            item_id = %stored.id,
            quality = quality.value(),
            interval_days = stored.interval_days,
            next_review = %stored.next_review_date,
            "Recorded review answer"
        );
        Ok(stored)
    }

    pub async fn due_today(state: &AppState, user_id: Uuid, today: NaiveDate) -> ServiceResult<Vec<ReviewItem>> {
        Ok(state.review_items.find_due_today(user_id, today).await?)
    }
}
