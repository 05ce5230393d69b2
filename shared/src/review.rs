//! Review scheduling
//!
//! Items created before spaced repetition was introduced keep a fixed
//! one-week interval. Newer items carry SM-2 state and compute their own
//! next review date; the scheduler only picks the path.

use crate::errors::{DomainError, DomainResult};
use crate::validation::{on_field, validate_review_quality};
use chrono::{DateTime, Duration, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Lowest ease factor SM-2 allows
pub const MIN_EASE_FACTOR: f64 = 1.3;

/// Ease factor of a fresh item
pub const INITIAL_EASE_FACTOR: f64 = 2.5;

/// Review tuning
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ReviewConfig {
    /// Fixed interval of the legacy path (default 7)
    pub legacy_interval_days: i64,
}

impl Default for ReviewConfig {
    fn default() -> Self {
        Self {
            legacy_interval_days: 7,
        }
    }
}

/// Which scheduling path an item follows
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum ReviewAlgorithm {
    Legacy,
    #[default]
    Sm2,
}

/// Recall score, 0 (blackout) - 5 (perfect)
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "u8")]
pub struct ReviewQuality(u8);

impl TryFrom<u8> for ReviewQuality {
    type Error = DomainError;

    fn try_from(value: u8) -> DomainResult<Self> {
        Self::new(value)
    }
}

impl ReviewQuality {
    pub fn new(value: u8) -> DomainResult<Self> {
        on_field("quality", validate_review_quality(value))?;
        Ok(Self(value))
    }

    pub fn value(&self) -> u8 {
        self.0
    }

    /// Scores below 3 count as a failed recall
    pub fn is_pass(&self) -> bool {
        self.0 >= 3
    }
}

/// A state transition driven by a recall score
pub trait SpacedRepetition: Sized {
    fn apply_review(&self, quality: ReviewQuality, now: DateTime<Utc>) -> Self;
}

/// A unit span queued for review
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ReviewItem {
    pub id: Uuid,
    pub user_id: Uuid,
    pub plan_id: Uuid,
    pub content: String,
    #[serde(default)]
    pub algorithm: ReviewAlgorithm,
    pub ease_factor: f64,
    pub interval_days: i64,
    pub repetitions: u32,
    pub next_review_date: DateTime<Utc>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_reviewed_at: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
    #[serde(default)]
    pub version: u64,
}

impl ReviewItem {
    pub fn new(
        user_id: Uuid,
        plan_id: Uuid,
        content: String,
        algorithm: ReviewAlgorithm,
        first_review: DateTime<Utc>,
        now: DateTime<Utc>,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            user_id,
            plan_id,
            content,
            algorithm,
            ease_factor: INITIAL_EASE_FACTOR,
            interval_days: 0,
            repetitions: 0,
            next_review_date: first_review,
            last_reviewed_at: None,
            created_at: now,
            version: 0,
        }
    }

    /// Due at any time up to the end of `today`
    pub fn is_due(&self, today: NaiveDate) -> bool {
        self.next_review_date.date_naive() <= today
    }
}

impl SpacedRepetition for ReviewItem {
    /// SM-2: EF' = EF + (0.1 - (5 - q) × (0.08 + (5 - q) × 0.02))
    fn apply_review(&self, quality: ReviewQuality, now: DateTime<Utc>) -> Self {
        let q = quality.value() as f64;
        let ease_delta = 0.1 - (5.0 - q) * (0.08 + (5.0 - q) * 0.02);
        let ease_factor = (self.ease_factor + ease_delta).max(MIN_EASE_FACTOR);

        let (interval_days, repetitions) = if quality.is_pass() {
            let interval = match self.repetitions {
                0 => 1,
                1 => 6,
                _ => (self.interval_days as f64 * ease_factor).round() as i64,
            };
            (interval, self.repetitions + 1)
        } else {
            (1, 0)
        };

        Self {
            ease_factor,
            interval_days,
            repetitions,
            next_review_date: now + Duration::days(interval_days),
            last_reviewed_at: Some(now),
            ..self.clone()
        }
    }
}

/// Chooses between the fixed-interval and spaced-repetition paths
#[derive(Debug, Clone, Copy, Default)]
pub struct ReviewScheduler {
    config: ReviewConfig,
}

impl ReviewScheduler {
    pub fn new(config: ReviewConfig) -> Self {
        Self { config }
    }

    /// Fixed follow-up one interval after the session
    pub fn schedule_legacy_review(&self, session_date: DateTime<Utc>) -> DateTime<Utc> {
        session_date + Duration::days(self.config.legacy_interval_days)
    }

    /// Delegate entirely to the item's own state transition
    pub fn schedule_by_spaced_repetition<T: SpacedRepetition>(
        item: &T,
        quality: ReviewQuality,
        now: DateTime<Utc>,
    ) -> T {
        item.apply_review(quality, now)
    }

    /// Record an answer on whichever path the item follows
    pub fn schedule(&self, item: &ReviewItem, quality: ReviewQuality, now: DateTime<Utc>) -> ReviewItem {
        match item.algorithm {
            ReviewAlgorithm::Legacy => ReviewItem {
                repetitions: item.repetitions + 1,
                interval_days: self.config.legacy_interval_days,
                next_review_date: self.schedule_legacy_review(now),
                last_reviewed_at: Some(now),
                ..item.clone()
            },
            ReviewAlgorithm::Sm2 => Self::schedule_by_spaced_repetition(item, quality, now),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 3, 1, 12, 0, 0).unwrap()
    }

    fn item(algorithm: ReviewAlgorithm) -> ReviewItem {
        ReviewItem::new(
            Uuid::new_v4(),
            Uuid::new_v4(),
            "Chapter 3 exercises".to_string(),
            algorithm,
            now(),
            now(),
        )
    }

    fn q(value: u8) -> ReviewQuality {
        ReviewQuality::new(value).unwrap()
    }

    #[test]
    fn test_quality_bounds() {
        assert!(ReviewQuality::new(0).is_ok());
        assert!(ReviewQuality::new(5).is_ok());
        assert!(ReviewQuality::new(6).unwrap_err().is_validation());
        assert!(q(3).is_pass());
        assert!(!q(2).is_pass());

        assert_eq!(serde_json::from_str::<ReviewQuality>("4").unwrap(), q(4));
        assert!(serde_json::from_str::<ReviewQuality>("9").is_err());
    }

    #[test]
    fn test_legacy_review_is_one_week_later() {
        let scheduler = ReviewScheduler::default();
        assert_eq!(scheduler.schedule_legacy_review(now()), now() + Duration::days(7));

        let custom = ReviewScheduler::new(ReviewConfig {
            legacy_interval_days: 3,
        });
        assert_eq!(custom.schedule_legacy_review(now()), now() + Duration::days(3));
    }

    #[test]
    fn test_sm2_interval_progression() {
        let first = item(ReviewAlgorithm::Sm2).apply_review(q(4), now());
        assert_eq!((first.interval_days, first.repetitions), (1, 1));
        assert!((first.ease_factor - 2.5).abs() < 1e-9);

        let second = first.apply_review(q(4), now());
        assert_eq!((second.interval_days, second.repetitions), (6, 2));

        let third = second.apply_review(q(4), now());
        // 6 * 2.5 = 15
        assert_eq!(third.interval_days, 15);
        assert_eq!(third.next_review_date, now() + Duration::days(15));
        assert_eq!(third.last_reviewed_at, Some(now()));
    }

    #[test]
    fn test_sm2_failure_resets() {
        let mut reviewed = item(ReviewAlgorithm::Sm2);
        for _ in 0..3 {
            reviewed = reviewed.apply_review(q(5), now());
        }
        let failed = reviewed.apply_review(q(1), now());
        assert_eq!((failed.interval_days, failed.repetitions), (1, 0));
        assert!(failed.ease_factor < reviewed.ease_factor);
    }

    #[test]
    fn test_sm2_ease_floor() {
        let mut reviewed = item(ReviewAlgorithm::Sm2);
        for _ in 0..10 {
            reviewed = reviewed.apply_review(q(0), now());
        }
        assert!((reviewed.ease_factor - MIN_EASE_FACTOR).abs() < 1e-9);
    }

    #[test]
    fn test_scheduler_dispatches_on_algorithm() {
        let scheduler = ReviewScheduler::default();

        let legacy = scheduler.schedule(&item(ReviewAlgorithm::Legacy), q(1), now());
        assert_eq!(legacy.next_review_date, now() + Duration::days(7));
        assert_eq!(legacy.ease_factor, INITIAL_EASE_FACTOR);

        let modern = scheduler.schedule(&item(ReviewAlgorithm::Sm2), q(1), now());
        assert_eq!(modern.next_review_date, now() + Duration::days(1));
        assert!(modern.ease_factor < INITIAL_EASE_FACTOR);
    }

    #[test]
    fn test_is_due_uses_end_of_day() {
        let item = item(ReviewAlgorithm::Sm2);
        let today = now().date_naive();
        assert!(item.is_due(today));
        assert!(!item.is_due(today.pred_opt().unwrap()));

        let later_today = ReviewItem {
            next_review_date: now() + Duration::hours(11),
            ..item
        };
        assert!(later_today.is_due(today));
    }
}
