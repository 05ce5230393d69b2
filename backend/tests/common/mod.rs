//! Common test utilities for integration tests
//!
//! Builds an application state on in-memory repositories and offers
//! shortcuts for creating plans and logging sessions.

#![allow(dead_code)]

use chrono::{DateTime, NaiveDate, TimeZone, Utc};
use fake::faker::lorem::en::Sentence;
use fake::{Fake, Faker};
use study_planner_backend::config::AppConfig;
use study_planner_backend::services::{PlanningService, SessionService};
use study_planner_backend::state::AppState;
use study_planner_shared::{CreatePlanRequest, LogSessionRequest, StudyPlan, StudySession};
use uuid::Uuid;

/// Test application wrapper
pub struct TestApp {
    pub state: AppState,
    pub user_id: Uuid,
}

impl TestApp {
    pub fn new() -> Self {
        Self::with_config(AppConfig::default())
    }

    pub fn with_config(config: AppConfig) -> Self {
        Self {
            state: AppState::in_memory(config),
            user_id: Faker.fake(),
        }
    }

    /// Plan created on `start` with a daily schedule up to `deadline`
    pub async fn create_plan(
        &self,
        total_units: u32,
        target_rounds: u32,
        start: NaiveDate,
        deadline: NaiveDate,
    ) -> StudyPlan {
        let request = CreatePlanRequest {
            title: Sentence(2..5).fake(),
            total_units,
            unit_label: "page".to_string(),
            unit_range: None,
            deadline,
            target_rounds,
            estimated_time_per_unit: 2.0,
            difficulty: None,
            study_days: vec![],
        };
        PlanningService::create_plan(&self.state, self.user_id, request, at(start, 8))
            .await
            .expect("Failed to create plan")
    }

    pub async fn log(
        &self,
        plan: &StudyPlan,
        day: NaiveDate,
        units: u32,
        difficulty: u8,
        round: u32,
    ) -> StudySession {
        let request = LogSessionRequest {
            plan_id: plan.id,
            date: at(day, 19),
            units_completed: units,
            duration_minutes: units * 2,
            concentration: 0.8,
            difficulty,
            round,
        };
        SessionService::log_session(&self.state, self.user_id, request)
            .await
            .expect("Failed to log session")
    }
}

pub fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

pub fn at(day: NaiveDate, hour: u32) -> DateTime<Utc> {
    Utc.from_utc_datetime(&day.and_hms_opt(hour, 0, 0).unwrap())
}
