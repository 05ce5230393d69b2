//! Planning service
//!
//! Provides business logic for:
//! - Plan creation
//! - Round task generation from the plan's own difficulty history
//! - Today's task list

use crate::error::ServiceResult;
use crate::state::AppState;
use chrono::{DateTime, NaiveDate, Utc};
use study_planner_shared::scheduling::{generate_round_tasks, plan_daily_tasks};
use study_planner_shared::{
    CreatePlanRequest, DailyTask, DifficultyProfile, RoundTask, StudyPlan, StudySession,
};
use tracing::{debug, info};
use uuid::Uuid;
use validator::Validate;

/// Planning service for business logic
pub struct PlanningService;

impl PlanningService {
    /// Create and store a new plan
    pub async fn create_plan(
        state: &AppState,
        user_id: Uuid,
        input: CreatePlanRequest,
        now: DateTime<Utc>,
    ) -> ServiceResult<StudyPlan> {
        input.validate()?;
        let plan = StudyPlan::new(user_id, input, now)?;
        let plan = state.plans.create(plan).await?;
        info!(plan_id = %plan.id, user_id = %user_id, "Created study plan");
        Ok(plan)
    }

    /// Difficulty profile built from the plan's round-1 sessions
    pub fn difficulty_profile(
        state: &AppState,
        plan: &StudyPlan,
        sessions: &[StudySession],
    ) -> DifficultyProfile {
        DifficultyProfile::from_sessions(plan.total_units, sessions, &state.config.scheduling)
    }

    /// Round tasks for an already loaded plan and its sessions
    pub fn round_tasks_for(
        state: &AppState,
        plan: &StudyPlan,
        sessions: &[StudySession],
    ) -> Vec<RoundTask> {
        let profile = Self::difficulty_profile(state, plan, sessions);
        let tasks = generate_round_tasks(
            plan.total_units,
            plan.target_rounds,
            &profile,
            &state.config.scheduling,
        );
        debug!(
            plan_id = %plan.id,
            tasks = tasks.len(),
            prioritized = tasks.iter().filter(|t| t.prioritized).count(),
            "Generated round tasks"
        );
        tasks
    }

    /// Round tasks for every target round of a plan
    pub async fn generate_round_tasks(
        state: &AppState,
        plan_id: Uuid,
    ) -> ServiceResult<Vec<RoundTask>> {
        let plan = state.plans.get(plan_id).await?;
        let sessions = state.sessions.find_by_plan_id(plan_id).await?;
        Ok(Self::round_tasks_for(state, &plan, &sessions))
    }

    /// What to study today
    pub async fn plan_today(
        state: &AppState,
        plan_id: Uuid,
        today: NaiveDate,
    ) -> ServiceResult<Vec<DailyTask>> {
        let plan = state.plans.get(plan_id).await?;
        let sessions = state.sessions.find_by_plan_id(plan_id).await?;
        let round_tasks = Self::round_tasks_for(state, &plan, &sessions);
        let tasks = plan_daily_tasks(&plan, &round_tasks, &sessions, today)?;

        info!(
            plan_id = %plan_id,
            date = %today,
            tasks = tasks.len(),
            units = tasks.iter().map(|t| t.units).sum::<u32>(),
            "Planned today's tasks"
        );
        Ok(tasks)
    }
}
