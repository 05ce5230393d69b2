//! Status service
//!
//! Refreshing a plan advances its round once the current round is fully
//! covered by sessions, then applies the status rules against the tasks
//! planned for today and every session logged today. A `CompletedToday` plan is judged against the day
//! of its latest session, so it returns to `Active` on the next day that
//! has tasks.

use crate::error::{ServiceError, ServiceResult};
use crate::services::PlanningService;
use crate::state::AppState;
use chrono::NaiveDate;
use study_planner_shared::models::{advance_round, all_rounds_complete, current_round, pause, resume};
use study_planner_shared::scheduling::plan_daily_tasks;
use study_planner_shared::{PlanStatus, StatusManagementService, StudyPlan, StudySession};
use tracing::{info, warn};
use uuid::Uuid;

/// Status service for business logic
pub struct StatusService;

impl StatusService {
    /// Re-evaluate and persist a plan's round and status
    pub async fn refresh(state: &AppState, plan_id: Uuid, today: NaiveDate) -> ServiceResult<StudyPlan> {
        let plan = state.plans.get(plan_id).await?;
        let sessions = state.sessions.find_by_plan_id(plan_id).await?;

        // Today's work is measured against what was planned before any
        // round advanced, so finishing a round today counts toward the quota.
        let round_tasks = PlanningService::round_tasks_for(state, &plan, &sessions);
        let tasks = plan_daily_tasks(&plan, &round_tasks, &sessions, today)?;
        let todays_sessions: Vec<StudySession> =
            sessions.iter().filter(|s| s.day() == today).cloned().collect();

        let mut updated = Self::advance_covered_rounds(&plan, &sessions);
        let all_complete = all_rounds_complete(&updated);

        if updated.status == PlanStatus::CompletedToday {
            let completed_on = sessions
                .iter()
                .map(StudySession::day)
                .filter(|day| *day <= today)
                .max()
                .unwrap_or(today);
            updated = StatusManagementService::update_status(
                &updated,
                &tasks,
                &[],
                all_complete,
                completed_on,
            );
        }

        if updated.status != PlanStatus::CompletedToday {
            updated = StatusManagementService::update_status(
                &updated,
                &tasks,
                &todays_sessions,
                all_complete,
                today,
            );
        }

        if updated == plan {
            return Ok(plan);
        }

        let stored = state.plans.update(updated).await?;
        info!(
            plan_id = %plan_id,
            from = plan.status.as_str(),
            to = stored.status.as_str(),
            rounds = stored.rounds,
            "Plan status refreshed"
        );
        Ok(stored)
    }

    /// Stop scheduling a plan until it is resumed
    pub async fn pause(state: &AppState, plan_id: Uuid) -> ServiceResult<StudyPlan> {
        let plan = state.plans.get(plan_id).await?;
        if plan.status == PlanStatus::Completed {
            return Err(ServiceError::Conflict("a completed plan cannot be paused".to_string()));
        }
        if plan.status == PlanStatus::Paused {
            return Ok(plan);
        }
        let stored = state.plans.update(pause(&plan)).await?;
        info!(plan_id = %plan_id, "Plan paused");
        Ok(stored)
    }

    /// The only way out of `Paused`
    pub async fn resume(state: &AppState, plan_id: Uuid) -> ServiceResult<StudyPlan> {
        let plan = state.plans.get(plan_id).await?;
        if plan.status != PlanStatus::Paused {
            warn!(plan_id = %plan_id, status = plan.status.as_str(), "Resume on a plan that is not paused");
            return Err(ServiceError::Conflict("plan is not paused".to_string()));
        }
        let stored = state.plans.update(resume(&plan)).await?;
        info!(plan_id = %plan_id, "Plan resumed");
        Ok(stored)
    }

    /// Advance past every round the sessions already cover in full
    fn advance_covered_rounds(plan: &StudyPlan, sessions: &[StudySession]) -> StudyPlan {
        let mut plan = plan.clone();
        while !all_rounds_complete(&plan) {
            let round = current_round(&plan);
            let covered: u64 = sessions
                .iter()
                .filter(|s| s.round == round)
                .map(|s| s.units_completed as u64)
                .sum();
            if covered < plan.total_units as u64 {
                break;
            }
            info!(plan_id = %plan.id, round, "Round completed");
            plan = advance_round(&plan);
        }
        plan
    }
}
