//! Plan status management
//!
//! Status transitions are evaluated in a fixed priority order:
//!
//! 1. `Completed` never changes
//! 2. every round done -> `Completed`
//! 3. `CompletedToday` -> `Active` once tasks exist for a later day
//! 4. today's sessions cover today's tasks -> `CompletedToday`
//! 5. otherwise unchanged; `Paused` is only left through [`resume`]
//!
//! [`resume`]: crate::models::resume

use crate::models::{
    complete, complete_today, is_overdue, reset_today_completion, DailyTask, PlanStatus,
    StudyPlan, StudySession,
};
use chrono::NaiveDate;

/// Status management rules
pub struct StatusManagementService;

impl StatusManagementService {
    /// Apply the transition rules and return the plan with its new status
    pub fn update_status(
        plan: &StudyPlan,
        todays_tasks: &[DailyTask],
        todays_sessions: &[StudySession],
        all_rounds_complete: bool,
        today: NaiveDate,
    ) -> StudyPlan {
        if plan.status == PlanStatus::Completed {
            return plan.clone();
        }

        if all_rounds_complete {
            return complete(plan);
        }

        if plan.status == PlanStatus::CompletedToday {
            if todays_tasks.iter().any(|t| t.date > today) {
                return reset_today_completion(plan);
            }
            return plan.clone();
        }

        let due_today: Vec<&DailyTask> = todays_tasks.iter().filter(|t| t.date == today).collect();
        if !due_today.is_empty() {
            let required: u64 = due_today.iter().map(|t| t.units as u64).sum();
            let completed: u64 = todays_sessions
                .iter()
                .map(|s| s.units_completed as u64)
                .sum();
            if completed >= required {
                return complete_today(plan);
            }
        }

        plan.clone()
    }

    /// Whether new study may be scheduled for the plan
    pub fn can_study(plan: &StudyPlan, today: NaiveDate) -> bool {
        match plan.status {
            PlanStatus::Paused | PlanStatus::Completed => false,
            _ => !is_overdue(plan, today),
        }
    }

    /// Short user-facing label for the plan's state
    pub fn generate_status_message(plan: &StudyPlan, today: NaiveDate) -> &'static str {
        match plan.status {
            PlanStatus::Completed => "All rounds completed",
            PlanStatus::CompletedToday => "Done for today",
            PlanStatus::Paused => "Paused",
            PlanStatus::Active if is_overdue(plan, today) => "Overdue",
            PlanStatus::Active => "In progress",
        }
    }
}
