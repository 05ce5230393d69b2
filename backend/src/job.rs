//! Daily planning pass
//!
//! For every stored plan: refresh its status, plan today's tasks and
//! evaluate progress. A failure on one plan is reported and the pass moves
//! on to the next.

use crate::error::{ErrorDetail, ServiceResult};
use crate::services::{AnalysisService, PlanningService, ReviewService, StatusService};
use crate::state::AppState;
use chrono::NaiveDate;
use serde::Serialize;
use std::collections::BTreeSet;
use study_planner_shared::models::unit_span_label;
use study_planner_shared::{
    DailyTask, PlanEvaluation, PlanStatus, ReviewItem, StatusManagementService, StudyPlan,
};
use tracing::{info, warn};
use uuid::Uuid;

/// Outcome for one plan
#[derive(Debug, Clone, Serialize)]
pub struct PlanReport {
    pub plan_id: Uuid,
    pub title: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<PlanStatus>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status_message: Option<String>,
    pub tasks: Vec<DailyTask>,
    /// One label per task in the material's own numbering
    pub task_labels: Vec<String>,
    pub planned_minutes: f64,
    /// Today's tasks exceed the configured daily limit
    pub overloaded: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub evaluation: Option<PlanEvaluation>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<ErrorDetail>,
}

/// Review items due today for one user
#[derive(Debug, Clone, Serialize)]
pub struct UserReviews {
    pub user_id: Uuid,
    pub due: Vec<ReviewItem>,
}

/// Full output of a planning pass
#[derive(Debug, Clone, Serialize)]
pub struct DailyReport {
    pub date: NaiveDate,
    pub plans: Vec<PlanReport>,
    pub reviews: Vec<UserReviews>,
}

struct PlannedDay {
    plan: StudyPlan,
    tasks: Vec<DailyTask>,
    evaluation: PlanEvaluation,
}

async fn plan_one(state: &AppState, plan_id: Uuid, today: NaiveDate) -> ServiceResult<PlannedDay> {
    let plan = StatusService::refresh(state, plan_id, today).await?;
    let tasks = PlanningService::plan_today(state, plan_id, today).await?;
    let evaluation = AnalysisService::evaluate(state, plan_id, today).await?;
    Ok(PlannedDay {
        plan,
        tasks,
        evaluation,
    })
}

/// Run the pass over every plan in the repositories
pub async fn run_daily_planning(state: &AppState, today: NaiveDate) -> ServiceResult<DailyReport> {
    let plans = state.plans.find_all().await?;
    info!(date = %today, plans = plans.len(), "Starting daily planning");

    let max_minutes = state.config.planner.max_daily_minutes;
    let mut reports = Vec::with_capacity(plans.len());
    let mut users = BTreeSet::new();

    for plan in plans {
        users.insert(plan.user_id);
        let report = match plan_one(state, plan.id, today).await {
            Ok(day) => {
                let planned_minutes: f64 = day.tasks.iter().map(|t| t.estimated_duration).sum();
                let overloaded = planned_minutes > max_minutes;
                if overloaded {
                    warn!(
                        plan_id = %plan.id,
                        planned_minutes,
                        max_minutes,
                        "Daily workload exceeds the configured limit"
                    );
                }
                let task_labels = day
                    .tasks
                    .iter()
                    .map(|t| unit_span_label(&day.plan, t.start_unit, t.end_unit))
                    .collect();
                PlanReport {
                    plan_id: plan.id,
                    title: day.plan.title.clone(),
                    status: Some(day.plan.status),
                    status_message: Some(
                        StatusManagementService::generate_status_message(&day.plan, today).to_string(),
                    ),
                    tasks: day.tasks,
                    task_labels,
                    planned_minutes,
                    overloaded,
                    evaluation: Some(day.evaluation),
                    error: None,
                }
            }
            Err(err) => {
                warn!(plan_id = %plan.id, error = %err, "Skipping plan");
                PlanReport {
                    plan_id: plan.id,
                    title: plan.title.clone(),
                    status: None,
                    status_message: None,
                    tasks: Vec::new(),
                    task_labels: Vec::new(),
                    planned_minutes: 0.0,
                    overloaded: false,
                    evaluation: None,
                    error: Some(err.detail()),
                }
            }
        };
        reports.push(report);
    }

    let mut reviews = Vec::with_capacity(users.len());
    for user_id in users {
        let due = ReviewService::due_today(state, user_id, today).await?;
        if !due.is_empty() {
            reviews.push(UserReviews { user_id, due });
        }
    }

    info!(
        date = %today,
        plans = reports.len(),
        failed = reports.iter().filter(|r| r.error.is_some()).count(),
        "Daily planning finished"
    );
    Ok(DailyReport {
        date: today,
        plans: reports,
        reviews,
    })
}
