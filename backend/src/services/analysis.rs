//! Analysis service

use crate::error::ServiceResult;
use crate::state::AppState;
use chrono::NaiveDate;
use study_planner_shared::{PlanEvaluation, ProgressAnalysisService};
use tracing::debug;
use uuid::Uuid;

/// Analysis service for business logic
pub struct AnalysisService;

impl AnalysisService {
    /// Progress, pace and achievability of a plan as of `today`
    pub async fn evaluate(state: &AppState, plan_id: Uuid, today: NaiveDate) -> ServiceResult<PlanEvaluation> {
        let plan = state.plans.get(plan_id).await?;
        let sessions = state.sessions.find_by_plan_id(plan_id).await?;
        let evaluation = ProgressAnalysisService::evaluate(&plan, &sessions, today, &state.config.analysis)?;

        debug!(
            plan_id = %plan_id,
            progress = evaluation.overall_progress.percentage(),
            required_per_day = evaluation.required_units_per_day,
            achievability = ?evaluation.achievability,
            "Evaluated plan"
        );
        Ok(evaluation)
    }
}
