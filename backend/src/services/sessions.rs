//! Session service for logging study activity

use crate::error::{ServiceError, ServiceResult};
use crate::state::AppState;
use study_planner_shared::performance::PerformanceMetrics;
use study_planner_shared::{LogSessionRequest, StudySession};
use tracing::{debug, info};
use uuid::Uuid;
use validator::Validate;

/// Session service for business logic
pub struct SessionService;

impl SessionService {
    /// Validate and store a new session against one of the user's plans
    pub async fn log_session(
        state: &AppState,
        user_id: Uuid,
        input: LogSessionRequest,
    ) -> ServiceResult<StudySession> {
        input.validate()?;
        let plan = state.plans.get(input.plan_id).await?;
        if plan.user_id != user_id {
            return Err(ServiceError::NotFound(format!("plan {} not found", plan.id)));
        }
        if input.round > plan.target_rounds {
            return Err(ServiceError::Validation(format!(
                "Round: plan has only {} rounds",
                plan.target_rounds
            )));
        }

        let session = StudySession::new(user_id, input)?;
        let metrics = PerformanceMetrics::from_session(&session)?;
        debug!(
            session_id = %session.id,
            performance = metrics.performance_factor(),
            quality = metrics.quality_level().description(),
            "Session metrics"
        );

        let session = state.sessions.create(session).await?;
        info!(
            session_id = %session.id,
            plan_id = %session.plan_id,
            units = session.units_completed,
            round = session.round,
            "Logged study session"
        );
        Ok(session)
    }

    /// Replace a stored session; `session.version` must be current
    pub async fn update_session(state: &AppState, session: StudySession) -> ServiceResult<StudySession> {
        PerformanceMetrics::from_session(&session)?;
        if session.round == 0 {
            return Err(ServiceError::Validation("Round: must be at least 1".to_string()));
        }
        let stored = state.sessions.update(session).await?;
        info!(session_id = %stored.id, version = stored.version, "Updated study session");
        Ok(stored)
    }

    pub async fn delete_session(state: &AppState, session_id: Uuid) -> ServiceResult<()> {
        state.sessions.delete(session_id).await?;
        info!(session_id = %session_id, "Deleted study session");
        Ok(())
    }
}
