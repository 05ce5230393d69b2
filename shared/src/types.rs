//! Request types accepted by the planner services

use crate::models::{PlanDifficulty, UnitRange};
use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

/// Create a study plan
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct CreatePlanRequest {
    #[validate(length(min = 1, max = 200))]
    pub title: String,
    #[validate(range(min = 1))]
    pub total_units: u32,
    #[validate(length(min = 1, max = 50))]
    pub unit_label: String,
    #[serde(default)]
    pub unit_range: Option<UnitRange>,
    pub deadline: NaiveDate,
    #[validate(range(min = 1, max = 20))]
    pub target_rounds: u32,
    /// Minutes per unit
    #[validate(range(min = 0.0))]
    pub estimated_time_per_unit: f64,
    #[serde(default)]
    pub difficulty: Option<PlanDifficulty>,
    #[serde(default)]
    #[validate(length(max = 7))]
    pub study_days: Vec<u8>,
}

/// Log a study session against a plan
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct LogSessionRequest {
    pub plan_id: Uuid,
    #[serde(default = "Utc::now")]
    pub date: DateTime<Utc>,
    pub units_completed: u32,
    /// Capped at 24 hours
    #[validate(range(max = 1440))]
    pub duration_minutes: u32,
    #[validate(range(min = 0.0, max = 1.0))]
    pub concentration: f64,
    #[validate(range(min = 1, max = 5))]
    pub difficulty: u8,
    #[validate(range(min = 1))]
    pub round: u32,
}

/// Answer a review prompt with a recall score
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct ReviewAnswerRequest {
    pub item_id: Uuid,
    #[validate(range(max = 5))]
    pub quality: u8,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn session_request() -> LogSessionRequest {
        LogSessionRequest {
            plan_id: Uuid::new_v4(),
            date: Utc::now(),
            units_completed: 12,
            duration_minutes: 60,
            concentration: 0.7,
            difficulty: 4,
            round: 1,
        }
    }

    #[test]
    fn test_session_request_validates() {
        assert!(session_request().validate().is_ok());

        let too_long = LogSessionRequest {
            duration_minutes: 2000,
            ..session_request()
        };
        assert!(too_long.validate().is_err());

        let bad_concentration = LogSessionRequest {
            concentration: -0.1,
            ..session_request()
        };
        assert!(bad_concentration.validate().is_err());
    }

    #[test]
    fn test_plan_request_validates() {
        let request = CreatePlanRequest {
            title: "".to_string(),
            total_units: 0,
            unit_label: "page".to_string(),
            unit_range: None,
            deadline: NaiveDate::from_ymd_opt(2024, 6, 1).unwrap(),
            target_rounds: 1,
            estimated_time_per_unit: 2.0,
            difficulty: None,
            study_days: vec![],
        };
        let errors = request.validate().unwrap_err();
        let fields = errors.field_errors();
        assert!(fields.contains_key("title"));
        assert!(fields.contains_key("total_units"));
    }

    #[test]
    fn test_review_answer_deserializes() {
        let json = format!(r#"{{"item_id":"{}","quality":4}}"#, Uuid::nil());
        let request: ReviewAnswerRequest = serde_json::from_str(&json).unwrap();
        assert_eq!(request.quality, 4);
        assert!(request.validate().is_ok());
    }
}
