//! Data models for the study planner
//!
//! Plans and sessions are plain data. Lifecycle changes are free functions
//! that return an updated copy, so a plan rebuilt from storage behaves the
//! same as one created in memory.

use crate::errors::{DomainError, DomainResult};
use crate::types::{CreatePlanRequest, LogSessionRequest};
use crate::validation::{
    on_field, validate_concentration, validate_difficulty_rating, validate_duration_minutes,
    validate_study_days, validate_unit_span,
};
use chrono::{DateTime, Datelike, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Lifecycle status of a study plan
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "snake_case")]
pub enum PlanStatus {
    #[default]
    Active,
    Paused,
    Completed,
    CompletedToday,
}

impl PlanStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            PlanStatus::Active => "active",
            PlanStatus::Paused => "paused",
            PlanStatus::Completed => "completed",
            PlanStatus::CompletedToday => "completed_today",
        }
    }
}

/// Perceived difficulty of the material as a whole
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum PlanDifficulty {
    Easy,
    #[default]
    Normal,
    Hard,
}

/// Absolute numbering of a plan's material (e.g. pages 31-130)
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub struct UnitRange {
    pub start: u32,
    pub end: u32,
}

impl UnitRange {
    /// Number of units covered, inclusive
    pub fn len(&self) -> u32 {
        self.end.saturating_sub(self.start) + 1
    }

    pub fn is_empty(&self) -> bool {
        self.end < self.start
    }

    /// Map a 1-based plan unit onto the absolute numbering
    pub fn to_absolute(&self, unit: u32) -> u32 {
        self.start + unit.saturating_sub(1)
    }
}

/// A user's study plan
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct StudyPlan {
    pub id: Uuid,
    pub user_id: Uuid,
    pub title: String,
    pub total_units: u32,
    pub unit_label: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub unit_range: Option<UnitRange>,
    pub created_at: DateTime<Utc>,
    pub deadline: NaiveDate,
    /// Rounds fully completed so far
    pub rounds: u32,
    pub target_rounds: u32,
    /// Minutes per unit
    pub estimated_time_per_unit: f64,
    pub difficulty: PlanDifficulty,
    /// Weekdays, 1 = Monday .. 7 = Sunday. Empty means every day.
    pub study_days: Vec<u8>,
    pub status: PlanStatus,
    #[serde(default)]
    pub version: u64,
}

impl StudyPlan {
    /// Create a new plan from a validated request
    pub fn new(user_id: Uuid, input: CreatePlanRequest, now: DateTime<Utc>) -> DomainResult<Self> {
        if input.total_units == 0 {
            return Err(DomainError::validation(
                "total_units",
                "must be greater than 0",
            ));
        }
        if input.target_rounds == 0 {
            return Err(DomainError::validation(
                "target_rounds",
                "must be at least 1",
            ));
        }
        on_field(
            "estimated_time_per_unit",
            validate_duration_minutes(input.estimated_time_per_unit),
        )?;
        on_field("study_days", validate_study_days(&input.study_days))?;
        if input.deadline < now.date_naive() {
            return Err(DomainError::validation(
                "deadline",
                "cannot be before the plan start",
            ));
        }
        if let Some(range) = input.unit_range {
            on_field("unit_range", validate_unit_span(range.start, range.end))?;
            if range.len() != input.total_units {
                return Err(DomainError::validation(
                    "unit_range",
                    "must cover exactly the plan's total units",
                ));
            }
        }

        let mut study_days = input.study_days;
        study_days.sort_unstable();
        study_days.dedup();

        Ok(Self {
            id: Uuid::new_v4(),
            user_id,
            title: input.title,
            total_units: input.total_units,
            unit_label: input.unit_label,
            unit_range: input.unit_range,
            created_at: now,
            deadline: input.deadline,
            rounds: 0,
            target_rounds: input.target_rounds,
            estimated_time_per_unit: input.estimated_time_per_unit,
            difficulty: input.difficulty.unwrap_or_default(),
            study_days,
            status: PlanStatus::Active,
            version: 0,
        })
    }
}

// ============================================================================
// Plan Lifecycle
// ============================================================================

/// Deadline passed and the plan is not finished
pub fn is_overdue(plan: &StudyPlan, today: NaiveDate) -> bool {
    plan.status != PlanStatus::Completed && today > plan.deadline
}

/// Every target round has been completed
pub fn all_rounds_complete(plan: &StudyPlan) -> bool {
    plan.rounds >= plan.target_rounds
}

/// The round currently being studied (1-based)
pub fn current_round(plan: &StudyPlan) -> u32 {
    (plan.rounds + 1).min(plan.target_rounds.max(1))
}

/// Span of plan units in the material's own numbering, e.g. "page 31-40"
pub fn unit_span_label(plan: &StudyPlan, start_unit: u32, end_unit: u32) -> String {
    let (start, end) = match plan.unit_range {
        Some(range) => (range.to_absolute(start_unit), range.to_absolute(end_unit)),
        None => (start_unit, end_unit),
    };
    if start == end {
        format!("{} {}", plan.unit_label, start)
    } else {
        format!("{} {}-{}", plan.unit_label, start, end)
    }
}

/// Whether `date` falls on one of the plan's study weekdays
pub fn is_study_day(plan: &StudyPlan, date: NaiveDate) -> bool {
    if plan.study_days.is_empty() {
        return true;
    }
    let weekday = date.weekday().number_from_monday() as u8;
    plan.study_days.contains(&weekday)
}

fn with_status(plan: &StudyPlan, status: PlanStatus) -> StudyPlan {
    StudyPlan {
        status,
        ..plan.clone()
    }
}

pub fn complete(plan: &StudyPlan) -> StudyPlan {
    with_status(plan, PlanStatus::Completed)
}

pub fn complete_today(plan: &StudyPlan) -> StudyPlan {
    with_status(plan, PlanStatus::CompletedToday)
}

pub fn reset_today_completion(plan: &StudyPlan) -> StudyPlan {
    with_status(plan, PlanStatus::Active)
}

pub fn pause(plan: &StudyPlan) -> StudyPlan {
    with_status(plan, PlanStatus::Paused)
}

/// Explicit exit from `Paused`; other statuses are left alone
pub fn resume(plan: &StudyPlan) -> StudyPlan {
    if plan.status == PlanStatus::Paused {
        with_status(plan, PlanStatus::Active)
    } else {
        plan.clone()
    }
}

/// Record one more finished round, capped at the target
pub fn advance_round(plan: &StudyPlan) -> StudyPlan {
    StudyPlan {
        rounds: (plan.rounds + 1).min(plan.target_rounds),
        ..plan.clone()
    }
}

// ============================================================================
// Study Sessions
// ============================================================================

/// A logged block of study activity
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct StudySession {
    pub id: Uuid,
    pub user_id: Uuid,
    pub plan_id: Uuid,
    pub date: DateTime<Utc>,
    pub units_completed: u32,
    pub duration_minutes: u32,
    /// 0.0 - 1.0
    pub concentration: f64,
    /// 1 - 5
    pub difficulty: u8,
    pub round: u32,
    #[serde(default)]
    pub version: u64,
}

impl StudySession {
    pub fn new(user_id: Uuid, input: LogSessionRequest) -> DomainResult<Self> {
        on_field("concentration", validate_concentration(input.concentration))?;
        on_field("difficulty", validate_difficulty_rating(input.difficulty))?;
        if input.round == 0 {
            return Err(DomainError::validation("round", "must be at least 1"));
        }

        Ok(Self {
            id: Uuid::new_v4(),
            user_id,
            plan_id: input.plan_id,
            date: input.date,
            units_completed: input.units_completed,
            duration_minutes: input.duration_minutes,
            concentration: input.concentration,
            difficulty: input.difficulty,
            round: input.round,
            version: 0,
        })
    }

    /// Calendar day the session was logged on
    pub fn day(&self) -> NaiveDate {
        self.date.date_naive()
    }
}

// ============================================================================
// Daily Tasks
// ============================================================================

/// A unit span scheduled for one day
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct DailyTask {
    pub id: Uuid,
    pub plan_id: Uuid,
    pub date: NaiveDate,
    pub start_unit: u32,
    pub end_unit: u32,
    pub units: u32,
    /// Minutes
    pub estimated_duration: f64,
    pub round: u32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub advice: Option<String>,
}

impl DailyTask {
    /// Build a task, rejecting any span that does not add up
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        plan_id: Uuid,
        date: NaiveDate,
        start_unit: u32,
        end_unit: u32,
        units: u32,
        estimated_duration: f64,
        round: u32,
        advice: Option<String>,
    ) -> DomainResult<Self> {
        if units == 0 {
            return Err(DomainError::validation("units", "must be greater than 0"));
        }
        on_field("start_unit", validate_unit_span(start_unit, end_unit))?;
        on_field(
            "estimated_duration",
            validate_duration_minutes(estimated_duration),
        )?;
        if units != end_unit - start_unit + 1 {
            return Err(DomainError::validation(
                "units",
                "must equal end unit - start unit + 1",
            ));
        }

        Ok(Self {
            id: Uuid::new_v4(),
            plan_id,
            date,
            start_unit,
            end_unit,
            units,
            estimated_duration,
            round,
            advice,
        })
    }
}
