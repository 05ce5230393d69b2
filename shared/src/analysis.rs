//! Progress analysis and achievability
//!
//! Combines a plan, its sessions and today's date into progress figures,
//! an aggregate performance snapshot and a verdict on whether the
//! remaining pace can meet the deadline.

use crate::errors::DomainResult;
use crate::models::{all_rounds_complete, current_round, is_overdue, StudyPlan, StudySession};
use crate::performance::PerformanceMetrics;
use crate::progress::{DateRange, Progress};
use crate::scheduling::daily::remaining_study_days;
use crate::validation::MAX_DIFFICULTY_RATING;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

/// Analysis tuning
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AnalysisConfig {
    /// Share of the required pace still counted as at risk rather than behind (default 0.8)
    pub at_risk_ratio: f64,
}

impl Default for AnalysisConfig {
    fn default() -> Self {
        Self { at_risk_ratio: 0.8 }
    }
}

/// Whether the deadline is still reachable
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Achievability {
    Completed,
    Overdue,
    NotStarted,
    OnTrack,
    AtRisk,
    Behind,
}

impl Achievability {
    pub fn description(&self) -> &'static str {
        match self {
            Achievability::Completed => "All rounds are finished",
            Achievability::Overdue => "The deadline has passed with units left",
            Achievability::NotStarted => "No study logged yet",
            Achievability::OnTrack => "Current pace meets the deadline",
            Achievability::AtRisk => "Slightly below the required pace",
            Achievability::Behind => "Well below the required pace",
        }
    }
}

/// Full evaluation of a plan on a given day
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlanEvaluation {
    pub overall_progress: Progress,
    pub round_progress: Progress,
    pub current_round: u32,
    pub performance: Option<PerformanceMetrics>,
    pub schedule: DateRange,
    pub remaining_study_days: u32,
    pub required_units_per_day: f64,
    /// Units per day actually studied, `None` without history
    pub current_units_per_day: Option<f64>,
    pub estimated_minutes_per_day: f64,
    pub achievability: Achievability,
}

/// Progress and pace evaluation
pub struct ProgressAnalysisService;

impl ProgressAnalysisService {
    /// Combine sessions into one metrics snapshot
    ///
    /// Concentration is weighted by duration (plain mean when every
    /// session has zero duration); difficulty is the rounded mean.
    pub fn aggregate_metrics(sessions: &[StudySession]) -> DomainResult<Option<PerformanceMetrics>> {
        if sessions.is_empty() {
            return Ok(None);
        }

        let count = sessions.len() as f64;
        let duration: f64 = sessions.iter().map(|s| s.duration_minutes as f64).sum();
        let units: u64 = sessions.iter().map(|s| s.units_completed as u64).sum();

        let concentration = if duration > 0.0 {
            sessions
                .iter()
                .map(|s| s.concentration * s.duration_minutes as f64)
                .sum::<f64>()
                / duration
        } else {
            sessions.iter().map(|s| s.concentration).sum::<f64>() / count
        };

        let mean_difficulty = sessions.iter().map(|s| s.difficulty as f64).sum::<f64>() / count;
        let difficulty = (mean_difficulty.round() as u8).clamp(1, MAX_DIFFICULTY_RATING);

        PerformanceMetrics::new(
            concentration,
            difficulty,
            duration,
            units.min(u32::MAX as u64) as u32,
        )
        .map(Some)
    }

    /// Progress through the round currently being studied
    pub fn round_progress(plan: &StudyPlan, sessions: &[StudySession]) -> DomainResult<Progress> {
        let round = current_round(plan);
        let done = if all_rounds_complete(plan) {
            plan.total_units as u64
        } else {
            Self::plan_sessions(plan, sessions)
                .filter(|s| s.round == round)
                .map(|s| s.units_completed as u64)
                .sum::<u64>()
                .min(plan.total_units as u64)
        };
        Progress::new(done as u32, plan.total_units)
    }

    /// Progress across all target rounds
    pub fn overall_progress(plan: &StudyPlan, sessions: &[StudySession]) -> DomainResult<Progress> {
        let total = plan.total_units.saturating_mul(plan.target_rounds);
        let finished_rounds = plan.rounds.min(plan.target_rounds);
        let mut completed = finished_rounds.saturating_mul(plan.total_units);
        if !all_rounds_complete(plan) {
            completed += Self::round_progress(plan, sessions)?.completed();
        }
        Progress::new(completed.min(total), total)
    }

    /// Units per day on days with at least one session
    pub fn current_pace(plan: &StudyPlan, sessions: &[StudySession]) -> Option<f64> {
        let mut days = HashSet::new();
        let mut units = 0u64;
        for session in Self::plan_sessions(plan, sessions) {
            days.insert(session.day());
            units += session.units_completed as u64;
        }
        if days.is_empty() {
            return None;
        }
        Some(units as f64 / days.len() as f64)
    }

    pub fn evaluate(
        plan: &StudyPlan,
        sessions: &[StudySession],
        today: NaiveDate,
        config: &AnalysisConfig,
    ) -> DomainResult<PlanEvaluation> {
        let schedule = DateRange::new(plan.created_at.date_naive(), plan.deadline)?;
        let overall_progress = Self::overall_progress(plan, sessions)?;
        let round_progress = Self::round_progress(plan, sessions)?;

        let own: Vec<StudySession> = Self::plan_sessions(plan, sessions).cloned().collect();
        let performance = Self::aggregate_metrics(&own)?;

        let study_days = remaining_study_days(plan, today);
        let remaining = overall_progress.remaining() as f64;
        let required_units_per_day = if study_days > 0 {
            remaining / study_days as f64
        } else {
            remaining
        };
        let current_units_per_day = Self::current_pace(plan, sessions);

        let achievability = Self::classify(
            plan,
            &overall_progress,
            study_days,
            required_units_per_day,
            current_units_per_day,
            today,
            config,
        );

        Ok(PlanEvaluation {
            overall_progress,
            round_progress,
            current_round: current_round(plan),
            performance,
            schedule,
            remaining_study_days: study_days,
            required_units_per_day,
            current_units_per_day,
            estimated_minutes_per_day: required_units_per_day * plan.estimated_time_per_unit,
            achievability,
        })
    }

    fn classify(
        plan: &StudyPlan,
        progress: &Progress,
        study_days: u32,
        required: f64,
        pace: Option<f64>,
        today: NaiveDate,
        config: &AnalysisConfig,
    ) -> Achievability {
        if all_rounds_complete(plan) || progress.is_complete() {
            return Achievability::Completed;
        }
        if is_overdue(plan, today) {
            return Achievability::Overdue;
        }
        let Some(pace) = pace else {
            return Achievability::NotStarted;
        };
        if study_days == 0 {
            return Achievability::Behind;
        }
        if pace >= required {
            Achievability::OnTrack
        } else if pace >= required * config.at_risk_ratio {
            Achievability::AtRisk
        } else {
            Achievability::Behind
        }
    }

    fn plan_sessions<'a>(
        plan: &'a StudyPlan,
        sessions: &'a [StudySession],
    ) -> impl Iterator<Item = &'a StudySession> + 'a {
        sessions.iter().filter(move |s| s.plan_id == plan.id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{advance_round, PlanDifficulty, PlanStatus};
    use chrono::{TimeZone, Utc};
    use rstest::rstest;
    use uuid::Uuid;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn plan() -> StudyPlan {
        StudyPlan {
            id: Uuid::new_v4(),
            user_id: Uuid::nil(),
            title: "Exam prep".to_string(),
            total_units: 100,
            unit_label: "question".to_string(),
            unit_range: None,
            created_at: Utc.with_ymd_and_hms(2024, 6, 1, 9, 0, 0).unwrap(),
            deadline: date(2024, 6, 30),
            rounds: 0,
            target_rounds: 2,
            estimated_time_per_unit: 3.0,
            difficulty: PlanDifficulty::Normal,
            study_days: vec![],
            status: PlanStatus::Active,
            version: 0,
        }
    }

    fn session(plan: &StudyPlan, day: NaiveDate, units: u32, minutes: u32, concentration: f64, difficulty: u8, round: u32) -> StudySession {
        StudySession {
            id: Uuid::new_v4(),
            user_id: plan.user_id,
            plan_id: plan.id,
            date: Utc.from_utc_datetime(&day.and_hms_opt(20, 0, 0).unwrap()),
            units_completed: units,
            duration_minutes: minutes,
            concentration,
            difficulty,
            round,
            version: 0,
        }
    }

    #[test]
    fn test_aggregate_weights_concentration_by_duration() {
        let plan = plan();
        let sessions = vec![
            session(&plan, date(2024, 6, 1), 10, 30, 1.0, 2, 1),
            session(&plan, date(2024, 6, 2), 20, 90, 0.6, 5, 1),
        ];
        let metrics = ProgressAnalysisService::aggregate_metrics(&sessions).unwrap().unwrap();
        assert!((metrics.concentration() - 0.7).abs() < 1e-9);
        // mean 3.5 rounds to 4
        assert_eq!(metrics.difficulty(), 4);
        assert_eq!(metrics.duration_minutes(), 120.0);
        assert_eq!(metrics.units_completed(), 30);
    }

    #[test]
    fn test_aggregate_empty_and_zero_duration() {
        assert!(ProgressAnalysisService::aggregate_metrics(&[]).unwrap().is_none());

        let plan = plan();
        let sessions = vec![
            session(&plan, date(2024, 6, 1), 1, 0, 0.2, 1, 1),
            session(&plan, date(2024, 6, 1), 1, 0, 0.4, 1, 1),
        ];
        let metrics = ProgressAnalysisService::aggregate_metrics(&sessions).unwrap().unwrap();
        assert!((metrics.concentration() - 0.3).abs() < 1e-9);
    }

    #[test]
    fn test_aggregate_rejects_corrupt_sessions() {
        let plan = plan();
        let sessions = vec![session(&plan, date(2024, 6, 1), 1, 10, 1.7, 3, 1)];
        assert!(ProgressAnalysisService::aggregate_metrics(&sessions).is_err());
    }

    #[test]
    fn test_progress_across_rounds() {
        let plan = advance_round(&plan());
        let sessions = vec![
            session(&plan, date(2024, 6, 1), 100, 300, 0.8, 3, 1),
            session(&plan, date(2024, 6, 10), 40, 100, 0.8, 3, 2),
        ];
        let round = ProgressAnalysisService::round_progress(&plan, &sessions).unwrap();
        assert_eq!((round.completed(), round.total()), (40, 100));

        let overall = ProgressAnalysisService::overall_progress(&plan, &sessions).unwrap();
        assert_eq!((overall.completed(), overall.total()), (140, 200));
    }

    #[test]
    fn test_other_plans_sessions_ignored() {
        let plan = plan();
        let other = StudyPlan {
            id: Uuid::new_v4(),
            ..plan.clone()
        };
        let sessions = vec![session(&other, date(2024, 6, 1), 50, 60, 0.8, 3, 1)];
        let round = ProgressAnalysisService::round_progress(&plan, &sessions).unwrap();
        assert!(round.is_not_started());
        assert!(ProgressAnalysisService::current_pace(&plan, &sessions).is_none());
    }

    #[rstest]
    // One study day so far; the rest of 200 units spread over 30 days
    #[case(7, Achievability::OnTrack)]
    #[case(6, Achievability::AtRisk)]
    #[case(3, Achievability::Behind)]
    fn test_pace_classification(#[case] units: u32, #[case] expected: Achievability) {
        let plan = plan();
        let sessions = vec![session(&plan, date(2024, 5, 31), units, 30, 0.8, 3, 1)];
        let evaluation =
            ProgressAnalysisService::evaluate(&plan, &sessions, date(2024, 6, 1), &AnalysisConfig::default())
                .unwrap();
        assert_eq!(evaluation.remaining_study_days, 30);
        assert_eq!(evaluation.achievability, expected);
    }

    #[test]
    fn test_evaluation_figures() {
        let plan = plan();
        let evaluation = ProgressAnalysisService::evaluate(
            &plan,
            &[],
            date(2024, 6, 11),
            &AnalysisConfig::default(),
        )
        .unwrap();
        assert_eq!(evaluation.achievability, Achievability::NotStarted);
        assert_eq!(evaluation.remaining_study_days, 20);
        assert!((evaluation.required_units_per_day - 10.0).abs() < 1e-9);
        assert!((evaluation.estimated_minutes_per_day - 30.0).abs() < 1e-9);
        assert_eq!(evaluation.schedule.days_count(), 30);
        assert_eq!(evaluation.current_round, 1);
        assert!(evaluation.performance.is_none());
    }

    #[test]
    fn test_completed_and_overdue() {
        let done = advance_round(&advance_round(&plan()));
        let evaluation =
            ProgressAnalysisService::evaluate(&done, &[], date(2024, 7, 5), &AnalysisConfig::default())
                .unwrap();
        assert_eq!(evaluation.achievability, Achievability::Completed);
        assert!(evaluation.overall_progress.is_complete());

        let late = plan();
        let sessions = vec![session(&late, date(2024, 6, 3), 10, 30, 0.8, 3, 1)];
        let evaluation =
            ProgressAnalysisService::evaluate(&late, &sessions, date(2024, 7, 5), &AnalysisConfig::default())
                .unwrap();
        assert_eq!(evaluation.achievability, Achievability::Overdue);
        assert_eq!(evaluation.remaining_study_days, 0);
    }

    #[test]
    fn test_invalid_schedule_is_an_error() {
        let broken = StudyPlan {
            deadline: date(2024, 5, 1),
            ..plan()
        };
        let err = ProgressAnalysisService::evaluate(&broken, &[], date(2024, 6, 1), &AnalysisConfig::default())
            .unwrap_err();
        assert!(err.is_validation());
    }
}
