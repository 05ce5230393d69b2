//! Today's slice of the remaining rounds
//!
//! The quota spreads the units left across all target rounds evenly over
//! the study days left before the deadline. Units are taken in round-task
//! order, so repeat rounds start with the hard chunks.

use super::rounds::RoundTask;
use crate::errors::DomainResult;
use crate::models::{
    all_rounds_complete, current_round, is_study_day, DailyTask, StudyPlan, StudySession,
};
use crate::progress::DateRange;
use crate::status::StatusManagementService;
use chrono::NaiveDate;

/// Study days left in `[today, deadline]`; 0 once the deadline has passed
pub fn remaining_study_days(plan: &StudyPlan, today: NaiveDate) -> u32 {
    match DateRange::new(today, plan.deadline) {
        Ok(range) => range.days().filter(|d| is_study_day(plan, *d)).count() as u32,
        Err(_) => 0,
    }
}

/// Units of `round` finished before `today`, clipped to the plan size
pub fn units_done_before(
    plan: &StudyPlan,
    sessions: &[StudySession],
    round: u32,
    today: NaiveDate,
) -> u32 {
    let done: u64 = sessions
        .iter()
        .filter(|s| s.plan_id == plan.id && s.round == round && s.day() < today)
        .map(|s| s.units_completed as u64)
        .sum();
    done.min(plan.total_units as u64) as u32
}

/// Tasks to study today, one per round-task segment touched
///
/// The quota covers every unit left in the current and later rounds, so
/// a day can finish one round and carry on into the next. Returns nothing
/// when the plan cannot be studied, today is not a study day, or every
/// round is finished.
pub fn plan_daily_tasks(
    plan: &StudyPlan,
    round_tasks: &[RoundTask],
    sessions: &[StudySession],
    today: NaiveDate,
) -> DomainResult<Vec<DailyTask>> {
    if all_rounds_complete(plan)
        || !is_study_day(plan, today)
        || !StatusManagementService::can_study(plan, today)
    {
        return Ok(Vec::new());
    }

    let pending: Vec<(u32, u32)> = (current_round(plan)..=plan.target_rounds)
        .map(|round| (round, units_done_before(plan, sessions, round, today)))
        .filter(|(_, done)| *done < plan.total_units)
        .collect();
    let remaining: u64 = pending
        .iter()
        .map(|(_, done)| (plan.total_units - done) as u64)
        .sum();
    if remaining == 0 {
        return Ok(Vec::new());
    }

    let days = remaining_study_days(plan, today).max(1) as u64;
    let mut quota = remaining.div_ceil(days);
    let mut tasks = Vec::new();

    for (round, done) in pending {
        let mut skip = done;
        for segment in round_tasks.iter().filter(|t| t.round == round) {
            if quota == 0 {
                break;
            }
            let units = segment.units();
            if skip >= units {
                skip -= units;
                continue;
            }

            let start_unit = segment.start_unit + skip;
            let take = (segment.end_unit - start_unit + 1).min(quota.min(u32::MAX as u64) as u32);
            skip = 0;
            quota -= take as u64;

            tasks.push(DailyTask::new(
                plan.id,
                today,
                start_unit,
                start_unit + take - 1,
                take,
                take as f64 * plan.estimated_time_per_unit,
                round,
                segment.advice.clone(),
            )?);
        }
        if quota == 0 {
            break;
        }
    }

    Ok(tasks)
}
