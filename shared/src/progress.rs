//! Progress and schedule value objects
//!
//! Both types are immutable; updates return new instances.

use crate::errors::{DomainError, DomainResult};
use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

// ============================================================================
// Progress
// ============================================================================

/// Completed units out of a positive total
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "RawProgress")]
pub struct Progress {
    completed: u32,
    total: u32,
}

#[derive(Deserialize)]
struct RawProgress {
    completed: u32,
    total: u32,
}

impl TryFrom<RawProgress> for Progress {
    type Error = DomainError;

    fn try_from(raw: RawProgress) -> DomainResult<Self> {
        Self::new(raw.completed, raw.total)
    }
}

impl Progress {
    pub fn new(completed: u32, total: u32) -> DomainResult<Self> {
        if total == 0 {
            return Err(DomainError::validation("total", "must be greater than 0"));
        }
        if completed > total {
            return Err(DomainError::validation(
                "completed",
                "cannot exceed the total",
            ));
        }
        Ok(Self { completed, total })
    }

    pub fn completed(&self) -> u32 {
        self.completed
    }

    pub fn total(&self) -> u32 {
        self.total
    }

    /// Completed share of the total, 0.0 - 1.0
    pub fn percentage(&self) -> f64 {
        self.completed as f64 / self.total as f64
    }

    pub fn remaining(&self) -> u32 {
        self.total - self.completed
    }

    pub fn is_complete(&self) -> bool {
        self.completed == self.total
    }

    pub fn is_not_started(&self) -> bool {
        self.completed == 0
    }

    pub fn is_in_progress(&self) -> bool {
        !self.is_not_started() && !self.is_complete()
    }

    /// Move forward (or back, for negative amounts), clamped to [0, total]
    pub fn advance(&self, amount: i64) -> Self {
        let completed = (self.completed as i64 + amount).clamp(0, self.total as i64) as u32;
        Self {
            completed,
            total: self.total,
        }
    }

    /// Change the total, clamping completed units to it
    pub fn with_total(&self, new_total: u32) -> DomainResult<Self> {
        Self::new(self.completed.min(new_total), new_total)
    }
}

// ============================================================================
// Date Range
// ============================================================================

/// Inclusive span of calendar days
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "RawDateRange")]
pub struct DateRange {
    start: NaiveDate,
    end: NaiveDate,
}

#[derive(Deserialize)]
struct RawDateRange {
    start: NaiveDate,
    end: NaiveDate,
}

impl TryFrom<RawDateRange> for DateRange {
    type Error = DomainError;

    fn try_from(raw: RawDateRange) -> DomainResult<Self> {
        Self::new(raw.start, raw.end)
    }
}

impl DateRange {
    pub fn new(start: NaiveDate, end: NaiveDate) -> DomainResult<Self> {
        if start > end {
            return Err(DomainError::validation(
                "date_range",
                "start cannot be after end",
            ));
        }
        Ok(Self { start, end })
    }

    /// Build from timestamps, truncating both to their calendar day
    pub fn from_datetimes(start: DateTime<Utc>, end: DateTime<Utc>) -> DomainResult<Self> {
        Self::new(start.date_naive(), end.date_naive())
    }

    pub fn start(&self) -> NaiveDate {
        self.start
    }

    pub fn end(&self) -> NaiveDate {
        self.end
    }

    /// Number of days, counting both ends
    pub fn days_count(&self) -> u32 {
        ((self.end - self.start).num_days() + 1) as u32
    }

    pub fn contains(&self, date: NaiveDate) -> bool {
        self.start <= date && date <= self.end
    }

    pub fn contains_today(&self, today: NaiveDate) -> bool {
        self.contains(today)
    }

    /// Days left including today; 0 once the range has ended
    pub fn remaining_days(&self, today: NaiveDate) -> u32 {
        if today > self.end {
            0
        } else if today < self.start {
            self.days_count()
        } else {
            ((self.end - today).num_days() + 1) as u32
        }
    }

    /// Days already behind us; the full count once the range has ended
    pub fn elapsed_days(&self, today: NaiveDate) -> u32 {
        if today < self.start {
            0
        } else if today > self.end {
            self.days_count()
        } else {
            (today - self.start).num_days() as u32
        }
    }

    pub fn progress_ratio(&self, today: NaiveDate) -> f64 {
        self.elapsed_days(today) as f64 / self.days_count() as f64
    }

    /// Iterate over every day in the range
    pub fn days(&self) -> impl Iterator<Item = NaiveDate> {
        let end = self.end;
        self.start.iter_days().take_while(move |d| *d <= end)
    }
}
