//! Study performance metrics
//!
//! Derived figures for a single session or an aggregate of sessions.
//! All calculations are pure; construction rejects out-of-range input.

use crate::errors::{DomainError, DomainResult};
use crate::models::StudySession;
use crate::validation::{
    on_field, validate_concentration, validate_difficulty_rating, validate_duration_minutes,
    MAX_DIFFICULTY_RATING,
};
use serde::{Deserialize, Serialize};

/// Quality band of a performance factor
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum QualityLevel {
    Excellent,
    Good,
    Fair,
    Poor,
}

impl QualityLevel {
    /// Get a human-readable description
    pub fn description(&self) -> &'static str {
        match self {
            QualityLevel::Excellent => "Excellent focus on demanding material",
            QualityLevel::Good => "Good, steady session",
            QualityLevel::Fair => "Fair, room to improve focus",
            QualityLevel::Poor => "Poor, consider shorter sessions",
        }
    }
}

/// Lower bounds of each quality band
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct QualityThresholds {
    pub excellent: f64,
    pub good: f64,
    pub fair: f64,
}

impl Default for QualityThresholds {
    fn default() -> Self {
        Self {
            excellent: 0.85,
            good: 0.65,
            fair: 0.40,
        }
    }
}

impl QualityThresholds {
    pub fn classify(&self, performance_factor: f64) -> QualityLevel {
        if performance_factor >= self.excellent {
            QualityLevel::Excellent
        } else if performance_factor >= self.good {
            QualityLevel::Good
        } else if performance_factor >= self.fair {
            QualityLevel::Fair
        } else {
            QualityLevel::Poor
        }
    }
}

/// Immutable performance figures
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "RawPerformanceMetrics")]
pub struct PerformanceMetrics {
    concentration: f64,
    difficulty: u8,
    duration_minutes: f64,
    units_completed: u32,
}

#[derive(Deserialize)]
struct RawPerformanceMetrics {
    concentration: f64,
    difficulty: u8,
    duration_minutes: f64,
    units_completed: u32,
}

impl TryFrom<RawPerformanceMetrics> for PerformanceMetrics {
    type Error = DomainError;

    fn try_from(raw: RawPerformanceMetrics) -> DomainResult<Self> {
        Self::new(
            raw.concentration,
            raw.difficulty,
            raw.duration_minutes,
            raw.units_completed,
        )
    }
}

impl PerformanceMetrics {
    pub fn new(
        concentration: f64,
        difficulty: u8,
        duration_minutes: f64,
        units_completed: u32,
    ) -> DomainResult<Self> {
        on_field("concentration", validate_concentration(concentration))?;
        on_field("difficulty", validate_difficulty_rating(difficulty))?;
        on_field("duration_minutes", validate_duration_minutes(duration_minutes))?;

        Ok(Self {
            concentration,
            difficulty,
            duration_minutes,
            units_completed,
        })
    }

    pub fn from_session(session: &StudySession) -> DomainResult<Self> {
        Self::new(
            session.concentration,
            session.difficulty,
            session.duration_minutes as f64,
            session.units_completed,
        )
    }

    pub fn concentration(&self) -> f64 {
        self.concentration
    }

    pub fn difficulty(&self) -> u8 {
        self.difficulty
    }

    pub fn duration_minutes(&self) -> f64 {
        self.duration_minutes
    }

    pub fn units_completed(&self) -> u32 {
        self.units_completed
    }

    /// Concentration weighted by how hard the material was
    ///
    /// Formula: clamp(concentration × difficulty / 5, 0, 1)
    pub fn performance_factor(&self) -> f64 {
        let factor = self.concentration * self.difficulty as f64 / MAX_DIFFICULTY_RATING as f64;
        factor.clamp(0.0, 1.0)
    }

    /// Minutes spent per unit, 0 when nothing was completed
    pub fn average_time_per_unit(&self) -> f64 {
        if self.units_completed == 0 {
            return 0.0;
        }
        self.duration_minutes / self.units_completed as f64
    }

    /// Units per hour scaled by the performance factor, 0 for zero duration
    pub fn efficiency_score(&self) -> f64 {
        if self.duration_minutes == 0.0 {
            return 0.0;
        }
        let units_per_hour = self.units_completed as f64 / self.duration_minutes * 60.0;
        self.performance_factor() * units_per_hour
    }

    pub fn quality_level(&self) -> QualityLevel {
        QualityThresholds::default().classify(self.performance_factor())
    }

    pub fn quality_level_with(&self, thresholds: &QualityThresholds) -> QualityLevel {
        thresholds.classify(self.performance_factor())
    }
}
