//! Study Planner Shared Library
//!
//! Domain types, scheduling algorithms and validation shared by the
//! backend service and the WASM bindings. Nothing in this crate performs
//! I/O or reads the clock; callers pass `today`/`now` explicitly.

pub mod analysis;
pub mod errors;
pub mod models;
pub mod performance;
pub mod progress;
pub mod review;
pub mod scheduling;
pub mod status;
pub mod types;
pub mod validation;

// Re-export commonly used items
pub use analysis::{Achievability, AnalysisConfig, PlanEvaluation, ProgressAnalysisService};
pub use errors::*;
pub use models::{
    DailyTask, PlanDifficulty, PlanStatus, StudyPlan, StudySession, UnitRange,
};
pub use performance::{PerformanceMetrics, QualityLevel, QualityThresholds};
pub use progress::{DateRange, Progress};
pub use review::{
    ReviewAlgorithm, ReviewConfig, ReviewItem, ReviewQuality, ReviewScheduler, SpacedRepetition,
};
pub use scheduling::{DifficultyProfile, RoundTask, SchedulingConfig};
pub use status::StatusManagementService;
pub use types::*;
pub use validation::ValidationError;
