//! Business logic services
//!
//! Services load what the planning engine needs from the repositories,
//! run it, and persist the outcome.

pub mod analysis;
pub mod planning;
pub mod review;
pub mod sessions;
pub mod status;

pub use analysis::AnalysisService;
pub use planning::PlanningService;
pub use review::ReviewService;
pub use sessions::SessionService;
pub use status::StatusService;
