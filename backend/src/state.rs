//! Application state management
//!
//! Services receive the state by reference; it bundles the repositories
//! and configuration behind `Arc`s so cloning it is cheap.

use crate::config::AppConfig;
use crate::repositories::{
    InMemoryPlanRepository, InMemoryReviewItemRepository, InMemorySessionRepository,
    PlanRepository, ReviewItemRepository, SessionRepository,
};
use std::sync::Arc;

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    pub plans: Arc<dyn PlanRepository>,
    pub sessions: Arc<dyn SessionRepository>,
    pub review_items: Arc<dyn ReviewItemRepository>,
    pub config: Arc<AppConfig>,
}

impl AppState {
    pub fn new(
        plans: Arc<dyn PlanRepository>,
        sessions: Arc<dyn SessionRepository>,
        review_items: Arc<dyn ReviewItemRepository>,
        config: AppConfig,
    ) -> Self {
        Self {
            plans,
            sessions,
            review_items,
            config: Arc::new(config),
        }
    }

    /// State backed by empty in-memory repositories
    pub fn in_memory(config: AppConfig) -> Self {
        Self::new(
            Arc::new(InMemoryPlanRepository::new()),
            Arc::new(InMemorySessionRepository::new()),
            Arc::new(InMemoryReviewItemRepository::new()),
            config,
        )
    }

    /// Get a reference to the configuration
    #[inline]
    pub fn config(&self) -> &AppConfig {
        &self.config
    }
}
