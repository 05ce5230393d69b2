//! Configuration management for the study planner
//!
//! Configuration is loaded hierarchically:
//! 1. Default values (in code)
//! 2. TOML config files (config/development.toml or config/production.toml)
//! 3. Environment variables (prefix: SP__)

use anyhow::Result;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::env;
use study_planner_shared::validation::MAX_DIFFICULTY_RATING;
use study_planner_shared::{AnalysisConfig, ReviewConfig, SchedulingConfig};

/// Application configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    #[serde(default)]
    pub scheduling: SchedulingConfig,
    #[serde(default)]
    pub analysis: AnalysisConfig,
    #[serde(default)]
    pub review: ReviewConfig,
    pub planner: PlannerConfig,
}

/// Daily planning job configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PlannerConfig {
    /// JSON snapshot of plans, sessions and review items
    pub snapshot_path: String,
    /// Daily workload above which a plan is reported as overloaded
    pub max_daily_minutes: f64,
    /// Fixed planning date; the current UTC date when unset
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub today: Option<NaiveDate>,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            scheduling: SchedulingConfig::default(),
            analysis: AnalysisConfig::default(),
            review: ReviewConfig::default(),
            planner: PlannerConfig {
                snapshot_path: "data/snapshot.json".to_string(),
                max_daily_minutes: 240.0, // 4 hours
                today: None,
            },
        }
    }
}

impl AppConfig {
    /// Load configuration from files and environment
    ///
    /// Loading order (later sources override earlier):
    /// 1. Default values
    /// 2. Config file based on RUST_ENV (development.toml or production.toml)
    /// 3. Environment variables with SP__ prefix
    pub fn load() -> Result<Self> {
        let env = env::var("RUST_ENV").unwrap_or_else(|_| "development".to_string());
        let config_file = format!("config/{}.toml", env);

        let config = config::Config::builder()
            // Start with defaults
            .add_source(config::Config::try_from(&AppConfig::default())?)
            // Load from environment-specific config file
            .add_source(config::File::with_name(&config_file).required(false))
            // Override with environment variables (SP__ prefix)
            // e.g., SP__SCHEDULING__CHUNK_SIZE=20 sets scheduling.chunk_size
            .add_source(config::Environment::with_prefix("SP").separator("__"))
            .build()?;

        Ok(config.try_deserialize()?)
    }

    /// Check if running in production mode
    pub fn is_production() -> bool {
        env::var("RUST_ENV")
            .map(|v| v == "production")
            .unwrap_or(false)
    }

    /// Reject settings the planning engine cannot work with
    pub fn validate(&self) -> Result<()> {
        let mut errors = Vec::new();
        let scheduling = &self.scheduling;
        let max = MAX_DIFFICULTY_RATING as f64;

        if scheduling.chunk_size == 0 {
            errors.push("scheduling.chunk_size must be greater than 0".to_string());
        }
        if !(1.0..=max).contains(&scheduling.hard_threshold) {
            errors.push(format!(
                "scheduling.hard_threshold must be between 1 and {}",
                MAX_DIFFICULTY_RATING
            ));
        }
        if !(1.0..=max).contains(&scheduling.default_difficulty) {
            errors.push(format!(
                "scheduling.default_difficulty must be between 1 and {}",
                MAX_DIFFICULTY_RATING
            ));
        }
        if !(self.analysis.at_risk_ratio > 0.0 && self.analysis.at_risk_ratio <= 1.0) {
            errors.push("analysis.at_risk_ratio must be in (0, 1]".to_string());
        }
        if self.review.legacy_interval_days < 1 {
            errors.push("review.legacy_interval_days must be at least 1".to_string());
        }
        if self.planner.max_daily_minutes <= 0.0 {
            errors.push("planner.max_daily_minutes must be positive".to_string());
        }

        if !errors.is_empty() {
            anyhow::bail!("Invalid configuration: {}", errors.join("; "));
        }
        Ok(())
    }
}
