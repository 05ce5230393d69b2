//! JSON snapshot input for the daily planning job

use crate::state::AppState;
use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;
use study_planner_shared::{ReviewItem, StudyPlan, StudySession};
use tracing::info;

/// Everything the job plans over
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Snapshot {
    #[serde(default)]
    pub plans: Vec<StudyPlan>,
    #[serde(default)]
    pub sessions: Vec<StudySession>,
    #[serde(default)]
    pub review_items: Vec<ReviewItem>,
}

impl Snapshot {
    pub fn from_json(json: &str) -> Result<Self> {
        serde_json::from_str(json).context("Invalid snapshot JSON")
    }

    pub async fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let json = tokio::fs::read_to_string(path)
            .await
            .with_context(|| format!("Failed to read snapshot {}", path.display()))?;
        Self::from_json(&json)
    }

    /// Copy every entity into the state's repositories
    pub async fn seed(self, state: &AppState) -> Result<()> {
        info!(
            plans = self.plans.len(),
            sessions = self.sessions.len(),
            review_items = self.review_items.len(),
            "Seeding repositories"
        );
        for plan in self.plans {
            state.plans.create(plan).await?;
        }
        for session in self.sessions {
            state.sessions.create(session).await?;
        }
        for item in self.review_items {
            state.review_items.create(item).await?;
        }
        Ok(())
    }
}
