//! Multi-round study scheduling
//!
//! Session history flows through these stages:
//!
//! 1. [`difficulty`]: per-unit difficulty profile from round-1 sessions
//! 2. [`chunks`]: fixed-size chunks with an average difficulty and hard flag
//! 3. [`rounds`]: round tasks, full range first, then hard chunks first
//! 4. [`daily`]: today's slice of the remaining rounds

pub mod chunks;
pub mod daily;
pub mod difficulty;
pub mod rounds;

pub use chunks::{find_hard_chunks, partition, ChunkPartitioner, DifficultyChunk};
pub use daily::plan_daily_tasks;
pub use difficulty::{extract_difficulties, DifficultyProfile};
pub use rounds::{generate_round_tasks, order_hard_first, round_advice, RoundTask};

use serde::{Deserialize, Serialize};

/// Tuning for chunking and difficulty classification
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SchedulingConfig {
    /// Units per chunk (default 10)
    pub chunk_size: u32,
    /// Average difficulty at or above which a chunk counts as hard (default 3.5)
    pub hard_threshold: f64,
    /// Difficulty assumed for units no session has covered (default 3.0)
    pub default_difficulty: f64,
}

impl Default for SchedulingConfig {
    fn default() -> Self {
        Self {
            chunk_size: 10,
            hard_threshold: 3.5,
            default_difficulty: 3.0,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = SchedulingConfig::default();
        assert_eq!(config.chunk_size, 10);
        assert_eq!(config.hard_threshold, 3.5);
        assert_eq!(config.default_difficulty, 3.0);
    }

    #[test]
    fn test_partial_config_fills_defaults() {
        let config: SchedulingConfig = serde_json::from_str(r#"{"chunk_size": 5}"#).unwrap();
        assert_eq!(config.chunk_size, 5);
        assert_eq!(config.hard_threshold, 3.5);
    }
}
