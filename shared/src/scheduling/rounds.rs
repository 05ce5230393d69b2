//! Round task generation
//!
//! Round 1 always walks the whole plan once. Every later round walks the
//! plan chunk by chunk with hard chunks moved to the front. The difficulty
//! profile is a required input: with a flat profile at the default
//! difficulty no chunk reaches the hard threshold and later rounds simply
//! keep the original order.

use super::chunks::{ChunkPartitioner, DifficultyChunk};
use super::difficulty::DifficultyProfile;
use super::SchedulingConfig;
use serde::{Deserialize, Serialize};

/// One step of a round, before it is assigned to a day
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RoundTask {
    pub round: u32,
    /// Source chunk; `None` for the round-1 full pass
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub chunk_index: Option<usize>,
    pub start_unit: u32,
    pub end_unit: u32,
    /// Hard chunk scheduled ahead of the rest
    pub prioritized: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub advice: Option<String>,
}

impl RoundTask {
    pub fn units(&self) -> u32 {
        self.end_unit - self.start_unit + 1
    }
}

/// Advice attached to every task of a repeat round
pub fn round_advice(round: u32, prioritized: bool) -> String {
    if prioritized {
        format!("Round {}: prioritized review of difficult material", round)
    } else {
        format!("Round {}: regular review", round)
    }
}

/// Hard chunks first, then the rest, each group in original order
pub fn order_hard_first(chunks: &[DifficultyChunk]) -> Vec<&DifficultyChunk> {
    let (hard, regular): (Vec<_>, Vec<_>) = chunks.iter().partition(|c| c.is_hard);
    hard.into_iter().chain(regular).collect()
}

/// Ordered tasks for every round up to `target_rounds`
///
/// `profile` should come from [`DifficultyProfile::from_sessions`]; use
/// [`DifficultyProfile::flat`] only when no history exists yet.
pub fn generate_round_tasks(
    total_units: u32,
    target_rounds: u32,
    profile: &DifficultyProfile,
    config: &SchedulingConfig,
) -> Vec<RoundTask> {
    if total_units == 0 || target_rounds == 0 {
        return Vec::new();
    }

    let mut tasks = vec![RoundTask {
        round: 1,
        chunk_index: None,
        start_unit: 1,
        end_unit: total_units,
        prioritized: false,
        advice: None,
    }];

    if target_rounds > 1 {
        let partitioner = ChunkPartitioner::from_config(config);
        let chunks = partitioner.partition(total_units, profile.as_slice());
        let ordered = order_hard_first(&chunks);

        for round in 2..=target_rounds {
            tasks.extend(ordered.iter().map(|chunk| RoundTask {
                round,
                chunk_index: Some(chunk.chunk_index),
                start_unit: chunk.start_unit,
                end_unit: chunk.end_unit,
                prioritized: chunk.is_hard,
                advice: Some(round_advice(round, chunk.is_hard)),
            }));
        }
    }

    tasks
}
