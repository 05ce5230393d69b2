//! Fixed-size chunking of a plan's unit range

use super::SchedulingConfig;
use serde::{Deserialize, Serialize};

/// A contiguous block of units with its average difficulty
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DifficultyChunk {
    /// 0-based position in the plan
    pub chunk_index: usize,
    /// 1-based, inclusive
    pub start_unit: u32,
    /// 1-based, inclusive
    pub end_unit: u32,
    pub average_difficulty: f64,
    pub is_hard: bool,
}

impl DifficultyChunk {
    pub fn units(&self) -> u32 {
        self.end_unit - self.start_unit + 1
    }
}

/// Split `[1, total_units]` into `ceil(total_units / chunk_size)` chunks
///
/// `difficulties[i]` is the difficulty of unit `i + 1`. A chunk whose slice
/// is missing from `difficulties` averages to 0. A zero chunk size yields
/// no chunks.
pub fn partition(
    total_units: u32,
    difficulties: &[f64],
    chunk_size: u32,
    threshold: f64,
) -> Vec<DifficultyChunk> {
    if chunk_size == 0 || total_units == 0 {
        return Vec::new();
    }

    let chunk_count = total_units.div_ceil(chunk_size);
    (0..chunk_count)
        .map(|i| {
            let start_unit = i * chunk_size + 1;
            let end_unit = total_units.min((i + 1) * chunk_size);

            let from = (start_unit as usize - 1).min(difficulties.len());
            let to = (end_unit as usize).min(difficulties.len());
            let slice = &difficulties[from..to];
            let average_difficulty = if slice.is_empty() {
                0.0
            } else {
                slice.iter().sum::<f64>() / slice.len() as f64
            };

            DifficultyChunk {
                chunk_index: i as usize,
                start_unit,
                end_unit,
                average_difficulty,
                is_hard: average_difficulty >= threshold,
            }
        })
        .collect()
}

/// Chunks at or above `threshold`
///
/// Pass the same threshold used for [`partition`] or the result will
/// disagree with each chunk's `is_hard` flag.
pub fn find_hard_chunks(chunks: &[DifficultyChunk], threshold: f64) -> Vec<&DifficultyChunk> {
    chunks
        .iter()
        .filter(|c| c.average_difficulty >= threshold)
        .collect()
}

/// Partitioner bound to one chunk size and threshold
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ChunkPartitioner {
    chunk_size: u32,
    threshold: f64,
}

impl ChunkPartitioner {
    pub fn new(chunk_size: u32, threshold: f64) -> Self {
        Self {
            chunk_size,
            threshold,
        }
    }

    pub fn from_config(config: &SchedulingConfig) -> Self {
        Self::new(config.chunk_size, config.hard_threshold)
    }

    pub fn chunk_size(&self) -> u32 {
        self.chunk_size
    }

    pub fn threshold(&self) -> f64 {
        self.threshold
    }

    pub fn partition(&self, total_units: u32, difficulties: &[f64]) -> Vec<DifficultyChunk> {
        partition(total_units, difficulties, self.chunk_size, self.threshold)
    }

    pub fn find_hard_chunks<'a>(&self, chunks: &'a [DifficultyChunk]) -> Vec<&'a DifficultyChunk> {
        find_hard_chunks(chunks, self.threshold)
    }
}

impl Default for ChunkPartitioner {
    fn default() -> Self {
        Self::from_config(&SchedulingConfig::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use rstest::rstest;

    #[test]
    fn test_last_chunk_is_short() {
        let chunks = partition(25, &[3.0; 25], 10, 3.5);
        let spans: Vec<(u32, u32)> = chunks.iter().map(|c| (c.start_unit, c.end_unit)).collect();
        assert_eq!(spans, vec![(1, 10), (11, 20), (21, 25)]);
        assert_eq!(chunks[2].units(), 5);
    }

    #[test]
    fn test_average_and_hard_flag() {
        let mut difficulties = vec![5.0; 10];
        difficulties.extend(vec![2.0; 10]);
        let chunks = partition(20, &difficulties, 10, 3.5);
        assert_eq!(chunks[0].average_difficulty, 5.0);
        assert!(chunks[0].is_hard);
        assert_eq!(chunks[1].average_difficulty, 2.0);
        assert!(!chunks[1].is_hard);
    }

    #[test]
    fn test_threshold_is_inclusive() {
        let chunks = partition(4, &[3.0, 4.0, 3.0, 4.0], 4, 3.5);
        assert!(chunks[0].is_hard);
    }

    #[test]
    fn test_missing_difficulties_average_to_zero() {
        let chunks = partition(20, &[4.0; 10], 10, 3.5);
        assert_eq!(chunks[1].average_difficulty, 0.0);
        assert!(!chunks[1].is_hard);
    }

    #[rstest]
    #[case(0, 10, 0)]
    #[case(10, 0, 0)]
    #[case(1, 10, 1)]
    #[case(10, 10, 1)]
    #[case(11, 10, 2)]
    #[case(100, 7, 15)]
    fn test_chunk_count(#[case] total: u32, #[case] size: u32, #[case] expected: usize) {
        let difficulties = vec![3.0; total as usize];
        assert_eq!(partition(total, &difficulties, size, 3.5).len(), expected);
    }

    #[test]
    fn test_find_hard_chunks() {
        let difficulties: Vec<f64> = (0..30).map(|i| if i < 10 || i >= 20 { 4.0 } else { 1.0 }).collect();
        let partitioner = ChunkPartitioner::default();
        let chunks = partitioner.partition(30, &difficulties);
        let hard: Vec<usize> = partitioner
            .find_hard_chunks(&chunks)
            .iter()
            .map(|c| c.chunk_index)
            .collect();
        assert_eq!(hard, vec![0, 2]);
        assert!(find_hard_chunks(&chunks, 5.0).is_empty());
    }

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(100))]

        /// Property: chunks tile [1, total] with sequential 0-based indices
        #[test]
        fn prop_chunks_tile_range(total in 1u32..1000, size in 1u32..50) {
            let difficulties = vec![3.0; total as usize];
            let chunks = partition(total, &difficulties, size, 3.5);

            prop_assert_eq!(chunks.first().map(|c| c.start_unit), Some(1));
            prop_assert_eq!(chunks.last().map(|c| c.end_unit), Some(total));
            for (i, chunk) in chunks.iter().enumerate() {
                prop_assert_eq!(chunk.chunk_index, i);
                prop_assert!(chunk.start_unit <= chunk.end_unit);
                prop_assert!(chunk.units() <= size);
                if i > 0 {
                    prop_assert_eq!(chunk.start_unit, chunks[i - 1].end_unit + 1);
                }
            }
        }
    }
}
