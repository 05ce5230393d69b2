//! Per-unit difficulty extracted from session history
//!
//! Round-1 sessions are replayed in date order. Each session covers the next
//! `units_completed` units after the previous one, so coverage is a running
//! cursor over the plan. Sessions are assumed not to overlap in the units
//! they cover; overlapping or out-of-order logs are not detected and simply
//! shift the cursor. Coverage past the plan's last unit is dropped.

use super::SchedulingConfig;
use crate::models::StudySession;
use serde::{Deserialize, Serialize};

/// Difficulty of every unit in a plan, index 0 = unit 1
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DifficultyProfile {
    values: Vec<f64>,
}

impl DifficultyProfile {
    /// Every unit at the same difficulty
    pub fn flat(total_units: u32, difficulty: f64) -> Self {
        Self {
            values: vec![difficulty; total_units as usize],
        }
    }

    /// Profile from round-1 sessions, uncovered units at the configured default
    pub fn from_sessions(
        total_units: u32,
        sessions: &[StudySession],
        config: &SchedulingConfig,
    ) -> Self {
        Self {
            values: extract_difficulties(total_units, sessions, config.default_difficulty),
        }
    }

    pub fn from_values(values: Vec<f64>) -> Self {
        Self { values }
    }

    pub fn as_slice(&self) -> &[f64] {
        &self.values
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Difficulty of a 1-based unit
    pub fn get(&self, unit: u32) -> Option<f64> {
        unit.checked_sub(1)
            .and_then(|i| self.values.get(i as usize))
            .copied()
    }
}

/// Average difficulty per unit across round-1 sessions
///
/// Returns `total_units` values; units no session reached get
/// `default_difficulty`.
pub fn extract_difficulties(
    total_units: u32,
    sessions: &[StudySession],
    default_difficulty: f64,
) -> Vec<f64> {
    let total = total_units as usize;
    let mut sums = vec![0.0; total];
    let mut hits = vec![0u32; total];

    let mut first_round: Vec<&StudySession> = sessions.iter().filter(|s| s.round == 1).collect();
    first_round.sort_by_key(|s| s.date);

    let mut cursor = 0usize;
    for session in first_round {
        let start = cursor.min(total);
        let end = (cursor + session.units_completed as usize).min(total);
        for unit in start..end {
            sums[unit] += session.difficulty as f64;
            hits[unit] += 1;
        }
        cursor += session.units_completed as usize;
    }

    sums.iter()
        .zip(&hits)
        .map(|(&sum, &count)| {
            if count > 0 {
                sum / count as f64
            } else {
                default_difficulty
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, TimeZone, Utc};
    use proptest::prelude::*;
    use uuid::Uuid;

    fn session(day: i64, units: u32, difficulty: u8, round: u32) -> StudySession {
        StudySession {
            id: Uuid::new_v4(),
            user_id: Uuid::nil(),
            plan_id: Uuid::nil(),
            date: Utc.with_ymd_and_hms(2024, 4, 1, 10, 0, 0).unwrap() + Duration::days(day),
            units_completed: units,
            duration_minutes: 30,
            concentration: 0.8,
            difficulty,
            round,
            version: 0,
        }
    }

    #[test]
    fn test_half_covered_plan() {
        let difficulties = extract_difficulties(100, &[session(0, 50, 5, 1)], 3.0);
        assert_eq!(difficulties.len(), 100);
        assert!(difficulties[..50].iter().all(|&d| d == 5.0));
        assert!(difficulties[50..].iter().all(|&d| d == 3.0));
    }

    #[test]
    fn test_sessions_replayed_in_date_order() {
        // Logged out of order: the day-0 session must cover units 1-3
        let sessions = vec![session(1, 2, 1, 1), session(0, 3, 5, 1)];
        let difficulties = extract_difficulties(6, &sessions, 3.0);
        assert_eq!(difficulties, vec![5.0, 5.0, 5.0, 1.0, 1.0, 3.0]);
    }

    #[test]
    fn test_later_rounds_ignored() {
        let sessions = vec![session(0, 4, 2, 1), session(1, 10, 5, 2)];
        let difficulties = extract_difficulties(10, &sessions, 3.0);
        assert_eq!(&difficulties[..4], &[2.0; 4]);
        assert_eq!(&difficulties[4..], &[3.0; 6]);
    }

    #[test]
    fn test_coverage_clipped_to_total() {
        let sessions = vec![session(0, 8, 4, 1), session(1, 8, 2, 1)];
        let difficulties = extract_difficulties(10, &sessions, 3.0);
        assert_eq!(difficulties.len(), 10);
        assert_eq!(&difficulties[..8], &[4.0; 8]);
        assert_eq!(&difficulties[8..], &[2.0; 2]);
    }

    #[test]
    fn test_zero_units_is_empty() {
        assert!(extract_difficulties(0, &[session(0, 5, 5, 1)], 3.0).is_empty());
    }

    #[test]
    fn test_profile_accessors() {
        let config = SchedulingConfig::default();
        let profile = DifficultyProfile::from_sessions(20, &[session(0, 10, 4, 1)], &config);
        assert_eq!(profile.len(), 20);
        assert_eq!(profile.get(1), Some(4.0));
        assert_eq!(profile.get(11), Some(3.0));
        assert_eq!(profile.get(0), None);
        assert_eq!(profile.get(21), None);
        assert_eq!(DifficultyProfile::flat(3, 3.0).as_slice(), &[3.0, 3.0, 3.0]);
    }

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(100))]

        /// Property: covered units carry their session's difficulty, the rest the default
        #[test]
        fn prop_coverage_matches_sessions(
            total in 1u32..300,
            specs in prop::collection::vec((0u32..40, 1u8..=5), 0..10)
        ) {
            let mut budget = total;
            let mut sessions = Vec::new();
            for (day, (units, difficulty)) in specs.into_iter().enumerate() {
                let units = units.min(budget);
                budget -= units;
                sessions.push(session(day as i64, units, difficulty, 1));
            }

            let difficulties = extract_difficulties(total, &sessions, 3.0);
            prop_assert_eq!(difficulties.len(), total as usize);

            let mut expected = vec![3.0; total as usize];
            let mut cursor = 0usize;
            for s in &sessions {
                for slot in expected.iter_mut().skip(cursor).take(s.units_completed as usize) {
                    *slot = s.difficulty as f64;
                }
                cursor += s.units_completed as usize;
            }
            prop_assert_eq!(difficulties, expected);
        }
    }
}
