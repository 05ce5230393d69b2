//! Study Planner WASM Module
//!
//! WebAssembly bindings for the planning engine so the client can preview
//! schedules offline. Inputs and outputs are JSON strings; errors surface
//! as JavaScript exceptions carrying the message.

use serde::Serialize;
use study_planner_shared::scheduling::{self, DifficultyProfile, SchedulingConfig};
use study_planner_shared::StudySession;
use wasm_bindgen::prelude::*;

fn to_json<T: Serialize>(value: &T) -> Result<String, String> {
    serde_json::to_string(value).map_err(|e| e.to_string())
}

fn extract_difficulties_json(total_units: u32, sessions_json: &str) -> Result<String, String> {
    let sessions: Vec<StudySession> =
        serde_json::from_str(sessions_json).map_err(|e| format!("Invalid sessions: {}", e))?;
    let config = SchedulingConfig::default();
    to_json(&scheduling::extract_difficulties(
        total_units,
        &sessions,
        config.default_difficulty,
    ))
}

fn partition_chunks_json(
    total_units: u32,
    difficulties: &[f64],
    chunk_size: u32,
    threshold: f64,
) -> Result<String, String> {
    to_json(&scheduling::partition(total_units, difficulties, chunk_size, threshold))
}

fn generate_round_tasks_json(
    total_units: u32,
    target_rounds: u32,
    difficulties: &[f64],
) -> Result<String, String> {
    let config = SchedulingConfig::default();
    // No history yet: every unit at the default difficulty
    let profile = if difficulties.is_empty() {
        DifficultyProfile::flat(total_units, config.default_difficulty)
    } else {
        DifficultyProfile::from_values(difficulties.to_vec())
    };
    to_json(&scheduling::generate_round_tasks(
        total_units,
        target_rounds,
        &profile,
        &config,
    ))
}

/// Per-unit difficulty from a JSON array of sessions
#[wasm_bindgen]
pub fn extract_difficulties(total_units: u32, sessions_json: &str) -> Result<String, JsValue> {
    extract_difficulties_json(total_units, sessions_json).map_err(|e| JsValue::from_str(&e))
}

/// Fixed-size chunks with their average difficulty and hard flag
#[wasm_bindgen]
pub fn partition_chunks(
    total_units: u32,
    difficulties: &[f64],
    chunk_size: u32,
    threshold: f64,
) -> Result<String, JsValue> {
    partition_chunks_json(total_units, difficulties, chunk_size, threshold)
        .map_err(|e| JsValue::from_str(&e))
}

/// Round tasks for every target round; pass an empty profile for a flat default
#[wasm_bindgen]
pub fn generate_round_tasks(
    total_units: u32,
    target_rounds: u32,
    difficulties: &[f64],
) -> Result<String, JsValue> {
    generate_round_tasks_json(total_units, target_rounds, difficulties)
        .map_err(|e| JsValue::from_str(&e))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::Value;

    #[test]
    fn test_extract_difficulties_from_json() {
        let sessions = r#"[{
            "id": "6f1c7a52-3d1e-4c55-9a51-0f3f5d6b1a01",
            "user_id": "6f1c7a52-3d1e-4c55-9a51-0f3f5d6b1a02",
            "plan_id": "6f1c7a52-3d1e-4c55-9a51-0f3f5d6b1a03",
            "date": "2024-05-01T10:00:00Z",
            "units_completed": 2,
            "duration_minutes": 20,
            "concentration": 0.9,
            "difficulty": 5,
            "round": 1
        }]"#;
        let json = extract_difficulties_json(4, sessions).unwrap();
        let values: Vec<f64> = serde_json::from_str(&json).unwrap();
        assert_eq!(values, vec![5.0, 5.0, 3.0, 3.0]);
    }

    #[test]
    fn test_invalid_sessions_json() {
        let err = extract_difficulties_json(4, "not json").unwrap_err();
        assert!(err.starts_with("Invalid sessions"));
    }

    #[test]
    fn test_partition_chunks_json() {
        let json = partition_chunks_json(15, &[4.0; 15], 10, 3.5).unwrap();
        let chunks: Value = serde_json::from_str(&json).unwrap();
        assert_eq!(chunks.as_array().unwrap().len(), 2);
        assert_eq!(chunks[1]["start_unit"], 11);
        assert_eq!(chunks[1]["is_hard"], true);
    }

    #[test]
    fn test_round_tasks_default_to_flat_profile() {
        let json = generate_round_tasks_json(20, 2, &[]).unwrap();
        let tasks: Value = serde_json::from_str(&json).unwrap();
        let tasks = tasks.as_array().unwrap();
        assert_eq!(tasks.len(), 3);
        assert!(tasks.iter().all(|t| t["prioritized"] == false));
        assert_eq!(tasks[1]["advice"], "Round 2: regular review");
    }
}
