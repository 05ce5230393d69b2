//! Input validation functions
//!
//! This module provides validation utilities for study data.
//! Uses both custom validators and the `validator` crate for derive macros.

use serde::{Deserialize, Serialize};

/// Upper bound of the 1-5 difficulty rating scale
pub const MAX_DIFFICULTY_RATING: u8 = 5;

/// Validate a concentration score (0.0 - 1.0)
pub fn validate_concentration(concentration: f64) -> Result<(), String> {
    if concentration.is_nan() || concentration.is_infinite() {
        return Err("Concentration must be a valid number".to_string());
    }
    if !(0.0..=1.0).contains(&concentration) {
        return Err("Concentration must be between 0 and 1".to_string());
    }
    Ok(())
}

/// Validate a difficulty rating on the 1-5 scale
pub fn validate_difficulty_rating(difficulty: u8) -> Result<(), String> {
    if !(1..=MAX_DIFFICULTY_RATING).contains(&difficulty) {
        return Err(format!(
            "Difficulty must be between 1 and {}",
            MAX_DIFFICULTY_RATING
        ));
    }
    Ok(())
}

/// Validate a duration in minutes
pub fn validate_duration_minutes(minutes: f64) -> Result<(), String> {
    if minutes.is_nan() || minutes.is_infinite() {
        return Err("Duration must be a valid number".to_string());
    }
    if minutes < 0.0 {
        return Err("Duration cannot be negative".to_string());
    }
    Ok(())
}

/// Validate a 1-based inclusive unit span
pub fn validate_unit_span(start_unit: u32, end_unit: u32) -> Result<(), String> {
    if start_unit == 0 {
        return Err("Start unit must be at least 1".to_string());
    }
    if end_unit < start_unit {
        return Err("End unit cannot precede start unit".to_string());
    }
    Ok(())
}

/// Validate study weekdays (1 = Monday .. 7 = Sunday)
pub fn validate_study_days(days: &[u8]) -> Result<(), String> {
    if let Some(day) = days.iter().find(|d| !(1..=7).contains(*d)) {
        return Err(format!(
            "Invalid study day {}. Must be between 1 (Mon) and 7 (Sun)",
            day
        ));
    }
    Ok(())
}

/// Validate a spaced-repetition recall score (0-5)
pub fn validate_review_quality(quality: u8) -> Result<(), String> {
    if quality > 5 {
        return Err("Review quality must be between 0 and 5".to_string());
    }
    Ok(())
}

// ============================================================================
// User-Friendly Field Labels
// ============================================================================

/// Map technical field names to user-friendly display labels
pub fn get_field_display_label(field_name: &str) -> &str {
    match field_name {
        "total_units" => "Total Units",
        "unit_label" => "Unit Label",
        "unit_range" => "Unit Range",
        "deadline" => "Deadline",
        "target_rounds" => "Target Rounds",
        "estimated_time_per_unit" => "Time per Unit",
        "study_days" => "Study Days",
        "units_completed" => "Units Completed",
        "duration_minutes" => "Duration",
        "concentration" => "Concentration",
        "difficulty" => "Difficulty",
        "round" => "Round",
        "start_unit" => "Start Unit",
        "end_unit" => "End Unit",
        "units" => "Units",
        "estimated_duration" => "Estimated Duration",
        "completed" => "Completed",
        "total" => "Total",
        "date_range" => "Date Range",
        "quality" => "Review Quality",
        _ => field_name,
    }
}

/// Convert a list of technical field names to user-friendly labels
pub fn get_missing_fields_labels(fields: &[String]) -> Vec<String> {
    fields
        .iter()
        .map(|f| get_field_display_label(f).to_string())
        .collect()
}

/// Validation error with field context
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ValidationError {
    pub field: String,
    pub message: String,
    pub display_label: String,
}

impl ValidationError {
    pub fn new(field: &str, message: &str) -> Self {
        Self {
            field: field.to_string(),
            message: message.to_string(),
            display_label: get_field_display_label(field).to_string(),
        }
    }

    /// Format as user-friendly error message
    pub fn user_message(&self) -> String {
        format!("{}: {}", self.display_label, self.message)
    }
}

/// Attach a field name to a plain validator result
pub fn on_field(field: &str, result: Result<(), String>) -> Result<(), ValidationError> {
    result.map_err(|message| ValidationError::new(field, &message))
}
