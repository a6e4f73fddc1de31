#![warn(missing_docs)]
//! # meal-lens-analysis-contract
//!
//! ## Purpose
//! Defines the analysis service response schema and client-side display
//! mapping helpers.
//!
//! ## Responsibilities
//! - Parse success response payloads into [`NutritionReport`].
//! - Project nullable nutrition fields into display-safe slot strings.
//! - Extract the server-supplied message from rejection bodies with a fixed
//!   fallback.
//!
//! ## Data flow
//! Raw JSON response -> [`parse_nutrition_response`] -> [`map_display_slots`]
//! -> results panel rendering. Non-2xx bodies go through
//! [`rejection_message`] instead.
//!
//! ## Ownership and lifetimes
//! Parsed values are owned structs to avoid borrowing from transient network
//! buffers.
//!
//! ## Error model
//! Invalid JSON in a success body returns [`AnalysisContractError`];
//! rejection-body parsing never fails and always yields a message string.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Rendered value for a null or absent nutrition field.
pub const DISPLAY_PLACEHOLDER: &str = "-";

/// Fallback message when a rejection body carries no usable `error` field.
pub const REJECTION_FALLBACK: &str = "Failed to analyze image";

/// Parsed analysis response for one submitted image.
///
/// Each field is a number or null; an absent field reads as null. A new
/// successful response replaces the previous report wholesale.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct NutritionReport {
    /// Estimated energy in kilocalories.
    #[serde(default)]
    pub calories: Option<f64>,
    /// Estimated protein in grams.
    #[serde(default)]
    pub protein_g: Option<f64>,
    /// Estimated carbohydrates in grams.
    #[serde(default)]
    pub carbs_g: Option<f64>,
    /// Estimated fat in grams.
    #[serde(default)]
    pub fat_g: Option<f64>,
}

/// Display strings for the four results panel slots.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NutritionSlots {
    /// Calories slot text.
    pub calories: String,
    /// Protein slot text.
    pub protein_g: String,
    /// Carbohydrates slot text.
    pub carbs_g: String,
    /// Fat slot text.
    pub fat_g: String,
}

impl Default for NutritionSlots {
    fn default() -> Self {
        Self {
            calories: DISPLAY_PLACEHOLDER.to_string(),
            protein_g: DISPLAY_PLACEHOLDER.to_string(),
            carbs_g: DISPLAY_PLACEHOLDER.to_string(),
            fat_g: DISPLAY_PLACEHOLDER.to_string(),
        }
    }
}

/// Shape of a rejection body; every field is optional.
#[derive(Debug, Clone, Deserialize)]
struct RejectionBody {
    #[serde(default)]
    error: Option<String>,
}

/// Parses a success response body into a validated report.
///
/// # Errors
/// Returns [`AnalysisContractError::Decode`] for invalid JSON or mistyped
/// fields.
pub fn parse_nutrition_response(raw: &str) -> Result<NutritionReport, AnalysisContractError> {
    serde_json::from_str(raw).map_err(AnalysisContractError::Decode)
}

/// Maps a report into the four display slot strings.
///
/// Null fields render as [`DISPLAY_PLACEHOLDER`]; numbers render in shortest
/// form (`250`, `20.5`), matching how the service's numeric values are shown.
pub fn map_display_slots(report: &NutritionReport) -> NutritionSlots {
    NutritionSlots {
        calories: format_field(report.calories),
        protein_g: format_field(report.protein_g),
        carbs_g: format_field(report.carbs_g),
        fat_g: format_field(report.fat_g),
    }
}

/// Extracts the user-visible message from a rejection body.
///
/// # Semantics
/// Returns the `error` field when present and non-empty; otherwise returns
/// [`REJECTION_FALLBACK`]. Unparseable bodies also fall back, so this never
/// fails.
pub fn rejection_message(raw: &str) -> String {
    let parsed: Option<RejectionBody> = serde_json::from_str(raw).ok();
    match parsed.and_then(|body| body.error) {
        Some(message) if !message.is_empty() => message,
        _ => REJECTION_FALLBACK.to_string(),
    }
}

fn format_field(value: Option<f64>) -> String {
    match value {
        Some(amount) => format!("{amount}"),
        None => DISPLAY_PLACEHOLDER.to_string(),
    }
}

/// Analysis contract errors.
#[derive(Debug, Error)]
pub enum AnalysisContractError {
    /// JSON decode failure on a success body.
    #[error("analysis decode failure: {0}")]
    Decode(#[from] serde_json::Error),
}

#[cfg(test)]
mod tests {
    //! Unit tests for response parsing and display mapping.

    use super::*;

    #[test]
    fn absent_fields_read_as_null() {
        let report = parse_nutrition_response(r#"{"calories": 120}"#).expect("should parse");
        assert_eq!(report.calories, Some(120.0));
        assert_eq!(report.protein_g, None);
    }

    #[test]
    fn slots_render_shortest_numeric_form() {
        let report = NutritionReport {
            calories: Some(250.0),
            protein_g: Some(20.5),
            carbs_g: None,
            fat_g: Some(0.0),
        };

        let slots = map_display_slots(&report);
        assert_eq!(slots.calories, "250");
        assert_eq!(slots.protein_g, "20.5");
        assert_eq!(slots.carbs_g, "-");
        assert_eq!(slots.fat_g, "0");
    }

    #[test]
    fn rejection_message_prefers_server_text() {
        assert_eq!(rejection_message(r#"{"error":"bad image"}"#), "bad image");
        assert_eq!(rejection_message(r#"{"error":""}"#), REJECTION_FALLBACK);
        assert_eq!(rejection_message(r#"{"detail":"x"}"#), REJECTION_FALLBACK);
        assert_eq!(rejection_message("<html>502</html>"), REJECTION_FALLBACK);
    }
}
