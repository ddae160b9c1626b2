//! Structured response schema and the best-effort post-processor that
//! extracts it from free-text model output.

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::ParseError;

/// Default disclaimer attached when the model omits one.
pub const MEDICAL_DISCLAIMER: &str =
    "This is for entertainment purposes only. Always consult a healthcare professional for medical concerns.";

/// Severity scale of the response schema (distinct wording from the
/// heuristic scale: this one is what the model is instructed to emit).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SeverityLevel {
    Low,
    Moderate,
    High,
    Urgent,
}

impl SeverityLevel {
    pub fn as_str(&self) -> &'static str {
        match self {
            SeverityLevel::Low => "low",
            SeverityLevel::Moderate => "moderate",
            SeverityLevel::High => "high",
            SeverityLevel::Urgent => "urgent",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ResponseType {
    RoastAndAdvice,
    SeriousConcern,
    WellnessTip,
    EmergencyRedirect,
}

/// The canonical response shape consumed by the HTTP handler.
///
/// One of these is always produced per request, even on model failure; the
/// degraded path goes through [`StructuredResponse::parse_fallback`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StructuredResponse {
    pub roast: String,
    pub diagnosis: String,
    pub advice: String,
    pub severity: SeverityLevel,
    pub response_type: ResponseType,
    pub confidence_score: f64,
    pub tags: BTreeSet<String>,
    #[serde(default = "default_disclaimer")]
    pub medical_disclaimer: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub follow_up_questions: Option<Vec<String>>,
}

fn default_disclaimer() -> String {
    MEDICAL_DISCLAIMER.to_string()
}

const REQUIRED_FIELDS: &[&str] = &[
    "roast",
    "diagnosis",
    "advice",
    "severity",
    "response_type",
    "confidence_score",
    "tags",
];

impl StructuredResponse {
    /// The static fallback used when the model output could not be parsed.
    /// Flagged with the `parse_failure` tag so callers and dashboards can
    /// tell it apart from a real answer.
    pub fn parse_fallback() -> Self {
        StructuredResponse {
            roast: "Oops! My roast circuits are having a moment - but I'm still here to help!"
                .to_string(),
            diagnosis: "I'm having trouble processing your symptoms in my usual witty way."
                .to_string(),
            advice: "Please try rephrasing your symptoms and I'll give you a proper response. \
                     If this persists, consult a healthcare professional."
                .to_string(),
            severity: SeverityLevel::Low,
            response_type: ResponseType::RoastAndAdvice,
            confidence_score: 0.1,
            tags: BTreeSet::from(["parse_failure".to_string(), "fallback".to_string()]),
            medical_disclaimer: MEDICAL_DISCLAIMER.to_string(),
            follow_up_questions: Some(vec![
                "Could you describe your symptoms differently?".to_string(),
            ]),
        }
    }
}

/// Extracts the JSON object embedded in model output: everything from the
/// first `{` to the last `}` inclusive.
fn extract_json(output: &str) -> Result<&str, ParseError> {
    let start = output.find('{').ok_or(ParseError::NoJsonObject)?;
    let end = output.rfind('}').ok_or(ParseError::NoJsonObject)?;
    if end <= start {
        return Err(ParseError::NoJsonObject);
    }
    Ok(&output[start..=end])
}

/// Best-effort strict parse of model output into the canonical schema.
///
/// Checks required-field presence before deserializing so the error names
/// the field instead of pointing at a serde offset, validates enum
/// membership via serde, and clamps `confidence_score` into [0, 1].
/// Returns `Err` on any shape problem; never panics, never fabricates a
/// response. The caller chooses the fallback.
pub fn parse_structured(output: &str) -> Result<StructuredResponse, ParseError> {
    let slice = extract_json(output)?;
    let value: serde_json::Value = serde_json::from_str(slice)?;

    for field in REQUIRED_FIELDS {
        if value.get(field).is_none() {
            return Err(ParseError::MissingField(field));
        }
    }

    let mut response: StructuredResponse = serde_json::from_value(value)?;
    response.confidence_score = response.confidence_score.clamp(0.0, 1.0);
    debug!(
        severity = response.severity.as_str(),
        tags = response.tags.len(),
        "parsed structured model response"
    );
    Ok(response)
}
