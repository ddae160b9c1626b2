//! Shared keyword tagging pass.
//!
//! Every downstream decision (category, severity, temperature context,
//! example selection, function suggestions) consumes one `Signals` value
//! produced by a single scan of the lowercased input, so the keyword lists
//! cannot drift apart between classifiers.

use serde::{Deserialize, Serialize};

/// Keywords that always mean "stop joking and point at emergency care".
/// Checked first everywhere; a hit overrides every other signal.
pub const EMERGENCY_KEYWORDS: &[&str] = &[
    "chest pain",
    "heart attack",
    "can't breathe",
    "cant breathe",
    "difficulty breathing",
    "shortness of breath",
    "severe bleeding",
    "loss of consciousness",
    "unconscious",
    "stroke",
    "seizure",
    "overdose",
    "severe allergic reaction",
    "anaphylaxis",
    "choking",
];

/// Symptom words counted to detect multi-symptom presentations.
pub const SYMPTOM_WORDS: &[&str] = &[
    "headache", "pain", "tired", "fatigue", "nausea", "dizzy",
];

/// Conditions that call for the serious-medical tone (low temperature,
/// minimal roasting) without being emergencies.
pub const SERIOUS_KEYWORDS: &[&str] = &[
    "chronic pain",
    "depression",
    "anxiety",
    "medication",
    "prescription",
    "blood pressure",
    "diabetes",
    "cancer",
    "tumor",
    "infection",
];

/// Work-and-habits vocabulary that routes to the lifestyle template.
pub const LIFESTYLE_KEYWORDS: &[&str] = &[
    "work", "desk", "computer", "sitting", "stress", "sleep", "posture",
];

/// Health-improvement vocabulary that routes to the wellness template.
/// `exercis` is a stem so both "exercise" and "exercising" match.
pub const WELLNESS_KEYWORDS: &[&str] = &[
    "improve",
    "better",
    "healthy",
    "prevent",
    "optimize",
    "exercis",
    "diet",
    "nutrition",
    "weight loss",
    "fitness",
    "wellness",
];

const SEVERE_MARKERS: &[&str] = &["severe", "intense", "unbearable", "can't", "unable"];
const MILD_MARKERS: &[&str] = &["slight", "minor", "little", "sometimes"];
const DURATION_MARKERS: &[&str] = &["weeks", "months", "chronic"];
const INJURY_KEYWORDS: &[&str] = &[
    "twisted", "sprained", "injured", "fell", "running", "sports",
];

/// Symptom severity on the canonical scale.
///
/// Emergency keywords short-circuit to `Emergency` no matter what else is
/// in the text; this ordering is a safety policy, not an optimization.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Mild,
    Moderate,
    Severe,
    Emergency,
}

impl Severity {
    pub fn as_str(&self) -> &'static str {
        match self {
            Severity::Mild => "mild",
            Severity::Moderate => "moderate",
            Severity::Severe => "severe",
            Severity::Emergency => "emergency",
        }
    }
}

/// Typed result of the tagging pass.
#[derive(Debug, Clone, Default, Serialize)]
pub struct Signals {
    pub symptom_words: Vec<&'static str>,
    pub emergency: Vec<&'static str>,
    pub serious_medical: Vec<&'static str>,
    pub lifestyle: Vec<&'static str>,
    pub wellness: Vec<&'static str>,
    pub severe_markers: Vec<&'static str>,
    pub mild_markers: Vec<&'static str>,
    pub injury: bool,
    pub sleep: bool,
    pub medication: bool,
    pub weight: bool,
    pub long_duration: bool,
}

fn matches_in(text: &str, keywords: &[&'static str]) -> Vec<&'static str> {
    keywords
        .iter()
        .copied()
        .filter(|kw| text.contains(kw))
        .collect()
}

impl Signals {
    /// Scans the input once. Matching is naive substring containment on the
    /// lowercased text; absence of any match is a valid (default) outcome.
    pub fn scan(text: &str) -> Self {
        let lower = text.to_lowercase();
        Signals {
            symptom_words: matches_in(&lower, SYMPTOM_WORDS),
            emergency: matches_in(&lower, EMERGENCY_KEYWORDS),
            serious_medical: matches_in(&lower, SERIOUS_KEYWORDS),
            lifestyle: matches_in(&lower, LIFESTYLE_KEYWORDS),
            wellness: matches_in(&lower, WELLNESS_KEYWORDS),
            severe_markers: matches_in(&lower, SEVERE_MARKERS),
            mild_markers: matches_in(&lower, MILD_MARKERS),
            injury: INJURY_KEYWORDS.iter().any(|kw| lower.contains(kw)),
            sleep: lower.contains("sleep") || lower.contains("tired"),
            medication: lower.contains("medication") || lower.contains("drug"),
            weight: lower.contains("weight") || lower.contains("bmi"),
            long_duration: DURATION_MARKERS.iter().any(|kw| lower.contains(kw)),
        }
    }

    pub fn is_emergency(&self) -> bool {
        !self.emergency.is_empty()
    }

    pub fn symptom_count(&self) -> usize {
        self.symptom_words.len()
    }

    /// Canonical severity cascade. A mild marker keeps a lone symptom word
    /// at Mild; duration escalation only lifts Mild to Moderate. Neither
    /// ever competes with the emergency check.
    pub fn severity(&self) -> Severity {
        if self.is_emergency() {
            return Severity::Emergency;
        }
        if !self.severe_markers.is_empty() {
            return Severity::Severe;
        }
        if !self.symptom_words.is_empty() {
            if self.symptom_count() == 1 && !self.mild_markers.is_empty() && !self.long_duration {
                return Severity::Mild;
            }
            return Severity::Moderate;
        }
        if self.long_duration {
            return Severity::Moderate;
        }
        Severity::Mild
    }
}
