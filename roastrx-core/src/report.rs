use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// A single symptom complaint plus optional free-form context
/// (age, occupation, lifestyle, prior conditions). Created per request,
/// never persisted, immutable once built.
///
/// Context is kept in a `BTreeMap` so rendering the `key: value` pairs is
/// deterministic regardless of the order the caller supplied them.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SymptomReport {
    pub symptoms: String,
    #[serde(default)]
    pub user_context: BTreeMap<String, String>,
}

impl SymptomReport {
    pub fn new(symptoms: impl Into<String>) -> Self {
        SymptomReport {
            symptoms: symptoms.into(),
            user_context: BTreeMap::new(),
        }
    }

    pub fn with_context(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.user_context.insert(key.into(), value.into());
        self
    }

    /// Renders the context map as `key: value` pairs joined by commas, the
    /// form appended to every user prompt. Empty string when no context.
    pub fn context_line(&self) -> String {
        self.user_context
            .iter()
            .map(|(k, v)| format!("{}: {}", k, v))
            .collect::<Vec<_>>()
            .join(", ")
    }
}
