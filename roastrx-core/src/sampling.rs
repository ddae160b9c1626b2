use serde::{Deserialize, Serialize};

/// Sampling parameters handed to the model invoker.
///
/// Constructors clamp rather than reject: a slightly out-of-range override
/// from the environment should degrade to the nearest legal value, not take
/// the process down.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SamplingConfig {
    /// Creative latitude, [0, 1]. Low for emergencies, high for humor.
    pub temperature: f32,
    /// Nucleus sampling cutoff, (0, 1].
    pub top_p: f32,
    /// Top-k cutoff; 0 disables top-k entirely.
    pub top_k: u32,
    /// Generation stops at the first occurrence of any of these.
    pub stop_sequences: Vec<String>,
    /// Hard cap on generated tokens, always positive.
    pub max_output_tokens: u32,
}

impl Default for SamplingConfig {
    fn default() -> Self {
        SamplingConfig {
            temperature: 0.7,
            top_p: 0.9,
            top_k: 40,
            stop_sequences: Vec::new(),
            max_output_tokens: 500,
        }
    }
}

impl SamplingConfig {
    pub fn with_temperature(mut self, temperature: f32) -> Self {
        self.temperature = temperature.clamp(0.0, 1.0);
        self
    }

    pub fn with_top_p(mut self, top_p: f32) -> Self {
        // 0.0 is not a legal nucleus cutoff; nudge to the smallest useful one
        let clamped = top_p.clamp(0.0, 1.0);
        self.top_p = if clamped == 0.0 { 0.01 } else { clamped };
        self
    }

    pub fn with_top_k(mut self, top_k: u32) -> Self {
        self.top_k = top_k;
        self
    }

    pub fn with_stop_sequences(mut self, stop_sequences: Vec<String>) -> Self {
        self.stop_sequences = stop_sequences;
        self
    }

    pub fn with_max_output_tokens(mut self, max_output_tokens: u32) -> Self {
        self.max_output_tokens = max_output_tokens.max(1);
        self
    }
}
