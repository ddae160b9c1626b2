//! Model access behind a trait so the HTTP layer is testable without a
//! network connection.

use async_trait::async_trait;
use rig::completion::Prompt;
use rig::prelude::*;
use roastrx_core::SamplingConfig;
use serde_json::json;
use tracing::debug;

/// One completion call. The sampling config travels with every call so
/// serious inputs can pin the temperature down per request.
#[async_trait]
pub trait Generate: Send + Sync {
    async fn generate(&self, prompt: &str, sampling: &SamplingConfig) -> anyhow::Result<String>;
}

const MODEL_NAME: &str = "gemini-1.5-flash";

/// Gemini-backed generator. The client is cheap to clone; agents are built
/// per call because sampling parameters differ between requests.
pub struct GeminiGenerator {
    client: rig::providers::gemini::Client,
}

impl GeminiGenerator {
    /// Reads GEMINI_API_KEY plus the optional sampling overrides TOP_P,
    /// TOP_K, and STOP_SEQUENCES (comma separated).
    pub fn from_env() -> anyhow::Result<(Self, SamplingConfig)> {
        let api_key = std::env::var("GEMINI_API_KEY")
            .map_err(|_| anyhow::anyhow!("GEMINI_API_KEY not set"))?;
        let client = rig::providers::gemini::Client::new(&api_key);

        let mut sampling = SamplingConfig::default();
        if let Ok(top_p) = std::env::var("TOP_P") {
            if let Ok(top_p) = top_p.parse::<f32>() {
                sampling = sampling.with_top_p(top_p);
            }
        }
        if let Ok(top_k) = std::env::var("TOP_K") {
            if let Ok(top_k) = top_k.parse::<u32>() {
                sampling = sampling.with_top_k(top_k);
            }
        }
        if let Ok(stops) = std::env::var("STOP_SEQUENCES") {
            let stops: Vec<String> = stops
                .split(',')
                .map(str::trim)
                .filter(|s| !s.is_empty())
                .map(str::to_string)
                .collect();
            sampling = sampling.with_stop_sequences(stops);
        }

        Ok((Self { client }, sampling))
    }
}

#[async_trait]
impl Generate for GeminiGenerator {
    async fn generate(&self, prompt: &str, sampling: &SamplingConfig) -> anyhow::Result<String> {
        let mut params = json!({
            "topP": sampling.top_p,
        });
        if sampling.top_k > 0 {
            params["topK"] = json!(sampling.top_k);
        }
        if !sampling.stop_sequences.is_empty() {
            params["stopSequences"] = json!(sampling.stop_sequences);
        }

        debug!(
            temperature = sampling.temperature,
            top_p = sampling.top_p,
            top_k = sampling.top_k,
            "Calling {}",
            MODEL_NAME
        );

        let agent = self
            .client
            .agent(MODEL_NAME)
            .temperature(sampling.temperature as f64)
            .max_tokens(sampling.max_output_tokens as u64)
            .additional_params(params)
            .build();

        let response = agent.prompt(prompt).await?;
        Ok(response)
    }
}
