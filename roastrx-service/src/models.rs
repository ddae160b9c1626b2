use serde::{Deserialize, Serialize};
use serde_json::Value;

#[derive(Debug, Deserialize)]
pub struct AnalyzeRequest {
    pub symptoms: String,
    #[serde(default)]
    pub user_context: Option<serde_json::Map<String, Value>>,
    /// Prompting technique; defaults to the structured strategy.
    #[serde(default)]
    pub strategy: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct AnalyzeResponse {
    pub success: bool,
    /// Raw model text; the parsed form lives in `metadata.structured`.
    pub response: String,
    pub symptoms: String,
    pub metadata: Value,
}
