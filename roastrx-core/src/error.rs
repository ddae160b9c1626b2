use thiserror::Error;

/// Failure modes of the structured-response post-processor.
///
/// The post-processor returns these instead of silently substituting a
/// fallback; the caller decides what degraded output looks like.
#[derive(Debug, Error)]
pub enum ParseError {
    #[error("no JSON object found in model output")]
    NoJsonObject,

    #[error("model output is not valid response JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("response JSON is missing required field `{0}`")]
    MissingField(&'static str),
}
