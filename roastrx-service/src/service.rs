use axum::{
    Router,
    extract::State,
    http::StatusCode,
    response::Json,
    routing::{get, post},
};
use serde_json::{Value, json};
use std::sync::Arc;
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::{error, info, warn};

use roastrx_core::{
    PromptStrategy, StructuredResponse, SymptomReport, classify, parse_structured, render_prompt,
    tokens,
};

use crate::llm::Generate;
use crate::models::{AnalyzeRequest, AnalyzeResponse};

type ApiResult<T> = Result<Json<T>, (StatusCode, Json<Value>)>;
type ApiError = (StatusCode, Json<Value>);

fn bad_request_error(message: &str) -> ApiError {
    (StatusCode::BAD_REQUEST, Json(json!({ "error": message })))
}

fn service_unavailable_error(message: &str) -> ApiError {
    (
        StatusCode::SERVICE_UNAVAILABLE,
        Json(json!({ "error": message })),
    )
}

fn internal_error(message: &str, details: &str) -> ApiError {
    (
        StatusCode::INTERNAL_SERVER_ERROR,
        Json(json!({
            "success": false,
            "error": message,
            "details": details
        })),
    )
}

#[derive(Clone)]
pub struct AppState {
    /// None when the model client failed to initialize; analyze then
    /// answers 503 while the read-only endpoints keep working.
    pub generator: Option<Arc<dyn Generate>>,
    pub base_sampling: roastrx_core::SamplingConfig,
}

pub fn build_router(app_state: AppState) -> Router {
    Router::new()
        .route("/", get(root))
        .route("/health", get(health_check))
        .route("/analyze", post(analyze_symptoms))
        .route("/quick-advice", post(quick_advice))
        .route("/examples", get(get_examples))
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
        .with_state(app_state)
}

async fn root() -> Json<Value> {
    Json(json!({
        "message": "Welcome to the RoastRx API!",
        "description": "AI-powered medical assistant with humor",
        "version": "1.0.0",
        "endpoints": {
            "POST /analyze": "Analyze symptoms and get a RoastRx response",
            "POST /quick-advice": "Brief advice without the full persona",
            "GET /examples": "Example symptoms and expected responses",
            "GET /health": "Health check"
        }
    }))
}

async fn health_check(State(state): State<AppState>) -> Json<Value> {
    Json(json!({
        "status": "healthy",
        "ai_status": if state.generator.is_some() { "connected" } else { "disconnected" },
        "version": "1.0.0",
        "timestamp": chrono::Utc::now().to_rfc3339()
    }))
}

async fn get_examples() -> Json<Value> {
    Json(json!({
        "examples": [
            {
                "symptoms": "I have a headache",
                "expected_response": "Humorous roast + medical advice"
            },
            {
                "symptoms": "I can't sleep",
                "expected_response": "Sleep hygiene advice with humor"
            },
            {
                "symptoms": "My back hurts from sitting",
                "expected_response": "Posture advice with gentle teasing"
            }
        ]
    }))
}

fn report_from_request(request: &AnalyzeRequest) -> SymptomReport {
    let mut report = SymptomReport::new(request.symptoms.trim());
    if let Some(context) = &request.user_context {
        for (key, value) in context {
            let value = match value {
                Value::String(s) => s.clone(),
                other => other.to_string(),
            };
            report = report.with_context(key.clone(), value);
        }
    }
    report
}

async fn analyze_symptoms(
    State(state): State<AppState>,
    Json(request): Json<AnalyzeRequest>,
) -> ApiResult<AnalyzeResponse> {
    if request.symptoms.trim().is_empty() {
        return Err(bad_request_error("Symptoms cannot be empty"));
    }
    let generator = state
        .generator
        .as_ref()
        .ok_or_else(|| service_unavailable_error("AI service unavailable"))?;

    let strategy = request
        .strategy
        .as_deref()
        .map(PromptStrategy::parse)
        .unwrap_or(PromptStrategy::Structured);

    let report = report_from_request(&request);
    let classification = classify(&report.symptoms);
    let prompt = render_prompt(&report, strategy, &classification);
    let sampling = state
        .base_sampling
        .clone()
        .with_temperature(classification.temperature);

    info!(
        strategy = strategy.as_str(),
        category = classification.category.as_str(),
        severity = classification.severity.as_str(),
        context = classification.context.as_str(),
        "Analyzing symptoms"
    );

    let output = generator.generate(&prompt, &sampling).await.map_err(|e| {
        error!("Model call failed: {}", e);
        internal_error("AI generation failed", &e.to_string())
    })?;

    let structured: StructuredResponse = match parse_structured(&output) {
        Ok(parsed) => parsed,
        Err(e) => {
            warn!("Structured parse failed, using fallback: {}", e);
            StructuredResponse::parse_fallback()
        }
    };

    let metadata = json!({
        "model": "gemini-1.5-flash",
        "strategy": strategy.as_str(),
        "category": classification.category.as_str(),
        "severity": classification.severity.as_str(),
        "context": classification.context.as_str(),
        "temperature": classification.temperature,
        "top_p": sampling.top_p,
        "suggested_functions": classification.suggested_functions,
        "prompt_tokens": tokens::estimate_tokens(&prompt),
        "structured": structured,
    });

    Ok(Json(AnalyzeResponse {
        success: true,
        response: output,
        symptoms: report.symptoms,
        metadata,
    }))
}

const QUICK_ADVICE_LIMIT: usize = 200;

/// Truncated one-shot advice without the full persona pipeline.
async fn quick_advice(
    State(state): State<AppState>,
    Json(request): Json<AnalyzeRequest>,
) -> ApiResult<Value> {
    if request.symptoms.trim().is_empty() {
        return Err(bad_request_error("Symptoms cannot be empty"));
    }
    let generator = state
        .generator
        .as_ref()
        .ok_or_else(|| service_unavailable_error("AI service unavailable"))?;

    let symptoms = request.symptoms.trim();
    let prompt = format!(
        "Provide brief medical advice for: {}. Keep it under 100 words and include a disclaimer.",
        symptoms
    );
    // low temperature: plain advice, no roasting
    let sampling = state.base_sampling.clone().with_temperature(0.3);

    let output = generator.generate(&prompt, &sampling).await.map_err(|e| {
        error!("Model call failed: {}", e);
        internal_error("Failed to generate advice", &e.to_string())
    })?;

    let advice: String = if output.chars().count() > QUICK_ADVICE_LIMIT {
        let truncated: String = output.chars().take(QUICK_ADVICE_LIMIT).collect();
        format!("{}...", truncated)
    } else {
        output
    };

    Ok(Json(json!({
        "success": true,
        "advice": advice,
        "symptoms": symptoms,
    })))
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use axum::body::Body;
    use axum::http::Request;
    use tower::ServiceExt;

    struct MockGenerator {
        output: &'static str,
        fail: bool,
    }

    #[async_trait]
    impl Generate for MockGenerator {
        async fn generate(
            &self,
            _prompt: &str,
            _sampling: &roastrx_core::SamplingConfig,
        ) -> anyhow::Result<String> {
            if self.fail {
                anyhow::bail!("upstream timeout");
            }
            Ok(self.output.to_string())
        }
    }

    fn state_with(generator: Option<Arc<dyn Generate>>) -> AppState {
        AppState {
            generator,
            base_sampling: roastrx_core::SamplingConfig::default(),
        }
    }

    fn analyze_request(body: &str) -> Request<Body> {
        Request::builder()
            .method("POST")
            .uri("/analyze")
            .header("content-type", "application/json")
            .body(Body::from(body.to_string()))
            .unwrap()
    }

    const GOOD_OUTPUT: &str = r#"{
        "roast": "Your spine called, it wants a chair that isn't a torture device.",
        "diagnosis": "Postural strain from prolonged sitting.",
        "advice": "Stand and stretch every 30 minutes.",
        "severity": "low",
        "response_type": "roast_and_advice",
        "confidence_score": 0.9,
        "tags": ["posture"]
    }"#;

    #[tokio::test]
    async fn analyze_happy_path_returns_200() {
        let app = build_router(state_with(Some(Arc::new(MockGenerator {
            output: GOOD_OUTPUT,
            fail: false,
        }))));
        let response = app
            .oneshot(analyze_request(r#"{"symptoms": "my back hurts from sitting"}"#))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
    }

    #[tokio::test]
    async fn empty_symptoms_returns_400() {
        let app = build_router(state_with(Some(Arc::new(MockGenerator {
            output: GOOD_OUTPUT,
            fail: false,
        }))));
        let response = app
            .oneshot(analyze_request(r#"{"symptoms": "   "}"#))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn missing_generator_returns_503() {
        let app = build_router(state_with(None));
        let response = app
            .oneshot(analyze_request(r#"{"symptoms": "I have a headache"}"#))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::SERVICE_UNAVAILABLE);
    }

    #[tokio::test]
    async fn model_failure_returns_500() {
        let app = build_router(state_with(Some(Arc::new(MockGenerator {
            output: "",
            fail: true,
        }))));
        let response = app
            .oneshot(analyze_request(r#"{"symptoms": "I have a headache"}"#))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }

    #[tokio::test]
    async fn unparseable_model_output_still_returns_200() {
        let app = build_router(state_with(Some(Arc::new(MockGenerator {
            output: "I refuse to emit JSON today",
            fail: false,
        }))));
        let response = app
            .oneshot(analyze_request(r#"{"symptoms": "I have a headache"}"#))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
    }

    fn quick_advice_request(body: &str) -> Request<Body> {
        Request::builder()
            .method("POST")
            .uri("/quick-advice")
            .header("content-type", "application/json")
            .body(Body::from(body.to_string()))
            .unwrap()
    }

    #[tokio::test]
    async fn quick_advice_happy_path_returns_200() {
        let app = build_router(state_with(Some(Arc::new(MockGenerator {
            output: "Rest, hydrate, and see a doctor if it persists. Not medical advice.",
            fail: false,
        }))));
        let response = app
            .oneshot(quick_advice_request(r#"{"symptoms": "I have a headache"}"#))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
    }

    #[tokio::test]
    async fn quick_advice_without_generator_returns_503() {
        let app = build_router(state_with(None));
        let response = app
            .oneshot(quick_advice_request(r#"{"symptoms": "I have a headache"}"#))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::SERVICE_UNAVAILABLE);
    }

    #[tokio::test]
    async fn quick_advice_truncates_long_output() {
        let long_output: &'static str =
            "advice advice advice advice advice advice advice advice advice advice \
             advice advice advice advice advice advice advice advice advice advice \
             advice advice advice advice advice advice advice advice advice advice \
             advice advice advice advice advice advice advice advice advice advice";
        let app = build_router(state_with(Some(Arc::new(MockGenerator {
            output: long_output,
            fail: false,
        }))));
        let response = app
            .oneshot(quick_advice_request(r#"{"symptoms": "I have a headache"}"#))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        let body = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        let value: Value = serde_json::from_slice(&body).unwrap();
        let advice = value["advice"].as_str().unwrap();
        assert_eq!(advice.chars().count(), QUICK_ADVICE_LIMIT + 3);
        assert!(advice.ends_with("..."));
    }

    #[tokio::test]
    async fn health_reports_disconnected_without_generator() {
        let app = build_router(state_with(None));
        let response = app
            .oneshot(
                Request::builder()
                    .uri("/health")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
    }

    #[tokio::test]
    async fn examples_endpoint_is_static() {
        let app = build_router(state_with(None));
        let response = app
            .oneshot(
                Request::builder()
                    .uri("/examples")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
    }
}
