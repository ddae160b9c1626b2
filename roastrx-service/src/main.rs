use axum::http::{HeaderValue, Request};
use axum::middleware::{Next, from_fn};
use std::sync::Arc;
use tracing::{Instrument, error, info};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};
use uuid::Uuid;

use roastrx_service::{AppState, GeminiGenerator, Generate, build_router};

/// Initialize structured JSON tracing based on environment variables
fn init_tracing() {
    let log_format = std::env::var("LOG_FORMAT").unwrap_or_else(|_| "json".to_string());
    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| "roastrx_service=debug,roastrx_core=debug,tower_http=debug".into());

    match log_format.as_str() {
        "pretty" => {
            tracing_subscriber::registry()
                .with(env_filter)
                .with(tracing_subscriber::fmt::layer().pretty())
                .init();
        }
        _ => {
            tracing_subscriber::registry()
                .with(env_filter)
                .with(
                    tracing_subscriber::fmt::layer()
                        .json()
                        .with_target(true)
                        .with_level(true),
                )
                .init();
        }
    }
}

/// Middleware to add a correlation ID to all requests
async fn correlation_id_middleware(
    mut request: Request<axum::body::Body>,
    next: Next,
) -> axum::response::Response {
    let correlation_id = Uuid::new_v4().to_string();

    if let Ok(header_value) = HeaderValue::from_str(&correlation_id) {
        request.headers_mut().insert("x-correlation-id", header_value);
    }

    let span = tracing::info_span!("http_request", correlation_id = %correlation_id);
    next.run(request).instrument(span).await
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    init_tracing();

    let (generator, base_sampling) = match GeminiGenerator::from_env() {
        Ok((generator, sampling)) => {
            let generator: Arc<dyn Generate> = Arc::new(generator);
            (Some(generator), sampling)
        }
        Err(e) => {
            error!("GEMINI_API_KEY not set: {}", e);
            std::process::exit(1);
        }
    };

    let app_state = AppState {
        generator,
        base_sampling,
    };
    let app = build_router(app_state).layer(from_fn(correlation_id_middleware));

    let host = std::env::var("HOST").unwrap_or_else(|_| "0.0.0.0".to_string());
    let port = std::env::var("PORT")
        .unwrap_or_else(|_| "8000".to_string())
        .parse::<u16>()
        .unwrap_or(8000);

    let listener = tokio::net::TcpListener::bind(format!("{host}:{port}")).await?;
    let addr = listener.local_addr()?;

    info!("RoastRx service running on http://{}", addr);
    info!("Analyze endpoint: POST http://{}/analyze", addr);
    info!("Health check endpoint: http://{}/health", addr);

    axum::serve(listener, app).await?;
    Ok(())
}
