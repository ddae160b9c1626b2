pub mod llm;
pub mod models;
pub mod service;

pub use llm::{GeminiGenerator, Generate};
pub use service::{AppState, build_router};
