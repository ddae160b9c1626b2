//! Deterministic core of the RoastRx symptom service.
//!
//! Everything in this crate is pure: keyword tagging, category and
//! sampling-context selection, prompt assembly, structured-output parsing,
//! and the wellness calculators. Model calls and HTTP live in the service
//! crate, which depends on this one.

pub mod classify;
pub mod error;
pub mod prompt;
pub mod report;
pub mod response;
pub mod sampling;
pub mod signals;
pub mod tokens;
pub mod wellness;

pub use classify::{classify, Classification, ReasoningCategory, ResponseContext};
pub use error::ParseError;
pub use prompt::{render_prompt, PromptStrategy};
pub use report::SymptomReport;
pub use response::{parse_structured, ResponseType, SeverityLevel, StructuredResponse};
pub use sampling::SamplingConfig;
pub use signals::{Severity, Signals};
