//! Application layer for coursegen
//!
//! This crate contains use cases, port definitions, and application configuration.
//! It depends only on the domain layer.

pub mod config;
pub mod ports;
pub mod use_cases;

// Re-export commonly used types
pub use config::{GenerationConfig, RetryPolicy};
pub use ports::{
    generation_logger::{GenerationEvent, GenerationLogger, NoGenerationLogger},
    llm_gateway::{GatewayError, LlmGateway},
};
pub use use_cases::generate::{
    AttemptError, GeneratedContent, GenerationError, GenerationService,
};
pub use use_cases::retry::with_retries;
pub use use_cases::router::{
    CandidateError, CandidateFailure, ModelRouter, RawModelResponse, RouterError,
};
