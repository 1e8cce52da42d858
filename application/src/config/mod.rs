//! Application-level configuration.
//!
//! - [`GenerationConfig`]: per-task candidates, retry policy, timeouts
//! - [`RetryPolicy`]: attempt count and inter-attempt delay

pub mod generation_config;

pub use generation_config::{GROQ_MODELS, GenerationConfig, RetryPolicy, default_candidates};
