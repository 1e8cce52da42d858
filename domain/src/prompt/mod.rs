//! Prompt domain
//!
//! Templates for the prompt sent to a model for each generation task.

mod template;

pub use template::PromptTemplate;
