//! Logging infrastructure: structured generation event logging.
//!
//! Provides [`JsonlGenerationLogger`], an append-only JSONL writer that
//! implements the [`GenerationLogger`](coursegen_application::GenerationLogger) port.

mod jsonl_logger;

pub use jsonl_logger::JsonlGenerationLogger;
