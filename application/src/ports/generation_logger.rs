//! Port for structured generation event logging.
//!
//! Defines the [`GenerationLogger`] trait for recording router and retry
//! diagnostics (failed candidates, failed attempts, fallbacks) to a
//! structured log.
//!
//! This is separate from `tracing`-based operation logs: tracing handles
//! human-readable diagnostic messages, while this port captures the
//! per-candidate failure list in a machine-readable format (JSONL).

use coursegen_domain::{GenerationTask, ModelCandidate};
use serde_json::{Value, json};
use std::time::Duration;

/// A structured generation event for logging.
pub struct GenerationEvent {
    /// Event type identifier (e.g., "candidate_failed", "fallback_used").
    pub event_type: &'static str,
    /// JSON payload with event-specific data.
    pub payload: Value,
}

impl GenerationEvent {
    pub fn new(event_type: &'static str, payload: Value) -> Self {
        Self {
            event_type,
            payload,
        }
    }

    pub fn candidate_failed(task: GenerationTask, candidate: &ModelCandidate, reason: &str) -> Self {
        Self::new(
            "candidate_failed",
            json!({
                "task": task.as_str(),
                "provider": candidate.provider.as_str(),
                "model": candidate.model,
                "reason": reason,
            }),
        )
    }

    pub fn attempt_failed(task: GenerationTask, attempt: u32, reason: &str) -> Self {
        Self::new(
            "attempt_failed",
            json!({
                "task": task.as_str(),
                "attempt": attempt,
                "reason": reason,
            }),
        )
    }

    pub fn generated(task: GenerationTask, candidate: &ModelCandidate, latency: Duration) -> Self {
        Self::new(
            "generated",
            json!({
                "task": task.as_str(),
                "provider": candidate.provider.as_str(),
                "model": candidate.model,
                "latency_ms": latency.as_millis() as u64,
            }),
        )
    }

    pub fn fallback_used(task: GenerationTask, reason: &str) -> Self {
        Self::new(
            "fallback_used",
            json!({
                "task": task.as_str(),
                "reason": reason,
            }),
        )
    }
}

/// Port for logging generation events to a structured log.
///
/// The `log` method is synchronous and non-fallible; logging failures must
/// never disturb generation.
pub trait GenerationLogger: Send + Sync {
    fn log(&self, event: GenerationEvent);
}

/// No-op implementation for tests and when logging is disabled.
pub struct NoGenerationLogger;

impl GenerationLogger for NoGenerationLogger {
    fn log(&self, _event: GenerationEvent) {}
}
