//! Response sanitizer: best-effort JSON extraction from model text.
//!
//! Models wrap JSON in prose and markdown fences, emit raw newlines inside
//! strings, leave trailing commas and invalid escapes. [`extract_json`]
//! runs the [`steps`] in a fixed order:
//!
//! 1. strip code fences
//! 2. cut the first balanced `{...}` / `[...]` span
//! 3. drop control characters
//! 4. repair escapes, collapse raw line breaks
//! 5. drop trailing commas
//! 6. parse; on failure retry once with comments stripped and bare keys quoted
//!
//! This parses the common failure modes of LLM output, not arbitrary text.
//! A returned [`UnparsableResponse`] is an expected per-attempt failure.

pub mod steps;

use crate::core::string::truncate;
use serde_json::Value;
use thiserror::Error;

/// The sanitizer could not recover a JSON object or array.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("Unparsable response: {reason}")]
pub struct UnparsableResponse {
    pub reason: String,
    /// Raw model text, kept for diagnostics.
    pub original: String,
}

impl UnparsableResponse {
    fn new(reason: impl Into<String>, original: &str) -> Self {
        Self {
            reason: reason.into(),
            original: original.to_string(),
        }
    }

    /// Short preview of the offending text for log lines.
    pub fn preview(&self) -> String {
        truncate(&self.original, 120)
    }
}

/// Parse `text` only if it is a JSON object or array.
fn parse_structured(text: &str) -> Result<Value, serde_json::Error> {
    let value: Value = serde_json::from_str(text)?;
    if value.is_object() || value.is_array() {
        Ok(value)
    } else {
        Err(serde::de::Error::custom("top-level value is not an object or array"))
    }
}

/// Standard repair chain applied to an extracted span.
fn repair(span: &str) -> String {
    let cleaned = steps::remove_control_chars(span);
    let escaped = steps::repair_escapes(&cleaned);
    let collapsed = steps::collapse_line_breaks(&escaped);
    steps::remove_trailing_commas(&collapsed).trim().to_string()
}

/// Extract a JSON object or array from raw model output.
pub fn extract_json(text: &str) -> Result<Value, UnparsableResponse> {
    // Clean input passes through untouched.
    if let Ok(value) = parse_structured(text.trim()) {
        return Ok(value);
    }

    let unfenced = steps::strip_code_fences(text);
    let span = steps::extract_json_span(&unfenced)
        .ok_or_else(|| UnparsableResponse::new("no JSON object or array found", text))?;

    if let Ok(value) = parse_structured(span) {
        return Ok(value);
    }

    let first_error = match parse_structured(&repair(span)) {
        Ok(value) => return Ok(value),
        Err(e) => e,
    };

    // Aggressive pass: comments need the original line structure.
    let uncommented = steps::strip_line_comments(&unfenced);
    let span = steps::extract_json_span(&uncommented).unwrap_or(&uncommented);
    let aggressive = steps::quote_unquoted_keys(&repair(span));

    parse_structured(&aggressive).map_err(|second_error| {
        UnparsableResponse::new(
            format!("{} (after aggressive repair: {})", first_error, second_error),
            text,
        )
    })
}
