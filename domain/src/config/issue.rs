//! Structured configuration issues.
//!
//! The configuration loader reports problems as a list of issues instead
//! of failing on the first one, so the binary can print every warning and
//! abort only when an [`Severity::Error`] is present.

use std::fmt;

/// Severity level of a configuration issue.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
    /// Fatal: the configuration cannot work at all.
    Error,
    /// Non-fatal: the configuration works but may not behave as expected.
    Warning,
}

/// Identifies a specific configuration issue.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigIssueCode {
    /// `[generation.candidates]` names a task that does not exist.
    UnknownTask { name: String },
    /// A candidate entry is not of the form `provider:model`.
    InvalidCandidate { task: String, value: String },
    /// A task was given an empty candidate list.
    EmptyCandidateList { task: String },
    /// `max_attempts` is zero.
    ZeroAttempts,
    /// A provider is referenced by some candidate but has no credential.
    MissingApiKey { provider: String },
}

/// A detected issue in the loaded configuration.
#[derive(Debug, Clone)]
pub struct ConfigIssue {
    pub severity: Severity,
    pub code: ConfigIssueCode,
    pub message: String,
}

impl ConfigIssue {
    pub fn error(code: ConfigIssueCode, message: impl Into<String>) -> Self {
        Self {
            severity: Severity::Error,
            code,
            message: message.into(),
        }
    }

    pub fn warning(code: ConfigIssueCode, message: impl Into<String>) -> Self {
        Self {
            severity: Severity::Warning,
            code,
            message: message.into(),
        }
    }

    pub fn is_error(&self) -> bool {
        self.severity == Severity::Error
    }
}

impl fmt::Display for ConfigIssue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let level = match self.severity {
            Severity::Error => "error",
            Severity::Warning => "warning",
        };
        write!(f, "{}: {}", level, self.message)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_includes_severity() {
        let issue = ConfigIssue::warning(
            ConfigIssueCode::MissingApiKey {
                provider: "groq".to_string(),
            },
            "no API key for groq",
        );
        assert_eq!(issue.to_string(), "warning: no API key for groq");
        assert!(!issue.is_error());
        assert!(ConfigIssue::error(ConfigIssueCode::ZeroAttempts, "x").is_error());
    }
}
