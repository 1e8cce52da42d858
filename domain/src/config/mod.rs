//! Configuration value objects shared by the loader and the binary.

mod issue;

pub use issue::{ConfigIssue, ConfigIssueCode, Severity};
