//! Use cases
//!
//! Application-level operations that orchestrate domain logic.

pub mod generate;
pub mod retry;
pub mod router;
