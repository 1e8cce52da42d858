//! Core domain concepts shared across all subdomains.
//!
//! - [`task::GenerationTask`]: the content shape a request produces
//! - [`candidate::ModelCandidate`]: a (provider, model) pair tried in order
//! - [`request::GenerationRequest`]: validated request parameters
//! - [`error::DomainError`]: domain-level errors

pub mod candidate;
pub mod error;
pub mod request;
pub mod string;
pub mod task;
