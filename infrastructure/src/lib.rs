//! Infrastructure layer for coursegen
//!
//! This crate contains adapters that implement the ports defined
//! in the application layer, including configuration file loading.

pub mod config;
pub mod logging;
pub mod providers;

// Re-export commonly used types
pub use config::{
    ConfigLoader, FileConfig, FileGenerationConfig, FileHttpProviderConfig, FileLoggingConfig,
    FileProvidersConfig,
};
pub use logging::JsonlGenerationLogger;
pub use providers::{GeminiAdapter, OpenAiCompatibleAdapter, ProviderAdapter, RoutingGateway};
