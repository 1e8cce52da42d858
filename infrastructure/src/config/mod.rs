//! Configuration file loading for coursegen
//!
//! This module handles file I/O and merging of configuration from multiple sources.
//! The priority order (highest to lowest):
//!
//! 1. `COURSEGEN_*` environment variables
//! 2. `--config <path>` specified file
//! 3. Project root: `./coursegen.toml` or `./.coursegen.toml`
//! 4. Global: `$XDG_CONFIG_HOME/coursegen/config.toml`
//! 5. Default values

mod file_config;
mod loader;

pub use file_config::{
    FileConfig, FileGenerationConfig, FileHttpProviderConfig, FileLoggingConfig,
    FileProvidersConfig,
};
pub use loader::ConfigLoader;
