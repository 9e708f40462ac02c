//! Configuration file loading for consilium
//!
//! This module handles file I/O and merging of configuration from multiple sources.
//! The priority order (highest to lowest):
//!
//! 1. `--config <path>` specified file
//! 2. Environment variables (`OPENROUTER_API_KEY`, `CONSILIUM_*`)
//! 3. Project root: `./consilium.toml` or `./.consilium.toml`
//! 4. XDG config: `$XDG_CONFIG_HOME/consilium/config.toml`
//! 5. Fallback: `~/.config/consilium/config.toml`
//! 6. Default values

mod file_config;
mod loader;

pub use file_config::{
    ConfigValidationError, FileConfig, FileGeneratorConfig, FileOutputConfig, FilePanelConfig,
    FileTaskConfig,
};
pub use loader::ConfigLoader;
