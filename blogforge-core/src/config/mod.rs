//! blogforge configuration
//!
//! Loads `blogforge.toml` from the working directory (or `.blogforge/`),
//! falling back to built-in defaults for every missing field.

pub mod constants;
pub mod core;
pub mod loader;

pub use self::core::{PipelineConfig, ProviderConfig, ServerConfig};
pub use loader::{BlogForgeConfig, ConfigManager};
