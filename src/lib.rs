pub mod config;
pub mod plugin;
mod error;

pub use config::{ConfigError, EnvSnapshot, Field, PluginOptions, ResolvedConfig, ValidationPolicy};
pub use error::Error;
pub use plugin::ConfigSync;
