//! Firebase config resolution, validation and output.

mod env;
mod error;
mod field;
mod file;
mod merge;
mod name;
mod options;
mod output;
mod resolve;
mod resolved;
mod transform;
mod validate;

pub use env::{read_from_environment, EnvSnapshot};
pub use error::ConfigError;
pub use field::Field;
pub use file::load_options_file;
pub use merge::deep_merge;
pub use name::to_env_style_name;
pub use options::{OutputOptions, PluginOptions, Source, Transform, DEFAULT_ENV_PREFIX};
pub use output::{format_bytes, render_json, validate_output_path, write_artifact, DEFAULT_OUTPUT_PATH};
pub use resolve::{fill_missing_fields, missing_fields, resolve_config};
pub use resolved::ResolvedConfig;
pub use transform::apply_transform;
pub use validate::{check_config, is_valid_auth_domain, validate_config, ValidationOutcome, ValidationPolicy};

/// A loosely typed config mapping as read from a source, before validation.
pub type PartialConfig = serde_json::Map<String, serde_json::Value>;
