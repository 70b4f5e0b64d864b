//! Loading [`PluginOptions`] from a TOML file.

use std::path::Path;

use super::options::PluginOptions;
use super::ConfigError;

/// Loads plugin options from a TOML file.
///
/// If the file doesn't exist, a required file is an error and an optional one
/// yields the default options.
pub fn load_options_file(path: impl AsRef<Path>, required: bool) -> Result<PluginOptions, ConfigError> {
    let path = path.as_ref();

    match std::fs::read_to_string(path) {
        Ok(contents) => toml::from_str(&contents).map_err(|e| ConfigError::ParseError {
            path: path.to_path_buf(),
            source: e,
        }),
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
            if required {
                Err(ConfigError::FileNotFound(path.to_path_buf()))
            } else {
                Ok(PluginOptions::default())
            }
        }
        Err(e) => Err(ConfigError::ReadError {
            path: path.to_path_buf(),
            source: e,
        }),
    }
}
