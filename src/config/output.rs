//! Writing the resolved config to the JSON artifact.

use std::path::Path;

use serde::Serialize;
use serde_json::ser::PrettyFormatter;

use super::resolved::ResolvedConfig;
use super::ConfigError;

/// Where Firebase Hosting's auth helper expects the init file.
pub const DEFAULT_OUTPUT_PATH: &str = "public/__/auth/init.json";

const MAX_INDENT: usize = 10;

/// Rejects paths containing NUL and warns about unconventional locations.
pub fn validate_output_path(path: &str) -> Result<(), ConfigError> {
    if path.contains('\0') {
        return Err(ConfigError::NullByteInPath);
    }

    if !path.contains("__/auth/") {
        tracing::warn!(
            "Output path \"{path}\" doesn't match Firebase's expected path \"{DEFAULT_OUTPUT_PATH}\""
        );
        tracing::warn!("This may cause Firebase Authentication to fail");
    }

    Ok(())
}

/// Serializes `config` as JSON indented by `indent` spaces.
///
/// An indent of 0 gives compact output; indents above 10 are capped at 10.
pub fn render_json(config: &ResolvedConfig, indent: usize) -> Result<String, ConfigError> {
    let indent = indent.min(MAX_INDENT);
    if indent == 0 {
        return Ok(serde_json::to_string(config)?);
    }

    let spaces = vec![b' '; indent];
    let mut buf = Vec::new();
    let mut ser = serde_json::Serializer::with_formatter(&mut buf, PrettyFormatter::with_indent(&spaces));
    config.serialize(&mut ser)?;

    String::from_utf8(buf).map_err(|e| ConfigError::Serialize(serde::ser::Error::custom(e)))
}

/// Writes `config` to `path`, creating parent directories as needed.
///
/// Returns the number of bytes written. Failures are logged and returned.
pub fn write_artifact(
    config: &ResolvedConfig,
    path: &Path,
    indent: usize,
    debug: bool,
) -> Result<usize, ConfigError> {
    let result = write_inner(config, path, indent, debug);
    if let Err(e) = &result {
        tracing::error!("Failed to generate config file: {e}");
    }
    result
}

fn write_inner(
    config: &ResolvedConfig,
    path: &Path,
    indent: usize,
    debug: bool,
) -> Result<usize, ConfigError> {
    if let Some(dir) = path.parent().filter(|d| !d.as_os_str().is_empty()) {
        std::fs::create_dir_all(dir).map_err(|source| ConfigError::CreateDir {
            path: dir.to_path_buf(),
            source,
        })?;
    }

    let content = render_json(config, indent)?;
    std::fs::write(path, &content).map_err(|source| ConfigError::Write {
        path: path.to_path_buf(),
        source,
    })?;

    let size = content.len();
    tracing::info!(
        "Generated Firebase config → {} ({})",
        path.display(),
        format_bytes(size)
    );
    if debug {
        tracing::debug!("Config content:\n{content}");
    }

    Ok(size)
}

/// Formats a byte count as `B`, `KB` or `MB` with at most two decimals.
pub fn format_bytes(bytes: usize) -> String {
    const UNITS: [&str; 3] = ["B", "KB", "MB"];

    if bytes == 0 {
        return "0 B".to_string();
    }

    let mut value = bytes as f64;
    let mut unit = 0;
    while value >= 1024.0 && unit < UNITS.len() - 1 {
        value /= 1024.0;
        unit += 1;
    }

    let rounded = format!("{value:.2}");
    let trimmed = rounded.trim_end_matches('0').trim_end_matches('.');
    format!("{trimmed} {}", UNITS[unit])
}
