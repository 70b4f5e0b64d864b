//! Environment snapshots and reading fields from them.

use std::collections::BTreeMap;
use std::path::Path;

use serde_json::Value;

use super::field::Field;
use super::{ConfigError, PartialConfig};

/// An owned, point-in-time copy of environment variables.
///
/// The resolver only ever reads from a snapshot, never from the process
/// environment directly. Take a fresh snapshot for every resolution run.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EnvSnapshot {
    vars: BTreeMap<String, String>,
}

impl EnvSnapshot {
    pub fn new() -> Self {
        Self::default()
    }

    /// Captures the current process environment.
    ///
    /// Variables whose name or value is not valid UTF-8 are skipped.
    pub fn from_process() -> Self {
        process_vars().collect()
    }

    /// Loads dotenv files for `mode` from `dir`, then overlays the process
    /// environment.
    ///
    /// Files are applied in the order `.env`, `.env.local`, `.env.<mode>`,
    /// `.env.<mode>.local`; later files override earlier ones and missing files
    /// are skipped. Variables already set in the process always win.
    pub fn load(dir: impl AsRef<Path>, mode: &str) -> Result<Self, ConfigError> {
        let dir = dir.as_ref();
        let mut snapshot = Self::new();

        let names = [
            ".env".to_string(),
            ".env.local".to_string(),
            format!(".env.{mode}"),
            format!(".env.{mode}.local"),
        ];
        for name in &names {
            snapshot.merge_dotenv_file(&dir.join(name))?;
        }

        snapshot.vars.extend(process_vars());
        Ok(snapshot)
    }

    fn merge_dotenv_file(&mut self, path: &Path) -> Result<(), ConfigError> {
        let to_error = |source: dotenvy::Error| ConfigError::Dotenv {
            path: path.to_path_buf(),
            source,
        };

        let iter = match dotenvy::from_path_iter(path) {
            Ok(iter) => iter,
            Err(e) if e.not_found() => return Ok(()),
            Err(e) => return Err(to_error(e)),
        };

        for item in iter {
            let (key, value) = item.map_err(to_error)?;
            self.vars.insert(key, value);
        }
        Ok(())
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.vars.get(key).map(String::as_str)
    }

    pub fn set(&mut self, key: impl Into<String>, value: impl Into<String>) {
        self.vars.insert(key.into(), value.into());
    }

    pub fn len(&self) -> usize {
        self.vars.len()
    }

    pub fn is_empty(&self) -> bool {
        self.vars.is_empty()
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for EnvSnapshot {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self {
            vars: iter
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        }
    }
}

fn process_vars() -> impl Iterator<Item = (String, String)> {
    std::env::vars_os().filter_map(|(key, value)| Some((key.into_string().ok()?, value.into_string().ok()?)))
}

/// Reads every recognized field from `source` as `prefix + ENV_NAME`.
///
/// Only non-empty values are taken; unset and empty variables are left out of
/// the result entirely so that backfill can tell them apart from explicit
/// values.
pub fn read_from_environment(source: &EnvSnapshot, prefix: &str, debug: bool) -> PartialConfig {
    let mut config = PartialConfig::new();

    if debug {
        tracing::debug!("Reading config from env with prefix: {prefix}");
    }

    for field in Field::ALL {
        let key = format!("{prefix}{}", field.env_name());
        let Some(value) = source.get(&key).filter(|v| !v.is_empty()) else {
            continue;
        };

        if debug {
            tracing::debug!("  {key} = {}", mask_sensitive_value(field, value));
        }
        config.insert(field.key().to_string(), Value::String(value.to_string()));
    }

    config
}

/// Masks sensitive values longer than 8 chars as `abcd...wxyz`.
pub(crate) fn mask_sensitive_value(field: Field, value: &str) -> String {
    let chars: Vec<char> = value.chars().collect();
    if !field.is_sensitive() || chars.len() <= 8 {
        return value.to_string();
    }

    let head: String = chars[..4].iter().collect();
    let tail: String = chars[chars.len() - 4..].iter().collect();
    format!("{head}...{tail}")
}
