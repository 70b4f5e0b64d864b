//! Resolution of the base config, per-mode overrides and backfill.

use serde_json::Value;

use super::env::{read_from_environment, EnvSnapshot};
use super::field::Field;
use super::merge::deep_merge;
use super::options::{PluginOptions, Source};
use super::validate::ValidationPolicy;
use super::PartialConfig;

/// Builds the config for `mode` from `options` and the given env snapshot.
///
/// 1. The base is a copy of the inline config when the source is inline and
///    one is set, otherwise the fields read from `env`.
/// 2. Overrides registered for `mode` are deep-merged over the base.
/// 3. When `policy` backfills, absent required fields are set to `""`.
///
/// Nothing is cached; the same inputs always give the same output.
pub fn resolve_config(
    options: &PluginOptions,
    mode: &str,
    env: &EnvSnapshot,
    policy: ValidationPolicy,
) -> PartialConfig {
    let mut config = match (options.source, &options.config) {
        (Source::Inline, Some(inline)) => {
            if options.debug {
                tracing::debug!("Using inline config");
            }
            inline.clone()
        }
        _ => read_from_environment(env, &options.env_prefix, options.debug),
    };

    if let Some(overrides) = options.environments.get(mode) {
        if options.debug {
            tracing::debug!("Applying overrides for mode: {mode}");
        }
        config = deep_merge(&config, overrides);
    }

    if policy.backfills() {
        config = fill_missing_fields(&config);
    }

    config
}

/// Required fields that are absent, null or empty.
pub fn missing_fields(config: &PartialConfig) -> Vec<Field> {
    Field::REQUIRED
        .into_iter()
        .filter(|field| match config.get(field.key()) {
            None | Some(Value::Null) => true,
            Some(Value::String(s)) => s.is_empty(),
            Some(_) => false,
        })
        .collect()
}

/// Returns a copy of `config` with every absent required field set to `""`.
///
/// Optional fields and values that are present, whatever their type, are
/// left alone.
pub fn fill_missing_fields(config: &PartialConfig) -> PartialConfig {
    let mut filled = config.clone();

    for field in Field::REQUIRED {
        if matches!(filled.get(field.key()), None | Some(Value::Null)) {
            filled.insert(field.key().to_string(), Value::String(String::new()));
        }
    }

    filled
}
