use std::collections::BTreeMap;
use std::fmt;
use std::sync::Arc;

use serde::Deserialize;

use super::output::DEFAULT_OUTPUT_PATH;
use super::resolved::ResolvedConfig;
use super::validate::ValidationPolicy;
use super::PartialConfig;

/// Default prefix for env variables, e.g. `VITE_FIREBASE_API_KEY`.
pub const DEFAULT_ENV_PREFIX: &str = "VITE_FIREBASE_";

/// A user hook run on the final config right before it is written.
///
/// The hook must be total and side-effect free. Its output is not validated
/// again.
pub type Transform = Arc<dyn Fn(ResolvedConfig) -> ResolvedConfig + Send + Sync>;

/// Where the base config comes from.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Source {
    #[default]
    Env,
    Inline,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct OutputOptions {
    /// Artifact path, relative to the project root.
    pub path: String,
    /// Spaces of JSON indentation.
    pub indent: usize,
}

impl Default for OutputOptions {
    fn default() -> Self {
        Self {
            path: DEFAULT_OUTPUT_PATH.to_string(),
            indent: 2,
        }
    }
}

/// Options for one pipeline, immutable once handed to [`ConfigSync`](crate::ConfigSync).
///
/// Deserializes from TOML (see [`load_options_file`](super::load_options_file)):
///
/// ```toml
/// source = "env"
/// env_prefix = "VITE_FIREBASE_"
/// strict_validation = false
///
/// [output]
/// path = "public/__/auth/init.json"
/// indent = 4
///
/// [environments.development]
/// authDomain = "localhost:5173"
/// ```
#[derive(Clone, Deserialize)]
#[serde(default)]
#[must_use]
pub struct PluginOptions {
    pub source: Source,
    pub env_prefix: String,
    /// Used as the base config when `source` is [`Source::Inline`].
    pub config: Option<PartialConfig>,
    pub output: OutputOptions,
    /// Per-mode overrides merged over the base config.
    pub environments: BTreeMap<String, PartialConfig>,
    pub validate: bool,
    pub strict_validation: bool,
    pub watch: bool,
    #[serde(skip)]
    pub transform: Option<Transform>,
    pub debug: bool,
}

impl Default for PluginOptions {
    fn default() -> Self {
        Self {
            source: Source::Env,
            env_prefix: DEFAULT_ENV_PREFIX.to_string(),
            config: None,
            output: OutputOptions::default(),
            environments: BTreeMap::new(),
            validate: true,
            strict_validation: true,
            watch: true,
            transform: None,
            debug: false,
        }
    }
}

impl fmt::Debug for PluginOptions {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PluginOptions")
            .field("source", &self.source)
            .field("env_prefix", &self.env_prefix)
            .field("config", &self.config)
            .field("output", &self.output)
            .field("environments", &self.environments)
            .field("validate", &self.validate)
            .field("strict_validation", &self.strict_validation)
            .field("watch", &self.watch)
            .field("transform", &self.transform.as_ref().map(|_| "<fn>"))
            .field("debug", &self.debug)
            .finish()
    }
}

impl PluginOptions {
    pub fn new() -> Self {
        Self::default()
    }

    /// Reads the base config from env variables starting with `prefix`.
    pub fn with_env_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.source = Source::Env;
        self.env_prefix = prefix.into();
        self
    }

    /// Uses `config` as the base instead of the environment.
    pub fn with_inline(mut self, config: PartialConfig) -> Self {
        self.source = Source::Inline;
        self.config = Some(config);
        self
    }

    /// Registers overrides applied when the active mode is `mode`.
    ///
    /// Registering the same mode twice replaces the earlier overrides.
    pub fn with_environment(mut self, mode: impl Into<String>, overrides: PartialConfig) -> Self {
        self.environments.insert(mode.into(), overrides);
        self
    }

    pub fn with_output_path(mut self, path: impl Into<String>) -> Self {
        self.output.path = path.into();
        self
    }

    pub fn with_indent(mut self, indent: usize) -> Self {
        self.output.indent = indent;
        self
    }

    /// Sets how validation failures are treated.
    pub fn with_validation(mut self, policy: ValidationPolicy) -> Self {
        (self.validate, self.strict_validation) = match policy {
            ValidationPolicy::Strict => (true, true),
            ValidationPolicy::Lenient => (true, false),
            ValidationPolicy::Disabled => (false, false),
        };
        self
    }

    pub fn with_watch(mut self, watch: bool) -> Self {
        self.watch = watch;
        self
    }

    pub fn with_transform<F>(mut self, transform: F) -> Self
    where
        F: Fn(ResolvedConfig) -> ResolvedConfig + Send + Sync + 'static,
    {
        self.transform = Some(Arc::new(transform));
        self
    }

    pub fn with_debug(mut self, debug: bool) -> Self {
        self.debug = debug;
        self
    }

    /// The single policy both backfill and validation follow.
    pub fn validation_policy(&self) -> ValidationPolicy {
        ValidationPolicy::from_flags(self.validate, self.strict_validation)
    }
}
