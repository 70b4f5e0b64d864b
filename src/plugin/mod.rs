//! The build lifecycle: generating the artifact on build start and again when
//! a dotenv file changes.

use std::path::{Path, PathBuf};

use crate::config::{
    apply_transform, resolve_config, validate_config, validate_output_path, write_artifact,
    ConfigError, EnvSnapshot, PluginOptions, ResolvedConfig,
};
use crate::Error;

/// Drives one configured pipeline for a project.
///
/// Holds the immutable options and the output path resolved against the
/// project root. Every run takes a fresh [`EnvSnapshot`]; nothing is cached
/// between runs.
///
/// ## Example
///
/// ```no_run
/// use firebase_config_sync::{ConfigSync, EnvSnapshot, PluginOptions};
///
/// let sync = ConfigSync::builder()
///     .with_options(PluginOptions::new().with_debug(true))
///     .with_root(".")
///     .build()?;
///
/// let env = EnvSnapshot::load(".", "development")?;
/// sync.build_start("development", &env)?;
/// # Ok::<(), firebase_config_sync::Error>(())
/// ```
#[derive(Debug)]
pub struct ConfigSync {
    options: PluginOptions,
    output_path: PathBuf,
}

impl ConfigSync {
    pub fn builder() -> ConfigSyncBuilder {
        ConfigSyncBuilder {
            options: None,
            root: PathBuf::from("."),
        }
    }

    pub fn options(&self) -> &PluginOptions {
        &self.options
    }

    /// The artifact location, resolved against the project root.
    pub fn output_path(&self) -> &Path {
        &self.output_path
    }

    /// Resolves, validates and transforms the config without writing it.
    pub fn resolve_only(&self, mode: &str, env: &EnvSnapshot) -> Result<ResolvedConfig, ConfigError> {
        let policy = self.options.validation_policy();
        let partial = resolve_config(&self.options, mode, env, policy);
        validate_config(&partial, policy)?;

        let resolved = ResolvedConfig::from_partial(&partial);
        Ok(apply_transform(resolved, self.options.transform.as_ref()))
    }

    /// Generates the artifact at build start.
    ///
    /// Any failure is logged and returned; the build should not proceed.
    pub fn build_start(&self, mode: &str, env: &EnvSnapshot) -> Result<ResolvedConfig, Error> {
        self.generate(mode, env).map_err(|e| {
            tracing::error!("Plugin initialization failed: {e}");
            Error::from(e)
        })
    }

    /// Regenerates the artifact if `path` is a dotenv file.
    ///
    /// `load_env` is called only when regeneration is needed, so the snapshot
    /// reflects the file that just changed. Returns whether a new artifact was
    /// written. Failures are logged and the previous artifact is left in place.
    pub fn on_file_change<F>(&self, path: &Path, mode: &str, load_env: F) -> bool
    where
        F: FnOnce() -> Result<EnvSnapshot, ConfigError>,
    {
        if !self.options.watch || !is_env_file(path) {
            return false;
        }

        tracing::info!("Environment file changed, regenerating config...");

        match load_env().and_then(|env| self.generate(mode, &env)) {
            Ok(_) => true,
            Err(e) => {
                tracing::error!("Failed to regenerate config: {e}");
                false
            }
        }
    }

    fn generate(&self, mode: &str, env: &EnvSnapshot) -> Result<ResolvedConfig, ConfigError> {
        validate_output_path(&self.options.output.path)?;

        let config = self.resolve_only(mode, env)?;
        write_artifact(
            &config,
            &self.output_path,
            self.options.output.indent,
            self.options.debug,
        )?;

        Ok(config)
    }
}

/// Whether `path` names a dotenv file such as `.env` or `.env.production`.
pub fn is_env_file(path: &Path) -> bool {
    let path = path.to_string_lossy().replace('\\', "/");
    path.ends_with(".env") || path.contains(".env.")
}

/// Builder for [`ConfigSync`].
#[derive(Debug)]
#[must_use = "builders do nothing until .build() is called"]
pub struct ConfigSyncBuilder {
    options: Option<PluginOptions>,
    root: PathBuf,
}

impl ConfigSyncBuilder {
    pub fn with_options(mut self, options: PluginOptions) -> Self {
        self.options = Some(options);
        self
    }

    /// Sets the project root the output path is resolved against.
    pub fn with_root(mut self, root: impl AsRef<Path>) -> Self {
        self.root = root.as_ref().to_path_buf();
        self
    }

    /// Builds the `ConfigSync`.
    ///
    /// Returns an error if no options were provided.
    pub fn build(self) -> Result<ConfigSync, Error> {
        let options = self.options.ok_or(Error::MissingOptions)?;
        let output_path = self.root.join(&options.output.path);

        if options.debug {
            tracing::debug!("Output path resolved to {}", output_path.display());
        }

        Ok(ConfigSync {
            options,
            output_path,
        })
    }
}
