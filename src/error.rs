use crate::config::ConfigError;
use thiserror::Error;

/// Top-level error type for the firebase-config-sync library.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum Error {
    #[error("{0}")]
    Config(#[from] ConfigError),

    #[error("config sync requires plugin options")]
    MissingOptions,
}
