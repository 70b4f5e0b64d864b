use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
#[non_exhaustive]
pub enum ConfigError {
    #[error("Firebase configuration validation failed:\n{}", errors.join("\n"))]
    Validation { errors: Vec<String> },

    #[error("Output path contains null characters")]
    NullByteInPath,

    #[error("failed to create output directory '{path}': {source}")]
    CreateDir {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("failed to write config file '{path}': {source}")]
    Write {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("failed to serialize config: {0}")]
    Serialize(#[from] serde_json::Error),

    #[error("required options file not found: {0}")]
    FileNotFound(PathBuf),

    #[error("failed to read options file '{path}': {source}")]
    ReadError {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("failed to parse options file '{path}': {source}")]
    ParseError {
        path: PathBuf,
        source: toml::de::Error,
    },

    #[error("failed to load env file '{path}': {source}")]
    Dotenv {
        path: PathBuf,
        source: dotenvy::Error,
    },
}
