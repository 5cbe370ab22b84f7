//! Error types for patterns and configuration.

use std::io;
use std::path::PathBuf;

use condcfg_core::{ExecutionError, SyntaxError};
use thiserror::Error;

/// Why a [`Pattern`](crate::Pattern) could not answer a validation query.
#[derive(Debug, Clone, Error)]
pub enum PatternError {
    /// The pattern is not a valid `N`-condition. This never changes for a
    /// given pattern.
    #[error(transparent)]
    Syntax(#[from] SyntaxError),

    /// The condition compiled but could not be evaluated for `n`.
    #[error("'{pattern}' failed for N={n}: {source}")]
    Execution {
        pattern: String,
        n: f64,
        source: ExecutionError,
    },

    /// The pattern is not a valid regular expression.
    #[error(transparent)]
    Regex(#[from] regex::Error),
}

/// Errors raised while loading or querying a [`Config`](crate::Config).
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config file '{}'", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("can not determine the config file type: '{}'", path.display())]
    UnknownFormat { path: PathBuf },

    #[error("unsupported config file type: '{}'", path.display())]
    UnsupportedFormat { path: PathBuf },

    #[error("invalid JSON config")]
    Json(#[from] serde_json::Error),

    #[error("invalid YAML config")]
    Yaml(#[from] serde_yaml::Error),

    #[error("config document must be a mapping, found {found}")]
    NotAMapping { found: &'static str },

    #[error("no value found for '{name}' in config")]
    Missing { name: String },
}
