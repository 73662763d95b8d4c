//! Crate-wide error types
//!
//! Configuration loading is all-or-nothing: every variant here is terminal
//! and none is retried.

use crate::validate::ValidationReport;
use std::path::PathBuf;

/// Crate-wide result type
pub type Result<T> = std::result::Result<T, Error>;

/// Errors surfaced while loading an experiment configuration
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("failed to read config file {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("malformed config document: {0}")]
    Syntax(#[from] serde_yaml::Error),

    #[error(transparent)]
    Validation(#[from] ValidationReport),

    #[error("weights file does not exist: {0}")]
    MissingWeights(PathBuf),

    #[error("cannot create directory {path}: {source}")]
    MissingPath {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid override '{0}': expected SECTION.KEY=VALUE")]
    Override(String),
}
