//! Error taxonomy for target ingestion, configuration and search.

use std::path::PathBuf;

use thiserror::Error;

use crate::diagnostic::Diagnostic;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, Error)]
pub enum Error {
    /// A target token is not an integer or lies outside `0..=65535`.
    #[error("invalid target: {}", .0.message)]
    InvalidTarget(Box<Diagnostic>),

    #[error("target sequence is empty")]
    EmptyTarget,

    /// The search evaluated no candidate at all.
    #[error("no candidate found: search depth leaves nothing to evaluate")]
    NoCandidateFound,

    #[error("invalid config value for `{field}`: {message}")]
    InvalidConfig { field: String, message: String },

    #[error("cannot access '{}': {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid program bundle: {0}")]
    Artifact(String),

    #[error("cannot start worker pool: {0}")]
    WorkerPool(#[from] rayon::ThreadPoolBuildError),
}

impl Error {
    pub(crate) fn config(field: &str, message: impl Into<String>) -> Self {
        Error::InvalidConfig {
            field: field.to_string(),
            message: message.into(),
        }
    }

    pub(crate) fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Error::Io {
            path: path.into(),
            source,
        }
    }

    /// The span-carrying diagnostic, for errors that point into target input.
    pub fn diagnostic(&self) -> Option<&Diagnostic> {
        match self {
            Error::InvalidTarget(d) => Some(d),
            _ => None,
        }
    }
}
