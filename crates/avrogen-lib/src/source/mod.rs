//! Where definitions come from.
//!
//! - [`FileSource`]: `*.avsc` files under a directory
//! - [`RegistrySource`]: latest subject versions from a Confluent-compatible
//!   schema registry
//!
//! Both yield `(identifier, content)` pairs as [`Definition`]s, sorted by
//! identifier so runs are reproducible.

mod files;
mod registry;


use std::path::PathBuf;

use crate::resolve::Definition;

pub use files::{DEFAULT_GLOB, FileSource};
pub use registry::{DEFAULT_CONCURRENCY, RegistrySource, SubjectVersion};

/// Fatal failures while loading definitions.
#[derive(Debug, thiserror::Error)]
pub enum SourceError {
    #[error("schema directory `{}` does not exist", .0.display())]
    MissingRoot(PathBuf),

    #[error("invalid glob pattern `{pattern}`: {source}")]
    Pattern {
        pattern: String,
        source: glob::PatternError,
    },

    #[error(transparent)]
    Walk(#[from] glob::GlobError),

    #[error("cannot read `{}`: {source}", path.display())]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("invalid registry URL `{url}`: {message}")]
    InvalidUrl { url: String, message: String },

    #[error("request to `{url}` failed: {source}")]
    Http { url: String, source: reqwest::Error },

    #[error("registry answered {status} for `{url}`")]
    Status {
        url: String,
        status: reqwest::StatusCode,
    },

    #[error("unexpected registry response from `{url}`: {source}")]
    Payload {
        url: String,
        source: serde_json::Error,
    },

    #[error("registry fetch was cancelled")]
    Cancelled,

    #[error(transparent)]
    Join(#[from] tokio::task::JoinError),
}

/// Either kind of source, chosen at runtime.
#[derive(Debug, Clone)]
pub enum Source {
    Files(FileSource),
    Registry(RegistrySource),
}

impl Source {
    pub async fn load(&self) -> Result<Vec<Definition>, SourceError> {
        match self {
            Source::Files(files) => files.load(),
            Source::Registry(registry) => registry.load().await,
        }
    }

    /// Human-readable origin for log lines.
    pub fn describe(&self) -> String {
        match self {
            Source::Files(files) => files.root().display().to_string(),
            Source::Registry(registry) => registry.base_url().to_string(),
        }
    }
}

impl From<FileSource> for Source {
    fn from(source: FileSource) -> Self {
        Source::Files(source)
    }
}

impl From<RegistrySource> for Source {
    fn from(source: RegistrySource) -> Self {
        Source::Registry(source)
    }
}
