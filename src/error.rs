// src/error.rs
use std::path::PathBuf;

use thiserror::Error;

pub type Result<T, E = Error> = std::result::Result<T, E>;

/// Every failure is fatal; the variant decides the exit code.
#[derive(Debug, Error)]
pub enum Error {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Catalog schema error in {path}: {msg}")]
    Schema { path: PathBuf, msg: String },

    #[error("Analytics request failed: {0}")]
    Upstream(String),

    #[error("Analytics returned HTTP {status} for {url}: {preview}")]
    HttpStatus {
        status: u16,
        url: String,
        preview: String,
    },

    #[error("Document structure error in {path}: {msg}")]
    Document { path: PathBuf, msg: String },

    #[error("I/O error on {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

impl Error {
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Error::Io { path: path.into(), source }
    }

    pub fn schema(path: impl Into<PathBuf>, msg: impl Into<String>) -> Self {
        Error::Schema { path: path.into(), msg: msg.into() }
    }

    pub fn document(path: impl Into<PathBuf>, msg: impl Into<String>) -> Self {
        Error::Document { path: path.into(), msg: msg.into() }
    }

    /// Process exit code for this error category.
    pub fn exit_code(&self) -> i32 {
        match self {
            Error::Io { .. } => 1,
            Error::Config(_) => 2,
            Error::Schema { .. } => 3,
            Error::Upstream(_) | Error::HttpStatus { .. } => 4,
            Error::Document { .. } => 5,
        }
    }
}

impl From<reqwest::Error> for Error {
    fn from(e: reqwest::Error) -> Self {
        Error::Upstream(e.to_string())
    }
}
