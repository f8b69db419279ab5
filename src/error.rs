//! Error types for listing and installing tools.

use std::path::PathBuf;
use thiserror::Error;

/// Errors that can occur while listing versions or running an install.
#[derive(Error, Debug)]
pub enum Error {
    #[error("plugin not found: {0}")]
    PluginNotFound(String),

    #[error("unsupported platform: {0}")]
    UnsupportedPlatform(String),

    #[error("unsupported architecture: {0}")]
    UnsupportedArch(String),

    #[error("failed to list versions for {repo}: {message}")]
    List { repo: String, message: String },

    #[error("download failed for {url}: {message}")]
    Download { url: String, message: String },

    #[error("checksum not found for {file} in {checksum_file}")]
    ChecksumNotFound { file: String, checksum_file: String },

    #[error("checksum mismatch for {file}\n  expected: {expected}\n  got:      {actual}")]
    ChecksumMismatch {
        file: String,
        expected: String,
        actual: String,
    },

    #[error("no digest reported for {file} at {url}")]
    DigestNotFound { file: String, url: String },

    #[error("{url} returned status {status}")]
    Api { url: String, status: u16 },

    #[error("signature verification failed for {file}: {message}")]
    SignatureInvalid { file: String, message: String },

    #[error("verification error for {file}: {message}")]
    Verification { file: String, message: String },

    #[error("unsupported archive type: {0}")]
    UnsupportedArchiveType(String),

    #[error("failed to extract {archive}: {message}")]
    Extract { archive: String, message: String },

    #[error("binary file not found: {}", .0.display())]
    BinaryNotFound(PathBuf),

    #[error("{plugin}: placement failed: {message}")]
    Placement { plugin: String, message: String },

    #[error("template '{template}': {message}")]
    Template { template: String, message: String },

    #[error("{}: {source}", .path.display())]
    Path {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, Error>;

/// Attach a path to an IO error.
pub(crate) trait IoContext<T> {
    fn at(self, path: impl Into<PathBuf>) -> Result<T>;
}

impl<T> IoContext<T> for std::io::Result<T> {
    fn at(self, path: impl Into<PathBuf>) -> Result<T> {
        self.map_err(|source| Error::Path {
            path: path.into(),
            source,
        })
    }
}
