//! Error types for release and asset fetching.

use std::path::PathBuf;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, FetchError>;

#[derive(Debug, Error)]
pub enum FetchError {
    /// The releases-by-tag request did not return 200.
    #[error("release fetch failed")]
    ReleaseFetchFailed,

    /// An asset download request did not return 200.
    #[error("asset fetch failed: {name}")]
    AssetFetchFailed { name: String },

    /// The release body could not be parsed as release JSON.
    #[error("invalid release metadata: {0}")]
    InvalidRelease(#[source] std::io::Error),

    /// Connection, DNS or timeout failure below the HTTP status level.
    #[error("HTTP request failed: {0}")]
    Http(#[from] Box<ureq::Error>),

    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error("failed to load config {}: {reason}", .path.display())]
    Config { path: PathBuf, reason: String },

    #[error("repository must be in owner/repo form, got {0:?}")]
    InvalidRepo(String),

    #[error("invalid setting: {0}")]
    InvalidSetting(&'static str),
}
