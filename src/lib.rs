//! gh-assets - GitHub release asset downloader
//!
//! Library crate behind the `gh-assets` binary: resolves a release by tag and
//! streams its assets into a local directory.

pub mod config;
pub mod download;
pub mod error;
pub mod github;
pub mod logging;

#[cfg(test)]
mod test_server;

pub use config::FetchConfig;
pub use download::{fetch_release_assets, DownloadedAsset};
pub use error::{FetchError, Result};
