//! Fetch settings: defaults, JSON config file, HTTP agent

use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::error::{FetchError, Result};

// ============================================================================
// Defaults
// ============================================================================

pub const DEFAULT_REPO: &str = "DaGenix/libhumancode";
pub const DEFAULT_API_URL: &str = "https://api.github.com";
pub const DEFAULT_TIMEOUT_SECS: u64 = 60;
/// Chunk size for the streaming copy loop.
pub const DEFAULT_BUFFER_SIZE: usize = 16384;

const DEFAULT_USER_AGENT: &str = concat!("gh-assets/", env!("CARGO_PKG_VERSION"));

// ============================================================================
// Fetch Config
// ============================================================================

/// Settings for one fetch run.
///
/// Missing keys in a config file fall back to the defaults, so a file only
/// needs to name what it changes.
#[derive(Deserialize, Debug, Clone, PartialEq)]
#[serde(default)]
pub struct FetchConfig {
    /// Repository in `owner/repo` form.
    pub repo: String,
    pub api_base_url: String,
    pub timeout_secs: u64,
    pub buffer_size: usize,
    pub user_agent: String,
    pub log_file: Option<PathBuf>,
}

impl Default for FetchConfig {
    fn default() -> Self {
        Self {
            repo: DEFAULT_REPO.to_string(),
            api_base_url: DEFAULT_API_URL.to_string(),
            timeout_secs: DEFAULT_TIMEOUT_SECS,
            buffer_size: DEFAULT_BUFFER_SIZE,
            user_agent: DEFAULT_USER_AGENT.to_string(),
            log_file: None,
        }
    }
}

impl FetchConfig {
    /// Load a JSON config file. Unlike the defaults, an explicitly named file
    /// that cannot be read or parsed is an error.
    pub fn load(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path).map_err(|e| FetchError::Config {
            path: path.to_path_buf(),
            reason: e.to_string(),
        })?;
        serde_json::from_str(&content).map_err(|e| FetchError::Config {
            path: path.to_path_buf(),
            reason: e.to_string(),
        })
    }

    /// Split `repo` into owner and name.
    pub fn owner_and_repo(&self) -> Result<(&str, &str)> {
        match self.repo.split_once('/') {
            Some((owner, name))
                if !owner.is_empty() && !name.is_empty() && !name.contains('/') =>
            {
                Ok((owner, name))
            }
            _ => Err(FetchError::InvalidRepo(self.repo.clone())),
        }
    }

    pub fn validate(&self) -> Result<()> {
        self.owner_and_repo()?;
        if self.timeout_secs == 0 {
            return Err(FetchError::InvalidSetting("timeout must be at least one second"));
        }
        if self.buffer_size == 0 {
            return Err(FetchError::InvalidSetting("buffer size must be non-zero"));
        }
        Ok(())
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }

    /// Blocking HTTP agent. The timeout bounds each connect, read and write on
    /// the socket, not the request as a whole, so a slow but live body keeps going.
    pub fn agent(&self) -> ureq::Agent {
        let timeout = self.timeout();
        ureq::AgentBuilder::new()
            .timeout_connect(timeout)
            .timeout_read(timeout)
            .timeout_write(timeout)
            .build()
    }
}
