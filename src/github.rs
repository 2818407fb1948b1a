//! GitHub release API types and the releases-by-tag lookup

use serde::Deserialize;

use crate::config::FetchConfig;
use crate::error::{FetchError, Result};
use crate::logging::{log_error, log_info};

const ACCEPT_GITHUB_JSON: &str = "application/vnd.github.v3+json";

/// GitHub release metadata
#[derive(Deserialize, Debug, Clone)]
pub struct GithubRelease {
    #[serde(default)]
    pub tag_name: String,
    #[serde(default)]
    pub name: Option<String>,
    pub assets: Vec<GithubAsset>,
}

/// GitHub release asset
#[derive(Deserialize, Debug, Clone)]
pub struct GithubAsset {
    pub name: String,
    pub browser_download_url: String,
    #[serde(default)]
    pub size: u64,
}

/// Build the releases-by-tag endpoint for the configured repository.
///
/// The tag is inserted as given.
pub fn release_url(config: &FetchConfig, tag: &str) -> Result<String> {
    let (owner, repo) = config.owner_and_repo()?;
    Ok(format!(
        "{}/repos/{}/{}/releases/tags/{}",
        config.api_base_url.trim_end_matches('/'),
        owner,
        repo,
        tag
    ))
}

/// Fetch the release metadata for `tag`.
///
/// Any status other than 200 is reported as [`FetchError::ReleaseFetchFailed`].
/// The status code only reaches the log, not the error.
pub fn fetch_release(agent: &ureq::Agent, config: &FetchConfig, tag: &str) -> Result<GithubRelease> {
    let url = release_url(config, tag)?;
    log_info(&format!("Fetching release {} from {}", tag, url));

    let response = match agent
        .get(&url)
        .set("Accept", ACCEPT_GITHUB_JSON)
        .set("User-Agent", &config.user_agent)
        .call()
    {
        Ok(response) => response,
        Err(ureq::Error::Status(status, _)) => {
            log_error(&format!("Release request for {} returned HTTP {}", tag, status));
            return Err(FetchError::ReleaseFetchFailed);
        }
        Err(e) => return Err(Box::new(e).into()),
    };

    if response.status() != 200 {
        log_error(&format!(
            "Release request for {} returned HTTP {}",
            tag,
            response.status()
        ));
        return Err(FetchError::ReleaseFetchFailed);
    }

    response.into_json().map_err(FetchError::InvalidRelease)
}
