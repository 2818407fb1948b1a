//! Release asset downloads
//!
//! Resolves a release, then streams each of its assets into the output
//! directory one after another. Nothing is cleaned up on failure: files written
//! before the error stay, and the asset being written may be left partial.

use std::fs::{self, File};
use std::io::{self, Read, Write};
use std::path::{Path, PathBuf};

use crate::config::FetchConfig;
use crate::error::{FetchError, Result};
use crate::github::{fetch_release, GithubAsset};
use crate::logging::{log_download, log_error, log_info, log_warning};

/// One asset written to disk.
#[derive(Debug, Clone, PartialEq)]
pub struct DownloadedAsset {
    pub name: String,
    pub path: PathBuf,
    pub bytes: u64,
}

/// Download every asset of release `tag` into `output_dir`.
///
/// The directory (and any missing parents) is created before the release is
/// resolved. Same-named files are overwritten.
pub fn fetch_release_assets(
    config: &FetchConfig,
    tag: &str,
    output_dir: &Path,
) -> Result<Vec<DownloadedAsset>> {
    config.validate()?;
    fs::create_dir_all(output_dir)?;

    let agent = config.agent();
    let release = fetch_release(&agent, config, tag)?;

    let title = release.name.as_deref().unwrap_or(&release.tag_name);
    if release.assets.is_empty() {
        log_warning(&format!("Release {} has no assets", title));
    } else {
        log_info(&format!(
            "Release {} has {} asset(s), writing to {}",
            title,
            release.assets.len(),
            output_dir.display()
        ));
    }

    download_assets(&agent, config, &release.assets, output_dir)
}

/// Download `assets` in the given order, stopping at the first failure.
pub fn download_assets(
    agent: &ureq::Agent,
    config: &FetchConfig,
    assets: &[GithubAsset],
    output_dir: &Path,
) -> Result<Vec<DownloadedAsset>> {
    let mut downloaded = Vec::with_capacity(assets.len());
    for asset in assets {
        downloaded.push(download_asset(agent, config, asset, output_dir)?);
    }
    Ok(downloaded)
}

/// Stream one asset to `output_dir/asset.name`.
///
/// The asset name is joined as-is. Names containing path separators are not
/// sanitized.
pub fn download_asset(
    agent: &ureq::Agent,
    config: &FetchConfig,
    asset: &GithubAsset,
    output_dir: &Path,
) -> Result<DownloadedAsset> {
    let path = output_dir.join(&asset.name);
    let mut file = File::create(&path)?;

    if asset.size > 0 {
        log_download(&format!("{} ({} bytes)", asset.name, asset.size));
    } else {
        log_download(&asset.name);
    }

    let response = match agent
        .get(&asset.browser_download_url)
        .set("User-Agent", &config.user_agent)
        .call()
    {
        Ok(response) => response,
        Err(ureq::Error::Status(status, _)) => {
            log_error(&format!("Asset {} returned HTTP {}", asset.name, status));
            return Err(FetchError::AssetFetchFailed {
                name: asset.name.clone(),
            });
        }
        Err(e) => return Err(Box::new(e).into()),
    };

    // Checked on the asset response itself, not the release response.
    if response.status() != 200 {
        log_error(&format!(
            "Asset {} returned HTTP {}",
            asset.name,
            response.status()
        ));
        return Err(FetchError::AssetFetchFailed {
            name: asset.name.clone(),
        });
    }

    let mut reader = response.into_reader();
    let bytes = transfer(&mut reader, &mut file, config.buffer_size)?;
    file.flush()?;

    Ok(DownloadedAsset {
        name: asset.name.clone(),
        path,
        bytes,
    })
}

/// Copy `reader` into `writer` through a `buffer_size` chunk buffer.
///
/// Each chunk is written out completely before the next read, resuming after
/// short writes. Returns the number of bytes copied.
pub fn transfer<R, W>(reader: &mut R, writer: &mut W, buffer_size: usize) -> io::Result<u64>
where
    R: Read + ?Sized,
    W: Write + ?Sized,
{
    let mut buffer = vec![0u8; buffer_size];
    let mut total: u64 = 0;

    loop {
        let read = match reader.read(&mut buffer) {
            Ok(0) => return Ok(total),
            Ok(n) => n,
            Err(e) if e.kind() == io::ErrorKind::Interrupted => continue,
            Err(e) => return Err(e),
        };

        let mut pending = &buffer[..read];
        while !pending.is_empty() {
            match writer.write(pending) {
                Ok(0) => {
                    return Err(io::Error::new(
                        io::ErrorKind::WriteZero,
                        "writer accepted no bytes",
                    ))
                }
                Ok(n) => pending = &pending[n..],
                Err(e) if e.kind() == io::ErrorKind::Interrupted => continue,
                Err(e) => return Err(e),
            }
        }

        total += read as u64;
    }
}
