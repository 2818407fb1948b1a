//! gh-assets - download the assets of a GitHub release tag

use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;

use gh_assets::logging::{init_logger, log_error, log_info};
use gh_assets::{fetch_release_assets, FetchConfig, Result};

#[derive(Parser, Debug)]
#[command(name = "gh-assets", version, about = "Download the assets of a GitHub release tag")]
struct Cli {
    /// Release tag to download
    tag_name: String,

    /// Directory to write the assets into (created if missing)
    output: PathBuf,

    /// Repository to read releases from
    #[arg(long, value_name = "OWNER/REPO")]
    repo: Option<String>,

    /// GitHub API base URL
    #[arg(long, value_name = "URL")]
    api_url: Option<String>,

    /// Per-request timeout in seconds
    #[arg(long, value_name = "SECS")]
    timeout: Option<u64>,

    /// JSON config file
    #[arg(long, value_name = "PATH")]
    config: Option<PathBuf>,

    /// Also append log lines to this file
    #[arg(long, value_name = "PATH")]
    log_file: Option<PathBuf>,

    /// Only print warnings and errors
    #[arg(short, long)]
    quiet: bool,
}

impl Cli {
    /// Defaults, then the config file, then flags.
    fn resolve_config(&self) -> Result<FetchConfig> {
        let mut config = match &self.config {
            Some(path) => FetchConfig::load(path)?,
            None => FetchConfig::default(),
        };

        if let Some(repo) = &self.repo {
            config.repo = repo.clone();
        }
        if let Some(api_url) = &self.api_url {
            config.api_base_url = api_url.clone();
        }
        if let Some(timeout) = self.timeout {
            config.timeout_secs = timeout;
        }
        if let Some(log_file) = &self.log_file {
            config.log_file = Some(log_file.clone());
        }
        Ok(config)
    }
}

fn main() -> ExitCode {
    run(&Cli::parse())
}

fn run(cli: &Cli) -> ExitCode {
    let config = match cli.resolve_config() {
        Ok(config) => config,
        Err(e) => {
            eprintln!("error: {}", e);
            return ExitCode::FAILURE;
        }
    };

    init_logger(config.log_file.as_deref(), cli.quiet);

    match fetch_release_assets(&config, &cli.tag_name, &cli.output) {
        Ok(assets) => {
            let total: u64 = assets.iter().map(|a| a.bytes).sum();
            log_info(&format!(
                "Downloaded {} asset(s), {} bytes, into {}",
                assets.len(),
                total,
                cli.output.display()
            ));
            ExitCode::SUCCESS
        }
        Err(e) => {
            log_error(&e.to_string());
            ExitCode::FAILURE
        }
    }
}
