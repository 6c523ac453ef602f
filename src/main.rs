mod config;
mod discovery;
mod document;
mod error;
mod http;
mod profile;
mod rdf;

use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::{Context, Result};
use tracing::error;
use tracing::level_filters::LevelFilter;

use crate::config::Config;
use crate::http::HttpFetcher;
use crate::profile::{ResolvedProfile, Resolver};

mod flags {
    use super::PathBuf;

    xflags::xflags! {
        /// Resolve a WebID profile and the pod storage that owns it.
        cmd podfinder {
            /// Path to a TOML configuration file.
            optional -c, --config config: PathBuf
            /// Log debug output to stderr.
            optional -v, --verbose

            /// Print the attributes of a WebID profile.
            cmd resolve {
                required web_id: String
                /// Print the profile as JSON.
                optional --json
            }
            /// Print the storage root found by climbing the WebID's containers.
            cmd storage {
                required web_id: String
            }
        }
    }
}

const GUEST: &str = "not signed in (guest)";

#[tokio::main]
async fn main() -> Result<ExitCode> {
    let flags = flags::Podfinder::from_env_or_exit();

    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_max_level(if flags.verbose {
            LevelFilter::DEBUG
        } else {
            LevelFilter::INFO
        })
        .init();

    let config = Config::load(flags.config.as_deref()).context("failed to load configuration")?;
    let fetcher = HttpFetcher::new(&config.http).context("failed to set up HTTP client")?;
    let resolver = Resolver::new(fetcher, &config);

    match flags.subcommand {
        flags::PodfinderCmd::Resolve(cmd) => match resolver.resolve(&cmd.web_id).await {
            Ok(profile) => {
                present(&profile, cmd.json)?;
                Ok(ExitCode::SUCCESS)
            }
            Err(error) => {
                let error = anyhow::Error::from(error);
                error!(target: "profile", web_id = %cmd.web_id, "{error:#}");
                println!("{GUEST}");
                Ok(ExitCode::FAILURE)
            }
        },
        flags::PodfinderCmd::Storage(cmd) => match resolver.discover_storage(&cmd.web_id).await {
            Ok(storage) => {
                println!("{storage}");
                Ok(ExitCode::SUCCESS)
            }
            Err(error) => {
                let error = anyhow::Error::from(error);
                error!(target: "discovery", web_id = %cmd.web_id, "{error:#}");
                Ok(ExitCode::FAILURE)
            }
        },
    }
}

fn present(profile: &ResolvedProfile, json: bool) -> Result<()> {
    if json {
        println!("{}", serde_json::to_string_pretty(profile)?);
    } else {
        print!("{profile}");
    }
    Ok(())
}
