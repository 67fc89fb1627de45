//! Marksite - a static site generator for markdown blogs.

mod assets;
mod build;
mod cli;
mod config;
mod document;
mod error;
mod generator;
mod init;
mod post;
mod template;
mod utils;
mod walker;

use anyhow::Result;
use build::{BuildContext, build_site};
use chrono::Utc;
use clap::Parser;
use cli::{Cli, Commands};
use config::{SiteConfig, SitePaths};
use init::new_site;
use post::new_post;
use std::process::ExitCode;

fn main() -> ExitCode {
    let cli = Cli::parse();

    match run(&cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            log!("error"; "{:#}", err);
            ExitCode::FAILURE
        }
    }
}

fn run(cli: &Cli) -> Result<()> {
    let paths = SitePaths::from_cli(cli);

    match &cli.command {
        Commands::Init => new_site(&paths),
        Commands::Build => {
            let config = load_config(&paths)?;
            build_site(&BuildContext::new(&config, &paths)).map(|_| ())
        }
        Commands::Post { title, date } => {
            let date = date
                .clone()
                .unwrap_or_else(|| Utc::now().format("%Y-%m-%d").to_string());
            new_post(&paths, title, &date).map(|_| ())
        }
    }
}

/// Load and validate configuration, writing defaults on first build.
fn load_config(paths: &SitePaths) -> Result<SiteConfig> {
    let config = SiteConfig::load_or_create(&paths.config)?;
    config.validate()?;
    Ok(config)
}
