//! RapidRead - unified CLI
//!
//! Runs the terminal app or processes a single text from the command line.

#![warn(missing_docs)]

mod cli;

use anyhow::Result;
use clap::Parser;
use cli::{Cli, Command};
use rapidread::{ApiClient, AppConfig, parse_markup, run_tui};
use std::path::Path;
use tracing::{info, instrument};
use tracing_subscriber::EnvFilter;

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    // Load .env file
    dotenvy::dotenv().ok();

    let cli = Cli::parse();

    match cli.command {
        Command::Tui { api_url } => {
            let mut config = AppConfig::load(&cli.config)?;
            if let Some(url) = api_url {
                config = config.with_api_url(url);
            }
            run_tui(config).await
        }
        Command::Process {
            text,
            plain,
            api_url,
        } => run_process(&cli.config, text, plain, api_url).await,
    }
}

/// Sends `text` to the processing service and prints the result.
#[instrument(skip(config_path, text), fields(len = text.len()))]
async fn run_process(
    config_path: &Path,
    text: String,
    plain: bool,
    api_url: Option<String>,
) -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let config = AppConfig::load(config_path)?;
    let client = match api_url {
        Some(url) => ApiClient::new(config.api_url().clone(), url)?,
        None => ApiClient::from_config(&config)?,
    };
    info!(url = %client.text_base_url(), "Processing text");

    let html = client.process_text(&text).await?;
    if plain {
        let stripped: String = parse_markup(&html).into_iter().map(|s| s.text).collect();
        println!("{}", stripped);
    } else {
        println!("{}", html);
    }
    Ok(())
}
