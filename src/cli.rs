//! Command-line interface for rapidread.

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// RapidRead - reading helper and mini-games in the terminal
#[derive(Parser, Debug)]
#[command(name = "rapidread")]
#[command(about = "Reading helper and mini-games for the terminal", long_about = None)]
#[command(version)]
pub struct Cli {
    /// Path to the TOML configuration file (optional)
    #[arg(short, long, global = true, default_value = "rapidread.toml")]
    pub config: PathBuf,

    /// Subcommand to run
    #[command(subcommand)]
    pub command: Command,
}

/// Available commands
#[derive(Subcommand, Debug)]
pub enum Command {
    /// Run the terminal UI
    Tui {
        /// Authentication backend URL, overriding config and environment
        #[arg(long)]
        api_url: Option<String>,
    },

    /// Send text to the processing service and print the result
    Process {
        /// Text to process
        text: String,

        /// Print without markup tags
        #[arg(long)]
        plain: bool,

        /// Text backend URL, overriding config and environment
        #[arg(long)]
        api_url: Option<String>,
    },
}
