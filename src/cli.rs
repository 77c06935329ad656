use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "linkmeta")]
#[command(author, version, about = "Resolve URLs to metadata providers and fetch their metadata")]
pub struct Cli {
    /// Path to config file
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Resolve URLs and fetch their metadata
    Resolve {
        /// URLs to resolve (defaults to the configured list)
        urls: Vec<String>,

        /// Only report the matching provider, without fetching
        #[arg(long)]
        dry_run: bool,

        /// Print one JSON object per URL
        #[arg(long)]
        json: bool,
    },

    /// List the provider catalog in resolution order
    Providers,

    /// Validate configuration and provider catalog
    Validate {
        /// Config file to validate (uses default if not specified)
        config: Option<PathBuf>,
    },

    /// Display version information
    Version,
}
