use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(
    name = "unquarantine",
    version,
    about = "Check Homebrew casks and binaries for Gatekeeper quarantine and clear it on request"
)]
pub struct Cli {
    #[arg(
        long,
        global = true,
        help = "Output machine-readable JSON (report only, never prompts)"
    )]
    pub json: bool,
    #[arg(
        long,
        global = true,
        help = "Config file (default: ~/.config/unquarantine/config.toml)"
    )]
    pub config: Option<PathBuf>,
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Resolve the cask list through Homebrew and review every artifact
    Casks {
        #[arg(long, help = "Nix cask list (overrides [homebrew] casks_file)")]
        casks_file: Option<PathBuf>,
    },
    /// Review explicitly named app bundles and binaries
    Scan {
        #[arg(long, default_value = crate::domain::constants::DEFAULT_GROUP)]
        group: String,
        #[arg(long = "app", value_name = "PATH")]
        apps: Vec<PathBuf>,
        #[arg(long = "bin", value_name = "PATH")]
        bins: Vec<PathBuf>,
    },
    /// Check that the required tools and the cask list are available
    Doctor {
        #[arg(long)]
        casks_file: Option<PathBuf>,
    },
}
