//! CLI argument definitions.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

use crate::config::DEFAULT_OUTPUT_DIR;

/// Top-level CLI parser for `tapsite`.
#[derive(Debug, Parser)]
#[command(name = "tapsite", version, about = "Generate a static website for a Homebrew tap")]
pub struct Cli {
    /// Log debug output (overridden by `RUST_LOG`).
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// The command to execute.
    #[command(subcommand)]
    pub command: Command,
}

/// Supported top-level subcommands.
#[derive(Debug, Subcommand)]
pub enum Command {
    /// Fetch the tap's packages and history and write the site.
    Generate(GenerateArgs),
}

/// Arguments of `tapsite generate`.
#[derive(Debug, Args)]
pub struct GenerateArgs {
    /// Directory receiving the generated pages.
    #[arg(short, long, default_value = DEFAULT_OUTPUT_DIR)]
    pub output: PathBuf,

    /// Repository owner.
    #[arg(long, env = "GITHUB_REPOSITORY_OWNER")]
    pub owner: Option<String>,

    /// Repository name.
    #[arg(long, env = "GITHUB_REPOSITORY_NAME")]
    pub repo: Option<String>,

    /// API access token.
    #[arg(long, env = "GITHUB_TOKEN", hide_env_values = true)]
    pub token: Option<String>,

    /// Base URL of the GitHub REST API.
    #[arg(long)]
    pub api_url: Option<String>,

    /// Site name shown in the header and page titles.
    #[arg(long)]
    pub site_name: Option<String>,

    /// Tagline shown under the site name.
    #[arg(long)]
    pub description: Option<String>,

    /// Number of entries in the "recently added" and "recently updated" lists.
    #[arg(long, value_name = "N")]
    pub list_limit: Option<usize>,

    /// Number of recent commits inspected for package dates.
    #[arg(long, value_name = "N")]
    pub commit_page_size: Option<usize>,

    /// Number of history entries shown per package.
    #[arg(long, value_name = "N")]
    pub history_limit: Option<usize>,

    /// Serve API responses from a recorded cassette instead of the network.
    #[arg(long, value_name = "CASSETTE")]
    pub replay: Option<PathBuf>,
}
