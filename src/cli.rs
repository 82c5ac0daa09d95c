use clap::Parser;

use crate::resolution::domain::Ecosystem;

/// Resolve the license of a package, repository, URL or license text
#[derive(Parser, Debug)]
#[command(name = "license-lookup")]
#[command(version)]
#[command(
    about = "Resolve the license of a package, repository, URL or license text",
    long_about = "Resolves \"what license applies\" for an identifier by combining registry \
                  metadata, repository license-file scanning and external license-metadata \
                  providers into one normalized result with a full provenance trail."
)]
pub struct Args {
    /// Identifier to resolve: a purl (pkg:pypi/requests@2.31.0), a URL,
    /// a name@version token, a license file (with --file) or raw
    /// license text (with --text)
    #[arg(required_unless_present_any = ["cache_list", "cache_clear"])]
    pub identifier: Option<String>,

    /// Ecosystem to use instead of shape detection:
    /// pypi, gem, maven, swift, gitrepo or url
    #[arg(short, long)]
    pub ecosystem: Option<Ecosystem>,

    /// Treat the identifier as a path to a license file
    #[arg(long, conflicts_with = "text")]
    pub file: bool,

    /// Treat the identifier as raw license text
    #[arg(long)]
    pub text: bool,

    /// Minimum matcher confidence in the range 0.0..=1.0
    #[arg(short, long)]
    pub min_score: Option<f64>,

    /// Cache behavior: enabled, disabled or update
    #[arg(long, value_name = "MODE")]
    pub cache_mode: Option<String>,

    /// List all cached results and exit
    #[arg(long)]
    pub cache_list: bool,

    /// Clear the result cache and exit
    #[arg(long)]
    pub cache_clear: bool,

    /// Path to a config file (default: ./license-lookup.config.yml if present)
    #[arg(short, long)]
    pub config: Option<String>,

    /// Output verbose information
    #[arg(short, long)]
    pub verbose: bool,
}

impl Args {
    pub fn parse_args() -> Self {
        Self::parse()
    }
}
