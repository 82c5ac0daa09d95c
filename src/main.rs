mod adapters;
mod application;
mod cli;
mod config;
mod ecosystems;
mod ports;
mod providers;
mod resolution;
mod shared;

use adapters::outbound::console::StderrProgressReporter;
use adapters::outbound::filesystem::JsonFileStore;
use adapters::outbound::matching::{AliasNormalizer, KeywordTextMatcher};
use adapters::outbound::network::HttpContentFetcher;
use application::cache::{CacheMode, ResultCache};
use application::dto::ResolveRequest;
use application::use_cases::ResolveLicenseUseCase;
use cli::Args;
use config::ConfigFile;
use owo_colors::OwoColorize;
use providers::ProviderRegistry;
use shared::{ExitCode, Result};
use std::path::Path;
use std::process;
use std::time::Duration;
use tracing_subscriber::EnvFilter;

fn main() {
    let args = Args::parse_args();
    init_tracing(args.verbose);

    match run(args) {
        Ok(exit_code) => process::exit(exit_code.as_i32()),
        Err(e) => {
            eprintln!();
            eprintln!("{}", "❌ An error occurred:".red().bold());
            eprintln!();
            eprintln!("{}", e);

            // Display error chain
            let mut source = e.source();
            while let Some(err) = source {
                eprintln!();
                eprintln!("Caused by: {}", err);
                source = err.source();
            }

            eprintln!();
            process::exit(ExitCode::ApplicationError.as_i32());
        }
    }
}

fn init_tracing(verbose: bool) {
    let default_level = if verbose { "debug" } else { "warn" };
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default_level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn run(args: Args) -> Result<ExitCode> {
    // Config file: explicit path wins, else discovery in the working
    // directory.
    let config = match &args.config {
        Some(path) => Some(config::load_config_from_path(Path::new(path))?),
        None => config::discover_config(Path::new("."))?,
    };

    let cache_mode = resolve_cache_mode(&args, config.as_ref())?;
    let store = JsonFileStore::open(config::cache_file(config.as_ref()))?;
    let cache = ResultCache::new(store, cache_mode)?;

    // Cache maintenance operations short-circuit the pipeline.
    if args.cache_clear {
        cache.clear()?;
        eprintln!("🧹 Cache cleared");
        return Ok(ExitCode::Success);
    }
    if args.cache_list {
        let entries = cache.list()?;
        println!("{}", serde_json::to_string_pretty(&entries)?);
        return Ok(ExitCode::Success);
    }

    let Some(identifier) = args.identifier.clone() else {
        anyhow::bail!("No identifier given");
    };

    let timeout = config
        .as_ref()
        .and_then(|c| c.http_timeout_secs)
        .unwrap_or(config::DEFAULT_HTTP_TIMEOUT_SECS);
    let min_score = args
        .min_score
        .or_else(|| config.as_ref().and_then(|c| c.min_score))
        .unwrap_or(config::DEFAULT_MIN_SCORE);

    // Create adapters (dependency injection)
    let fetcher = HttpContentFetcher::new(Duration::from_secs(timeout))?;
    let matcher = KeywordTextMatcher::new();
    let normalizer = AliasNormalizer::new();
    let progress = StderrProgressReporter::new();

    // Create use case with injected dependencies
    let use_case = ResolveLicenseUseCase::new(
        fetcher,
        matcher,
        normalizer,
        progress,
        &cache,
        ProviderRegistry::new(),
        min_score,
    );

    let mut request = ResolveRequest::new(identifier);
    if let Some(ecosystem) = args.ecosystem {
        request = request.with_ecosystem(ecosystem);
    }
    if args.file {
        request = request.as_file();
    } else if args.text {
        request = request.as_text();
    }

    let result = use_case.execute(request)?;
    println!("{}", serde_json::to_string_pretty(&result)?);

    if result.success {
        Ok(ExitCode::Success)
    } else {
        Ok(ExitCode::NoLicenseFound)
    }
}

fn resolve_cache_mode(args: &Args, config: Option<&ConfigFile>) -> Result<CacheMode> {
    let mode = args
        .cache_mode
        .as_deref()
        .or_else(|| config.and_then(|c| c.cache_mode.as_deref()));
    match mode {
        Some(mode) => mode.parse::<CacheMode>().map_err(anyhow::Error::msg),
        None => Ok(CacheMode::default()),
    }
}
