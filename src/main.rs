//! Portfolio EXIF - capture-year tools for portfolio documents.
//!
//! This binary wires the CLI configuration to the library.

use std::path::{Path, PathBuf};
use std::process::ExitCode;

use bytes::Bytes;
use clap::Parser;
use serde::Serialize;
use tracing::{debug, error, info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use portfolio_exif::{
    annotate_years,
    config::{AddConfig, AnnotateConfig, Cli, Command, YearConfig},
    encode_data_url, extract_year,
    format::has_soi,
    mime_for_path, FileStore, Portfolio, PortfolioStore,
};

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    match cli.command {
        Command::Year(config) => run_year(config).await,
        Command::Annotate(config) => run_annotate(config).await,
        Command::Add(config) => run_add(config).await,
    }
}

/// Initialize the tracing/logging subsystem.
fn init_logging(verbose: bool) {
    let env_filter = if verbose {
        "portfolio_exif=debug"
    } else {
        "portfolio_exif=info"
    };

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| env_filter.into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();
}

/// Read an image file.
async fn read_image(path: &Path) -> Result<Bytes, std::io::Error> {
    let data = tokio::fs::read(path).await?;
    if !has_soi(&data) {
        debug!(path = %path.display(), "File does not start with a JPEG SOI marker");
    }
    Ok(Bytes::from(data))
}

// =============================================================================
// Year Command
// =============================================================================

#[derive(Serialize)]
struct YearResult {
    path: PathBuf,
    year: Option<String>,
}

async fn run_year(config: YearConfig) -> ExitCode {
    if let Err(e) = config.validate() {
        error!("Configuration error: {}", e);
        return ExitCode::FAILURE;
    }

    let mut results = Vec::with_capacity(config.images.len());
    let mut failed = false;

    for path in &config.images {
        match read_image(path).await {
            Ok(data) => results.push(YearResult {
                path: path.clone(),
                year: extract_year(&data),
            }),
            Err(e) => {
                error!("Failed to read {}: {}", path.display(), e);
                failed = true;
            }
        }
    }

    if config.json {
        match serde_json::to_string_pretty(&results) {
            Ok(json) => println!("{}", json),
            Err(e) => {
                error!("Failed to serialize results: {}", e);
                return ExitCode::FAILURE;
            }
        }
    } else {
        for result in &results {
            println!(
                "{}: {}",
                result.path.display(),
                result.year.as_deref().unwrap_or("-")
            );
        }
    }

    if failed {
        ExitCode::FAILURE
    } else {
        ExitCode::SUCCESS
    }
}

// =============================================================================
// Annotate Command
// =============================================================================

async fn run_annotate(config: AnnotateConfig) -> ExitCode {
    if let Err(e) = config.validate() {
        error!("Configuration error: {}", e);
        return ExitCode::FAILURE;
    }

    let input = FileStore::new(&config.portfolio);
    let mut portfolio = match input.load().await {
        Ok(Some(portfolio)) => portfolio,
        Ok(None) => {
            error!("No portfolio found at {}", input.identifier());
            return ExitCode::FAILURE;
        }
        Err(e) => {
            error!("Failed to load {}: {}", input.identifier(), e);
            return ExitCode::FAILURE;
        }
    };

    let report = annotate_years(&mut portfolio, config.overwrite);

    println!("Pages with images:  {}", report.scanned);
    println!("Years filled:       {}", report.annotated);
    println!("Already set:        {}", report.skipped);
    println!("No capture year:    {}", report.without_year);
    println!("Undecodable images: {}", report.undecodable);

    if config.dry_run {
        info!("Dry run, nothing saved");
        return ExitCode::SUCCESS;
    }

    let output = FileStore::new(config.output_path());
    if !report.changed() && output.path() == input.path() {
        info!("No changes to save");
        return ExitCode::SUCCESS;
    }

    if let Err(e) = output.save(&portfolio).await {
        error!("Failed to save {}: {}", output.identifier(), e);
        return ExitCode::FAILURE;
    }

    info!("Saved {}", output.identifier());
    ExitCode::SUCCESS
}

// =============================================================================
// Add Command
// =============================================================================

async fn run_add(config: AddConfig) -> ExitCode {
    if let Err(e) = config.validate() {
        error!("Configuration error: {}", e);
        return ExitCode::FAILURE;
    }

    let store = FileStore::new(&config.portfolio);
    let mut portfolio = match store.load().await {
        Ok(Some(portfolio)) => portfolio,
        Ok(None) if config.create => {
            info!("Creating new portfolio at {}", store.identifier());
            Portfolio::new()
        }
        Ok(None) => {
            error!(
                "No portfolio found at {} (pass --create to start one)",
                store.identifier()
            );
            return ExitCode::FAILURE;
        }
        Err(e) => {
            error!("Failed to load {}: {}", store.identifier(), e);
            return ExitCode::FAILURE;
        }
    };

    let mut added = 0usize;
    for path in &config.images {
        let data = match read_image(path).await {
            Ok(data) => data,
            Err(e) => {
                warn!("Skipping {}: {}", path.display(), e);
                continue;
            }
        };

        let data_url = encode_data_url(mime_for_path(path), &data);
        let index = portfolio.add_image_page(data_url);
        let page = &portfolio.pages[index];
        println!(
            "{} -> page {} \"{}\" (year: {})",
            path.display(),
            index + 1,
            page.data.title.as_deref().unwrap_or_default(),
            page.data.year.as_deref().filter(|y| !y.is_empty()).unwrap_or("-")
        );
        added += 1;
    }

    if added == 0 {
        error!("No images could be read");
        return ExitCode::FAILURE;
    }

    if let Err(e) = store.save(&portfolio).await {
        error!("Failed to save {}: {}", store.identifier(), e);
        return ExitCode::FAILURE;
    }

    info!("Added {} page(s) to {}", added, store.identifier());
    ExitCode::SUCCESS
}
