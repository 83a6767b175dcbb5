//! Command-line configuration.
//!
//! Settings come from command-line arguments via clap, with environment
//! variable fallbacks using the `PORTFOLIO_` prefix:
//!
//! - `PORTFOLIO_FILE` - Portfolio JSON file (default: Portfolio.json)
//! - `PORTFOLIO_OUTPUT` - Where `annotate` writes its result (default: in place)
//! - `RUST_LOG` - Overrides the log filter chosen by `--verbose`
//!
//! # Example
//!
//! ```text
//! portfolio-exif year photos/*.jpg
//! portfolio-exif annotate Portfolio.json --overwrite
//! portfolio-exif add --portfolio Portfolio.json --create photos/a.jpg photos/b.jpg
//! ```

use std::path::{Path, PathBuf};

use clap::{Args, Parser, Subcommand};

use crate::portfolio::DEFAULT_PORTFOLIO_FILE;

// =============================================================================
// CLI Arguments
// =============================================================================

/// Portfolio EXIF - capture-year tools for portfolio documents.
///
/// Reads the EXIF capture date of JPEG images and fills the year of the
/// portfolio pages that embed them.
#[derive(Parser, Debug, Clone)]
#[command(name = "portfolio-exif")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Enable verbose logging (debug level).
    #[arg(short, long, global = true, default_value_t = false)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Command,
}

/// Available subcommands.
#[derive(Subcommand, Debug, Clone)]
pub enum Command {
    /// Print the capture year of image files.
    Year(YearConfig),

    /// Fill page years in a portfolio from its embedded images.
    Annotate(AnnotateConfig),

    /// Append one single-image page per image file to a portfolio.
    Add(AddConfig),
}

// =============================================================================
// Year Command
// =============================================================================

/// Arguments of `year`.
#[derive(Args, Debug, Clone)]
pub struct YearConfig {
    /// Image files to read.
    #[arg(required = true)]
    pub images: Vec<PathBuf>,

    /// Print results as JSON.
    #[arg(long, default_value_t = false)]
    pub json: bool,
}

impl YearConfig {
    /// Validate the configuration and return an error message if invalid.
    pub fn validate(&self) -> Result<(), String> {
        if self.images.is_empty() {
            return Err("At least one image file is required".to_string());
        }
        Ok(())
    }
}

// =============================================================================
// Annotate Command
// =============================================================================

/// Arguments of `annotate`.
#[derive(Args, Debug, Clone)]
pub struct AnnotateConfig {
    /// Portfolio JSON file to annotate.
    #[arg(default_value = DEFAULT_PORTFOLIO_FILE, env = "PORTFOLIO_FILE")]
    pub portfolio: PathBuf,

    /// Write the result here instead of overwriting the input.
    #[arg(short, long, env = "PORTFOLIO_OUTPUT")]
    pub output: Option<PathBuf>,

    /// Replace years that are already set.
    #[arg(long, default_value_t = false)]
    pub overwrite: bool,

    /// Report what would change without saving.
    #[arg(long, default_value_t = false)]
    pub dry_run: bool,
}

impl AnnotateConfig {
    /// Validate the configuration and return an error message if invalid.
    pub fn validate(&self) -> Result<(), String> {
        if self.portfolio.as_os_str().is_empty() {
            return Err("Portfolio path is required. Pass it or set PORTFOLIO_FILE".to_string());
        }
        if self.dry_run && self.output.is_some() {
            return Err("--output cannot be combined with --dry-run".to_string());
        }
        Ok(())
    }

    /// Path the annotated portfolio is written to.
    pub fn output_path(&self) -> &Path {
        self.output.as_deref().unwrap_or(self.portfolio.as_path())
    }
}

// =============================================================================
// Add Command
// =============================================================================

/// Arguments of `add`.
#[derive(Args, Debug, Clone)]
pub struct AddConfig {
    /// Portfolio JSON file to extend.
    #[arg(long, default_value = DEFAULT_PORTFOLIO_FILE, env = "PORTFOLIO_FILE")]
    pub portfolio: PathBuf,

    /// Create the portfolio if it does not exist yet.
    #[arg(long, default_value_t = false)]
    pub create: bool,

    /// Image files to embed, one page each.
    #[arg(required = true)]
    pub images: Vec<PathBuf>,
}

impl AddConfig {
    /// Validate the configuration and return an error message if invalid.
    pub fn validate(&self) -> Result<(), String> {
        if self.portfolio.as_os_str().is_empty() {
            return Err("Portfolio path is required. Set --portfolio or PORTFOLIO_FILE".to_string());
        }
        if self.images.is_empty() {
            return Err("At least one image file is required".to_string());
        }
        if self.images.iter().any(|p| p == &self.portfolio) {
            return Err("The portfolio file cannot also be added as an image".to_string());
        }
        Ok(())
    }
}

// =============================================================================
// Tests
// =============================================================================
