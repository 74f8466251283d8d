//! Command-line interface for the Wayfinder recommendation engine.
//!
//! The `recommend` subcommand loads the trained artifacts, scores a JSON
//! request against them, and writes the ranked recommendations as JSON to
//! stdout. Fatal failures print a diagnostic to stderr and exit non-zero.

#![forbid(unsafe_code)]

use clap::{Parser, Subcommand};

mod error;
mod recommend;

pub use error::CliError;
use recommend::{RecommendArgs, run_recommend};

pub(crate) const ARG_RECOMMEND_REQUEST: &str = "request";
pub(crate) const ARG_RECOMMEND_ARTEFACTS_DIR: &str = "artefacts-dir";
pub(crate) const ARG_RECOMMEND_MODEL: &str = "model";
pub(crate) const ARG_RECOMMEND_VOCABULARY: &str = "vocabulary";
pub(crate) const ARG_RECOMMEND_COLUMNS: &str = "columns";
pub(crate) const ENV_RECOMMEND_REQUEST: &str = "WAYFINDER_CMDS_RECOMMEND_REQUEST_PATH";

/// Run the Wayfinder CLI with the current process arguments and environment.
///
/// # Errors
/// Returns [`CliError`] for argument, configuration, artifact, request, or
/// output failures. Per-place scoring failures are not fatal and surface as
/// degraded entries in the output instead.
pub fn run() -> Result<(), CliError> {
    let cli = Cli::try_parse().map_err(CliError::ArgumentParsing)?;
    match cli.command {
        Command::Recommend(args) => run_recommend(args),
    }
}

#[derive(Debug, Parser)]
#[command(
    name = "wayfinder",
    about = "Score and rank travel destinations against a traveller profile",
    version
)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Score a recommendation request against the trained artifacts.
    Recommend(RecommendArgs),
}
