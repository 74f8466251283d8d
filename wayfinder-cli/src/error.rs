//! Error types emitted by the Wayfinder CLI.
//!
//! Keep this error type reasonably small, as the CLI helpers return
//! `Result<_, CliError>` and the workspace enables `clippy::result_large_err`.

use std::sync::Arc;

use camino::Utf8PathBuf;
use thiserror::Error;
use wayfinder_scorer::ArtifactError;

/// Errors emitted by the Wayfinder CLI.
#[derive(Debug, Error)]
pub enum CliError {
    /// Provided arguments failed Clap validation.
    #[error(transparent)]
    ArgumentParsing(#[from] clap::Error),
    /// Configuration layering failed (files, env, CLI).
    #[error("failed to load configuration: {0}")]
    Configuration(#[from] Arc<ortho_config::OrthoError>),
    /// A required option is missing after configuration merging.
    #[error("missing {field} (set --{field} or {env})")]
    MissingArgument {
        /// Name of the missing CLI option.
        field: &'static str,
        /// Environment variable that can supply it.
        env: &'static str,
    },
    /// A referenced input path does not exist on disk.
    #[error("{field} path {path:?} does not exist or is not a file")]
    MissingSourceFile {
        /// Name of the option that referenced the path.
        field: &'static str,
        /// The missing path.
        path: Utf8PathBuf,
    },
    /// A referenced input path exists but is not a file.
    #[error("{field} path {path:?} exists but is not a file")]
    SourcePathNotFile {
        /// Name of the option that referenced the path.
        field: &'static str,
        /// The offending path.
        path: Utf8PathBuf,
    },
    /// A referenced input path could not be inspected due to an IO error.
    #[error("failed to inspect {field} path {path:?}: {source}")]
    InspectSourcePath {
        /// Name of the option that referenced the path.
        field: &'static str,
        /// The path that could not be inspected.
        path: Utf8PathBuf,
        /// Source error from std I/O.
        #[source]
        source: std::io::Error,
    },
    /// Loading the trained artifacts failed before any scoring began.
    #[error(transparent)]
    LoadArtifacts(#[from] ArtifactError),
    /// Opening the request file failed.
    #[error("failed to open recommendation request at {path:?}: {source}")]
    OpenRequest {
        /// The request path.
        path: Utf8PathBuf,
        /// Source error from std I/O.
        #[source]
        source: std::io::Error,
    },
    /// Request JSON could not be decoded (including a missing `age`).
    #[error("failed to parse recommendation request at {path:?}: {source}")]
    ParseRequest {
        /// The request path.
        path: Utf8PathBuf,
        /// Source error from `serde_json`.
        #[source]
        source: serde_json::Error,
    },
    /// Serializing the ranked output failed.
    #[error("failed to serialise recommendations: {0}")]
    SerialiseOutput(#[source] serde_json::Error),
    /// Writing the ranked output failed.
    #[error("failed to write recommendations: {0}")]
    WriteOutput(#[source] std::io::Error),
}
