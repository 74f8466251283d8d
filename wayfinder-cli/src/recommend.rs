//! Recommend command implementation for the Wayfinder CLI.

use std::io::{BufReader, Write};
use std::time::Duration;

use camino::{Utf8Path, Utf8PathBuf};
use clap::Parser;
use log::info;
use ortho_config::{OrthoConfig, SubcmdConfigMerge};
use serde::{Deserialize, Serialize};
use wayfinder_core::{Recommendation, RecommendRequest};
use wayfinder_fs::open_utf8_file;
use wayfinder_scorer::{
    BatchOptions, COLUMNS_FILE, Formulation, LinearModel, MODEL_FILE, ScoringContext,
    VOCABULARY_FILE, rank,
};

use crate::{
    ARG_RECOMMEND_ARTEFACTS_DIR, ARG_RECOMMEND_COLUMNS, ARG_RECOMMEND_MODEL,
    ARG_RECOMMEND_REQUEST, ARG_RECOMMEND_VOCABULARY, CliError, ENV_RECOMMEND_REQUEST,
};

/// CLI arguments for the `recommend` subcommand.
#[derive(Debug, Clone, Parser, Deserialize, Serialize, OrthoConfig, Default)]
#[command(
    long_about = "Score a JSON-encoded recommendation request against the \
                 trained artifacts (model.bin, vocabulary.json, \
                 feature_columns.json) and print the ranked results as \
                 JSON. Paths can come from CLI flags, configuration files, \
                 or environment variables.",
    about = "Score and rank a recommendation request"
)]
#[ortho_config(prefix = "WAYFINDER")]
pub(crate) struct RecommendArgs {
    /// Path to a JSON file containing the recommendation request.
    #[arg(value_name = "path")]
    #[serde(default)]
    pub(crate) request_path: Option<Utf8PathBuf>,
    /// Directory containing the default artifact filenames.
    #[arg(long = ARG_RECOMMEND_ARTEFACTS_DIR, value_name = "dir")]
    #[serde(default)]
    pub(crate) artefacts_dir: Option<Utf8PathBuf>,
    /// Override the path to the trained classifier (`model.bin`).
    #[arg(long = ARG_RECOMMEND_MODEL, value_name = "path")]
    #[serde(default)]
    pub(crate) model: Option<Utf8PathBuf>,
    /// Override the path to the label vocabulary (`vocabulary.json`).
    #[arg(long = ARG_RECOMMEND_VOCABULARY, value_name = "path")]
    #[serde(default)]
    pub(crate) vocabulary: Option<Utf8PathBuf>,
    /// Override the path to the column schema (`feature_columns.json`).
    #[arg(long = ARG_RECOMMEND_COLUMNS, value_name = "path")]
    #[serde(default)]
    pub(crate) columns: Option<Utf8PathBuf>,
    /// Score by this positive class instead of per-place class names.
    #[arg(long = "positive-class", value_name = "class")]
    #[serde(default)]
    pub(crate) positive_class: Option<String>,
    /// Degrade places not yet scored once this many milliseconds elapse.
    #[arg(long = "deadline-ms", value_name = "ms")]
    #[serde(default)]
    pub(crate) deadline_ms: Option<u64>,
    /// Omit match explanations from the output.
    #[arg(long = "no-explanations")]
    #[serde(default)]
    pub(crate) no_explanations: bool,
}

impl RecommendArgs {
    pub(crate) fn into_config(self) -> Result<RecommendConfig, CliError> {
        let merged = self.load_and_merge().map_err(CliError::Configuration)?;
        RecommendConfig::try_from(merged)
    }
}

/// Resolved `recommend` command configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct RecommendConfig {
    /// Path to the JSON request file.
    pub(crate) request_path: Utf8PathBuf,
    /// Path to the trained classifier artifact.
    pub(crate) model: Utf8PathBuf,
    /// Path to the label vocabulary artifact.
    pub(crate) vocabulary: Utf8PathBuf,
    /// Path to the column schema artifact.
    pub(crate) columns: Utf8PathBuf,
    /// How class probabilities become place scores.
    pub(crate) formulation: Formulation,
    /// Per-batch deadline, if any.
    pub(crate) deadline: Option<Duration>,
    /// Whether to attach match explanations.
    pub(crate) explanations: bool,
}

impl RecommendConfig {
    pub(crate) fn validate_sources(&self) -> Result<(), CliError> {
        Self::require_existing(&self.request_path, ARG_RECOMMEND_REQUEST)?;
        Self::require_existing(&self.model, ARG_RECOMMEND_MODEL)?;
        Self::require_existing(&self.vocabulary, ARG_RECOMMEND_VOCABULARY)?;
        Self::require_existing(&self.columns, ARG_RECOMMEND_COLUMNS)?;
        Ok(())
    }

    pub(crate) fn batch_options(&self) -> BatchOptions {
        BatchOptions {
            deadline: self.deadline,
            explanations: self.explanations,
        }
    }

    fn require_existing(path: &Utf8Path, field: &'static str) -> Result<(), CliError> {
        match wayfinder_fs::file_is_file(path) {
            Ok(true) => Ok(()),
            Ok(false) => Err(CliError::SourcePathNotFile {
                field,
                path: path.to_path_buf(),
            }),
            Err(source) if source.kind() == std::io::ErrorKind::NotFound => {
                Err(CliError::MissingSourceFile {
                    field,
                    path: path.to_path_buf(),
                })
            }
            Err(source) => Err(CliError::InspectSourcePath {
                field,
                path: path.to_path_buf(),
                source,
            }),
        }
    }
}

impl TryFrom<RecommendArgs> for RecommendConfig {
    type Error = CliError;

    fn try_from(args: RecommendArgs) -> Result<Self, Self::Error> {
        let request_path = args.request_path.ok_or(CliError::MissingArgument {
            field: ARG_RECOMMEND_REQUEST,
            env: ENV_RECOMMEND_REQUEST,
        })?;

        let artefacts_dir = args.artefacts_dir.unwrap_or_else(|| Utf8PathBuf::from("."));
        let model = args.model.unwrap_or_else(|| artefacts_dir.join(MODEL_FILE));
        let vocabulary = args
            .vocabulary
            .unwrap_or_else(|| artefacts_dir.join(VOCABULARY_FILE));
        let columns = args
            .columns
            .unwrap_or_else(|| artefacts_dir.join(COLUMNS_FILE));

        let formulation = args.positive_class.map_or(Formulation::PerPlace, |class| {
            Formulation::Binary {
                positive_class: class,
            }
        });

        Ok(Self {
            request_path,
            model,
            vocabulary,
            columns,
            formulation,
            deadline: args.deadline_ms.map(Duration::from_millis),
            explanations: !args.no_explanations,
        })
    }
}

/// Builds a scoring context for the current recommend invocation.
pub(super) trait ContextLoader {
    fn load(&self, config: &RecommendConfig) -> Result<ScoringContext<LinearModel>, CliError>;
}

pub(super) struct ArtifactContextLoader;

impl ContextLoader for ArtifactContextLoader {
    fn load(&self, config: &RecommendConfig) -> Result<ScoringContext<LinearModel>, CliError> {
        let context = ScoringContext::from_paths(
            &config.model,
            &config.vocabulary,
            &config.columns,
            config.formulation.clone(),
        )?;
        Ok(context)
    }
}

pub(super) fn run_recommend(args: RecommendArgs) -> Result<(), CliError> {
    let mut stdout = std::io::stdout().lock();
    run_recommend_with(args, &ArtifactContextLoader, &mut stdout)
}

pub(super) fn run_recommend_with(
    args: RecommendArgs,
    loader: &dyn ContextLoader,
    writer: &mut dyn Write,
) -> Result<(), CliError> {
    let config = args.into_config()?;
    run_with_config(&config, loader, writer)
}

pub(super) fn run_with_config(
    config: &RecommendConfig,
    loader: &dyn ContextLoader,
    writer: &mut dyn Write,
) -> Result<(), CliError> {
    config.validate_sources()?;
    let context = loader.load(config)?;
    let request = load_request(&config.request_path)?;
    let outcome = context.score_batch(&request, &config.batch_options());
    info!(
        "ranked {} places from {}",
        outcome.outcomes().len(),
        config.request_path
    );
    write_recommendations(writer, &rank(outcome.outcomes()))
}

/// Loads a JSON-encoded [`RecommendRequest`] from disk.
pub(super) fn load_request(path: &Utf8Path) -> Result<RecommendRequest, CliError> {
    let file = open_utf8_file(path).map_err(|source| CliError::OpenRequest {
        path: path.to_path_buf(),
        source,
    })?;
    let reader = BufReader::new(file);
    serde_json::from_reader(reader).map_err(|source| CliError::ParseRequest {
        path: path.to_path_buf(),
        source,
    })
}

fn write_recommendations(
    writer: &mut dyn Write,
    recommendations: &[Recommendation],
) -> Result<(), CliError> {
    let payload =
        serde_json::to_string_pretty(recommendations).map_err(CliError::SerialiseOutput)?;
    writer
        .write_all(payload.as_bytes())
        .map_err(CliError::WriteOutput)?;
    writer.write_all(b"\n").map_err(CliError::WriteOutput)?;
    Ok(())
}
