//! Feature alignment and scoring for Wayfinder travel recommendations.
//!
//! The crate turns heterogeneous, partially multi-valued preference and
//! place records into the exact fixed-width numeric row a trained
//! classifier expects, scores every candidate place consistently, and
//! produces an explainable, ranked result list:
//! - **Category vocabulary** ([`CategoryVocabulary`]) carries the
//!   trained-time label sets and the fixed `feature_columns` order.
//! - **Multi-label encoding** ([`MultiLabelEncoder`]) maps label sets onto
//!   fixed-width binary columns named `{field}_{label}`.
//! - **Feature row construction** ([`build_feature_row`]) combines numeric
//!   passthrough, one-hot categoricals, and union-encoded multi-label
//!   fields, then [`reconcile`] aligns the row against the trained schema
//!   and reports any drift.
//! - **Scoring** ([`ScoringContext`]) drives a
//!   [`Classifier`](wayfinder_core::Classifier) over each aligned row; the
//!   shipped artifact is the softmax [`LinearModel`] stored in `model.bin`.
//! - **Ranking** ([`rank`]) orders outcomes by descending score, stable on
//!   ties, with per-place failures degraded to zero-scored entries.
//!
//! # Examples
//!
//! ```no_run
//! use camino::Utf8Path;
//! use wayfinder_scorer::{BatchOptions, Formulation, ScoringContext, rank};
//! use wayfinder_core::RecommendRequest;
//!
//! # fn run(request: &RecommendRequest) -> Result<(), Box<dyn std::error::Error>> {
//! let context =
//!     ScoringContext::from_dir(Utf8Path::new("artifacts"), Formulation::PerPlace)?;
//! let outcome = context.score_batch(request, &BatchOptions::default());
//! let ranked = rank(outcome.outcomes());
//! # Ok(())
//! # }
//! ```

#![forbid(unsafe_code)]

mod builder;
mod encoder;
mod engine;
mod error;
mod explain;
mod model;
mod rank;
mod row;
mod vocabulary;

pub use builder::build_feature_row;
pub use encoder::MultiLabelEncoder;
pub use engine::{
    BatchOptions, BatchOutcome, Formulation, PlaceOutcome, ScoredPlace, ScoringContext,
    ScoringFailure,
};
pub use error::{ArtifactError, PlaceScoringError};
pub use explain::matched_features;
pub use model::{LinearModel, ModelShapeError, read_model_file, write_model_file};
pub use rank::rank;
pub use row::{AlignedRow, DriftReport, FeatureRow, reconcile};
pub use vocabulary::CategoryVocabulary;

/// File name of the trained classifier artifact inside an artifact directory.
pub const MODEL_FILE: &str = "model.bin";
/// File name of the per-field label vocabulary artifact.
pub const VOCABULARY_FILE: &str = "vocabulary.json";
/// File name of the ordered feature column artifact.
pub const COLUMNS_FILE: &str = "feature_columns.json";

/// The numeric passthrough column taken directly from preferences.
pub(crate) const COLUMN_AGE: &str = "age";
/// One-hot field name for the traveller's gender.
pub(crate) const FIELD_GENDER: &str = "gender";
/// One-hot field name for the effective climate.
pub(crate) const FIELD_CLIMATE: &str = "climate";
/// Multi-label field for place types.
pub(crate) const FIELD_PLACE_TYPE: &str = "place_type";
/// Multi-label field for activities.
pub(crate) const FIELD_HOBBY: &str = "hobby";
/// Multi-label field for health considerations.
pub(crate) const FIELD_HEALTH_ISSUES: &str = "health_issues";

/// Bincode options used for serializing and deserializing the model artifact.
pub(crate) fn bincode_options() -> impl bincode::Options {
    bincode::DefaultOptions::new()
}

#[cfg(test)]
mod tests;
