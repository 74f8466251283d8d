//! Error types raised while loading artifacts or scoring places.
#![forbid(unsafe_code)]

use camino::Utf8PathBuf;
use thiserror::Error;
use wayfinder_core::ClassifierError;

/// Errors raised while loading trained artifacts.
///
/// Every variant is fatal for the whole batch: no scoring starts until the
/// model, vocabulary, and column schema have all loaded.
#[derive(Debug, Error)]
pub enum ArtifactError {
    /// Reading the feature column schema failed.
    #[error("failed to read feature columns at {path}")]
    ReadColumns {
        /// Path to the column schema artifact.
        path: Utf8PathBuf,
        /// Source error from std I/O.
        #[source]
        source: std::io::Error,
    },
    /// Decoding the feature column schema failed.
    #[error("failed to parse feature columns at {path}")]
    ParseColumns {
        /// Path to the column schema artifact.
        path: Utf8PathBuf,
        /// Source error from `serde_json`.
        #[source]
        source: serde_json::Error,
    },
    /// Reading the label vocabulary failed.
    #[error("failed to read vocabulary at {path}")]
    ReadVocabulary {
        /// Path to the vocabulary artifact.
        path: Utf8PathBuf,
        /// Source error from std I/O.
        #[source]
        source: std::io::Error,
    },
    /// Decoding the label vocabulary failed.
    #[error("failed to parse vocabulary at {path}")]
    ParseVocabulary {
        /// Path to the vocabulary artifact.
        path: Utf8PathBuf,
        /// Source error from `serde_json`.
        #[source]
        source: serde_json::Error,
    },
    /// Reading the model artifact failed.
    #[error("failed to read model at {path}")]
    ReadModel {
        /// Path to the model artifact.
        path: Utf8PathBuf,
        /// Source error from std I/O.
        #[source]
        source: std::io::Error,
    },
    /// Decoding the model artifact failed.
    #[error("failed to decode model at {path}")]
    DecodeModel {
        /// Path to the model artifact.
        path: Utf8PathBuf,
        /// Source error from `bincode`.
        #[source]
        source: bincode::Error,
    },
    /// The decoded model failed shape validation.
    #[error("model at {path} is malformed")]
    MalformedModel {
        /// Path to the model artifact.
        path: Utf8PathBuf,
        /// Source error describing the shape problem.
        #[source]
        source: crate::model::ModelShapeError,
    },
    /// Creating the parent directory for an artifact write failed.
    #[error("failed to create parent directory {path}")]
    CreateParent {
        /// Path of the directory that could not be created.
        path: Utf8PathBuf,
        /// Source error from std I/O.
        #[source]
        source: std::io::Error,
    },
    /// Writing the model artifact failed.
    #[error("failed to write model at {path}")]
    WriteModel {
        /// Target file path.
        path: Utf8PathBuf,
        /// Source error from std I/O.
        #[source]
        source: std::io::Error,
    },
    /// Serialising the model to `bincode` failed.
    #[error("failed to serialise model into {path}")]
    SerialiseModel {
        /// Target file path.
        path: Utf8PathBuf,
        /// Source error from `bincode`.
        #[source]
        source: bincode::Error,
    },
}

/// Per-place scoring failures, recovered locally.
///
/// A failing place is emitted as a degraded, zero-scored entry; the rest of
/// the batch continues unaffected.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum PlaceScoringError {
    /// The place listed no climates, so no effective climate exists.
    #[error("place {place_id} has an empty climate list")]
    MissingClimate {
        /// Identifier of the affected place.
        place_id: String,
    },
    /// The place's name is not among the model's classes.
    #[error("place name {name:?} is not a known model class")]
    UnknownClass {
        /// The unmatched class label.
        name: String,
    },
    /// The classifier rejected the aligned feature row.
    #[error("classifier rejected the feature row for place {place_id}")]
    Classifier {
        /// Identifier of the affected place.
        place_id: String,
        /// Source error from the classifier.
        #[source]
        source: ClassifierError,
    },
    /// The per-request deadline elapsed before this place was scored.
    #[error("scoring deadline elapsed before place {place_id} was scored")]
    DeadlineExceeded {
        /// Identifier of the affected place.
        place_id: String,
    },
}
