//! The trained linear classifier artifact.
//!
//! Training happens elsewhere; this module loads, validates, and evaluates
//! the softmax linear model persisted to `model.bin`. The artifact uses the
//! same bincode discipline as the engine's other binary artifacts.
#![forbid(unsafe_code)]

use std::fs::File;
use std::io::BufWriter;

use bincode::Options;
use camino::Utf8Path;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use wayfinder_core::{Classifier, ClassifierError};
use wayfinder_fs::ensure_parent_dir;

use crate::bincode_options;
use crate::error::ArtifactError;

/// Errors returned when a model's shape is internally inconsistent.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ModelShapeError {
    /// The model declares no classes.
    #[error("model must declare at least one class")]
    NoClasses,
    /// The number of weight rows does not match the class count.
    #[error("model has {classes} classes but {rows} weight rows")]
    WeightRowCount {
        /// Number of declared classes.
        classes: usize,
        /// Number of weight rows found.
        rows: usize,
    },
    /// The number of intercepts does not match the class count.
    #[error("model has {classes} classes but {intercepts} intercepts")]
    InterceptCount {
        /// Number of declared classes.
        classes: usize,
        /// Number of intercepts found.
        intercepts: usize,
    },
    /// A weight row's width differs from the first row's width.
    #[error("weight row {row} has width {width}, expected {expected}")]
    RaggedWeights {
        /// Index of the offending row.
        row: usize,
        /// Width of the offending row.
        width: usize,
        /// Width of the first row.
        expected: usize,
    },
}

/// A softmax linear classifier over aligned feature rows.
///
/// Holds one weight row and one intercept per class; prediction computes
/// the class logits for a row and normalises them with a numerically
/// stable softmax. The struct is immutable after construction and safe to
/// share across scoring threads.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LinearModel {
    classes: Vec<String>,
    weights: Vec<Vec<f64>>,
    intercepts: Vec<f64>,
}

impl LinearModel {
    /// Validate and construct a model from its trained parameters.
    ///
    /// # Errors
    /// Returns [`ModelShapeError`] when the class, weight, and intercept
    /// shapes disagree.
    pub fn new(
        classes: Vec<String>,
        weights: Vec<Vec<f64>>,
        intercepts: Vec<f64>,
    ) -> Result<Self, ModelShapeError> {
        let model = Self {
            classes,
            weights,
            intercepts,
        };
        model.validate()?;
        Ok(model)
    }

    /// The number of feature columns the model was trained on.
    #[must_use]
    pub fn n_features(&self) -> usize {
        self.weights.first().map_or(0, Vec::len)
    }

    fn validate(&self) -> Result<(), ModelShapeError> {
        if self.classes.is_empty() {
            return Err(ModelShapeError::NoClasses);
        }
        if self.weights.len() != self.classes.len() {
            return Err(ModelShapeError::WeightRowCount {
                classes: self.classes.len(),
                rows: self.weights.len(),
            });
        }
        if self.intercepts.len() != self.classes.len() {
            return Err(ModelShapeError::InterceptCount {
                classes: self.classes.len(),
                intercepts: self.intercepts.len(),
            });
        }
        let expected = self.n_features();
        for (index, weight_row) in self.weights.iter().enumerate() {
            if weight_row.len() != expected {
                return Err(ModelShapeError::RaggedWeights {
                    row: index,
                    width: weight_row.len(),
                    expected,
                });
            }
        }
        Ok(())
    }

    #[expect(
        clippy::float_arithmetic,
        reason = "logit computation is a dot product plus intercept"
    )]
    fn logits(&self, features: &[f64]) -> Vec<f64> {
        self.weights
            .iter()
            .zip(&self.intercepts)
            .map(|(weight_row, intercept)| {
                weight_row
                    .iter()
                    .zip(features)
                    .map(|(weight, value)| weight * value)
                    .sum::<f64>()
                    + intercept
            })
            .collect()
    }
}

impl Classifier for LinearModel {
    fn classes(&self) -> &[String] {
        &self.classes
    }

    #[expect(
        clippy::float_arithmetic,
        reason = "softmax requires exponentiation and normalisation"
    )]
    fn predict_proba(&self, features: &[f64]) -> Result<Vec<f64>, ClassifierError> {
        if self.classes.is_empty() {
            return Err(ClassifierError::NoClasses);
        }
        if features.len() != self.n_features() {
            return Err(ClassifierError::DimensionMismatch {
                expected: self.n_features(),
                actual: features.len(),
            });
        }

        let logits = self.logits(features);
        let max_logit = logits.iter().copied().fold(f64::NEG_INFINITY, f64::max);
        let exps: Vec<f64> = logits
            .iter()
            .map(|logit| (logit - max_logit).exp())
            .collect();
        let total: f64 = exps.iter().sum();
        Ok(exps.iter().map(|value| value / total).collect())
    }
}

/// Load and validate the model artifact at `path`.
///
/// # Errors
/// Returns [`ArtifactError`] when the file is unreadable, undecodable, or
/// fails shape validation.
pub fn read_model_file(path: &Utf8Path) -> Result<LinearModel, ArtifactError> {
    let bytes = std::fs::read(path.as_std_path()).map_err(|source| ArtifactError::ReadModel {
        path: path.to_path_buf(),
        source,
    })?;
    let model: LinearModel =
        bincode_options()
            .deserialize(&bytes)
            .map_err(|source| ArtifactError::DecodeModel {
                path: path.to_path_buf(),
                source,
            })?;
    model
        .validate()
        .map_err(|source| ArtifactError::MalformedModel {
            path: path.to_path_buf(),
            source,
        })?;
    Ok(model)
}

/// Persist a model artifact to `path`, creating parent directories.
///
/// # Errors
/// Propagates filesystem and serialisation failures.
pub fn write_model_file(path: &Utf8Path, model: &LinearModel) -> Result<(), ArtifactError> {
    ensure_parent_dir(path).map_err(|source| ArtifactError::CreateParent {
        path: path
            .parent()
            .map_or_else(|| Utf8Path::new(".").to_path_buf(), Utf8Path::to_path_buf),
        source,
    })?;
    let file = File::create(path.as_std_path()).map_err(|source| ArtifactError::WriteModel {
        path: path.to_path_buf(),
        source,
    })?;
    let writer = BufWriter::new(file);
    bincode_options()
        .serialize_into(writer, model)
        .map_err(|source| ArtifactError::SerialiseModel {
            path: path.to_path_buf(),
            source,
        })?;
    Ok(())
}
