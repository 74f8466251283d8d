//! Batch scoring of candidate places against one traveller profile.
//!
//! [`ScoringContext`] bundles the trained model and vocabulary into an
//! explicitly constructed, immutable object shared read-only by every
//! builder and scorer call. Per-place scoring is independent, so the batch
//! runs on a `rayon` parallel iterator; each place yields a typed
//! [`PlaceOutcome`] and one failure never aborts the rest.
#![forbid(unsafe_code)]

use std::time::{Duration, Instant};

use camino::Utf8Path;
use log::{debug, warn};
use rayon::prelude::*;
use wayfinder_core::{Classifier, Place, Preferences, Recommendation, RecommendRequest};

use crate::builder::build_feature_row;
use crate::error::{ArtifactError, PlaceScoringError};
use crate::explain::matched_features;
use crate::model::{LinearModel, read_model_file};
use crate::row::reconcile;
use crate::vocabulary::CategoryVocabulary;
use crate::{COLUMNS_FILE, MODEL_FILE, VOCABULARY_FILE};

/// How a class probability is turned into a place score.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Formulation {
    /// The model predicts recommend vs not-recommend; every place is scored
    /// by the probability of the designated positive class.
    Binary {
        /// Class label standing for "recommend".
        positive_class: String,
    },
    /// The model's classes are place names; each place is scored by the
    /// probability mass assigned to its own name.
    PerPlace,
}

/// One successfully scored place.
#[derive(Debug, Clone, PartialEq)]
pub struct ScoredPlace {
    /// Identifier echoed from the request.
    pub place_id: String,
    /// Display name of the place.
    pub name: String,
    /// Score in `0.0..=100.0`, rounded to two decimals.
    pub score: f64,
    /// Advisory match explanations; empty when disabled.
    pub matched_features: Vec<String>,
}

/// One place that could not be scored.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScoringFailure {
    /// Identifier echoed from the request.
    pub place_id: String,
    /// Display name of the place.
    pub name: String,
    /// Why scoring failed for this place.
    pub error: PlaceScoringError,
}

/// The typed result for one candidate place.
#[derive(Debug, Clone, PartialEq)]
pub enum PlaceOutcome {
    /// The place was scored.
    Scored(ScoredPlace),
    /// The place failed scoring and degrades to a zero entry.
    Failed(ScoringFailure),
}

impl PlaceOutcome {
    /// The identifier of the place this outcome belongs to.
    #[must_use]
    pub fn place_id(&self) -> &str {
        match self {
            Self::Scored(scored) => &scored.place_id,
            Self::Failed(failure) => &failure.place_id,
        }
    }

    /// The wire entry for this outcome; failures become degraded entries.
    #[must_use]
    pub fn to_recommendation(&self) -> Recommendation {
        match self {
            Self::Scored(scored) => Recommendation {
                place_id: scored.place_id.clone(),
                score: scored.score,
                name: scored.name.clone(),
                matched_features: scored.matched_features.clone(),
            },
            Self::Failed(failure) => {
                Recommendation::degraded(failure.place_id.clone(), failure.name.clone())
            }
        }
    }
}

/// All outcomes of one batch, in request order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct BatchOutcome {
    outcomes: Vec<PlaceOutcome>,
}

impl BatchOutcome {
    /// Every per-place outcome, in request order.
    #[must_use]
    pub fn outcomes(&self) -> &[PlaceOutcome] {
        &self.outcomes
    }

    /// The successfully scored subset, in request order.
    pub fn scored(&self) -> impl Iterator<Item = &ScoredPlace> {
        self.outcomes.iter().filter_map(|outcome| match outcome {
            PlaceOutcome::Scored(scored) => Some(scored),
            PlaceOutcome::Failed(_) => None,
        })
    }

    /// The failed subset, in request order.
    pub fn failures(&self) -> impl Iterator<Item = &ScoringFailure> {
        self.outcomes.iter().filter_map(|outcome| match outcome {
            PlaceOutcome::Scored(_) => None,
            PlaceOutcome::Failed(failure) => Some(failure),
        })
    }
}

/// Knobs for one batch run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BatchOptions {
    /// Degrade places whose scoring starts after this budget has elapsed.
    pub deadline: Option<Duration>,
    /// Attach match explanations to scored entries.
    pub explanations: bool,
}

impl Default for BatchOptions {
    fn default() -> Self {
        Self {
            deadline: None,
            explanations: true,
        }
    }
}

/// The immutable trained state one batch scores against.
///
/// Constructed once per invocation from the artifact files and passed into
/// every scoring call; never ambient or global. Sharing is read-only, so
/// parallel place evaluation needs no synchronisation.
#[derive(Debug, Clone)]
pub struct ScoringContext<C: Classifier> {
    model: C,
    vocabulary: CategoryVocabulary,
    formulation: Formulation,
}

impl<C: Classifier> ScoringContext<C> {
    /// Bundle a classifier, vocabulary, and formulation.
    #[must_use]
    pub const fn new(model: C, vocabulary: CategoryVocabulary, formulation: Formulation) -> Self {
        Self {
            model,
            vocabulary,
            formulation,
        }
    }

    /// The trained vocabulary this context aligns rows against.
    #[must_use]
    pub const fn vocabulary(&self) -> &CategoryVocabulary {
        &self.vocabulary
    }

    /// The classifier this context scores with.
    #[must_use]
    pub const fn model(&self) -> &C {
        &self.model
    }

    /// Score one place against the traveller's preferences.
    ///
    /// Builds the feature row, aligns it against the trained schema
    /// (logging a warning when reconciliation changed the row), invokes the
    /// classifier, and extracts the formulation's probability as a score in
    /// `0.0..=100.0` rounded to two decimals.
    ///
    /// # Errors
    /// Returns [`PlaceScoringError`] for malformed place features, unknown
    /// class names, or classifier rejection. Callers recover per place.
    pub fn score_place(
        &self,
        preferences: &Preferences,
        place: &Place,
    ) -> Result<f64, PlaceScoringError> {
        let row = build_feature_row(preferences, place, &self.vocabulary)?;
        let (aligned, drift) = reconcile(&row, self.vocabulary.columns());
        if !drift.is_empty() {
            warn!(
                "schema drift while scoring place {}: injected {:?}, dropped {:?}",
                place.id, drift.injected, drift.dropped
            );
        }

        let probabilities = self.model.predict_proba(aligned.values()).map_err(|source| {
            PlaceScoringError::Classifier {
                place_id: place.id.clone(),
                source,
            }
        })?;

        let class = match &self.formulation {
            Formulation::PerPlace => place.name.as_str(),
            Formulation::Binary { positive_class } => positive_class.as_str(),
        };
        let index = self
            .model
            .class_index(class)
            .ok_or_else(|| PlaceScoringError::UnknownClass {
                name: class.to_owned(),
            })?;
        let probability = probabilities.get(index).copied().unwrap_or(0.0);
        Ok(to_percentage(probability))
    }

    /// Score every place in the request, in parallel, with per-place
    /// isolation.
    ///
    /// Outcomes are collected in request order so downstream tie-breaking
    /// stays deterministic. Places whose evaluation starts after the
    /// optional deadline are degraded with
    /// [`PlaceScoringError::DeadlineExceeded`] instead of blocking the
    /// batch.
    #[must_use]
    pub fn score_batch(&self, request: &RecommendRequest, options: &BatchOptions) -> BatchOutcome {
        let started = Instant::now();
        let outcomes: Vec<PlaceOutcome> = request
            .places
            .par_iter()
            .map(|place| self.place_outcome(&request.preferences, place, options, started))
            .collect();

        let failures = outcomes
            .iter()
            .filter(|outcome| matches!(outcome, PlaceOutcome::Failed(_)))
            .count();
        debug!(
            "scored {} of {} places in {:?}",
            outcomes.len() - failures,
            outcomes.len(),
            started.elapsed()
        );
        BatchOutcome { outcomes }
    }

    fn place_outcome(
        &self,
        preferences: &Preferences,
        place: &Place,
        options: &BatchOptions,
        started: Instant,
    ) -> PlaceOutcome {
        let past_deadline = options
            .deadline
            .is_some_and(|deadline| started.elapsed() >= deadline);
        let result = if past_deadline {
            Err(PlaceScoringError::DeadlineExceeded {
                place_id: place.id.clone(),
            })
        } else {
            self.score_place(preferences, place)
        };

        match result {
            Ok(score) => {
                let explanations = if options.explanations {
                    matched_features(preferences, &place.features)
                } else {
                    Vec::new()
                };
                PlaceOutcome::Scored(ScoredPlace {
                    place_id: place.id.clone(),
                    name: place.name.clone(),
                    score,
                    matched_features: explanations,
                })
            }
            Err(error) => {
                warn!("failed to score place {}: {error}", place.id);
                PlaceOutcome::Failed(ScoringFailure {
                    place_id: place.id.clone(),
                    name: place.name.clone(),
                    error,
                })
            }
        }
    }
}

impl ScoringContext<LinearModel> {
    /// Load a context from explicit artifact paths.
    ///
    /// # Errors
    /// Returns [`ArtifactError`] when any artifact is missing or corrupt.
    /// All three artifacts load before any scoring starts.
    pub fn from_paths(
        model_path: &Utf8Path,
        vocabulary_path: &Utf8Path,
        columns_path: &Utf8Path,
        formulation: Formulation,
    ) -> Result<Self, ArtifactError> {
        let vocabulary = CategoryVocabulary::from_paths(columns_path, vocabulary_path)?;
        let model = read_model_file(model_path)?;
        Ok(Self::new(model, vocabulary, formulation))
    }

    /// Load a context from a directory holding the default artifact names.
    ///
    /// # Errors
    /// Returns [`ArtifactError`] when any artifact is missing or corrupt.
    pub fn from_dir(dir: &Utf8Path, formulation: Formulation) -> Result<Self, ArtifactError> {
        Self::from_paths(
            &dir.join(MODEL_FILE),
            &dir.join(VOCABULARY_FILE),
            &dir.join(COLUMNS_FILE),
            formulation,
        )
    }
}

#[expect(
    clippy::float_arithmetic,
    reason = "score extraction scales a probability to 0..=100 and rounds to two decimals"
)]
fn to_percentage(probability: f64) -> f64 {
    (probability * 100.0 * 100.0).round() / 100.0
}
