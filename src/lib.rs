//! Facade crate for the Wayfinder travel recommendation engine.
//!
//! This crate re-exports the core domain types alongside the feature
//! alignment, scoring, and ranking surface of `wayfinder-scorer`.

#![forbid(unsafe_code)]

pub use wayfinder_core::{
    Classifier, ClassifierError, Place, PlaceFeatures, Preferences, PreferencesError,
    RecommendRequest, Recommendation,
};
pub use wayfinder_scorer::{
    ArtifactError, BatchOptions, BatchOutcome, CategoryVocabulary, DriftReport, Formulation,
    LinearModel, MultiLabelEncoder, PlaceOutcome, PlaceScoringError, ScoredPlace, ScoringContext,
    ScoringFailure, build_feature_row, matched_features, rank, reconcile,
};
