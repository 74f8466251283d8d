//! Core domain types for the Wayfinder engine.
//!
//! These models describe a scoring request end to end: the traveller's
//! [`Preferences`], the candidate [`Place`]s, the [`Classifier`] seam the
//! scoring engine drives, and the ranked [`Recommendation`] entries the
//! engine emits. Constructors and the serde surface apply the defaults the
//! trained artifacts expect, so downstream components can assume complete
//! records.

#![forbid(unsafe_code)]

mod classifier;
mod place;
mod preferences;
mod recommendation;

pub use classifier::{Classifier, ClassifierError};
pub use place::{Place, PlaceFeatures};
pub use preferences::{Preferences, PreferencesError};
pub use recommendation::{RecommendRequest, Recommendation};
