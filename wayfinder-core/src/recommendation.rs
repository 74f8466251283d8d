//! Request and response wire types for a scoring batch.

use serde::{Deserialize, Serialize};

use crate::{Place, Preferences};

/// One complete scoring request: a traveller profile and the candidates.
///
/// # Examples
/// ```
/// use wayfinder_core::RecommendRequest;
///
/// let request: RecommendRequest = serde_json::from_str(
///     r#"{"preferences": {"age": 30}, "places": []}"#,
/// )?;
/// assert!(request.places.is_empty());
/// # Ok::<(), serde_json::Error>(())
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RecommendRequest {
    /// The traveller profile every place is scored against.
    pub preferences: Preferences,
    /// Candidate places, in caller order. Order breaks score ties.
    #[serde(default)]
    pub places: Vec<Place>,
}

/// One ranked entry in the engine's output.
///
/// A degraded entry (a place that could not be scored) carries a zero
/// score and no matched features.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Recommendation {
    /// Identifier of the scored place, echoed from the request.
    #[serde(rename = "placeId")]
    pub place_id: String,
    /// Normalised score in `0.0..=100.0`, rounded to two decimals.
    pub score: f64,
    /// Display name of the place.
    pub name: String,
    /// Human-readable reasons the place matched. Advisory only; never
    /// influences the score or the ordering.
    #[serde(rename = "matchedFeatures", default)]
    pub matched_features: Vec<String>,
}

impl Recommendation {
    /// A zero-scored entry for a place that failed scoring.
    #[must_use]
    pub const fn degraded(place_id: String, name: String) -> Self {
        Self {
            place_id,
            score: 0.0,
            name,
            matched_features: Vec::new(),
        }
    }
}
