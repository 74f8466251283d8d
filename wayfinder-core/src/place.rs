//! Candidate places and their trained-feature metadata.

use serde::{Deserialize, Serialize};

/// A candidate destination to score against a traveller's preferences.
///
/// The `name` doubles as the model's class label in the per-place
/// formulation, so it must match the trained class strings exactly.
///
/// # Examples
/// ```
/// use wayfinder_core::Place;
///
/// let place: Place = serde_json::from_str(
///     r#"{
///         "id": "p1",
///         "name": "Sunny Cove",
///         "features": {
///             "place_type": ["Beach"],
///             "hobby": ["Swimming"],
///             "climate": ["Tropical"],
///             "health_issues": [],
///             "age_min": 18,
///             "age_max": 60
///         }
///     }"#,
/// )?;
/// assert_eq!(place.features.age_range(), (18, 60));
/// # Ok::<(), serde_json::Error>(())
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Place {
    /// Opaque identifier, unique within a request.
    pub id: String,
    /// Display name; also the class label in the per-place formulation.
    pub name: String,
    /// Feature metadata recorded for the place at training time.
    pub features: PlaceFeatures,
}

/// Feature metadata describing what a place offers and who it suits.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlaceFeatures {
    /// Place-type labels, e.g. `"Beach"`.
    #[serde(default)]
    pub place_type: Vec<String>,
    /// Activities the place is best for.
    #[serde(default)]
    pub hobby: Vec<String>,
    /// Climates; the first entry is the effective scalar climate.
    #[serde(default)]
    pub climate: Vec<String>,
    /// Health warnings that may conflict with a traveller's issues.
    #[serde(default)]
    pub health_issues: Vec<String>,
    /// Lower bound of the suitable age range, inclusive.
    #[serde(default)]
    pub age_min: u32,
    /// Upper bound of the suitable age range, inclusive.
    #[serde(default = "default_age_max")]
    pub age_max: u32,
}

fn default_age_max() -> u32 {
    100
}

impl Default for PlaceFeatures {
    fn default() -> Self {
        Self {
            place_type: Vec::new(),
            hobby: Vec::new(),
            climate: Vec::new(),
            health_issues: Vec::new(),
            age_min: 0,
            age_max: default_age_max(),
        }
    }
}

impl PlaceFeatures {
    /// Effective scalar climate: the first listed climate, if any.
    #[must_use]
    pub fn effective_climate(&self) -> Option<&str> {
        self.climate.first().map(String::as_str)
    }

    /// The inclusive `(min, max)` suitable age range.
    #[must_use]
    pub const fn age_range(&self) -> (u32, u32) {
        (self.age_min, self.age_max)
    }

    /// Whether `age` falls inside the suitable range.
    #[must_use]
    pub const fn suits_age(&self, age: u32) -> bool {
        self.age_min <= age && age <= self.age_max
    }
}

impl Place {
    /// Construct a place with the given identifier, name, and features.
    #[must_use]
    pub fn new(id: impl Into<String>, name: impl Into<String>, features: PlaceFeatures) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            features,
        }
    }
}
