//! Traveller preferences: the request-scoped profile every candidate place
//! is scored against.
//!
//! A profile is immutable for the duration of a scoring request. Optional
//! single-valued categories fall back to the defaults the trained artifacts
//! were produced with (`"unknown"` gender, `"Temperate"` climate).

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Default gender when the caller omits the field.
pub(crate) const DEFAULT_GENDER: &str = "unknown";
/// Default climate when the caller omits the field.
pub(crate) const DEFAULT_CLIMATE: &str = "Temperate";

/// A traveller's stated preferences for one scoring request.
///
/// Multi-label fields (`place_type`, `hobby`, `health_issues`) hold zero or
/// more simultaneous labels. Label strings are matched exactly downstream;
/// no case folding or trimming is applied anywhere in the pipeline.
///
/// # Examples
/// ```
/// use wayfinder_core::Preferences;
///
/// let prefs: Preferences = serde_json::from_str(
///     r#"{"age": 30, "placeType": ["Beach"], "hobby": ["Swimming"], "health_issues": []}"#,
/// )?;
/// assert_eq!(prefs.age, 30);
/// assert_eq!(prefs.gender, "unknown");
/// assert_eq!(prefs.climate, "Temperate");
/// # Ok::<(), serde_json::Error>(())
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Preferences {
    /// Traveller age in years. The only required numeric passthrough field.
    pub age: u32,
    /// Single-valued gender category.
    #[serde(default = "default_gender")]
    pub gender: String,
    /// Single-valued preferred climate category.
    #[serde(default = "default_climate")]
    pub climate: String,
    /// Preferred place types, e.g. `"Beach"` or `"Mountain"`.
    #[serde(rename = "placeType", default)]
    pub place_type: Vec<String>,
    /// Preferred activities, e.g. `"Swimming"`.
    #[serde(default)]
    pub hobby: Vec<String>,
    /// Health considerations that a destination must not conflict with.
    #[serde(default)]
    pub health_issues: Vec<String>,
}

fn default_gender() -> String {
    DEFAULT_GENDER.to_owned()
}

fn default_climate() -> String {
    DEFAULT_CLIMATE.to_owned()
}

/// Errors returned by [`Preferences::new`].
#[derive(Debug, Error, PartialEq, Eq)]
pub enum PreferencesError {
    /// The age was outside the range the model was trained on.
    #[error("age {age} is outside the supported range 0..=130")]
    AgeOutOfRange {
        /// The rejected age value.
        age: u32,
    },
}

impl Preferences {
    /// Upper bound on ages accepted from callers.
    pub const MAX_AGE: u32 = 130;

    /// Validate and construct a profile with defaulted categories.
    ///
    /// # Errors
    /// Returns [`PreferencesError::AgeOutOfRange`] for implausible ages.
    pub fn new(age: u32) -> Result<Self, PreferencesError> {
        if age > Self::MAX_AGE {
            return Err(PreferencesError::AgeOutOfRange { age });
        }
        Ok(Self {
            age,
            gender: default_gender(),
            climate: default_climate(),
            place_type: Vec::new(),
            hobby: Vec::new(),
            health_issues: Vec::new(),
        })
    }

    /// Replace the gender category while returning `self` for chaining.
    #[must_use]
    pub fn with_gender(mut self, gender: impl Into<String>) -> Self {
        self.gender = gender.into();
        self
    }

    /// Replace the climate category while returning `self` for chaining.
    #[must_use]
    pub fn with_climate(mut self, climate: impl Into<String>) -> Self {
        self.climate = climate.into();
        self
    }

    /// Replace the preferred place types while returning `self`.
    #[must_use]
    pub fn with_place_types<I, S>(mut self, labels: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.place_type = labels.into_iter().map(Into::into).collect();
        self
    }

    /// Replace the preferred activities while returning `self`.
    #[must_use]
    pub fn with_hobbies<I, S>(mut self, labels: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.hobby = labels.into_iter().map(Into::into).collect();
        self
    }

    /// Replace the health considerations while returning `self`.
    #[must_use]
    pub fn with_health_issues<I, S>(mut self, labels: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.health_issues = labels.into_iter().map(Into::into).collect();
        self
    }
}

#[cfg(test)]
mod tests {
    use rstest::rstest;

    use super::*;

    #[rstest]
    fn builder_chain_sets_fields() {
        let prefs = Preferences::new(30)
            .expect("valid age")
            .with_gender("female")
            .with_climate("Tropical")
            .with_place_types(["Beach"])
            .with_hobbies(["Swimming"]);
        assert_eq!(prefs.gender, "female");
        assert_eq!(prefs.climate, "Tropical");
        assert_eq!(prefs.place_type, vec!["Beach".to_owned()]);
        assert_eq!(prefs.hobby, vec!["Swimming".to_owned()]);
        assert!(prefs.health_issues.is_empty());
    }

    #[rstest]
    fn rejects_implausible_age() {
        let err = Preferences::new(200).expect_err("age beyond range");
        assert_eq!(err, PreferencesError::AgeOutOfRange { age: 200 });
    }

    #[rstest]
    fn missing_age_fails_deserialisation() {
        let result: Result<Preferences, _> =
            serde_json::from_str(r#"{"placeType": ["Beach"]}"#);
        assert!(result.is_err(), "age is mandatory");
    }

    #[rstest]
    fn optional_categories_use_training_defaults() {
        let prefs: Preferences = serde_json::from_str(r#"{"age": 44}"#).expect("minimal profile");
        assert_eq!(prefs.gender, DEFAULT_GENDER);
        assert_eq!(prefs.climate, DEFAULT_CLIMATE);
        assert!(prefs.place_type.is_empty());
    }
}
