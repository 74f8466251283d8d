//! Human-readable match explanations.
//!
//! Explanations are advisory text only: they never influence the score and
//! toggling them never changes the ranking order.
#![forbid(unsafe_code)]

use wayfinder_core::{PlaceFeatures, Preferences};

/// Reasons a place matched the traveller's preferences.
///
/// Emits, in order: age-range membership, place-type overlap, activity
/// overlap, climate membership, and the absence of health conflicts
/// (phrased as a positive signal). Label overlaps are reported in the
/// traveller's stated order so output is deterministic.
///
/// # Examples
/// ```
/// use wayfinder_core::{PlaceFeatures, Preferences};
/// use wayfinder_scorer::matched_features;
///
/// let preferences = Preferences::new(30)?
///     .with_climate("Tropical")
///     .with_hobbies(["Swimming"]);
/// let features = PlaceFeatures {
///     hobby: vec!["Swimming".into(), "Diving".into()],
///     climate: vec!["Tropical".into()],
///     age_min: 18,
///     age_max: 60,
///     ..PlaceFeatures::default()
/// };
/// let reasons = matched_features(&preferences, &features);
/// assert!(reasons.contains(&"Age 30 fits range 18-60".to_owned()));
/// assert!(reasons.contains(&"Activities: Swimming".to_owned()));
/// # Ok::<(), wayfinder_core::PreferencesError>(())
/// ```
#[must_use]
pub fn matched_features(preferences: &Preferences, features: &PlaceFeatures) -> Vec<String> {
    let mut reasons = Vec::new();

    if features.suits_age(preferences.age) {
        reasons.push(format!(
            "Age {} fits range {}-{}",
            preferences.age, features.age_min, features.age_max
        ));
    }

    let place_types = stated_overlap(&preferences.place_type, &features.place_type);
    if !place_types.is_empty() {
        reasons.push(format!("Place types: {}", place_types.join(", ")));
    }

    let activities = stated_overlap(&preferences.hobby, &features.hobby);
    if !activities.is_empty() {
        reasons.push(format!("Activities: {}", activities.join(", ")));
    }

    if features.climate.contains(&preferences.climate) {
        reasons.push(format!("Climate: {}", preferences.climate));
    }

    let conflicts = stated_overlap(&preferences.health_issues, &features.health_issues);
    if conflicts.is_empty() {
        reasons.push("No health restrictions".to_owned());
    }

    reasons
}

/// Labels present on both sides, in the traveller's stated order.
fn stated_overlap<'a>(stated: &'a [String], offered: &[String]) -> Vec<&'a str> {
    stated
        .iter()
        .filter(|label| offered.contains(label))
        .map(String::as_str)
        .collect()
}

#[cfg(test)]
mod tests {
    use rstest::{fixture, rstest};

    use super::*;

    #[fixture]
    fn beach_features() -> PlaceFeatures {
        PlaceFeatures {
            place_type: vec!["Beach".to_owned()],
            hobby: vec!["Swimming".to_owned(), "Diving".to_owned()],
            climate: vec!["Tropical".to_owned()],
            health_issues: vec!["Heat Sensitivity".to_owned()],
            age_min: 18,
            age_max: 60,
        }
    }

    #[rstest]
    fn full_match_emits_every_reason(beach_features: PlaceFeatures) {
        let preferences = Preferences::new(30)
            .expect("valid age")
            .with_climate("Tropical")
            .with_place_types(["Beach"])
            .with_hobbies(["Swimming"]);

        let reasons = matched_features(&preferences, &beach_features);

        assert_eq!(
            reasons,
            vec![
                "Age 30 fits range 18-60".to_owned(),
                "Place types: Beach".to_owned(),
                "Activities: Swimming".to_owned(),
                "Climate: Tropical".to_owned(),
                "No health restrictions".to_owned(),
            ]
        );
    }

    #[rstest]
    fn health_conflict_suppresses_the_positive_signal(beach_features: PlaceFeatures) {
        let preferences = Preferences::new(30)
            .expect("valid age")
            .with_health_issues(["Heat Sensitivity"]);

        let reasons = matched_features(&preferences, &beach_features);

        assert!(!reasons.contains(&"No health restrictions".to_owned()));
    }

    #[rstest]
    fn disjoint_preferences_still_report_no_health_conflicts(beach_features: PlaceFeatures) {
        let preferences = Preferences::new(75)
            .expect("valid age")
            .with_place_types(["Mountain"])
            .with_hobbies(["Hiking"]);

        let reasons = matched_features(&preferences, &beach_features);

        assert_eq!(reasons, vec!["No health restrictions".to_owned()]);
    }

    #[rstest]
    fn overlaps_follow_the_travellers_stated_order(beach_features: PlaceFeatures) {
        let preferences = Preferences::new(30)
            .expect("valid age")
            .with_hobbies(["Diving", "Swimming"]);

        let reasons = matched_features(&preferences, &beach_features);

        assert!(reasons.contains(&"Activities: Diving, Swimming".to_owned()));
    }
}
