//! End-to-end coverage for feature alignment, scoring, and ranking.
#![forbid(unsafe_code)]
#![expect(
    clippy::expect_used,
    reason = "tests should fail fast when setup breaks"
)]

use std::collections::BTreeMap;
use std::time::Duration;

use camino::Utf8PathBuf;
use rstest::{fixture, rstest};
use tempfile::TempDir;
use wayfinder_core::{Place, PlaceFeatures, Preferences, RecommendRequest};

use crate::{
    BatchOptions, CategoryVocabulary, Formulation, LinearModel, PlaceOutcome, PlaceScoringError,
    ScoringContext, rank, write_model_file,
};

fn trained_columns() -> Vec<String> {
    [
        "age",
        "gender_female",
        "gender_male",
        "climate_Tropical",
        "climate_Cold",
        "place_type_Beach",
        "place_type_Mountain",
        "hobby_Hiking",
        "hobby_Swimming",
        "health_issues_Asthma",
    ]
    .into_iter()
    .map(ToOwned::to_owned)
    .collect()
}

fn trained_fields() -> BTreeMap<String, Vec<String>> {
    BTreeMap::from([
        (
            "place_type".to_owned(),
            vec!["Beach".to_owned(), "Mountain".to_owned()],
        ),
        (
            "hobby".to_owned(),
            vec!["Hiking".to_owned(), "Swimming".to_owned()],
        ),
        ("health_issues".to_owned(), vec!["Asthma".to_owned()]),
    ])
}

/// Two-class model preferring beaches for one class and mountains for the
/// other, indifferent to age and gender.
fn trained_model() -> LinearModel {
    let sunny_cove = vec![0.0, 0.0, 0.0, 1.0, -1.0, 2.0, -2.0, -2.0, 2.0, 0.0];
    let high_pass = vec![0.0, 0.0, 0.0, -1.0, 1.0, -2.0, 2.0, 2.0, -2.0, 0.0];
    LinearModel::new(
        vec!["Sunny Cove".to_owned(), "High Pass".to_owned()],
        vec![sunny_cove, high_pass],
        vec![0.0, 0.0],
    )
    .expect("consistent model shape")
}

fn in_memory_context() -> ScoringContext<LinearModel> {
    ScoringContext::new(
        trained_model(),
        CategoryVocabulary::new(trained_columns(), trained_fields()),
        Formulation::PerPlace,
    )
}

#[fixture]
fn context() -> ScoringContext<LinearModel> {
    in_memory_context()
}

fn sunny_cove(id: &str) -> Place {
    Place::new(
        id,
        "Sunny Cove",
        PlaceFeatures {
            place_type: vec!["Beach".to_owned()],
            hobby: vec!["Swimming".to_owned()],
            climate: vec!["Tropical".to_owned()],
            health_issues: Vec::new(),
            age_min: 18,
            age_max: 60,
        },
    )
}

fn matching_preferences() -> Preferences {
    Preferences::new(30)
        .expect("valid age")
        .with_gender("female")
        .with_climate("Tropical")
        .with_place_types(["Beach"])
        .with_hobbies(["Swimming"])
}

fn disjoint_preferences() -> Preferences {
    Preferences::new(70)
        .expect("valid age")
        .with_gender("female")
        .with_climate("Cold")
        .with_place_types(["Mountain"])
        .with_hobbies(["Hiking"])
}

#[rstest]
fn matching_preferences_outscore_disjoint_ones(context: ScoringContext<LinearModel>) {
    let place = sunny_cove("p1");

    let matching = context
        .score_place(&matching_preferences(), &place)
        .expect("score matching profile");
    let disjoint = context
        .score_place(&disjoint_preferences(), &place)
        .expect("score disjoint profile");

    assert!(
        matching > disjoint,
        "expected {matching} > {disjoint} for the matching profile"
    );
}

#[rstest]
fn scores_stay_in_percentage_range(context: ScoringContext<LinearModel>) {
    let score = context
        .score_place(&matching_preferences(), &sunny_cove("p1"))
        .expect("score place");
    assert!((0.0..=100.0).contains(&score));
}

#[rstest]
fn unknown_class_degrades_one_place_without_aborting(context: ScoringContext<LinearModel>) {
    let mut lost_city = sunny_cove("p2");
    lost_city.name = "Lost City".to_owned();
    let request = RecommendRequest {
        preferences: matching_preferences(),
        places: vec![sunny_cove("p1"), lost_city],
    };

    let outcome = context.score_batch(&request, &BatchOptions::default());

    assert_eq!(outcome.scored().count(), 1);
    let failure = outcome.failures().next().expect("one failure");
    assert_eq!(failure.place_id, "p2");
    assert_eq!(
        failure.error,
        PlaceScoringError::UnknownClass {
            name: "Lost City".to_owned()
        }
    );

    let ranked = rank(outcome.outcomes());
    let degraded = ranked.last().expect("degraded entry ranks last");
    assert_eq!(degraded.place_id, "p2");
    assert_eq!(degraded.score, 0.0);
    assert!(degraded.matched_features.is_empty());
}

#[rstest]
fn identical_scores_preserve_request_order(context: ScoringContext<LinearModel>) {
    let request = RecommendRequest {
        preferences: matching_preferences(),
        places: vec![sunny_cove("first"), sunny_cove("second"), sunny_cove("third")],
    };

    let outcome = context.score_batch(&request, &BatchOptions::default());
    let ranked = rank(outcome.outcomes());

    let ids: Vec<&str> = ranked.iter().map(|entry| entry.place_id.as_str()).collect();
    assert_eq!(ids, vec!["first", "second", "third"]);
}

#[rstest]
fn disabling_explanations_never_changes_scores(context: ScoringContext<LinearModel>) {
    let request = RecommendRequest {
        preferences: matching_preferences(),
        places: vec![sunny_cove("p1")],
    };

    let with_explanations = context.score_batch(&request, &BatchOptions::default());
    let without_explanations = context.score_batch(
        &request,
        &BatchOptions {
            explanations: false,
            ..BatchOptions::default()
        },
    );

    let verbose = with_explanations.scored().next().expect("scored entry");
    let quiet = without_explanations.scored().next().expect("scored entry");
    assert_eq!(verbose.score, quiet.score);
    assert!(!verbose.matched_features.is_empty());
    assert!(quiet.matched_features.is_empty());
}

#[rstest]
fn elapsed_deadline_degrades_remaining_places(context: ScoringContext<LinearModel>) {
    let request = RecommendRequest {
        preferences: matching_preferences(),
        places: vec![sunny_cove("p1")],
    };
    let options = BatchOptions {
        deadline: Some(Duration::ZERO),
        ..BatchOptions::default()
    };

    // A zero budget has always elapsed by the time any place starts.
    let outcome = context.score_batch(&request, &options);

    let failure = outcome.failures().next().expect("deadline failure");
    assert_eq!(
        failure.error,
        PlaceScoringError::DeadlineExceeded {
            place_id: "p1".to_owned()
        }
    );
}

#[rstest]
fn malformed_place_features_fail_that_place_only(context: ScoringContext<LinearModel>) {
    let mut no_climate = sunny_cove("p3");
    no_climate.features.climate = Vec::new();
    let request = RecommendRequest {
        preferences: matching_preferences(),
        places: vec![sunny_cove("p1"), no_climate],
    };

    let outcome = context.score_batch(&request, &BatchOptions::default());

    assert_eq!(outcome.scored().count(), 1);
    assert!(matches!(
        outcome.outcomes().last(),
        Some(PlaceOutcome::Failed(_))
    ));
}

#[rstest]
fn binary_formulation_scores_by_the_positive_class() {
    let model = LinearModel::new(
        vec!["not_recommended".to_owned(), "recommended".to_owned()],
        vec![
            vec![0.0, -1.0, 1.0, 0.0, 0.0, 0.0, 0.0, 0.0, 0.0, 0.0],
            vec![0.0, 1.0, -1.0, 0.0, 0.0, 0.0, 0.0, 0.0, 0.0, 0.0],
        ],
        vec![0.0, 0.0],
    )
    .expect("consistent model shape");
    let binary_context = ScoringContext::new(
        model,
        CategoryVocabulary::new(trained_columns(), trained_fields()),
        Formulation::Binary {
            positive_class: "recommended".to_owned(),
        },
    );

    // Place names are irrelevant to the binary formulation.
    let mut place = sunny_cove("p1");
    place.name = "Anywhere".to_owned();
    let score = binary_context
        .score_place(&matching_preferences(), &place)
        .expect("binary scoring ignores place names");
    assert!((0.0..=100.0).contains(&score));
}

#[rstest]
fn context_loads_from_an_artifact_directory() {
    let temp = TempDir::new().expect("tempdir");
    let dir = Utf8PathBuf::from_path_buf(temp.path().to_path_buf()).expect("utf8 dir");

    write_model_file(&dir.join(crate::MODEL_FILE), &trained_model()).expect("write model");
    let columns_json = serde_json::to_string(&trained_columns()).expect("serialise columns");
    std::fs::write(dir.join(crate::COLUMNS_FILE).as_std_path(), columns_json)
        .expect("write columns");
    let vocabulary_json = serde_json::to_string(&trained_fields()).expect("serialise vocabulary");
    std::fs::write(dir.join(crate::VOCABULARY_FILE).as_std_path(), vocabulary_json)
        .expect("write vocabulary");

    let loaded = ScoringContext::from_dir(&dir, Formulation::PerPlace).expect("load context");

    let score = loaded
        .score_place(&matching_preferences(), &sunny_cove("p1"))
        .expect("score with loaded artifacts");
    let in_memory = in_memory_context()
        .score_place(&matching_preferences(), &sunny_cove("p1"))
        .expect("score with in-memory artifacts");
    assert_eq!(score, in_memory);
}
