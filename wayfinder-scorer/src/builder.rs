//! Feature row construction for one (preferences, place) pair.
#![forbid(unsafe_code)]

use wayfinder_core::{Place, Preferences};

use crate::error::PlaceScoringError;
use crate::row::FeatureRow;
use crate::vocabulary::CategoryVocabulary;
use crate::{
    COLUMN_AGE, FIELD_CLIMATE, FIELD_GENDER, FIELD_HEALTH_ISSUES, FIELD_HOBBY, FIELD_PLACE_TYPE,
};

/// Build the feature row for one (preferences, place) pair.
///
/// The row combines:
/// 1. the numeric `age` passthrough from preferences;
/// 2. one-hot columns for the traveller's gender and the place's effective
///    climate (the first entry of its climate list): the observed value is
///    set to 1 and every sibling column the schema trained for that field
///    is set to 0, so an in-vocabulary input produces no drift;
/// 3. for each multi-label field, the binary encoding of the **union** of
///    the traveller's stated labels and the place's own labels. A place
///    matches on a label if either side expresses it; the union biases the
///    row toward mutual overlap and is preserved for parity with the
///    trained artifact.
///
/// The returned row is not yet aligned; callers must pass it through
/// [`reconcile`](crate::reconcile) before presenting it to a classifier.
///
/// # Errors
/// Returns [`PlaceScoringError::MissingClimate`] when the place lists no
/// climates. Unknown categorical or multi-label values never fail; they
/// are dropped during encoding or reconciliation.
pub fn build_feature_row(
    preferences: &Preferences,
    place: &Place,
    vocabulary: &CategoryVocabulary,
) -> Result<FeatureRow, PlaceScoringError> {
    let climate =
        place
            .features
            .effective_climate()
            .ok_or_else(|| PlaceScoringError::MissingClimate {
                place_id: place.id.clone(),
            })?;

    let mut row = FeatureRow::new();
    row.insert(COLUMN_AGE, f64::from(preferences.age));
    one_hot(&mut row, vocabulary, FIELD_GENDER, &preferences.gender);
    one_hot(&mut row, vocabulary, FIELD_CLIMATE, climate);

    let multi_label_fields = [
        (
            FIELD_PLACE_TYPE,
            &preferences.place_type,
            &place.features.place_type,
        ),
        (FIELD_HOBBY, &preferences.hobby, &place.features.hobby),
        (
            FIELD_HEALTH_ISSUES,
            &preferences.health_issues,
            &place.features.health_issues,
        ),
    ];
    for (field, stated, offered) in multi_label_fields {
        let union: Vec<&str> = stated
            .iter()
            .chain(offered.iter())
            .map(String::as_str)
            .collect();
        for (column, value) in vocabulary.encoder(field).encode(&union) {
            row.insert(column, value);
        }
    }

    Ok(row)
}

/// One-hot a single-valued categorical field against the trained schema.
///
/// Zeroes the field's whole trained complement first so siblings of the
/// observed value are present rather than left for zero-fill. The observed
/// column then overwrites its zero; an out-of-vocabulary value still shows
/// up as a dropped column during reconciliation.
fn one_hot(row: &mut FeatureRow, vocabulary: &CategoryVocabulary, field: &str, value: &str) {
    for column in vocabulary.one_hot_columns(field) {
        row.insert(column.to_owned(), 0.0);
    }
    row.insert(format!("{field}_{value}"), 1.0);
}
