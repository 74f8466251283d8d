//! The trained-time category vocabulary and column schema.
//!
//! Both structures are produced by training and consumed read-only at
//! inference. The column list is a total order fixed at training time:
//! every row presented to the classifier must have exactly these columns,
//! in this order, with no extras.
#![forbid(unsafe_code)]

use std::collections::BTreeMap;
use std::io::BufReader;

use camino::Utf8Path;
use serde::{Deserialize, Serialize};
use wayfinder_fs::open_utf8_file;

use crate::MultiLabelEncoder;
use crate::error::ArtifactError;

/// The fixed label sets and output column ordering the classifier expects.
///
/// # Examples
/// ```
/// use wayfinder_scorer::CategoryVocabulary;
///
/// let vocabulary = CategoryVocabulary::new(
///     vec!["age".into(), "place_type_Beach".into()],
///     [("place_type".into(), vec!["Beach".into()])].into(),
/// );
/// assert_eq!(vocabulary.columns().len(), 2);
/// assert_eq!(
///     vocabulary.field_classes("place_type"),
///     Some(["Beach".to_owned()].as_slice()),
/// );
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CategoryVocabulary {
    columns: Vec<String>,
    fields: BTreeMap<String, Vec<String>>,
}

impl CategoryVocabulary {
    /// Assemble a vocabulary from an ordered column list and per-field
    /// label sets.
    #[must_use]
    pub const fn new(columns: Vec<String>, fields: BTreeMap<String, Vec<String>>) -> Self {
        Self { columns, fields }
    }

    /// The exact, fixed set and order of columns the classifier expects.
    #[must_use]
    pub fn columns(&self) -> &[String] {
        &self.columns
    }

    /// The fixed vocabulary for one multi-label field, if trained.
    #[must_use]
    pub fn field_classes(&self, field: &str) -> Option<&[String]> {
        self.fields.get(field).map(Vec::as_slice)
    }

    /// The trained one-hot columns for a single-valued categorical field.
    ///
    /// Yields every column named `{field}_{value}` in the schema, so a
    /// builder can seed the whole complement with zeros before setting the
    /// observed value.
    pub fn one_hot_columns<'a>(&'a self, field: &'a str) -> impl Iterator<Item = &'a str> {
        let prefix = format!("{field}_");
        self.columns
            .iter()
            .map(String::as_str)
            .filter(move |column| column.starts_with(&prefix))
    }

    /// A fixed-vocabulary encoder for one multi-label field.
    ///
    /// A field the training run never saw yields an encoder over the empty
    /// vocabulary: its labels contribute no columns and no signal.
    #[must_use]
    pub fn encoder<'a>(&'a self, field: &'a str) -> MultiLabelEncoder<'a> {
        MultiLabelEncoder::new(field, self.field_classes(field).unwrap_or_default())
    }

    /// Load the vocabulary from its two JSON artifacts.
    ///
    /// `columns_path` holds the ordered `feature_columns` array;
    /// `vocabulary_path` maps each multi-label field to its ordered labels.
    ///
    /// # Errors
    /// Returns [`ArtifactError`] when either file is missing or malformed.
    pub fn from_paths(
        columns_path: &Utf8Path,
        vocabulary_path: &Utf8Path,
    ) -> Result<Self, ArtifactError> {
        let columns_file =
            open_utf8_file(columns_path).map_err(|source| ArtifactError::ReadColumns {
                path: columns_path.to_path_buf(),
                source,
            })?;
        let columns: Vec<String> = serde_json::from_reader(BufReader::new(columns_file))
            .map_err(|source| ArtifactError::ParseColumns {
                path: columns_path.to_path_buf(),
                source,
            })?;

        let vocabulary_file =
            open_utf8_file(vocabulary_path).map_err(|source| ArtifactError::ReadVocabulary {
                path: vocabulary_path.to_path_buf(),
                source,
            })?;
        let fields: BTreeMap<String, Vec<String>> =
            serde_json::from_reader(BufReader::new(vocabulary_file)).map_err(|source| {
                ArtifactError::ParseVocabulary {
                    path: vocabulary_path.to_path_buf(),
                    source,
                }
            })?;

        Ok(Self { columns, fields })
    }
}

#[cfg(test)]
mod tests {
    use rstest::rstest;

    use super::*;

    fn sample() -> CategoryVocabulary {
        CategoryVocabulary::new(
            vec![
                "age".to_owned(),
                "gender_female".to_owned(),
                "place_type_Beach".to_owned(),
                "place_type_Mountain".to_owned(),
            ],
            BTreeMap::from([(
                "place_type".to_owned(),
                vec!["Beach".to_owned(), "Mountain".to_owned()],
            )]),
        )
    }

    #[rstest]
    fn columns_preserve_trained_order() {
        let vocabulary = sample();
        assert_eq!(
            vocabulary.columns().first().map(String::as_str),
            Some("age")
        );
        assert_eq!(
            vocabulary.columns().last().map(String::as_str),
            Some("place_type_Mountain")
        );
    }

    #[rstest]
    fn one_hot_columns_are_prefix_scoped() {
        let vocabulary = sample();
        let gender: Vec<&str> = vocabulary.one_hot_columns("gender").collect();
        assert_eq!(gender, vec!["gender_female"]);
        assert_eq!(vocabulary.one_hot_columns("height").count(), 0);
    }

    #[rstest]
    fn untrained_field_yields_empty_encoder() {
        let vocabulary = sample();
        let encoder = vocabulary.encoder("hobby");
        assert!(encoder.encode(&["Swimming"]).is_empty());
    }

    #[rstest]
    fn from_paths_reads_json_artifacts() {
        let temp = tempfile::TempDir::new().expect("tempdir");
        let columns_path =
            camino::Utf8PathBuf::from_path_buf(temp.path().join("feature_columns.json"))
                .expect("utf8 path");
        let vocabulary_path = camino::Utf8PathBuf::from_path_buf(temp.path().join("vocab.json"))
            .expect("utf8 path");
        std::fs::write(columns_path.as_std_path(), r#"["age", "hobby_Swimming"]"#)
            .expect("write columns");
        std::fs::write(vocabulary_path.as_std_path(), r#"{"hobby": ["Swimming"]}"#)
            .expect("write vocabulary");

        let vocabulary = CategoryVocabulary::from_paths(&columns_path, &vocabulary_path)
            .expect("load vocabulary");

        assert_eq!(vocabulary.columns().len(), 2);
        assert_eq!(
            vocabulary.field_classes("hobby"),
            Some(["Swimming".to_owned()].as_slice())
        );
    }

    #[rstest]
    fn missing_artifact_is_fatal() {
        let temp = tempfile::TempDir::new().expect("tempdir");
        let missing = camino::Utf8PathBuf::from_path_buf(temp.path().join("absent.json"))
            .expect("utf8 path");
        let err = CategoryVocabulary::from_paths(&missing, &missing)
            .expect_err("missing artifact should fail");
        assert!(matches!(err, ArtifactError::ReadColumns { .. }));
    }
}
