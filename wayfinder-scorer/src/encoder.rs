//! Fixed-vocabulary multi-label encoding.
#![forbid(unsafe_code)]

/// Encode a set of labels as binary columns over a fixed vocabulary.
///
/// Encoding is pure and order-independent in its input, and always emits
/// vocabulary-ordered columns named `{field}_{label}`. Labels absent from
/// the vocabulary are silently dropped: they contribute no signal and never
/// introduce new columns. Matching is exact string equality; no case
/// folding or trimming.
///
/// # Examples
/// ```
/// use wayfinder_scorer::MultiLabelEncoder;
///
/// let classes = ["Beach".to_owned(), "Mountain".to_owned()];
/// let encoder = MultiLabelEncoder::new("place_type", &classes);
/// let encoded = encoder.encode(&["Mountain", "Volcano"]);
/// assert_eq!(
///     encoded,
///     vec![
///         ("place_type_Beach".to_owned(), 0.0),
///         ("place_type_Mountain".to_owned(), 1.0),
///     ],
/// );
/// ```
#[derive(Debug, Clone, Copy)]
pub struct MultiLabelEncoder<'a> {
    field: &'a str,
    classes: &'a [String],
}

impl<'a> MultiLabelEncoder<'a> {
    /// Build an encoder for `field` over its trained label vocabulary.
    #[must_use]
    pub const fn new(field: &'a str, classes: &'a [String]) -> Self {
        Self { field, classes }
    }

    /// The width of the encoded vector: one column per vocabulary label.
    #[must_use]
    pub const fn width(&self) -> usize {
        self.classes.len()
    }

    /// Encode `labels` into `(column, value)` pairs in vocabulary order.
    #[must_use]
    pub fn encode<S: AsRef<str>>(&self, labels: &[S]) -> Vec<(String, f64)> {
        self.classes
            .iter()
            .map(|class| {
                let present = labels.iter().any(|label| label.as_ref() == class);
                let value = if present { 1.0 } else { 0.0 };
                (format!("{}_{}", self.field, class), value)
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use rstest::rstest;

    use super::*;

    fn hobby_classes() -> Vec<String> {
        vec!["Hiking".to_owned(), "Skiing".to_owned(), "Swimming".to_owned()]
    }

    #[rstest]
    fn unknown_labels_encode_to_all_zero() {
        let classes = hobby_classes();
        let encoder = MultiLabelEncoder::new("hobby", &classes);
        let encoded = encoder.encode(&["Surfing", "Base Jumping"]);
        assert!(encoded.iter().all(|(_, value)| *value == 0.0));
        assert_eq!(encoded.len(), encoder.width());
    }

    #[rstest]
    fn encoding_is_invariant_under_input_permutation() {
        let classes = hobby_classes();
        let encoder = MultiLabelEncoder::new("hobby", &classes);
        let forward = encoder.encode(&["Swimming", "Hiking"]);
        let reversed = encoder.encode(&["Hiking", "Swimming"]);
        assert_eq!(forward, reversed);
    }

    #[rstest]
    fn encoding_is_idempotent() {
        let classes = hobby_classes();
        let encoder = MultiLabelEncoder::new("hobby", &classes);
        assert_eq!(encoder.encode(&["Skiing"]), encoder.encode(&["Skiing"]));
    }

    #[rstest]
    fn matching_is_case_sensitive() {
        let classes = hobby_classes();
        let encoder = MultiLabelEncoder::new("hobby", &classes);
        let encoded = encoder.encode(&["swimming"]);
        assert!(encoded.iter().all(|(_, value)| *value == 0.0));
    }

    #[rstest]
    fn duplicate_labels_encode_once() {
        let classes = hobby_classes();
        let encoder = MultiLabelEncoder::new("hobby", &classes);
        assert_eq!(
            encoder.encode(&["Skiing", "Skiing"]),
            encoder.encode(&["Skiing"]),
        );
    }
}
