//! Feature rows and schema reconciliation.
//!
//! A [`FeatureRow`] is constructed fresh per (preferences, place) pair and
//! discarded after prediction. [`reconcile`] is the single mechanism that
//! keeps training-time and inference-time encodings aligned: expected
//! columns that are missing get zero-filled, unexpected columns are
//! dropped, and both lists are reported so callers can observe drift.
#![forbid(unsafe_code)]

use std::collections::BTreeMap;
use std::collections::HashSet;

/// A constructed, not yet aligned, mapping from column name to value.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FeatureRow {
    values: BTreeMap<String, f64>,
}

impl FeatureRow {
    /// An empty row.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            values: BTreeMap::new(),
        }
    }

    /// Set a column value, replacing any previous value.
    pub fn insert(&mut self, column: impl Into<String>, value: f64) {
        self.values.insert(column.into(), value);
    }

    /// The value of a column, if set.
    #[must_use]
    pub fn get(&self, column: &str) -> Option<f64> {
        self.values.get(column).copied()
    }

    /// The number of columns currently set.
    #[must_use]
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// Whether no columns are set.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Iterate over the set columns in name order.
    pub fn columns(&self) -> impl Iterator<Item = &str> {
        self.values.keys().map(String::as_str)
    }
}

/// A structured record of what [`reconcile`] changed.
///
/// An empty report means the constructed row already matched the trained
/// schema exactly. A non-empty report is the observable form of schema
/// drift between training and inference.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DriftReport {
    /// Expected columns absent from the constructed row, zero-filled.
    pub injected: Vec<String>,
    /// Constructed columns absent from the expected schema, dropped.
    pub dropped: Vec<String>,
}

impl DriftReport {
    /// Whether reconciliation left the row untouched.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.injected.is_empty() && self.dropped.is_empty()
    }
}

/// A row aligned to the trained column schema, in trained order.
#[derive(Debug, Clone, PartialEq)]
pub struct AlignedRow {
    values: Vec<f64>,
}

impl AlignedRow {
    /// The aligned values, parallel to the trained column list.
    #[must_use]
    pub fn values(&self) -> &[f64] {
        &self.values
    }

    /// The aligned width: exactly the trained column count.
    #[must_use]
    pub fn width(&self) -> usize {
        self.values.len()
    }
}

/// Align a constructed row against the trained column schema.
///
/// Every expected column absent from the row is inserted with value 0
/// (missing-value policy is zero-fill, never an error); every constructed
/// column absent from the schema is dropped. The output row has exactly
/// `schema.len()` values in schema order, and the returned [`DriftReport`]
/// records both kinds of change.
#[must_use]
pub fn reconcile(row: &FeatureRow, schema: &[String]) -> (AlignedRow, DriftReport) {
    let expected: HashSet<&str> = schema.iter().map(String::as_str).collect();

    let mut injected = Vec::new();
    let values = schema
        .iter()
        .map(|column| {
            row.get(column).unwrap_or_else(|| {
                injected.push(column.clone());
                0.0
            })
        })
        .collect();

    let dropped = row
        .columns()
        .filter(|column| !expected.contains(column))
        .map(ToOwned::to_owned)
        .collect();

    (AlignedRow { values }, DriftReport { injected, dropped })
}
