//! The classifier seam between feature alignment and scoring.
//!
//! The scoring engine drives any implementation of [`Classifier`]; the
//! trained artifact shipped with the engine lives in `wayfinder-scorer`.

use thiserror::Error;

/// Errors returned by [`Classifier::predict_proba`].
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ClassifierError {
    /// The feature row width did not match the trained input width.
    #[error("feature row has {actual} columns but the model expects {expected}")]
    DimensionMismatch {
        /// Width the model was trained with.
        expected: usize,
        /// Width of the row that was presented.
        actual: usize,
    },
    /// The model artifact holds no classes to predict over.
    #[error("model has no classes")]
    NoClasses,
}

/// Predict class probabilities for an aligned feature row.
///
/// Implementations must be thread-safe (`Send + Sync`) so a batch of
/// candidate places can be scored across threads against one shared model.
/// `predict_proba` must be a pure function of the row: no interior
/// mutation, no side effects.
///
/// # Examples
/// ```
/// use wayfinder_core::{Classifier, ClassifierError};
///
/// struct Uniform {
///     classes: Vec<String>,
/// }
///
/// impl Classifier for Uniform {
///     fn classes(&self) -> &[String] {
///         &self.classes
///     }
///
///     fn predict_proba(&self, _features: &[f64]) -> Result<Vec<f64>, ClassifierError> {
///         let share = 1.0 / self.classes.len() as f64;
///         Ok(vec![share; self.classes.len()])
///     }
/// }
///
/// let model = Uniform { classes: vec!["Sunny Cove".into(), "High Pass".into()] };
/// let probs = model.predict_proba(&[1.0, 0.0])?;
/// assert_eq!(probs.len(), model.classes().len());
/// # Ok::<(), ClassifierError>(())
/// ```
pub trait Classifier: Send + Sync {
    /// The ordered class labels the model predicts over.
    fn classes(&self) -> &[String];

    /// Predict one probability per class for an aligned feature row.
    ///
    /// The returned vector is parallel to [`Classifier::classes`] and sums
    /// to 1 for any well-formed model.
    ///
    /// # Errors
    /// Returns [`ClassifierError`] when the row width does not match the
    /// trained input width or the model holds no classes.
    fn predict_proba(&self, features: &[f64]) -> Result<Vec<f64>, ClassifierError>;

    /// The index of a class label, if the model knows it.
    fn class_index(&self, label: &str) -> Option<usize> {
        self.classes().iter().position(|class| class == label)
    }
}
