use super::error::ClassifierError;
use crate::features::FeatureVector;

/// A trained model mapping a feature vector to class probabilities.
///
/// Training, persistence and the choice of algorithm live outside this crate;
/// anything that can score a [`FeatureVector`] can be attached to a
/// [`WasteClassifier`](super::WasteClassifier).
///
/// The returned values must be in canonical class order (Organic, Recyclable,
/// Reject, Hazardous). They are validated before any decision is made, so a
/// model returning the wrong length or an unnormalized vector produces an
/// error rather than a result.
///
/// # Example
///
/// ```
/// use greentrash::{ClassifierError, FeatureVector, ProbabilisticModel};
///
/// struct AlwaysOrganic;
///
/// impl ProbabilisticModel for AlwaysOrganic {
///     fn predict_proba(&self, _features: &FeatureVector) -> Result<Vec<f64>, ClassifierError> {
///         Ok(vec![0.9, 0.05, 0.05, 0.0])
///     }
/// }
/// ```
pub trait ProbabilisticModel: Send + Sync {
    fn predict_proba(&self, features: &FeatureVector) -> Result<Vec<f64>, ClassifierError>;

    /// Short human-readable name used in logs and [`ClassifierInfo`](super::ClassifierInfo).
    fn name(&self) -> &str {
        "custom"
    }
}

impl<F> ProbabilisticModel for F
where
    F: Fn(&FeatureVector) -> Result<Vec<f64>, ClassifierError> + Send + Sync,
{
    fn predict_proba(&self, features: &FeatureVector) -> Result<Vec<f64>, ClassifierError> {
        self(features)
    }

    fn name(&self) -> &str {
        "closure"
    }
}
