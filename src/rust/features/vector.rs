use ndarray::{s, Array1, ArrayView1};
use serde::{Deserialize, Serialize};

use super::layout::{FEATURE_COUNT, TEXT_FEATURE_COUNT, TEXT_SCORES, VISUAL_FEATURE_COUNT};
use crate::classifier::ClassifierError;

/// The visual block of the feature vector: indices [0, 118).
#[derive(Debug, Clone, PartialEq)]
pub struct VisualFeatures {
    values: Array1<f64>,
}

impl VisualFeatures {
    pub(crate) fn new(values: Vec<f64>) -> Result<Self, ClassifierError> {
        if values.len() != VISUAL_FEATURE_COUNT {
            return Err(ClassifierError::MalformedFeatureVector(format!(
                "expected {} visual features, got {}",
                VISUAL_FEATURE_COUNT,
                values.len()
            )));
        }
        Ok(Self { values: Array1::from_vec(values) })
    }

    /// The "no image" block: all zeros.
    pub fn absent() -> Self {
        Self { values: Array1::zeros(VISUAL_FEATURE_COUNT) }
    }

    pub fn view(&self) -> ArrayView1<'_, f64> {
        self.values.view()
    }

    pub fn to_vec(&self) -> Vec<f64> {
        self.values.to_vec()
    }
}

/// Normalized per-class keyword scores, in canonical class order.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TextFeatures(pub [f64; TEXT_FEATURE_COUNT]);

impl TextFeatures {
    pub fn zeros() -> Self {
        Self([0.0; TEXT_FEATURE_COUNT])
    }

    /// True when no keyword matched (distinct from equal evidence).
    pub fn is_empty(&self) -> bool {
        self.0.iter().all(|&v| v == 0.0)
    }

    pub fn scores(&self) -> &[f64; TEXT_FEATURE_COUNT] {
        &self.0
    }
}

/// The canonical 122-value model input.
///
/// Serialized as a flat array; deserializing goes through
/// [`FeatureVector::from_vec`], so a stored vector of the wrong length is
/// rejected.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "Vec<f64>", into = "Vec<f64>")]
pub struct FeatureVector {
    values: Array1<f64>,
}

impl FeatureVector {
    pub fn from_parts(visual: &VisualFeatures, text: &TextFeatures) -> Self {
        let mut values = Vec::with_capacity(FEATURE_COUNT);
        values.extend(visual.values.iter().copied());
        values.extend_from_slice(&text.0);
        Self { values: Array1::from_vec(values) }
    }

    /// Wraps stored or externally produced features. The length must match
    /// the layout exactly.
    pub fn from_vec(values: Vec<f64>) -> Result<Self, ClassifierError> {
        if values.len() != FEATURE_COUNT {
            return Err(ClassifierError::MalformedFeatureVector(format!(
                "expected {} features, got {}",
                FEATURE_COUNT,
                values.len()
            )));
        }
        Ok(Self { values: Array1::from_vec(values) })
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<f64> {
        self.values.get(index).copied()
    }

    pub fn view(&self) -> ArrayView1<'_, f64> {
        self.values.view()
    }

    pub fn visual(&self) -> ArrayView1<'_, f64> {
        self.values.slice(s![..VISUAL_FEATURE_COUNT])
    }

    pub fn text_scores(&self) -> TextFeatures {
        let mut scores = [0.0; TEXT_FEATURE_COUNT];
        for (dst, src) in scores.iter_mut().zip(self.values.slice(s![TEXT_SCORES]).iter()) {
            *dst = *src;
        }
        TextFeatures(scores)
    }

    pub fn to_vec(&self) -> Vec<f64> {
        self.values.to_vec()
    }
}

impl TryFrom<Vec<f64>> for FeatureVector {
    type Error = ClassifierError;

    fn try_from(values: Vec<f64>) -> Result<Self, Self::Error> {
        Self::from_vec(values)
    }
}

impl From<FeatureVector> for Vec<f64> {
    fn from(vector: FeatureVector) -> Self {
        vector.values.to_vec()
    }
}
