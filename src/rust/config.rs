use serde::{Deserialize, Serialize};

use crate::classifier::ClassifierError;

/// Settings for the visual feature pipeline.
///
/// None of these settings change the feature vector length; they only change
/// how each block is computed. A model must be trained and served with the
/// same configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExtractorConfig {
    /// Images are resized to `resize_edge` x `resize_edge` before anything else
    pub resize_edge: u32,
    pub lbp_radius: f64,
    pub lbp_points: usize,
    pub canny_low: f32,
    pub canny_high: f32,
}

impl Default for ExtractorConfig {
    fn default() -> Self {
        Self {
            resize_edge: 256,
            lbp_radius: 3.0,
            lbp_points: 24,
            canny_low: 100.0,
            canny_high: 200.0,
        }
    }
}

impl ExtractorConfig {
    pub fn validate(&self) -> Result<(), ClassifierError> {
        if !(self.lbp_radius.is_finite() && self.lbp_radius > 0.0) {
            return Err(ClassifierError::ValidationError(format!(
                "LBP radius must be positive, got {}",
                self.lbp_radius
            )));
        }
        if f64::from(self.resize_edge) <= 2.0 * self.lbp_radius {
            return Err(ClassifierError::ValidationError(format!(
                "Resize edge {} is too small for LBP radius {}",
                self.resize_edge, self.lbp_radius
            )));
        }
        if self.lbp_points < 2 {
            return Err(ClassifierError::ValidationError(format!(
                "LBP needs at least 2 sample points, got {}",
                self.lbp_points
            )));
        }
        if self.canny_low < 0.0 || self.canny_high < self.canny_low {
            return Err(ClassifierError::ValidationError(format!(
                "Invalid Canny thresholds: low={} high={}",
                self.canny_low, self.canny_high
            )));
        }
        Ok(())
    }
}
