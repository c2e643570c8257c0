//! Decision thresholds.
//!
//! Constants hold the production values; [`DecisionThresholds`] carries them
//! at runtime so they can be tuned per deployment.

use serde::{Deserialize, Serialize};

use crate::classifier::ClassifierError;

/// Below this top-class probability the result needs human confirmation
pub const CONFIDENCE_THRESHOLD: f64 = 0.50;

/// Hazardous probability that counts as a meaningful hazard signal
pub const DANGER_THRESHOLD: f64 = 0.25;

/// Top-two probability gap under which the text may break the tie
pub const TOP2_TIE_THRESHOLD: f64 = 0.05;

/// A Hazardous prediction below this is only moderately supported
pub const HAZARDOUS_MODERATE_THRESHOLD: f64 = 0.40;

/// Hazard signal at or above this on a non-hazardous call asks for verification
pub const HAZARDOUS_VERIFY_THRESHOLD: f64 = 0.30;

/// Top-class probability from which a non-hazardous call overrides a hazard signal
pub const STRONG_CONFIDENCE_THRESHOLD: f64 = 0.70;

/// Text-only fallback results below this score need confirmation
pub const FALLBACK_CONFIDENCE_THRESHOLD: f64 = 0.60;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DecisionThresholds {
    pub confidence: f64,
    pub danger: f64,
    pub top2_tie: f64,
    pub hazardous_moderate: f64,
    pub hazardous_verify: f64,
    pub strong_confidence: f64,
    pub fallback_confidence: f64,
}

impl Default for DecisionThresholds {
    fn default() -> Self {
        Self {
            confidence: CONFIDENCE_THRESHOLD,
            danger: DANGER_THRESHOLD,
            top2_tie: TOP2_TIE_THRESHOLD,
            hazardous_moderate: HAZARDOUS_MODERATE_THRESHOLD,
            hazardous_verify: HAZARDOUS_VERIFY_THRESHOLD,
            strong_confidence: STRONG_CONFIDENCE_THRESHOLD,
            fallback_confidence: FALLBACK_CONFIDENCE_THRESHOLD,
        }
    }
}

impl DecisionThresholds {
    /// Asks for confirmation more often and reacts to weaker hazard signals.
    pub fn strict() -> Self {
        Self {
            confidence: 0.60,
            danger: 0.15,
            hazardous_verify: 0.20,
            strong_confidence: 0.80,
            ..Default::default()
        }
    }

    /// Accepts more results without confirmation.
    pub fn lenient() -> Self {
        Self {
            confidence: 0.40,
            danger: 0.35,
            hazardous_verify: 0.40,
            strong_confidence: 0.60,
            ..Default::default()
        }
    }

    pub fn validate(&self) -> Result<(), ClassifierError> {
        let named = [
            ("confidence", self.confidence),
            ("danger", self.danger),
            ("top2_tie", self.top2_tie),
            ("hazardous_moderate", self.hazardous_moderate),
            ("hazardous_verify", self.hazardous_verify),
            ("strong_confidence", self.strong_confidence),
            ("fallback_confidence", self.fallback_confidence),
        ];
        for (name, value) in named {
            if !(0.0..=1.0).contains(&value) {
                return Err(ClassifierError::ValidationError(format!(
                    "Threshold '{}' must be within [0, 1], got {}",
                    name, value
                )));
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_presets_are_valid() {
        assert!(DecisionThresholds::default().validate().is_ok());
        assert!(DecisionThresholds::strict().validate().is_ok());
        assert!(DecisionThresholds::lenient().validate().is_ok());
    }

    #[test]
    fn test_out_of_range_threshold() {
        let thresholds = DecisionThresholds { danger: 1.5, ..Default::default() };
        assert!(matches!(thresholds.validate(), Err(ClassifierError::ValidationError(_))));

        let thresholds = DecisionThresholds { confidence: f64::NAN, ..Default::default() };
        assert!(thresholds.validate().is_err());
    }
}
