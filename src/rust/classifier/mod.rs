use serde::Serialize;

mod error;
mod model;
pub mod builder;
#[allow(clippy::module_inception)]
mod classifier;
pub(crate) mod utils;

pub use error::ClassifierError;
pub use model::ProbabilisticModel;
pub use classifier::{ClassifierInput, WasteClassifier};
pub use builder::WasteClassifierBuilder;

use crate::config::ExtractorConfig;
use crate::decision::DecisionThresholds;

/// Information about the current configuration of a classifier
#[derive(Debug, Clone, Serialize)]
pub struct ClassifierInfo {
    /// Class labels in canonical order
    pub class_labels: Vec<String>,
    /// Length of the feature vector the model consumes
    pub feature_count: usize,
    /// Fingerprint of the feature layout
    pub layout_hash: u32,
    /// Name of the attached model, if any
    pub model: Option<String>,
    pub extractor: ExtractorConfig,
    pub thresholds: DecisionThresholds,
}
