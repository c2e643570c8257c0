use std::sync::Arc;

use log::info;

use super::classifier::WasteClassifier;
use super::error::ClassifierError;
use super::model::ProbabilisticModel;
use crate::config::ExtractorConfig;
use crate::decision::{DecisionEngine, DecisionThresholds};
use crate::features::FeatureExtractor;
use crate::lexicon::Lexicon;

/// A builder for constructing a [`WasteClassifier`] with a fluent interface.
///
/// Every setting has a default, so `WasteClassifier::builder().build()` gives
/// a text-only classifier with the production thresholds.
#[derive(Default)]
pub struct WasteClassifierBuilder {
    model: Option<Arc<dyn ProbabilisticModel>>,
    extractor_config: ExtractorConfig,
    thresholds: DecisionThresholds,
    lexicon: Lexicon,
}

impl WasteClassifierBuilder {
    /// Creates a new empty builder with default configuration
    ///
    /// # Example
    /// ```
    /// use greentrash::WasteClassifierBuilder;
    ///
    /// let builder = WasteClassifierBuilder::new();
    /// ```
    pub fn new() -> Self {
        Self::default()
    }

    /// Attaches a trained model. Without one, classification runs in
    /// text-only fallback mode.
    pub fn with_model(mut self, model: impl ProbabilisticModel + 'static) -> Self {
        self.model = Some(Arc::new(model));
        self
    }

    /// Attaches a model that is already shared elsewhere.
    pub fn with_shared_model(mut self, model: Arc<dyn ProbabilisticModel>) -> Self {
        self.model = Some(model);
        self
    }

    /// Sets the feature extraction configuration
    ///
    /// # Example
    /// ```
    /// use greentrash::{ExtractorConfig, WasteClassifierBuilder};
    ///
    /// let config = ExtractorConfig { resize_edge: 128, ..Default::default() };
    /// let builder = WasteClassifierBuilder::new().with_extractor_config(config);
    /// ```
    pub fn with_extractor_config(mut self, config: ExtractorConfig) -> Self {
        self.extractor_config = config;
        self
    }

    pub fn with_thresholds(mut self, thresholds: DecisionThresholds) -> Self {
        self.thresholds = thresholds;
        self
    }

    pub fn with_lexicon(mut self, lexicon: Lexicon) -> Self {
        self.lexicon = lexicon;
        self
    }

    /// Builds and returns the final WasteClassifier instance
    ///
    /// # Returns
    /// * `Result<WasteClassifier, ClassifierError>` - The classifier, or an error if:
    ///   - The extractor configuration is invalid
    ///   - A threshold lies outside [0, 1]
    ///   - The lexicon has no keywords
    pub fn build(self) -> Result<WasteClassifier, ClassifierError> {
        self.extractor_config.validate()?;
        self.thresholds.validate()?;
        if self.lexicon.is_empty() {
            return Err(ClassifierError::BuildError("Lexicon has no keywords".to_string()));
        }

        info!(
            "Building waste classifier (model: {}, resize edge: {}, lexicon: {} keywords)",
            self.model.as_ref().map(|m| m.name()).unwrap_or("none"),
            self.extractor_config.resize_edge,
            self.lexicon.len()
        );

        Ok(WasteClassifier {
            extractor: FeatureExtractor::new(self.extractor_config, self.lexicon),
            engine: DecisionEngine::new(self.thresholds),
            model: self.model,
        })
    }
}
