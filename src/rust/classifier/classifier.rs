use std::fmt;
use std::sync::Arc;

use image::DynamicImage;
use log::{debug, info};

use super::builder::WasteClassifierBuilder;
use super::error::ClassifierError;
use super::model::ProbabilisticModel;
use super::ClassifierInfo;
use crate::decision::DecisionEngine;
use crate::features::{layout, FeatureExtractor, FeatureVector, FEATURE_COUNT};
use crate::types::{ClassificationResult, ProbabilityDistribution, WasteClass};

/// What the serving path hands to [`WasteClassifier::classify`].
#[derive(Debug, Clone, Copy)]
pub enum ClassifierInput<'a> {
    /// Extracted features; the attached model scores them when available
    Features(&'a FeatureVector),
    /// Probabilities already produced by a model elsewhere
    Probabilities(&'a ProbabilityDistribution),
}

/// A thread-safe waste classifier: feature extraction, an optional trained
/// model and the decision engine, built once and shared read-only.
///
/// # Thread Safety
///
/// Every field is either plain data or an `Arc` to a `Send + Sync` model, so
/// the classifier can be wrapped in an `Arc` and used from many threads.
///
/// ```rust
/// use greentrash::WasteClassifier;
/// use std::sync::Arc;
/// use std::thread;
///
/// let classifier = Arc::new(WasteClassifier::builder().build().unwrap());
///
/// let handles: Vec<_> = ["casca de banana", "pilha velha"]
///     .into_iter()
///     .map(|text| {
///         let classifier = Arc::clone(&classifier);
///         thread::spawn(move || classifier.classify_input(None, text).unwrap())
///     })
///     .collect();
///
/// for handle in handles {
///     handle.join().unwrap();
/// }
/// ```
#[derive(Clone)]
pub struct WasteClassifier {
    pub(crate) extractor: FeatureExtractor,
    pub(crate) engine: DecisionEngine,
    pub(crate) model: Option<Arc<dyn ProbabilisticModel>>,
}

// Compile-time verification of thread-safety
const _: () = {
    fn assert_send_sync<T: Send + Sync>() {}
    fn verify_thread_safety() {
        assert_send_sync::<WasteClassifier>();
    }
};

impl fmt::Debug for WasteClassifier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("WasteClassifier")
            .field("extractor", &self.extractor)
            .field("engine", &self.engine)
            .field("model", &self.model.as_ref().map(|m| m.name()))
            .finish()
    }
}

impl WasteClassifier {
    /// Creates a new WasteClassifierBuilder for fluent construction
    pub fn builder() -> WasteClassifierBuilder {
        WasteClassifierBuilder::new()
    }

    /// Returns information about the classifier's current configuration
    pub fn info(&self) -> ClassifierInfo {
        ClassifierInfo {
            class_labels: WasteClass::ALL.iter().map(|c| c.as_str().to_string()).collect(),
            feature_count: FEATURE_COUNT,
            layout_hash: layout::layout_hash(),
            model: self.model.as_ref().map(|m| m.name().to_string()),
            extractor: self.extractor.visual().config().clone(),
            thresholds: self.engine.thresholds().clone(),
        }
    }

    pub fn has_model(&self) -> bool {
        self.model.is_some()
    }

    pub fn extractor(&self) -> &FeatureExtractor {
        &self.extractor
    }

    pub fn engine(&self) -> &DecisionEngine {
        &self.engine
    }

    /// Extracts the 122-value feature vector, exactly as used for training.
    pub fn extract_features(&self, image: Option<&DynamicImage>, text: &str) -> Result<FeatureVector, ClassifierError> {
        self.extractor.extract(image, text)
    }

    /// Runs the model when one is attached, otherwise decides from the
    /// keyword scores embedded in the feature vector.
    pub fn predict(&self, features: &FeatureVector, text: &str) -> Result<ClassificationResult, ClassifierError> {
        self.classify(ClassifierInput::Features(features), text, self.has_model())
    }

    /// Extraction and prediction in one call.
    pub fn classify_input(&self, image: Option<&DynamicImage>, text: &str) -> Result<ClassificationResult, ClassifierError> {
        let features = self.extract_features(image, text)?;
        self.predict(&features, text)
    }

    /// Classifies either features or precomputed probabilities.
    ///
    /// With `model_available` the primary rule cascade runs on the model's
    /// probabilities. Without it the text-only fallback runs on the keyword
    /// scores, which requires a feature vector.
    pub fn classify(
        &self,
        input: ClassifierInput<'_>,
        text: &str,
        model_available: bool,
    ) -> Result<ClassificationResult, ClassifierError> {
        if !model_available {
            let ClassifierInput::Features(features) = input else {
                return Err(ClassifierError::ValidationError(
                    "Fallback classification needs a feature vector, not probabilities".into(),
                ));
            };
            check_layout(features)?;
            debug!("Model unavailable, deciding from keyword scores");
            return self.engine.decide_fallback(&features.text_scores(), text);
        }

        match input {
            ClassifierInput::Probabilities(probabilities) => self.engine.decide(probabilities, text),
            ClassifierInput::Features(features) => {
                check_layout(features)?;
                let model = self.model.as_ref().ok_or_else(|| {
                    ClassifierError::ModelError("No model attached to this classifier".into())
                })?;
                let raw = model.predict_proba(features)?;
                let probabilities = ProbabilityDistribution::from_slice(&raw)?;
                info!("Model '{}' predicted {:?}", model.name(), probabilities.values());
                self.engine.decide(&probabilities, text)
            }
        }
    }
}

fn check_layout(features: &FeatureVector) -> Result<(), ClassifierError> {
    if features.len() != FEATURE_COUNT {
        return Err(ClassifierError::MalformedFeatureVector(format!(
            "expected {} features, got {}",
            FEATURE_COUNT,
            features.len()
        )));
    }
    Ok(())
}
