//! A thread-safe waste classifier: image and text features plus a rule-based
//! decision engine on top of an external probabilistic model.
//!
//! An item is described by an optional photo and a free-text description
//! (typically Portuguese). Both become a fixed 122-value feature vector; a
//! trained model scores it; the decision engine turns the scores into one of
//! Organic, Recyclable, Reject or Hazardous, with a disposal tip and a flag
//! asking for human confirmation when the evidence is weak.
//!
//! # Basic Usage
//!
//! ```rust
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! use greentrash::{ClassifierError, FeatureVector, Label, WasteClass, WasteClassifier};
//!
//! let model = |_: &FeatureVector| -> Result<Vec<f64>, ClassifierError> {
//!     Ok(vec![0.10, 0.12, 0.08, 0.70])
//! };
//!
//! let classifier = WasteClassifier::builder().with_model(model).build()?;
//! let result = classifier.classify_input(None, "pilha usada")?;
//!
//! assert_eq!(result.predicted_class, Label::Class(WasteClass::Hazardous));
//! println!("{}: {}", result.predicted_class, result.disposal_tip);
//! # Ok(())
//! # }
//! ```
//!
//! # Without a model
//!
//! A classifier built without a model decides from the keyword scores alone:
//!
//! ```rust
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! use greentrash::{Label, WasteClass, WasteClassifier};
//!
//! let classifier = WasteClassifier::builder().build()?;
//! let result = classifier.classify_input(None, "casca de banana")?;
//! assert_eq!(result.predicted_class, Label::Class(WasteClass::Organic));
//!
//! let result = classifier.classify_input(None, "")?;
//! assert_eq!(result.predicted_class, Label::Unknown);
//! assert!(result.needs_feedback);
//! # Ok(())
//! # }
//! ```

pub mod classifier;
pub mod config;
pub mod decision;
pub mod features;
pub mod lexicon;
pub mod types;

pub use classifier::{
    ClassifierError, ClassifierInfo, ClassifierInput, ProbabilisticModel, WasteClassifier,
    WasteClassifierBuilder,
};
pub use config::ExtractorConfig;
pub use decision::{disposal_tip, DecisionEngine, DecisionRule, DecisionThresholds};
pub use features::{
    combine, FeatureExtractor, FeatureVector, LayoutInfo, TextFeatureExtractor, TextFeatures,
    VisualFeatureExtractor, VisualFeatures, FEATURE_COUNT,
};
pub use lexicon::Lexicon;
pub use types::{ClassificationResult, Label, ProbabilityDistribution, WasteClass};

use image::DynamicImage;

/// Decodes an encoded image (PNG or JPEG). Reading the bytes is left to the
/// caller.
pub fn decode_image(bytes: &[u8]) -> Result<DynamicImage, ClassifierError> {
    Ok(image::load_from_memory(bytes)?)
}

/// Extracts features with the default configuration and lexicon.
pub fn extract_features(image: Option<&DynamicImage>, text: &str) -> Result<FeatureVector, ClassifierError> {
    FeatureExtractor::default().extract(image, text)
}

/// Classifies with the default thresholds. `model_available` selects the
/// primary rule cascade; without it the text-only fallback runs, which needs
/// a feature vector.
///
/// Passing [`ClassifierInput::Features`] together with `model_available`
/// fails, since no model is attached here; use a [`WasteClassifier`] for that.
pub fn classify(
    input: ClassifierInput<'_>,
    text: &str,
    model_available: bool,
) -> Result<ClassificationResult, ClassifierError> {
    WasteClassifier::builder().build()?.classify(input, text, model_available)
}

pub fn init_logger() {
    env_logger::init();
}
