//! Feature extraction: image and text to the canonical 122-value vector.
//!
//! The same [`FeatureExtractor`] is used when building training data and when
//! serving requests, so both sides always see identical features.

mod color;
pub mod layout;
mod shape;
mod text;
mod texture;
mod vector;
mod visual;

use image::DynamicImage;
use log::debug;

use crate::classifier::ClassifierError;
use crate::config::ExtractorConfig;
use crate::lexicon::Lexicon;

pub use layout::{LayoutInfo, FEATURE_COUNT, TEXT_FEATURE_COUNT, VISUAL_FEATURE_COUNT};
pub use text::TextFeatureExtractor;
pub use vector::{FeatureVector, TextFeatures, VisualFeatures};
pub use visual::VisualFeatureExtractor;

/// Concatenates the visual and text blocks. A missing image becomes 118
/// zeros, which the model reads as "no visual evidence".
pub fn combine(visual: Option<&VisualFeatures>, text: &TextFeatures) -> FeatureVector {
    match visual {
        Some(visual) => FeatureVector::from_parts(visual, text),
        None => FeatureVector::from_parts(&VisualFeatures::absent(), text),
    }
}

/// Visual and text extractors bundled behind one call.
#[derive(Debug, Clone, Default)]
pub struct FeatureExtractor {
    visual: VisualFeatureExtractor,
    text: TextFeatureExtractor,
}

impl FeatureExtractor {
    pub fn new(config: ExtractorConfig, lexicon: Lexicon) -> Self {
        Self {
            visual: VisualFeatureExtractor::new(config),
            text: TextFeatureExtractor::new(lexicon),
        }
    }

    pub fn visual(&self) -> &VisualFeatureExtractor {
        &self.visual
    }

    pub fn text(&self) -> &TextFeatureExtractor {
        &self.text
    }

    /// Extracts the full feature vector. An image that cannot be processed is
    /// an error; a missing image or empty text is not.
    pub fn extract(&self, image: Option<&DynamicImage>, text: &str) -> Result<FeatureVector, ClassifierError> {
        let visual = image.map(|img| self.visual.extract(img)).transpose()?;
        let text_features = self.text.extract(text);
        debug!(
            "Extracted features (image: {}, text scores: {:?})",
            visual.is_some(),
            text_features.scores()
        );
        Ok(combine(visual.as_ref(), &text_features))
    }
}
