use ndarray::Array1;

use super::vector::TextFeatures;
use crate::classifier::utils::l1_normalize;
use crate::lexicon::Lexicon;
use crate::types::WasteClass;

/// Scores a free-text description against the keyword lexicon.
#[derive(Debug, Clone, Copy, Default)]
pub struct TextFeatureExtractor {
    lexicon: Lexicon,
}

impl TextFeatureExtractor {
    pub fn new(lexicon: Lexicon) -> Self {
        Self { lexicon }
    }

    /// Raw keyword hit counts per class, before normalization.
    pub fn keyword_counts(&self, text: &str) -> [usize; 4] {
        let lowered = text.to_lowercase();
        WasteClass::ALL.map(|class| self.lexicon.count_matches(class, &lowered))
    }

    /// Keyword counts divided by their total. Text without any keyword gives
    /// all zeros, never a uniform distribution.
    pub fn extract(&self, text: &str) -> TextFeatures {
        let counts = Array1::from_iter(self.keyword_counts(text).iter().map(|&n| n as f64));
        let normalized = l1_normalize(&counts);

        let mut scores = [0.0; 4];
        for (dst, src) in scores.iter_mut().zip(normalized.iter()) {
            *dst = *src;
        }
        TextFeatures(scores)
    }
}
