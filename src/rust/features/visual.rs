use image::imageops::{self, FilterType};
use image::{DynamicImage, RgbImage};
use log::debug;

use super::color::HsvPlanes;
use super::layout::VISUAL_FEATURE_COUNT;
use super::shape::{edge_density, log_hu_moments};
use super::texture::{glcm_properties, gray_to_array, LocalBinaryPattern};
use super::vector::VisualFeatures;
use crate::classifier::ClassifierError;
use crate::config::ExtractorConfig;

/// Turns an image into the 118 visual features: HSV histograms and
/// statistics, LBP histogram, GLCM properties, edge density, Hu moments.
///
/// Extraction is a pure function of the pixels and the configuration, so the
/// same image always yields the same vector.
#[derive(Debug, Clone)]
pub struct VisualFeatureExtractor {
    config: ExtractorConfig,
    lbp: LocalBinaryPattern,
}

impl VisualFeatureExtractor {
    pub fn new(config: ExtractorConfig) -> Self {
        let lbp = LocalBinaryPattern::new(config.lbp_points, config.lbp_radius);
        Self { config, lbp }
    }

    pub fn config(&self) -> &ExtractorConfig {
        &self.config
    }

    pub fn extract(&self, image: &DynamicImage) -> Result<VisualFeatures, ClassifierError> {
        if image.width() == 0 || image.height() == 0 {
            return Err(ClassifierError::InvalidImage(format!(
                "image has no pixels ({}x{})",
                image.width(),
                image.height()
            )));
        }
        self.extract_rgb(&image.to_rgb8())
    }

    pub fn extract_rgb(&self, image: &RgbImage) -> Result<VisualFeatures, ClassifierError> {
        if image.width() == 0 || image.height() == 0 {
            return Err(ClassifierError::InvalidImage("image has no pixels".into()));
        }

        let edge = self.config.resize_edge;
        debug!(
            "Extracting visual features from {}x{} image (resized to {}x{})",
            image.width(),
            image.height(),
            edge,
            edge
        );
        let resized = imageops::resize(image, edge, edge, FilterType::Triangle);

        let mut values = Vec::with_capacity(VISUAL_FEATURE_COUNT);

        let hsv = HsvPlanes::from_rgb(&resized);
        values.extend(hsv.histograms());
        values.extend(hsv.stats());

        let gray = imageops::grayscale(&resized);
        values.extend(self.lbp.histogram(&gray_to_array(&gray)).iter());
        values.extend(glcm_properties(&gray));
        values.push(edge_density(&gray, self.config.canny_low, self.config.canny_high));
        values.extend(log_hu_moments(&gray));

        VisualFeatures::new(values)
    }
}

impl Default for VisualFeatureExtractor {
    fn default() -> Self {
        Self::new(ExtractorConfig::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::features::layout::{EDGE_DENSITY, GLCM, HSV_HISTOGRAMS, LBP_HISTOGRAM};
    use image::Rgb;

    fn sample_image() -> RgbImage {
        RgbImage::from_fn(40, 30, |x, y| {
            Rgb([(x * 6) as u8, (y * 8) as u8, ((x + y) * 3) as u8])
        })
    }

    #[test]
    fn test_empty_image_is_rejected() {
        let result = VisualFeatureExtractor::default().extract(&DynamicImage::new_rgb8(0, 0));
        assert!(matches!(result, Err(ClassifierError::InvalidImage(_))));
    }

    #[test]
    fn test_vector_layout() {
        let features = VisualFeatureExtractor::default()
            .extract_rgb(&sample_image())
            .unwrap();
        let values = features.to_vec();
        assert_eq!(values.len(), VISUAL_FEATURE_COUNT);
        assert!(values.iter().all(|v| v.is_finite()));

        let lbp_sum: f64 = values[LBP_HISTOGRAM].iter().sum();
        assert!((lbp_sum - 1.0).abs() < 1e-9);

        let hist_sum: f64 = values[HSV_HISTOGRAMS].iter().sum();
        assert!((hist_sum - 3.0).abs() < 1e-9);

        let density = values[EDGE_DENSITY.start];
        assert!((0.0..=1.0).contains(&density));

        // homogeneity and energy are bounded by 1
        assert!(values[GLCM.start + 2] <= 1.0 + 1e-12);
        assert!(values[GLCM.start + 3] <= 1.0 + 1e-12);
    }

    #[test]
    fn test_black_image_has_zero_lbp_block() {
        let features = VisualFeatureExtractor::default()
            .extract_rgb(&RgbImage::new(20, 20))
            .unwrap();
        let values = features.to_vec();
        assert!(values[LBP_HISTOGRAM].iter().all(|&v| v == 0.0));
        assert!(values.iter().all(|v| v.is_finite()));
    }
}
