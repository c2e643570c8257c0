use greentrash::features::layout::{self, HSV_HISTOGRAMS, HSV_STATS, TEXT_SCORES};
use greentrash::{
    combine, decode_image, extract_features, ClassifierError, ExtractorConfig, FeatureExtractor,
    LayoutInfo, Lexicon, TextFeatureExtractor, TextFeatures, VisualFeatureExtractor, FEATURE_COUNT,
};
use image::{DynamicImage, ImageFormat, Rgb, RgbImage};
use std::io::Cursor;

fn gradient(width: u32, height: u32) -> DynamicImage {
    DynamicImage::ImageRgb8(RgbImage::from_fn(width, height, |x, y| {
        Rgb([
            (x * 255 / width.max(1)) as u8,
            (y * 255 / height.max(1)) as u8,
            128,
        ])
    }))
}

fn disk() -> DynamicImage {
    DynamicImage::ImageRgb8(RgbImage::from_fn(80, 80, |x, y| {
        let dx = x as f64 - 40.0;
        let dy = y as f64 - 40.0;
        if dx * dx + dy * dy < 400.0 {
            Rgb([220, 40, 40])
        } else {
            Rgb([20, 20, 20])
        }
    }))
}

#[test]
fn test_extraction_is_deterministic() -> Result<(), Box<dyn std::error::Error>> {
    let image = disk();
    let first = extract_features(Some(&image), "lata de alumínio")?;
    let second = extract_features(Some(&image), "lata de alumínio")?;
    assert_eq!(first, second);
    assert_eq!(first.len(), FEATURE_COUNT);
    Ok(())
}

#[test]
fn test_hsv_histograms_sum_to_one() -> Result<(), Box<dyn std::error::Error>> {
    let features = extract_features(Some(&gradient(97, 61)), "")?.to_vec();
    let histograms = &features[HSV_HISTOGRAMS];
    for channel in histograms.chunks(layout::HSV_BINS) {
        let sum: f64 = channel.iter().sum();
        assert!((sum - 1.0).abs() < 1e-9, "channel sums to {}", sum);
    }

    // hue mean within [0, 180), saturation and value means within [0, 255]
    let stats = &features[HSV_STATS];
    assert!((0.0..180.0).contains(&stats[0]));
    assert!((0.0..=255.0).contains(&stats[2]));
    assert!((0.0..=255.0).contains(&stats[4]));
    Ok(())
}

#[test]
fn test_missing_image_is_all_zero_visual_block() {
    let text = TextFeatureExtractor::default().extract("garrafa pet");
    let vector = combine(None, &text);
    let values = vector.to_vec();
    assert!(values[..TEXT_SCORES.start].iter().all(|&v| v == 0.0));
    assert_eq!(&values[TEXT_SCORES], text.scores());
}

#[test]
fn test_empty_text_is_all_zero_text_block() -> Result<(), Box<dyn std::error::Error>> {
    let vector = extract_features(Some(&disk()), "")?;
    assert_eq!(vector.text_scores(), TextFeatures::zeros());
    Ok(())
}

#[test]
fn test_image_size_does_not_change_layout() -> Result<(), Box<dyn std::error::Error>> {
    let extractor = VisualFeatureExtractor::new(ExtractorConfig {
        resize_edge: 64,
        ..Default::default()
    });
    for (w, h) in [(1, 1), (7, 300), (640, 480)] {
        let features = extractor.extract(&gradient(w, h))?;
        let values = features.to_vec();
        assert_eq!(values.len(), layout::VISUAL_FEATURE_COUNT);
        assert!(values.iter().all(|v| v.is_finite()));
    }
    Ok(())
}

#[test]
fn test_custom_lexicon() {
    const FRUIT: &[&str] = &["manga"];
    let lexicon = Lexicon::from_tables([FRUIT, &[], &[], &[]]);
    let extractor = FeatureExtractor::new(ExtractorConfig::default(), lexicon);
    let features = extractor.extract(None, "Manga madura").unwrap();
    assert_eq!(features.text_scores().scores(), &[1.0, 0.0, 0.0, 0.0]);
}

#[test]
fn test_layout_info() {
    let info = LayoutInfo::current();
    assert_eq!(info.feature_count, FEATURE_COUNT);
    assert_eq!(info.hash, layout::layout_hash());
    let total: usize = info.segments.iter().map(|(_, len)| len).sum();
    assert_eq!(total, FEATURE_COUNT);
    assert_eq!(layout::segment("text_scores").map(|s| s.range()), Some(TEXT_SCORES));
}

#[test]
fn test_decode_image() -> Result<(), Box<dyn std::error::Error>> {
    let mut bytes = Vec::new();
    disk().write_to(&mut Cursor::new(&mut bytes), ImageFormat::Png)?;
    let decoded = decode_image(&bytes)?;
    assert_eq!(decoded.to_rgb8(), disk().to_rgb8());

    let result = decode_image(b"not an image");
    assert!(matches!(result, Err(ClassifierError::ImageLoad(_))));
    Ok(())
}
