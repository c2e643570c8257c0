//! Feature layout: the authoritative order of the 122 model inputs.
//!
//! Models trained on one layout are only valid for that layout. Changing the
//! order, width or meaning of any segment requires bumping
//! [`FEATURE_VERSION`].

use std::ops::Range;

use crc32fast::Hasher;
use lazy_static::lazy_static;
use serde::{Deserialize, Serialize};

/// Current feature layout version
pub const FEATURE_VERSION: u8 = 1;

pub const HSV_BINS: usize = 30;
pub const LBP_BINS: usize = 10;
pub const GLCM_PROPERTIES: usize = 4;
pub const HU_MOMENTS: usize = 7;

/// Number of visual features: [0, 118)
pub const VISUAL_FEATURE_COUNT: usize = 118;
/// Number of text features: [118, 122)
pub const TEXT_FEATURE_COUNT: usize = 4;
/// Total number of features
pub const FEATURE_COUNT: usize = VISUAL_FEATURE_COUNT + TEXT_FEATURE_COUNT;

pub const HSV_HISTOGRAMS: Range<usize> = 0..90;
pub const HSV_STATS: Range<usize> = 90..96;
pub const LBP_HISTOGRAM: Range<usize> = 96..106;
pub const GLCM: Range<usize> = 106..110;
pub const EDGE_DENSITY: Range<usize> = 110..111;
pub const HU: Range<usize> = 111..118;
pub const TEXT_SCORES: Range<usize> = 118..122;

/// A named, contiguous block of the feature vector.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Segment {
    pub name: &'static str,
    pub offset: usize,
    pub len: usize,
}

impl Segment {
    const fn new(name: &'static str, offset: usize, len: usize) -> Self {
        Self { name, offset, len }
    }

    pub fn range(&self) -> Range<usize> {
        self.offset..self.offset + self.len
    }
}

/// Segments in the exact order they appear in the vector.
pub const FEATURE_LAYOUT: &[Segment] = &[
    Segment::new("hsv_hist_h", 0, HSV_BINS),
    Segment::new("hsv_hist_s", 30, HSV_BINS),
    Segment::new("hsv_hist_v", 60, HSV_BINS),
    Segment::new("hsv_stats", 90, 6),
    Segment::new("lbp_hist", 96, LBP_BINS),
    Segment::new("glcm", 106, GLCM_PROPERTIES),
    Segment::new("edge_density", 110, 1),
    Segment::new("hu_moments", 111, HU_MOMENTS),
    Segment::new("text_scores", 118, TEXT_FEATURE_COUNT),
];

pub fn segment(name: &str) -> Option<&'static Segment> {
    FEATURE_LAYOUT.iter().find(|s| s.name == name)
}

fn compute_layout_hash() -> u32 {
    let mut hasher = Hasher::new();
    hasher.update(&[FEATURE_VERSION]);
    for segment in FEATURE_LAYOUT {
        hasher.update(segment.name.as_bytes());
        hasher.update(&(segment.len as u32).to_le_bytes());
        hasher.update(&[0]);
    }
    hasher.finalize()
}

lazy_static! {
    static ref LAYOUT_HASH: u32 = compute_layout_hash();
}

/// CRC32 fingerprint of the layout, for detecting mismatched models or
/// stored feature data.
pub fn layout_hash() -> u32 {
    *LAYOUT_HASH
}

/// Layout description for logging and serialization.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LayoutInfo {
    pub version: u8,
    pub hash: u32,
    pub feature_count: usize,
    pub segments: Vec<(String, usize)>,
}

impl LayoutInfo {
    pub fn current() -> Self {
        Self {
            version: FEATURE_VERSION,
            hash: layout_hash(),
            feature_count: FEATURE_COUNT,
            segments: FEATURE_LAYOUT
                .iter()
                .map(|s| (s.name.to_string(), s.len))
                .collect(),
        }
    }
}

impl Default for LayoutInfo {
    fn default() -> Self {
        Self::current()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_segments_are_contiguous() {
        let mut expected_offset = 0;
        for segment in FEATURE_LAYOUT {
            assert_eq!(segment.offset, expected_offset, "gap before {}", segment.name);
            expected_offset += segment.len;
        }
        assert_eq!(expected_offset, FEATURE_COUNT);
        assert_eq!(FEATURE_COUNT, 122);
    }

    #[test]
    fn test_named_ranges_match_segments() {
        assert_eq!(segment("lbp_hist").unwrap().range(), LBP_HISTOGRAM);
        assert_eq!(segment("glcm").unwrap().range(), GLCM);
        assert_eq!(segment("edge_density").unwrap().range(), EDGE_DENSITY);
        assert_eq!(segment("hu_moments").unwrap().range(), HU);
        assert_eq!(segment("text_scores").unwrap().range(), TEXT_SCORES);
        assert_eq!(HSV_HISTOGRAMS.end, segment("hsv_hist_v").unwrap().range().end);
        assert_eq!(HU.end, VISUAL_FEATURE_COUNT);
        assert!(segment("missing").is_none());
    }

    #[test]
    fn test_layout_hash_is_stable() {
        assert_eq!(layout_hash(), compute_layout_hash());
        assert_eq!(LayoutInfo::current().hash, layout_hash());
    }
}
