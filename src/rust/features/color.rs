//! HSV histograms and channel statistics.
//!
//! Channels use the 8-bit HSV convention: hue in [0, 180), saturation and
//! value in [0, 255].

use image::RgbImage;
use ndarray::{Array1, Array2};

use super::layout::HSV_BINS;
use crate::classifier::utils::l1_normalize;

pub(crate) const HUE_RANGE: usize = 180;
pub(crate) const SATURATION_RANGE: usize = 256;
pub(crate) const VALUE_RANGE: usize = 256;

/// An image split into H, S and V planes of shape (rows, cols).
#[derive(Debug, Clone)]
pub(crate) struct HsvPlanes {
    pub hue: Array2<u8>,
    pub saturation: Array2<u8>,
    pub value: Array2<u8>,
}

impl HsvPlanes {
    pub fn from_rgb(image: &RgbImage) -> Self {
        let shape = (image.height() as usize, image.width() as usize);
        let mut hue = Array2::zeros(shape);
        let mut saturation = Array2::zeros(shape);
        let mut value = Array2::zeros(shape);

        for (x, y, pixel) in image.enumerate_pixels() {
            let [h, s, v] = rgb_to_hsv(pixel.0);
            let idx = (y as usize, x as usize);
            hue[idx] = h;
            saturation[idx] = s;
            value[idx] = v;
        }

        Self { hue, saturation, value }
    }

    fn channels(&self) -> [(&Array2<u8>, usize); 3] {
        [
            (&self.hue, HUE_RANGE),
            (&self.saturation, SATURATION_RANGE),
            (&self.value, VALUE_RANGE),
        ]
    }

    /// 30-bin histogram per channel, each L1-normalized on its own.
    pub fn histograms(&self) -> Vec<f64> {
        self.channels()
            .iter()
            .flat_map(|(plane, range)| channel_histogram(plane, HSV_BINS, *range).to_vec())
            .collect()
    }

    /// Mean and population standard deviation per channel, interleaved:
    /// [h_mean, h_std, s_mean, s_std, v_mean, v_std].
    pub fn stats(&self) -> Vec<f64> {
        self.channels()
            .iter()
            .flat_map(|(plane, _)| {
                let values = plane.mapv(f64::from);
                let mean = values.mean().unwrap_or(0.0);
                let std = values.std(0.0);
                [mean, std]
            })
            .collect()
    }
}

fn rgb_to_hsv([r, g, b]: [u8; 3]) -> [u8; 3] {
    let (r, g, b) = (f64::from(r), f64::from(g), f64::from(b));
    let max = r.max(g).max(b);
    let min = r.min(g).min(b);
    let delta = max - min;

    let saturation = if max > 0.0 { 255.0 * delta / max } else { 0.0 };

    let mut hue = if delta == 0.0 {
        0.0
    } else if max == r {
        60.0 * (g - b) / delta
    } else if max == g {
        120.0 + 60.0 * (b - r) / delta
    } else {
        240.0 + 60.0 * (r - g) / delta
    };
    if hue < 0.0 {
        hue += 360.0;
    }

    // 359.x degrees rounds up to 180, which wraps to red.
    let hue = ((hue / 2.0).round() as usize % HUE_RANGE) as u8;
    [hue, saturation.round() as u8, max as u8]
}

fn channel_histogram(plane: &Array2<u8>, bins: usize, range: usize) -> Array1<f64> {
    let mut counts = Array1::<f64>::zeros(bins);
    for &v in plane.iter() {
        let bin = usize::from(v) * bins / range;
        if bin < bins {
            counts[bin] += 1.0;
        }
    }
    l1_normalize(&counts)
}
