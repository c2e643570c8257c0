//! Texture descriptors over the grayscale image: a rotation-invariant
//! uniform local binary pattern histogram and GLCM statistics.

use image::GrayImage;
use ndarray::{Array1, Array2};

use super::layout::LBP_BINS;
use crate::classifier::utils::l1_normalize;

/// Number of gray levels the GLCM is computed over.
pub(crate) const GLCM_LEVELS: usize = 8;

pub(crate) fn gray_to_array(gray: &GrayImage) -> Array2<f64> {
    let (w, h) = gray.dimensions();
    Array2::from_shape_fn((h as usize, w as usize), |(r, c)| {
        f64::from(gray.get_pixel(c as u32, r as u32).0[0])
    })
}

/// Local binary pattern sampler for a fixed radius and point count.
#[derive(Debug, Clone)]
pub(crate) struct LocalBinaryPattern {
    points: usize,
    offsets: Vec<(f64, f64)>,
}

impl LocalBinaryPattern {
    pub fn new(points: usize, radius: f64) -> Self {
        let offsets = (0..points)
            .map(|p| {
                let angle = 2.0 * std::f64::consts::PI * p as f64 / points as f64;
                (round5(-radius * angle.sin()), round5(radius * angle.cos()))
            })
            .collect();
        Self { points, offsets }
    }

    /// Uniform code of the pixel at (r, c): the number of neighbours at least
    /// as bright as the centre when the pattern has at most two 0/1
    /// transitions, `points + 1` otherwise.
    fn code(&self, image: &Array2<f64>, r: usize, c: usize, signs: &mut [bool]) -> usize {
        let center = image[(r, c)];
        for (sign, (dr, dc)) in signs.iter_mut().zip(&self.offsets) {
            let sample = bilinear(image, r as f64 + dr, c as f64 + dc);
            *sign = sample - center >= 0.0;
        }

        let changes = signs.windows(2).filter(|pair| pair[0] != pair[1]).count();
        if changes <= 2 {
            signs.iter().filter(|&&s| s).count()
        } else {
            self.points + 1
        }
    }

    pub fn codes(&self, image: &Array2<f64>) -> Array2<usize> {
        let mut signs = vec![false; self.points];
        let mut codes = Array2::zeros(image.raw_dim());
        for ((r, c), code) in codes.indexed_iter_mut() {
            *code = self.code(image, r, c, &mut signs);
        }
        codes
    }

    /// Density histogram over codes in [0, LBP_BINS). The last bin is closed,
    /// so it also holds code LBP_BINS; larger codes are left out. When no code
    /// falls in range (an all-black image gives code `points` everywhere) the
    /// histogram is all zeros.
    pub fn histogram(&self, image: &Array2<f64>) -> Array1<f64> {
        let mut counts = Array1::<f64>::zeros(LBP_BINS);
        for &code in self.codes(image).iter() {
            if code < LBP_BINS {
                counts[code] += 1.0;
            } else if code == LBP_BINS {
                counts[LBP_BINS - 1] += 1.0;
            }
        }
        // Unit-width bins: the density equals the relative frequency.
        l1_normalize(&counts)
    }
}

fn round5(v: f64) -> f64 {
    (v * 1e5).round() / 1e5
}

/// Bilinear sample at a fractional position; pixels outside the image read
/// as 0.
fn bilinear(image: &Array2<f64>, r: f64, c: f64) -> f64 {
    let (rows, cols) = image.dim();
    let pixel = |r: f64, c: f64| -> f64 {
        if r < 0.0 || c < 0.0 || r >= rows as f64 || c >= cols as f64 {
            0.0
        } else {
            image[(r as usize, c as usize)]
        }
    };

    let (min_r, max_r) = (r.floor(), r.ceil());
    let (min_c, max_c) = (c.floor(), c.ceil());
    let dr = r - min_r;
    let dc = c - min_c;

    let top = (1.0 - dc) * pixel(min_r, min_c) + dc * pixel(min_r, max_c);
    let bottom = (1.0 - dc) * pixel(max_r, min_c) + dc * pixel(max_r, max_c);
    (1.0 - dr) * top + dr * bottom
}

/// Contrast, dissimilarity, homogeneity and energy of the normalized,
/// symmetric co-occurrence matrix of horizontally adjacent pixels, with the
/// image quantized to [`GLCM_LEVELS`] gray levels.
pub(crate) fn glcm_properties(gray: &GrayImage) -> [f64; 4] {
    let glcm = cooccurrence_matrix(gray);

    let mut contrast = 0.0;
    let mut dissimilarity = 0.0;
    let mut homogeneity = 0.0;
    let mut asm = 0.0;
    for ((i, j), &p) in glcm.indexed_iter() {
        let diff = i as f64 - j as f64;
        contrast += p * diff * diff;
        dissimilarity += p * diff.abs();
        homogeneity += p / (1.0 + diff * diff);
        asm += p * p;
    }

    [contrast, dissimilarity, homogeneity, asm.sqrt()]
}

fn cooccurrence_matrix(gray: &GrayImage) -> Array2<f64> {
    let step = 256 / GLCM_LEVELS;
    let mut counts = Array2::<f64>::zeros((GLCM_LEVELS, GLCM_LEVELS));
    let (w, h) = gray.dimensions();

    for y in 0..h {
        for x in 1..w {
            let i = usize::from(gray.get_pixel(x - 1, y).0[0]) / step;
            let j = usize::from(gray.get_pixel(x, y).0[0]) / step;
            counts[(i, j)] += 1.0;
        }
    }

    let symmetric = &counts + &counts.t();
    let total = symmetric.sum();
    if total > 0.0 {
        symmetric / total
    } else {
        symmetric
    }
}
