//! Shape descriptors: Canny edge density and log-scaled Hu moments.

use image::GrayImage;
use imageproc::edges::canny;

use super::layout::HU_MOMENTS;

const HU_LOG_EPSILON: f64 = 1e-10;

/// Fraction of pixels marked as edges by Canny with hysteresis thresholds
/// `low` / `high`.
pub(crate) fn edge_density(gray: &GrayImage, low: f32, high: f32) -> f64 {
    let total = u64::from(gray.width()) * u64::from(gray.height());
    if total == 0 {
        return 0.0;
    }
    let edges = canny(gray, low, high);
    let edge_pixels = edges.pixels().filter(|p| p.0[0] > 0).count() as u64;
    edge_pixels as f64 / total as f64
}

/// Intensity-weighted central moments up to third order.
#[derive(Debug, Clone, Copy, Default)]
struct Moments {
    m00: f64,
    mu20: f64,
    mu11: f64,
    mu02: f64,
    mu30: f64,
    mu21: f64,
    mu12: f64,
    mu03: f64,
}

impl Moments {
    fn of(gray: &GrayImage) -> Self {
        let mut m00 = 0.0;
        let mut m10 = 0.0;
        let mut m01 = 0.0;
        for (x, y, p) in gray.enumerate_pixels() {
            let i = f64::from(p.0[0]);
            m00 += i;
            m10 += f64::from(x) * i;
            m01 += f64::from(y) * i;
        }
        if m00 == 0.0 {
            return Self::default();
        }

        let (xc, yc) = (m10 / m00, m01 / m00);
        let mut m = Self { m00, ..Self::default() };
        for (x, y, p) in gray.enumerate_pixels() {
            let i = f64::from(p.0[0]);
            if i == 0.0 {
                continue;
            }
            let dx = f64::from(x) - xc;
            let dy = f64::from(y) - yc;
            m.mu20 += dx * dx * i;
            m.mu11 += dx * dy * i;
            m.mu02 += dy * dy * i;
            m.mu30 += dx * dx * dx * i;
            m.mu21 += dx * dx * dy * i;
            m.mu12 += dx * dy * dy * i;
            m.mu03 += dy * dy * dy * i;
        }
        m
    }

    /// The seven Hu invariants. An all-black image yields zeros.
    fn hu(&self) -> [f64; HU_MOMENTS] {
        if self.m00 == 0.0 {
            return [0.0; HU_MOMENTS];
        }
        let norm2 = self.m00.powi(2);
        let norm3 = self.m00.powf(2.5);
        let (n20, n11, n02) = (self.mu20 / norm2, self.mu11 / norm2, self.mu02 / norm2);
        let (n30, n21, n12, n03) = (
            self.mu30 / norm3,
            self.mu21 / norm3,
            self.mu12 / norm3,
            self.mu03 / norm3,
        );

        let a = n30 + n12;
        let b = n21 + n03;
        let c = n30 - 3.0 * n12;
        let d = 3.0 * n21 - n03;

        [
            n20 + n02,
            (n20 - n02).powi(2) + 4.0 * n11 * n11,
            c * c + d * d,
            a * a + b * b,
            c * a * (a * a - 3.0 * b * b) + d * b * (3.0 * a * a - b * b),
            (n20 - n02) * (a * a - b * b) + 4.0 * n11 * a * b,
            d * a * (a * a - 3.0 * b * b) - c * b * (3.0 * a * a - b * b),
        ]
    }
}

/// Hu moments of the grayscale image, each mapped through
/// `-sign(h) * log10(|h| + 1e-10)`.
pub(crate) fn log_hu_moments(gray: &GrayImage) -> [f64; HU_MOMENTS] {
    Moments::of(gray).hu().map(|h| {
        if h == 0.0 {
            0.0
        } else {
            -h.signum() * (h.abs() + HU_LOG_EPSILON).log10()
        }
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::Luma;

    #[test]
    fn test_flat_image_has_no_edges() {
        let gray = GrayImage::from_pixel(32, 32, Luma([90]));
        assert_eq!(edge_density(&gray, 100.0, 200.0), 0.0);
    }

    #[test]
    fn test_sharp_boundary_has_edges() {
        let gray = GrayImage::from_fn(32, 32, |x, _| Luma([if x < 16 { 0 } else { 255 }]));
        let density = edge_density(&gray, 100.0, 200.0);
        assert!(density > 0.0 && density < 0.5, "density = {}", density);
    }

    #[test]
    fn test_black_image_has_zero_moments() {
        let gray = GrayImage::new(16, 16);
        assert_eq!(log_hu_moments(&gray), [0.0; HU_MOMENTS]);
    }

    #[test]
    fn test_hu_moments_are_translation_invariant() {
        let square_at = |ox: u32, oy: u32| {
            GrayImage::from_fn(64, 64, |x, y| {
                let inside = (ox..ox + 10).contains(&x) && (oy..oy + 6).contains(&y);
                Luma([if inside { 255 } else { 0 }])
            })
        };
        let a = log_hu_moments(&square_at(5, 5));
        let b = log_hu_moments(&square_at(40, 30));
        assert!((a[0] - b[0]).abs() < 1e-6, "{} vs {}", a[0], b[0]);
        assert!((a[1] - b[1]).abs() < 1e-6, "{} vs {}", a[1], b[1]);
        // A filled rectangle: the first invariant is positive, so the
        // transformed value is positive too (log10 of a value < 1, negated).
        assert!(a[0] > 0.0);
    }
}
