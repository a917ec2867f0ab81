//! Image comparison operations
//!
//! - Exact equality of two buffers
//! - Pixel difference counting
//!
//! Regression tests use these to check that an operation changed exactly
//! the pixels it should have.

use super::{Pix, PixelDepth};
use crate::color;
use crate::error::{Error, Result};

/// Result of counting pixel differences between two images
#[derive(Debug, Clone)]
pub struct PixelDiffResult {
    /// Number of pixels that differ
    pub n_diff: u64,
    /// Fraction of pixels that differ (0.0 to 1.0)
    pub fract_diff: f64,
    /// Maximum pixel difference value
    ///
    /// For 32-bit images this is the largest per-channel difference.
    pub max_diff: u32,
}

impl Pix {
    /// Count the number of pixels that differ between two images.
    ///
    /// # Errors
    ///
    /// Returns error if images have different dimensions or depths.
    pub fn count_pixel_diffs(&self, other: &Pix) -> Result<PixelDiffResult> {
        if self.depth() != other.depth() {
            return Err(Error::IncompatibleDepths(
                self.depth().bits(),
                other.depth().bits(),
            ));
        }
        if self.width() != other.width() || self.height() != other.height() {
            return Err(Error::IncompatibleSizes(
                self.width(),
                self.height(),
                other.width(),
                other.height(),
            ));
        }

        let mut n_diff = 0u64;
        let mut max_diff = 0u32;
        for y in 0..self.height() {
            for x in 0..self.width() {
                let a = self.get_pixel_unchecked(x, y);
                let b = other.get_pixel_unchecked(x, y);
                if a == b {
                    continue;
                }
                n_diff += 1;
                max_diff = max_diff.max(sample_diff(a, b, self.depth()));
            }
        }

        let total = self.width() as f64 * self.height() as f64;
        Ok(PixelDiffResult {
            n_diff,
            fract_diff: n_diff as f64 / total,
            max_diff,
        })
    }

    /// Check if two images are exactly equal.
    ///
    /// Images of different size or depth are never equal.
    pub fn equals(&self, other: &Pix) -> bool {
        if !self.sizes_equal(other) {
            return false;
        }
        (0..self.height()).all(|y| {
            (0..self.width()).all(|x| self.get_pixel_unchecked(x, y) == other.get_pixel_unchecked(x, y))
        })
    }
}

fn sample_diff(a: u32, b: u32, depth: PixelDepth) -> u32 {
    match depth {
        PixelDepth::Bit32 => {
            let (ra, ga, ba, aa) = color::extract_rgba(a);
            let (rb, gb, bb, ab) = color::extract_rgba(b);
            [(ra, rb), (ga, gb), (ba, bb), (aa, ab)]
                .iter()
                .map(|&(p, q)| (p as i32 - q as i32).unsigned_abs())
                .max()
                .unwrap_or(0)
        }
        _ => a.abs_diff(b),
    }
}
