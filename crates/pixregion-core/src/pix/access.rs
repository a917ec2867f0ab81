//! Pixel access functions
//!
//! Low-level functions for getting and setting individual pixels.
//!
//! # Pixel packing
//!
//! Pixels are packed MSB-to-LSB within each 32-bit word. For example,
//! in a 1-bit image, pixel 0 occupies bit 31 (MSB) of the first word.
//!
//! # Bounds
//!
//! The checked accessors never clamp: reads outside the image return
//! `None` (or [`Error::OutOfBounds`] from [`Pix::try_get_pixel`]) and
//! writes outside the image fail with [`Error::OutOfBounds`].

use super::{Pix, PixMut, PixelDepth};
use crate::color;
use crate::error::{Error, Result};

/// Read the sample at column `x` from a packed row.
#[inline]
fn read_sample(line: &[u32], x: u32, depth: PixelDepth) -> u32 {
    match depth {
        PixelDepth::Bit1 => get_data_bit(line, x),
        PixelDepth::Bit2 => get_data_dibit(line, x),
        PixelDepth::Bit4 => get_data_qbit(line, x),
        PixelDepth::Bit8 => get_data_byte(line, x),
        PixelDepth::Bit16 => get_data_two_bytes(line, x),
        PixelDepth::Bit32 => line[x as usize],
    }
}

/// Write the sample at column `x` into a packed row.
#[inline]
fn write_sample(line: &mut [u32], x: u32, depth: PixelDepth, val: u32) {
    match depth {
        PixelDepth::Bit1 => set_data_bit(line, x, val),
        PixelDepth::Bit2 => set_data_dibit(line, x, val),
        PixelDepth::Bit4 => set_data_qbit(line, x, val),
        PixelDepth::Bit8 => set_data_byte(line, x, val),
        PixelDepth::Bit16 => set_data_two_bytes(line, x, val),
        PixelDepth::Bit32 => line[x as usize] = val,
    }
}

impl Pix {
    /// Get a pixel value at (x, y).
    ///
    /// Returns `None` if coordinates are out of bounds.
    pub fn get_pixel(&self, x: u32, y: u32) -> Option<u32> {
        if x >= self.width() || y >= self.height() {
            return None;
        }
        Some(self.get_pixel_unchecked(x, y))
    }

    /// Get a pixel value at (x, y), reporting out-of-range access.
    ///
    /// # Errors
    ///
    /// Returns [`Error::OutOfBounds`] if coordinates are out of bounds.
    pub fn try_get_pixel(&self, x: u32, y: u32) -> Result<u32> {
        self.get_pixel(x, y).ok_or(Error::OutOfBounds {
            x,
            y,
            width: self.width(),
            height: self.height(),
        })
    }

    /// Get a pixel value without bounds checking.
    ///
    /// # Panics
    ///
    /// Panics if `y >= height`, or if `x` lies beyond the row's words.
    #[inline]
    pub fn get_pixel_unchecked(&self, x: u32, y: u32) -> u32 {
        read_sample(self.row_data(y), x, self.depth())
    }

    /// Get RGB values at (x, y).
    ///
    /// Only valid for 32-bit images.
    pub fn get_rgb(&self, x: u32, y: u32) -> Option<(u8, u8, u8)> {
        if self.depth() != PixelDepth::Bit32 {
            return None;
        }
        self.get_pixel(x, y).map(color::extract_rgb)
    }

    /// Get RGBA values at (x, y).
    ///
    /// Only valid for 32-bit images.
    pub fn get_rgba(&self, x: u32, y: u32) -> Option<(u8, u8, u8, u8)> {
        if self.depth() != PixelDepth::Bit32 {
            return None;
        }
        self.get_pixel(x, y).map(color::extract_rgba)
    }
}

impl PixMut {
    /// Get a pixel value at (x, y).
    pub fn get_pixel(&self, x: u32, y: u32) -> Option<u32> {
        if x >= self.width() || y >= self.height() {
            return None;
        }
        Some(self.get_pixel_unchecked(x, y))
    }

    /// Get a pixel value at (x, y), reporting out-of-range access.
    ///
    /// # Errors
    ///
    /// Returns [`Error::OutOfBounds`] if coordinates are out of bounds.
    pub fn try_get_pixel(&self, x: u32, y: u32) -> Result<u32> {
        self.get_pixel(x, y).ok_or(Error::OutOfBounds {
            x,
            y,
            width: self.width(),
            height: self.height(),
        })
    }

    /// Get a pixel value without bounds checking.
    #[inline]
    pub fn get_pixel_unchecked(&self, x: u32, y: u32) -> u32 {
        read_sample(self.row_data(y), x, self.depth())
    }

    /// Set a pixel value at (x, y).
    ///
    /// The value is masked to the image depth.
    ///
    /// # Errors
    ///
    /// Returns [`Error::OutOfBounds`] if coordinates are out of bounds.
    pub fn set_pixel(&mut self, x: u32, y: u32, val: u32) -> Result<()> {
        if x >= self.width() || y >= self.height() {
            return Err(Error::OutOfBounds {
                x,
                y,
                width: self.width(),
                height: self.height(),
            });
        }
        self.set_pixel_unchecked(x, y, val);
        Ok(())
    }

    /// Set a pixel value without bounds checking.
    ///
    /// # Panics
    ///
    /// Panics if `y >= height`, or if `x` lies beyond the row's words.
    #[inline]
    pub fn set_pixel_unchecked(&mut self, x: u32, y: u32, val: u32) {
        let depth = self.depth();
        write_sample(self.row_data_mut(y), x, depth, val & depth.max_value());
    }

    /// Set an RGB pixel at (x, y) (alpha = 255).
    ///
    /// Only valid for 32-bit images.
    pub fn set_rgb(&mut self, x: u32, y: u32, r: u8, g: u8, b: u8) -> Result<()> {
        if self.depth() != PixelDepth::Bit32 {
            return Err(Error::UnsupportedDepth(self.depth().bits()));
        }
        self.set_pixel(x, y, color::compose_rgb(r, g, b))
    }

    /// Set an RGBA pixel at (x, y).
    ///
    /// Only valid for 32-bit images.
    pub fn set_rgba(&mut self, x: u32, y: u32, r: u8, g: u8, b: u8, a: u8) -> Result<()> {
        if self.depth() != PixelDepth::Bit32 {
            return Err(Error::UnsupportedDepth(self.depth().bits()));
        }
        self.set_pixel(x, y, color::compose_rgba(r, g, b, a))?;
        if a != 255 {
            self.set_spp(4);
        }
        Ok(())
    }
}

/// Get a 1-bit pixel value.
///
/// Pixels are packed MSB to LSB within each 32-bit word.
#[inline]
pub fn get_data_bit(line: &[u32], x: u32) -> u32 {
    (line[(x >> 5) as usize] >> (31 - (x & 31))) & 1
}

/// Set a 1-bit pixel value.
#[inline]
pub fn set_data_bit(line: &mut [u32], x: u32, val: u32) {
    let shift = 31 - (x & 31);
    let word = &mut line[(x >> 5) as usize];
    *word = (*word & !(1 << shift)) | ((val & 1) << shift);
}

/// Set a 1-bit pixel to 1.
#[inline]
pub fn set_data_bit_val(line: &mut [u32], x: u32) {
    line[(x >> 5) as usize] |= 0x8000_0000 >> (x & 31);
}

/// Clear a 1-bit pixel to 0.
#[inline]
pub fn clear_data_bit(line: &mut [u32], x: u32) {
    line[(x >> 5) as usize] &= !(0x8000_0000 >> (x & 31));
}

/// Get a 2-bit pixel value.
#[inline]
pub fn get_data_dibit(line: &[u32], x: u32) -> u32 {
    (line[(x >> 4) as usize] >> (2 * (15 - (x & 15)))) & 3
}

/// Set a 2-bit pixel value.
#[inline]
pub fn set_data_dibit(line: &mut [u32], x: u32, val: u32) {
    let shift = 2 * (15 - (x & 15));
    let word = &mut line[(x >> 4) as usize];
    *word = (*word & !(3 << shift)) | ((val & 3) << shift);
}

/// Get a 4-bit pixel value.
#[inline]
pub fn get_data_qbit(line: &[u32], x: u32) -> u32 {
    (line[(x >> 3) as usize] >> (4 * (7 - (x & 7)))) & 0xf
}

/// Set a 4-bit pixel value.
#[inline]
pub fn set_data_qbit(line: &mut [u32], x: u32, val: u32) {
    let shift = 4 * (7 - (x & 7));
    let word = &mut line[(x >> 3) as usize];
    *word = (*word & !(0xf << shift)) | ((val & 0xf) << shift);
}

/// Get an 8-bit pixel value.
#[inline]
pub fn get_data_byte(line: &[u32], x: u32) -> u32 {
    (line[(x >> 2) as usize] >> (8 * (3 - (x & 3)))) & 0xff
}

/// Set an 8-bit pixel value.
#[inline]
pub fn set_data_byte(line: &mut [u32], x: u32, val: u32) {
    let shift = 8 * (3 - (x & 3));
    let word = &mut line[(x >> 2) as usize];
    *word = (*word & !(0xff << shift)) | ((val & 0xff) << shift);
}

/// Get a 16-bit pixel value.
#[inline]
pub fn get_data_two_bytes(line: &[u32], x: u32) -> u32 {
    (line[(x >> 1) as usize] >> (16 * (1 - (x & 1)))) & 0xffff
}

/// Set a 16-bit pixel value.
#[inline]
pub fn set_data_two_bytes(line: &mut [u32], x: u32, val: u32) {
    let shift = 16 * (1 - (x & 1));
    let word = &mut line[(x >> 1) as usize];
    *word = (*word & !(0xffff << shift)) | ((val & 0xffff) << shift);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bit_packing_msb_first() {
        let mut line = [0u32; 2];
        set_data_bit(&mut line, 0, 1);
        assert_eq!(line[0], 0x8000_0000);
        set_data_bit_val(&mut line, 33);
        assert_eq!(line[1], 0x4000_0000);
        assert_eq!(get_data_bit(&line, 33), 1);
        clear_data_bit(&mut line, 33);
        assert_eq!(get_data_bit(&line, 33), 0);
    }

    #[test]
    fn test_sub_word_depths_do_not_bleed() {
        let mut line = [0u32; 1];
        set_data_byte(&mut line, 1, 0xab);
        set_data_byte(&mut line, 2, 0xcd);
        assert_eq!(line[0], 0x00ab_cd00);
        set_data_byte(&mut line, 1, 0x01);
        assert_eq!(get_data_byte(&line, 2), 0xcd);

        let mut line = [0u32; 1];
        set_data_qbit(&mut line, 7, 0xf);
        set_data_dibit(&mut line, 0, 2);
        assert_eq!(get_data_qbit(&line, 7), 0xf);
        assert_eq!(get_data_dibit(&line, 0), 2);
        assert_eq!(get_data_dibit(&line, 1), 0);

        let mut line = [0u32; 1];
        set_data_two_bytes(&mut line, 1, 0xbeef);
        assert_eq!(line[0], 0x0000_beef);
    }

    #[test]
    fn test_get_set_every_depth() {
        for depth in [
            PixelDepth::Bit1,
            PixelDepth::Bit2,
            PixelDepth::Bit4,
            PixelDepth::Bit8,
            PixelDepth::Bit16,
            PixelDepth::Bit32,
        ] {
            let mut pm = Pix::new(37, 3, depth).unwrap().into_mut();
            let val = depth.max_value();
            pm.set_pixel(36, 2, val).unwrap();
            assert_eq!(pm.get_pixel(36, 2), Some(val), "depth {:?}", depth);
            assert_eq!(pm.get_pixel(35, 2), Some(0), "depth {:?}", depth);
        }
    }

    #[test]
    fn test_set_pixel_masks_value() {
        let mut pm = Pix::new(4, 4, PixelDepth::Bit8).unwrap().into_mut();
        pm.set_pixel(0, 0, 0x1ff).unwrap();
        assert_eq!(pm.get_pixel(0, 0), Some(0xff));
    }

    #[test]
    fn test_out_of_bounds_is_signaled() {
        let mut pm = Pix::new(4, 4, PixelDepth::Bit32).unwrap().into_mut();
        assert!(matches!(
            pm.set_pixel(4, 0, 1),
            Err(Error::OutOfBounds { x: 4, y: 0, .. })
        ));
        assert_eq!(pm.get_pixel(0, 4), None);
        let pix: Pix = pm.into();
        assert!(pix.try_get_pixel(9, 9).is_err());
        assert_eq!(pix.try_get_pixel(3, 3).unwrap(), 0);
    }

    #[test]
    fn test_rgb_access() {
        let mut pm = Pix::new(3, 3, PixelDepth::Bit32).unwrap().into_mut();
        pm.set_rgb(1, 1, 10, 20, 30).unwrap();
        pm.set_rgba(2, 2, 1, 2, 3, 4).unwrap();
        assert_eq!(pm.spp(), 4);
        let pix: Pix = pm.into();
        assert_eq!(pix.get_rgb(1, 1), Some((10, 20, 30)));
        assert_eq!(pix.get_rgba(1, 1), Some((10, 20, 30, 255)));
        assert_eq!(pix.get_rgba(2, 2), Some((1, 2, 3, 4)));
    }

    #[test]
    fn test_rgb_requires_32bpp() {
        let mut pm = Pix::new(3, 3, PixelDepth::Bit8).unwrap().into_mut();
        assert!(pm.set_rgb(0, 0, 1, 2, 3).is_err());
        let pix: Pix = pm.into();
        assert_eq!(pix.get_rgb(0, 0), None);
    }
}
