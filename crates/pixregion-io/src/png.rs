//! PNG image format support
//!
//! Grayscale images map to 1/2/4/8/16 bpp buffers; RGB, RGBA and
//! gray+alpha map to 32 bpp. Indexed images are not read.

use crate::{IoError, IoResult};
use pixregion_core::{ImageFormat, Pix, PixelDepth, color};
use png::{BitDepth, ColorType, Decoder, Encoder};
use std::io::{BufRead, Seek, Write};

/// Read a PNG image
pub fn read_png<R: BufRead + Seek>(reader: R) -> IoResult<Pix> {
    let decoder = Decoder::new(reader);
    let mut reader = decoder
        .read_info()
        .map_err(|e| IoError::DecodeError(format!("PNG decode error: {}", e)))?;

    let info = reader.info();
    let width = info.width;
    let height = info.height;
    let color_type = info.color_type;
    let bit_depth = info.bit_depth;

    let (pix_depth, spp) = match (color_type, bit_depth) {
        (ColorType::Grayscale, BitDepth::One) => (PixelDepth::Bit1, 1),
        (ColorType::Grayscale, BitDepth::Two) => (PixelDepth::Bit2, 1),
        (ColorType::Grayscale, BitDepth::Four) => (PixelDepth::Bit4, 1),
        (ColorType::Grayscale, BitDepth::Eight) => (PixelDepth::Bit8, 1),
        (ColorType::Grayscale, BitDepth::Sixteen) => (PixelDepth::Bit16, 1),
        (ColorType::GrayscaleAlpha, _) => (PixelDepth::Bit32, 4),
        (ColorType::Rgb, _) => (PixelDepth::Bit32, 3),
        (ColorType::Rgba, _) => (PixelDepth::Bit32, 4),
        _ => {
            return Err(IoError::UnsupportedFormat(format!(
                "unsupported PNG format: {:?} {:?}",
                color_type, bit_depth
            )));
        }
    };

    let buf_size = reader
        .output_buffer_size()
        .ok_or_else(|| IoError::DecodeError("failed to get output buffer size".to_string()))?;
    let mut buf = vec![0; buf_size];
    let output_info = reader
        .next_frame(&mut buf)
        .map_err(|e| IoError::DecodeError(format!("PNG frame error: {}", e)))?;

    let mut pix_mut = Pix::new(width, height, pix_depth)?.into_mut();
    pix_mut.set_spp(spp);
    pix_mut.set_informat(ImageFormat::Png);

    let bytes_per_row = output_info.line_size;
    let data = &buf[..output_info.buffer_size()];
    let wide = bit_depth == BitDepth::Sixteen;

    for y in 0..height {
        let row = &data[y as usize * bytes_per_row..(y as usize + 1) * bytes_per_row];
        for x in 0..width {
            let xi = x as usize;
            let val = match (color_type, bit_depth) {
                (ColorType::Grayscale, BitDepth::One) => ((row[xi / 8] >> (7 - xi % 8)) & 1) as u32,
                (ColorType::Grayscale, BitDepth::Two) => {
                    ((row[xi / 4] >> (6 - (xi % 4) * 2)) & 3) as u32
                }
                (ColorType::Grayscale, BitDepth::Four) => {
                    ((row[xi / 2] >> (4 - (xi % 2) * 4)) & 0xf) as u32
                }
                (ColorType::Grayscale, BitDepth::Eight) => row[xi] as u32,
                (ColorType::Grayscale, BitDepth::Sixteen) => {
                    ((row[xi * 2] as u32) << 8) | row[xi * 2 + 1] as u32
                }
                (ColorType::GrayscaleAlpha, _) => {
                    // High byte of each 16-bit sample is kept
                    let (g, a) = if wide {
                        (row[xi * 4], row[xi * 4 + 2])
                    } else {
                        (row[xi * 2], row[xi * 2 + 1])
                    };
                    color::compose_rgba(g, g, g, a)
                }
                (ColorType::Rgb, _) => {
                    let s = if wide { 6 } else { 3 };
                    let k = if wide { 2 } else { 1 };
                    let idx = xi * s;
                    color::compose_rgb(row[idx], row[idx + k], row[idx + 2 * k])
                }
                (ColorType::Rgba, _) => {
                    let s = if wide { 8 } else { 4 };
                    let k = if wide { 2 } else { 1 };
                    let idx = xi * s;
                    color::compose_rgba(row[idx], row[idx + k], row[idx + 2 * k], row[idx + 3 * k])
                }
                _ => 0,
            };
            pix_mut.set_pixel_unchecked(x, y, val);
        }
    }

    Ok(pix_mut.into())
}

/// Write a PNG image
///
/// 32 bpp buffers are written as RGBA when `spp == 4`, otherwise as RGB.
pub fn write_png<W: Write>(pix: &Pix, writer: W) -> IoResult<()> {
    let width = pix.width();
    let height = pix.height();

    let (color_type, bit_depth) = match pix.depth() {
        PixelDepth::Bit1 => (ColorType::Grayscale, BitDepth::One),
        PixelDepth::Bit2 => (ColorType::Grayscale, BitDepth::Two),
        PixelDepth::Bit4 => (ColorType::Grayscale, BitDepth::Four),
        PixelDepth::Bit8 => (ColorType::Grayscale, BitDepth::Eight),
        PixelDepth::Bit16 => (ColorType::Grayscale, BitDepth::Sixteen),
        PixelDepth::Bit32 if pix.spp() == 4 => (ColorType::Rgba, BitDepth::Eight),
        PixelDepth::Bit32 => (ColorType::Rgb, BitDepth::Eight),
    };

    let mut encoder = Encoder::new(writer, width, height);
    encoder.set_color(color_type);
    encoder.set_depth(bit_depth);

    let mut writer = encoder
        .write_header()
        .map_err(|e| IoError::EncodeError(format!("PNG header error: {}", e)))?;

    let bytes_per_row = match pix.depth() {
        PixelDepth::Bit1 => width.div_ceil(8),
        PixelDepth::Bit2 => width.div_ceil(4),
        PixelDepth::Bit4 => width.div_ceil(2),
        PixelDepth::Bit8 => width,
        PixelDepth::Bit16 => width * 2,
        PixelDepth::Bit32 if color_type == ColorType::Rgba => width * 4,
        PixelDepth::Bit32 => width * 3,
    } as usize;

    let mut data = vec![0u8; bytes_per_row * height as usize];

    for y in 0..height {
        let row = &mut data[y as usize * bytes_per_row..(y as usize + 1) * bytes_per_row];
        for x in 0..width {
            let xi = x as usize;
            let val = pix.get_pixel_unchecked(x, y);
            match pix.depth() {
                PixelDepth::Bit1 => row[xi / 8] |= ((val & 1) as u8) << (7 - xi % 8),
                PixelDepth::Bit2 => row[xi / 4] |= ((val & 3) as u8) << (6 - (xi % 4) * 2),
                PixelDepth::Bit4 => row[xi / 2] |= ((val & 0xf) as u8) << (4 - (xi % 2) * 4),
                PixelDepth::Bit8 => row[xi] = val as u8,
                PixelDepth::Bit16 => {
                    row[xi * 2] = (val >> 8) as u8;
                    row[xi * 2 + 1] = val as u8;
                }
                PixelDepth::Bit32 if color_type == ColorType::Rgba => {
                    let (r, g, b, a) = color::extract_rgba(val);
                    row[xi * 4..xi * 4 + 4].copy_from_slice(&[r, g, b, a]);
                }
                PixelDepth::Bit32 => {
                    let (r, g, b) = color::extract_rgb(val);
                    row[xi * 3..xi * 3 + 3].copy_from_slice(&[r, g, b]);
                }
            }
        }
    }

    writer
        .write_image_data(&data)
        .map_err(|e| IoError::EncodeError(format!("PNG write error: {}", e)))?;

    Ok(())
}
