//! PNM (Portable Any Map) format support
//!
//! Reads and writes PBM (P4 binary), PGM (P5 binary), and
//! PPM (P6 binary) formats. The ASCII variants (P1/P2/P3) are not
//! supported.

use crate::{IoError, IoResult};
use pixregion_core::{ImageFormat, Pix, PixelDepth, color};
use std::io::{BufRead, Read, Write};

/// Binary PNM flavour, from the magic number
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum PnmKind {
    Pbm,
    Pgm,
    Ppm,
}

/// Parsed PNM header
#[derive(Debug)]
struct PnmHeader {
    kind: PnmKind,
    width: u32,
    height: u32,
    maxval: u32,
}

/// Read one whitespace-delimited header token, skipping `#` comments
fn read_token<R: BufRead>(reader: &mut R) -> IoResult<String> {
    let mut token = String::new();
    let mut byte = [0u8; 1];
    loop {
        if reader.read(&mut byte)? == 0 {
            break;
        }
        let c = byte[0];
        if c == b'#' && token.is_empty() {
            let mut comment = Vec::new();
            reader.read_until(b'\n', &mut comment)?;
            continue;
        }
        if c.is_ascii_whitespace() {
            if token.is_empty() {
                continue;
            }
            // The single whitespace after the last header field is consumed here
            break;
        }
        token.push(c as char);
    }
    if token.is_empty() {
        return Err(IoError::InvalidData("truncated PNM header".to_string()));
    }
    Ok(token)
}

fn read_number<R: BufRead>(reader: &mut R, what: &str) -> IoResult<u32> {
    let token = read_token(reader)?;
    token
        .parse::<u32>()
        .map_err(|_| IoError::InvalidData(format!("invalid PNM {}: {:?}", what, token)))
}

fn read_header<R: BufRead>(reader: &mut R) -> IoResult<PnmHeader> {
    let magic = read_token(reader)?;
    let kind = match magic.as_str() {
        "P4" => PnmKind::Pbm,
        "P5" => PnmKind::Pgm,
        "P6" => PnmKind::Ppm,
        "P1" | "P2" | "P3" => {
            return Err(IoError::UnsupportedFormat(format!(
                "ASCII PNM ({}) is not supported",
                magic
            )));
        }
        _ => return Err(IoError::InvalidData(format!("bad PNM magic: {:?}", magic))),
    };

    let width = read_number(reader, "width")?;
    let height = read_number(reader, "height")?;
    let maxval = if kind == PnmKind::Pbm {
        1
    } else {
        read_number(reader, "maxval")?
    };
    if maxval == 0 || maxval > 65535 {
        return Err(IoError::InvalidData(format!("invalid PNM maxval {}", maxval)));
    }
    if kind == PnmKind::Ppm && maxval > 255 {
        return Err(IoError::UnsupportedFormat(
            "16-bit PPM is not supported".to_string(),
        ));
    }

    Ok(PnmHeader {
        kind,
        width,
        height,
        maxval,
    })
}

/// Read a PNM image (P4/P5/P6) from a reader.
///
/// # Returns
/// A `Pix` at 1 bpp (PBM), 8 or 16 bpp (PGM, by maxval) or 32 bpp (PPM).
/// PBM `1` (black) is stored as pixel value 1.
pub fn read_pnm<R: BufRead>(mut reader: R) -> IoResult<Pix> {
    let header = read_header(&mut reader)?;
    let (width, height) = (header.width, header.height);

    let depth = match header.kind {
        PnmKind::Pbm => PixelDepth::Bit1,
        PnmKind::Pgm if header.maxval > 255 => PixelDepth::Bit16,
        PnmKind::Pgm => PixelDepth::Bit8,
        PnmKind::Ppm => PixelDepth::Bit32,
    };
    // Header values are untrusted; size the row before allocating
    let row_bytes = match depth {
        PixelDepth::Bit1 => Some(width.div_ceil(8)),
        PixelDepth::Bit16 => width.checked_mul(2),
        PixelDepth::Bit32 => width.checked_mul(3),
        _ => Some(width),
    };
    let bytes_per_row = row_bytes
        .ok_or_else(|| IoError::InvalidData(format!("PNM width {} is too large", width)))?
        as usize;

    let mut pix_mut = Pix::new(width, height, depth)?.into_mut();
    pix_mut.set_informat(ImageFormat::Pnm);

    let mut row = vec![0u8; bytes_per_row];
    for y in 0..height {
        reader
            .read_exact(&mut row)
            .map_err(|e| IoError::InvalidData(format!("truncated PNM raster at row {}: {}", y, e)))?;
        for x in 0..width {
            let xi = x as usize;
            let val = match depth {
                PixelDepth::Bit1 => ((row[xi / 8] >> (7 - xi % 8)) & 1) as u32,
                PixelDepth::Bit16 => ((row[xi * 2] as u32) << 8) | row[xi * 2 + 1] as u32,
                PixelDepth::Bit32 => {
                    color::compose_rgb(row[xi * 3], row[xi * 3 + 1], row[xi * 3 + 2])
                }
                _ => row[xi] as u32,
            };
            pix_mut.set_pixel_unchecked(x, y, val);
        }
    }

    Ok(pix_mut.into())
}

/// Write a `Pix` as binary PNM to a writer.
///
/// Chooses P4 (1 bpp), P5 (8 or 16 bpp grayscale), or P6 (32 bpp RGB,
/// alpha dropped) based on the pixel depth. 2 and 4 bpp are rejected.
pub fn write_pnm<W: Write>(pix: &Pix, mut writer: W) -> IoResult<()> {
    let width = pix.width();
    let height = pix.height();

    let (magic, maxval, bytes_per_row) = match pix.depth() {
        PixelDepth::Bit1 => ("P4", None, width.div_ceil(8)),
        PixelDepth::Bit8 => ("P5", Some(255), width),
        PixelDepth::Bit16 => ("P5", Some(65535), width * 2),
        PixelDepth::Bit32 => ("P6", Some(255), width * 3),
        d => {
            return Err(IoError::UnsupportedFormat(format!(
                "PNM write of {} bpp",
                d.bits()
            )));
        }
    };

    write!(writer, "{}\n{} {}\n", magic, width, height)?;
    if let Some(maxval) = maxval {
        writeln!(writer, "{}", maxval)?;
    }

    let mut row = vec![0u8; bytes_per_row as usize];
    for y in 0..height {
        row.fill(0);
        for x in 0..width {
            let xi = x as usize;
            let val = pix.get_pixel_unchecked(x, y);
            match pix.depth() {
                PixelDepth::Bit1 => row[xi / 8] |= ((val & 1) as u8) << (7 - xi % 8),
                PixelDepth::Bit16 => {
                    row[xi * 2] = (val >> 8) as u8;
                    row[xi * 2 + 1] = val as u8;
                }
                PixelDepth::Bit32 => {
                    let (r, g, b) = color::extract_rgb(val);
                    row[xi * 3..xi * 3 + 3].copy_from_slice(&[r, g, b]);
                }
                _ => row[xi] = val as u8,
            }
        }
        writer.write_all(&row)?;
    }

    Ok(())
}
