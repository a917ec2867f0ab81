//! pixregion-io - Image I/O for pixregion
//!
//! Loads and saves [`Pix`] buffers so region operations can run on real
//! images and regression tests can dump their results.
//!
//! # Supported formats
//!
//! - PNG (grayscale 1/2/4/8/16 bpp, RGB, RGBA)
//! - PNM (binary P4, P5, P6)
//!
//! # Example
//!
//! ```no_run
//! use pixregion_io::{read_image, write_image, ImageFormat};
//!
//! let pix = read_image("input.png").unwrap();
//! write_image(&pix, "output.pgm", ImageFormat::Pnm).unwrap();
//! ```

mod error;
pub mod format;
pub mod png;
pub mod pnm;

pub use error::{IoError, IoResult};
pub use format::{detect_format, detect_format_from_bytes};
pub use pixregion_core::ImageFormat;

use pixregion_core::Pix;
use std::fs::File;
use std::io::{BufReader, BufWriter, Cursor, Write};
use std::path::Path;

/// Read an image from a file, detecting its format from the header
pub fn read_image<P: AsRef<Path>>(path: P) -> IoResult<Pix> {
    let path = path.as_ref();
    let format = detect_format(path)?;
    log::debug!("reading {} as {:?}", path.display(), format);
    let reader = BufReader::new(File::open(path)?);
    read_image_format(reader, format)
}

/// Read an image from memory, detecting its format from the header
pub fn read_image_mem(data: &[u8]) -> IoResult<Pix> {
    let format = detect_format_from_bytes(data)?;
    read_image_format(Cursor::new(data), format)
}

fn read_image_format<R: std::io::BufRead + std::io::Seek>(
    reader: R,
    format: ImageFormat,
) -> IoResult<Pix> {
    match format {
        ImageFormat::Png => png::read_png(reader),
        ImageFormat::Pnm => pnm::read_pnm(reader),
        ImageFormat::Unknown => Err(IoError::UnsupportedFormat(
            "unknown image format".to_string(),
        )),
    }
}

/// Write an image to a file in the given format
pub fn write_image<P: AsRef<Path>>(pix: &Pix, path: P, format: ImageFormat) -> IoResult<()> {
    let path = path.as_ref();
    log::debug!(
        "writing {}x{} {} bpp image to {} as {:?}",
        pix.width(),
        pix.height(),
        pix.depth().bits(),
        path.display(),
        format
    );
    let mut writer = BufWriter::new(File::create(path)?);
    write_image_format(pix, &mut writer, format)?;
    writer.flush()?;
    Ok(())
}

/// Encode an image into memory in the given format
pub fn write_image_mem(pix: &Pix, format: ImageFormat) -> IoResult<Vec<u8>> {
    let mut buffer = Vec::new();
    write_image_format(pix, &mut buffer, format)?;
    Ok(buffer)
}

fn write_image_format<W: Write>(pix: &Pix, writer: W, format: ImageFormat) -> IoResult<()> {
    match format {
        ImageFormat::Png => png::write_png(pix, writer),
        ImageFormat::Pnm => pnm::write_pnm(pix, writer),
        ImageFormat::Unknown => Err(IoError::UnsupportedFormat(
            "cannot write unknown format".to_string(),
        )),
    }
}
