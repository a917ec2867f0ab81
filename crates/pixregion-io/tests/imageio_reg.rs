//! Image I/O regression test
//!
//! Writes buffers of every supported depth through both codecs, reads
//! them back from disk and from memory, and checks they are unchanged.

use pixregion_core::{Pix, PixelDepth, color};
use pixregion_io::{ImageFormat, read_image, read_image_mem, write_image, write_image_mem};
use pixregion_test::RegParams;

fn make_test_pix(depth: PixelDepth) -> Pix {
    let (w, h) = (37, 11);
    let mut pm = Pix::new(w, h, depth).unwrap().into_mut();
    let max = depth.max_value();
    for y in 0..h {
        for x in 0..w {
            let val = match depth {
                PixelDepth::Bit32 => color::compose_rgb((x * 6) as u8, (y * 20) as u8, 128),
                _ => (x * 31 + y * 17) & max,
            };
            pm.set_pixel_unchecked(x, y, val);
        }
    }
    pm.into()
}

#[test]
fn imageio_reg() {
    let mut rp = RegParams::new("imageio");
    let dir = std::env::temp_dir().join(format!("pixregion_imageio_{}", std::process::id()));
    std::fs::create_dir_all(&dir).unwrap();

    let cases = [
        (PixelDepth::Bit1, ImageFormat::Png),
        (PixelDepth::Bit8, ImageFormat::Png),
        (PixelDepth::Bit16, ImageFormat::Png),
        (PixelDepth::Bit32, ImageFormat::Png),
        (PixelDepth::Bit1, ImageFormat::Pnm),
        (PixelDepth::Bit8, ImageFormat::Pnm),
        (PixelDepth::Bit16, ImageFormat::Pnm),
        (PixelDepth::Bit32, ImageFormat::Pnm),
    ];

    for (depth, format) in cases {
        let pix = make_test_pix(depth);
        let path = dir.join(format!("d{}.{}", depth.bits(), format.extension()));

        // --- file round trip ---
        write_image(&pix, &path, format).unwrap();
        let from_file = read_image(&path).unwrap();
        eprintln!("  {:?} {:2} bpp -> {}", format, depth.bits(), path.display());
        rp.compare_values(depth.bits() as f64, from_file.depth().bits() as f64, 0.0);
        rp.compare_pix(&pix, &from_file);

        // --- memory round trip ---
        let bytes = write_image_mem(&pix, format).unwrap();
        let from_mem = read_image_mem(&bytes).unwrap();
        rp.compare_pix(&pix, &from_mem);
    }

    // Garbage is an error value, never a panic
    rp.compare_values(
        1.0,
        if read_image_mem(b"definitely not an image").is_err() { 1.0 } else { 0.0 },
        0.0,
    );

    let _ = std::fs::remove_dir_all(&dir);
    assert!(rp.cleanup(), "imageio regression test failed");
}
