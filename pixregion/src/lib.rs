//! pixregion - Region processing on raster images
//!
//! # Overview
//!
//! pixregion provides the operations behind paint-bucket and
//! border-select tools:
//!
//! - Pixel buffers at 1, 2, 4, 8, 16 and 32 bits per pixel
//! - Flood fill with a flat value or a tiled pattern, 4- or 8-connected
//! - Outer border tracing with chain codes
//! - Click dispatch onto a mutable buffer
//! - Image I/O (PNG, PNM)
//!
//! # Example
//!
//! ```
//! use pixregion::{Pix, PixelDepth, color};
//! use pixregion::region::{process_click, RegionOp, RegionOptions};
//!
//! let mut pm = Pix::new_with_value(32, 32, PixelDepth::Bit32, color::WHITE)
//!     .unwrap()
//!     .into_mut();
//! let op = RegionOp::Fill { color: color::RED_OPAQUE };
//! process_click(&mut pm, 3, 3, &op, &RegionOptions::default()).unwrap();
//! assert_eq!(pm.get_pixel(31, 31), Some(color::RED_OPAQUE));
//! ```

// Re-export core types (primary data structures used everywhere)
pub use pixregion_core::*;

// Re-export domain crates as modules to avoid name conflicts
pub use pixregion_io as io;
pub use pixregion_region as region;
