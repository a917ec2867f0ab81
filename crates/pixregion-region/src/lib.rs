//! pixregion-region - Region processing for pixregion
//!
//! This crate provides the region operations behind a paint-bucket or
//! border-select tool:
//!
//! - **Seed fill** - Span flood fill with a flat value or a tiled pattern
//! - **Border tracing** - Walk the outer border of a region as a point list
//!   and chain code
//! - **Click processing** - Validate a clicked coordinate and dispatch
//!
//! Region membership is exact sample equality with the value under the
//! seed, at any pixel depth.
//!
//! # Examples
//!
//! ## Flood fill
//!
//! ```
//! use pixregion_region::{floodfill, ConnectivityType};
//! use pixregion_core::{Pix, PixelDepth};
//!
//! let pix = Pix::new(10, 10, PixelDepth::Bit1).unwrap();
//! let mut pix_mut = pix.try_into_mut().unwrap();
//!
//! // Fill from seed point
//! let count = floodfill(&mut pix_mut, 5, 5, 1, ConnectivityType::FourWay).unwrap();
//! assert_eq!(count, 100); // All 100 pixels filled
//! ```
//!
//! ## Border tracing
//!
//! ```
//! use pixregion_region::{trace_boundary, TraceOptions};
//! use pixregion_core::{Pix, PixelDepth};
//!
//! let mut pm = Pix::new(10, 10, PixelDepth::Bit8).unwrap().into_mut();
//! for y in 3..7 {
//!     for x in 3..7 {
//!         pm.set_pixel(x, y, 255).unwrap();
//!     }
//! }
//! let pix: Pix = pm.into();
//!
//! let border = trace_boundary(&pix, 5, 5, 255, &TraceOptions::default()).unwrap();
//! assert_eq!(border.len(), 12);
//! ```
//!
//! ## Click processing
//!
//! ```
//! use pixregion_region::{process_click, RegionOp, RegionOptions};
//! use pixregion_core::{color, Pix, PixelDepth};
//!
//! let mut pm = Pix::new_with_value(16, 16, PixelDepth::Bit32, color::WHITE)
//!     .unwrap()
//!     .into_mut();
//! let op = RegionOp::Fill { color: color::RED_OPAQUE };
//! let outcome = process_click(&mut pm, 4, 4, &op, &RegionOptions::default()).unwrap();
//! assert_eq!(outcome.fill_result().unwrap().pixel_count, 256);
//! ```

pub mod ccbord;
pub mod error;
pub mod process;
pub mod seedfill;

// Re-export core types
pub use pixregion_core;

// Re-export error types
pub use error::{RegionError, RegionResult};

// Re-export seedfill types and functions
pub use seedfill::{
    ConnectivityType, FillResult, SeedFillOptions, floodfill, floodfill_color, floodfill_pattern,
    region_mask, seedfill,
};

// Re-export ccbord types and functions
pub use ccbord::{
    Border, BorderPoint, BorderType, Direction, TraceOptions, TraceTermination, from_chain_code,
    render_border, to_chain_code, trace_boundary,
};

// Re-export click processing
pub use process::{RegionOp, RegionOptions, RegionOutcome, process_click};
