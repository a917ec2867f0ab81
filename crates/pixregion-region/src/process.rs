//! Click-driven region operations
//!
//! [`process_click`] is the single entry point for a caller that has a
//! buffer and a clicked coordinate: it validates the click, samples the
//! target value under it and dispatches to the fill engine or the border
//! tracer. The `&mut PixMut` borrow is held for exactly one operation.

use crate::ccbord::{Border, TraceOptions, render_border, trace_boundary_in};
use crate::error::{RegionError, RegionResult};
use crate::seedfill::{FillResult, SeedFillOptions, floodfill_color, floodfill_pattern};
use pixregion_core::{Pix, PixMut};

/// Operation to run at a clicked pixel
#[derive(Debug, Clone, Copy)]
pub enum RegionOp<'a> {
    /// Flood fill the clicked region with a flat value
    Fill { color: u32 },
    /// Flood fill the clicked region with a tiled pattern anchored at the click
    PatternFill { pattern: &'a Pix },
    /// Trace the border of the clicked region; the buffer is not modified
    TraceBoundary,
    /// Trace the border of the clicked region and paint it with `color`
    SelectBorder { color: u32 },
}

/// Options for every operation [`process_click`] can run
#[derive(Debug, Clone, Default)]
pub struct RegionOptions {
    /// Options for fills
    pub fill: SeedFillOptions,
    /// Options for border tracing
    pub trace: TraceOptions,
}

impl RegionOptions {
    /// Set the fill options
    pub fn with_fill(mut self, fill: SeedFillOptions) -> Self {
        self.fill = fill;
        self
    }

    /// Set the trace options
    pub fn with_trace(mut self, trace: TraceOptions) -> Self {
        self.trace = trace;
        self
    }
}

/// What a click produced
#[derive(Debug, Clone)]
pub enum RegionOutcome {
    /// A fill ran (possibly as a no-op)
    Filled(FillResult),
    /// A border was traced
    Boundary(Border),
}

impl RegionOutcome {
    /// The fill result, if this was a fill
    pub fn fill_result(&self) -> Option<&FillResult> {
        match self {
            Self::Filled(r) => Some(r),
            Self::Boundary(_) => None,
        }
    }

    /// The border, if this was a trace
    pub fn border(&self) -> Option<&Border> {
        match self {
            Self::Boundary(b) => Some(b),
            Self::Filled(_) => None,
        }
    }
}

/// Run a region operation at a clicked pixel
///
/// The target value is the pixel under the click, so fills repaint the
/// clicked region and traces follow its border.
///
/// # Errors
///
/// Returns `InvalidSeed` for a click outside the buffer, including
/// negative coordinates, and propagates errors from the operation.
pub fn process_click(
    pix: &mut PixMut,
    x: i32,
    y: i32,
    op: &RegionOp<'_>,
    options: &RegionOptions,
) -> RegionResult<RegionOutcome> {
    if x < 0 || y < 0 || x >= pix.width() as i32 || y >= pix.height() as i32 {
        return Err(RegionError::InvalidSeed { x, y });
    }
    let (sx, sy) = (x as u32, y as u32);
    let target = pix.get_pixel_unchecked(sx, sy);
    log::debug!("click at ({}, {}) on {:#x}: {:?}", x, y, target, op);

    let outcome = match *op {
        RegionOp::Fill { color } => RegionOutcome::Filled(floodfill_color(
            pix,
            sx,
            sy,
            target,
            color,
            &options.fill,
        )?),
        RegionOp::PatternFill { pattern } => RegionOutcome::Filled(floodfill_pattern(
            pix,
            sx,
            sy,
            target,
            pattern,
            &options.fill,
        )?),
        RegionOp::TraceBoundary => {
            RegionOutcome::Boundary(trace_boundary_in(pix, sx, sy, target, &options.trace)?)
        }
        RegionOp::SelectBorder { color } => {
            let border = trace_boundary_in(pix, sx, sy, target, &options.trace)?;
            render_border(pix, &border, color);
            RegionOutcome::Boundary(border)
        }
    };
    Ok(outcome)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ccbord::BorderType;
    use pixregion_core::{PixelDepth, color};

    fn canvas() -> PixMut {
        let mut pm = Pix::new_with_value(8, 8, PixelDepth::Bit32, color::WHITE)
            .unwrap()
            .into_mut();
        for y in 2..5 {
            for x in 2..6 {
                pm.set_pixel(x, y, color::BLACK).unwrap();
            }
        }
        pm
    }

    #[test]
    fn test_click_outside_rejected() {
        let mut pm = canvas();
        let opts = RegionOptions::default();
        for (x, y) in [(-1, 0), (0, -3), (8, 0), (0, 8)] {
            let err = process_click(&mut pm, x, y, &RegionOp::TraceBoundary, &opts);
            assert!(matches!(err, Err(RegionError::InvalidSeed { x: ex, y: ey }) if ex == x && ey == y));
        }
    }

    #[test]
    fn test_fill_samples_target_under_click() {
        let mut pm = canvas();
        let op = RegionOp::Fill {
            color: color::RED_OPAQUE,
        };
        let outcome = process_click(&mut pm, 3, 3, &op, &RegionOptions::default()).unwrap();
        let result = outcome.fill_result().copied().unwrap();
        assert_eq!(result.pixel_count, 12);
        assert_eq!(pm.get_pixel(5, 4), Some(color::RED_OPAQUE));
        assert_eq!(pm.get_pixel(0, 0), Some(color::WHITE));
        assert!(outcome.border().is_none());
    }

    #[test]
    fn test_trace_leaves_buffer() {
        let mut pm = canvas();
        let outcome =
            process_click(&mut pm, 4, 3, &RegionOp::TraceBoundary, &RegionOptions::default())
                .unwrap();
        let border = outcome.border().unwrap();
        assert_eq!(border.border_type, BorderType::Outer);
        assert_eq!(border.len(), 10);
        let pix: Pix = pm.into();
        assert!(pix.equals(&canvas().into()));
    }

    #[test]
    fn test_select_border_paints() {
        let mut pm = canvas();
        let op = RegionOp::SelectBorder {
            color: color::RED_OPAQUE,
        };
        process_click(&mut pm, 4, 3, &op, &RegionOptions::default()).unwrap();
        assert_eq!(pm.get_pixel(2, 2), Some(color::RED_OPAQUE));
        assert_eq!(pm.get_pixel(5, 4), Some(color::RED_OPAQUE));
        // Interior of a 4x3 block: (3, 3) and (4, 3)
        assert_eq!(pm.get_pixel(3, 3), Some(color::BLACK));
    }
}
