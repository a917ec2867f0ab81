//! Seed fill operations
//!
//! Span-based flood fill for buffers of any depth. A fill starts at a seed
//! pixel holding the target value and repaints the connected region of
//! target-valued pixels, either with a flat replacement value or with a
//! tiled pattern anchored at the seed.
//!
//! All variants share one engine: an explicit stack of pending seeds plus
//! a 1 bpp visited bitmap the size of the buffer. Every region pixel is
//! painted exactly once, so a pattern that reintroduces the target value
//! can neither loop nor paint a pixel twice. Fills are clipped at the
//! buffer edges and never wrap.

use crate::error::{RegionError, RegionResult};
use pixregion_core::pix::{get_data_bit, set_data_bit_val};
use pixregion_core::{Box, Pix, PixMut, PixelDepth};

/// Connectivity type for region growing
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ConnectivityType {
    /// 4-way connectivity (up, down, left, right)
    #[default]
    FourWay,
    /// 8-way connectivity (includes diagonals)
    EightWay,
}

/// Options for seed fill operations
#[derive(Debug, Clone, Default)]
pub struct SeedFillOptions {
    /// Connectivity type (4-way or 8-way)
    pub connectivity: ConnectivityType,
}

impl SeedFillOptions {
    /// Create new options with the specified connectivity
    pub fn new(connectivity: ConnectivityType) -> Self {
        Self { connectivity }
    }

    /// Set the connectivity
    pub fn with_connectivity(mut self, connectivity: ConnectivityType) -> Self {
        self.connectivity = connectivity;
        self
    }
}

/// Summary of what a fill painted
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct FillResult {
    /// Number of pixels painted
    pub pixel_count: u32,
    /// Bounding box of the painted pixels, `None` if nothing was painted
    pub bounds: Option<Box>,
}

impl FillResult {
    /// Result of a fill that had nothing to do
    pub fn noop() -> Self {
        Self::default()
    }

    /// Check whether the fill painted nothing
    pub fn is_noop(&self) -> bool {
        self.pixel_count == 0
    }
}

/// What the span engine reads and paints.
///
/// `is_target` is queried against the current state of the destination,
/// so implementations that paint in place see their own writes; the
/// visited bitmap keeps those writes from being revisited.
trait FillTarget {
    fn is_target(&self, x: u32, y: u32) -> bool;
    fn paint_span(&mut self, x1: u32, x2: u32, y: u32);
}

/// Paints a single value in place
struct FlatFill<'a> {
    pix: &'a mut PixMut,
    target: u32,
    replacement: u32,
}

impl FillTarget for FlatFill<'_> {
    fn is_target(&self, x: u32, y: u32) -> bool {
        self.pix.get_pixel_unchecked(x, y) == self.target
    }

    fn paint_span(&mut self, x1: u32, x2: u32, y: u32) {
        for x in x1..=x2 {
            self.pix.set_pixel_unchecked(x, y, self.replacement);
        }
    }
}

/// Paints a tiled pattern in place, anchored at `(ox, oy)`
struct PatternFill<'a> {
    pix: &'a mut PixMut,
    target: u32,
    pattern: &'a Pix,
    ox: i64,
    oy: i64,
}

impl FillTarget for PatternFill<'_> {
    fn is_target(&self, x: u32, y: u32) -> bool {
        self.pix.get_pixel_unchecked(x, y) == self.target
    }

    fn paint_span(&mut self, x1: u32, x2: u32, y: u32) {
        let pw = self.pattern.width() as i64;
        let ph = self.pattern.height() as i64;
        let py = (y as i64 - self.oy).rem_euclid(ph) as u32;
        for x in x1..=x2 {
            let px = (x as i64 - self.ox).rem_euclid(pw) as u32;
            let val = self.pattern.get_pixel_unchecked(px, py);
            self.pix.set_pixel_unchecked(x, y, val);
        }
    }
}

/// Reads from a source buffer and marks the region in a 1 bpp mask
struct MaskFill<'a> {
    src: &'a Pix,
    target: u32,
    mask: &'a mut PixMut,
}

impl FillTarget for MaskFill<'_> {
    fn is_target(&self, x: u32, y: u32) -> bool {
        self.src.get_pixel_unchecked(x, y) == self.target
    }

    fn paint_span(&mut self, x1: u32, x2: u32, y: u32) {
        let line = self.mask.row_data_mut(y);
        for x in x1..=x2 {
            set_data_bit_val(line, x);
        }
    }
}

/// Unvisited and holding the target value
#[inline]
fn is_open<T: FillTarget>(target: &T, visited: &PixMut, x: u32, y: u32) -> bool {
    get_data_bit(visited.row_data(y), x) == 0 && target.is_target(x, y)
}

fn check_seed(width: u32, height: u32, seed_x: u32, seed_y: u32) -> RegionResult<()> {
    if seed_x >= width || seed_y >= height {
        return Err(RegionError::InvalidSeed {
            x: seed_x as i32,
            y: seed_y as i32,
        });
    }
    Ok(())
}

/// Span flood over the region containing `(seed_x, seed_y)`.
///
/// The caller has checked that the seed is in bounds and holds the target.
fn span_fill<T: FillTarget>(
    target: &mut T,
    width: u32,
    height: u32,
    seed_x: u32,
    seed_y: u32,
    connectivity: ConnectivityType,
) -> RegionResult<FillResult> {
    let mut visited = Pix::new(width, height, PixelDepth::Bit1)?.into_mut();
    let mut stack: Vec<(u32, u32)> = vec![(seed_x, seed_y)];

    let mut count = 0u32;
    let (mut min_x, mut min_y) = (u32::MAX, u32::MAX);
    let (mut max_x, mut max_y) = (0u32, 0u32);

    while let Some((x, y)) = stack.pop() {
        if !is_open(&*target, &visited, x, y) {
            continue;
        }

        let mut left = x;
        while left > 0 && is_open(&*target, &visited, left - 1, y) {
            left -= 1;
        }
        let mut right = x;
        while right + 1 < width && is_open(&*target, &visited, right + 1, y) {
            right += 1;
        }

        target.paint_span(left, right, y);
        let line = visited.row_data_mut(y);
        for j in left..=right {
            set_data_bit_val(line, j);
        }
        log::trace!("span y={} [{}, {}]", y, left, right);

        count += right - left + 1;
        min_x = min_x.min(left);
        max_x = max_x.max(right);
        min_y = min_y.min(y);
        max_y = max_y.max(y);

        let (lo, hi) = match connectivity {
            ConnectivityType::FourWay => (left, right),
            ConnectivityType::EightWay => (left.saturating_sub(1), (right + 1).min(width - 1)),
        };

        let rows = [y.checked_sub(1), (y + 1 < height).then_some(y + 1)];
        for ny in rows.into_iter().flatten() {
            // One pending seed per run of open pixels
            let mut in_run = false;
            for nx in lo..=hi {
                if is_open(&*target, &visited, nx, ny) {
                    if !in_run {
                        stack.push((nx, ny));
                        in_run = true;
                    }
                } else {
                    in_run = false;
                }
            }
        }
    }

    let bounds = (count > 0).then(|| {
        Box::from_extent(min_x as i32, min_y as i32, max_x as i32, max_y as i32)
    });
    Ok(FillResult {
        pixel_count: count,
        bounds,
    })
}

/// Flood fill with a flat replacement value
///
/// Repaints the region of `target`-valued pixels connected to the seed
/// with `replacement` (masked to the buffer depth).
///
/// # Arguments
///
/// * `pix` - Mutable image of any depth
/// * `seed_x` - X coordinate of the seed point
/// * `seed_y` - Y coordinate of the seed point
/// * `target` - Value that defines the region
/// * `replacement` - Value to paint
/// * `options` - Seed fill options
///
/// # Returns
///
/// What was painted. If the seed does not hold `target`, or `target`
/// equals the replacement, nothing is painted and the result is a no-op.
///
/// # Errors
///
/// Returns `InvalidSeed` if the seed position is out of bounds.
pub fn floodfill_color(
    pix: &mut PixMut,
    seed_x: u32,
    seed_y: u32,
    target: u32,
    replacement: u32,
    options: &SeedFillOptions,
) -> RegionResult<FillResult> {
    let (width, height) = (pix.width(), pix.height());
    check_seed(width, height, seed_x, seed_y)?;

    let replacement = replacement & pix.depth().max_value();
    let seed_val = pix.get_pixel_unchecked(seed_x, seed_y);
    if seed_val != target || target == replacement {
        log::debug!(
            "floodfill_color at ({}, {}): no-op (seed {:#x}, target {:#x}, replacement {:#x})",
            seed_x,
            seed_y,
            seed_val,
            target,
            replacement
        );
        return Ok(FillResult::noop());
    }

    let mut fill = FlatFill {
        pix,
        target,
        replacement,
    };
    let result = span_fill(
        &mut fill,
        width,
        height,
        seed_x,
        seed_y,
        options.connectivity,
    )?;
    log::debug!(
        "floodfill_color at ({}, {}): {} pixels, bounds {:?}",
        seed_x,
        seed_y,
        result.pixel_count,
        result.bounds
    );
    Ok(result)
}

/// Flood fill with a tiled pattern
///
/// Repaints the region of `target`-valued pixels connected to the seed.
/// Pixel `(x, y)` receives `pattern[(x - seed_x) mod pw, (y - seed_y) mod ph]`,
/// so the pattern origin sits on the seed and tiles in every direction.
/// The pattern may contain the target value; each pixel is still painted
/// once.
///
/// # Errors
///
/// Returns `InvalidSeed` if the seed is out of bounds, and
/// `InvalidParameters` if the pattern depth differs from the image depth.
pub fn floodfill_pattern(
    pix: &mut PixMut,
    seed_x: u32,
    seed_y: u32,
    target: u32,
    pattern: &Pix,
    options: &SeedFillOptions,
) -> RegionResult<FillResult> {
    let (width, height) = (pix.width(), pix.height());
    check_seed(width, height, seed_x, seed_y)?;

    if pattern.depth() != pix.depth() {
        return Err(RegionError::InvalidParameters(format!(
            "pattern depth {} does not match image depth {}",
            pattern.depth().bits(),
            pix.depth().bits()
        )));
    }

    if pix.get_pixel_unchecked(seed_x, seed_y) != target {
        log::debug!(
            "floodfill_pattern at ({}, {}): seed is not the target, no-op",
            seed_x,
            seed_y
        );
        return Ok(FillResult::noop());
    }

    let mut fill = PatternFill {
        pix,
        target,
        pattern,
        ox: seed_x as i64,
        oy: seed_y as i64,
    };
    let result = span_fill(
        &mut fill,
        width,
        height,
        seed_x,
        seed_y,
        options.connectivity,
    )?;
    log::debug!(
        "floodfill_pattern at ({}, {}) with {}x{} tile: {} pixels",
        seed_x,
        seed_y,
        pattern.width(),
        pattern.height(),
        result.pixel_count
    );
    Ok(result)
}

/// Flood fill from a seed point
///
/// Fills the connected region holding the seed's current value with
/// `new_value`. This modifies the image in place and returns the number
/// of pixels filled.
///
/// # Arguments
///
/// * `pix` - Mutable image of any depth
/// * `seed_x` - X coordinate of the seed point
/// * `seed_y` - Y coordinate of the seed point
/// * `new_value` - Value to fill with
/// * `connectivity` - Connectivity type
///
/// # Errors
///
/// Returns an error if the seed position is out of bounds.
pub fn floodfill(
    pix: &mut PixMut,
    seed_x: u32,
    seed_y: u32,
    new_value: u32,
    connectivity: ConnectivityType,
) -> RegionResult<u32> {
    check_seed(pix.width(), pix.height(), seed_x, seed_y)?;
    let target = pix.get_pixel_unchecked(seed_x, seed_y);
    let result = floodfill_color(
        pix,
        seed_x,
        seed_y,
        target,
        new_value,
        &SeedFillOptions::new(connectivity),
    )?;
    Ok(result.pixel_count)
}

/// Seed fill into a copy
///
/// Same as [`floodfill_color`], but the input is left untouched and the
/// filled copy is returned.
pub fn seedfill(
    pix: &Pix,
    seed_x: u32,
    seed_y: u32,
    target: u32,
    replacement: u32,
    options: &SeedFillOptions,
) -> RegionResult<Pix> {
    let mut output = pix.to_mut();
    floodfill_color(&mut output, seed_x, seed_y, target, replacement, options)?;
    Ok(output.into())
}

/// Mask of the region containing a seed
///
/// Returns a 1 bpp image, the size of `pix`, with 1 on every pixel of the
/// connected region holding the seed's value and 0 elsewhere.
///
/// # Errors
///
/// Returns `InvalidSeed` if the seed position is out of bounds.
pub fn region_mask(
    pix: &Pix,
    seed_x: u32,
    seed_y: u32,
    connectivity: ConnectivityType,
) -> RegionResult<Pix> {
    let (width, height) = (pix.width(), pix.height());
    check_seed(width, height, seed_x, seed_y)?;

    let mut mask = Pix::new(width, height, PixelDepth::Bit1)?.into_mut();
    let target = pix.get_pixel_unchecked(seed_x, seed_y);
    let mut fill = MaskFill {
        src: pix,
        target,
        mask: &mut mask,
    };
    let result = span_fill(&mut fill, width, height, seed_x, seed_y, connectivity)?;
    log::debug!(
        "region_mask at ({}, {}): {} pixels",
        seed_x,
        seed_y,
        result.pixel_count
    );
    Ok(mask.into())
}
