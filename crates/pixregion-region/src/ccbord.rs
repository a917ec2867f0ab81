//! Border tracing
//!
//! Walks the 8-connected outer border of the region of `target`-valued
//! pixels that contains a seed. The walk is a state machine over
//! `(pixel, direction)`: from pixel `p`, reached by moving in direction
//! `d`, the eight neighbors are scanned clockwise starting two steps
//! counter-clockwise of `d`, and the first target neighbor is the next
//! border pixel. Pixels outside the image never belong to the region, so
//! a border touching the image edge follows the edge.
//!
//! Points are kept in walk order; [`Border::sorted_for_display`] gives a
//! row-major copy for presentation.

use crate::error::{RegionError, RegionResult};
use pixregion_core::pix::{get_data_bit, set_data_bit_val};
use pixregion_core::{Box, Pix, PixMut, PixelDepth};

/// Direction for border traversal (8-connected, clockwise from West)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Direction {
    /// West (-1, 0)
    West = 0,
    /// Northwest (-1, -1)
    NorthWest = 1,
    /// North (0, -1)
    North = 2,
    /// Northeast (1, -1)
    NorthEast = 3,
    /// East (1, 0)
    East = 4,
    /// Southeast (1, 1)
    SouthEast = 5,
    /// South (0, 1)
    South = 6,
    /// Southwest (-1, 1)
    SouthWest = 7,
}

impl Direction {
    /// Get the x offset for this direction
    #[inline]
    pub fn dx(self) -> i32 {
        XPOSTAB[self as usize]
    }

    /// Get the y offset for this direction
    #[inline]
    pub fn dy(self) -> i32 {
        YPOSTAB[self as usize]
    }

    /// Direction code, 0 (West) to 7 (Southwest)
    #[inline]
    pub fn index(self) -> usize {
        self as usize
    }

    /// Get direction from x,y offsets
    pub fn from_offset(dx: i32, dy: i32) -> Option<Self> {
        if dx.abs() > 1 || dy.abs() > 1 || (dx == 0 && dy == 0) {
            return None;
        }
        let idx = DIRTAB[(1 + dy) as usize][(1 + dx) as usize];
        if idx < 0 {
            None
        } else {
            Some(Self::from_index(idx as usize))
        }
    }

    /// Create direction from index, taken modulo 8
    #[inline]
    pub fn from_index(idx: usize) -> Self {
        match idx % 8 {
            0 => Direction::West,
            1 => Direction::NorthWest,
            2 => Direction::North,
            3 => Direction::NorthEast,
            4 => Direction::East,
            5 => Direction::SouthEast,
            6 => Direction::South,
            _ => Direction::SouthWest,
        }
    }

    /// Get all 8 directions in order
    pub fn all() -> [Direction; 8] {
        [
            Direction::West,
            Direction::NorthWest,
            Direction::North,
            Direction::NorthEast,
            Direction::East,
            Direction::SouthEast,
            Direction::South,
            Direction::SouthWest,
        ]
    }

    /// Signed turn from `self` to `next` in eighths of a full turn.
    ///
    /// Clockwise is positive; a reversal counts as +4.
    #[inline]
    fn turn_to(self, next: Direction) -> i32 {
        ((next as i32 - self as i32 + 8 + 3) % 8) - 3
    }
}

/// X offset for each direction
const XPOSTAB: [i32; 8] = [-1, -1, 0, 1, 1, 1, 0, -1];

/// Y offset for each direction
const YPOSTAB: [i32; 8] = [0, -1, -1, -1, 0, 1, 1, 1];

/// Direction lookup table: DIRTAB[1+dy][1+dx] gives direction index
const DIRTAB: [[i32; 3]; 3] = [[1, 2, 3], [0, -1, 4], [7, 6, 5]];

/// A point on a border
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, PartialOrd, Ord)]
pub struct BorderPoint {
    /// X coordinate
    pub x: i32,
    /// Y coordinate
    pub y: i32,
}

impl BorderPoint {
    /// Create a new border point
    #[inline]
    pub fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// Move in the given direction
    #[inline]
    pub fn moved(self, dir: Direction) -> Self {
        Self {
            x: self.x + dir.dx(),
            y: self.y + dir.dy(),
        }
    }

    /// Add offset to create new point
    #[inline]
    pub fn offset(self, dx: i32, dy: i32) -> Self {
        Self {
            x: self.x + dx,
            y: self.y + dy,
        }
    }
}

impl From<(i32, i32)> for BorderPoint {
    fn from((x, y): (i32, i32)) -> Self {
        Self::new(x, y)
    }
}

impl From<(u32, u32)> for BorderPoint {
    fn from((x, y): (u32, u32)) -> Self {
        Self::new(x as i32, y as i32)
    }
}

/// Border type classification
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum BorderType {
    /// Outer border (clockwise traversal)
    #[default]
    Outer,
    /// Hole border (counter-clockwise traversal)
    Hole,
}

/// A traced border
#[derive(Debug, Clone, Default)]
pub struct Border {
    /// Type of this border
    pub border_type: BorderType,
    /// Starting point of the border
    pub start: BorderPoint,
    /// All points on the border, in walk order
    pub points: Vec<BorderPoint>,
    /// Chain code representation (if computed)
    pub chain_code: Option<Vec<Direction>>,
}

impl Border {
    /// Create a new border from points
    pub fn new(border_type: BorderType, points: Vec<BorderPoint>) -> Self {
        let start = points.first().copied().unwrap_or_default();
        Self {
            border_type,
            start,
            points,
            chain_code: None,
        }
    }

    /// Border made of a single point
    pub fn single(point: BorderPoint) -> Self {
        Self::new(BorderType::Outer, vec![point])
    }

    /// Get the number of points in this border
    #[inline]
    pub fn len(&self) -> usize {
        self.points.len()
    }

    /// Check if the border is empty
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// Compute and store chain code representation
    pub fn compute_chain_code(&mut self) {
        self.chain_code = Some(to_chain_code(&self.points));
    }

    /// Get chain code, computing if necessary
    pub fn get_chain_code(&mut self) -> &[Direction] {
        self.chain_code
            .get_or_insert_with(|| to_chain_code(&self.points))
    }

    /// Convert points to global coordinates by adding offset
    pub fn to_global(&self, offset_x: i32, offset_y: i32) -> Border {
        Border {
            border_type: self.border_type,
            start: self.start.offset(offset_x, offset_y),
            points: self
                .points
                .iter()
                .map(|p| p.offset(offset_x, offset_y))
                .collect(),
            chain_code: self.chain_code.clone(),
        }
    }

    /// Get perimeter (number of points in walk order)
    ///
    /// Pixels on one-pixel-wide parts are counted once per visit.
    #[inline]
    pub fn perimeter(&self) -> usize {
        self.points.len()
    }

    /// Check that the last point is 8-adjacent to the first
    ///
    /// A single point is closed; an empty border is not.
    pub fn is_closed(&self) -> bool {
        match (self.points.first(), self.points.last()) {
            (Some(first), Some(last)) => {
                self.points.len() == 1
                    || ((first.x - last.x).abs() <= 1 && (first.y - last.y).abs() <= 1)
            }
            _ => false,
        }
    }

    /// Get bounding box of this border
    pub fn bounding_box(&self) -> Option<Box> {
        if self.points.is_empty() {
            return None;
        }

        let mut min_x = i32::MAX;
        let mut min_y = i32::MAX;
        let mut max_x = i32::MIN;
        let mut max_y = i32::MIN;

        for p in &self.points {
            min_x = min_x.min(p.x);
            min_y = min_y.min(p.y);
            max_x = max_x.max(p.x);
            max_y = max_y.max(p.y);
        }

        Some(Box::from_extent(min_x, min_y, max_x, max_y))
    }

    /// Copy of the points sorted by row, then column
    ///
    /// For presentation only; `points` stays in walk order.
    pub fn sorted_for_display(&self) -> Vec<BorderPoint> {
        let mut sorted = self.points.clone();
        sorted.sort_by_key(|p| (p.y, p.x));
        sorted
    }
}

/// When a walk ends
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TraceTermination {
    /// Stop when the walk is back at the start and about to repeat its
    /// first step. The border is closed, and pixels on one-pixel-wide
    /// parts appear once per visit.
    #[default]
    ClosedContour,
    /// Stop as soon as the next step lands on a pixel already recorded.
    /// Each pixel appears at most once, but a border with one-pixel-wide
    /// parts can end early.
    FirstRevisit,
}

/// Options for border tracing
#[derive(Debug, Clone)]
pub struct TraceOptions {
    /// Termination rule
    pub termination: TraceTermination,
    /// Fill `Border::chain_code` on the result
    pub compute_chain_code: bool,
}

impl Default for TraceOptions {
    fn default() -> Self {
        Self {
            termination: TraceTermination::ClosedContour,
            compute_chain_code: true,
        }
    }
}

impl TraceOptions {
    /// Set the termination rule
    pub fn with_termination(mut self, termination: TraceTermination) -> Self {
        self.termination = termination;
        self
    }

    /// Enable or disable chain code computation
    pub fn with_chain_code(mut self, compute: bool) -> Self {
        self.compute_chain_code = compute;
        self
    }
}

/// Outcome of one walk
enum Walk {
    /// Start pixel has no target neighbor
    Isolated,
    /// Points in walk order and total turning in eighths of a turn
    Traced { points: Vec<BorderPoint>, turning: i32 },
}

/// Read-only view of the region being traced
///
/// `sample` reads an in-bounds pixel; it lets the same walk run over a
/// shared [`Pix`] or a borrowed [`PixMut`].
struct Tracer<F> {
    sample: F,
    target: u32,
    width: i32,
    height: i32,
}

impl<F: Fn(u32, u32) -> u32> Tracer<F> {
    fn new(width: u32, height: u32, sample: F, target: u32) -> Self {
        Self {
            sample,
            target,
            width: width as i32,
            height: height as i32,
        }
    }

    #[inline]
    fn is_target(&self, x: i32, y: i32) -> bool {
        x >= 0
            && y >= 0
            && x < self.width
            && y < self.height
            && (self.sample)(x as u32, y as u32) == self.target
    }

    /// Direction of the next border pixel from `p`, reached moving in `dir`
    fn next_step(&self, p: BorderPoint, dir: Direction) -> Option<Direction> {
        (0..8)
            .map(|i| Direction::from_index(dir.index() + 6 + i))
            .find(|d| {
                let q = p.moved(*d);
                self.is_target(q.x, q.y)
            })
    }

    /// 1 bpp bitmap with the pixels of `points` set
    fn point_mask(&self, points: &[BorderPoint]) -> RegionResult<PixMut> {
        let mut mask =
            Pix::new(self.width as u32, self.height as u32, PixelDepth::Bit1)?.into_mut();
        for &p in points {
            mark(&mut mask, p);
        }
        Ok(mask)
    }

    fn step_budget(&self) -> usize {
        8 * self.width as usize * self.height as usize
    }

    /// Walk the border through `start`, whose western neighbor is not target
    fn walk(&self, start: BorderPoint, termination: TraceTermination) -> RegionResult<Walk> {
        let budget = self.step_budget();
        let mut points = Vec::new();
        let mut dir = Direction::North;
        let mut p = start;
        let mut first: Option<Direction> = None;
        let mut prev: Option<Direction> = None;
        let mut turning = 0i32;

        // Only used by FirstRevisit
        let mut seen = match termination {
            TraceTermination::FirstRevisit => Some(
                Pix::new(self.width as u32, self.height as u32, PixelDepth::Bit1)?.into_mut(),
            ),
            TraceTermination::ClosedContour => None,
        };

        loop {
            let Some(step) = self.next_step(p, dir) else {
                return Ok(Walk::Isolated);
            };

            match (termination, first) {
                (TraceTermination::ClosedContour, Some(f)) if p == start && step == f => {
                    if let Some(last) = prev {
                        turning += last.turn_to(f);
                    }
                    break;
                }
                (_, None) => first = Some(step),
                _ => {}
            }

            points.push(p);
            if let Some(seen) = seen.as_mut() {
                mark(seen, p);
            }
            if let Some(last) = prev {
                turning += last.turn_to(step);
            }
            prev = Some(step);

            let q = p.moved(step);
            if let Some(seen) = seen.as_ref()
                && is_marked(seen, q)
            {
                break;
            }
            if points.len() >= budget {
                log::debug!("border walk from {:?} hit the step budget {}", start, budget);
                break;
            }
            p = q;
            dir = step;
        }

        Ok(Walk::Traced { points, turning })
    }
}

#[inline]
fn mark(seen: &mut PixMut, p: BorderPoint) {
    set_data_bit_val(seen.row_data_mut(p.y as u32), p.x as u32);
}

#[inline]
fn is_marked(seen: &PixMut, p: BorderPoint) -> bool {
    get_data_bit(seen.row_data(p.y as u32), p.x as u32) != 0
}

/// Trace the outer border of the region containing a seed
///
/// The region is the 8-connected set of `target`-valued pixels holding the
/// seed. The walk starts at the westernmost target pixel reached by
/// stepping west from the seed. If that pixel lies on the border of a hole
/// inside the region, the search continues west across the hole, past any
/// islands of `target` inside it, until the outer border is found. Both
/// termination modes return the outer border; `FirstRevisit` only changes
/// where the walk along it stops.
///
/// # Returns
///
/// The border in walk order. A seed that does not hold `target`, or an
/// isolated pixel, gives a one-point border.
///
/// # Errors
///
/// Returns `InvalidSeed` if the seed position is out of bounds.
pub fn trace_boundary(
    pix: &Pix,
    seed_x: u32,
    seed_y: u32,
    target: u32,
    options: &TraceOptions,
) -> RegionResult<Border> {
    let sample = |x, y| pix.get_pixel_unchecked(x, y);
    trace_region(pix.width(), pix.height(), sample, seed_x, seed_y, target, options)
}

/// [`trace_boundary`] over a mutable buffer, without copying it
pub(crate) fn trace_boundary_in(
    pix: &PixMut,
    seed_x: u32,
    seed_y: u32,
    target: u32,
    options: &TraceOptions,
) -> RegionResult<Border> {
    let sample = |x, y| pix.get_pixel_unchecked(x, y);
    trace_region(pix.width(), pix.height(), sample, seed_x, seed_y, target, options)
}

fn trace_region<F: Fn(u32, u32) -> u32>(
    width: u32,
    height: u32,
    sample: F,
    seed_x: u32,
    seed_y: u32,
    target: u32,
    options: &TraceOptions,
) -> RegionResult<Border> {
    if seed_x >= width || seed_y >= height {
        return Err(RegionError::InvalidSeed {
            x: seed_x as i32,
            y: seed_y as i32,
        });
    }

    let tracer = Tracer::new(width, height, sample, target);
    let y = seed_y as i32;
    let mut x = seed_x as i32;

    let mut border = if !tracer.is_target(x, y) {
        log::debug!(
            "trace_boundary at ({}, {}): seed is not the target",
            seed_x,
            seed_y
        );
        Border::single(BorderPoint::new(x, y))
    } else {
        loop {
            while tracer.is_target(x - 1, y) {
                x -= 1;
            }
            let start = BorderPoint::new(x, y);

            // Outer vs hole is decided on the closed contour in both modes
            let (points, turning) = match tracer.walk(start, TraceTermination::ClosedContour)? {
                Walk::Isolated => break Border::single(start),
                Walk::Traced { points, turning } => (points, turning),
            };

            if turning >= 0 {
                let points = match options.termination {
                    TraceTermination::ClosedContour => points,
                    TraceTermination::FirstRevisit => {
                        match tracer.walk(start, TraceTermination::FirstRevisit)? {
                            Walk::Isolated => break Border::single(start),
                            Walk::Traced { points, .. } => points,
                        }
                    }
                };
                break Border::new(BorderType::Outer, points);
            }

            // Hole border: cross the hole westward. Target pixels off this
            // hole's border are islands inside the hole, not the region.
            log::debug!(
                "trace_boundary: start {:?} is on a hole border ({} points), crossing west",
                start,
                points.len()
            );
            let on_hole = tracer.point_mask(&points)?;
            x -= 1;
            while x >= 0
                && !(tracer.is_target(x, y) && is_marked(&on_hole, BorderPoint::new(x, y)))
            {
                x -= 1;
            }
            if x < 0 {
                break Border::new(BorderType::Hole, points);
            }
        }
    };

    if options.compute_chain_code {
        border.compute_chain_code();
    }
    log::debug!(
        "trace_boundary at ({}, {}): {:?} border, {} points from {:?}",
        seed_x,
        seed_y,
        border.border_type,
        border.len(),
        border.start
    );
    Ok(border)
}

/// Convert border points to chain code representation
///
/// Consecutive points that are not 8-adjacent contribute no code.
pub fn to_chain_code(points: &[BorderPoint]) -> Vec<Direction> {
    points
        .windows(2)
        .filter_map(|w| Direction::from_offset(w[1].x - w[0].x, w[1].y - w[0].y))
        .collect()
}

/// Reconstruct border points from chain code
pub fn from_chain_code(start: BorderPoint, chain: &[Direction]) -> Vec<BorderPoint> {
    let mut points = Vec::with_capacity(chain.len() + 1);
    points.push(start);
    let mut p = start;
    for &dir in chain {
        p = p.moved(dir);
        points.push(p);
    }
    points
}

/// Paint the points of a border with `value`
///
/// Points outside the image are skipped. Returns the number of points
/// painted.
pub fn render_border(pix: &mut PixMut, border: &Border, value: u32) -> u32 {
    let (w, h) = (pix.width() as i32, pix.height() as i32);
    let mut count = 0;
    for p in &border.points {
        if p.x >= 0 && p.y >= 0 && p.x < w && p.y < h {
            pix.set_pixel_unchecked(p.x as u32, p.y as u32, value);
            count += 1;
        }
    }
    count
}
