//! Seed fill regression test
//!
//! Flat and pattern flood fills: exact region shape, no-op and
//! idempotence, containment, pattern anchoring and wrap, single painting
//! of every region pixel, and fills over regions far larger than any
//! recursion depth would allow.

use pixregion_core::{Pix, PixelDepth, color};
use pixregion_region::{
    ConnectivityType, SeedFillOptions, floodfill, floodfill_color, floodfill_pattern,
    region_mask, seedfill,
};
use pixregion_test::RegParams;

/// 5x5, all 0 except a plus of 1 through the center
fn make_plus() -> Pix {
    let mut pm = Pix::new(5, 5, PixelDepth::Bit8).unwrap().into_mut();
    for i in 0..5 {
        pm.set_pixel_unchecked(2, i, 1);
        pm.set_pixel_unchecked(i, 2, 1);
    }
    pm.into()
}

/// 5x5, all 0 except a 5-cell plus of 1 centered at (2, 2)
fn make_small_plus() -> Pix {
    let mut pm = Pix::new(5, 5, PixelDepth::Bit8).unwrap().into_mut();
    for (x, y) in [(2, 2), (1, 2), (3, 2), (2, 1), (2, 3)] {
        pm.set_pixel_unchecked(x, y, 1);
    }
    pm.into()
}

/// 32 bpp canvas: white with a black ring whose inside is white
fn make_ring(w: u32, h: u32) -> Pix {
    let mut pm = Pix::new_with_value(w, h, PixelDepth::Bit32, color::WHITE)
        .unwrap()
        .into_mut();
    for y in 5..25 {
        for x in 5..35 {
            if y == 5 || y == 24 || x == 5 || x == 34 {
                pm.set_pixel_unchecked(x, y, color::BLACK);
            }
        }
    }
    pm.into()
}

/// Serpentine corridor: full-width walls every other row, with the gap
/// alternating between the left and right ends
fn make_serpentine(w: u32, h: u32) -> Pix {
    let mut pm = Pix::new(w, h, PixelDepth::Bit1).unwrap().into_mut();
    for (i, y) in (1..h).step_by(2).enumerate() {
        let gap = if i % 2 == 0 { w - 1 } else { 0 };
        for x in 0..w {
            if x != gap {
                pm.set_pixel_unchecked(x, y, 1);
            }
        }
    }
    pm.into()
}

fn count_ones(mask: &Pix) -> u64 {
    let mut n = 0;
    for y in 0..mask.height() {
        for x in 0..mask.width() {
            n += mask.get_pixel_unchecked(x, y) as u64;
        }
    }
    n
}

#[test]
fn seedfill_reg() {
    let mut rp = RegParams::new("seedfill");
    let opts4 = SeedFillOptions::default();

    // --- Test 1: plus shape, exactly the 9 plus pixels ---
    let plus = make_plus();
    let mut pm = plus.to_mut();
    let r = floodfill_color(&mut pm, 2, 2, 1, 2, &opts4).unwrap();
    eprintln!("  plus: {} pixels, bounds {:?}", r.pixel_count, r.bounds);
    rp.compare_values(9.0, r.pixel_count as f64, 0.0);
    let filled: Pix = pm.into();
    let mut expected = plus.to_mut();
    for i in 0..5 {
        expected.set_pixel_unchecked(2, i, 2);
        expected.set_pixel_unchecked(i, 2, 2);
    }
    rp.compare_pix(&expected.into(), &filled);

    // 5-cell plus: exactly the plus changes, the other 20 pixels stay
    let small = make_small_plus();
    let mut pm = small.to_mut();
    let r = floodfill_color(&mut pm, 2, 2, 1, 2, &opts4).unwrap();
    rp.compare_values(5.0, r.pixel_count as f64, 0.0);
    let recolored: Pix = pm.into();
    let diff = small.count_pixel_diffs(&recolored).unwrap();
    rp.compare_values(5.0, diff.n_diff as f64, 0.0);
    rp.compare_values(20.0, (25 - diff.n_diff) as f64, 0.0);
    let mut twos = 0;
    for (x, y) in [(2, 2), (1, 2), (3, 2), (2, 1), (2, 3)] {
        if recolored.get_pixel(x, y) == Some(2) {
            twos += 1;
        }
    }
    rp.compare_values(5.0, twos as f64, 0.0);

    // --- Test 2: second fill with the same arguments is a no-op ---
    let mut pm = filled.to_mut();
    let r = floodfill_color(&mut pm, 2, 2, 1, 2, &opts4).unwrap();
    rp.compare_values(0.0, r.pixel_count as f64, 0.0);
    rp.compare_values(1.0, if r.bounds.is_none() { 1.0 } else { 0.0 }, 0.0);
    rp.compare_pix(&filled, &pm.into());

    // --- Test 3: containment, only region pixels change ---
    let ring = make_ring(40, 30);
    let inside = region_mask(&ring, 20, 15, ConnectivityType::FourWay).unwrap();
    let red = seedfill(&ring, 20, 15, color::WHITE, color::RED_OPAQUE, &opts4).unwrap();
    let diff = ring.count_pixel_diffs(&red).unwrap();
    eprintln!("  ring interior: {} changed, mask {}", diff.n_diff, count_ones(&inside));
    rp.compare_values(28.0 * 18.0, diff.n_diff as f64, 0.0);
    rp.compare_values(count_ones(&inside) as f64, diff.n_diff as f64, 0.0);
    let mut outside_changed = 0;
    for y in 0..30 {
        for x in 0..40 {
            let changed = ring.get_pixel(x, y) != red.get_pixel(x, y);
            if changed && inside.get_pixel(x, y) != Some(1) {
                outside_changed += 1;
            }
        }
    }
    rp.compare_values(0.0, outside_changed as f64, 0.0);
    rp.write_pix(&red, "ring_filled").unwrap();

    // --- Test 4: alpha takes part in equality ---
    let mut pm = ring.to_mut();
    pm.set_pixel(1, 1, color::compose_rgba(255, 255, 255, 0)).unwrap();
    let r = floodfill_color(&mut pm, 0, 0, color::WHITE, color::BLACK, &opts4).unwrap();
    let outer_white = 40 * 30 - (28 * 18) - (30 * 2 + 18 * 2) - 1;
    rp.compare_values(outer_white as f64, r.pixel_count as f64, 0.0);
    rp.compare_values(0.0, color::alpha(pm.get_pixel(1, 1).unwrap_or(0)) as f64, 0.0);

    // --- Test 5: pattern anchored at the seed, wrapping on all sides ---
    let mut pat = Pix::new(3, 2, PixelDepth::Bit8).unwrap().into_mut();
    for y in 0..2 {
        for x in 0..3 {
            pat.set_pixel_unchecked(x, y, 10 * (y * 3 + x) + 5);
        }
    }
    let pattern: Pix = pat.into();
    let (sx, sy) = (7u32, 5u32);
    let mut pm = Pix::new(13, 11, PixelDepth::Bit8).unwrap().into_mut();
    let r = floodfill_pattern(&mut pm, sx, sy, 0, &pattern, &opts4).unwrap();
    rp.compare_values(143.0, r.pixel_count as f64, 0.0);
    let mut wrong = 0;
    for y in 0..11u32 {
        for x in 0..13u32 {
            let px = (x as i32 - sx as i32).rem_euclid(3) as u32;
            let py = (y as i32 - sy as i32).rem_euclid(2) as u32;
            if pm.get_pixel(x, y) != pattern.get_pixel(px, py) {
                wrong += 1;
            }
        }
    }
    rp.compare_values(0.0, wrong as f64, 0.0);
    rp.compare_values(5.0, pm.get_pixel(sx, sy).unwrap_or(0) as f64, 0.0);

    // --- Test 6: pattern that reintroduces the target paints each pixel once ---
    let mut pat = Pix::new(2, 2, PixelDepth::Bit32).unwrap().into_mut();
    pat.set_pixel_unchecked(0, 0, color::WHITE);
    pat.set_pixel_unchecked(1, 0, color::RED_OPAQUE);
    pat.set_pixel_unchecked(0, 1, color::RED_OPAQUE);
    pat.set_pixel_unchecked(1, 1, color::WHITE);
    let checker: Pix = pat.into();
    let mut pm = ring.to_mut();
    let r = floodfill_pattern(&mut pm, 20, 15, color::WHITE, &checker, &opts4).unwrap();
    eprintln!("  checker in ring: {} pixels", r.pixel_count);
    rp.compare_values(count_ones(&inside) as f64, r.pixel_count as f64, 0.0);
    let painted: Pix = pm.into();
    rp.compare_values(
        (28 * 18 / 2) as f64,
        ring.count_pixel_diffs(&painted).unwrap().n_diff as f64,
        0.0,
    );
    rp.write_pix(&painted, "ring_checker").unwrap();

    // --- Test 7: 4-way vs 8-way through diagonal gaps ---
    let mut pm = Pix::new(6, 6, PixelDepth::Bit1).unwrap().into_mut();
    for i in 0..6 {
        pm.set_pixel_unchecked(i, 5 - i, 1);
    }
    let diag: Pix = pm.into();
    let mut four = diag.to_mut();
    let n4 = floodfill(&mut four, 0, 0, 1, ConnectivityType::FourWay).unwrap();
    let mut eight = diag.to_mut();
    let n8 = floodfill(&mut eight, 0, 0, 1, ConnectivityType::EightWay).unwrap();
    eprintln!("  diagonal wall: 4-way {}, 8-way {}", n4, n8);
    rp.compare_values(15.0, n4 as f64, 0.0);
    rp.compare_values(30.0, n8 as f64, 0.0);

    // --- Test 8: large uniform region ---
    let mut big = Pix::new(2000, 2000, PixelDepth::Bit1).unwrap().into_mut();
    let n = floodfill(&mut big, 1000, 1000, 1, ConnectivityType::FourWay).unwrap();
    rp.compare_values(4_000_000.0, n as f64, 0.0);

    // --- Test 9: long serpentine corridor ---
    let snake = make_serpentine(301, 1001);
    let mut pm = snake.to_mut();
    let r = floodfill_color(&mut pm, 0, 0, 0, 1, &opts4).unwrap();
    // 501 open rows of 301, plus one gap pixel in each of the 500 walls
    rp.compare_values((501 * 301 + 500) as f64, r.pixel_count as f64, 0.0);

    assert!(rp.cleanup(), "seedfill regression test failed");
}
