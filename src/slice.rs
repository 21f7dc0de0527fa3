use rand::Rng;

use crate::core::PixelBuffer;

/// Tallest row band a single slice event may touch.
pub const MAX_SLICE_HEIGHT: u32 = 5;
/// Largest absolute horizontal shift a slice event may apply.
pub const MAX_SLICE_SHIFT: i32 = 50;

/// Circularly shift `count` random thin row bands horizontally.
///
/// Per event: a row `y`, a band height in `1..=MAX_SLICE_HEIGHT` (capped at
/// the image height) and a shift in `-MAX_SLICE_SHIFT..=MAX_SLICE_SHIFT` are
/// drawn. The band start is clamped to `height - band` so the band always
/// fits; large draws of `y` therefore pile up near the bottom edge, a
/// deliberate policy the visual effect depends on. Columns pushed past either
/// edge wrap around. Events apply in order to one working copy, so event k
/// sees the rows as events 1..k-1 left them. The input buffer is left
/// untouched.
pub fn apply_horizontal_slices<R: Rng>(rng: &mut R, src: &PixelBuffer, count: u32) -> PixelBuffer {
    let mut out = src.clone();
    let height = src.height();

    for _ in 0..count {
        let y = rng.gen_range(0..height);
        let h = rng.gen_range(1..=MAX_SLICE_HEIGHT).min(height);
        let dx = rng.gen_range(-MAX_SLICE_SHIFT..=MAX_SLICE_SHIFT);
        let y0 = y.min(height - h);
        shift_band(&mut out, y0, h, dx);
    }
    out
}

/// Rotate rows `[y0, y0 + h)` right by `dx` columns (negative rotates left).
///
/// `dx` is reduced modulo the width, so shifts wider than the image wrap.
fn shift_band(buf: &mut PixelBuffer, y0: u32, h: u32, dx: i32) {
    let c = buf.channels().count();
    let k = i64::from(dx).rem_euclid(i64::from(buf.width())) as usize * c;
    if k == 0 {
        return;
    }
    for y in y0..y0 + h {
        buf.row_mut(y).rotate_right(k);
    }
}
