use rand::Rng;

use crate::core::PixelBuffer;

/// Widest column band a single streak event may touch.
pub const MAX_STREAK_WIDTH: u32 = 5;
/// Largest absolute vertical offset a streak event may apply.
pub const MAX_STREAK_OFFSET: i32 = 100;

/// Smear `count` random thin column bands vertically, clamping at the edges.
///
/// Per event: a start column `x`, a band width in `1..=MAX_STREAK_WIDTH`
/// (clipped at the right edge) and an offset in
/// `-MAX_STREAK_OFFSET..=MAX_STREAK_OFFSET` are drawn. Each affected column
/// is shifted by the offset; rows pushed past the top or bottom pile up on
/// the edge row. Events apply in order to one working copy: event k reads the
/// buffer as events 1..k-1 left it, and an event's own writes never feed its
/// own reads. The input buffer is left untouched.
pub fn apply_vertical_streaks<R: Rng>(rng: &mut R, src: &PixelBuffer, count: u32) -> PixelBuffer {
    let mut out = src.clone();
    let width = src.width();
    let mut column = vec![0u8; src.height() as usize * src.channels().count()];

    for _ in 0..count {
        let x = rng.gen_range(0..width);
        let w = rng.gen_range(1..=MAX_STREAK_WIDTH);
        let dy = rng.gen_range(-MAX_STREAK_OFFSET..=MAX_STREAK_OFFSET);
        for sx in x..x.saturating_add(w).min(width) {
            streak_column(&mut out, sx, dy, &mut column);
        }
    }
    out
}

/// Shift one column by `dy` rows, clamping targets into the buffer.
///
/// The column is snapshotted into `scratch` first so the shift reads the
/// column's pre-event content even though targets overwrite it in place.
fn streak_column(buf: &mut PixelBuffer, x: u32, dy: i32, scratch: &mut [u8]) {
    let c = buf.channels().count();
    let height = buf.height();
    for y in 0..height {
        let i = y as usize * c;
        scratch[i..i + c].copy_from_slice(buf.px(x, y));
    }
    let max_y = i64::from(height) - 1;
    for y in 0..height {
        let ty = (i64::from(y) + i64::from(dy)).clamp(0, max_y) as u32;
        let i = y as usize * c;
        buf.set_px(x, ty, &scratch[i..i + c]);
    }
}
