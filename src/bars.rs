use rand::Rng;

use crate::core::{Channels, PixelBuffer};
use crate::error::GlitchResult;
use crate::model::GlitchSpec;

/// Paint randomly placed vertical color bars onto a black canvas.
///
/// Bars march left to right: each one is `spec.bar_width` columns wide
/// (clipped at the right edge), `floor(height * spec.height_ratio)` rows
/// tall, starts at a row drawn uniformly so the bar stays inside the canvas,
/// and is followed by a gap drawn uniformly from
/// `spec.min_spacing..=spec.max_spacing`. Bars never overlap in x.
pub fn generate_bar_field<R: Rng>(
    rng: &mut R,
    width: u32,
    height: u32,
    spec: &GlitchSpec,
) -> GlitchResult<PixelBuffer> {
    spec.validate()?;
    let mut field = PixelBuffer::black(width, height, Channels::Rgb)?;

    let bar_height = (f64::from(height) * spec.height_ratio).floor() as u32;
    if bar_height == 0 {
        // Ratio rounds below one row on this height; the field stays black.
        return Ok(field);
    }

    // u64 cursor so bar_width + gap can never wrap near u32::MAX.
    let mut x = 0u64;
    while x < u64::from(width) {
        let y = rng.gen_range(0..=height - bar_height);
        let color = spec.palette[rng.gen_range(0..spec.palette.len())];
        let x0 = x as u32;
        let x1 = (x + u64::from(spec.bar_width)).min(u64::from(width)) as u32;
        field.fill_rect(x0, y, x1, y + bar_height, &color.channels());

        let gap = if spec.min_spacing == 0 && spec.max_spacing == 0 {
            0
        } else {
            rng.gen_range(spec.min_spacing..=spec.max_spacing)
        };
        x += u64::from(spec.bar_width) + u64::from(gap);
    }

    Ok(field)
}
