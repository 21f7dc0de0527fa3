use crate::core::{Channels, PixelBuffer};
use crate::error::{GlitchError, GlitchResult};

/// Overlay `mask` onto `photo`, keyed on pure black.
///
/// Wherever every channel of the mask pixel is zero the photo shows through;
/// any other mask pixel replaces the photo pixel outright. There is no blend
/// and no tolerance around black. A mask whose dimensions differ from the
/// photo is resampled (nearest-neighbor) to the photo's size first; use
/// [`composite_exact`] to treat a mismatch as an error instead.
pub fn composite(photo: &PixelBuffer, mask: &PixelBuffer) -> GlitchResult<PixelBuffer> {
    check_rgb(photo, mask)?;
    if photo.width() != mask.width() || photo.height() != mask.height() {
        let resampled = mask.resize_to(photo.width(), photo.height())?;
        return Ok(keyed_overlay(photo, &resampled));
    }
    Ok(keyed_overlay(photo, mask))
}

/// Like [`composite`], but a photo/mask dimension mismatch is an error.
pub fn composite_exact(photo: &PixelBuffer, mask: &PixelBuffer) -> GlitchResult<PixelBuffer> {
    check_rgb(photo, mask)?;
    if photo.width() != mask.width() || photo.height() != mask.height() {
        return Err(GlitchError::dimension(format!(
            "photo is {}x{}, mask is {}x{}",
            photo.width(),
            photo.height(),
            mask.width(),
            mask.height()
        )));
    }
    Ok(keyed_overlay(photo, mask))
}

fn check_rgb(photo: &PixelBuffer, mask: &PixelBuffer) -> GlitchResult<()> {
    if photo.channels() != Channels::Rgb || mask.channels() != Channels::Rgb {
        return Err(GlitchError::validation(
            "composite expects rgb photo and mask",
        ));
    }
    Ok(())
}

fn keyed_overlay(photo: &PixelBuffer, mask: &PixelBuffer) -> PixelBuffer {
    let mut out = photo.clone();
    for (o, m) in out
        .data_mut()
        .chunks_exact_mut(3)
        .zip(mask.data().chunks_exact(3))
    {
        if m.iter().any(|&s| s != 0) {
            o.copy_from_slice(m);
        }
    }
    out
}
