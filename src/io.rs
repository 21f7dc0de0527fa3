use std::fs;
use std::path::{Path, PathBuf};

use anyhow::Context as _;

use crate::core::{Channels, PixelBuffer};
use crate::error::GlitchResult;
use crate::pipeline::{Stage, StageSink};

/// Decode an image file into an RGB [`PixelBuffer`].
///
/// Any format the codec recognizes is accepted; alpha is dropped. Decode
/// failures propagate to the caller unmodified.
pub fn load_image(path: &Path) -> GlitchResult<PixelBuffer> {
    let dyn_img =
        image::open(path).with_context(|| format!("decode image '{}'", path.display()))?;
    let rgb = dyn_img.to_rgb8();
    let (width, height) = rgb.dimensions();
    PixelBuffer::from_raw(width, height, Channels::Rgb, rgb.into_raw())
}

/// Encode a buffer to `path`; the format follows the file extension.
pub fn save_image(buffer: &PixelBuffer, path: &Path) -> GlitchResult<()> {
    let color = match buffer.channels() {
        Channels::Gray => image::ColorType::L8,
        Channels::Rgb => image::ColorType::Rgb8,
    };
    image::save_buffer(path, buffer.data(), buffer.width(), buffer.height(), color)
        .with_context(|| format!("write image '{}'", path.display()))?;
    Ok(())
}

/// Sink that writes each stage as a PNG into one directory.
///
/// Filenames are fixed: `step1_bars.png`, `step2_bars_vertical.png`,
/// `step3_bars_horizontal.png`, `step4_masked.png`.
#[derive(Debug)]
pub struct StageWriter {
    dir: PathBuf,
}

impl StageWriter {
    /// Create the directory (and its parents) if needed.
    pub fn new(dir: impl Into<PathBuf>) -> GlitchResult<Self> {
        let dir = dir.into();
        fs::create_dir_all(&dir)
            .with_context(|| format!("create stage dir '{}'", dir.display()))?;
        Ok(Self { dir })
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    fn file_name(stage: Stage) -> &'static str {
        match stage {
            Stage::BarField => "step1_bars.png",
            Stage::VerticalStreaks => "step2_bars_vertical.png",
            Stage::HorizontalSlices => "step3_bars_horizontal.png",
            Stage::Composite => "step4_masked.png",
        }
    }
}

impl StageSink for StageWriter {
    fn stage(&mut self, stage: Stage, buffer: &PixelBuffer) -> GlitchResult<()> {
        save_image(buffer, &self.dir.join(Self::file_name(stage)))
    }
}
