use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::bars::generate_bar_field;
use crate::composite::{composite, composite_exact};
use crate::core::{Channels, PixelBuffer};
use crate::error::{GlitchError, GlitchResult};
use crate::model::GlitchSpec;
use crate::slice::apply_horizontal_slices;
use crate::streak::apply_vertical_streaks;

/// Pipeline stages in the order a run emits them.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Stage {
    BarField,
    VerticalStreaks,
    HorizontalSlices,
    Composite,
}

/// Receives each stage's output buffer in pipeline order.
///
/// Persisting or displaying intermediates is a side effect layered on top of
/// the pipeline; it never alters what the next stage consumes. A sink error
/// aborts the run.
pub trait StageSink {
    fn stage(&mut self, stage: Stage, buffer: &PixelBuffer) -> GlitchResult<()>;
}

/// Sink that drops every stage.
#[derive(Debug, Default)]
pub struct DiscardStages;

impl StageSink for DiscardStages {
    fn stage(&mut self, _stage: Stage, _buffer: &PixelBuffer) -> GlitchResult<()> {
        Ok(())
    }
}

/// In-memory sink for tests and embedders.
#[derive(Debug, Default)]
pub struct CollectStages {
    stages: Vec<(Stage, PixelBuffer)>,
}

impl CollectStages {
    pub fn new() -> Self {
        Self::default()
    }

    /// Borrow the captured stages in pipeline order.
    pub fn stages(&self) -> &[(Stage, PixelBuffer)] {
        &self.stages
    }

    pub fn into_stages(self) -> Vec<(Stage, PixelBuffer)> {
        self.stages
    }
}

impl StageSink for CollectStages {
    fn stage(&mut self, stage: Stage, buffer: &PixelBuffer) -> GlitchResult<()> {
        self.stages.push((stage, buffer.clone()));
        Ok(())
    }
}

fn seed_rng(spec: &GlitchSpec) -> StdRng {
    match spec.seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    }
}

/// Generate a distorted bar mask: bar field, then the vertical streak and
/// horizontal slice passes. No photograph involved.
pub fn generate_mask(width: u32, height: u32, spec: &GlitchSpec) -> GlitchResult<PixelBuffer> {
    generate_mask_with_sink(width, height, spec, &mut DiscardStages)
}

/// Like [`generate_mask`], streaming each stage's buffer to `sink`.
pub fn generate_mask_with_sink(
    width: u32,
    height: u32,
    spec: &GlitchSpec,
    sink: &mut dyn StageSink,
) -> GlitchResult<PixelBuffer> {
    let mut rng = seed_rng(spec);
    generate_mask_with_rng(width, height, spec, &mut rng, sink)
}

/// Mask generation against an injected RNG.
#[tracing::instrument(skip_all)]
pub fn generate_mask_with_rng<R: Rng>(
    width: u32,
    height: u32,
    spec: &GlitchSpec,
    rng: &mut R,
    sink: &mut dyn StageSink,
) -> GlitchResult<PixelBuffer> {
    let bars = generate_bar_field(rng, width, height, spec)?;
    sink.stage(Stage::BarField, &bars)?;

    let streaked = apply_vertical_streaks(rng, &bars, spec.vertical_streaks);
    sink.stage(Stage::VerticalStreaks, &streaked)?;

    let sliced = apply_horizontal_slices(rng, &streaked, spec.horizontal_slices);
    sink.stage(Stage::HorizontalSlices, &sliced)?;

    Ok(sliced)
}

/// Run the full pipeline, discarding intermediate stages.
pub fn run_pipeline(photo: &PixelBuffer, spec: &GlitchSpec) -> GlitchResult<PixelBuffer> {
    run_pipeline_with_sink(photo, spec, &mut DiscardStages)
}

/// Run the full pipeline, seeding the RNG from `spec.seed` (OS entropy when
/// unset) and streaming each stage's buffer to `sink`.
pub fn run_pipeline_with_sink(
    photo: &PixelBuffer,
    spec: &GlitchSpec,
    sink: &mut dyn StageSink,
) -> GlitchResult<PixelBuffer> {
    let mut rng = seed_rng(spec);
    run_pipeline_with_rng(photo, spec, &mut rng, sink)
}

/// Generate the bar field at the photo's size, corrupt it with the vertical
/// streak and horizontal slice passes, and composite it over the photo.
///
/// Stages run in that fixed order, each consuming its predecessor's output.
/// Configuration errors surface before the sink sees anything.
#[tracing::instrument(skip_all)]
pub fn run_pipeline_with_rng<R: Rng>(
    photo: &PixelBuffer,
    spec: &GlitchSpec,
    rng: &mut R,
    sink: &mut dyn StageSink,
) -> GlitchResult<PixelBuffer> {
    spec.validate()?;
    if photo.channels() != Channels::Rgb {
        return Err(GlitchError::validation("pipeline photo must be rgb"));
    }

    let mask = generate_mask_with_rng(photo.width(), photo.height(), spec, rng, sink)?;

    let out = if spec.strict_dimensions {
        composite_exact(photo, &mask)?
    } else {
        composite(photo, &mask)?
    };
    sink.stage(Stage::Composite, &out)?;

    Ok(out)
}
