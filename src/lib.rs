//! Procedural glitch-mask generation and photo compositing.
//!
//! A mask of randomly placed color bars is synthesized on black, corrupted by
//! a vertical streak pass and a horizontal slice pass, then composited over a
//! photograph wherever the mask is not pure black. All stages are
//! deterministic for a given seed and run single-threaded on the CPU.

#![forbid(unsafe_code)]

pub mod bars;
pub mod composite;
pub mod core;
pub mod error;
pub mod io;
pub mod model;
pub mod pipeline;
pub mod slice;
pub mod streak;

pub use bars::generate_bar_field;
pub use composite::{composite, composite_exact};
pub use self::core::{Channels, PixelBuffer, Rgb8};
pub use error::{GlitchError, GlitchResult};
pub use io::{StageWriter, load_image, save_image};
pub use model::GlitchSpec;
pub use pipeline::{
    CollectStages, DiscardStages, Stage, StageSink, generate_mask, generate_mask_with_rng,
    generate_mask_with_sink, run_pipeline, run_pipeline_with_rng, run_pipeline_with_sink,
};
pub use slice::apply_horizontal_slices;
pub use streak::apply_vertical_streaks;
