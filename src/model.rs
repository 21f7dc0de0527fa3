use crate::core::Rgb8;
use crate::error::{GlitchError, GlitchResult};

/// Tuning knobs for mask generation and compositing.
///
/// Every field has a default, so a JSON spec file may set any subset.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct GlitchSpec {
    /// Width of each bar in columns.
    pub bar_width: u32,
    /// Bar height as a fraction of the image height, in (0, 1].
    pub height_ratio: f64,
    /// Smallest gap between consecutive bars, in columns.
    pub min_spacing: u32,
    /// Largest gap between consecutive bars, in columns.
    pub max_spacing: u32,
    /// Colors bars are drawn in; picked uniformly per bar. Must be non-empty.
    pub palette: Vec<Rgb8>,
    /// Number of vertical streak displacement events.
    pub vertical_streaks: u32,
    /// Number of horizontal slice displacement events.
    pub horizontal_slices: u32,
    /// RNG seed; `None` draws from OS entropy.
    pub seed: Option<u64>,
    /// Error on photo/mask dimension mismatch instead of resampling the mask.
    pub strict_dimensions: bool,
}

impl Default for GlitchSpec {
    fn default() -> Self {
        Self {
            bar_width: 4,
            height_ratio: 0.6,
            min_spacing: 8,
            max_spacing: 32,
            palette: vec![Rgb8::new(255, 196, 112), Rgb8::new(221, 87, 70)],
            vertical_streaks: 300,
            horizontal_slices: 150,
            seed: None,
            strict_dimensions: false,
        }
    }
}

impl GlitchSpec {
    pub fn validate(&self) -> GlitchResult<()> {
        if self.bar_width == 0 {
            return Err(GlitchError::validation("bar_width must be > 0"));
        }
        if !self.height_ratio.is_finite() || self.height_ratio <= 0.0 || self.height_ratio > 1.0 {
            return Err(GlitchError::validation("height_ratio must be in (0, 1]"));
        }
        if self.max_spacing < self.min_spacing {
            return Err(GlitchError::validation("max_spacing must be >= min_spacing"));
        }
        if self.palette.is_empty() {
            return Err(GlitchError::validation(
                "palette must contain at least one color",
            ));
        }
        Ok(())
    }
}
