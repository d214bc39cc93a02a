//! Effect parameter sets.
//!
//! Parameters are plain values. The generators never clamp or validate them: out-of-domain
//! values (negative densities, inverted ranges, ...) are used verbatim and produce correspondingly
//! degenerate output. Validate at the input boundary (see [`ui_range`]) when that matters.

use serde::{Deserialize, Serialize};

use crate::foundation::core::Span;

/// How glitter speckles pick their color.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NoiseTone {
    /// One lightness draw reused for red, green, and blue (neutral gray).
    #[default]
    Neutral,
    /// Independent lightness draws per channel (colored speckle).
    Colored,
}

/// Where a sparkle sprite sits relative to its sampled coordinate.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SparkleAnchor {
    /// Rotate about the surface origin and place the sprite's top-left corner at the coordinate.
    Corner,
    /// Rotate about the coordinate and center the sprite on it.
    #[default]
    Center,
}

/// Glitter (per-pixel speckle) parameters.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GlitterParams {
    /// Probability in `[0, 1]` that a pixel is painted.
    pub density: f64,
    /// Inclusive gray-level range speckles are drawn from.
    pub lightness: Span<u8>,
    /// Alpha in `[0, 1]` each speckle is blended with.
    pub opacity: f32,
    /// Neutral or colored speckle.
    pub tone: NoiseTone,
}

impl Default for GlitterParams {
    fn default() -> Self {
        Self {
            density: 0.3,
            lightness: Span::new(105, 185),
            opacity: 0.3,
            tone: NoiseTone::Neutral,
        }
    }
}

/// Sparkle (sprite stamp) parameters.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SparkleParams {
    /// Probability per pixel coordinate that a sparkle is stamped. Typically `<= 0.01`.
    pub density: f64,
    /// Sprite edge length range in pixels.
    pub size: Span<f64>,
    /// Sprite alpha range in `[0, 1]`.
    pub alpha: Span<f64>,
    /// Placement of the sprite relative to its coordinate.
    pub anchor: SparkleAnchor,
}

impl Default for SparkleParams {
    fn default() -> Self {
        Self {
            density: 0.001,
            size: Span::new(10.0, 70.0),
            alpha: Span::new(0.3, 0.9),
            anchor: SparkleAnchor::Center,
        }
    }
}

/// Both effect parameter sets for one generation pass.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EffectParams {
    /// Glitter parameters.
    pub glitter: GlitterParams,
    /// Sparkle parameters.
    pub sparkle: SparkleParams,
}

/// Recommended input ranges for interactive controls.
///
/// These are presentation hints for callers; nothing in the pipeline enforces them.
pub mod ui_range {
    use crate::foundation::core::Span;

    /// Glitter density.
    pub const GLITTER_DENSITY: Span<f64> = Span::new(0.0, 1.0);
    /// Glitter lightness bounds.
    pub const GLITTER_LIGHTNESS: Span<u8> = Span::new(0, 255);
    /// Glitter opacity.
    pub const GLITTER_OPACITY: Span<f64> = Span::new(0.0, 1.0);
    /// Sparkle density.
    pub const SPARKLE_DENSITY: Span<f64> = Span::new(0.0, 0.01);
    /// Sparkle size bounds in pixels.
    pub const SPARKLE_SIZE: Span<f64> = Span::new(0.0, 250.0);
    /// Sparkle alpha bounds.
    pub const SPARKLE_ALPHA: Span<f64> = Span::new(0.0, 1.0);
}

#[cfg(test)]
#[path = "../../tests/unit/effects/params.rs"]
mod tests;
