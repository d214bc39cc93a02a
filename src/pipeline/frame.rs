use std::sync::Arc;

use rand::Rng;

use crate::assets::decode::SourceImage;
use crate::assets::sprites::SpriteStore;
use crate::effects::glitter::{GlitterStats, apply_glitter};
use crate::effects::params::EffectParams;
use crate::effects::sparkle::{SparkleCompositor, SparkleStats};
use crate::foundation::error::{GlimmerError, GlimmerResult};
use crate::render::surface::Surface;

/// Counters for one composed frame.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct FrameStats {
    /// Glitter pass counters.
    pub glitter: GlitterStats,
    /// Sparkle pass counters.
    pub sparkle: SparkleStats,
}

/// Produces one filtered frame: source copy, then glitter, then sparkles.
#[derive(Debug, Default)]
pub struct FrameCompositor {
    sparkle: SparkleCompositor,
}

impl FrameCompositor {
    /// Compositor stamping glyphs from `store`.
    pub fn new(store: Arc<SpriteStore>) -> Self {
        Self {
            sparkle: SparkleCompositor::new(store),
        }
    }

    /// Glyph store used by the sparkle pass.
    pub fn store(&self) -> &Arc<SpriteStore> {
        self.sparkle.store()
    }

    /// Compose one frame into `surface`.
    ///
    /// The surface is first overwritten with `source`, so repeated calls never compound. Both
    /// passes cover the full surface extent. `surface` must have the source's dimensions.
    pub fn compose<R: Rng + ?Sized>(
        &mut self,
        source: &SourceImage,
        surface: &mut Surface,
        params: &EffectParams,
        rng: &mut R,
    ) -> GlimmerResult<FrameStats> {
        if (surface.width(), surface.height()) != (source.width(), source.height()) {
            return Err(GlimmerError::setup(format!(
                "surface is {}x{} but source is {}x{}",
                surface.width(),
                surface.height(),
                source.width(),
                source.height()
            )));
        }

        surface.draw_source(source);
        let region = surface.extent();
        let glitter = apply_glitter(surface, region, &params.glitter, rng);
        let sparkle = self
            .sparkle
            .composite(surface, region, &params.sparkle, rng)?;
        Ok(FrameStats { glitter, sparkle })
    }
}

#[cfg(test)]
#[path = "../../tests/unit/pipeline/frame.rs"]
mod tests;
