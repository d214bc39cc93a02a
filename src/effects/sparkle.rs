use std::f64::consts::TAU;
use std::sync::Arc;

use rand::Rng;

use crate::assets::sprites::{SPRITE_COUNT, SpriteStore};
use crate::effects::params::{SparkleAnchor, SparkleParams};
use crate::foundation::core::{Affine, Region};
use crate::foundation::error::GlimmerResult;
use crate::render::cpu::SpriteLayer;
use crate::render::surface::Surface;

/// Counters for one sparkle pass.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct SparkleStats {
    /// Coordinates sampled.
    pub visited: u64,
    /// Coordinates that passed the density test.
    pub accepted: u64,
    /// Sprites actually drawn. Accepted sparkles with a non-positive or non-finite size, or a
    /// non-positive alpha, draw nothing.
    pub stamped: u64,
}

/// Stamps randomly sized, rotated, translucent sparkle glyphs onto a surface.
///
/// Holds the glyph store and a reusable sprite layer, so one compositor should be kept per worker
/// and reused across frames.
pub struct SparkleCompositor {
    store: Arc<SpriteStore>,
    layer: SpriteLayer,
}

impl std::fmt::Debug for SparkleCompositor {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SparkleCompositor")
            .field("sprites_loaded", &self.store.is_loaded())
            .finish_non_exhaustive()
    }
}

impl Default for SparkleCompositor {
    fn default() -> Self {
        Self::new(SpriteStore::shared())
    }
}

impl SparkleCompositor {
    /// Compositor drawing glyphs from `store`.
    pub fn new(store: Arc<SpriteStore>) -> Self {
        Self {
            store,
            layer: SpriteLayer::new(),
        }
    }

    /// Glyph store this compositor draws from.
    pub fn store(&self) -> &Arc<SpriteStore> {
        &self.store
    }

    /// Stamp sparkles over `region` of `surface`.
    ///
    /// Each coordinate draws `u` and is accepted when `u < params.density`. An accepted coordinate
    /// then draws, in order, its size, alpha, glyph index, and rotation in `[0, 2pi)`. The glyph is
    /// stretched to `size x size` and drawn at that alpha, placed according to `params.anchor`.
    /// Sizes far larger than the surface are drawn from a raster no larger than the surface.
    ///
    /// The surface transform is identical before and after the call, including when an error is
    /// returned part way.
    pub fn composite<R: Rng + ?Sized>(
        &mut self,
        surface: &mut Surface,
        region: Region,
        params: &SparkleParams,
        rng: &mut R,
    ) -> GlimmerResult<SparkleStats> {
        let sheet = self.store.get_or_load()?;
        let region = region.clipped_to(surface.width(), surface.height());
        let mut stats = SparkleStats::default();
        self.layer.begin(surface)?;

        for x in region.x..region.right() {
            for y in region.y..region.bottom() {
                stats.visited += 1;
                if rng.random::<f64>() >= params.density {
                    continue;
                }
                stats.accepted += 1;

                let size = params.size.lerp(rng.random());
                let alpha = params.alpha.lerp(rng.random());
                let index =
                    ((rng.random::<f64>() * SPRITE_COUNT as f64) as usize).min(SPRITE_COUNT - 1);
                let rotation = rng.random::<f64>() * TAU;

                if !(size > 0.0 && size.is_finite() && alpha > 0.0) {
                    continue;
                }
                let Some(tree) = sheet.get(index) else {
                    continue;
                };

                let glyph = tree.size();
                let fit = Affine::scale_non_uniform(
                    size / f64::from(glyph.width()),
                    size / f64::from(glyph.height()),
                );
                let at = (f64::from(x), f64::from(y));
                let (outer, local) = match params.anchor {
                    SparkleAnchor::Corner => (Affine::rotate(rotation), Affine::translate(at) * fit),
                    SparkleAnchor::Center => (
                        Affine::translate(at) * Affine::rotate(rotation),
                        Affine::translate((-size / 2.0, -size / 2.0)) * fit,
                    ),
                };

                let layer = &mut self.layer;
                surface.with_transform(outer, |s| {
                    layer.draw_svg(index, tree, s.transform() * local, alpha as f32)
                })?;
                stats.stamped += 1;
            }
        }

        self.layer.finish(surface)?;
        tracing::trace!(
            visited = stats.visited,
            accepted = stats.accepted,
            stamped = stats.stamped,
            "sparkle pass"
        );
        Ok(stats)
    }
}

#[cfg(test)]
#[path = "../../tests/unit/effects/sparkle.rs"]
mod tests;
