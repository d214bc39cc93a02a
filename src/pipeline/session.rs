use std::sync::Arc;

use rand::SeedableRng;
use rand::rngs::StdRng;

use crate::assets::decode::SourceImage;
use crate::assets::sprites::SpriteStore;
use crate::effects::params::EffectParams;
use crate::encode::gif::{AnimationEncoder, EncodedAnimation, export_animation};
use crate::foundation::error::{GlimmerError, GlimmerResult};
use crate::pipeline::assemble::{FrameSequence, assemble_on};
use crate::pipeline::frame::FrameCompositor;
use crate::render::surface::{FrameRGBA, Surface};

/// Options for [`EffectSession`].
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct SessionOpts {
    /// Seed for the random stream. `None` seeds from OS entropy.
    pub seed: Option<u64>,
}

/// Owns everything one user session reuses between calls: the compositor, the drawing surface,
/// and the random stream.
///
/// A session has a single writer. Calls run to completion one at a time.
#[derive(Debug)]
pub struct EffectSession {
    compositor: FrameCompositor,
    surface: Option<Surface>,
    rng: StdRng,
}

impl EffectSession {
    /// Session drawing glyphs from the process-wide [`SpriteStore::shared`].
    pub fn new(opts: SessionOpts) -> Self {
        Self::with_store(opts, SpriteStore::shared())
    }

    /// Session drawing glyphs from `store`.
    pub fn with_store(opts: SessionOpts, store: Arc<SpriteStore>) -> Self {
        let rng = match opts.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_os_rng(),
        };
        Self {
            compositor: FrameCompositor::new(store),
            surface: None,
            rng,
        }
    }

    /// Render one preview frame.
    ///
    /// Every call starts from an untouched copy of `source`.
    pub fn preview(
        &mut self,
        source: &SourceImage,
        params: &EffectParams,
    ) -> GlimmerResult<FrameRGBA> {
        let surface = acquire_surface(&mut self.surface, source)?;
        self.compositor
            .compose(source, surface, params, &mut self.rng)?;
        Ok(surface.to_frame())
    }

    /// Build the fixed-length frame sequence for an animation.
    pub fn assemble(
        &mut self,
        source: &SourceImage,
        params: &EffectParams,
    ) -> GlimmerResult<FrameSequence> {
        let surface = acquire_surface(&mut self.surface, source)?;
        assemble_on(&mut self.compositor, surface, source, params, &mut self.rng)
    }

    /// Assemble frames and hand them to `encoder` once.
    pub fn render_animation<E: AnimationEncoder + ?Sized>(
        &mut self,
        source: &SourceImage,
        params: &EffectParams,
        encoder: &mut E,
    ) -> GlimmerResult<EncodedAnimation> {
        let sequence = self.assemble(source, params)?;
        export_animation(encoder, &sequence)
    }
}

fn acquire_surface<'a>(
    slot: &'a mut Option<Surface>,
    source: &SourceImage,
) -> GlimmerResult<&'a mut Surface> {
    let fits = slot
        .as_ref()
        .is_some_and(|s| (s.width(), s.height()) == (source.width(), source.height()));
    if !fits {
        *slot = Some(Surface::new(source.width(), source.height())?);
    }
    slot.as_mut()
        .ok_or_else(|| GlimmerError::setup("drawing surface unavailable"))
}

#[cfg(test)]
#[path = "../../tests/unit/pipeline/session.rs"]
mod tests;
