use rand::Rng;

use crate::assets::decode::SourceImage;
use crate::effects::params::EffectParams;
use crate::encode::still::EncodedFrame;
use crate::foundation::error::{GlimmerError, GlimmerResult};
use crate::pipeline::frame::FrameCompositor;
use crate::render::surface::Surface;

/// Frames per animation. Fixed.
pub const FRAME_COUNT: usize = 5;

/// Ordered still frames ready for an [`crate::AnimationEncoder`].
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FrameSequence {
    /// Frame width in pixels.
    pub width: u32,
    /// Frame height in pixels.
    pub height: u32,
    /// Frames in display order.
    pub frames: Vec<EncodedFrame>,
}

impl FrameSequence {
    /// Number of frames.
    pub fn len(&self) -> usize {
        self.frames.len()
    }

    /// Return `true` when there are no frames.
    pub fn is_empty(&self) -> bool {
        self.frames.is_empty()
    }
}

/// Compose [`FRAME_COUNT`] independent frames of `source` on a freshly allocated surface.
///
/// Surface allocation failure is reported as [`GlimmerError::Setup`] before any frame is drawn.
pub fn assemble_frames<R: Rng + ?Sized>(
    compositor: &mut FrameCompositor,
    source: &SourceImage,
    params: &EffectParams,
    rng: &mut R,
) -> GlimmerResult<FrameSequence> {
    let mut surface = Surface::new(source.width(), source.height())?;
    assemble_on(compositor, &mut surface, source, params, rng)
}

/// Like [`assemble_frames`], reusing `surface` for every pass.
///
/// Frames are composed strictly one after another. Any failed frame fails the whole sequence.
#[tracing::instrument(
    level = "debug",
    skip_all,
    fields(width = source.width(), height = source.height())
)]
pub fn assemble_on<R: Rng + ?Sized>(
    compositor: &mut FrameCompositor,
    surface: &mut Surface,
    source: &SourceImage,
    params: &EffectParams,
    rng: &mut R,
) -> GlimmerResult<FrameSequence> {
    if (surface.width(), surface.height()) != (source.width(), source.height()) {
        return Err(GlimmerError::setup(format!(
            "surface is {}x{} but source is {}x{}",
            surface.width(),
            surface.height(),
            source.width(),
            source.height()
        )));
    }

    let mut frames = Vec::with_capacity(FRAME_COUNT);
    for idx in 0..FRAME_COUNT {
        let stats = compositor.compose(source, surface, params, rng)?;
        tracing::debug!(
            frame = idx,
            painted = stats.glitter.painted,
            sparkles = stats.sparkle.stamped,
            "composed frame"
        );
        frames.push(EncodedFrame::from_frame(&surface.to_frame())?);
    }

    Ok(FrameSequence {
        width: source.width(),
        height: source.height(),
        frames,
    })
}

#[cfg(test)]
#[path = "../../tests/unit/pipeline/assemble.rs"]
mod tests;
