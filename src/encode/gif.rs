use image::codecs::gif::{GifEncoder, Repeat};
use image::imageops::FilterType;
use serde::{Deserialize, Serialize};

use crate::encode::still::EncodedFrame;
use crate::foundation::error::{GlimmerError, GlimmerResult};
use crate::pipeline::assemble::FrameSequence;

/// Animated GIF output settings.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct GifOpts {
    /// Delay between frames in milliseconds.
    pub delay_ms: u32,
    /// Quantizer speed, `1` (best) to `30` (fastest).
    pub speed: u8,
    /// Loop forever.
    pub repeat: bool,
}

impl Default for GifOpts {
    fn default() -> Self {
        Self {
            delay_ms: 100,
            speed: 10,
            repeat: true,
        }
    }
}

/// A finished animation.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct EncodedAnimation {
    /// Encoded file bytes.
    pub bytes: Vec<u8>,
    /// Output width in pixels.
    pub width: u32,
    /// Output height in pixels.
    pub height: u32,
    /// Number of frames written.
    pub frame_count: usize,
}

/// Turns an ordered sequence of still frames into one animated artifact.
///
/// An `Err` means no artifact was produced.
pub trait AnimationEncoder {
    /// Encode `frames` in order at `width x height`.
    fn encode(
        &mut self,
        frames: &[EncodedFrame],
        width: u32,
        height: u32,
    ) -> GlimmerResult<EncodedAnimation>;
}

impl<F> AnimationEncoder for F
where
    F: FnMut(&[EncodedFrame], u32, u32) -> GlimmerResult<EncodedAnimation>,
{
    fn encode(
        &mut self,
        frames: &[EncodedFrame],
        width: u32,
        height: u32,
    ) -> GlimmerResult<EncodedAnimation> {
        self(frames, width, height)
    }
}

/// [`AnimationEncoder`] producing an animated GIF with `image`.
#[derive(Clone, Copy, Debug, Default)]
pub struct GifExporter {
    opts: GifOpts,
}

impl GifExporter {
    /// Exporter with the given settings.
    pub fn new(opts: GifOpts) -> Self {
        Self { opts }
    }

    /// Settings in use.
    pub fn opts(&self) -> GifOpts {
        self.opts
    }
}

impl AnimationEncoder for GifExporter {
    fn encode(
        &mut self,
        frames: &[EncodedFrame],
        width: u32,
        height: u32,
    ) -> GlimmerResult<EncodedAnimation> {
        if frames.is_empty() {
            return Err(GlimmerError::export("no frames to encode"));
        }
        if width == 0 || height == 0 || width > u32::from(u16::MAX) || height > u32::from(u16::MAX)
        {
            return Err(GlimmerError::export(format!(
                "invalid gif size {width}x{height}"
            )));
        }

        let delay = image::Delay::from_numer_denom_ms(self.opts.delay_ms, 1);
        let speed = i32::from(self.opts.speed.clamp(1, 30));
        let mut bytes = Vec::new();
        {
            let mut encoder = GifEncoder::new_with_speed(&mut bytes, speed);
            if self.opts.repeat {
                encoder
                    .set_repeat(Repeat::Infinite)
                    .map_err(|e| GlimmerError::export(format!("set gif repeat: {e}")))?;
            }
            for (i, frame) in frames.iter().enumerate() {
                let mut rgba = frame.decode_rgba().map_err(|e| {
                    GlimmerError::export(format!("decode frame {i}: {e}"))
                })?;
                if rgba.dimensions() != (width, height) {
                    rgba = image::imageops::resize(&rgba, width, height, FilterType::Triangle);
                }
                encoder
                    .encode_frame(image::Frame::from_parts(rgba, 0, 0, delay))
                    .map_err(|e| GlimmerError::export(format!("encode gif frame {i}: {e}")))?;
            }
        }

        tracing::debug!(
            frames = frames.len(),
            width,
            height,
            bytes = bytes.len(),
            "encoded gif"
        );
        Ok(EncodedAnimation {
            bytes,
            width,
            height,
            frame_count: frames.len(),
        })
    }
}

/// Hand a full frame sequence to `encoder` exactly once.
///
/// The encoder's error is returned unchanged. Nothing is retried and the artifact is not
/// inspected.
#[tracing::instrument(level = "debug", skip_all, fields(frames = sequence.len()))]
pub fn export_animation<E: AnimationEncoder + ?Sized>(
    encoder: &mut E,
    sequence: &FrameSequence,
) -> GlimmerResult<EncodedAnimation> {
    let out = encoder.encode(&sequence.frames, sequence.width, sequence.height);
    match &out {
        Ok(anim) => tracing::info!(
            frames = anim.frame_count,
            bytes = anim.bytes.len(),
            "exported animation"
        ),
        Err(e) => tracing::warn!(error = %e, "animation export failed"),
    }
    out
}

#[cfg(test)]
#[path = "../../tests/unit/encode/gif.rs"]
mod tests;
