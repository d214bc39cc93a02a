use anyhow::Context;
use image::ImageEncoder;

use crate::foundation::error::{GlimmerError, GlimmerResult};
use crate::render::surface::FrameRGBA;

/// One still frame, encoded as PNG.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct EncodedFrame {
    width: u32,
    height: u32,
    bytes: Vec<u8>,
}

impl EncodedFrame {
    /// PNG-encode a captured frame.
    pub fn from_frame(frame: &FrameRGBA) -> GlimmerResult<Self> {
        let expected = (frame.width as usize)
            .saturating_mul(frame.height as usize)
            .saturating_mul(4);
        if frame.data.len() != expected {
            return Err(GlimmerError::render(format!(
                "frame buffer has {} bytes, expected {expected} for {}x{}",
                frame.data.len(),
                frame.width,
                frame.height
            )));
        }

        let mut bytes = Vec::new();
        image::codecs::png::PngEncoder::new(&mut bytes)
            .write_image(
                &frame.data,
                frame.width,
                frame.height,
                image::ExtendedColorType::Rgba8,
            )
            .context("encode png frame")?;
        Ok(Self {
            width: frame.width,
            height: frame.height,
            bytes,
        })
    }

    /// Frame width in pixels.
    pub fn width(&self) -> u32 {
        self.width
    }

    /// Frame height in pixels.
    pub fn height(&self) -> u32 {
        self.height
    }

    /// Borrow the PNG payload.
    pub fn bytes(&self) -> &[u8] {
        &self.bytes
    }

    /// Take the PNG payload.
    pub fn into_bytes(self) -> Vec<u8> {
        self.bytes
    }

    /// Decode the payload back to straight-alpha RGBA8.
    pub fn decode(&self) -> GlimmerResult<FrameRGBA> {
        let rgba = self.decode_rgba()?;
        let (width, height) = rgba.dimensions();
        Ok(FrameRGBA {
            width,
            height,
            data: rgba.into_raw(),
        })
    }

    pub(crate) fn decode_rgba(&self) -> GlimmerResult<image::RgbaImage> {
        let img = image::load_from_memory_with_format(&self.bytes, image::ImageFormat::Png)
            .context("decode png frame")?;
        Ok(img.into_rgba8())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/encode/still.rs"]
mod tests;
