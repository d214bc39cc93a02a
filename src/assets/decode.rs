use std::sync::Arc;

use anyhow::Context;

use crate::foundation::error::{GlimmerError, GlimmerResult};
use crate::foundation::math::premultiply_rgba8_in_place;

/// Decoded source bitmap in premultiplied RGBA8 form.
///
/// Cloning is cheap; pixel data is shared and never mutated after decoding.
#[derive(Clone, Debug)]
pub struct SourceImage {
    width: u32,
    height: u32,
    rgba8_premul: Arc<Vec<u8>>,
}

impl SourceImage {
    /// Build from straight-alpha RGBA8 bytes, row-major and tightly packed.
    pub fn from_rgba8(width: u32, height: u32, mut rgba: Vec<u8>) -> GlimmerResult<Self> {
        let expected = (width as usize)
            .saturating_mul(height as usize)
            .saturating_mul(4);
        if rgba.len() != expected {
            return Err(GlimmerError::asset(format!(
                "rgba byte len mismatch: got {}, expected {expected} for {width}x{height}",
                rgba.len()
            )));
        }
        premultiply_rgba8_in_place(&mut rgba);
        Ok(Self {
            width,
            height,
            rgba8_premul: Arc::new(rgba),
        })
    }

    /// Width in pixels.
    pub fn width(&self) -> u32 {
        self.width
    }

    /// Height in pixels.
    pub fn height(&self) -> u32 {
        self.height
    }

    /// Pixel bytes in row-major premultiplied RGBA8.
    pub fn premul_bytes(&self) -> &[u8] {
        &self.rgba8_premul
    }
}

/// Decode encoded image bytes (PNG, JPEG, GIF, ...) and convert to premultiplied RGBA8.
pub fn decode_image(bytes: &[u8]) -> GlimmerResult<SourceImage> {
    let dyn_img = image::load_from_memory(bytes).context("decode image from memory")?;
    let rgba = dyn_img.to_rgba8();
    let (width, height) = rgba.dimensions();
    SourceImage::from_rgba8(width, height, rgba.into_raw())
}

/// Read and decode an image file from disk.
pub fn load_image(path: impl AsRef<std::path::Path>) -> GlimmerResult<SourceImage> {
    let path = path.as_ref();
    let bytes = std::fs::read(path)
        .with_context(|| format!("read image '{}'", path.display()))?;
    decode_image(&bytes)
}

/// Parse SVG bytes into a `usvg` tree.
pub(crate) fn parse_svg(bytes: &[u8]) -> GlimmerResult<Arc<usvg::Tree>> {
    let opts = usvg::Options::default();
    let tree = usvg::Tree::from_data(bytes, &opts)
        .map_err(|e| GlimmerError::asset(format!("parse svg tree: {e}")))?;
    Ok(Arc::new(tree))
}

#[cfg(test)]
#[path = "../../tests/unit/assets/decode.rs"]
mod tests;
