use std::collections::HashMap;
use std::sync::Arc;

use crate::assets::svg_raster::{rasterize_svg_to_premul_rgba8, svg_raster_params};
use crate::foundation::core::Affine;
use crate::foundation::error::{GlimmerError, GlimmerResult};
use crate::render::surface::Surface;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
struct SpriteRasterKey {
    sprite: usize,
    w: u32,
    h: u32,
}

/// Upper bound on premultiplied bytes held by the sprite raster cache.
const RASTER_CACHE_BYTES: usize = 64 * 1024 * 1024;

/// Batches transformed sprite draws through `vello_cpu` and composites them onto a [`Surface`].
///
/// Draws are recorded between [`SpriteLayer::begin`] and [`SpriteLayer::finish`]. The render
/// context, scratch pixmap, and per-size sprite rasters are reused across passes. Sprite rasters
/// never exceed the surface's longer side, and the cache is dropped whenever it would grow past
/// `RASTER_CACHE_BYTES`.
#[derive(Default)]
pub(crate) struct SpriteLayer {
    ctx: Option<vello_cpu::RenderContext>,
    scratch: Option<vello_cpu::Pixmap>,
    raster_cache: HashMap<SpriteRasterKey, vello_cpu::Image>,
    cached_bytes: usize,
    max_raster: u32,
    pending: usize,
}

impl SpriteLayer {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    /// Prepare a context matching `surface` for a new batch of draws.
    pub(crate) fn begin(&mut self, surface: &Surface) -> GlimmerResult<()> {
        let (w, h) = dims_u16(surface)?;
        let mut ctx = match self.ctx.take() {
            Some(ctx) if ctx.width() == w && ctx.height() == h => ctx,
            _ => vello_cpu::RenderContext::new(w, h),
        };
        ctx.reset();
        self.ctx = Some(ctx);
        self.max_raster = u32::from(w.max(h));
        self.pending = 0;
        Ok(())
    }

    /// Record `tree` (glyph `sprite`) drawn with `transform` at `opacity`.
    ///
    /// `transform` maps SVG user units to surface pixels.
    pub(crate) fn draw_svg(
        &mut self,
        sprite: usize,
        tree: &usvg::Tree,
        transform: Affine,
        opacity: f32,
    ) -> GlimmerResult<()> {
        if self.ctx.is_none() {
            return Err(GlimmerError::render("sprite layer draw before begin"));
        }
        let (w, h, transform_adjust) = svg_raster_params(tree, transform, self.max_raster)?;
        let key = SpriteRasterKey { sprite, w, h };
        let img = match self.raster_cache.get(&key) {
            Some(img) => img.clone(),
            None => {
                let rgba = rasterize_svg_to_premul_rgba8(tree, w, h)?;
                let img = rgba_premul_to_image(&rgba, w, h)?;
                self.cache_raster(key, &img, rgba.len());
                img
            }
        };

        let ctx = self
            .ctx
            .as_mut()
            .ok_or_else(|| GlimmerError::render("sprite layer draw before begin"))?;
        ctx.set_blend_mode(vello_cpu::peniko::BlendMode::default());
        ctx.set_paint_transform(vello_cpu::kurbo::Affine::IDENTITY);
        ctx.set_transform(affine_to_cpu(transform_adjust));
        ctx.set_paint(img);
        let opacity = opacity.clamp(0.0, 1.0);
        if opacity < 1.0 {
            ctx.push_opacity_layer(opacity);
        }
        ctx.fill_rect(&vello_cpu::kurbo::Rect::new(0.0, 0.0, w as f64, h as f64));
        if opacity < 1.0 {
            ctx.pop_layer();
        }
        self.pending += 1;
        Ok(())
    }

    /// Rasterize the recorded draws and composite them over `surface`.
    ///
    /// Returns the number of draws flushed. Nothing is written when no draw was recorded.
    pub(crate) fn finish(&mut self, surface: &mut Surface) -> GlimmerResult<usize> {
        let drawn = std::mem::take(&mut self.pending);
        if drawn == 0 {
            return Ok(0);
        }
        let (w, h) = dims_u16(surface)?;
        let ctx = self
            .ctx
            .as_mut()
            .ok_or_else(|| GlimmerError::render("sprite layer finish before begin"))?;

        // `vello_cpu` renders into a fresh buffer, so draws land in a scratch pixmap first.
        let mut scratch = match self.scratch.take() {
            Some(p) if p.width() == w && p.height() == h => p,
            _ => vello_cpu::Pixmap::new(w, h),
        };
        scratch.data_as_u8_slice_mut().fill(0);
        ctx.flush();
        ctx.render_to_pixmap(&mut scratch);
        let out = surface.composite_over(&scratch);
        self.scratch = Some(scratch);
        out.map(|()| drawn)
    }

    fn cache_raster(&mut self, key: SpriteRasterKey, img: &vello_cpu::Image, bytes: usize) {
        if bytes > RASTER_CACHE_BYTES {
            return;
        }
        if self.cached_bytes + bytes > RASTER_CACHE_BYTES {
            tracing::debug!(
                entries = self.raster_cache.len(),
                bytes = self.cached_bytes,
                "sprite raster cache full, dropping"
            );
            self.raster_cache.clear();
            self.cached_bytes = 0;
        }
        self.raster_cache.insert(key, img.clone());
        self.cached_bytes += bytes;
    }

    #[cfg(test)]
    pub(crate) fn cached_rasters(&self) -> usize {
        self.raster_cache.len()
    }

    #[cfg(test)]
    pub(crate) fn cached_bytes(&self) -> usize {
        self.cached_bytes
    }
}

fn dims_u16(surface: &Surface) -> GlimmerResult<(u16, u16)> {
    let pm = surface.pixmap();
    if pm.width() == 0 || pm.height() == 0 {
        return Err(GlimmerError::render("surface has no pixels"));
    }
    Ok((pm.width(), pm.height()))
}

fn affine_to_cpu(a: Affine) -> vello_cpu::kurbo::Affine {
    vello_cpu::kurbo::Affine::new(a.as_coeffs())
}

fn pixmap_from_premul_bytes(
    bytes: &[u8],
    width: u32,
    height: u32,
) -> GlimmerResult<vello_cpu::Pixmap> {
    let w: u16 = width
        .try_into()
        .map_err(|_| GlimmerError::render("pixmap width exceeds u16"))?;
    let h: u16 = height
        .try_into()
        .map_err(|_| GlimmerError::render("pixmap height exceeds u16"))?;
    if bytes.len()
        != (width as usize)
            .saturating_mul(height as usize)
            .saturating_mul(4)
    {
        return Err(GlimmerError::render("pixmap byte len mismatch"));
    }
    let pixels = bytes
        .chunks_exact(4)
        .map(|px| vello_cpu::peniko::color::PremulRgba8::from_u8_array([px[0], px[1], px[2], px[3]]))
        .collect::<Vec<_>>();
    Ok(vello_cpu::Pixmap::from_parts_with_opacity(
        pixels, w, h, true,
    ))
}

fn rgba_premul_to_image(
    bytes_premul: &[u8],
    width: u32,
    height: u32,
) -> GlimmerResult<vello_cpu::Image> {
    let pixmap = pixmap_from_premul_bytes(bytes_premul, width, height)?;
    Ok(vello_cpu::Image {
        image: vello_cpu::ImageSource::Pixmap(Arc::new(pixmap)),
        sampler: vello_cpu::peniko::ImageSampler::default(),
    })
}

#[cfg(test)]
#[path = "../../tests/unit/render/cpu.rs"]
mod tests;
