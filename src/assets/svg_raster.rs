use crate::foundation::core::Affine;
use crate::foundation::error::{GlimmerError, GlimmerResult};

const MAX_DIM: u32 = 16_384;

/// Compute the raster size for an SVG given the transform it will be drawn with.
///
/// The returned `(width, height, transform_adjust)` are used as:
///
/// - rasterize the SVG into a pixmap of `(width, height)`
/// - draw the resulting image with `transform_adjust` (not the original transform)
///
/// Rotation does not change the raster size; only the scale part of `transform` does. Each side is
/// capped at `max_dim` (and never above 16384); beyond that the raster is stretched by
/// `transform_adjust` instead of growing.
pub(crate) fn svg_raster_params(
    tree: &usvg::Tree,
    transform: Affine,
    max_dim: u32,
) -> GlimmerResult<(u32, u32, Affine)> {
    fn to_units(v: f32) -> GlimmerResult<f64> {
        if !v.is_finite() || v <= 0.0 {
            return Err(GlimmerError::render("svg has invalid width/height"));
        }
        Ok(f64::from(v))
    }

    let size = tree.size();
    let svg_w = to_units(size.width())?;
    let svg_h = to_units(size.height())?;

    let [a, b, c, d, _e, _f] = transform.as_coeffs();
    let sx = (a * a + b * b).sqrt().max(1e-6);
    let sy = (c * c + d * d).sqrt().max(1e-6);

    let limit = f64::from(max_dim.clamp(1, MAX_DIM));
    let w = (svg_w * sx).ceil().clamp(1.0, limit) as u32;
    let h = (svg_h * sy).ceil().clamp(1.0, limit) as u32;

    // Pixel-space coordinates of the raster map back into SVG units before `transform`.
    let adjust = Affine::scale_non_uniform(svg_w / f64::from(w), svg_h / f64::from(h));
    Ok((w, h, transform * adjust))
}

/// Rasterize `tree` stretched to `width x height`, returning premultiplied RGBA8.
pub(crate) fn rasterize_svg_to_premul_rgba8(
    tree: &usvg::Tree,
    width: u32,
    height: u32,
) -> GlimmerResult<Vec<u8>> {
    let mut pixmap = resvg::tiny_skia::Pixmap::new(width, height)
        .ok_or_else(|| GlimmerError::render("failed to allocate svg pixmap"))?;

    let sx = (width as f32) / tree.size().width();
    let sy = (height as f32) / tree.size().height();
    let xform = resvg::tiny_skia::Transform::from_scale(sx, sy);

    resvg::render(tree, xform, &mut pixmap.as_mut());
    Ok(pixmap.data().to_vec())
}

#[cfg(test)]
#[path = "../../tests/unit/assets/svg_raster.rs"]
mod tests;
