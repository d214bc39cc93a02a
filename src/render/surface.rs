use std::ops::{Deref, DerefMut};

use crate::assets::decode::SourceImage;
use crate::foundation::core::{Affine, Region};
use crate::foundation::error::{GlimmerError, GlimmerResult};
use crate::foundation::math::{PremulRgba8, over, unpremultiply_rgba8_in_place};

/// A captured frame as straight-alpha RGBA8 pixels.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FrameRGBA {
    /// Frame width in pixels.
    pub width: u32,
    /// Frame height in pixels.
    pub height: u32,
    /// RGBA8 bytes, tightly packed, row-major, straight alpha.
    pub data: Vec<u8>,
}

/// Mutable drawing surface the effect passes paint into.
///
/// Pixels are premultiplied RGBA8. The surface carries a current transform used by transformed
/// draws (sparkle sprites); it is changed through [`Surface::push_transform`] /
/// [`Surface::pop_transform`] or the scoped [`Surface::scoped`] / [`Surface::with_transform`].
pub struct Surface {
    pixmap: vello_cpu::Pixmap,
    transform: Affine,
    saved: Vec<Affine>,
}

impl std::fmt::Debug for Surface {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Surface")
            .field("width", &self.width())
            .field("height", &self.height())
            .field("transform", &self.transform)
            .field("depth", &self.saved.len())
            .finish()
    }
}

impl Surface {
    /// Allocate a transparent `width x height` surface.
    ///
    /// Fails with [`GlimmerError::Setup`] when a side is zero or does not fit the rasterizer.
    pub fn new(width: u32, height: u32) -> GlimmerResult<Self> {
        if width == 0 || height == 0 {
            return Err(GlimmerError::setup(format!(
                "surface must be non-empty, got {width}x{height}"
            )));
        }
        let w: u16 = width.try_into().map_err(|_| {
            GlimmerError::setup(format!("surface width {width} exceeds {}", u16::MAX))
        })?;
        let h: u16 = height.try_into().map_err(|_| {
            GlimmerError::setup(format!("surface height {height} exceeds {}", u16::MAX))
        })?;
        Ok(Self {
            pixmap: vello_cpu::Pixmap::new(w, h),
            transform: Affine::IDENTITY,
            saved: Vec::new(),
        })
    }

    /// Width in pixels.
    pub fn width(&self) -> u32 {
        u32::from(self.pixmap.width())
    }

    /// Height in pixels.
    pub fn height(&self) -> u32 {
        u32::from(self.pixmap.height())
    }

    /// Region covering the whole surface.
    pub fn extent(&self) -> Region {
        Region::full(self.width(), self.height())
    }

    /// Premultiplied RGBA8 bytes, row-major.
    pub fn premul_bytes(&self) -> &[u8] {
        self.pixmap.data_as_u8_slice()
    }

    /// Premultiplied pixel at `(x, y)`, or `None` outside the surface.
    pub fn pixel(&self, x: u32, y: u32) -> Option<PremulRgba8> {
        let i = self.index_of(x, y)?;
        let d = self.pixmap.data_as_u8_slice();
        Some([d[i], d[i + 1], d[i + 2], d[i + 3]])
    }

    /// Fill every pixel with transparent black.
    pub fn clear(&mut self) {
        self.pixmap.data_as_u8_slice_mut().fill(0);
    }

    /// Replace the contents with `source`, origin-aligned at native resolution.
    ///
    /// Pixels outside the source (when sizes differ) are left transparent.
    pub fn draw_source(&mut self, source: &SourceImage) {
        let (sw, sh) = (source.width() as usize, source.height() as usize);
        let dw = self.width() as usize;
        let cols = sw.min(dw);
        let rows = sh.min(self.height() as usize);
        let src = source.premul_bytes();
        let dst = self.pixmap.data_as_u8_slice_mut();
        if sw == dw && rows == sh && rows * dw * 4 == dst.len() {
            dst.copy_from_slice(src);
            return;
        }
        dst.fill(0);
        for row in 0..rows {
            let s = row * sw * 4;
            let d = row * dw * 4;
            dst[d..d + cols * 4].copy_from_slice(&src[s..s + cols * 4]);
        }
    }

    /// Source-over a premultiplied color onto pixel `(x, y)` with an opacity multiplier.
    ///
    /// Returns `false` (and writes nothing) outside the surface.
    pub fn blend_pixel(&mut self, x: u32, y: u32, src: PremulRgba8, opacity: f32) -> bool {
        let Some(i) = self.index_of(x, y) else {
            return false;
        };
        let d = &mut self.pixmap.data_as_u8_slice_mut()[i..i + 4];
        let out = over([d[0], d[1], d[2], d[3]], src, opacity);
        d.copy_from_slice(&out);
        true
    }

    /// Source-over a same-sized premultiplied pixmap onto the surface.
    pub(crate) fn composite_over(&mut self, layer: &vello_cpu::Pixmap) -> GlimmerResult<()> {
        let dst = self.pixmap.data_as_u8_slice_mut();
        let src = layer.data_as_u8_slice();
        if dst.len() != src.len() {
            return Err(GlimmerError::render(
                "composite_over expects equal-sized surfaces",
            ));
        }
        for (d, s) in dst.chunks_exact_mut(4).zip(src.chunks_exact(4)) {
            if s[3] == 0 {
                continue;
            }
            let out = over([d[0], d[1], d[2], d[3]], [s[0], s[1], s[2], s[3]], 1.0);
            d.copy_from_slice(&out);
        }
        Ok(())
    }

    /// Snapshot the surface as straight-alpha RGBA8.
    ///
    /// Pixels are stored premultiplied, so translucent pixels come back with the color rounding
    /// of a premultiply/unpremultiply round trip, even where no effect touched them. Opaque and
    /// fully transparent pixels are exact.
    pub fn to_frame(&self) -> FrameRGBA {
        let mut data = self.pixmap.data_as_u8_slice().to_vec();
        unpremultiply_rgba8_in_place(&mut data);
        FrameRGBA {
            width: self.width(),
            height: self.height(),
            data,
        }
    }

    /// Current transform applied to transformed draws.
    pub fn transform(&self) -> Affine {
        self.transform
    }

    /// Replace the current transform without touching the saved stack.
    pub fn set_transform(&mut self, transform: Affine) {
        self.transform = transform;
    }

    /// Number of transforms currently saved by [`Surface::push_transform`].
    pub fn depth(&self) -> usize {
        self.saved.len()
    }

    /// Save the current transform and post-multiply it by `m`.
    pub fn push_transform(&mut self, m: Affine) {
        self.saved.push(self.transform);
        self.transform = self.transform * m;
    }

    /// Restore the transform saved by the matching [`Surface::push_transform`].
    pub fn pop_transform(&mut self) -> GlimmerResult<()> {
        self.transform = self
            .saved
            .pop()
            .ok_or_else(|| GlimmerError::render("pop_transform without matching push"))?;
        Ok(())
    }

    /// Push `m` and return a guard that restores the previous transform when dropped.
    pub fn scoped(&mut self, m: Affine) -> TransformScope<'_> {
        self.push_transform(m);
        let depth = self.saved.len();
        TransformScope {
            surface: self,
            depth,
        }
    }

    /// Run `f` with `m` applied; the previous transform is restored whether `f` succeeds or not.
    pub fn with_transform<R>(
        &mut self,
        m: Affine,
        f: impl FnOnce(&mut Surface) -> GlimmerResult<R>,
    ) -> GlimmerResult<R> {
        let mut scope = self.scoped(m);
        f(&mut *scope)
    }

    pub(crate) fn pixmap(&self) -> &vello_cpu::Pixmap {
        &self.pixmap
    }

    fn index_of(&self, x: u32, y: u32) -> Option<usize> {
        if x >= self.width() || y >= self.height() {
            return None;
        }
        Some(((y as usize) * (self.width() as usize) + (x as usize)) * 4)
    }
}

/// Guard returned by [`Surface::scoped`].
///
/// Dropping it unwinds the transform stack back to the state before the matching push, including
/// any pushes made through the guard that were not popped.
pub struct TransformScope<'a> {
    surface: &'a mut Surface,
    depth: usize,
}

impl Deref for TransformScope<'_> {
    type Target = Surface;

    fn deref(&self) -> &Surface {
        self.surface
    }
}

impl DerefMut for TransformScope<'_> {
    fn deref_mut(&mut self) -> &mut Surface {
        self.surface
    }
}

impl Drop for TransformScope<'_> {
    fn drop(&mut self) {
        while self.surface.saved.len() >= self.depth {
            match self.surface.saved.pop() {
                Some(t) => self.surface.transform = t,
                None => break,
            }
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/render/surface.rs"]
mod tests;
