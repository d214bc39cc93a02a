use rand::Rng;

use crate::effects::params::{GlitterParams, NoiseTone};
use crate::foundation::core::Region;
use crate::render::surface::Surface;

/// Counters for one glitter pass.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct GlitterStats {
    /// Coordinates sampled.
    pub visited: u64,
    /// Pixels painted.
    pub painted: u64,
}

/// Paint random gray (or colored) speckle over `region` of `surface`.
///
/// Every coordinate draws one uniform sample `u` in `[0, 1)` and is skipped when
/// `u >= params.density`. Painted pixels take a lightness drawn uniformly from
/// `params.lightness` (inclusive), blended source-over at `params.opacity`.
///
/// Iteration is column-major. The order only determines which random numbers each coordinate
/// consumes.
pub fn apply_glitter<R: Rng + ?Sized>(
    surface: &mut Surface,
    region: Region,
    params: &GlitterParams,
    rng: &mut R,
) -> GlitterStats {
    let region = region.clipped_to(surface.width(), surface.height());
    let mut stats = GlitterStats::default();

    for x in region.x..region.right() {
        for y in region.y..region.bottom() {
            stats.visited += 1;
            if rng.random::<f64>() >= params.density {
                continue;
            }
            let rgb = match params.tone {
                NoiseTone::Neutral => {
                    let v = params.lightness.pick(rng.random());
                    [v, v, v]
                }
                NoiseTone::Colored => [
                    params.lightness.pick(rng.random()),
                    params.lightness.pick(rng.random()),
                    params.lightness.pick(rng.random()),
                ],
            };
            if surface.blend_pixel(x, y, [rgb[0], rgb[1], rgb[2], 255], params.opacity) {
                stats.painted += 1;
            }
        }
    }

    tracing::trace!(
        visited = stats.visited,
        painted = stats.painted,
        "glitter pass"
    );
    stats
}

#[cfg(test)]
#[path = "../../tests/unit/effects/glitter.rs"]
mod tests;
