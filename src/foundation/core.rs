pub use kurbo::{Affine, Vec2};

/// Inclusive `[min, max]` parameter range.
///
/// Ranges are taken verbatim: `min > max` is not rejected and simply yields degenerate samples.
/// Deserializes from either `[min, max]` or `{ "min": .., "max": .. }`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize)]
pub struct Span<T> {
    /// Lower bound.
    pub min: T,
    /// Upper bound.
    pub max: T,
}

impl<T> Span<T> {
    /// Create a range from its bounds.
    pub const fn new(min: T, max: T) -> Self {
        Self { min, max }
    }
}

impl<'de, T: serde::Deserialize<'de>> serde::Deserialize<'de> for Span<T> {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        #[derive(serde::Deserialize)]
        #[serde(untagged)]
        enum Repr<T> {
            Arr([T; 2]),
            Obj { min: T, max: T },
        }

        match Repr::deserialize(deserializer)? {
            Repr::Arr([min, max]) => Ok(Self { min, max }),
            Repr::Obj { min, max } => Ok(Self { min, max }),
        }
    }
}

impl Span<f64> {
    /// Map `t` in `[0, 1)` onto the range: `min + t * (max - min)`.
    pub fn lerp(self, t: f64) -> f64 {
        t * (self.max - self.min) + self.min
    }
}

impl Span<u8> {
    /// Map `t` in `[0, 1)` onto the integers `min..=max`.
    pub fn pick(self, t: f64) -> u8 {
        let lo = f64::from(self.min);
        let count = f64::from(self.max) - lo + 1.0;
        (lo + (t * count).floor()).clamp(0.0, 255.0) as u8
    }
}

/// Pixel rectangle an effect is applied over.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct Region {
    /// Left edge in pixels.
    pub x: u32,
    /// Top edge in pixels.
    pub y: u32,
    /// Width in pixels.
    pub width: u32,
    /// Height in pixels.
    pub height: u32,
}

impl Region {
    /// Region covering a whole `width x height` surface.
    pub fn full(width: u32, height: u32) -> Self {
        Self {
            x: 0,
            y: 0,
            width,
            height,
        }
    }

    /// Intersect with a `width x height` surface anchored at the origin.
    pub fn clipped_to(self, width: u32, height: u32) -> Self {
        let x = self.x.min(width);
        let y = self.y.min(height);
        Self {
            x,
            y,
            width: self.width.min(width - x),
            height: self.height.min(height - y),
        }
    }

    /// Number of pixel coordinates in the region.
    pub fn area(self) -> u64 {
        u64::from(self.width) * u64::from(self.height)
    }

    /// Return `true` when the region has no pixels.
    pub fn is_empty(self) -> bool {
        self.width == 0 || self.height == 0
    }

    /// Exclusive right edge.
    pub fn right(self) -> u32 {
        self.x.saturating_add(self.width)
    }

    /// Exclusive bottom edge.
    pub fn bottom(self) -> u32 {
        self.y.saturating_add(self.height)
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/core.rs"]
mod tests;
