use std::borrow::Cow;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex, OnceLock};

use crate::assets::decode::parse_svg;
use crate::foundation::error::{GlimmerError, GlimmerResult};

/// Number of sparkle glyphs a sheet holds.
pub const SPRITE_COUNT: usize = 2;

const SPARKLE_1_SVG: &[u8] = include_bytes!("../../assets/sparkle1.svg");
const SPARKLE_2_SVG: &[u8] = include_bytes!("../../assets/sparkle2.svg");

/// The two parsed sparkle glyphs, shared read-only by every sparkle pass.
#[derive(Debug)]
pub struct SpriteSheet {
    sprites: [Arc<usvg::Tree>; SPRITE_COUNT],
}

impl SpriteSheet {
    /// Borrow glyph `index` (`0..SPRITE_COUNT`).
    pub fn get(&self, index: usize) -> Option<&usvg::Tree> {
        self.sprites.get(index).map(Arc::as_ref)
    }

    /// Number of glyphs; always [`SPRITE_COUNT`].
    pub fn len(&self) -> usize {
        self.sprites.len()
    }

    /// Always `false`; a sheet is never empty.
    pub fn is_empty(&self) -> bool {
        false
    }
}

/// Lazily loaded, memoized sprite glyphs.
///
/// The first [`SpriteStore::get_or_load`] parses both glyphs. Callers racing on a cold store block
/// on the same lock and all receive the sheet produced by the single load.
pub struct SpriteStore {
    sources: [Cow<'static, [u8]>; SPRITE_COUNT],
    sheet: Mutex<Option<Arc<SpriteSheet>>>,
    loads: AtomicUsize,
}

impl Default for SpriteStore {
    fn default() -> Self {
        Self::new()
    }
}

impl SpriteStore {
    /// Store backed by the built-in sparkle glyphs.
    pub fn new() -> Self {
        Self::from_sources([
            Cow::Borrowed(SPARKLE_1_SVG),
            Cow::Borrowed(SPARKLE_2_SVG),
        ])
    }

    /// Store backed by caller-supplied SVG documents.
    pub fn from_svg_sources(first: Vec<u8>, second: Vec<u8>) -> Self {
        Self::from_sources([Cow::Owned(first), Cow::Owned(second)])
    }

    fn from_sources(sources: [Cow<'static, [u8]>; SPRITE_COUNT]) -> Self {
        Self {
            sources,
            sheet: Mutex::new(None),
            loads: AtomicUsize::new(0),
        }
    }

    /// Process-wide store with the built-in glyphs.
    pub fn shared() -> Arc<SpriteStore> {
        static SHARED: OnceLock<Arc<SpriteStore>> = OnceLock::new();
        SHARED.get_or_init(|| Arc::new(SpriteStore::new())).clone()
    }

    /// Return the parsed sheet, parsing it on first use.
    ///
    /// A failed load is not cached; the next call tries again.
    pub fn get_or_load(&self) -> GlimmerResult<Arc<SpriteSheet>> {
        let mut slot = self
            .sheet
            .lock()
            .map_err(|_| GlimmerError::asset("sprite store lock poisoned"))?;
        if let Some(sheet) = slot.as_ref() {
            return Ok(sheet.clone());
        }

        self.loads.fetch_add(1, Ordering::Relaxed);
        let [first, second] = &self.sources;
        let sheet = Arc::new(SpriteSheet {
            sprites: [parse_svg(first)?, parse_svg(second)?],
        });
        tracing::debug!(glyphs = SPRITE_COUNT, "loaded sparkle sprites");
        *slot = Some(sheet.clone());
        Ok(sheet)
    }

    /// Return `true` once a sheet has been loaded.
    pub fn is_loaded(&self) -> bool {
        self.sheet.lock().map(|s| s.is_some()).unwrap_or(false)
    }

    /// Number of load attempts performed so far.
    pub fn load_count(&self) -> usize {
        self.loads.load(Ordering::Relaxed)
    }
}

#[cfg(test)]
#[path = "../../tests/unit/assets/sprites.rs"]
mod tests;
