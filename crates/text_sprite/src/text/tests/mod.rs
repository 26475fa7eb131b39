//! Scenario tests for text sprites


use crate::text::font_cache::{EmbeddedFontCache, FontCache, FontDescriptor, FontHandle, FontResult};

/// Glyph cache that counts how often it is asked to resolve a font
pub(super) struct CountingCache {
    inner: EmbeddedFontCache,
    pub resolves: usize,
}

impl CountingCache {
    /// Embedded font plus an "arcade" font with the same proportions
    pub fn new() -> Self {
        let mut inner = EmbeddedFontCache::new();
        inner.register("arcade", FontDescriptor::embedded());
        Self { inner, resolves: 0 }
    }
}

impl FontCache for CountingCache {
    fn resolve_font(&mut self, id: &str, pixel_size: u32) -> FontResult<FontHandle> {
        self.resolves += 1;
        self.inner.resolve_font(id, pixel_size)
    }
}
