//! Glyph cache adapter
//!
//! Turns a font identifier and pixel size into shared glyph metrics. The
//! cache owns the rasterized fonts; text sprites only hold a [`FontHandle`]
//! to the metrics they were laid out with.

use std::collections::HashMap;
use std::sync::Arc;

use crate::config::EMBEDDED_FONT_ID;
use crate::foundation::math::Vec2;

/// Result type for font operations
pub type FontResult<T> = Result<T, FontError>;

/// Errors that can occur during font operations
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum FontError {
    /// No font is registered under the identifier
    #[error("Font '{font}' is not available at {size}px")]
    NotFound {
        /// Requested font identifier
        font: String,
        /// Requested pixel size
        size: u32,
    },

    /// Pixel size cannot be rasterized
    #[error("Invalid font size: {0}px")]
    InvalidSize(u32),

    /// Failed to load font from data
    #[error("Failed to load font: {0}")]
    LoadError(String),
}

/// Metrics of a single glyph
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GlyphInfo {
    /// Glyph size in pixels
    pub size: Vec2,

    /// Horizontal advance for cursor positioning
    pub advance: f32,

    /// Offset of the glyph quad from the pen position
    pub bearing: Vec2,
}

impl GlyphInfo {
    /// Glyph with no bearing offset
    pub fn new(size: Vec2, advance: f32) -> Self {
        Self {
            size,
            advance,
            bearing: Vec2::zeros(),
        }
    }
}

/// Glyph metrics for one font at one pixel size
#[derive(Debug, Clone, PartialEq)]
pub struct BitmapFont {
    id: String,
    pixel_size: u32,
    line_height: f32,
    cap_height: f32,
    fallback_advance: f32,
    glyphs: HashMap<char, GlyphInfo>,
}

impl BitmapFont {
    /// Create a font with no glyphs
    ///
    /// `fallback_advance` is used for characters the font lacks.
    pub fn new(
        id: impl Into<String>,
        pixel_size: u32,
        line_height: f32,
        cap_height: f32,
        fallback_advance: f32,
    ) -> Self {
        Self {
            id: id.into(),
            pixel_size,
            line_height,
            cap_height,
            fallback_advance,
            glyphs: HashMap::new(),
        }
    }

    /// Add or replace a glyph
    pub fn insert_glyph(&mut self, ch: char, info: GlyphInfo) {
        self.glyphs.insert(ch, info);
    }

    /// Get glyph information for a character
    pub fn glyph(&self, ch: char) -> Option<&GlyphInfo> {
        self.glyphs.get(&ch)
    }

    /// Pen advance for a character, falling back for missing glyphs
    pub fn advance(&self, ch: char) -> f32 {
        self.glyphs.get(&ch).map_or(self.fallback_advance, |g| g.advance)
    }

    /// Font identifier
    pub fn id(&self) -> &str {
        &self.id
    }

    /// Pixel size the metrics were built for
    pub fn pixel_size(&self) -> u32 {
        self.pixel_size
    }

    /// Distance between baselines
    pub fn line_height(&self) -> f32 {
        self.line_height
    }

    /// Height of capital letters above the baseline
    pub fn cap_height(&self) -> f32 {
        self.cap_height
    }

    /// Number of glyphs with metrics
    pub fn glyph_count(&self) -> usize {
        self.glyphs.len()
    }
}

/// Shared handle to glyph metrics
///
/// Two handles to the same allocation mean the metrics were not rebuilt.
pub type FontHandle = Arc<BitmapFont>;

/// Source of glyph metrics
pub trait FontCache {
    /// Resolve a font identifier at a pixel size
    fn resolve_font(&mut self, id: &str, pixel_size: u32) -> FontResult<FontHandle>;
}

/// Proportions of a pixel font, relative to its pixel size
#[derive(Debug, Clone, PartialEq)]
pub struct FontDescriptor {
    /// Advance of regular glyphs
    pub advance: f32,
    /// Advance of narrow glyphs and the space
    pub narrow_advance: f32,
    /// Characters drawn with the narrow advance
    pub narrow_chars: String,
    /// Cap height
    pub cap_height: f32,
    /// Line height
    pub line_height: f32,
}

impl FontDescriptor {
    /// Proportions of the built-in 8px pixel font
    pub fn embedded() -> Self {
        Self {
            advance: 0.75,
            narrow_advance: 0.5,
            narrow_chars: " !'.,:;|il`".to_string(),
            cap_height: 0.625,
            line_height: 1.25,
        }
    }

    /// Build metrics for printable ASCII at `pixel_size`
    #[allow(clippy::cast_precision_loss)]
    pub fn build(&self, id: &str, pixel_size: u32) -> BitmapFont {
        const ASCII_START: u32 = 32;  // Space character
        const ASCII_END: u32 = 126;   // Tilde character

        let px = pixel_size as f32;
        let advance = (px * self.advance).round().max(1.0);
        let narrow = (px * self.narrow_advance).round().max(1.0);
        let cap_height = (px * self.cap_height).round().max(1.0);
        let line_height = (px * self.line_height).round().max(cap_height);

        let mut font = BitmapFont::new(id, pixel_size, line_height, cap_height, advance);

        for ch in (ASCII_START..=ASCII_END).filter_map(char::from_u32) {
            let glyph_advance = if self.narrow_chars.contains(ch) { narrow } else { advance };
            let size = if ch == ' ' {
                Vec2::zeros()
            } else {
                // One pixel of spacing on the right
                Vec2::new((glyph_advance - 1.0).max(1.0), cap_height)
            };
            font.insert_glyph(ch, GlyphInfo::new(size, glyph_advance));
        }

        font
    }
}

/// Font cache for pixel fonts described by proportions
///
/// The embedded pixel font is always registered. Built fonts are memoised
/// per (identifier, size), so resolving the same pair twice returns the
/// same handle.
#[derive(Debug)]
pub struct EmbeddedFontCache {
    descriptors: HashMap<String, FontDescriptor>,
    loaded: HashMap<(String, u32), FontHandle>,
}

impl EmbeddedFontCache {
    /// Create a cache holding only the embedded font
    pub fn new() -> Self {
        let mut descriptors = HashMap::new();
        descriptors.insert(EMBEDDED_FONT_ID.to_string(), FontDescriptor::embedded());
        Self {
            descriptors,
            loaded: HashMap::new(),
        }
    }

    /// Register a font under `id`, dropping metrics built for a previous one
    pub fn register(&mut self, id: impl Into<String>, descriptor: FontDescriptor) {
        let id = id.into();
        self.loaded.retain(|(loaded_id, _), _| *loaded_id != id);
        log::info!("Registered font '{}'", id);
        self.descriptors.insert(id, descriptor);
    }

    /// Number of (font, size) pairs built so far
    pub fn loaded_count(&self) -> usize {
        self.loaded.len()
    }
}

impl Default for EmbeddedFontCache {
    fn default() -> Self {
        Self::new()
    }
}

impl FontCache for EmbeddedFontCache {
    fn resolve_font(&mut self, id: &str, pixel_size: u32) -> FontResult<FontHandle> {
        if pixel_size == 0 {
            return Err(FontError::InvalidSize(pixel_size));
        }

        if let Some(handle) = self.loaded.get(&(id.to_string(), pixel_size)) {
            return Ok(Arc::clone(handle));
        }

        let descriptor = self.descriptors.get(id).ok_or_else(|| FontError::NotFound {
            font: id.to_string(),
            size: pixel_size,
        })?;

        let font = Arc::new(descriptor.build(id, pixel_size));
        log::debug!(
            "Built glyph metrics for '{}' at {}px: {} glyphs",
            id,
            pixel_size,
            font.glyph_count()
        );

        self.loaded.insert((id.to_string(), pixel_size), Arc::clone(&font));
        Ok(font)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_embedded_metrics_at_8px() {
        let mut cache = EmbeddedFontCache::new();
        let font = cache.resolve_font(EMBEDDED_FONT_ID, 8).unwrap();

        assert_eq!(font.pixel_size(), 8);
        assert_eq!(font.advance('A'), 6.0);
        assert_eq!(font.advance('i'), 4.0);
        assert_eq!(font.advance(' '), 4.0);
        assert_eq!(font.cap_height(), 5.0);
        assert_eq!(font.line_height(), 10.0);
        assert_eq!(font.glyph_count(), 95);
        assert_eq!(font.glyph('A').map(|g| g.size), Some(Vec2::new(5.0, 5.0)));
    }

    #[test]
    fn test_missing_glyph_uses_fallback_advance() {
        let mut cache = EmbeddedFontCache::new();
        let font = cache.resolve_font(EMBEDDED_FONT_ID, 8).unwrap();
        assert!(font.glyph('é').is_none());
        assert_eq!(font.advance('é'), 6.0);
    }

    #[test]
    fn test_resolution_is_memoised() {
        let mut cache = EmbeddedFontCache::new();
        let a = cache.resolve_font(EMBEDDED_FONT_ID, 8).unwrap();
        let b = cache.resolve_font(EMBEDDED_FONT_ID, 8).unwrap();
        let c = cache.resolve_font(EMBEDDED_FONT_ID, 16).unwrap();

        assert!(Arc::ptr_eq(&a, &b));
        assert!(!Arc::ptr_eq(&a, &c));
        assert_eq!(cache.loaded_count(), 2);
    }

    #[test]
    fn test_resolution_errors() {
        let mut cache = EmbeddedFontCache::new();
        assert_eq!(
            cache.resolve_font(EMBEDDED_FONT_ID, 0).unwrap_err(),
            FontError::InvalidSize(0)
        );
        assert!(matches!(
            cache.resolve_font("missing", 8),
            Err(FontError::NotFound { size: 8, .. })
        ));
    }

    #[test]
    fn test_register_replaces_built_metrics() {
        let mut cache = EmbeddedFontCache::new();
        cache.register("wide", FontDescriptor { advance: 1.0, ..FontDescriptor::embedded() });
        let before = cache.resolve_font("wide", 8).unwrap();
        assert_eq!(before.advance('A'), 8.0);

        cache.register("wide", FontDescriptor { advance: 1.5, ..FontDescriptor::embedded() });
        let after = cache.resolve_font("wide", 8).unwrap();
        assert_eq!(after.advance('A'), 12.0);
        assert!(!Arc::ptr_eq(&before, &after));
    }
}
