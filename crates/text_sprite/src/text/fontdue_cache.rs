//! Glyph cache over TrueType/OpenType fonts rasterized with `fontdue`
//!
//! Callers hand in font bytes; glyph metrics are derived per pixel size
//! and memoised like [`EmbeddedFontCache`](super::font_cache::EmbeddedFontCache).

use std::collections::HashMap;
use std::sync::Arc;

use fontdue::{Font, FontSettings};

use super::font_cache::{BitmapFont, FontCache, FontError, FontHandle, FontResult, GlyphInfo};
use crate::foundation::math::Vec2;

/// Characters measured for every size: printable ASCII and Latin-1
const MEASURED_CHARS: std::ops::RangeInclusive<u32> = 0x20..=0xFF;

/// Font cache backed by `fontdue`
#[derive(Default)]
pub struct FontdueCache {
    fonts: HashMap<String, Font>,
    loaded: HashMap<(String, u32), FontHandle>,
}

impl FontdueCache {
    /// Create an empty cache
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse `bytes` and register the font under `id`
    pub fn register_bytes(&mut self, id: impl Into<String>, bytes: &[u8]) -> FontResult<()> {
        let id = id.into();
        let font = Font::from_bytes(bytes, FontSettings::default())
            .map_err(|e| FontError::LoadError(format!("fontdue error: {}", e)))?;

        self.loaded.retain(|(loaded_id, _), _| *loaded_id != id);
        log::info!("Registered font '{}' ({} glyphs)", id, font.glyph_count());
        self.fonts.insert(id, font);
        Ok(())
    }

    /// Whether a font is registered under `id`
    pub fn contains(&self, id: &str) -> bool {
        self.fonts.contains_key(id)
    }

    #[allow(clippy::cast_precision_loss)]
    fn build(font: &Font, id: &str, pixel_size: u32) -> BitmapFont {
        let px = pixel_size as f32;
        let (ascent, line_height) = font
            .horizontal_line_metrics(px)
            .map_or((px, px), |m| (m.ascent, m.new_line_size));
        let cap_height = if font.lookup_glyph_index('H') == 0 {
            ascent
        } else {
            font.metrics('H', px).height as f32
        };
        let fallback_advance = font.metrics(' ', px).advance_width;

        let mut bitmap_font = BitmapFont::new(id, pixel_size, line_height, cap_height, fallback_advance);
        for ch in MEASURED_CHARS.filter_map(char::from_u32) {
            if font.lookup_glyph_index(ch) == 0 {
                continue;
            }
            let metrics = font.metrics(ch, px);
            let height = metrics.height as f32;
            bitmap_font.insert_glyph(
                ch,
                GlyphInfo {
                    size: Vec2::new(metrics.width as f32, height),
                    advance: metrics.advance_width,
                    bearing: Vec2::new(metrics.xmin as f32, ascent - height - metrics.ymin as f32),
                },
            );
        }
        bitmap_font
    }
}

impl std::fmt::Debug for FontdueCache {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FontdueCache")
            .field("fonts", &self.fonts.keys().collect::<Vec<_>>())
            .field("loaded", &self.loaded.len())
            .finish()
    }
}

impl FontCache for FontdueCache {
    fn resolve_font(&mut self, id: &str, pixel_size: u32) -> FontResult<FontHandle> {
        if pixel_size == 0 {
            return Err(FontError::InvalidSize(pixel_size));
        }

        if let Some(handle) = self.loaded.get(&(id.to_string(), pixel_size)) {
            return Ok(Arc::clone(handle));
        }

        let font = self.fonts.get(id).ok_or_else(|| FontError::NotFound {
            font: id.to_string(),
            size: pixel_size,
        })?;

        let handle = Arc::new(Self::build(font, id, pixel_size));
        log::debug!(
            "Measured '{}' at {}px: {} glyphs",
            id,
            pixel_size,
            handle.glyph_count()
        );
        self.loaded.insert((id.to_string(), pixel_size), Arc::clone(&handle));
        Ok(handle)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_garbage_bytes_fail_to_load() {
        let mut cache = FontdueCache::new();
        let result = cache.register_bytes("broken", &[0, 1, 2, 3]);
        assert!(matches!(result, Err(FontError::LoadError(_))));
        assert!(!cache.contains("broken"));
    }

    #[test]
    fn test_unknown_font_and_zero_size() {
        let mut cache = FontdueCache::new();
        assert_eq!(
            cache.resolve_font("absent", 12).unwrap_err(),
            FontError::NotFound { font: "absent".to_string(), size: 12 }
        );
        assert_eq!(cache.resolve_font("absent", 0).unwrap_err(), FontError::InvalidSize(0));
    }
}
