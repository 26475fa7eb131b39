//! # Text Sprite
//!
//! A sprite whose content is a wrapped, single-format text. Format changes
//! are atomic: the next format is resolved, its glyph metrics fetched and
//! its layout computed before anything is committed, so a rejected change
//! leaves the sprite exactly as it was.
//!
//! ## Usage
//!
//! ```
//! use text_sprite::prelude::*;
//!
//! let mut fonts = EmbeddedFontCache::new();
//! let mut label = TextSprite::new(10.0, 20.0, 100, "Hi", true, &mut fonts)?;
//! label.apply_format(
//!     &mut fonts,
//!     &FormatUpdate::new().alignment(Alignment::Center).shadow_color(Color::BLACK),
//! )?;
//! assert_eq!(label.line_count(), 1);
//! # Ok::<(), text_sprite::text::TextError>(())
//! ```

use std::sync::Arc;

use super::error::{TextError, TextResult};
use super::font_cache::{FontCache, FontHandle};
use super::format::{FormatSpec, FormatUpdate};
use super::frame_sizer::FrameSizer;
use super::text_layout::{Alignment, GlyphLayout, TextLayout};
use crate::config::TextConfig;
use crate::foundation::color::Color;
use crate::foundation::math::Vec2;
use crate::sprite::{CollisionFlags, Sprite, SpriteBase};

/// A sprite that draws text
pub type TextSprite = Sprite<TextContent>;

/// Text, format and cached layout of a [`TextSprite`]
#[derive(Debug, Clone)]
pub struct TextContent {
    pub(super) text: String,
    pub(super) format: FormatSpec,
    pub(super) layout: Option<TextLayout>,
    config: TextConfig,
    sizer: FrameSizer,
}

impl TextContent {
    fn inset(&self) -> Vec2 {
        Vec2::new(self.config.layout_inset.0, self.config.layout_inset.1)
    }

    /// Glyph metrics for `next`, reusing the current ones when font and size match
    fn metrics_for(&self, next: &FormatSpec, fonts: &mut dyn FontCache) -> TextResult<FontHandle> {
        if let Some(engine) = &self.layout {
            if !self.format.needs_new_metrics(next) {
                return Ok(Arc::clone(engine.font()));
            }
        }

        fonts.resolve_font(&next.font, next.size).map_err(|source| {
            log::warn!("Rejected format change to '{}' at {}px: {}", next.font, next.size, source);
            TextError::FontResolution {
                font: next.font.clone(),
                size: next.size,
                source,
            }
        })
    }

    /// Lay out with `font` and install `next`; returns the new frame height
    fn commit(&mut self, next: FormatSpec, font: FontHandle, width: f32) -> u32 {
        let inset = self.inset();
        let layout = TextLayout::compute(&font, &self.text, width, next.alignment, inset);
        let height = self.sizer.frame_height(&layout.bounds);

        match self.layout.as_mut() {
            Some(engine) if Arc::ptr_eq(engine.font(), &font) => engine.install(layout),
            _ => {
                log::debug!("Glyph metrics rebuilt for '{}' at {}px", next.font, next.size);
                let mut engine = TextLayout::new(font, inset);
                engine.install(layout);
                self.layout = Some(engine);
            }
        }

        self.format = next;
        height
    }

    /// Re-wrap the current text; `None` once destroyed
    fn relayout(&mut self, width: f32) -> Option<u32> {
        let engine = self.layout.as_mut()?;
        let layout = engine.relayout(&self.text, width, self.format.alignment);
        log::debug!("Re-laid out text into {} line(s)", layout.line_count());
        Some(self.sizer.frame_height(&layout.bounds))
    }
}

#[allow(clippy::cast_precision_loss)]
fn px(value: u32) -> f32 {
    value as f32
}

impl Sprite<TextContent> {
    /// Create a text sprite with the default configuration
    ///
    /// `use_embedded_font` picks the built-in pixel font; otherwise the
    /// configured default font is used.
    pub fn new(
        x: f32,
        y: f32,
        width: u32,
        text: impl Into<String>,
        use_embedded_font: bool,
        fonts: &mut dyn FontCache,
    ) -> TextResult<Self> {
        Self::with_config(x, y, width, text, use_embedded_font, fonts, TextConfig::default())
    }

    /// Create a text sprite with explicit defaults
    pub fn with_config(
        x: f32,
        y: f32,
        width: u32,
        text: impl Into<String>,
        use_embedded_font: bool,
        fonts: &mut dyn FontCache,
        config: TextConfig,
    ) -> TextResult<Self> {
        config
            .validate()
            .map_err(|e| TextError::InvalidArgument(e.to_string()))?;

        let font = if use_embedded_font {
            config.embedded_font.clone()
        } else {
            config.default_font.clone()
        };
        let format = FormatSpec::defaults(font, &config);

        let mut base = SpriteBase::new(x, y);
        base.width = px(width);
        base.allow_collisions = CollisionFlags::empty();
        base.moves = false;

        let mut content = TextContent {
            text: text.into(),
            format: format.clone(),
            layout: None,
            sizer: FrameSizer::new(config.height_padding),
            config,
        };

        let metrics = content.metrics_for(&format, fonts)?;
        base.height = px(content.commit(format, metrics, base.width));

        Ok(Sprite::from_parts(base, content))
    }

    /// Apply a partial format update
    ///
    /// Glyph metrics are fetched only when the resolved font or size
    /// differs from the current one. On error nothing changes.
    pub fn apply_format(&mut self, fonts: &mut dyn FontCache, update: &FormatUpdate) -> TextResult<&mut Self> {
        if self.is_destroyed() {
            log::debug!("Ignoring format change on a destroyed text sprite");
            return Ok(self);
        }

        let next = update.resolve(&self.content.format, &self.content.config)?;
        let metrics = self.content.metrics_for(&next, fonts)?;
        self.base.height = px(self.content.commit(next, metrics, self.base.width));
        Ok(self)
    }

    /// Apply `next` when it keeps the current font and size
    fn restyle(&mut self, next: FormatSpec) -> &mut Self {
        let Some(engine) = self.content.layout.as_ref() else {
            return self;
        };
        let metrics = Arc::clone(engine.font());
        self.base.height = px(self.content.commit(next, metrics, self.base.width));
        self
    }

    fn with_format(&self, change: impl FnOnce(&mut FormatSpec)) -> FormatSpec {
        let mut next = self.content.format.clone();
        change(&mut next);
        next
    }

    /// Current text
    pub fn text(&self) -> &str {
        &self.content.text
    }

    /// Replace the text and re-wrap; glyph metrics are kept
    pub fn set_text(&mut self, text: impl Into<String>) -> &mut Self {
        let text = text.into();
        if text == self.content.text {
            return self;
        }

        self.content.text = text;
        if let Some(height) = self.content.relayout(self.base.width) {
            self.base.height = px(height);
        }
        self
    }

    /// Change the layout width and re-wrap
    #[allow(clippy::float_cmp)]
    pub fn set_width(&mut self, width: u32) -> &mut Self {
        let width = px(width);
        if width == self.base.width {
            return self;
        }

        self.base.width = width;
        if let Some(height) = self.content.relayout(width) {
            self.base.height = px(height);
        }
        self
    }

    /// Live format
    pub fn format(&self) -> &FormatSpec {
        &self.content.format
    }

    /// Font identifier
    pub fn font(&self) -> &str {
        &self.content.format.font
    }

    /// Switch font, keeping every other format field
    pub fn set_font(&mut self, fonts: &mut dyn FontCache, font: &str) -> TextResult<&mut Self> {
        if font == self.content.format.font {
            return Ok(self);
        }
        let update = FormatUpdate::from_spec(&self.content.format).font(font);
        self.apply_format(fonts, &update)
    }

    /// Pixel size
    pub fn size(&self) -> u32 {
        self.content.format.size
    }

    /// Switch size, keeping every other format field
    pub fn set_size(&mut self, fonts: &mut dyn FontCache, size: u32) -> TextResult<&mut Self> {
        if size == self.content.format.size {
            return Ok(self);
        }
        let update = FormatUpdate::from_spec(&self.content.format).size(size);
        self.apply_format(fonts, &update)
    }

    /// Horizontal alignment
    pub fn alignment(&self) -> Alignment {
        self.content.format.alignment
    }

    /// Set alignment by name: `"left"`, `"right"` or `"center"`
    pub fn set_alignment(&mut self, alignment: &str) -> TextResult<&mut Self> {
        let alignment: Alignment = alignment.parse()?;
        if alignment == self.content.format.alignment {
            return Ok(self);
        }
        let next = self.with_format(|f| f.alignment = alignment);
        Ok(self.restyle(next))
    }

    /// Foreground color
    pub fn color(&self) -> Color {
        self.content.format.color
    }

    /// Set the foreground color
    pub fn set_color(&mut self, color: Color) -> &mut Self {
        if color == self.content.format.color {
            return self;
        }
        let next = self.with_format(|f| f.color = color);
        self.restyle(next)
    }

    /// Shadow color; alpha zero means no shadow
    pub fn shadow_color(&self) -> Color {
        self.content.format.shadow_color
    }

    /// Set the shadow color
    pub fn set_shadow(&mut self, color: Color) -> &mut Self {
        if color == self.content.format.shadow_color {
            return self;
        }
        let next = self.with_format(|f| f.shadow_color = color);
        self.restyle(next)
    }

    /// Shadow offset
    pub fn shadow_offset(&self) -> Vec2 {
        self.content.format.shadow_offset
    }

    /// Set both shadow offsets
    pub fn set_shadow_offset(&mut self, x: f32, y: f32) -> &mut Self {
        let offset = Vec2::new(x, y);
        if offset == self.content.format.shadow_offset {
            return self;
        }
        let next = self.with_format(|f| f.shadow_offset = offset);
        self.restyle(next)
    }

    /// Set the shadow X offset
    pub fn set_shadow_x(&mut self, x: f32) -> &mut Self {
        let y = self.content.format.shadow_offset.y;
        self.set_shadow_offset(x, y)
    }

    /// Set the shadow Y offset
    pub fn set_shadow_y(&mut self, y: f32) -> &mut Self {
        let x = self.content.format.shadow_offset.x;
        self.set_shadow_offset(x, y)
    }

    /// Current layout; `None` once destroyed
    pub fn layout(&self) -> Option<&GlyphLayout> {
        self.content.layout.as_ref().map(TextLayout::layout)
    }

    /// Number of wrapped lines
    pub fn line_count(&self) -> usize {
        self.layout().map_or(0, GlyphLayout::line_count)
    }

    /// Glyph metrics in use; `None` once destroyed
    pub fn font_handle(&self) -> Option<&FontHandle> {
        self.content.layout.as_ref().map(TextLayout::font)
    }

    /// Defaults this sprite was built with
    pub fn config(&self) -> &TextConfig {
        &self.content.config
    }

    /// Release the layout and glyph metrics; safe to call repeatedly
    pub fn destroy(&mut self) {
        if self.content.layout.take().is_some() {
            log::debug!("Destroyed text sprite '{}'", self.content.text);
        }
        self.base.destroy();
    }

    /// Whether [`destroy`](Self::destroy) has been called
    pub fn is_destroyed(&self) -> bool {
        self.content.layout.is_none()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::text::font_cache::EmbeddedFontCache;

    fn label(text: &str) -> (TextSprite, EmbeddedFontCache) {
        let mut fonts = EmbeddedFontCache::new();
        let sprite = TextSprite::new(10.0, 20.0, 100, text, true, &mut fonts).unwrap();
        (sprite, fonts)
    }

    #[test]
    fn test_construction_defaults() {
        let (sprite, _) = label("Hi");
        assert_eq!(sprite.font(), "nokiafc22");
        assert_eq!(sprite.size(), 8);
        assert_eq!(sprite.color().rgb(), Color::WHITE.rgb());
        assert_eq!(sprite.alignment(), Alignment::Left);
        assert_eq!(sprite.shadow_color(), Color::TRANSPARENT);
        assert_eq!(sprite.shadow_offset(), Vec2::new(1.0, 1.0));
        assert_eq!(sprite.base.width, 100.0);
        assert_eq!(sprite.base.height, 12.0);
        assert!(sprite.base.allow_collisions.is_empty());
        assert!(!sprite.base.moves);
    }

    #[test]
    fn test_non_embedded_uses_configured_default_font() {
        let mut fonts = EmbeddedFontCache::new();
        let config = TextConfig::default().with_default_font("missing");
        let err = TextSprite::with_config(0.0, 0.0, 50, "", false, &mut fonts, config).unwrap_err();
        assert!(matches!(err, TextError::FontResolution { ref font, size: 8, .. } if font == "missing"));
    }

    #[test]
    fn test_invalid_config_is_rejected() {
        let mut fonts = EmbeddedFontCache::new();
        let config = TextConfig::default().with_default_size(0);
        let err = TextSprite::with_config(0.0, 0.0, 50, "", true, &mut fonts, config).unwrap_err();
        assert!(matches!(err, TextError::InvalidArgument(_)));
    }

    #[test]
    fn test_set_text_rewraps_and_resizes() {
        let (mut sprite, _) = label("Hi");
        sprite.set_text("Hello\nWorld");
        assert_eq!(sprite.text(), "Hello\nWorld");
        assert_eq!(sprite.line_count(), 2);
        assert_eq!(sprite.base.height, 22.0);
    }

    #[test]
    fn test_set_width_rewraps() {
        let (mut sprite, _) = label("AAA AAA");
        assert_eq!(sprite.line_count(), 1);
        sprite.set_width(30);
        assert_eq!(sprite.base.width, 30.0);
        assert_eq!(sprite.line_count(), 2);
    }

    #[test]
    fn test_setters_chain() {
        let (mut sprite, mut fonts) = label("Hi");
        sprite
            .set_size(&mut fonts, 16)
            .unwrap()
            .set_alignment("RIGHT")
            .unwrap()
            .set_color(Color(0x00FF_0000))
            .set_shadow(Color::BLACK)
            .set_shadow_x(3.0);

        assert_eq!(sprite.size(), 16);
        assert_eq!(sprite.alignment(), Alignment::Right);
        assert_eq!(sprite.color(), Color(0x00FF_0000));
        assert_eq!(sprite.shadow_color(), Color::BLACK);
        assert_eq!(sprite.shadow_offset(), Vec2::new(3.0, 1.0));
    }

    #[test]
    fn test_invalid_alignment_leaves_sprite_untouched() {
        let (mut sprite, _) = label("Hi");
        let before = sprite.format().clone();
        assert!(matches!(sprite.set_alignment("justify"), Err(TextError::InvalidArgument(_))));
        assert_eq!(sprite.format(), &before);
    }

    #[test]
    fn test_destroy_is_idempotent() {
        let (mut sprite, mut fonts) = label("Hi");
        sprite.destroy();
        sprite.destroy();
        assert!(sprite.is_destroyed());
        assert!(!sprite.base.exists);
        assert!(sprite.layout().is_none());
        assert!(sprite.font_handle().is_none());
        assert_eq!(sprite.line_count(), 0);

        sprite.set_text("ignored layout");
        assert!(sprite.apply_format(&mut fonts, &FormatUpdate::new().size(16)).is_ok());
        assert!(sprite.is_destroyed());
        assert_eq!(sprite.size(), 8);
    }
}
