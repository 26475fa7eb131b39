//! Format state
//!
//! [`FormatSpec`] is the live (font, size, color, alignment, shadow) tuple
//! of a text sprite. [`FormatUpdate`] is a partial update with named,
//! defaulted fields; resolving it against the current format yields the next
//! format or rejects the update without side effects.

use super::error::{TextError, TextResult};
use super::text_layout::Alignment;
use crate::config::TextConfig;
use crate::foundation::color::Color;
use crate::foundation::math::Vec2;

/// Live format of a text sprite
#[derive(Debug, Clone, PartialEq)]
pub struct FormatSpec {
    /// Font identifier
    pub font: String,
    /// Pixel size, always positive
    pub size: u32,
    /// Foreground color; only the RGB bytes are used
    pub color: Color,
    /// Horizontal alignment
    pub alignment: Alignment,
    /// Shadow color; an alpha byte of zero disables the shadow
    pub shadow_color: Color,
    /// Shadow offset from the text, in pixels
    pub shadow_offset: Vec2,
}

impl FormatSpec {
    /// Configured defaults using `font`
    pub fn defaults(font: impl Into<String>, config: &TextConfig) -> Self {
        Self {
            font: font.into(),
            size: config.default_size,
            color: config.default_color,
            alignment: Alignment::Left,
            shadow_color: Color::TRANSPARENT,
            shadow_offset: Vec2::new(config.default_shadow_offset.0, config.default_shadow_offset.1),
        }
    }

    /// Whether a shadow pass is drawn
    pub fn shadow_enabled(&self) -> bool {
        self.shadow_color.alpha() != 0
    }

    /// Whether switching to `other` needs new glyph metrics
    pub fn needs_new_metrics(&self, other: &Self) -> bool {
        self.font != other.font || self.size != other.size
    }

    fn validate(&self) -> TextResult<()> {
        if self.font.is_empty() {
            return Err(TextError::InvalidArgument("font identifier cannot be empty".to_string()));
        }
        if self.size == 0 {
            return Err(TextError::InvalidArgument("font size must be positive".to_string()));
        }
        Ok(())
    }
}

/// Partial format update
///
/// Unset fields fall back to: current font; configured size, color and
/// shadow offset; left alignment; no shadow.
///
/// ```
/// use text_sprite::text::FormatUpdate;
/// use text_sprite::foundation::color::Color;
///
/// let update = FormatUpdate::new()
///     .size(16)
///     .color(Color(0x00FF_0000))
///     .alignment_name("center")
///     .shadow_color(Color::BLACK)
///     .shadow_offset(2.0, 2.0);
/// assert_eq!(update.size, Some(16));
/// ```
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FormatUpdate {
    /// Font identifier
    pub font: Option<String>,
    /// Pixel size
    pub size: Option<u32>,
    /// Foreground color
    pub color: Option<Color>,
    /// Alignment name, parsed when the update is applied
    pub alignment: Option<String>,
    /// Shadow color
    pub shadow_color: Option<Color>,
    /// Shadow X offset
    pub shadow_offset_x: Option<f32>,
    /// Shadow Y offset
    pub shadow_offset_y: Option<f32>,
}

impl FormatUpdate {
    /// Update with every field unset
    pub fn new() -> Self {
        Self::default()
    }

    /// Update that re-applies an existing format exactly
    pub fn from_spec(spec: &FormatSpec) -> Self {
        Self {
            font: Some(spec.font.clone()),
            size: Some(spec.size),
            color: Some(spec.color),
            alignment: Some(spec.alignment.as_str().to_string()),
            shadow_color: Some(spec.shadow_color),
            shadow_offset_x: Some(spec.shadow_offset.x),
            shadow_offset_y: Some(spec.shadow_offset.y),
        }
    }

    /// Set the font
    pub fn font(mut self, font: impl Into<String>) -> Self {
        self.font = Some(font.into());
        self
    }

    /// Set the pixel size
    pub fn size(mut self, size: u32) -> Self {
        self.size = Some(size);
        self
    }

    /// Set the foreground color
    pub fn color(mut self, color: Color) -> Self {
        self.color = Some(color);
        self
    }

    /// Set the alignment
    pub fn alignment(mut self, alignment: Alignment) -> Self {
        self.alignment = Some(alignment.as_str().to_string());
        self
    }

    /// Set the alignment by name (`"left"`, `"right"`, `"center"`)
    pub fn alignment_name(mut self, name: impl Into<String>) -> Self {
        self.alignment = Some(name.into());
        self
    }

    /// Set the shadow color
    pub fn shadow_color(mut self, color: Color) -> Self {
        self.shadow_color = Some(color);
        self
    }

    /// Set both shadow offsets
    pub fn shadow_offset(mut self, x: f32, y: f32) -> Self {
        self.shadow_offset_x = Some(x);
        self.shadow_offset_y = Some(y);
        self
    }

    /// Resolve against the current format
    ///
    /// Fails with [`TextError::InvalidArgument`] for an unknown alignment,
    /// an empty font or a zero size.
    pub fn resolve(&self, current: &FormatSpec, config: &TextConfig) -> TextResult<FormatSpec> {
        let alignment = match &self.alignment {
            Some(name) => name.parse()?,
            None => Alignment::Left,
        };

        let spec = FormatSpec {
            font: self.font.clone().unwrap_or_else(|| current.font.clone()),
            size: self.size.unwrap_or(config.default_size),
            color: self.color.unwrap_or(config.default_color),
            alignment,
            shadow_color: self.shadow_color.unwrap_or(Color::TRANSPARENT),
            shadow_offset: Vec2::new(
                self.shadow_offset_x.unwrap_or(config.default_shadow_offset.0),
                self.shadow_offset_y.unwrap_or(config.default_shadow_offset.1),
            ),
        };

        spec.validate()?;
        Ok(spec)
    }
}
