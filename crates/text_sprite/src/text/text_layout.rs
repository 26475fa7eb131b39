//! Text layout engine
//!
//! Wraps text into lines that fit a fixed pixel width and places each
//! visible glyph. Glyph metrics come from a [`FontHandle`] that the engine
//! keeps until the font or size changes; re-wrapping never touches it.
//!
//! # Layout Coordinate System
//!
//! - Origin is the sprite's draw position
//! - +X right, +Y down (screen convention)
//! - The first line's top-left sits at the layout inset

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use super::error::TextError;
use super::font_cache::{BitmapFont, FontHandle};
use crate::foundation::math::Vec2;

/// Horizontal alignment of each line within the layout width
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Alignment {
    /// Flush left
    #[default]
    Left,
    /// Flush right
    Right,
    /// Centered, offset floored to a whole pixel
    Center,
}

impl Alignment {
    /// Lowercase name
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Left => "left",
            Self::Right => "right",
            Self::Center => "center",
        }
    }

    /// Offset of a line of `line_width` inside `width`
    pub fn offset(self, width: f32, line_width: f32) -> f32 {
        match self {
            Self::Left => 0.0,
            Self::Right => width - line_width,
            Self::Center => ((width - line_width) / 2.0).floor(),
        }
    }
}

impl FromStr for Alignment {
    type Err = TextError;

    /// Case-insensitive `left`, `right` or `center`
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "left" => Ok(Self::Left),
            "right" => Ok(Self::Right),
            "center" => Ok(Self::Center),
            _ => Err(TextError::InvalidArgument(format!(
                "alignment must be \"left\", \"right\" or \"center\", got \"{s}\""
            ))),
        }
    }
}

impl fmt::Display for Alignment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A glyph placed relative to the draw position
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PlacedGlyph {
    /// Character
    pub ch: char,
    /// Pen position of the glyph's top-left
    pub position: Vec2,
}

/// One output line
#[derive(Debug, Clone, PartialEq)]
pub struct LayoutLine {
    /// Text of the line, trailing whitespace removed
    pub text: String,
    /// Horizontal alignment offset inside the layout width
    pub offset_x: f32,
    /// Top of the line relative to the first line
    pub y: f32,
    /// Sum of glyph advances
    pub width: f32,
}

/// Measured extent of a layout
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct TextBounds {
    /// Widest line
    pub width: f32,
    /// Cap height of the first line plus one line height per extra line
    pub height: f32,
}

/// Result of wrapping one text at one width and alignment
#[derive(Debug, Clone, PartialEq, Default)]
pub struct GlyphLayout {
    /// Output lines, top to bottom
    pub lines: Vec<LayoutLine>,
    /// Visible glyphs in reading order
    pub glyphs: Vec<PlacedGlyph>,
    /// Measured bounds
    pub bounds: TextBounds,
}

impl GlyphLayout {
    /// Number of output lines
    pub fn line_count(&self) -> usize {
        self.lines.len()
    }
}

/// Layout engine bound to one set of glyph metrics
#[derive(Debug, Clone)]
pub struct TextLayout {
    font: FontHandle,
    inset: Vec2,
    layout: GlyphLayout,
}

impl TextLayout {
    /// Create an engine with an empty layout
    pub fn new(font: FontHandle, inset: Vec2) -> Self {
        Self {
            font,
            inset,
            layout: GlyphLayout::default(),
        }
    }

    /// Glyph metrics in use
    pub fn font(&self) -> &FontHandle {
        &self.font
    }

    /// Offset of the first glyph from the draw position
    pub fn inset(&self) -> Vec2 {
        self.inset
    }

    /// Most recent layout
    pub fn layout(&self) -> &GlyphLayout {
        &self.layout
    }

    /// Re-wrap with the current metrics
    pub fn relayout(&mut self, text: &str, width: f32, alignment: Alignment) -> &GlyphLayout {
        self.layout = Self::compute(&self.font, text, width, alignment, self.inset);
        &self.layout
    }

    /// Install a layout computed elsewhere with the same metrics
    pub(crate) fn install(&mut self, layout: GlyphLayout) {
        self.layout = layout;
    }

    /// Wrap `text` into `width` and place its glyphs
    ///
    /// Explicit newlines always break. Otherwise a line breaks at the last
    /// whitespace at or before the width limit; a token wider than the
    /// limit is hard-broken, keeping at least one character per line.
    /// Pure: identical inputs give identical output.
    pub fn compute(
        font: &BitmapFont,
        text: &str,
        width: f32,
        alignment: Alignment,
        inset: Vec2,
    ) -> GlyphLayout {
        let chars: Vec<char> = text.chars().collect();
        let len = chars.len();
        let mut layout = GlyphLayout::default();
        let mut start = 0;

        while start < len {
            let newline = chars[start..]
                .iter()
                .position(|&c| c == '\n')
                .map_or(len, |i| start + i);

            let fit = visible_glyphs(font, &chars[start..newline], width);
            let mut line_end = start + fit;
            let mut next_start = line_end + 1;

            if line_end < newline {
                let mut brk = line_end;
                while brk > start && !chars[brk].is_whitespace() {
                    brk -= 1;
                }

                if brk == start {
                    line_end = line_end.max(start + 1);
                    next_start = line_end;
                } else {
                    line_end = brk;
                    next_start = brk;
                }

                while next_start < newline && chars[next_start].is_whitespace() {
                    next_start += 1;
                }
                if next_start == newline {
                    next_start = newline + 1;
                }
            }

            while line_end > start && chars[line_end - 1].is_whitespace() {
                line_end -= 1;
            }

            push_line(&mut layout, font, &chars[start..line_end], width, alignment, inset);
            start = next_start;
        }

        let lines = layout.lines.len().max(1);
        #[allow(clippy::cast_precision_loss)]
        let extra_lines = (lines - 1) as f32;
        layout.bounds.height = font.cap_height() + extra_lines * font.line_height();

        log::trace!(
            "Laid out {} chars into {} lines, bounds {:?}",
            len,
            layout.lines.len(),
            layout.bounds
        );

        layout
    }
}

/// Number of leading characters whose advances fit in `width`
fn visible_glyphs(font: &BitmapFont, chars: &[char], width: f32) -> usize {
    let mut x = 0.0;
    for (count, &ch) in chars.iter().enumerate() {
        let advance = font.advance(ch);
        if x + advance > width {
            return count;
        }
        x += advance;
    }
    chars.len()
}

fn push_line(
    layout: &mut GlyphLayout,
    font: &BitmapFont,
    chars: &[char],
    width: f32,
    alignment: Alignment,
    inset: Vec2,
) {
    let line_width: f32 = chars.iter().map(|&ch| font.advance(ch)).sum();
    let offset_x = alignment.offset(width, line_width);
    #[allow(clippy::cast_precision_loss)]
    let y = layout.lines.len() as f32 * font.line_height();

    let mut pen = inset.x + offset_x;
    for &ch in chars {
        if !ch.is_whitespace() && font.glyph(ch).is_some() {
            layout.glyphs.push(PlacedGlyph {
                ch,
                position: Vec2::new(pen, inset.y + y),
            });
        }
        pen += font.advance(ch);
    }

    layout.bounds.width = layout.bounds.width.max(line_width);
    layout.lines.push(LayoutLine {
        text: chars.iter().collect(),
        offset_x,
        y,
        width: line_width,
    });
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::EMBEDDED_FONT_ID;
    use crate::text::font_cache::{EmbeddedFontCache, FontCache};

    // Embedded font at 8px: advance 6, narrow ('i', 'l', ' ', ...) 4,
    // cap height 5, line height 10.
    fn font() -> FontHandle {
        EmbeddedFontCache::new().resolve_font(EMBEDDED_FONT_ID, 8).unwrap()
    }

    fn lines(layout: &GlyphLayout) -> Vec<&str> {
        layout.lines.iter().map(|l| l.text.as_str()).collect()
    }

    fn wrap(text: &str, width: f32) -> GlyphLayout {
        TextLayout::compute(&font(), text, width, Alignment::Left, Vec2::zeros())
    }

    #[test]
    fn test_alignment_parsing() {
        assert_eq!("left".parse::<Alignment>().unwrap(), Alignment::Left);
        assert_eq!("RIGHT".parse::<Alignment>().unwrap(), Alignment::Right);
        assert_eq!("Center".parse::<Alignment>().unwrap(), Alignment::Center);
        assert!(matches!(
            "justify".parse::<Alignment>(),
            Err(TextError::InvalidArgument(_))
        ));
        assert_eq!(Alignment::Center.to_string(), "center");
    }

    #[test]
    fn test_single_line_fits() {
        let layout = wrap("Hi", 100.0);
        assert_eq!(lines(&layout), vec!["Hi"]);
        assert_eq!(layout.bounds, TextBounds { width: 10.0, height: 5.0 });
        assert_eq!(layout.glyphs.len(), 2);
        assert_eq!(layout.glyphs[1].position, Vec2::new(6.0, 0.0));
    }

    #[test]
    fn test_wraps_at_last_whitespace() {
        // "AAA AAA" = 18 + 4 + 18; 30px fits "AAA AA" but breaks at the space
        let layout = wrap("AAA AAA", 30.0);
        assert_eq!(lines(&layout), vec!["AAA", "AAA"]);
        assert_eq!(layout.lines[0].width, 18.0);
        assert_eq!(layout.lines[1].y, 10.0);
        assert_eq!(layout.bounds.height, 15.0);
    }

    #[test]
    fn test_break_exactly_on_whitespace_after_full_line() {
        // "AAAAA" is exactly 30px, the following space does not fit
        let layout = wrap("AAAAA BB", 30.0);
        assert_eq!(lines(&layout), vec!["AAAAA", "BB"]);
    }

    #[test]
    fn test_hard_breaks_long_token() {
        let layout = wrap("ABCDEFGH", 20.0);
        assert_eq!(lines(&layout), vec!["ABC", "DEF", "GH"]);
    }

    #[test]
    fn test_glyph_wider_than_width_still_advances() {
        let layout = wrap("AB", 3.0);
        assert_eq!(lines(&layout), vec!["A", "B"]);
    }

    #[test]
    fn test_explicit_newlines() {
        let layout = wrap("A\n\nB\n", 100.0);
        assert_eq!(lines(&layout), vec!["A", "", "B"]);
        assert_eq!(layout.bounds.height, 25.0);
    }

    #[test]
    fn test_leading_whitespace_dropped_after_soft_break_only() {
        let layout = wrap("  AA   AAAA", 30.0);
        assert_eq!(lines(&layout), vec!["  AA", "AAAA"]);
    }

    #[test]
    fn test_whitespace_before_newline_does_not_add_line() {
        let layout = wrap("AAAA     \nB", 26.0);
        assert_eq!(lines(&layout), vec!["AAAA", "B"]);
    }

    #[test]
    fn test_empty_text_measures_one_line() {
        let layout = wrap("", 100.0);
        assert_eq!(layout.line_count(), 0);
        assert_eq!(layout.bounds, TextBounds { width: 0.0, height: 5.0 });
    }

    #[test]
    fn test_center_offset_is_floored_per_line() {
        let font = font();
        // "AB" = 12px in 51px: (51 - 12) / 2 = 19.5 -> 19
        let layout = TextLayout::compute(&font, "AB\nABCD", 51.0, Alignment::Center, Vec2::zeros());
        assert_eq!(layout.lines[0].offset_x, 19.0);
        assert_eq!(layout.lines[1].offset_x, 13.0);
        assert_eq!(layout.glyphs[0].position.x, 19.0);
    }

    #[test]
    fn test_right_alignment() {
        let font = font();
        let layout = TextLayout::compute(&font, "AB", 50.0, Alignment::Right, Vec2::zeros());
        assert_eq!(layout.lines[0].offset_x, 38.0);
    }

    #[test]
    fn test_inset_offsets_glyphs_not_bounds() {
        let font = font();
        let layout = TextLayout::compute(&font, "A\nB", 50.0, Alignment::Left, Vec2::new(2.0, 3.0));
        assert_eq!(layout.glyphs[0].position, Vec2::new(2.0, 3.0));
        assert_eq!(layout.glyphs[1].position, Vec2::new(2.0, 13.0));
        assert_eq!(layout.bounds, TextBounds { width: 6.0, height: 15.0 });
    }

    #[test]
    fn test_whitespace_and_unknown_glyphs_advance_without_quads() {
        let layout = wrap("A é B", 100.0);
        let chars: Vec<char> = layout.glyphs.iter().map(|g| g.ch).collect();
        assert_eq!(chars, vec!['A', 'B']);
        // A(6) + space(4) + é(fallback 6) + space(4)
        assert_eq!(layout.glyphs[1].position.x, 20.0);
    }

    #[test]
    fn test_relayout_is_idempotent_and_keeps_metrics() {
        let font = font();
        let mut engine = TextLayout::new(font.clone(), Vec2::new(2.0, 3.0));
        let first = engine.relayout("some wrapped text here", 40.0, Alignment::Center).clone();
        let second = engine.relayout("some wrapped text here", 40.0, Alignment::Center).clone();
        assert_eq!(first, second);
        assert!(std::sync::Arc::ptr_eq(engine.font(), &font));
    }
}
