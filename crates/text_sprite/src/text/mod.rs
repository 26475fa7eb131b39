//! Text sprite system
//!
//! Glyph cache adapters, the wrapping layout engine, format state, frame
//! sizing and the per-frame draw compositor.

pub mod compositor;
pub mod error;
pub mod font_cache;
#[cfg(feature = "fontdue")]
pub mod fontdue_cache;
pub mod format;
pub mod frame_sizer;
pub mod text_layout;
pub mod text_sprite;

#[cfg(test)]
mod tests;

pub use error::{TextError, TextResult};
pub use font_cache::{
    BitmapFont, EmbeddedFontCache, FontCache, FontDescriptor, FontError, FontHandle, FontResult,
    GlyphInfo,
};
#[cfg(feature = "fontdue")]
pub use fontdue_cache::FontdueCache;
pub use format::{FormatSpec, FormatUpdate};
pub use frame_sizer::FrameSizer;
pub use text_layout::{Alignment, GlyphLayout, LayoutLine, PlacedGlyph, TextBounds, TextLayout};
pub use text_sprite::{TextContent, TextSprite};
