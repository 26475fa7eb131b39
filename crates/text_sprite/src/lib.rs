//! # Text Sprite
//!
//! Text as a 2D sprite: a string laid out into a cached glyph list, sized to
//! fit that layout and composited through a scrolling camera into a shared
//! quad batch, with optional drop shadow, tint, alpha, rotation and custom
//! blending.
//!
//! ## Features
//!
//! - **Format State**: font, size, color, alignment and shadow with atomic,
//!   partial updates; glyph metrics are refetched only when font or size change
//! - **Layout Engine**: word wrapping against a fixed pixel width with
//!   left, right or center alignment per line
//! - **Frame Sizer**: frame height derived from the measured layout
//! - **Draw Compositor**: shadow and main passes with shared batch state
//!   restored after every draw
//!
//! ## Quick Start
//!
//! ```rust
//! use text_sprite::prelude::*;
//!
//! fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let mut fonts = EmbeddedFontCache::new();
//!     let mut cameras = CameraRegistry::new();
//!     let camera_id = cameras.add(Camera::new(320.0, 240.0));
//!
//!     let mut score = TextSprite::new(10.0, 20.0, 100, "Score: 0", true, &mut fonts)?;
//!     score.set_shadow(Color::BLACK);
//!
//!     let mut batch = RecordingBatch::new();
//!     let mut stats = FrameStats::default();
//!     let camera = cameras.get(camera_id).ok_or("camera missing")?;
//!     let mut ctx = RenderContext::new(camera_id, camera, &mut batch, &mut stats);
//!     assert_eq!(score.draw(&mut ctx).passes(), 2);
//!     Ok(())
//! }
//! ```

#![warn(missing_docs)]
#![warn(clippy::all, clippy::pedantic, clippy::nursery)]
#![allow(clippy::module_name_repetitions, clippy::similar_names, clippy::too_many_arguments)]

pub mod config;
pub mod debug;
pub mod foundation;
pub mod render;
pub mod sprite;
pub mod text;

/// Common imports for text sprite users
pub mod prelude {
    pub use crate::{
        config::{Config, ConfigError, TextConfig, EMBEDDED_FONT_ID},
        debug::{DebugDrawSystem, DebugOverlay},
        foundation::{
            color::Color,
            math::{Mat4, Vec2},
        },
        render::{
            BatchRenderer, BlendFunction, Camera, CameraId, CameraRegistry, FrameStats,
            RecordingBatch, RenderContext,
        },
        sprite::{DrawOutcome, Drawable, SkipReason, Sprite, SpriteBase, SpriteContent},
        text::{
            Alignment, EmbeddedFontCache, FontCache, FontHandle, FormatSpec, FormatUpdate,
            TextError, TextResult, TextSprite,
        },
    };
}
