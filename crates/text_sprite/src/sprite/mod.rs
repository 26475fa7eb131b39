//! Sprite composition
//!
//! A sprite is a [`SpriteBase`] (placement, visibility, flicker, cameras)
//! plus a content provider implementing [`SpriteContent`]. [`Sprite`]
//! handles the generic per-frame gating; content only draws.

pub mod base;
pub mod content;

pub use base::{CollisionFlags, SpriteBase};
pub use content::{DrawOutcome, Drawable, SkipReason, Sprite, SpriteContent};
