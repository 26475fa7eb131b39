//! Debug drawing primitives and system
//!
//! When visual debugging is on, every drawn sprite reports its bounding box
//! here. Box color encodes how the sprite takes part in collisions.

use crate::foundation::color::Color;
use crate::foundation::math::Rect;
use crate::render::Camera;
use crate::sprite::{CollisionFlags, SpriteBase};

/// Bounding box color for sprites that ignore collisions
pub const NO_COLLISION_COLOR: Color = Color(0xFF00_90E9);
/// Bounding box color for immovable sprites
pub const IMMOVABLE_COLOR: Color = Color(0xFF00_F225);
/// Bounding box color for sprites colliding from some directions only
pub const PARTIAL_COLLISION_COLOR: Color = Color(0xFFF0_1EFF);
/// Bounding box color for everything else
pub const SOLID_COLOR: Color = Color(0xFFFF_0012);

/// Receiver for per-sprite debug drawing
pub trait DebugOverlay {
    /// Draw debug information for `base` as seen through `camera`
    fn draw_debug(&mut self, base: &SpriteBase, camera: &Camera);
}

/// Debug shape primitives
#[derive(Clone, Debug, PartialEq)]
pub enum DebugShape {
    /// Outline rectangle in screen space
    Rect {
        /// Screen-space rectangle
        rect: Rect,
        /// Outline color
        color: Color,
    },
}

/// Collects debug shapes for one frame
#[derive(Debug, Default)]
pub struct DebugDrawSystem {
    shapes: Vec<DebugShape>,
}

impl DebugDrawSystem {
    /// Create an empty system
    pub fn new() -> Self {
        Self::default()
    }

    /// Shapes collected since the last clear
    pub fn shapes(&self) -> &[DebugShape] {
        &self.shapes
    }

    /// Drop all collected shapes
    pub fn clear(&mut self) {
        self.shapes.clear();
    }

    /// Color used for a sprite's bounding box
    pub fn bounding_box_color(base: &SpriteBase) -> Color {
        if base.allow_collisions.is_empty() {
            NO_COLLISION_COLOR
        } else if base.immovable {
            IMMOVABLE_COLOR
        } else if base.allow_collisions != CollisionFlags::ANY {
            PARTIAL_COLLISION_COLOR
        } else {
            SOLID_COLOR
        }
    }
}

impl DebugOverlay for DebugDrawSystem {
    fn draw_debug(&mut self, base: &SpriteBase, camera: &Camera) {
        let point = base.screen_position(camera);
        self.shapes.push(DebugShape::Rect {
            rect: Rect::new(point.x.floor(), point.y.floor(), base.width, base.height),
            color: Self::bounding_box_color(base),
        });
    }
}
