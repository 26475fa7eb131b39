//! Sprite base state
//!
//! Pure placement and visibility data shared by every sprite kind.

use crate::foundation::math::{Rect, Vec2};
use crate::render::{BlendFunction, Camera, CameraId};
use bitflags::bitflags;

bitflags! {
    /// Directions from which a sprite accepts collisions
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    pub struct CollisionFlags: u16 {
        /// Collides on its left side
        const LEFT = 0x0001;
        /// Collides on its right side
        const RIGHT = 0x0010;
        /// Collides on its top
        const UP = 0x0100;
        /// Collides on its bottom
        const DOWN = 0x1000;
        /// Left and right
        const WALL = Self::LEFT.bits() | Self::RIGHT.bits();
        /// Every direction
        const ANY = Self::LEFT.bits() | Self::RIGHT.bits() | Self::UP.bits() | Self::DOWN.bits();
    }
}

/// Placement, visibility and render-state shared by all sprite kinds
#[derive(Debug, Clone, PartialEq)]
pub struct SpriteBase {
    /// World position of the top-left corner
    pub position: Vec2,

    /// Velocity in pixels per second, applied when `moves` is set
    pub velocity: Vec2,

    /// Width in pixels
    pub width: f32,

    /// Height in pixels
    pub height: f32,

    /// How strongly camera scroll affects this sprite (0 = fixed to screen)
    pub scroll_factor: Vec2,

    /// Subtracted from the position when drawing
    pub offset: Vec2,

    /// Scale used for on-screen tests of rotated sprites
    pub scale: Vec2,

    /// Rotation in degrees about the sprite's center
    pub angle: f32,

    /// Custom blend function; `None` draws with standard alpha blending
    pub blend: Option<BlendFunction>,

    /// Cameras this sprite renders to; `None` renders to every camera
    pub cameras: Option<Vec<CameraId>>,

    /// Collision directions
    pub allow_collisions: CollisionFlags,

    /// Whether `update` integrates velocity
    pub moves: bool,

    /// Whether collisions may push this sprite
    pub immovable: bool,

    /// Opt out of visual-debug bounding boxes
    pub ignore_draw_debug: bool,

    /// Whether the sprite draws at all
    pub visible: bool,

    /// Cleared by `destroy`
    pub exists: bool,

    alpha: f32,
    flicker_timer: f32,
    flicker: bool,
}

impl SpriteBase {
    /// Create a sprite base at a world position with zero size
    pub fn new(x: f32, y: f32) -> Self {
        Self {
            position: Vec2::new(x, y),
            velocity: Vec2::zeros(),
            width: 0.0,
            height: 0.0,
            scroll_factor: Vec2::new(1.0, 1.0),
            offset: Vec2::zeros(),
            scale: Vec2::new(1.0, 1.0),
            angle: 0.0,
            blend: None,
            cameras: None,
            allow_collisions: CollisionFlags::ANY,
            moves: true,
            immovable: false,
            ignore_draw_debug: false,
            visible: true,
            exists: true,
            alpha: 1.0,
            flicker_timer: 0.0,
            flicker: false,
        }
    }

    /// Opacity in `[0, 1]`
    pub fn alpha(&self) -> f32 {
        self.alpha
    }

    /// Set opacity, clamped to `[0, 1]`
    pub fn set_alpha(&mut self, alpha: f32) {
        self.alpha = alpha.clamp(0.0, 1.0);
    }

    /// Start flickering for `duration` seconds; negative flickers forever
    pub fn flicker(&mut self, duration: f32) {
        self.flicker_timer = duration;
        if self.flicker_timer == 0.0 {
            self.flicker = false;
        }
    }

    /// Whether a flicker is in progress
    pub fn flickering(&self) -> bool {
        self.flicker_timer != 0.0
    }

    /// Advance timers and motion by `elapsed` seconds
    pub fn update(&mut self, elapsed: f32) {
        if self.flicker_timer > 0.0 {
            self.flicker_timer -= elapsed;
            if self.flicker_timer <= 0.0 {
                self.flicker_timer = 0.0;
                self.flicker = false;
            }
        }

        if self.moves {
            self.position += self.velocity * elapsed;
        }
    }

    /// Toggle the flicker phase for this frame
    ///
    /// Returns `true` when the frame falls on the hidden phase and the
    /// draw must be skipped.
    pub fn advance_flicker(&mut self) -> bool {
        if self.flicker_timer == 0.0 {
            return false;
        }
        self.flicker = !self.flicker;
        self.flicker
    }

    /// Whether this sprite renders to `camera`
    pub fn renders_to(&self, camera: CameraId) -> bool {
        self.cameras
            .as_ref()
            .map_or(true, |cameras| cameras.contains(&camera))
    }

    /// Camera-relative draw position
    pub fn screen_position(&self, camera: &Camera) -> Vec2 {
        self.position - camera.scroll.component_mul(&self.scroll_factor) - self.offset
    }

    /// World-space bounding box
    pub fn bounds(&self) -> Rect {
        Rect::new(self.position.x, self.position.y, self.width, self.height)
    }

    /// Whether any part of the sprite lands inside the camera viewport
    ///
    /// Rotated or scaled sprites are tested with a bounding circle around
    /// their center.
    pub fn on_screen(&self, camera: &Camera) -> bool {
        let point = self.screen_position(camera);
        let view = camera.screen_rect();

        if self.angle == 0.0 && self.scale == Vec2::new(1.0, 1.0) {
            return Rect::new(point.x, point.y, self.width, self.height).overlaps(&view);
        }

        let half_width = self.width / 2.0;
        let half_height = self.height / 2.0;
        let radius = half_width.hypot(half_height) * self.scale.x.abs().max(self.scale.y.abs());
        let center = point + Vec2::new(half_width, half_height);

        center.x + radius > 0.0
            && center.x - radius < view.width
            && center.y + radius > 0.0
            && center.y - radius < view.height
    }

    /// Mark the sprite as gone; safe to call repeatedly
    pub fn destroy(&mut self) {
        self.exists = false;
        self.flicker_timer = 0.0;
        self.flicker = false;
    }
}
