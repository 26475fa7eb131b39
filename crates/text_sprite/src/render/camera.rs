//! # 2D Scrolling Camera
//!
//! Cameras are owned by a [`CameraRegistry`] and identified by slotmap keys,
//! so sprites can hold a list of the cameras they render to without
//! borrowing them.

use crate::foundation::color::Color;
use crate::foundation::math::{Rect, Vec2};
use slotmap::{new_key_type, SlotMap};

new_key_type! {
    /// Stable identifier of a registered camera
    pub struct CameraId;
}

/// 2D camera with a scroll position and a global tint
#[derive(Debug, Clone, PartialEq)]
pub struct Camera {
    /// Viewport width in pixels
    pub width: f32,

    /// Viewport height in pixels
    pub height: f32,

    /// World position shown at the top-left of the viewport
    pub scroll: Vec2,

    /// Global tint multiplied into everything drawn through this camera (RGB)
    pub color: Color,
}

impl Camera {
    /// Create an untinted camera at scroll (0, 0)
    pub fn new(width: f32, height: f32) -> Self {
        Self {
            width,
            height,
            scroll: Vec2::zeros(),
            color: Color::WHITE,
        }
    }

    /// Builder pattern: set the scroll position
    pub fn with_scroll(mut self, x: f32, y: f32) -> Self {
        self.scroll = Vec2::new(x, y);
        self
    }

    /// Builder pattern: set the global tint
    pub fn with_color(mut self, color: Color) -> Self {
        self.color = color;
        self
    }

    /// Move the camera
    pub fn set_scroll(&mut self, x: f32, y: f32) {
        self.scroll = Vec2::new(x, y);
        log::trace!("Camera scroll updated to: ({}, {})", x, y);
    }

    /// Viewport in screen space, origin at the top-left
    pub fn screen_rect(&self) -> Rect {
        Rect::new(0.0, 0.0, self.width, self.height)
    }

    /// World-space region visible for objects with a scroll factor of 1
    pub fn visible_region(&self) -> Rect {
        Rect::new(self.scroll.x, self.scroll.y, self.width, self.height)
    }
}

/// Owner of every camera in a scene
#[derive(Debug, Default)]
pub struct CameraRegistry {
    cameras: SlotMap<CameraId, Camera>,
}

impl CameraRegistry {
    /// Create an empty registry
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a camera and return its id
    pub fn add(&mut self, camera: Camera) -> CameraId {
        let id = self.cameras.insert(camera);
        log::debug!("Registered camera {:?}", id);
        id
    }

    /// Remove a camera; sprites still listing it simply stop matching
    pub fn remove(&mut self, id: CameraId) -> Option<Camera> {
        self.cameras.remove(id)
    }

    /// Look up a camera
    pub fn get(&self, id: CameraId) -> Option<&Camera> {
        self.cameras.get(id)
    }

    /// Look up a camera for modification
    pub fn get_mut(&mut self, id: CameraId) -> Option<&mut Camera> {
        self.cameras.get_mut(id)
    }

    /// Iterate cameras in registration order
    pub fn iter(&self) -> impl Iterator<Item = (CameraId, &Camera)> {
        self.cameras.iter()
    }

    /// Number of registered cameras
    pub fn len(&self) -> usize {
        self.cameras.len()
    }

    /// Whether no camera is registered
    pub fn is_empty(&self) -> bool {
        self.cameras.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_camera_defaults() {
        let camera = Camera::new(320.0, 240.0);
        assert_eq!(camera.color, Color::WHITE);
        assert_eq!(camera.scroll, Vec2::zeros());
        assert_eq!(camera.screen_rect(), Rect::new(0.0, 0.0, 320.0, 240.0));
    }

    #[test]
    fn test_visible_region_follows_scroll() {
        let camera = Camera::new(320.0, 240.0).with_scroll(100.0, 50.0);
        assert_eq!(camera.visible_region(), Rect::new(100.0, 50.0, 320.0, 240.0));
    }

    #[test]
    fn test_registry_ids_are_stable_after_removal() {
        let mut registry = CameraRegistry::new();
        let a = registry.add(Camera::new(10.0, 10.0));
        let b = registry.add(Camera::new(20.0, 20.0));

        assert!(registry.remove(a).is_some());
        assert!(registry.get(a).is_none());
        assert_eq!(registry.get(b).map(|c| c.width), Some(20.0));
        assert_eq!(registry.len(), 1);
    }
}
