//! Math utilities and types
//!
//! Provides the 2D-oriented math types used by the sprite and text systems.
//! Screen space is Y-down with the origin at the top-left of the camera.

pub use nalgebra::{
    Vector2, Vector3,
    Matrix4,
};

/// 2D vector type
pub type Vec2 = Vector2<f32>;

/// 3D vector type
pub type Vec3 = Vector3<f32>;

/// 4x4 matrix type
pub type Mat4 = Matrix4<f32>;

/// 2D point type
pub type Point2 = nalgebra::Point2<f32>;

/// 3D point type
pub type Point3 = nalgebra::Point3<f32>;

/// Axis-aligned rectangle in pixels
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Rect {
    /// Left edge
    pub x: f32,
    /// Top edge
    pub y: f32,
    /// Width in pixels
    pub width: f32,
    /// Height in pixels
    pub height: f32,
}

impl Rect {
    /// Create a new rectangle
    pub const fn new(x: f32, y: f32, width: f32, height: f32) -> Self {
        Self { x, y, width, height }
    }

    /// Right edge (exclusive)
    pub fn right(&self) -> f32 {
        self.x + self.width
    }

    /// Bottom edge (exclusive)
    pub fn bottom(&self) -> f32 {
        self.y + self.height
    }

    /// Strict overlap test; touching edges do not count
    pub fn overlaps(&self, other: &Rect) -> bool {
        self.x < other.right()
            && other.x < self.right()
            && self.y < other.bottom()
            && other.y < self.bottom()
    }
}

/// Math constants
pub mod constants {
    /// Pi constant
    pub const PI: f32 = std::f32::consts::PI;

    /// Degrees to radians conversion factor
    pub const DEG_TO_RAD: f32 = PI / 180.0;

    /// Radians to degrees conversion factor
    pub const RAD_TO_DEG: f32 = 180.0 / PI;
}

/// Math utility functions
pub mod utils {
    use super::constants;

    /// Convert degrees to radians
    pub fn deg_to_rad(degrees: f32) -> f32 {
        degrees * constants::DEG_TO_RAD
    }

    /// Convert radians to degrees
    pub fn rad_to_deg(radians: f32) -> f32 {
        radians * constants::RAD_TO_DEG
    }

    /// Ceiling that returns an integer pixel count
    ///
    /// Negative inputs clamp to zero.
    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    pub fn ceil_px(value: f32) -> u32 {
        value.ceil().max(0.0) as u32
    }
}

/// Extension trait for Mat4 with 2D batch-transform helpers
pub trait Mat4Ext {
    /// Create a rotation matrix around the Z axis (radians)
    fn rotation_z(angle: f32) -> Mat4;

    /// Create a translation in the XY plane
    fn translation_2d(x: f32, y: f32) -> Mat4;

    /// Post-multiply a rotation of `degrees` about `center`
    ///
    /// Equivalent to translating to `center`, rotating about +Z and
    /// translating back, each step applied on the right of `self`.
    fn rotated_about(&self, center: Vec2, degrees: f32) -> Mat4;
}

impl Mat4Ext for Mat4 {
    fn rotation_z(angle: f32) -> Mat4 {
        Mat4::from_axis_angle(&Vec3::z_axis(), angle)
    }

    fn translation_2d(x: f32, y: f32) -> Mat4 {
        Mat4::new_translation(&Vec3::new(x, y, 0.0))
    }

    fn rotated_about(&self, center: Vec2, degrees: f32) -> Mat4 {
        self * Mat4::translation_2d(center.x, center.y)
            * Mat4::rotation_z(utils::deg_to_rad(degrees))
            * Mat4::translation_2d(-center.x, -center.y)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_rect_overlap_excludes_touching_edges() {
        let a = Rect::new(0.0, 0.0, 10.0, 10.0);
        assert!(a.overlaps(&Rect::new(5.0, 5.0, 10.0, 10.0)));
        assert!(!a.overlaps(&Rect::new(10.0, 0.0, 10.0, 10.0)));
        assert!(!a.overlaps(&Rect::new(0.0, -10.0, 10.0, 10.0)));
    }

    #[test]
    fn test_ceil_px() {
        assert_eq!(utils::ceil_px(12.0), 12);
        assert_eq!(utils::ceil_px(12.01), 13);
        assert_eq!(utils::ceil_px(-3.0), 0);
    }

    #[test]
    fn test_rotation_about_center_keeps_center_fixed() {
        let center = Vec2::new(30.0, 40.0);
        let m = Mat4::identity().rotated_about(center, 90.0);

        let fixed = m.transform_point(&Point3::new(30.0, 40.0, 0.0));
        assert_relative_eq!(fixed.x, 30.0, epsilon = 1e-4);
        assert_relative_eq!(fixed.y, 40.0, epsilon = 1e-4);

        let moved = m.transform_point(&Point3::new(31.0, 40.0, 0.0));
        assert_relative_eq!(moved.x, 30.0, epsilon = 1e-4);
        assert_relative_eq!(moved.y, 41.0, epsilon = 1e-4);
    }

    #[test]
    fn test_rotation_composes_on_the_right() {
        let base = Mat4::translation_2d(5.0, 0.0);
        let m = base.rotated_about(Vec2::zeros(), 180.0);
        let p = m.transform_point(&Point3::new(1.0, 0.0, 0.0));
        assert_relative_eq!(p.x, 4.0, epsilon = 1e-4);
        assert_relative_eq!(p.y, 0.0, epsilon = 1e-4);
    }
}
