//! Frame sizer
//!
//! Derives a text sprite's frame height from its measured layout.

use super::text_layout::TextBounds;
use crate::foundation::math::utils::ceil_px;

/// Computes frame height from layout bounds
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FrameSizer {
    padding: f32,
}

impl FrameSizer {
    /// Sizer adding `padding` pixels below the measured text
    pub fn new(padding: f32) -> Self {
        Self { padding }
    }

    /// Padding added before rounding
    pub fn padding(&self) -> f32 {
        self.padding
    }

    /// `ceil(bounds.height + padding)`
    pub fn frame_height(&self, bounds: &TextBounds) -> u32 {
        ceil_px(bounds.height + self.padding)
    }
}

impl Default for FrameSizer {
    fn default() -> Self {
        Self::new(7.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn bounds(height: f32) -> TextBounds {
        TextBounds { width: 0.0, height }
    }

    #[test]
    fn test_frame_height_rounds_up() {
        let sizer = FrameSizer::default();
        assert_eq!(sizer.frame_height(&bounds(5.0)), 12);
        assert_eq!(sizer.frame_height(&bounds(5.2)), 13);
        assert_eq!(sizer.frame_height(&bounds(15.0)), 22);
    }

    #[test]
    fn test_custom_padding() {
        let sizer = FrameSizer::new(0.0);
        assert_eq!(sizer.padding(), 0.0);
        assert_eq!(sizer.frame_height(&bounds(9.5)), 10);
    }
}
