//! Per-draw render context
//!
//! Bundles the camera being drawn, the shared batch state and the frame
//! counters into one value that is handed to every draw call.

use super::{BatchRenderer, Camera, CameraId};
use crate::debug::DebugOverlay;

/// Frame counters filled in by draw calls
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct FrameStats {
    /// Sprites that produced output this frame
    pub visible_count: usize,

    /// Batch submissions issued by those sprites
    pub draw_passes: usize,
}

impl FrameStats {
    /// Zero all counters
    pub fn reset(&mut self) {
        *self = Self::default();
    }
}

/// Everything a single draw call may read or mutate
pub struct RenderContext<'a> {
    /// Id of the camera being drawn
    pub camera_id: CameraId,

    /// The camera being drawn
    pub camera: &'a Camera,

    /// Shared batch state
    pub batch: &'a mut dyn BatchRenderer,

    /// Frame counters
    pub stats: &'a mut FrameStats,

    /// Whether debug bounding boxes should be drawn
    pub visual_debug: bool,

    /// Receiver for debug drawing, if any
    pub debug_overlay: Option<&'a mut dyn DebugOverlay>,
}

impl<'a> RenderContext<'a> {
    /// Create a context without visual debugging
    pub fn new(
        camera_id: CameraId,
        camera: &'a Camera,
        batch: &'a mut dyn BatchRenderer,
        stats: &'a mut FrameStats,
    ) -> Self {
        Self {
            camera_id,
            camera,
            batch,
            stats,
            visual_debug: false,
            debug_overlay: None,
        }
    }

    /// Enable visual debugging through `overlay`
    pub fn with_debug_overlay(mut self, overlay: &'a mut dyn DebugOverlay) -> Self {
        self.visual_debug = true;
        self.debug_overlay = Some(overlay);
        self
    }
}
