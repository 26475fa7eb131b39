//! Rendering collaborators
//!
//! The text component never talks to a GPU. It draws through these
//! seams instead:
//! - [`Camera`]: scroll, global tint and viewport size
//! - [`BatchRenderer`]: shared transform, blend function and glyph submission
//! - [`RenderContext`]: everything one draw call is allowed to touch

pub mod camera;
pub mod batch_renderer;
pub mod context;

pub use camera::{Camera, CameraId, CameraRegistry};
pub use batch_renderer::{
    BatchRenderer, BatchStats, BlendFunction, DrawRecord, GlyphQuad, GlyphRun, RecordingBatch,
};
pub use context::{FrameStats, RenderContext};
