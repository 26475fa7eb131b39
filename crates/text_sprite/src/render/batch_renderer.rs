//! # Batch Renderer
//!
//! The batch is the renderer's shared draw state: one transform matrix and
//! one blend function that every submission uses until someone changes
//! them. Components that change either must put the previous value back
//! before returning.
//!
//! ## Architecture
//!
//! - **BatchRenderer**: trait implemented by the real quad renderer
//! - **GlyphRun**: one tinted submission of laid-out glyphs
//! - **RecordingBatch**: in-memory batch that records every submission

use crate::foundation::math::{Mat4, Rect, Vec2};
use crate::text::font_cache::BitmapFont;
use crate::text::text_layout::PlacedGlyph;

/// OpenGL blend factor constants used by [`BlendFunction`]
pub mod gl {
    /// `GL_ONE`
    pub const ONE: u32 = 0x0001;
    /// `GL_SRC_ALPHA`
    pub const SRC_ALPHA: u32 = 0x0302;
    /// `GL_ONE_MINUS_SRC_ALPHA`
    pub const ONE_MINUS_SRC_ALPHA: u32 = 0x0303;
}

/// Source/destination blend factor pair
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct BlendFunction {
    /// Source factor
    pub src: u32,
    /// Destination factor
    pub dst: u32,
}

impl BlendFunction {
    /// Standard alpha blending; the batch's resting state
    pub const ALPHA: Self = Self::new(gl::SRC_ALPHA, gl::ONE_MINUS_SRC_ALPHA);

    /// Additive blending (for glowing effects)
    pub const ADDITIVE: Self = Self::new(gl::SRC_ALPHA, gl::ONE);

    /// Create a blend function from raw factors
    pub const fn new(src: u32, dst: u32) -> Self {
        Self { src, dst }
    }
}

impl Default for BlendFunction {
    fn default() -> Self {
        Self::ALPHA
    }
}

/// One submission of glyphs sharing a color
#[derive(Debug, Clone, Copy)]
pub struct GlyphRun<'a> {
    /// Font the glyph metrics come from
    pub font: &'a BitmapFont,

    /// Glyph positions relative to `origin`
    pub glyphs: &'a [PlacedGlyph],

    /// Screen-space draw position
    pub origin: Vec2,

    /// Draw color (RGBA, each in `[0, 1]`)
    pub color: [f32; 4],
}

/// Shared draw state and glyph submission
pub trait BatchRenderer {
    /// Current shared transform
    fn transform_matrix(&self) -> Mat4;

    /// Replace the shared transform
    fn set_transform_matrix(&mut self, matrix: Mat4);

    /// Current blend function
    fn blend_function(&self) -> BlendFunction;

    /// Replace the blend function
    fn set_blend_function(&mut self, blend: BlendFunction);

    /// Submit glyph quads with the current transform and blend function
    fn draw_glyphs(&mut self, run: &GlyphRun<'_>);
}

/// Screen-space quad for one glyph
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GlyphQuad {
    /// Character this quad renders
    pub ch: char,
    /// Quad rectangle before the batch transform
    pub rect: Rect,
}

/// Snapshot of one [`BatchRenderer::draw_glyphs`] call
#[derive(Debug, Clone, PartialEq)]
pub struct DrawRecord {
    /// Draw color (RGBA)
    pub color: [f32; 4],
    /// Draw position
    pub origin: Vec2,
    /// Generated quads
    pub quads: Vec<GlyphQuad>,
    /// Transform active during the draw
    pub transform: Mat4,
    /// Blend function active during the draw
    pub blend: BlendFunction,
}

/// Statistics for batch activity
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BatchStats {
    /// Number of draw submissions
    pub draw_calls: usize,

    /// Total glyph quads submitted
    pub quads: usize,

    /// Number of blend function changes
    pub blend_changes: usize,

    /// Number of transform changes
    pub transform_changes: usize,
}

impl BatchStats {
    /// Calculate average quads per draw call
    #[allow(clippy::cast_precision_loss)]
    pub fn avg_quads_per_draw(&self) -> f32 {
        if self.draw_calls == 0 {
            0.0
        } else {
            self.quads as f32 / self.draw_calls as f32
        }
    }
}

/// Batch that keeps every submission in memory
///
/// Used by the demo and by tests to observe draw order, colors and the
/// shared state each pass ran under.
#[derive(Debug, Clone)]
pub struct RecordingBatch {
    transform: Mat4,
    blend: BlendFunction,
    draws: Vec<DrawRecord>,
    stats: BatchStats,
}

impl RecordingBatch {
    /// Create a batch with an identity transform and alpha blending
    pub fn new() -> Self {
        Self::with_transform(Mat4::identity())
    }

    /// Create a batch with a specific starting transform
    pub fn with_transform(transform: Mat4) -> Self {
        Self {
            transform,
            blend: BlendFunction::ALPHA,
            draws: Vec::new(),
            stats: BatchStats::default(),
        }
    }

    /// Start a new frame: drop recorded draws and reset statistics
    pub fn begin(&mut self) {
        self.draws.clear();
        self.stats = BatchStats::default();
    }

    /// Draws recorded since the last [`begin`](Self::begin)
    pub fn draws(&self) -> &[DrawRecord] {
        &self.draws
    }

    /// Get current batch statistics
    pub fn stats(&self) -> &BatchStats {
        &self.stats
    }
}

impl Default for RecordingBatch {
    fn default() -> Self {
        Self::new()
    }
}

impl BatchRenderer for RecordingBatch {
    fn transform_matrix(&self) -> Mat4 {
        self.transform
    }

    fn set_transform_matrix(&mut self, matrix: Mat4) {
        self.transform = matrix;
        self.stats.transform_changes += 1;
    }

    fn blend_function(&self) -> BlendFunction {
        self.blend
    }

    fn set_blend_function(&mut self, blend: BlendFunction) {
        self.blend = blend;
        self.stats.blend_changes += 1;
    }

    fn draw_glyphs(&mut self, run: &GlyphRun<'_>) {
        let quads: Vec<GlyphQuad> = run
            .glyphs
            .iter()
            .filter_map(|placed| {
                let info = run.font.glyph(placed.ch)?;
                let min = run.origin + placed.position + info.bearing;
                Some(GlyphQuad {
                    ch: placed.ch,
                    rect: Rect::new(min.x, min.y, info.size.x, info.size.y),
                })
            })
            .collect();

        log::trace!(
            "Batch draw: {} quads at ({:.2}, {:.2}) color {:?}",
            quads.len(),
            run.origin.x,
            run.origin.y,
            run.color
        );

        self.stats.draw_calls += 1;
        self.stats.quads += quads.len();
        self.draws.push(DrawRecord {
            color: run.color,
            origin: run.origin,
            quads,
            transform: self.transform,
            blend: self.blend,
        });
    }
}
