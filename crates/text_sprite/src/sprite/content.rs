//! Content providers and the generic draw gate

use super::SpriteBase;
use crate::render::RenderContext;

/// Why a sprite produced no output this frame
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SkipReason {
    /// Not visible, or destroyed
    Hidden,
    /// Hidden phase of a flicker
    Flicker,
    /// Content has nothing to draw
    NoContent,
    /// The active camera is not in the sprite's camera list
    CameraExcluded,
    /// Outside the camera viewport
    OffScreen,
}

/// Result of one draw call
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DrawOutcome {
    /// Nothing was submitted
    Skipped(SkipReason),
    /// Content submitted `passes` batch draws
    Drawn {
        /// Number of batch submissions
        passes: usize,
    },
}

impl DrawOutcome {
    /// Number of batch submissions made
    pub fn passes(&self) -> usize {
        match self {
            Self::Skipped(_) => 0,
            Self::Drawn { passes } => *passes,
        }
    }
}

/// Sprite-kind specific layout and drawing
pub trait SpriteContent {
    /// Whether there is anything to draw at all
    fn is_drawable(&self) -> bool {
        true
    }

    /// Draw for the context's camera; returns the number of batch submissions
    ///
    /// Called only after the generic visibility checks passed. Any change
    /// to the batch's shared state must be undone before returning.
    fn draw(&mut self, base: &SpriteBase, ctx: &mut RenderContext<'_>) -> usize;
}

/// Anything a scene can update and draw
pub trait Drawable {
    /// Advance by `elapsed` seconds
    fn update(&mut self, elapsed: f32);

    /// Draw for one camera
    fn draw(&mut self, ctx: &mut RenderContext<'_>) -> DrawOutcome;
}

/// A sprite base paired with its content
#[derive(Debug, Clone)]
pub struct Sprite<C> {
    /// Placement and visibility
    pub base: SpriteBase,
    pub(crate) content: C,
}

impl<C: SpriteContent> Sprite<C> {
    /// Pair a base with content
    pub fn from_parts(base: SpriteBase, content: C) -> Self {
        Self { base, content }
    }

    /// Content provider
    pub fn content(&self) -> &C {
        &self.content
    }

    /// Content provider, mutable
    pub fn content_mut(&mut self) -> &mut C {
        &mut self.content
    }

    /// Draw through the context's camera
    ///
    /// Order: visibility, flicker phase, content presence, camera list,
    /// viewport test. Only then is the content asked to draw; afterwards
    /// the visible counter is bumped and the debug overlay invoked.
    pub fn draw(&mut self, ctx: &mut RenderContext<'_>) -> DrawOutcome {
        if !self.base.exists || !self.base.visible {
            return DrawOutcome::Skipped(SkipReason::Hidden);
        }

        if self.base.advance_flicker() {
            return DrawOutcome::Skipped(SkipReason::Flicker);
        }

        if !self.content.is_drawable() {
            return DrawOutcome::Skipped(SkipReason::NoContent);
        }

        if !self.base.renders_to(ctx.camera_id) {
            return DrawOutcome::Skipped(SkipReason::CameraExcluded);
        }

        if !self.base.on_screen(ctx.camera) {
            return DrawOutcome::Skipped(SkipReason::OffScreen);
        }

        let passes = self.content.draw(&self.base, ctx);

        ctx.stats.visible_count += 1;
        ctx.stats.draw_passes += passes;

        if ctx.visual_debug && !self.base.ignore_draw_debug {
            if let Some(overlay) = ctx.debug_overlay.as_deref_mut() {
                overlay.draw_debug(&self.base, ctx.camera);
            }
        }

        DrawOutcome::Drawn { passes }
    }
}

impl<C: SpriteContent> Drawable for Sprite<C> {
    fn update(&mut self, elapsed: f32) {
        self.base.update(elapsed);
    }

    fn draw(&mut self, ctx: &mut RenderContext<'_>) -> DrawOutcome {
        Sprite::draw(self, ctx)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::debug::DebugDrawSystem;
    use crate::render::{Camera, CameraRegistry, FrameStats, RecordingBatch};

    /// Content that submits a fixed number of empty passes
    struct Passes(usize);

    impl SpriteContent for Passes {
        fn draw(&mut self, _base: &SpriteBase, _ctx: &mut RenderContext<'_>) -> usize {
            self.0
        }
    }

    fn sprite(passes: usize) -> Sprite<Passes> {
        let mut base = SpriteBase::new(10.0, 10.0);
        base.width = 20.0;
        base.height = 20.0;
        Sprite::from_parts(base, Passes(passes))
    }

    #[test]
    fn test_drawn_sprite_updates_frame_stats() {
        let mut cameras = CameraRegistry::new();
        let id = cameras.add(Camera::new(100.0, 100.0));
        let camera = cameras.get(id).unwrap();
        let mut batch = RecordingBatch::new();
        let mut stats = FrameStats::default();
        let mut ctx = RenderContext::new(id, camera, &mut batch, &mut stats);

        let mut sprite = sprite(2);
        assert_eq!(sprite.draw(&mut ctx), DrawOutcome::Drawn { passes: 2 });
        assert_eq!(stats, FrameStats { visible_count: 1, draw_passes: 2 });
    }

    #[test]
    fn test_gating_order() {
        let mut cameras = CameraRegistry::new();
        let id = cameras.add(Camera::new(100.0, 100.0));
        let other = cameras.add(Camera::new(100.0, 100.0));
        let camera = cameras.get(id).unwrap();
        let mut batch = RecordingBatch::new();
        let mut stats = FrameStats::default();
        let mut ctx = RenderContext::new(id, camera, &mut batch, &mut stats);

        let mut hidden = sprite(1);
        hidden.base.visible = false;
        assert_eq!(hidden.draw(&mut ctx), DrawOutcome::Skipped(SkipReason::Hidden));

        let mut excluded = sprite(1);
        excluded.base.cameras = Some(vec![other]);
        assert_eq!(excluded.draw(&mut ctx), DrawOutcome::Skipped(SkipReason::CameraExcluded));

        let mut far = sprite(1);
        far.base.position.x = 500.0;
        assert_eq!(far.draw(&mut ctx), DrawOutcome::Skipped(SkipReason::OffScreen));

        let mut flickering = sprite(1);
        flickering.base.flicker(1.0);
        assert_eq!(flickering.draw(&mut ctx), DrawOutcome::Skipped(SkipReason::Flicker));
        assert_eq!(flickering.draw(&mut ctx), DrawOutcome::Drawn { passes: 1 });

        assert_eq!(stats.visible_count, 1);
    }

    #[test]
    fn test_debug_overlay_respects_opt_out() {
        let mut cameras = CameraRegistry::new();
        let id = cameras.add(Camera::new(100.0, 100.0));
        let camera = cameras.get(id).unwrap();
        let mut batch = RecordingBatch::new();
        let mut stats = FrameStats::default();
        let mut overlay = DebugDrawSystem::new();

        {
            let mut ctx = RenderContext::new(id, camera, &mut batch, &mut stats)
                .with_debug_overlay(&mut overlay);
            let mut shown = sprite(1);
            let mut opted_out = sprite(1);
            opted_out.base.ignore_draw_debug = true;
            shown.draw(&mut ctx);
            opted_out.draw(&mut ctx);
        }

        assert_eq!(overlay.shapes().len(), 1);
    }

    #[test]
    fn test_polymorphic_dispatch() {
        let mut cameras = CameraRegistry::new();
        let id = cameras.add(Camera::new(100.0, 100.0));
        let camera = cameras.get(id).unwrap();
        let mut batch = RecordingBatch::new();
        let mut stats = FrameStats::default();
        let mut ctx = RenderContext::new(id, camera, &mut batch, &mut stats);

        let mut scene: Vec<Box<dyn Drawable>> = vec![Box::new(sprite(1)), Box::new(sprite(2))];
        let total: usize = scene.iter_mut().map(|s| s.draw(&mut ctx).passes()).sum();
        assert_eq!(total, 3);
    }
}
