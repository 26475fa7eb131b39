//! Draw compositor
//!
//! Per-frame draw protocol of a text sprite: an optional shadow pass then
//! the main pass, both tinted by the camera and submitted to the shared
//! batch. Rotation and custom blending touch the batch's shared state and
//! are put back before returning.

use super::font_cache::BitmapFont;
use super::text_sprite::TextContent;
use crate::foundation::color::{Color, CHANNEL_SCALE};
use crate::foundation::math::{Mat4Ext, Vec2};
use crate::render::{BatchRenderer, BlendFunction, GlyphRun, RenderContext};
use crate::sprite::{SpriteBase, SpriteContent};

/// Bias applied to draw coordinates to keep glyph edges off pixel seams
const SUBPIXEL_NUDGE: f32 = 1e-7;

fn nudge(value: f32) -> f32 {
    if value > 0.0 {
        value + SUBPIXEL_NUDGE
    } else {
        value - SUBPIXEL_NUDGE
    }
}

/// RGB of `color` tinted by `tint`, normalized, with `alpha` appended
fn pass_color(color: Color, tint: Color, alpha: f32) -> [f32; 4] {
    let [r, g, b] = color.multiply(tint).rgb_normalized();
    [r, g, b, alpha]
}

/// Submit one pass, swapping in `blend` and restoring alpha blending after
fn submit(batch: &mut dyn BatchRenderer, blend: Option<BlendFunction>, run: &GlyphRun<'_>) {
    match blend {
        Some(blend) => {
            batch.set_blend_function(blend);
            batch.draw_glyphs(run);
            batch.set_blend_function(BlendFunction::ALPHA);
        }
        None => batch.draw_glyphs(run),
    }
}

impl SpriteContent for TextContent {
    fn is_drawable(&self) -> bool {
        self.layout.is_some()
    }

    fn draw(&mut self, base: &SpriteBase, ctx: &mut RenderContext<'_>) -> usize {
        let Some(engine) = self.layout.as_ref() else {
            return 0;
        };

        let screen = base.screen_position(ctx.camera);
        let point = Vec2::new(nudge(screen.x), nudge(screen.y));

        let saved_transform = if base.angle == 0.0 {
            None
        } else {
            let prior = ctx.batch.transform_matrix();
            let center = point + Vec2::new(base.width / 2.0, base.height / 2.0);
            ctx.batch.set_transform_matrix(prior.rotated_about(center, base.angle));
            Some(prior)
        };

        let font: &BitmapFont = engine.font();
        let glyphs = &engine.layout().glyphs;
        let tint = ctx.camera.color;
        let mut passes = 0;

        if self.format.shadow_enabled() {
            let alpha = f32::from(self.format.shadow_color.alpha()) * base.alpha() * CHANNEL_SCALE;
            let run = GlyphRun {
                font,
                glyphs,
                origin: point + self.format.shadow_offset,
                color: pass_color(self.format.shadow_color, tint, alpha),
            };
            submit(&mut *ctx.batch, base.blend, &run);
            passes += 1;
        }

        let run = GlyphRun {
            font,
            glyphs,
            origin: point,
            color: pass_color(self.format.color, tint, base.alpha()),
        };
        submit(&mut *ctx.batch, base.blend, &run);
        passes += 1;

        if let Some(prior) = saved_transform {
            ctx.batch.set_transform_matrix(prior);
        }

        log::trace!(
            "Text '{}' drawn in {} pass(es) at ({:.2}, {:.2})",
            self.text,
            passes,
            point.x,
            point.y
        );

        passes
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_nudge_follows_sign() {
        assert_relative_eq!(nudge(0.5), 0.5 + 1e-7);
        assert_relative_eq!(nudge(-0.5), -0.5 - 1e-7);
        assert!(nudge(0.0) < 0.0);
    }

    #[test]
    fn test_pass_color_multiplies_rgb_and_keeps_alpha() {
        let color = pass_color(Color(0x00FF_8000), Color(0xFF80_80FF), 0.25);
        assert_relative_eq!(color[0], 128.0 * CHANNEL_SCALE);
        assert_relative_eq!(color[1], 64.0 * CHANNEL_SCALE);
        assert_relative_eq!(color[2], 0.0);
        assert_relative_eq!(color[3], 0.25);
    }
}
