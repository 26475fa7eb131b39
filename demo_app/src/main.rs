//! Text sprite demo application
//!
//! Builds a small HUD of text sprites, drives a few frames through two
//! cameras and logs every batch submission. Pass a `.toml` or `.ron`
//! file as the first argument to override the text defaults.

use text_sprite::foundation::logging;
use text_sprite::prelude::*;

/// Frames simulated by the demo
const FRAME_COUNT: u32 = 4;

/// Seconds per simulated frame
const FRAME_TIME: f32 = 1.0 / 60.0;

#[derive(Debug, thiserror::Error)]
enum DemoError {
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("Text error: {0}")]
    Text(#[from] TextError),

    #[error("Camera {0:?} is not registered")]
    MissingCamera(CameraId),
}

struct TextDemo {
    fonts: EmbeddedFontCache,
    cameras: CameraRegistry,
    main_camera: CameraId,
    minimap: CameraId,
    title: TextSprite,
    score: TextSprite,
    spinner: TextSprite,
    prompt: TextSprite,
    radar: TextSprite,
    points: u32,
}

impl TextDemo {
    fn new(config: TextConfig) -> Result<Self, DemoError> {
        log::info!("Creating text demo...");
        let mut fonts = EmbeddedFontCache::new();

        let mut cameras = CameraRegistry::new();
        let main_camera = cameras.add(Camera::new(320.0, 240.0));
        let minimap = cameras.add(
            Camera::new(160.0, 120.0)
                .with_scroll(40.0, 0.0)
                .with_color(Color(0xFF80_C0FF)),
        );

        let mut title = TextSprite::with_config(0.0, 8.0, 320, "RUSTEROIDS", true, &mut fonts, config.clone())?;
        title.apply_format(
            &mut fonts,
            &FormatUpdate::new()
                .size(16)
                .color(Color(0x00FF_D040))
                .alignment(Alignment::Center)
                .shadow_color(Color::BLACK)
                .shadow_offset(2.0, 2.0),
        )?;
        title.base.scroll_factor = Vec2::zeros();

        let mut score = TextSprite::with_config(220.0, 8.0, 96, "SCORE 0", true, &mut fonts, config.clone())?;
        score.set_alignment("right")?;
        score.base.scroll_factor = Vec2::zeros();

        let mut spinner = TextSprite::with_config(120.0, 100.0, 80, "SPIN", true, &mut fonts, config.clone())?;
        spinner.set_color(Color(0x0040_FFFF));
        spinner.base.blend = Some(BlendFunction::ADDITIVE);

        let mut prompt = TextSprite::with_config(60.0, 200.0, 200, "PRESS START", true, &mut fonts, config.clone())?;
        prompt.set_alignment("center")?;
        prompt.base.flicker(-1.0);

        let mut radar = TextSprite::with_config(50.0, 50.0, 60, "contact bearing 042", true, &mut fonts, config)?;
        radar.base.cameras = Some(vec![minimap]);

        log::info!(
            "Created {} cameras; title is {}x{} px",
            cameras.len(),
            title.base.width,
            title.base.height
        );

        Ok(Self {
            fonts,
            cameras,
            main_camera,
            minimap,
            title,
            score,
            spinner,
            prompt,
            radar,
            points: 0,
        })
    }

    fn update(&mut self, elapsed: f32) {
        self.points += 125;
        self.score.set_text(format!("SCORE {}", self.points));
        self.spinner.base.angle = (self.spinner.base.angle + 15.0) % 360.0;

        for sprite in self.sprites() {
            sprite.update(elapsed);
        }
    }

    fn sprites(&mut self) -> [&mut dyn Drawable; 5] {
        [
            &mut self.title,
            &mut self.score,
            &mut self.spinner,
            &mut self.prompt,
            &mut self.radar,
        ]
    }

    fn render_camera(
        &mut self,
        camera_id: CameraId,
        batch: &mut RecordingBatch,
        overlay: Option<&mut DebugDrawSystem>,
    ) -> Result<FrameStats, DemoError> {
        let camera = self
            .cameras
            .get(camera_id)
            .cloned()
            .ok_or(DemoError::MissingCamera(camera_id))?;
        let mut stats = FrameStats::default();

        {
            let mut ctx = RenderContext::new(camera_id, &camera, batch, &mut stats);
            if let Some(overlay) = overlay {
                ctx = ctx.with_debug_overlay(overlay);
            }
            for sprite in self.sprites() {
                sprite.draw(&mut ctx);
            }
        }

        Ok(stats)
    }

    fn run(&mut self) -> Result<(), DemoError> {
        let mut batch = RecordingBatch::new();
        let mut overlay = DebugDrawSystem::new();

        for frame in 0..FRAME_COUNT {
            self.update(FRAME_TIME);

            for (name, camera_id) in [("main", self.main_camera), ("minimap", self.minimap)] {
                batch.begin();
                overlay.clear();

                let debug = (frame == 0 && camera_id == self.main_camera).then_some(&mut overlay);
                let stats = self.render_camera(camera_id, &mut batch, debug)?;

                log::info!(
                    "Frame {} [{}]: {} visible, {} passes, {} quads",
                    frame,
                    name,
                    stats.visible_count,
                    stats.draw_passes,
                    batch.stats().quads
                );
                for draw in batch.draws() {
                    log::debug!(
                        "  {} quads at ({:.1}, {:.1}) color {:?} blend {:?}",
                        draw.quads.len(),
                        draw.origin.x,
                        draw.origin.y,
                        draw.color,
                        draw.blend
                    );
                }
                if !overlay.shapes().is_empty() {
                    log::debug!("  {} debug boxes", overlay.shapes().len());
                }
            }
        }

        log::info!(
            "Fonts resolved: {}; final score label '{}' ({} line(s))",
            self.fonts.loaded_count(),
            self.score.text(),
            self.score.line_count()
        );
        Ok(())
    }
}

fn load_config() -> Result<TextConfig, DemoError> {
    match std::env::args().nth(1) {
        Some(path) => {
            log::info!("Loading text configuration from {}", path);
            let config = TextConfig::load_from_file(&path)?;
            config.validate()?;
            Ok(config)
        }
        None => Ok(TextConfig::default()),
    }
}

fn main() {
    logging::init_with_level("info");
    log::info!("Starting text sprite demo");

    let result = load_config()
        .and_then(TextDemo::new)
        .and_then(|mut demo| demo.run());

    match result {
        Ok(()) => log::info!("Demo finished"),
        Err(e) => {
            log::error!("Demo failed: {}", e);
            std::process::exit(1);
        }
    }
}
