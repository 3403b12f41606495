use eframe::egui;
use easel_core::scene::{AnyScene, StartScene};
use easel_core::{ConfigError, EngineConfig, FrameController, Key};
use easel_protocol::{DrawState, RecordingSurface, Viewport};

use crate::renderer::{self, Placement};

/// Native host: runs the frame controller against a recording surface and
/// replays each tick onto the central panel.
pub struct EaselApp {
    controller: FrameController,
    surface: RecordingSurface,
    /// Last size and scale handed to the controller.
    viewport: Option<(Viewport, f32)>,
}

impl EaselApp {
    pub fn new(cc: &eframe::CreationContext<'_>, config: EngineConfig) -> Result<Self, ConfigError> {
        cc.egui_ctx.set_visuals(egui::Visuals::light());
        let mut controller = FrameController::new(config)?;
        controller.set_scene(AnyScene::Start(StartScene::new(config)));
        Ok(Self {
            controller,
            surface: RecordingSurface::new(),
            viewport: None,
        })
    }

    fn sync_viewport(&mut self, size: egui::Vec2, pixels_per_point: f32) {
        let viewport = Viewport::new(f64::from(size.x), f64::from(size.y));
        if self.viewport != Some((viewport, pixels_per_point)) {
            self.viewport = Some((viewport, pixels_per_point));
            self.controller
                .request_resize(viewport, f64::from(pixels_per_point));
        }
    }

    fn route_keys(&mut self, ctx: &egui::Context) {
        let keys: Vec<Key> = ctx.input(|i| {
            i.events
                .iter()
                .filter_map(|event| match event {
                    egui::Event::Key {
                        key, pressed: true, ..
                    } => Some(map_key(*key)),
                    _ => None,
                })
                .collect()
        });
        for key in keys {
            let outcome = self.controller.key_down(&key);
            tracing::trace!(?key, ?outcome, "keydown");
        }
    }
}

fn map_key(key: egui::Key) -> Key {
    match key {
        egui::Key::Escape => Key::Escape,
        egui::Key::Enter => Key::Enter,
        egui::Key::Space => Key::Space,
        other => Key::Named(other.name().into()),
    }
}

impl eframe::App for EaselApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        self.route_keys(ctx);

        egui::CentralPanel::default()
            .frame(egui::Frame::NONE)
            .show(ctx, |ui| {
                let area = ui.max_rect();
                let pixels_per_point = ctx.pixels_per_point();
                self.sync_viewport(area.size(), pixels_per_point);

                let response = ui.allocate_rect(area, egui::Sense::click());
                if response.clicked()
                    && let Some(pos) = response.interact_pointer_pos()
                {
                    let local = pos - area.min;
                    let outcome = self
                        .controller
                        .click(f64::from(local.x), f64::from(local.y));
                    tracing::trace!(x = local.x, y = local.y, ?outcome, "click");
                }

                // A resize inside the tick resets the surface, so the
                // commands then start from a fresh context.
                let before = self.surface.state().clone();
                let resizes = self.surface.resize_count();
                self.controller.tick(&mut self.surface);
                let initial = if self.surface.resize_count() == resizes {
                    before
                } else {
                    DrawState::default()
                };

                let commands = self.surface.take_commands();
                renderer::render_commands(
                    &ui.painter_at(area),
                    &commands,
                    initial,
                    Placement {
                        origin: area.min,
                        pixels_per_point,
                    },
                );
            });

        // Continuous loop, like requestAnimationFrame.
        ctx.request_repaint();
    }
}
