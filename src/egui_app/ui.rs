//! egui renderer for the capture widget.

mod canvas;
mod notice;
pub mod style;

use crate::capture::BATCH_SIZE;
use crate::config::{self, AppConfig};
use crate::egui_app::controller::EguiController;
use eframe::egui::{self, Frame, RichText, Ui};

/// Smallest window that still fits the surface at scale 1.
pub const MIN_VIEWPORT_SIZE: egui::Vec2 = egui::vec2(320.0, 360.0);

/// Renders the egui UI using the shared controller state.
pub struct EguiApp {
    controller: EguiController,
    display_scale: f32,
    visuals_set: bool,
    repaint_attached: bool,
}

impl EguiApp {
    /// Create the app from the persisted configuration.
    pub fn new() -> Result<Self, String> {
        let config =
            config::load_or_default().map_err(|err| format!("Failed to load config: {err}"))?;
        Ok(Self::with_config(&config))
    }

    pub fn with_config(config: &AppConfig) -> Self {
        Self::with_controller(
            EguiController::from_config(config),
            config.canvas.display_scale,
        )
    }

    pub fn with_controller(controller: EguiController, display_scale: f32) -> Self {
        Self {
            controller,
            display_scale,
            visuals_set: false,
            repaint_attached: false,
        }
    }

    fn apply_visuals(&mut self, ctx: &egui::Context) {
        if self.visuals_set {
            return;
        }
        let mut visuals = egui::Visuals::dark();
        style::apply_visuals(&mut visuals);
        ctx.set_visuals(visuals);
        self.visuals_set = true;
    }

    fn render_status(&mut self, ctx: &egui::Context) {
        let palette = style::palette();
        egui::TopBottomPanel::bottom("status_bar")
            .frame(Frame::new().fill(palette.bg_primary))
            .show(ctx, |ui| {
                let status = &self.controller.ui.status;
                ui.horizontal(|ui| {
                    ui.add_space(8.0);
                    ui.painter().circle_filled(
                        ui.cursor().min + egui::vec2(9.0, 11.0),
                        9.0,
                        status.badge_color,
                    );
                    ui.add_space(24.0);
                    ui.label(RichText::new(&status.badge_label).color(palette.text_primary));
                    ui.separator();
                    ui.label(RichText::new(&status.text).color(palette.text_primary))
                        .on_hover_text(status.log_text());
                    if self.controller.ui.in_flight > 0 {
                        ui.separator();
                        ui.spinner();
                        ui.label(format!("{} in flight", self.controller.ui.in_flight));
                    }
                });
            });
    }

    fn render_controls(&mut self, ui: &mut Ui) {
        let palette = style::palette();
        ui.horizontal(|ui| {
            ui.label("Digit");
            ui.add(
                egui::TextEdit::singleline(&mut self.controller.ui.label_input)
                    .hint_text("0-9")
                    .desired_width(48.0),
            );
            if ui.button("Train").clicked() {
                self.controller.train();
            }
            if ui.button("Test").clicked() {
                self.controller.test();
            }
            if ui.button("Clear").clicked() {
                self.controller.reset_canvas();
            }
        });
        ui.label(
            RichText::new(format!(
                "{}/{BATCH_SIZE} training samples queued",
                self.controller.ui.queued_samples
            ))
            .color(palette.text_muted),
        );
    }
}

impl eframe::App for EguiApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        self.apply_visuals(ctx);
        if !self.repaint_attached {
            self.controller.attach_repaint_context(ctx.clone());
            self.repaint_attached = true;
        }
        self.controller.poll_background_jobs();

        self.render_status(ctx);
        egui::CentralPanel::default().show(ctx, |ui| {
            ui.heading("Draw a digit");
            ui.add_space(6.0);
            self.render_canvas(ui);
            ui.add_space(8.0);
            self.render_controls(ui);
        });
        self.render_notice(ctx);
    }
}
