use super::EguiApp;
use super::style;
use crate::egui_app::state::NoticeKind;
use eframe::egui::{self, Align2, RichText};

impl EguiApp {
    /// Show the front notice as a modal window until the user acknowledges it.
    pub(super) fn render_notice(&mut self, ctx: &egui::Context) {
        let Some(notice) = self.controller.ui.notices.current().cloned() else {
            return;
        };
        let waiting = self.controller.ui.notices.len() - 1;

        if ctx.input(|i| i.key_pressed(egui::Key::Enter) || i.key_pressed(egui::Key::Escape)) {
            self.controller.dismiss_notice();
            return;
        }

        let palette = style::palette();
        let mut dismissed = false;
        egui::Window::new(title(notice.kind))
            .id(egui::Id::new("digitpad_notice"))
            .anchor(Align2::CENTER_CENTER, egui::vec2(0.0, 0.0))
            .collapsible(false)
            .resizable(false)
            .default_width(320.0)
            .show(ctx, |ui| {
                let color = match notice.kind {
                    NoticeKind::Failure => palette.warning,
                    _ => palette.text_primary,
                };
                ui.label(RichText::new(&notice.message).color(color).size(16.0));
                if waiting > 0 {
                    ui.label(
                        RichText::new(format!("{waiting} more waiting")).color(palette.text_muted),
                    );
                }
                ui.add_space(8.0);
                if ui.button("OK").clicked() {
                    dismissed = true;
                }
            });
        if dismissed {
            self.controller.dismiss_notice();
        }
    }
}

fn title(kind: NoticeKind) -> &'static str {
    match kind {
        NoticeKind::Validation => "Check your input",
        NoticeKind::Prediction => "Prediction",
        NoticeKind::Failure => "Request failed",
    }
}
