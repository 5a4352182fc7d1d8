#![deny(missing_docs)]
#![deny(warnings)]

//! Entry point for the digitpad capture window.
#![cfg_attr(
    all(not(debug_assertions), target_os = "windows"),
    windows_subsystem = "windows"
)]
use digitpad::capture::CANVAS_WIDTH;
use digitpad::egui_app::ui::{EguiApp, MIN_VIEWPORT_SIZE};
use digitpad::{config, logging};
use eframe::egui;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    if let Err(err) = logging::init() {
        eprintln!("Logging disabled: {err}");
    }

    let scale = config::load_or_default()
        .map(|config| config.canvas.display_scale)
        .unwrap_or(1.0);
    let viewport = egui::ViewportBuilder::default()
        .with_title("digitpad")
        .with_min_inner_size(MIN_VIEWPORT_SIZE)
        .with_inner_size(initial_window_size(scale));

    let native_options = eframe::NativeOptions {
        viewport,
        ..Default::default()
    };

    eframe::run_native(
        "digitpad",
        native_options,
        Box::new(|_cc| match EguiApp::new() {
            Ok(app) => Ok(Box::new(app)),
            Err(err) => {
                tracing::error!("{err}");
                Ok(Box::new(LaunchError { message: err }))
            }
        }),
    )?;
    Ok(())
}

/// Window size that fits the scaled surface plus controls and status bar.
fn initial_window_size(scale: f32) -> egui::Vec2 {
    let side = CANVAS_WIDTH * scale;
    egui::vec2(side + 48.0, side + 160.0).max(MIN_VIEWPORT_SIZE)
}

/// Minimal fallback app to display initialization errors.
struct LaunchError {
    message: String,
}

impl eframe::App for LaunchError {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        egui::CentralPanel::default().show(ctx, |ui| {
            ui.vertical_centered(|ui| {
                ui.heading("Failed to start UI");
                ui.label(&self.message);
            });
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn window_fits_scaled_surface() {
        let size = initial_window_size(2.0);
        assert!(size.x >= 400.0 && size.y >= 400.0);
        assert_eq!(initial_window_size(0.1), MIN_VIEWPORT_SIZE);
    }
}
