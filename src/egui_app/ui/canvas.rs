//! Drawing surface: guide grid, painted cells and pointer translation.

use eframe::egui::{self, Painter, Pos2, Rect, Response, Sense, Ui, Vec2};

use super::EguiApp;
use super::style;
use crate::capture::{CANVAS_WIDTH, LogicalBitmap, PIXEL_WIDTH, PointerEvent, TRANSLATED_WIDTH};

impl EguiApp {
    /// Allocate the surface, feed pointer input to the controller and repaint it.
    pub(super) fn render_canvas(&mut self, ui: &mut Ui) {
        let side = CANVAS_WIDTH * self.display_scale;
        let (response, painter) = ui.allocate_painter(Vec2::splat(side), Sense::click_and_drag());
        let accepts_input = self.controller.ui.notices.is_empty();
        for event in pointer_events(ui, &response, self.display_scale, accepts_input) {
            self.controller.pointer_event(event);
        }
        paint_surface(
            &painter,
            response.rect,
            self.display_scale,
            self.controller.capture().bitmap(),
        );
    }
}

fn pointer_events(ui: &Ui, response: &Response, scale: f32, accepts_input: bool) -> Vec<PointerEvent> {
    let (pressed, held, released, position) = ui.input(|i| {
        (
            i.pointer.primary_pressed(),
            i.pointer.primary_down(),
            i.pointer.primary_released(),
            i.pointer.interact_pos(),
        )
    });
    let mut events = Vec::new();
    if let Some(position) = position.filter(|_| accepts_input) {
        let (x, y) = to_surface(response.rect.min, scale, position);
        if pressed && response.rect.contains(position) {
            events.push(PointerEvent::Down { x, y });
        } else if held {
            events.push(PointerEvent::Move { x, y });
        }
    }
    if released {
        events.push(PointerEvent::Up);
    }
    events
}

/// Screen position to surface units relative to the surface origin.
pub(super) fn to_surface(origin: Pos2, scale: f32, position: Pos2) -> (f32, f32) {
    let local = (position - origin) / scale;
    (local.x, local.y)
}

/// Clear, draw the guide grid, then overdraw painted cells.
///
/// Everything is derived from the bitmap, so repeating it yields the same frame.
fn paint_surface(painter: &Painter, rect: Rect, scale: f32, bitmap: &LogicalBitmap) {
    painter.rect_filled(rect, 0.0, style::palette().surface);
    for segment in guide_segments(rect.min, scale) {
        painter.line_segment(segment, style::guide_stroke());
    }
    let cell_side = Vec2::splat(PIXEL_WIDTH * scale);
    for cell in bitmap.painted_cells() {
        let (x, y) = cell.origin();
        let min = rect.min + egui::vec2(x, y) * scale;
        painter.rect_filled(Rect::from_min_size(min, cell_side), 0.0, style::FILL);
    }
}

/// Vertical and horizontal guide lines at every cell boundary, edges included.
pub(super) fn guide_segments(origin: Pos2, scale: f32) -> Vec<[Pos2; 2]> {
    let extent = CANVAS_WIDTH * scale;
    (0..=TRANSLATED_WIDTH)
        .flat_map(|step| {
            let offset = step as f32 * PIXEL_WIDTH * scale;
            [
                [
                    origin + egui::vec2(offset, 0.0),
                    origin + egui::vec2(offset, extent),
                ],
                [
                    origin + egui::vec2(0.0, offset),
                    origin + egui::vec2(extent, offset),
                ],
            ]
        })
        .collect()
}
