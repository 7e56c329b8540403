use super::CircleMarkApp;
use crate::annot::{GestureState, PointerButton, PointerEvent, ScreenPoint};
use egui::{CursorIcon, Pos2};

/// Raw scroll points treated as one wheel notch.
const SCROLL_POINTS_PER_STEP: f32 = 50.0;

#[derive(Debug, Clone, Copy, Default)]
struct CanvasInput {
    pos: Option<Pos2>,
    draw_pressed: bool,
    delete_pressed: bool,
    draw_released: bool,
    scroll: f32,
}

const fn screen(p: Pos2) -> ScreenPoint {
    ScreenPoint::new(p.x, p.y)
}

impl CircleMarkApp {
    /// Turn this frame's egui input over the canvas into gesture events.
    pub(crate) fn handle_canvas_input(&mut self, response: &egui::Response, ui: &egui::Ui) {
        if self.active_dialog.is_some() {
            self.pointer_data = None;
            self.cancel_drawing();
            return;
        }

        let on_canvas = response.contains_pointer();
        let input = ui.input(|i| CanvasInput {
            pos: i.pointer.hover_pos(),
            draw_pressed: i.pointer.button_pressed(egui::PointerButton::Primary),
            delete_pressed: i.pointer.button_pressed(egui::PointerButton::Secondary),
            draw_released: i.pointer.button_released(egui::PointerButton::Primary),
            scroll: i.raw_scroll_delta.y,
        });
        let pos = input.pos.filter(|_| on_canvas);
        self.pointer_data = pos.map(|p| self.view.to_data(p));

        if response.dragged_by(egui::PointerButton::Middle) {
            self.view.pan_by(response.drag_delta());
            ui.ctx().set_cursor_icon(CursorIcon::Grabbing);
        } else if on_canvas {
            ui.ctx().set_cursor_icon(CursorIcon::Crosshair);
        }

        if let Some(p) = pos {
            if input.draw_pressed {
                self.dispatch(PointerEvent::Press {
                    button: PointerButton::Draw,
                    at: screen(p),
                });
            }
            if input.delete_pressed {
                self.dispatch(PointerEvent::Press {
                    button: PointerButton::Delete,
                    at: screen(p),
                });
            }
            if input.scroll.abs() > f32::EPSILON {
                let factor = self
                    .config
                    .zoom_step_factor()
                    .powf(input.scroll / SCROLL_POINTS_PER_STEP);
                self.view.zoom_at(p, factor);
            }
        }

        if matches!(self.controller.state(), GestureState::Drawing { .. }) {
            match pos {
                None => self.dispatch(PointerEvent::Leave),
                Some(p) if input.draw_released => self.dispatch(PointerEvent::Release {
                    button: PointerButton::Draw,
                    at: screen(p),
                }),
                Some(p) => self.dispatch(PointerEvent::Move { at: screen(p) }),
            }
        }
    }

    fn dispatch(&mut self, event: PointerEvent) {
        let outcome = self.controller.handle(event, &self.view, &mut self.glyphs);
        self.report_outcome(outcome);
    }
}
