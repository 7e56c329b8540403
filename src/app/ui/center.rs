use super::super::CircleMarkApp;
use egui::{Align2, Color32, FontId, Rect, Sense, pos2};

impl CircleMarkApp {
    pub(crate) fn ui_central_image(&mut self, ui: &mut egui::Ui) {
        let dropped = ui.input(|i| {
            i.raw
                .dropped_files
                .iter()
                .find_map(|f| f.path.clone())
        });
        if let Some(path) = dropped {
            self.start_loading_image_from_path(path);
        }

        let Some(texture_id) = self.image.as_ref().map(|img| img.texture.id()) else {
            self.pointer_data = None;
            ui.centered_and_justified(|ui| {
                ui.label("Open an image (Ctrl+O) or drop one here.");
            });
            return;
        };

        let (rect, response) = ui.allocate_exact_size(ui.available_size(), Sense::click_and_drag());
        self.view.set_viewport(rect);
        self.handle_canvas_input(&response, ui);

        let painter = ui.painter_at(rect);
        let uv = Rect::from_min_max(pos2(0.0, 0.0), pos2(1.0, 1.0));
        painter.image(texture_id, self.view.image_rect(), uv, Color32::WHITE);
        self.glyphs.paint(&painter, &self.view, &self.config);

        if let Some(pos) = response.hover_pos() {
            let stroke = self.config.crosshair.stroke();
            painter.hline(rect.x_range(), pos.y, stroke);
            painter.vline(pos.x, rect.y_range(), stroke);
        }

        if self.pending_image_task.is_some() {
            painter.text(
                rect.center(),
                Align2::CENTER_CENTER,
                "Loading…",
                FontId::proportional(18.0),
                ui.visuals().strong_text_color(),
            );
        }
    }
}
