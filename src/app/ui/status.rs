use super::super::CircleMarkApp;
use super::super::ui_state::display_name;
use egui::{Color32, RichText};

impl CircleMarkApp {
    pub(crate) fn ui_status_bar(&self, ui: &mut egui::Ui) {
        let circles = self.controller.store().len();
        let steps = self.controller.undo_depth();
        ui.horizontal(|ui| {
            if let Some(name) = self.image_label() {
                ui.label(
                    RichText::new(format!("File: {name}"))
                        .small()
                        .color(Color32::from_gray(200)),
                );
                ui.separator();
            }
            ui.label(
                RichText::new(format!("Circles: {circles}"))
                    .small()
                    .color(Color32::from_gray(180)),
            );
            ui.separator();
            ui.label(
                RichText::new(format!("Undo steps: {steps}"))
                    .small()
                    .color(Color32::from_gray(180)),
            );
            if let Some(p) = self.pointer_data {
                ui.separator();
                ui.label(
                    RichText::new(format!("x = {:.1}, y = {:.1}", p.x, p.y))
                        .small()
                        .monospace()
                        .color(Color32::from_gray(180)),
                );
            }
            if let Some(msg) = &self.last_status {
                ui.separator();
                ui.label(
                    RichText::new(msg.as_str())
                        .small()
                        .color(Color32::from_gray(200)),
                );
            }
        });
    }

    /// File name of the open image.
    pub(crate) fn image_label(&self) -> Option<String> {
        self.image_path.as_deref().map(display_name)
    }
}
