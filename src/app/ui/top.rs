use super::super::CircleMarkApp;

impl CircleMarkApp {
    pub(crate) fn ui_top(&mut self, ui: &mut egui::Ui) {
        ui.horizontal(|ui| {
            egui::widgets::global_theme_preference_switch(ui);
            ui.separator();

            if ui
                .add(egui::Button::new("Open image…").shortcut_text("Ctrl+O"))
                .on_hover_text("Open an image (Ctrl+O). Drag & drop works too.")
                .clicked()
            {
                self.open_image_dialog();
            }
            if ui
                .add(egui::Button::new("Load data…").shortcut_text("Ctrl+L"))
                .on_hover_text("Replace all circles with an x,y,r table (CSV or Excel)")
                .clicked()
            {
                self.open_table_dialog();
            }
            if ui
                .add(egui::Button::new("Save data…").shortcut_text("Ctrl+S"))
                .on_hover_text("Save circles as CSV or Excel")
                .clicked()
            {
                self.start_save_table();
            }
            ui.separator();

            if ui
                .add_enabled(
                    self.controller.can_undo(),
                    egui::Button::new("Undo").shortcut_text("Ctrl+Z"),
                )
                .on_hover_text("Undo the last add or delete (Ctrl+Z / Backspace)")
                .clicked()
            {
                self.undo();
            }
            let has_image = self.image.is_some();
            if ui
                .add_enabled(has_image, egui::Button::new("Reset view").shortcut_text("Space"))
                .on_hover_text("Fit the whole image into the window (Space)")
                .clicked()
            {
                self.reset_view();
            }
            if has_image {
                ui.separator();
                ui.label(format!("Zoom {:.0}%", self.view.zoom() * 100.0));
            }
        });
    }
}
