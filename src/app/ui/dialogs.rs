use super::super::CircleMarkApp;
use super::super::ui_state::NativeDialog;
use egui_file_dialog::{DialogState, FileDialog};
use std::path::Path;

impl CircleMarkApp {
    pub(crate) fn open_image_dialog(&mut self) {
        let mut dialog = Self::make_open_image_dialog(self.last_image_dir.as_deref());
        dialog.pick_file();
        self.show_dialog(NativeDialog::OpenImage(dialog));
    }

    pub(crate) fn open_table_dialog(&mut self) {
        let mut dialog = FileDialog::new()
            .title("Load circles")
            .add_file_filter_extensions("Circle tables", vec!["csv", "xlsx", "xls"])
            .add_file_filter_extensions("CSV", vec!["csv"])
            .add_file_filter_extensions("Excel", vec!["xlsx", "xls"])
            .default_file_filter("Circle tables");
        if let Some(dir) = self.last_data_dir.as_deref() {
            dialog = dialog.initial_directory(dir.to_path_buf());
        }
        dialog.pick_file();
        self.show_dialog(NativeDialog::OpenTable(dialog));
    }

    /// Ask where to save the circles. Nothing to save means no dialog at all.
    pub(crate) fn start_save_table(&mut self) {
        if self.controller.store().is_empty() {
            self.set_status("No circles to save");
            return;
        }
        let default_name = self
            .image_path
            .as_deref()
            .and_then(Path::file_stem)
            .map_or_else(
                || "circles.csv".to_string(),
                |stem| format!("{}.csv", stem.to_string_lossy()),
            );
        let mut dialog = Self::make_save_dialog(
            "Save circles",
            &default_name,
            &["csv", "xlsx"],
            self.last_data_dir.as_deref(),
        );
        dialog.save_file();
        self.show_dialog(NativeDialog::SaveTable(dialog));
    }

    /// Canvas input is ignored while a dialog is open; any drag in progress
    /// is dropped first.
    pub(crate) fn show_dialog(&mut self, dialog: NativeDialog) {
        self.cancel_drawing();
        self.active_dialog = Some(dialog);
    }

    fn make_open_image_dialog(initial_dir: Option<&Path>) -> FileDialog {
        // Keep in sync with enabled `image` crate features.
        let mut dialog = FileDialog::new()
            .title("Open image")
            .add_file_filter_extensions(
                "All images",
                vec!["png", "jpg", "jpeg", "bmp", "tiff", "tif", "gif", "webp"],
            )
            .add_file_filter_extensions("PNG", vec!["png"])
            .add_file_filter_extensions("JPEG/JPG", vec!["jpg", "jpeg"])
            .add_file_filter_extensions("TIFF", vec!["tiff", "tif"])
            .default_file_filter("All images");
        if let Some(dir) = initial_dir {
            dialog = dialog.initial_directory(dir.to_path_buf());
        }
        dialog
    }

    fn make_save_dialog(
        title: &str,
        default_name: &str,
        extensions: &[&str],
        initial_dir: Option<&Path>,
    ) -> FileDialog {
        let mut dialog = FileDialog::new()
            .title(title)
            .default_file_name(default_name);
        let mut first_label: Option<String> = None;
        for ext in extensions {
            let label = format!("*.{ext}");
            if first_label.is_none() {
                first_label = Some(label.clone());
            }
            dialog = dialog.add_save_extension(&label, ext);
        }
        if let Some(label) = first_label.as_deref() {
            dialog = dialog.default_save_extension(label);
        }
        if let Some(dir) = initial_dir {
            dialog = dialog.initial_directory(dir.to_path_buf());
        }
        dialog
    }

    /// Drive the open dialog, if any, and act on what the user picked.
    pub(crate) fn update_active_dialog(&mut self, ctx: &egui::Context) {
        let Some(active) = self.active_dialog.as_mut() else {
            return;
        };
        let dialog = match active {
            NativeDialog::OpenImage(d) | NativeDialog::OpenTable(d) | NativeDialog::SaveTable(d) => d,
        };
        dialog.update(ctx);
        let picked = dialog.take_picked();
        let finished = picked.is_some()
            || matches!(dialog.state(), DialogState::Cancelled | DialogState::Closed);
        if !finished {
            return;
        }

        let Some(done) = self.active_dialog.take() else {
            return;
        };
        match done {
            NativeDialog::OpenImage(_) => match picked {
                Some(path) => self.start_loading_image_from_path(path),
                None => self.set_status("Open canceled."),
            },
            NativeDialog::OpenTable(_) => self.finish_table_load(picked.as_deref()),
            NativeDialog::SaveTable(_) => self.finish_table_save(picked.as_deref()),
        }
    }
}
