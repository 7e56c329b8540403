//! eframe application: the host shell around the annotation engine.

use crate::annot::{DataPoint, GestureController, GestureOutcome};
use crate::config::AppConfig;
use crate::image::LoadedImage;
use crate::table;
use egui::{Context, Key};
use std::path::{Path, PathBuf};

mod glyphs;
mod image_loader;
mod interaction;
mod ui;
mod ui_state;
mod view;

use glyphs::GlyphLayer;
use ui_state::{NativeDialog, PendingImageTask};
use view::CanvasView;

/// Top-level application state: one image, its circles and the view onto it.
pub struct CircleMarkApp {
    config: AppConfig,
    controller: GestureController,
    glyphs: GlyphLayer,
    view: CanvasView,
    image: Option<LoadedImage>,
    image_path: Option<PathBuf>,
    pending_image_task: Option<PendingImageTask>,
    active_dialog: Option<NativeDialog>,
    pointer_data: Option<DataPoint>,
    last_status: Option<String>,
    last_image_dir: Option<PathBuf>,
    last_data_dir: Option<PathBuf>,
}

impl Default for CircleMarkApp {
    fn default() -> Self {
        Self::with_config(AppConfig::load())
    }
}

impl CircleMarkApp {
    pub fn with_config(config: AppConfig) -> Self {
        let view = CanvasView::new(config.zoom_range());
        Self {
            config,
            controller: GestureController::new(),
            glyphs: GlyphLayer::default(),
            view,
            image: None,
            image_path: None,
            pending_image_task: None,
            active_dialog: None,
            pointer_data: None,
            last_status: None,
            last_image_dir: None,
            last_data_dir: None,
        }
    }

    /// Create a new app and optionally queue an initial image load.
    pub fn new_with_initial_path(initial_path: Option<&Path>) -> Self {
        let mut app = Self::default();
        if let Some(p) = initial_path {
            app.start_loading_image_from_path(p.to_owned());
        }
        app
    }

    fn set_status(&mut self, msg: impl Into<String>) {
        self.last_status = Some(msg.into());
    }

    fn undo(&mut self) {
        if self.controller.undo(&mut self.glyphs) {
            let left = self.controller.undo_depth();
            self.set_status(format!("Undone ({left} steps left)."));
        } else {
            self.set_status("Nothing to undo.");
        }
    }

    fn reset_view(&mut self) {
        self.controller.reset_view(&mut self.view);
    }

    fn cancel_drawing(&mut self) {
        if self.controller.cancel(&mut self.glyphs) == GestureOutcome::Cancelled {
            self.set_status("Drawing canceled.");
        }
    }

    fn report_outcome(&mut self, outcome: GestureOutcome) {
        match outcome {
            GestureOutcome::Committed(rec) => self.set_status(format!(
                "Added circle #{} at ({:.1}, {:.1}), r = {:.1}",
                rec.id, rec.x, rec.y, rec.r
            )),
            GestureOutcome::Deleted(rec) => self.set_status(format!(
                "Deleted circle #{} at ({:.1}, {:.1})",
                rec.id, rec.x, rec.y
            )),
            GestureOutcome::Cancelled => self.set_status("Drawing canceled."),
            GestureOutcome::Ignored
            | GestureOutcome::DrawStarted
            | GestureOutcome::PreviewUpdated
            | GestureOutcome::Discarded
            | GestureOutcome::Missed => {}
        }
    }

    /// Start a fresh document for a newly loaded image.
    fn reset_document(&mut self) {
        self.controller.clear(&mut self.glyphs);
    }

    fn finish_table_load(&mut self, picked: Option<&Path>) {
        if let Some(path) = picked {
            self.last_data_dir = path.parent().map(Path::to_path_buf);
        }
        match table::load_selection(picked) {
            Ok(Some(records)) => {
                let count = records.len();
                self.controller.replace_all(records, &mut self.glyphs);
                self.set_status(format!("Loaded {count} circles."));
            }
            Ok(None) => {}
            Err(err) => {
                log::warn!("Load failed: {err}");
                self.set_status(format!("Load failed: {err}"));
            }
        }
    }

    fn finish_table_save(&mut self, picked: Option<&Path>) {
        if let Some(path) = picked {
            self.last_data_dir = path.parent().map(Path::to_path_buf);
        }
        match table::save_selection(picked, self.controller.store().list()) {
            Ok(Some(count)) => self.set_status(format!("Saved {count} circles.")),
            Ok(None) => {}
            Err(err) => {
                log::warn!("Save failed: {err}");
                self.set_status(format!("Save failed: {err}"));
            }
        }
    }

    fn handle_hotkeys(&mut self, ctx: &Context) {
        // Ignored while typing in text fields (e.g. the file dialog's name box).
        if ctx.wants_keyboard_input() || self.active_dialog.is_some() {
            return;
        }
        let (undo, reset, open_image, load_data, save_data, escape) = ctx.input(|i| {
            (
                i.key_pressed(Key::Backspace) || (i.key_pressed(Key::Z) && i.modifiers.command),
                i.key_pressed(Key::Space),
                i.key_pressed(Key::O) && i.modifiers.command,
                i.key_pressed(Key::L) && i.modifiers.command,
                i.key_pressed(Key::S) && i.modifiers.command,
                i.key_pressed(Key::Escape),
            )
        });
        if undo {
            self.undo();
        }
        if reset && self.image.is_some() {
            self.reset_view();
        }
        if open_image {
            self.open_image_dialog();
        }
        if load_data {
            self.open_table_dialog();
        }
        if save_data {
            self.start_save_table();
        }
        if escape {
            self.cancel_drawing();
        }
    }
}

impl eframe::App for CircleMarkApp {
    fn update(&mut self, ctx: &Context, _frame: &mut eframe::Frame) {
        self.poll_image_loader(ctx);
        self.handle_hotkeys(ctx);

        egui::TopBottomPanel::top("top").show(ctx, |ui| self.ui_top(ui));
        egui::TopBottomPanel::bottom("status").show(ctx, |ui| self.ui_status_bar(ui));
        egui::CentralPanel::default().show(ctx, |ui| self.ui_central_image(ui));

        self.update_active_dialog(ctx);

        if self.pending_image_task.is_some() {
            ctx.request_repaint();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::annot::{GestureState, PointerButton, PointerEvent, ScreenPoint};
    use egui::{Rect, pos2, vec2};
    use egui_file_dialog::FileDialog;

    fn app_mid_drag() -> CircleMarkApp {
        let mut app = CircleMarkApp::with_config(AppConfig::default());
        app.view
            .set_viewport(Rect::from_min_size(pos2(0.0, 0.0), vec2(400.0, 300.0)));
        let outcome = app.controller.handle(
            PointerEvent::Press {
                button: PointerButton::Draw,
                at: ScreenPoint::new(10.0, 10.0),
            },
            &app.view,
            &mut app.glyphs,
        );
        assert_eq!(outcome, GestureOutcome::DrawStarted);
        assert_eq!(app.glyphs.len(), 1);
        app
    }

    #[test]
    fn opening_a_dialog_drops_the_drag() {
        let mut app = app_mid_drag();
        app.show_dialog(NativeDialog::OpenTable(FileDialog::new()));
        assert_eq!(app.controller.state(), GestureState::Idle);
        assert_eq!(app.glyphs.len(), 0);
        assert!(app.active_dialog.is_some());
        assert!(app.controller.store().is_empty());
    }

    #[test]
    fn image_name_outlives_status_messages() {
        let mut app = CircleMarkApp::with_config(AppConfig::default());
        assert_eq!(app.image_label(), None);
        app.image_path = Some(PathBuf::from("scans/plate_01.png"));
        app.set_status("Added circle #0");
        app.undo();
        assert_eq!(app.image_label().as_deref(), Some("plate_01.png"));
    }
}
