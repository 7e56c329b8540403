use super::CircleMarkApp;
use super::ui_state::{ImageLoadResult, PendingImageTask, display_name};
use crate::image::{LoadedImage, decode_image_from_path};
use egui::Context;
use std::path::{Path, PathBuf};
use std::sync::mpsc::{self, TryRecvError};
use std::thread;

impl CircleMarkApp {
    pub(crate) fn start_loading_image_from_path(&mut self, path: PathBuf) {
        self.remember_image_dir_from_path(&path);
        let limits = self.config.effective_image_limits();
        let worker_path = path.clone();
        let (tx, rx) = mpsc::channel();
        thread::spawn(move || {
            let msg = match decode_image_from_path(&limits, &worker_path) {
                Ok(color) => ImageLoadResult::Success(color),
                Err(err) => ImageLoadResult::Error(format!("{err:#}")),
            };
            let _ = tx.send(msg);
        });
        self.set_status(format!("Loading {}…", display_name(&path)));
        self.pending_image_task = Some(PendingImageTask { rx, path });
    }

    pub(crate) fn poll_image_loader(&mut self, ctx: &Context) {
        let Some(task) = self.pending_image_task.take() else {
            return;
        };
        match task.rx.try_recv() {
            Ok(ImageLoadResult::Success(color)) => {
                let name = display_name(&task.path);
                let loaded = LoadedImage::from_color_image(ctx, color);
                self.view.set_image_size(loaded.size_vec2());
                self.image = Some(loaded);
                self.image_path = Some(task.path);
                self.reset_document();
                log::info!("Loaded image {name}");
                self.set_status(format!("Loaded {name}"));
            }
            Ok(ImageLoadResult::Error(err)) => {
                let name = display_name(&task.path);
                log::warn!("Failed to load {name}: {err}");
                self.set_status(format!("Failed to load {name}: {err}"));
            }
            Err(TryRecvError::Empty) => {
                self.pending_image_task = Some(task);
            }
            Err(TryRecvError::Disconnected) => {
                let name = display_name(&task.path);
                self.set_status(format!("Loading {name} failed: worker disconnected."));
            }
        }
    }

    pub(crate) fn remember_image_dir_from_path(&mut self, path: &Path) {
        let dir = path
            .parent()
            .map_or_else(|| PathBuf::from("."), Path::to_path_buf);
        self.last_image_dir = Some(dir);
    }
}
