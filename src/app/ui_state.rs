use egui::ColorImage;
use egui_file_dialog::FileDialog;
use std::path::PathBuf;
use std::sync::mpsc::Receiver;

#[derive(Debug)]
pub enum NativeDialog {
    OpenImage(FileDialog),
    OpenTable(FileDialog),
    SaveTable(FileDialog),
}

pub struct PendingImageTask {
    pub(super) rx: Receiver<ImageLoadResult>,
    pub(super) path: PathBuf,
}

pub enum ImageLoadResult {
    Success(ColorImage),
    Error(String),
}

pub fn display_name(path: &std::path::Path) -> String {
    path.file_name()
        .and_then(|s| s.to_str())
        .map_or_else(|| path.display().to_string(), str::to_string)
}
