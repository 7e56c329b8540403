mod annot;
mod app;
mod config;
mod image;
mod table;
mod util;

use app::CircleMarkApp;
use std::path::PathBuf;

fn main() -> eframe::Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();

    let initial_image_path: Option<PathBuf> = std::env::args_os().nth(1).map(PathBuf::from);
    let native_options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([1200.0, 800.0])
            .with_min_inner_size([640.0, 480.0]),
        ..Default::default()
    };
    eframe::run_native(
        "Circlemark",
        native_options,
        Box::new(move |_cc| {
            Ok(Box::new(CircleMarkApp::new_with_initial_path(
                initial_image_path.as_deref(),
            )))
        }),
    )
}
