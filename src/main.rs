#![warn(clippy::all, rust_2018_idioms)]
#![cfg_attr(not(debug_assertions), windows_subsystem = "windows")] // hide console window on Windows in release

use std::path::PathBuf;

use pixel_forge::{EditorConfig, PixelForgeApp};

fn main() -> eframe::Result {
    env_logger::init(); // Log to stderr (if you run with `RUST_LOG=debug`).

    // Optional JSON config as the first argument
    let config_path = std::env::args_os().nth(1).map(PathBuf::from);
    let config = EditorConfig::load_or_default(config_path.as_deref());

    let native_options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([1000.0, 700.0])
            .with_min_inner_size([600.0, 400.0]),
        ..Default::default()
    };
    eframe::run_native(
        "Pixel Forge",
        native_options,
        Box::new(|cc| Ok(Box::new(PixelForgeApp::new(cc, config)))),
    )
}
