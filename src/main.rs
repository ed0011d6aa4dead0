#![warn(clippy::all, rust_2018_idioms)]

use eduria_whiteboard::{WhiteboardApp, WhiteboardConfig};

fn main() -> eframe::Result {
    env_logger::init(); // Log to stderr (if you run with `RUST_LOG=debug`).

    let config = match WhiteboardConfig::from_env() {
        Ok(config) => config,
        Err(err) => {
            log::warn!("{}; falling back to default whiteboard config", err);
            WhiteboardConfig::default()
        }
    };
    log::info!("Starting Eduria whiteboard");

    let native_options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_title("Eduria Whiteboard")
            .with_inner_size([1024.0, 720.0])
            .with_min_inner_size([320.0, 240.0]),
        ..Default::default()
    };
    eframe::run_native(
        "Eduria Whiteboard",
        native_options,
        Box::new(|cc| Ok(Box::new(WhiteboardApp::new(cc, config)))),
    )
}
