#![cfg_attr(not(debug_assertions), windows_subsystem = "windows")]

mod app;
mod io;
mod model;
mod settings;
mod ui;

use simplelog::{ColorChoice, ConfigBuilder, LevelFilter, TermLogger, TerminalMode};

fn main() -> eframe::Result<()> {
    let log_config = ConfigBuilder::new()
        .add_filter_allow_str("rust_rota_app")
        .build();
    let _ = TermLogger::init(
        LevelFilter::Info,
        log_config,
        TerminalMode::Mixed,
        ColorChoice::Auto,
    );

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([1280.0, 720.0])
            .with_min_inner_size([800.0, 400.0])
            .with_title("Rust Rota App"),
        ..Default::default()
    };

    eframe::run_native(
        "Rust Rota App",
        options,
        Box::new(|cc| Ok(Box::new(app::RotaApp::new(cc)))),
    )
}
