pub mod app;
pub mod plot_view;
pub mod ui;

use app::App;

/// Launch the application with eframe.
pub fn run() {
    let native_options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_title("Speaker-Box — Loudspeaker Enclosure Simulator")
            .with_inner_size([1280.0, 900.0]),
        ..Default::default()
    };
    eframe::run_native(
        "Speaker-Box",
        native_options,
        Box::new(|cc| Ok(Box::new(App::new(cc)))),
    )
    .expect("eframe::run_native failed");
}
