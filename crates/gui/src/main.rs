mod app;
pub mod i18n;
mod ui;
mod viewport;

// Re-export library modules so that `crate::state`, `crate::render`, etc.
// resolve to the lib crate types everywhere in the binary.
pub use studio_gui_lib::assets;
pub use studio_gui_lib::render;
pub use studio_gui_lib::state;

use app::StudioApp;

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "studio_gui=info,studio_gui_lib=info".into()),
        )
        .init();

    let native_options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_title("Studio3D — Scene Configurator")
            .with_inner_size([1400.0, 900.0])
            .with_min_inner_size([900.0, 560.0]),
        ..Default::default()
    };

    if let Err(e) = eframe::run_native(
        "studio-gui",
        native_options,
        Box::new(|cc| Ok(Box::new(StudioApp::new(cc)))),
    ) {
        tracing::error!("Failed to start application: {e}");
    }
}
