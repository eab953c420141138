mod app;
mod engine;
mod error;
mod model;
mod templates;

use tracing_subscriber::EnvFilter;

fn main() -> eframe::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("gridsmith=info")),
        )
        .init();

    let native_options = eframe::NativeOptions::default();
    eframe::run_native(
        "Grid Composer",
        native_options,
        Box::new(|cc| Ok(Box::new(app::GridApp::new(cc)))),
    )
}
