use eframe::egui;
use anyhow::Result;
use square_keyboard::config::SessionConfig;
use square_keyboard::ui::KeyboardApp;

fn main() -> Result<()> {
    env_logger::init();
    log::info!("starting square keyboard");

    let config = SessionConfig::load().unwrap_or_else(|e| {
        log::warn!("{e:#}; using default session config");
        SessionConfig::default()
    });
    log::debug!("session config: {config:?}");

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default().with_inner_size([480.0, 240.0]),
        ..Default::default()
    };

    eframe::run_native(
        "Square Keyboard",
        options,
        Box::new(|_cc| Ok(Box::new(KeyboardApp::new(config)))),
    )
    .map_err(|e| anyhow::anyhow!("application error: {}", e))
}
