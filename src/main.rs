use anyhow::{Context, Result};
use canary_epaper::app::{App, panel::Epd2in7, settings::Settings};
use std::sync::mpsc;
use tracing::{Level, error};

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_max_level(Level::INFO)
        .with_target(false)
        .init();

    let settings = Settings::default();

    let (stop_tx, stop_rx) = mpsc::channel();
    ctrlc::set_handler(move || {
        let _ = stop_tx.send(());
    })
    .context("Failed to install interrupt handler")?;

    let panel = Epd2in7::open(&settings.wiring).context("Failed to open e-paper panel")?;
    let mut app = App::new(settings, panel);

    if let Err(e) = app.run(&stop_rx) {
        error!("Unexpected error: {e:#}");
        // Release the GPIO lines before exiting.
        drop(app);
        std::process::exit(1);
    }
    Ok(())
}
