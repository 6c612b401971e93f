// The central application controller and polling loop.

use anyhow::Result;
use std::sync::mpsc::{Receiver, RecvTimeoutError};
use tracing::info;

pub mod canvas;
pub mod config;
pub mod model;
pub mod panel;
pub mod settings;
pub mod systemd;
pub mod ui;

use model::Snapshot;
use panel::Panel;
use settings::Settings;

pub struct App<P: Panel> {
    settings: Settings,
    panel: P,
    last: Option<Snapshot>,
}

impl<P: Panel> App<P> {
    pub fn new(settings: Settings, panel: P) -> Self {
        Self {
            settings,
            panel,
            last: None,
        }
    }

    /// Polls until a message arrives on `stop` (or its sender goes away).
    ///
    /// Errors from rendering end the loop; the panel is released when the
    /// `App` is dropped.
    pub fn run(&mut self, stop: &Receiver<()>) -> Result<()> {
        info!(
            unit = %self.settings.unit,
            config = %self.settings.config_path.display(),
            "Watching honeypot"
        );

        loop {
            let snapshot = self.poll();
            self.refresh(snapshot)?;

            match stop.recv_timeout(self.settings.refresh_interval) {
                Err(RecvTimeoutError::Timeout) => {}
                Ok(()) | Err(RecvTimeoutError::Disconnected) => {
                    info!("Exiting...");
                    return Ok(());
                }
            }
        }
    }

    fn poll(&self) -> Snapshot {
        let status = systemd::check_status(&self.settings.unit);
        let services = config::read_services(&self.settings.config_path);
        Snapshot::new(status, services)
    }

    /// Renders `snapshot` unless it is what the panel already shows.
    /// Returns whether the panel was redrawn.
    pub fn refresh(&mut self, snapshot: Snapshot) -> Result<bool> {
        if self.last.as_ref() == Some(&snapshot) {
            info!("No changes detected. Skipping refresh...");
            return Ok(false);
        }

        info!("Changes detected. Refreshing display...");
        ui::render(&mut self.panel, &snapshot)?;
        self.last = Some(snapshot);
        Ok(true)
    }

    pub fn panel(&self) -> &P {
        &self.panel
    }
}
