// Compiled-in settings. The program takes no flags and reads no environment.

use std::path::PathBuf;
use std::time::Duration;

#[derive(Debug, Clone)]
pub struct Settings {
    /// OpenCanary configuration file.
    pub config_path: PathBuf,
    /// Unit passed to `systemctl is-active`.
    pub unit: String,
    /// Sleep between polls. Time spent polling and drawing is not subtracted.
    pub refresh_interval: Duration,
    pub wiring: PanelWiring,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            config_path: PathBuf::from("/etc/opencanaryd/opencanary.conf"),
            unit: "opencanary.service".to_string(),
            refresh_interval: Duration::from_secs(10),
            wiring: PanelWiring::default(),
        }
    }
}

/// How the e-paper HAT is connected on the Raspberry Pi header.
#[derive(Debug, Clone)]
pub struct PanelWiring {
    pub spi_device: PathBuf,
    pub spi_speed_hz: u32,
    /// BCM pin numbers.
    pub reset_pin: u64,
    pub dc_pin: u64,
    pub busy_pin: u64,
}

impl Default for PanelWiring {
    fn default() -> Self {
        Self {
            spi_device: PathBuf::from("/dev/spidev0.0"),
            spi_speed_hz: 4_000_000,
            reset_pin: 17,
            dc_pin: 25,
            busy_pin: 24,
        }
    }
}
