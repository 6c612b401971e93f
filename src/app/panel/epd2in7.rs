// Driver for the Waveshare 2.7" V2 e-paper HAT over Linux spidev and sysfs GPIO.

use super::Panel;
use crate::app::canvas::Canvas;
use crate::app::settings::PanelWiring;
use anyhow::{Context, Result, bail};
use linux_embedded_hal::{
    spidev::{SpiModeFlags, Spidev, SpidevOptions},
    sysfs_gpio::{Direction, Pin},
};
use std::io::Write;
use std::thread;
use std::time::{Duration, Instant};
use tracing::{debug, warn};

pub const WIDTH: u32 = 176;
pub const HEIGHT: u32 = 264;

const BUSY_POLL: Duration = Duration::from_millis(20);
const BUSY_TIMEOUT: Duration = Duration::from_secs(30);
// spidev rejects single transfers above its bufsiz (4096 by default).
const SPI_CHUNK: usize = 4096;

const SW_RESET: u8 = 0x12;
const DATA_ENTRY_MODE: u8 = 0x11;
const RAM_Y_WINDOW: u8 = 0x45;
const RAM_Y_COUNTER: u8 = 0x4F;
const WRITE_RAM: u8 = 0x24;
const UPDATE_CONTROL: u8 = 0x22;
const MASTER_ACTIVATION: u8 = 0x20;
const DEEP_SLEEP: u8 = 0x10;

pub struct Epd2in7 {
    spi: Spidev,
    reset: Pin,
    dc: Pin,
    busy: Pin,
}

impl Epd2in7 {
    /// Opens the SPI device and exports the control pins.
    pub fn open(wiring: &PanelWiring) -> Result<Self> {
        let mut spi = Spidev::open(&wiring.spi_device)
            .with_context(|| format!("Failed to open {}", wiring.spi_device.display()))?;
        let options = SpidevOptions::new()
            .bits_per_word(8)
            .max_speed_hz(wiring.spi_speed_hz)
            .mode(SpiModeFlags::SPI_MODE_0)
            .build();
        spi.configure(&options).context("Failed to configure SPI")?;

        let reset = output_pin(wiring.reset_pin)?;
        let dc = output_pin(wiring.dc_pin)?;
        let busy = Pin::new(wiring.busy_pin);
        busy.export()
            .with_context(|| format!("Failed to export GPIO {}", wiring.busy_pin))?;
        busy.set_direction(Direction::In)
            .with_context(|| format!("Failed to configure GPIO {}", wiring.busy_pin))?;

        Ok(Self { spi, reset, dc, busy })
    }

    fn hardware_reset(&mut self) -> Result<()> {
        for (level, ms) in [(1, 200), (0, 2), (1, 200)] {
            self.reset.set_value(level).context("Failed to drive RST")?;
            thread::sleep(Duration::from_millis(ms));
        }
        Ok(())
    }

    fn wait_until_idle(&mut self) -> Result<()> {
        let started = Instant::now();
        while self.busy.get_value().context("Failed to read BUSY")? == 1 {
            if started.elapsed() > BUSY_TIMEOUT {
                bail!("Panel stayed busy for more than {:?}", BUSY_TIMEOUT);
            }
            thread::sleep(BUSY_POLL);
        }
        Ok(())
    }

    fn command(&mut self, command: u8) -> Result<()> {
        self.dc.set_value(0).context("Failed to drive DC")?;
        self.spi.write_all(&[command]).context("SPI write failed")?;
        Ok(())
    }

    fn data(&mut self, data: &[u8]) -> Result<()> {
        self.dc.set_value(1).context("Failed to drive DC")?;
        for chunk in data.chunks(SPI_CHUNK) {
            self.spi.write_all(chunk).context("SPI write failed")?;
        }
        Ok(())
    }

    fn turn_on_display(&mut self) -> Result<()> {
        self.command(UPDATE_CONTROL)?;
        self.data(&[0xF7])?;
        self.command(MASTER_ACTIVATION)?;
        self.wait_until_idle()
    }

    fn write_frame(&mut self, frame: &[u8]) -> Result<()> {
        self.command(WRITE_RAM)?;
        self.data(frame)?;
        self.turn_on_display()
    }
}

impl Panel for Epd2in7 {
    fn width(&self) -> u32 {
        WIDTH
    }

    fn height(&self) -> u32 {
        HEIGHT
    }

    fn init(&mut self) -> Result<()> {
        self.hardware_reset()?;
        self.wait_until_idle()?;
        self.command(SW_RESET)?;
        self.wait_until_idle()?;

        self.command(RAM_Y_WINDOW)?;
        self.data(&[0x00, 0x00, 0x07, 0x01])?;
        self.command(RAM_Y_COUNTER)?;
        self.data(&[0x00, 0x00])?;
        self.command(DATA_ENTRY_MODE)?;
        self.data(&[0x03])?;
        self.wait_until_idle()
    }

    fn clear(&mut self) -> Result<()> {
        let blank = vec![0xFF; frame_len()];
        self.write_frame(&blank)
    }

    fn display(&mut self, image: &Canvas) -> Result<()> {
        let frame = pack_frame(image)?;
        self.write_frame(&frame)
    }

    fn sleep(&mut self) -> Result<()> {
        self.command(DEEP_SLEEP)?;
        self.data(&[0x01])?;
        thread::sleep(Duration::from_secs(2));
        Ok(())
    }
}

impl Drop for Epd2in7 {
    fn drop(&mut self) {
        debug!("releasing e-paper GPIO");
        let _ = self.reset.set_value(0);
        let _ = self.dc.set_value(0);
        for pin in [&self.reset, &self.dc, &self.busy] {
            if let Err(e) = pin.unexport() {
                warn!("Failed to unexport GPIO {}: {e}", pin.get_pin_num());
            }
        }
    }
}

fn output_pin(number: u64) -> Result<Pin> {
    let pin = Pin::new(number);
    pin.export()
        .with_context(|| format!("Failed to export GPIO {number}"))?;
    pin.set_direction(Direction::Out)
        .with_context(|| format!("Failed to configure GPIO {number}"))?;
    Ok(pin)
}

fn frame_len() -> usize {
    (WIDTH / 8 * HEIGHT) as usize
}

/// Packs a canvas into the controller's RAM layout: portrait rows, MSB
/// first, a set bit is white.
///
/// A landscape canvas (`HEIGHT x WIDTH`) is rotated so its top edge runs
/// down the panel's left side.
pub fn pack_frame(image: &Canvas) -> Result<Vec<u8>> {
    let mut frame = vec![0xFF; frame_len()];
    let row_bytes = (WIDTH / 8) as usize;

    let rotate = match (image.width(), image.height()) {
        (WIDTH, HEIGHT) => false,
        (HEIGHT, WIDTH) => true,
        (w, h) => bail!("Image is {w}x{h}, panel expects {WIDTH}x{HEIGHT} or {HEIGHT}x{WIDTH}"),
    };

    for (x, y) in image.ink_pixels() {
        let (px, py) = if rotate { (y, HEIGHT - x - 1) } else { (x, y) };
        frame[py as usize * row_bytes + (px / 8) as usize] &= !(0x80 >> (px % 8));
    }
    Ok(frame)
}
