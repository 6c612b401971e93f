// Stand-in panel that mirrors the e-paper image in the terminal.

use super::Panel;
use super::epd2in7::{HEIGHT, WIDTH};
use crate::app::canvas::Canvas;
use anyhow::{Context, Result};
use crossterm::{
    cursor::{Hide, Show},
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use ratatui::{
    Terminal,
    backend::CrosstermBackend,
    style::Color,
    symbols::Marker,
    widgets::{
        Block, Borders,
        canvas::{Canvas as BrailleCanvas, Points},
    },
};
use std::io::{self, Stdout};

/// Reports the same extents as the 2.7" panel and draws each update with
/// braille dots.
pub struct TerminalPanel {
    terminal: Terminal<CrosstermBackend<Stdout>>,
    refreshes: u64,
}

impl TerminalPanel {
    pub fn new() -> Result<Self> {
        enable_raw_mode().context("Failed to enable raw mode")?;
        let mut stdout = io::stdout();
        execute!(stdout, EnterAlternateScreen, Hide).context("Failed to enter alternate screen")?;
        let terminal = Terminal::new(CrosstermBackend::new(stdout))?;
        Ok(Self {
            terminal,
            refreshes: 0,
        })
    }
}

impl Panel for TerminalPanel {
    fn width(&self) -> u32 {
        WIDTH
    }

    fn height(&self) -> u32 {
        HEIGHT
    }

    fn init(&mut self) -> Result<()> {
        Ok(())
    }

    fn clear(&mut self) -> Result<()> {
        self.terminal.clear()?;
        Ok(())
    }

    fn display(&mut self, image: &Canvas) -> Result<()> {
        self.refreshes += 1;
        let (w, h) = (image.width() as f64, image.height() as f64);
        // Braille canvas y grows upwards.
        let coords: Vec<(f64, f64)> = image
            .ink_pixels()
            .map(|(x, y)| (x as f64, h - 1.0 - y as f64))
            .collect();
        let title = format!(
            " e-Paper {}x{} | refresh #{} | q to quit ",
            image.width(),
            image.height(),
            self.refreshes
        );

        self.terminal.draw(|f| {
            let canvas = BrailleCanvas::default()
                .block(Block::default().borders(Borders::ALL).title(title.as_str()))
                .background_color(Color::White)
                .marker(Marker::Braille)
                .x_bounds([0.0, w - 1.0])
                .y_bounds([0.0, h - 1.0])
                .paint(|ctx| {
                    ctx.draw(&Points {
                        coords: &coords,
                        color: Color::Black,
                    });
                });
            f.render_widget(canvas, f.area());
        })?;
        Ok(())
    }

    fn sleep(&mut self) -> Result<()> {
        Ok(())
    }
}

impl Drop for TerminalPanel {
    fn drop(&mut self) {
        let _ = disable_raw_mode();
        let _ = execute!(io::stdout(), LeaveAlternateScreen, Show);
    }
}
