// Runs the monitor against the terminal instead of the e-paper HAT.

use anyhow::Result;
use canary_epaper::app::{App, panel::TerminalPanel, settings::Settings};
use crossterm::event::{self, Event, KeyCode, KeyModifiers};
use std::io;
use std::sync::mpsc::{self, Sender};
use std::thread;

fn main() -> Result<()> {
    // Log lines would tear the alternate screen.
    tracing_subscriber::fmt().with_writer(io::sink).init();

    let (stop_tx, stop_rx) = mpsc::channel();
    let mut app = App::new(Settings::default(), TerminalPanel::new()?);
    thread::spawn(move || watch_keys(stop_tx));

    app.run(&stop_rx)
}

fn watch_keys(stop: Sender<()>) {
    loop {
        match event::read() {
            Ok(Event::Key(key)) => {
                let quit = match key.code {
                    KeyCode::Char('q') | KeyCode::Esc => true,
                    KeyCode::Char('c') => key.modifiers.contains(KeyModifiers::CONTROL),
                    _ => false,
                };
                if quit {
                    break;
                }
            }
            Ok(_) => {}
            Err(_) => break,
        }
    }
    let _ = stop.send(());
}
