//! Shows the state of an OpenCanary honeypot on a Waveshare 2.7" e-paper panel.

pub mod app;
