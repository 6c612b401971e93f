// The display panel seen by the renderer, plus the concrete drivers.

use super::canvas::Canvas;
use anyhow::Result;

pub mod epd2in7;
pub mod terminal;

pub use epd2in7::Epd2in7;
pub use terminal::TerminalPanel;

/// A monochrome panel that is woken, cleared, written and put back to sleep
/// for every update.
///
/// `width` and `height` are the panel's native extents. Implementations
/// release their hardware when dropped.
pub trait Panel {
    fn width(&self) -> u32;
    fn height(&self) -> u32;

    fn init(&mut self) -> Result<()>;
    fn clear(&mut self) -> Result<()>;
    /// Shows `image`, which is either `width x height` or rotated
    /// `height x width`.
    fn display(&mut self, image: &Canvas) -> Result<()>;
    fn sleep(&mut self) -> Result<()>;
}
