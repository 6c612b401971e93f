// A 1-bit image buffer that embedded-graphics can draw on.

use embedded_graphics::{pixelcolor::BinaryColor, prelude::*};
use std::convert::Infallible;

/// Monochrome image, white when created.
///
/// `BinaryColor::On` is ink (black), `BinaryColor::Off` is paper (white).
/// Pixels drawn outside the image are clipped.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Canvas {
    width: u32,
    height: u32,
    ink: Vec<bool>,
}

impl Canvas {
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            ink: vec![false; (width * height) as usize],
        }
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    /// True when the pixel at (x, y) is black. Out of range reads as white.
    pub fn is_ink(&self, x: u32, y: u32) -> bool {
        x < self.width && y < self.height && self.ink[(y * self.width + x) as usize]
    }

    /// Coordinates of every black pixel, row by row.
    pub fn ink_pixels(&self) -> impl Iterator<Item = (u32, u32)> + '_ {
        self.ink
            .iter()
            .enumerate()
            .filter(|(_, ink)| **ink)
            .map(|(i, _)| (i as u32 % self.width, i as u32 / self.width))
    }
}

impl OriginDimensions for Canvas {
    fn size(&self) -> Size {
        Size::new(self.width, self.height)
    }
}

impl DrawTarget for Canvas {
    type Color = BinaryColor;
    type Error = Infallible;

    fn draw_iter<I>(&mut self, pixels: I) -> Result<(), Self::Error>
    where
        I: IntoIterator<Item = Pixel<Self::Color>>,
    {
        for Pixel(point, color) in pixels {
            if point.x < 0 || point.y < 0 {
                continue;
            }
            let (x, y) = (point.x as u32, point.y as u32);
            if x >= self.width || y >= self.height {
                continue;
            }
            self.ink[(y * self.width + x) as usize] = color.is_on();
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use embedded_graphics::primitives::{PrimitiveStyle, Rectangle};

    #[test]
    fn starts_white() {
        let canvas = Canvas::new(264, 176);
        assert_eq!(canvas.size(), Size::new(264, 176));
        assert_eq!(canvas.ink_pixels().count(), 0);
    }

    #[test]
    fn draws_and_clips() {
        let mut canvas = Canvas::new(8, 4);
        Rectangle::new(Point::new(6, 2), Size::new(4, 4))
            .into_styled(PrimitiveStyle::with_fill(BinaryColor::On))
            .draw(&mut canvas)
            .unwrap();

        let pixels: Vec<_> = canvas.ink_pixels().collect();
        assert_eq!(pixels, vec![(6, 2), (7, 2), (6, 3), (7, 3)]);
        assert!(canvas.is_ink(7, 3));
        assert!(!canvas.is_ink(5, 3));
        assert!(!canvas.is_ink(8, 3));
    }

    #[test]
    fn off_pixels_erase() {
        let mut canvas = Canvas::new(2, 2);
        canvas
            .draw_iter([Pixel(Point::new(1, 1), BinaryColor::On)])
            .unwrap();
        canvas
            .draw_iter([Pixel(Point::new(1, 1), BinaryColor::Off)])
            .unwrap();
        assert!(!canvas.is_ink(1, 1));
    }
}
