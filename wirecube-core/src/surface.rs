//! Drawing-surface contract implemented by each host
//!
//! Coordinates are device pixels. The render loop clears the surface, moves
//! the origin to its centre and then draws straight line segments.

use crate::math::Point2D;

/// 8-bit RGB colour
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Rgb {
    pub const WHITE: Rgb = Rgb::new(0xff, 0xff, 0xff);

    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// CSS hex notation, e.g. `#ffffff`
    pub fn to_hex(self) -> String {
        format!("#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
    }
}

/// Line colour and width
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Stroke {
    pub color: Rgb,
    pub width: f32,
}

/// The fixed stroke used for every cube edge
pub const EDGE_STROKE: Stroke = Stroke {
    color: Rgb::WHITE,
    width: 1.0,
};

pub trait Surface {
    /// Current size in device pixels (logical size times pixel density)
    fn dimensions(&self) -> (f32, f32);

    /// Device pixels per logical pixel
    fn pixel_density(&self) -> f32;

    /// Erase the given area and reset any origin translation
    fn clear(&mut self, width: f32, height: f32);

    /// Shift the origin used by subsequent draws until the next clear
    fn translate_origin(&mut self, dx: f32, dy: f32);

    fn draw_line(&mut self, from: Point2D, to: Point2D, stroke: Stroke);
}
