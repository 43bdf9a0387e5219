/// Character-cell surface for terminal rendering
use crossterm::{
    cursor,
    style::{Color, Print, ResetColor, SetForegroundColor},
    QueueableCommand,
};
use log::trace;
use std::io::Write;
use wirecube_core::{Point2D, Rgb, Stroke, Surface};

/// Terminal cells are roughly twice as tall as they are wide
pub const CELL_ASPECT: f32 = 2.0;

/// Cell rows per logical pixel; 100 logical pixels span 15 rows
pub const DEFAULT_DENSITY: f32 = 0.15;

/// Lines reaching further than this from the origin are dropped for the frame
const MAX_REACH: f32 = 10_000.0;

/// Surface that rasterizes lines into a grid of terminal cells
pub struct TerminalSurface {
    width: usize,
    height: usize,
    density: f32,
    origin: (f32, f32),
    char_buffer: Vec<char>,
    color_buffer: Vec<Color>,
}

impl TerminalSurface {
    pub fn new(width: usize, height: usize, density: f32) -> Self {
        let size = width * height;
        Self {
            width,
            height,
            density,
            origin: (0.0, 0.0),
            char_buffer: vec![' '; size],
            color_buffer: vec![Color::Reset; size],
        }
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    pub fn resize(&mut self, width: usize, height: usize) {
        *self = Self::new(width, height, self.density);
    }

    pub fn set_density(&mut self, density: f32) {
        self.density = density;
    }

    pub fn cell(&self, x: usize, y: usize) -> Option<char> {
        if x < self.width && y < self.height {
            Some(self.char_buffer[y * self.width + x])
        } else {
            None
        }
    }

    /// Number of non-blank cells
    pub fn inked(&self) -> usize {
        self.char_buffer.iter().filter(|c| **c != ' ').count()
    }

    fn plot(&mut self, x: i64, y: i64, glyph: char, color: Color) {
        if x < 0 || y < 0 || x >= self.width as i64 || y >= self.height as i64 {
            return;
        }
        let idx = y as usize * self.width + x as usize;
        self.char_buffer[idx] = glyph;
        self.color_buffer[idx] = color;
    }

    /// The grid as plain text, one line per row
    pub fn to_text(&self) -> String {
        let mut text = String::with_capacity((self.width + 1) * self.height);
        for row in self.char_buffer.chunks(self.width.max(1)) {
            text.extend(row);
            text.push('\n');
        }
        text
    }

    pub fn draw<W: Write>(&self, writer: &mut W) -> std::io::Result<()> {
        let mut current = None;
        for y in 0..self.height {
            writer.queue(cursor::MoveTo(0, y as u16))?;
            for x in 0..self.width {
                let idx = y * self.width + x;
                let color = self.color_buffer[idx];
                if current != Some(color) {
                    writer.queue(SetForegroundColor(color))?;
                    current = Some(color);
                }
                writer.queue(Print(self.char_buffer[idx]))?;
            }
        }
        writer.queue(ResetColor)?;
        Ok(())
    }
}

impl Surface for TerminalSurface {
    fn dimensions(&self) -> (f32, f32) {
        (self.width as f32, self.height as f32)
    }

    fn pixel_density(&self) -> f32 {
        self.density
    }

    fn clear(&mut self, _width: f32, _height: f32) {
        self.char_buffer.fill(' ');
        self.color_buffer.fill(Color::Reset);
        self.origin = (0.0, 0.0);
    }

    fn translate_origin(&mut self, dx: f32, dy: f32) {
        self.origin.0 += dx;
        self.origin.1 += dy;
    }

    fn draw_line(&mut self, from: Point2D, to: Point2D, stroke: Stroke) {
        let reachable = |p: &Point2D| p.iter().all(|c| c.is_finite() && c.abs() < MAX_REACH);
        if !reachable(&from) || !reachable(&to) {
            trace!("skipping degenerate line {:?} -> {:?}", from, to);
            return;
        }

        let x0 = (self.origin.0 + from.x * CELL_ASPECT).round() as i64;
        let y0 = (self.origin.1 + from.y).round() as i64;
        let x1 = (self.origin.0 + to.x * CELL_ASPECT).round() as i64;
        let y1 = (self.origin.1 + to.y).round() as i64;

        let glyph = slope_glyph(x1 - x0, y1 - y0);
        let color = terminal_color(stroke.color);

        // Bresenham
        let dx = (x1 - x0).abs();
        let dy = -(y1 - y0).abs();
        let sx = if x0 < x1 { 1 } else { -1 };
        let sy = if y0 < y1 { 1 } else { -1 };
        let mut err = dx + dy;
        let (mut x, mut y) = (x0, y0);
        loop {
            self.plot(x, y, glyph, color);
            if x == x1 && y == y1 {
                break;
            }
            let e2 = 2 * err;
            if e2 >= dy {
                err += dy;
                x += sx;
            }
            if e2 <= dx {
                err += dx;
                y += sy;
            }
        }
    }
}

/// Pick a line character from the direction of a segment (y grows downwards)
fn slope_glyph(dx: i64, dy: i64) -> char {
    if dx.abs() >= 2 * dy.abs() {
        '-'
    } else if dy.abs() >= 2 * dx.abs() {
        '|'
    } else if (dx > 0) == (dy > 0) {
        '\\'
    } else {
        '/'
    }
}

fn terminal_color(rgb: Rgb) -> Color {
    Color::Rgb {
        r: rgb.r,
        g: rgb.g,
        b: rgb.b,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use wirecube_core::{RenderLoop, Settings, SettingsUpdate, EDGE_STROKE};

    #[test]
    fn test_horizontal_line_with_aspect() {
        let mut surface = TerminalSurface::new(20, 5, 1.0);
        surface.translate_origin(10.0, 2.0);
        surface.draw_line(Point2D::new(-2.0, 0.0), Point2D::new(2.0, 0.0), EDGE_STROKE);

        for x in 6..=14 {
            assert_eq!(surface.cell(x, 2), Some('-'));
        }
        assert_eq!(surface.cell(5, 2), Some(' '));
        assert_eq!(surface.inked(), 9);
    }

    #[test]
    fn test_vertical_and_diagonal_glyphs() {
        assert_eq!(slope_glyph(0, 5), '|');
        assert_eq!(slope_glyph(4, 4), '\\');
        assert_eq!(slope_glyph(-4, 4), '/');
        assert_eq!(slope_glyph(6, -1), '-');
    }

    #[test]
    fn test_clear_resets_origin_and_cells() {
        let mut surface = TerminalSurface::new(8, 4, 1.0);
        surface.translate_origin(4.0, 2.0);
        surface.draw_line(Point2D::new(0.0, -1.0), Point2D::new(0.0, 1.0), EDGE_STROKE);
        assert_eq!(surface.cell(4, 1), Some('|'));

        surface.clear(8.0, 4.0);
        assert_eq!(surface.inked(), 0);
        surface.draw_line(Point2D::new(0.0, 0.0), Point2D::new(0.0, 0.0), EDGE_STROKE);
        assert_eq!(surface.cell(0, 0), Some('-'));
    }

    #[test]
    fn test_off_screen_and_degenerate_lines() {
        let mut surface = TerminalSurface::new(8, 4, 1.0);
        surface.draw_line(Point2D::new(-50.0, -50.0), Point2D::new(-40.0, -40.0), EDGE_STROKE);
        surface.draw_line(
            Point2D::new(f32::INFINITY, 0.0),
            Point2D::new(1.0, 1.0),
            EDGE_STROKE,
        );
        surface.draw_line(Point2D::new(f32::NAN, 0.0), Point2D::new(1.0, 1.0), EDGE_STROKE);
        assert_eq!(surface.inked(), 0);
    }

    #[test]
    fn test_resize_keeps_density() {
        let mut surface = TerminalSurface::new(8, 4, 0.5);
        surface.resize(30, 10);
        assert_eq!(surface.dimensions(), (30.0, 10.0));
        assert_eq!(surface.pixel_density(), 0.5);
        assert_eq!(surface.cell(29, 9), Some(' '));
        assert_eq!(surface.cell(30, 9), None);
    }

    #[test]
    fn test_to_text() {
        let mut surface = TerminalSurface::new(3, 2, 1.0);
        surface.draw_line(Point2D::new(0.0, 1.0), Point2D::new(1.0, 1.0), EDGE_STROKE);
        assert_eq!(surface.to_text(), "   \n---\n");
    }

    #[test]
    fn test_draw_writes_every_row() {
        let mut surface = TerminalSurface::new(3, 2, 1.0);
        surface.translate_origin(1.0, 0.0);
        surface.draw_line(Point2D::new(0.0, 0.0), Point2D::new(0.0, 1.0), EDGE_STROKE);

        let mut out = Vec::new();
        surface.draw(&mut out).unwrap();
        let text = String::from_utf8(out).unwrap();
        assert_eq!(text.matches('|').count(), 2);
    }

    #[test]
    fn test_render_loop_draws_centred_cube() {
        let surface = TerminalSurface::new(80, 24, DEFAULT_DENSITY);
        let mut render_loop = RenderLoop::new(surface, Settings::default());
        render_loop.tick();

        let surface = render_loop.surface();
        assert!(surface.inked() > 20);
        // Nothing lands in the outer columns at the default size
        for y in 0..24 {
            assert_eq!(surface.cell(0, y), Some(' '));
            assert_eq!(surface.cell(79, y), Some(' '));
        }

        render_loop.update(SettingsUpdate::Size(20.0)).unwrap();
        render_loop.tick();
        assert!(render_loop.surface().inked() < surface_inked_at_default());
    }

    fn surface_inked_at_default() -> usize {
        let mut render_loop = RenderLoop::new(
            TerminalSurface::new(80, 24, DEFAULT_DENSITY),
            Settings::default(),
        );
        render_loop.tick();
        render_loop.surface().inked()
    }
}
