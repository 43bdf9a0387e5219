/// HTML canvas surface scaled for the device pixel ratio
use wasm_bindgen::JsValue;
use web_sys::{CanvasRenderingContext2d, HtmlCanvasElement, Window};
use wirecube_core::{Point2D, Stroke, Surface};

pub struct CanvasSurface {
    canvas: HtmlCanvasElement,
    context: CanvasRenderingContext2d,
    density: f32,
}

impl CanvasSurface {
    pub fn new(canvas: HtmlCanvasElement, context: CanvasRenderingContext2d, density: f32) -> Self {
        Self {
            canvas,
            context,
            density,
        }
    }

    /// Size the canvas to the window's inner size at the current pixel ratio
    pub fn fit_to_window(&mut self, window: &Window) -> Result<(), JsValue> {
        let width = window.inner_width()?.as_f64().unwrap_or(0.0) as f32;
        let height = window.inner_height()?.as_f64().unwrap_or(0.0) as f32;
        self.density = window.device_pixel_ratio() as f32;
        self.resize(width, height)
    }

    /// Set the logical (CSS pixel) size; the backing store gets `density` times as many pixels
    pub fn resize(&mut self, width: f32, height: f32) -> Result<(), JsValue> {
        let (device_width, device_height) = device_size(width, height, self.density);
        self.canvas.set_width(device_width);
        self.canvas.set_height(device_height);

        let style = self.canvas.style();
        style.set_property("width", &format!("{}px", width))?;
        style.set_property("height", &format!("{}px", height))?;
        Ok(())
    }
}

impl Surface for CanvasSurface {
    fn dimensions(&self) -> (f32, f32) {
        (self.canvas.width() as f32, self.canvas.height() as f32)
    }

    fn pixel_density(&self) -> f32 {
        self.density
    }

    fn clear(&mut self, width: f32, height: f32) {
        if let Err(e) = self.context.set_transform(1.0, 0.0, 0.0, 1.0, 0.0, 0.0) {
            warn("setTransform failed:", &e);
        }
        self.context.clear_rect(0.0, 0.0, width as f64, height as f64);
    }

    fn translate_origin(&mut self, dx: f32, dy: f32) {
        if let Err(e) = self.context.translate(dx as f64, dy as f64) {
            warn("translate failed:", &e);
        }
    }

    fn draw_line(&mut self, from: Point2D, to: Point2D, stroke: Stroke) {
        self.context.set_stroke_style_str(&stroke.color.to_hex());
        self.context.set_line_width(line_width(stroke));
        self.context.begin_path();
        self.context.move_to(from.x as f64, from.y as f64);
        self.context.line_to(to.x as f64, to.y as f64);
        self.context.stroke();
    }
}

/// Backing-store size for a logical size at a given pixel ratio
pub fn device_size(width: f32, height: f32, density: f32) -> (u32, u32) {
    let scale = |logical: f32| {
        let device = (logical * density).round();
        if device.is_finite() && device > 0.0 {
            device as u32
        } else {
            0
        }
    };
    (scale(width), scale(height))
}

/// Canvas line width; constant in device pixels whatever the pixel ratio
fn line_width(stroke: Stroke) -> f64 {
    stroke.width as f64
}

fn warn(message: &str, error: &JsValue) {
    web_sys::console::warn_2(&JsValue::from_str(message), error);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_device_size_scales_by_density() {
        assert_eq!(device_size(800.0, 600.0, 1.0), (800, 600));
        assert_eq!(device_size(800.0, 600.0, 2.0), (1600, 1200));
        assert_eq!(device_size(333.0, 100.0, 1.5), (500, 150));
    }

    #[test]
    fn test_line_width_ignores_density() {
        assert_eq!(line_width(wirecube_core::EDGE_STROKE), 1.0);
    }

    #[test]
    fn test_device_size_never_negative() {
        assert_eq!(device_size(-10.0, f32::NAN, 2.0), (0, 0));
        assert_eq!(device_size(0.0, 0.0, 3.0), (0, 0));
    }
}
