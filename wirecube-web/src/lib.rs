/// Wirecube Web - Canvas 2D renderer driven by requestAnimationFrame
///
/// The page owns the control panel (dat.gui or plain inputs) and calls the
/// setters on [`WebRenderer`]; changes show up on the next animation frame.

use std::cell::RefCell;
use std::rc::Rc;

use log::debug;
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use web_sys::{CanvasRenderingContext2d, HtmlCanvasElement, Window};
use wirecube_core::{
    apply_commands, Axis, ProjectionMode, RenderLoop, Settings, SettingsUpdate, StopHandle,
    Surface, TickOutcome,
};

pub mod logger;
pub mod surface;

pub use surface::CanvasSurface;

type SharedLoop = Rc<RefCell<RenderLoop<CanvasSurface>>>;
type FrameCallback = Rc<RefCell<Option<Closure<dyn FnMut()>>>>;

#[wasm_bindgen]
pub struct WebRenderer {
    render_loop: SharedLoop,
    stop: StopHandle,
    frame: FrameCallback,
    on_resize: Closure<dyn FnMut()>,
}

#[wasm_bindgen]
impl WebRenderer {
    /// Create a full-window canvas inside the element matching `selector`
    #[wasm_bindgen(constructor)]
    pub fn new(selector: &str) -> Result<WebRenderer, JsValue> {
        logger::init(log::LevelFilter::Info);
        let window = window()?;
        let document = window
            .document()
            .ok_or_else(|| JsValue::from_str("no document"))?;
        let container = document
            .query_selector(selector)?
            .ok_or_else(|| JsValue::from_str(&format!("no element matches {}", selector)))?;

        let canvas: HtmlCanvasElement = document.create_element("canvas")?.dyn_into()?;
        container.append_child(&canvas)?;
        let context: CanvasRenderingContext2d = canvas
            .get_context("2d")?
            .ok_or_else(|| JsValue::from_str("canvas 2d context unavailable"))?
            .dyn_into()?;

        let mut surface = CanvasSurface::new(canvas, context, window.device_pixel_ratio() as f32);
        surface.fit_to_window(&window)?;

        let render_loop = Rc::new(RefCell::new(RenderLoop::new(surface, Settings::default())));
        let stop = render_loop.borrow().stop_handle();

        let on_resize = {
            let render_loop = render_loop.clone();
            Closure::<dyn FnMut()>::new(move || {
                let Ok(window) = window_or_warn() else {
                    return;
                };
                if let Err(e) = render_loop.borrow_mut().surface_mut().fit_to_window(&window) {
                    web_sys::console::warn_2(&JsValue::from_str("resize failed:"), &e);
                }
            })
        };
        window.add_event_listener_with_callback("resize", on_resize.as_ref().unchecked_ref())?;

        Ok(WebRenderer {
            render_loop,
            stop,
            frame: Rc::new(RefCell::new(None)),
            on_resize,
        })
    }

    /// Start animating; each frame schedules the next until [`WebRenderer::stop`]
    pub fn start(&self) -> Result<(), JsValue> {
        if self.frame.borrow().is_some() {
            return Ok(());
        }

        let render_loop = self.render_loop.clone();
        let frame = self.frame.clone();
        *self.frame.borrow_mut() = Some(Closure::<dyn FnMut()>::new(move || {
            if render_loop.borrow_mut().tick() == TickOutcome::Stopped {
                // Dropping the callback ends the chain
                let _ = frame.borrow_mut().take();
                return;
            }
            if let Some(callback) = frame.borrow().as_ref() {
                if let Err(e) = request_animation_frame(callback) {
                    web_sys::console::warn_2(&JsValue::from_str("requestAnimationFrame failed:"), &e);
                }
            }
        }));

        debug!("starting animation");
        match self.frame.borrow().as_ref() {
            Some(callback) => request_animation_frame(callback),
            None => Ok(()),
        }
    }

    /// Stop at the top of the next frame
    pub fn stop(&self) {
        debug!("stop requested");
        self.stop.stop();
    }

    /// Draw exactly one frame; returns false once stopped
    pub fn tick(&self) -> bool {
        self.render_loop.borrow_mut().tick() == TickOutcome::Continue
    }

    pub fn set_size(&self, size: f32) -> Result<f32, JsValue> {
        self.update(SettingsUpdate::Size(size))?;
        Ok(self.render_loop.borrow().settings().size())
    }

    pub fn set_distance(&self, distance: f32) -> Result<f32, JsValue> {
        self.update(SettingsUpdate::Distance(distance))?;
        Ok(self.render_loop.borrow().settings().distance())
    }

    pub fn set_rotate_x(&self, enabled: bool) -> Result<(), JsValue> {
        self.update(SettingsUpdate::Rotate(Axis::X, enabled))
    }

    pub fn set_rotate_y(&self, enabled: bool) -> Result<(), JsValue> {
        self.update(SettingsUpdate::Rotate(Axis::Y, enabled))
    }

    pub fn set_rotate_z(&self, enabled: bool) -> Result<(), JsValue> {
        self.update(SettingsUpdate::Rotate(Axis::Z, enabled))
    }

    pub fn set_orthographic(&self, enabled: bool) -> Result<(), JsValue> {
        let mode = if enabled {
            ProjectionMode::Orthographic
        } else {
            ProjectionMode::Perspective
        };
        self.update(SettingsUpdate::Projection(mode))
    }

    /// Apply text commands such as `"size 250; z off"`; returns how many ran
    pub fn command(&self, input: &str) -> Result<usize, JsValue> {
        let mut render_loop = self.render_loop.borrow_mut();
        apply_commands(render_loop.settings_mut(), input).map_err(|e| JsValue::from_str(&e.to_string()))
    }

    /// Change console verbosity: `"off"`, `"error"`, `"warn"`, `"info"`, `"debug"` or `"trace"`
    pub fn set_log_level(&self, level: &str) -> Result<(), JsValue> {
        let filter = logger::parse_level(level)
            .ok_or_else(|| JsValue::from_str(&format!("unknown log level {:?}", level)))?;
        log::set_max_level(filter);
        Ok(())
    }

    /// Re-read the window size, e.g. after the container changes
    pub fn resize(&self) -> Result<(), JsValue> {
        let window = window()?;
        self.render_loop
            .borrow_mut()
            .surface_mut()
            .fit_to_window(&window)
    }

    pub fn frames(&self) -> f64 {
        self.render_loop.borrow().frames() as f64
    }

    /// Canvas size in device pixels as `[width, height]`
    pub fn dimensions(&self) -> Vec<f32> {
        let (width, height) = self.render_loop.borrow().surface().dimensions();
        vec![width, height]
    }
}

impl WebRenderer {
    fn update(&self, update: SettingsUpdate) -> Result<(), JsValue> {
        self.render_loop
            .borrow_mut()
            .update(update)
            .map_err(|e| JsValue::from_str(&e.to_string()))
    }
}

impl Drop for WebRenderer {
    fn drop(&mut self) {
        self.stop.stop();
        if let Ok(window) = window() {
            let _ = window.remove_event_listener_with_callback(
                "resize",
                self.on_resize.as_ref().unchecked_ref(),
            );
        }
    }
}

fn window() -> Result<Window, JsValue> {
    web_sys::window().ok_or_else(|| JsValue::from_str("no global window"))
}

fn window_or_warn() -> Result<Window, JsValue> {
    window().map_err(|e| {
        web_sys::console::warn_1(&e);
        e
    })
}

fn request_animation_frame(callback: &Closure<dyn FnMut()>) -> Result<(), JsValue> {
    window()?.request_animation_frame(callback.as_ref().unchecked_ref())?;
    Ok(())
}
