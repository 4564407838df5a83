use std::cell::{Cell, RefCell};
use std::rc::{Rc, Weak};

use gloo::console;
use gloo::events::EventListener;
use wasm_bindgen::{closure::Closure, prelude::*, JsCast};
use web_sys::{Element, HtmlCanvasElement, HtmlElement};

use super::canvas::CanvasSurface;
use super::dom;
use crate::config::EffectConfig;
use crate::effects::EmberEffect;

const MIN_SIDE: f64 = 10.0;

/// Ember overlay bound to a canvas laid over an image. Cloning shares the
/// same running effect.
#[wasm_bindgen]
#[derive(Clone)]
pub struct EmberOverlay {
    inner: Rc<Inner>,
}

struct Inner {
    canvas: HtmlCanvasElement,
    image: Element,
    toggle_button: Option<HtmlElement>,
    surface: RefCell<CanvasSurface>,
    effect: RefCell<EmberEffect>,
    // Id of the requested but not yet delivered animation frame.
    pending: Cell<Option<i32>>,
    tick: Closure<dyn FnMut(f64)>,
    resize: RefCell<Option<EventListener>>,
    _toggle_click: Option<EventListener>,
}

impl EmberOverlay {
    pub(crate) fn attach(
        canvas: HtmlCanvasElement,
        image: Element,
        toggle: Option<HtmlElement>,
        config: EffectConfig,
    ) -> Result<Self, JsValue> {
        let surface = CanvasSurface::new(canvas.clone())?;
        let seed = (js_sys::Math::random() * u64::MAX as f64) as u64;
        let inner = Rc::new_cyclic(|weak: &Weak<Inner>| {
            let frame_target = weak.clone();
            let tick = Closure::wrap(Box::new(move |timestamp: f64| {
                if let Some(inner) = frame_target.upgrade() {
                    inner.on_frame(timestamp);
                }
            }) as Box<dyn FnMut(f64)>);

            let toggle_click = toggle.as_ref().map(|button| {
                let target = weak.clone();
                EventListener::new(button, "click", move |_| {
                    if let Some(inner) = target.upgrade() {
                        inner.toggle();
                    }
                })
            });

            Inner {
                canvas,
                image,
                toggle_button: toggle,
                surface: RefCell::new(surface),
                effect: RefCell::new(EmberEffect::new(config, seed)),
                pending: Cell::new(None),
                tick,
                resize: RefCell::new(None),
                _toggle_click: toggle_click,
            }
        });
        inner.update_label();
        Ok(Self { inner })
    }

    /// Looks up the canvas, the image it covers and an optional toggle button
    /// by id. Returns `None` when either of the first two is missing.
    pub(crate) fn from_ids(
        document: &web_sys::Document,
        canvas_id: &str,
        image_id: &str,
        toggle_id: Option<&str>,
        config: EffectConfig,
    ) -> Result<Option<Self>, JsValue> {
        let (Some(canvas), Some(image)) = (
            dom::element::<HtmlCanvasElement>(document, canvas_id),
            document.get_element_by_id(image_id),
        ) else {
            console::warn!("ember overlay disabled, missing", canvas_id, image_id);
            return Ok(None);
        };
        let toggle = toggle_id.and_then(|id| dom::element::<HtmlElement>(document, id));
        Self::attach(canvas, image, toggle, config).map(Some)
    }
}

#[wasm_bindgen]
impl EmberOverlay {
    #[wasm_bindgen(constructor)]
    pub fn new(
        canvas_id: &str,
        image_id: &str,
        toggle_id: Option<String>,
    ) -> Result<EmberOverlay, JsValue> {
        let document = web_sys::window()
            .and_then(|w| w.document())
            .ok_or("no document")?;
        Self::from_ids(
            &document,
            canvas_id,
            image_id,
            toggle_id.as_deref(),
            EffectConfig::default(),
        )?
        .ok_or_else(|| JsValue::from_str("ember overlay elements not found"))
    }

    pub fn start(&self) {
        self.inner.start();
    }

    pub fn stop(&self) {
        self.inner.stop();
    }

    /// Returns the new running state.
    pub fn toggle(&self) -> bool {
        self.inner.toggle()
    }

    #[wasm_bindgen(getter)]
    pub fn running(&self) -> bool {
        self.inner.effect.borrow().is_running()
    }
}

impl Inner {
    fn start(self: &Rc<Self>) {
        if self.effect.borrow().is_running() {
            return;
        }
        self.fit();
        let weak = Rc::downgrade(self);
        if let Some(window) = web_sys::window() {
            *self.resize.borrow_mut() = Some(EventListener::new(&window, "resize", move |_| {
                if let Some(inner) = weak.upgrade() {
                    inner.fit();
                }
            }));
        }
        dom::set_display(&self.canvas, "block");

        let (width, height) = (self.canvas.width() as f64, self.canvas.height() as f64);
        self.effect.borrow_mut().start(width, height);
        self.update_label();
        self.schedule();
    }

    fn stop(&self) {
        self.effect.borrow_mut().stop();
        self.cancel_pending();
        self.resize.borrow_mut().take();
        dom::hide(&self.canvas);
        self.update_label();
    }

    fn toggle(self: &Rc<Self>) -> bool {
        if self.effect.borrow().is_running() {
            self.stop();
            false
        } else {
            self.start();
            true
        }
    }

    /// Matches the canvas to the image box, measured against the canvas's
    /// positioned container.
    fn fit(&self) {
        let image = self.image.get_bounding_client_rect();
        let (left, top) = match self.canvas.parent_element() {
            Some(container) => {
                let outer = container.get_bounding_client_rect();
                (image.left() - outer.left(), image.top() - outer.top())
            }
            None => (0.0, 0.0),
        };
        let width = image.width().round().max(MIN_SIDE);
        let height = image.height().round().max(MIN_SIDE);
        self.canvas.set_width(width as u32);
        self.canvas.set_height(height as u32);

        let style = self.canvas.style();
        let _ = style.set_property("left", &format!("{left}px"));
        let _ = style.set_property("top", &format!("{top}px"));
        let _ = style.set_property("width", &format!("{width}px"));
        let _ = style.set_property("height", &format!("{height}px"));
    }

    fn on_frame(&self, timestamp: f64) {
        self.pending.set(None);
        let again = {
            let mut surface = self.surface.borrow_mut();
            self.effect.borrow_mut().frame(timestamp, &mut *surface)
        };
        if again {
            self.schedule();
        }
    }

    fn schedule(&self) {
        let Some(window) = web_sys::window() else {
            return;
        };
        match window.request_animation_frame(self.tick.as_ref().unchecked_ref()) {
            Ok(id) => self.pending.set(Some(id)),
            Err(err) => console::error!("requestAnimationFrame failed", err),
        }
    }

    fn cancel_pending(&self) {
        if let (Some(id), Some(window)) = (self.pending.take(), web_sys::window()) {
            let _ = window.cancel_animation_frame(id);
        }
    }

    fn update_label(&self) {
        if let Some(toggle) = &self.toggle_button {
            toggle.set_text_content(Some(self.effect.borrow().label()));
        }
    }
}

impl Drop for Inner {
    // The tick closure is freed with us; a frame still queued would call into it.
    fn drop(&mut self) {
        self.cancel_pending();
    }
}
