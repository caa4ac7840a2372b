//! Browser host: `requestAnimationFrame` ticks, `IntersectionObserver`
//! activation and DOM rendering.
//!
//! [`WebTextType`] owns the pending animation-frame request and the
//! observer. Dropping it (or calling `free()` from JavaScript) cancels the
//! request and disconnects the observer.

use std::cell::RefCell;
use std::rc::Rc;

use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use web_sys::{
    Element, IntersectionObserver, IntersectionObserverEntry,
    IntersectionObserverInit,
};
use web_time::Instant;

use crate::component::TextType;
use crate::error::TextypeError;
use crate::options::Options;
use crate::render::RenderNode;

type FrameClosure = Closure<dyn FnMut(f64)>;
type FrameSlot = Rc<RefCell<Option<FrameClosure>>>;
type ObserverClosure = Closure<dyn FnMut(js_sys::Array, IntersectionObserver)>;

/// Install the panic hook and route `log` output to the browser console.
#[wasm_bindgen]
pub fn init_logging() {
    console_error_panic_hook::set_once();
    if console_log::init_with_level(log::Level::Info).is_err() {
        log::debug!("console logger already installed");
    }
}

struct Shared {
    component: TextType,
    element: Element,
    frame_id: Option<i32>,
    stopped: bool,
}

impl Shared {
    fn draw(&self) {
        self.element
            .set_inner_html(&self.component.render().to_html());
    }

    fn degrade(&mut self, reason: &str) {
        log::warn!("{reason}");
        self.component.degrade();
        self.frame_id = None;
        self.draw();
    }
}

/// One animated element in the page.
#[wasm_bindgen]
pub struct WebTextType {
    shared: Rc<RefCell<Shared>>,
    frame: FrameSlot,
    observer: Option<(IntersectionObserver, ObserverClosure)>,
}

#[wasm_bindgen]
impl WebTextType {
    /// Start animating into `element` with options given as TOML.
    ///
    /// Invalid options render the static fallback and return an error.
    #[wasm_bindgen(constructor)]
    pub fn new(element: Element, options_toml: &str) -> Result<Self, JsValue> {
        let options = Options::from_toml_str(options_toml).map_err(to_js)?;
        Self::mount(element, &options).map_err(to_js)
    }

    /// Call `callback(text, index)` with the next string each time one has
    /// been fully erased. The callback must not call back into this handle.
    #[wasm_bindgen(js_name = onSentenceComplete)]
    pub fn set_on_sentence_complete(&mut self, callback: js_sys::Function) {
        self.on_sentence_complete(move |text, index| {
            let result = callback.call2(
                &JsValue::NULL,
                &JsValue::from_str(text),
                &JsValue::from(index as u32),
            );
            if result.is_err() {
                log::warn!("onSentenceComplete callback threw");
            }
        });
    }

    /// Stop the animation and release browser resources.
    pub fn stop(&mut self) {
        self.release();
    }

    /// Text currently displayed.
    pub fn displayed(&self) -> String {
        self.shared.borrow().component.displayed().to_owned()
    }
}

impl WebTextType {
    /// Start animating into `element`.
    pub fn mount(
        element: Element,
        options: &Options,
    ) -> Result<Self, TextypeError> {
        let component = match TextType::new(options) {
            Ok(component) => component,
            Err(err) => {
                element.set_inner_html(&RenderNode::fallback(options).to_html());
                return Err(err);
            }
        };
        let mut handle = Self {
            shared: Rc::new(RefCell::new(Shared {
                component,
                element,
                frame_id: None,
                stopped: false,
            })),
            frame: Rc::new(RefCell::new(None)),
            observer: None,
        };
        install_frame_closure(&handle.shared, &handle.frame);

        let awaits_visibility = {
            let mut shared = handle.shared.borrow_mut();
            let _ = shared.component.mount(Instant::now());
            shared.draw();
            shared.component.awaits_visibility()
        };
        if awaits_visibility {
            handle.observe(options.behavior.visibility_threshold);
        } else {
            request_frame(&handle.shared, &handle.frame);
        }
        Ok(handle)
    }

    /// Register the sentence-complete callback, replacing any previous one.
    pub fn on_sentence_complete<F>(&mut self, callback: F)
    where
        F: FnMut(&str, usize) + 'static,
    {
        self.shared
            .borrow_mut()
            .component
            .on_sentence_complete(callback);
    }

    fn observe(&mut self, threshold: f32) {
        let shared = Rc::clone(&self.shared);
        let frame = Rc::clone(&self.frame);
        let callback: ObserverClosure = Closure::new(
            move |entries: js_sys::Array, observer: IntersectionObserver| {
                let activated = entries
                    .iter()
                    .filter_map(|e| e.dyn_into::<IntersectionObserverEntry>().ok())
                    .any(|entry| {
                        shared.borrow_mut().component.on_intersection(
                            entry.intersection_ratio() as f32,
                            Instant::now(),
                        )
                    });
                if activated {
                    observer.disconnect();
                    request_frame(&shared, &frame);
                }
            },
        );

        let init = IntersectionObserverInit::new();
        init.set_threshold(&JsValue::from_f64(f64::from(threshold)));
        let created = IntersectionObserver::new_with_options(
            callback.as_ref().unchecked_ref(),
            &init,
        );
        match created {
            Ok(observer) => {
                observer.observe(&self.shared.borrow().element);
                self.observer = Some((observer, callback));
            }
            Err(_) => self
                .shared
                .borrow_mut()
                .degrade("IntersectionObserver unavailable, rendering static text"),
        }
    }

    fn release(&mut self) {
        let pending = {
            let mut shared = self.shared.borrow_mut();
            shared.stopped = true;
            shared.frame_id.take()
        };
        if let (Some(id), Some(window)) = (pending, web_sys::window()) {
            if window.cancel_animation_frame(id).is_err() {
                log::debug!("animation frame {id} already fired");
            }
        }
        if let Some((observer, _callback)) = self.observer.take() {
            observer.disconnect();
        }
        // Breaks the closure's reference cycle through its own slot
        let _ = self.frame.borrow_mut().take();
    }
}

impl Drop for WebTextType {
    fn drop(&mut self) {
        self.release();
    }
}

fn install_frame_closure(shared: &Rc<RefCell<Shared>>, frame: &FrameSlot) {
    let shared_in = Rc::clone(shared);
    let frame_in = Rc::clone(frame);
    *frame.borrow_mut() = Some(Closure::new(move |_timestamp: f64| {
        let keep_going = {
            let mut shared = shared_in.borrow_mut();
            shared.frame_id = None;
            if shared.stopped {
                return;
            }
            let outcome = shared.component.on_frame(Instant::now());
            if outcome.is_transition() || shared.component.is_finished() {
                shared.draw();
            }
            shared.component.wants_frame()
        };
        if keep_going {
            request_frame(&shared_in, &frame_in);
        }
    }));
}

fn request_frame(shared: &Rc<RefCell<Shared>>, frame: &FrameSlot) {
    let requested = {
        let slot = frame.borrow();
        match (web_sys::window(), slot.as_ref()) {
            (Some(window), Some(closure)) => window
                .request_animation_frame(closure.as_ref().unchecked_ref())
                .ok(),
            _ => None,
        }
    };
    let mut shared = shared.borrow_mut();
    if shared.stopped {
        return;
    }
    match requested {
        Some(id) => shared.frame_id = Some(id),
        None => shared
            .degrade("requestAnimationFrame unavailable, rendering static text"),
    }
}

fn to_js(err: TextypeError) -> JsValue {
    JsValue::from_str(&err.to_string())
}
