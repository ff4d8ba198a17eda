//! Browser presenter
//!
//! Updates the HTML overlay (score, joystick knob, start button) directly and
//! hands targets/collector to a JS render hook as JSON; the 3D scene itself
//! belongs to whichever WebXR engine the page uses.

use glam::{Vec2, Vec3};
use wasm_bindgen::{JsCast, JsValue};
use web_sys::{Document, Element, HtmlElement};

use super::Presenter;
use crate::platform::SessionPhase;
use crate::sim::{Collector, Target};

pub struct DomPresenter {
    score: Option<Element>,
    joystick_container: Option<HtmlElement>,
    joystick_handle: Option<HtmlElement>,
    ar_button: Option<HtmlElement>,
    /// Knob travel in CSS pixels
    joystick_radius: f32,
    /// `hook(targetsJson, collectorJson)` called once per frame
    render_hook: Option<js_sys::Function>,
    anchor_hook: Option<js_sys::Function>,
    targets_json: String,
}

fn html_element(document: &Document, id: &str) -> Option<HtmlElement> {
    let el = document.get_element_by_id(id);
    if el.is_none() {
        log::warn!("Missing #{} element", id);
    }
    el.and_then(|el| el.dyn_into::<HtmlElement>().ok())
}

fn set_display(el: &Option<HtmlElement>, visible: bool) {
    if let Some(el) = el {
        let _ = el
            .style()
            .set_property("display", if visible { "block" } else { "none" });
    }
}

impl DomPresenter {
    pub fn new(document: &Document, joystick_radius: f32) -> Self {
        Self {
            score: document.get_element_by_id("score"),
            joystick_container: html_element(document, "joystick-container"),
            joystick_handle: html_element(document, "joystick-handle"),
            ar_button: html_element(document, "ar-button"),
            joystick_radius,
            render_hook: None,
            anchor_hook: None,
            targets_json: String::from("[]"),
        }
    }

    pub fn set_render_hook(&mut self, hook: js_sys::Function) {
        self.render_hook = Some(hook);
    }

    pub fn set_anchor_hook(&mut self, hook: js_sys::Function) {
        self.anchor_hook = Some(hook);
    }
}

impl Presenter for DomPresenter {
    fn render_targets(&mut self, targets: &[Target]) {
        match serde_json::to_string(targets) {
            Ok(json) => self.targets_json = json,
            Err(e) => log::warn!("Could not encode targets: {}", e),
        }
    }

    // Draws with the targets cached by the render_targets call that precedes it
    fn render_collector(&mut self, collector: Option<&Collector>) {
        let Some(hook) = &self.render_hook else {
            return;
        };
        let collector_json = serde_json::to_string(&collector).unwrap_or_else(|_| "null".into());
        let _ = hook.call2(
            &JsValue::NULL,
            &JsValue::from_str(&self.targets_json),
            &JsValue::from_str(&collector_json),
        );
    }

    fn on_anchor_found(&mut self, pos: Vec3) {
        if let Some(hook) = &self.anchor_hook {
            let _ = hook.call3(
                &JsValue::NULL,
                &JsValue::from_f64(pos.x as f64),
                &JsValue::from_f64(pos.y as f64),
                &JsValue::from_f64(pos.z as f64),
            );
        }
    }

    fn on_input_vector(&mut self, vector: Vec2) {
        if let Some(handle) = &self.joystick_handle {
            let offset = vector * self.joystick_radius;
            let _ = handle.style().set_property(
                "transform",
                &format!("translate({}px, {}px)", offset.x, offset.y),
            );
        }
    }

    fn on_score(&mut self, score: u64) {
        if let Some(el) = &self.score {
            el.set_text_content(Some(&format!("Score: {}", score)));
        }
    }

    fn on_session_changed(&mut self, phase: SessionPhase, status: &str) {
        let running = phase == SessionPhase::Running;
        set_display(&self.joystick_container, running);
        set_display(&self.ar_button, !running);
        if let Some(button) = &self.ar_button {
            button.set_text_content(Some(status));
            let disabled = !matches!(phase, SessionPhase::Ready);
            let _ = if disabled {
                button.set_attribute("disabled", "")
            } else {
                button.remove_attribute("disabled")
            };
        }
    }
}
