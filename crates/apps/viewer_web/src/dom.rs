//! Thin DOM helpers for the control buttons and the `--ui-scale` variable.

use layers::ButtonPresentation;
use wasm_bindgen::JsCast;
use wasm_bindgen::prelude::*;
use web_sys::{Document, Element, HtmlElement};

pub const ACTIVE_CLASS: &str = "active";

/// Inline style of a guide holder created by the viewer.
const HOLDER_STYLE: [(&str, &str); 10] = [
    ("position", "absolute"),
    ("top", "calc(10px + env(safe-area-inset-top))"),
    ("right", "calc(10px + env(safe-area-inset-right))"),
    ("z-index", "10"),
    ("background", "rgba(0,0,0,.45)"),
    ("backdrop-filter", "blur(6px)"),
    ("border-radius", "12px"),
    ("padding", "6px"),
    ("display", "flex"),
    ("gap", "6px"),
];

/// Inline style of a guide button created by the viewer; sizes follow `scale`.
fn button_style(scale: f64) -> [(&'static str, String); 6] {
    [
        ("border", "none".to_string()),
        ("padding", format!("calc(8px * {scale}) calc(12px * {scale})")),
        ("border-radius", "10px".to_string()),
        ("cursor", "pointer".to_string()),
        ("color", "#fff".to_string()),
        ("min-height", format!("calc(44px * {scale})")),
    ]
}

pub fn document() -> Result<Document, JsValue> {
    web_sys::window()
        .and_then(|w| w.document())
        .ok_or_else(|| JsValue::from_str("no document"))
}

pub fn log_error(message: &str) {
    web_sys::console::error_1(&JsValue::from_str(message));
}

/// `context: reason` on the console, with the reason taken from a thrown
/// JS value.
pub fn log_js_error(context: &str, err: &JsValue) {
    log_error(&format!("{context}: {}", js_error_text(err)));
}

/// Readable reason for a thrown JS value: the string itself or an `Error`'s
/// message.
pub fn js_error_text(err: &JsValue) -> String {
    describe_thrown(
        err.as_string(),
        err.dyn_ref::<js_sys::Error>().map(|e| String::from(e.message())),
    )
}

fn describe_thrown(text: Option<String>, error_message: Option<String>) -> String {
    text.or(error_message)
        .filter(|t| !t.is_empty())
        .unwrap_or_else(|| "unknown error".to_string())
}

pub fn log_warn(message: &str) {
    web_sys::console::warn_1(&JsValue::from_str(message));
}

/// Write `--ui-scale` on the root element so the stylesheet can follow.
pub fn set_ui_scale_var(value: &str) -> Result<(), JsValue> {
    let root = document()?
        .document_element()
        .ok_or_else(|| JsValue::from_str("no root element"))?;
    root.dyn_into::<HtmlElement>()?
        .style()
        .set_property("--ui-scale", value)
}

pub fn set_active(element: &Element, active: bool) -> Result<(), JsValue> {
    element
        .class_list()
        .toggle_with_force(ACTIVE_CLASS, active)
        .map(|_| ())
}

/// Mark the selector buttons; ids missing from the page are skipped.
pub fn render_selectors(states: &[(&str, bool)]) -> Result<(), JsValue> {
    let doc = document()?;
    for (id, active) in states {
        if let Some(el) = doc.get_element_by_id(id) {
            set_active(&el, *active)?;
        }
    }
    Ok(())
}

pub fn render_button(presentation: &ButtonPresentation) -> Result<(), JsValue> {
    let Some(el) = document()?.get_element_by_id(presentation.id) else {
        return Ok(());
    };
    el.set_text_content(Some(presentation.text));
    set_active(&el, presentation.active)?;
    el.dyn_into::<HtmlElement>()?
        .style()
        .set_property("background", presentation.background)
}

/// Find the element with `id`, or create a `tag` element with that id,
/// apply `style` and append it to `parent`. Existing elements keep their
/// own styling.
fn ensure_element<'a>(
    doc: &Document,
    parent: &Element,
    tag: &str,
    id: &str,
    style: impl IntoIterator<Item = (&'a str, String)>,
) -> Result<Element, JsValue> {
    if let Some(el) = doc.get_element_by_id(id) {
        return Ok(el);
    }
    let el = doc.create_element(tag)?;
    el.set_id(id);
    let css = el.clone().dyn_into::<HtmlElement>()?.style();
    for (property, value) in style {
        css.set_property(property, &value)?;
    }
    parent.append_child(&el)?;
    Ok(el)
}

/// The guide button container, created at the top right when the page has none.
pub fn ensure_guide_holder(doc: &Document, id: &str) -> Result<Element, JsValue> {
    let body = doc.body().ok_or_else(|| JsValue::from_str("no body"))?;
    let style = HOLDER_STYLE.map(|(p, v)| (p, v.to_string()));
    ensure_element(doc, &body, "div", id, style)
}

pub fn ensure_guide_button(
    doc: &Document,
    holder: &Element,
    id: &str,
    scale: f64,
) -> Result<Element, JsValue> {
    ensure_element(doc, holder, "button", id, button_style(scale))
}

/// Run `handler` on every click of `element`. The listener lives as long as
/// the page.
pub fn on_click(element: &Element, handler: impl FnMut() + 'static) -> Result<(), JsValue> {
    let closure = Closure::<dyn FnMut()>::new(handler);
    element.add_event_listener_with_callback("click", closure.as_ref().unchecked_ref())?;
    closure.forget();
    Ok(())
}
