//! DOM element bindings.
//!
//! All fields are resolved once at startup. To add new UI elements, add a field
//! here and bind it in `Elements::bind()`.

use gloo_utils::document;
use wasm_bindgen::prelude::*;
use web_sys::{Element, HtmlButtonElement, HtmlElement, HtmlInputElement};

// ── Helpers ──

pub fn by_id(id: &str) -> Option<Element> {
    document().get_element_by_id(id)
}

pub fn by_id_typed<T: JsCast>(id: &str) -> Option<T> {
    by_id(id).and_then(|e| e.dyn_into::<T>().ok())
}

pub fn set_text(el: &Element, text: &str) {
    el.set_text_content(Some(text));
}

pub fn get_input_value(el: &HtmlInputElement) -> String {
    el.value().trim().to_string()
}

/// Only touch the input when the value actually differs, so the caret stays put while typing.
pub fn sync_input_value(el: &HtmlInputElement, val: &str) {
    if el.value().trim() != val {
        el.set_value(val);
    }
}

pub fn toggle_class(el: &Element, cls: &str, force: bool) {
    let _ = el.class_list().toggle_with_force(cls, force);
}

pub fn create_element(tag: &str) -> Result<Element, JsValue> {
    document().create_element(tag)
}

// ── Elements struct ──

/// All DOM element references used by the dApp UI.
/// Clone-friendly (all inner types are reference-counted via JS GC).
#[derive(Clone)]
pub struct Elements {
    // Disconnected surface
    pub connect_panel: HtmlElement,
    pub connect_btn: HtmlButtonElement,

    // Connected surface
    pub dapp_panel: HtmlElement,
    pub account_label: Element,
    pub disconnect_btn: HtmlButtonElement,
    pub scalar_label: Element,
    pub refresh_btn: HtmlButtonElement,
    pub value_input: HtmlInputElement,
    pub submit_btn: HtmlButtonElement,

    // Notifications
    pub toast_container: Element,
}

macro_rules! get_el {
    ($id:expr) => {
        by_id($id).ok_or_else(|| JsValue::from_str(&format!("missing element #{}", $id)))?
    };
}

macro_rules! get_typed {
    ($ty:ty, $id:expr) => {
        by_id_typed::<$ty>($id)
            .ok_or_else(|| JsValue::from_str(&format!("missing {} #{}", stringify!($ty), $id)))?
    };
}

impl Elements {
    /// Resolve all DOM references. Call once after DOMContentLoaded.
    pub fn bind() -> Result<Elements, JsValue> {
        Ok(Elements {
            connect_panel: get_typed!(HtmlElement, "connectPanel"),
            connect_btn: get_typed!(HtmlButtonElement, "connectBtn"),

            dapp_panel: get_typed!(HtmlElement, "dappPanel"),
            account_label: get_el!("accountLabel"),
            disconnect_btn: get_typed!(HtmlButtonElement, "disconnectBtn"),
            scalar_label: get_el!("scalarLabel"),
            refresh_btn: get_typed!(HtmlButtonElement, "refreshBtn"),
            value_input: get_typed!(HtmlInputElement, "valueInput"),
            submit_btn: get_typed!(HtmlButtonElement, "submitBtn"),

            toast_container: get_el!("toastContainer"),
        })
    }
}
