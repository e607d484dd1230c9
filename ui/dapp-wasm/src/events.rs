//! Event binding.
//!
//! Wires all UI event listeners. Async handlers are spawned via
//! `wasm_bindgen_futures::spawn_local`.

use crate::dapp_ops;
use crate::dom::Elements;
use wasm_bindgen::JsCast;
use wasm_bindgen::prelude::*;

/// Helper: attach async click handler to an element.
macro_rules! on_click_async {
    ($el:expr, $els:expr, $handler:expr) => {{
        let els = $els.clone();
        let cb = Closure::wrap(Box::new(move |_: web_sys::MouseEvent| {
            let els2 = els.clone();
            wasm_bindgen_futures::spawn_local(async move {
                $handler(&els2).await;
            });
        }) as Box<dyn FnMut(_)>);
        $el.add_event_listener_with_callback("click", cb.as_ref().unchecked_ref())?;
        cb.forget();
    }};
}

/// Helper: attach sync handler for an arbitrary event type.
macro_rules! on_event {
    ($el:expr, $event:expr, $els:expr, $handler:expr) => {{
        let els = $els.clone();
        let cb = Closure::wrap(Box::new(move |_: web_sys::Event| {
            $handler(&els);
        }) as Box<dyn FnMut(_)>);
        $el.add_event_listener_with_callback($event, cb.as_ref().unchecked_ref())?;
        cb.forget();
    }};
}

/// Bind all UI event listeners. Call once after init.
pub fn bind_events(els: &Elements) -> Result<(), JsValue> {
    // ── Wallet ──
    on_click_async!(els.connect_btn, els, dapp_ops::on_connect);
    on_event!(els.disconnect_btn, "click", els, dapp_ops::on_disconnect);

    // ── Contract ──
    on_click_async!(els.refresh_btn, els, dapp_ops::on_refresh);
    on_event!(els.value_input, "input", els, dapp_ops::on_input);
    on_click_async!(els.submit_btn, els, dapp_ops::on_submit);

    Ok(())
}
