//! User-initiated operations.
//!
//! Each function corresponds to one control on the page. Outcomes reach the
//! user through toasts raised by the controller and through re-rendering, so
//! the returned errors are only logged here.

use crate::dom::{self, Elements};
use crate::state;

/// Connect button: request accounts, then the first read.
pub async fn on_connect(els: &Elements) {
    let Some(app) = state::app() else {
        return;
    };
    els.connect_btn.set_disabled(true);
    if let Err(e) = app.connect().await {
        gloo_console::warn!(format!("connect: {}", e));
    }
    els.connect_btn.set_disabled(false);
}

/// Disconnect button: forget the account locally.
pub fn on_disconnect(_els: &Elements) {
    if let Some(app) = state::app() {
        app.disconnect();
    }
}

/// Refresh button: re-read the stored value.
pub async fn on_refresh(_els: &Elements) {
    let Some(app) = state::app() else {
        return;
    };
    if let Err(e) = app.refresh().await {
        gloo_console::warn!(format!("refresh: {}", e));
    }
}

/// Value input: keep the pending input in sync with what the user typed.
pub fn on_input(els: &Elements) {
    if let Some(app) = state::app() {
        app.set_pending_input(&dom::get_input_value(&els.value_input));
    }
}

/// Update button: submit the pending input as a transaction.
pub async fn on_submit(_els: &Elements) {
    let Some(app) = state::app() else {
        return;
    };
    if !app.can_submit() {
        return;
    }
    match app.submit().await {
        Ok(ack) => gloo_console::log!(format!("tx {}", ack.tx_hash)),
        Err(e) => gloo_console::warn!(format!("submit: {}", e)),
    }
}
