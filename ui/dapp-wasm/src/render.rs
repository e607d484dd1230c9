//! Applies the controller's render model to the DOM.
//!
//! Only two surfaces exist: the connect prompt and the connected panel. Called
//! by the controller after every state change.

use sd_wallet_core::{View, ViewState};

use crate::dom::{self, Elements};

pub fn render(els: &Elements, state: &ViewState) {
    match state.view() {
        View::ConnectPrompt => {
            els.connect_panel.set_hidden(false);
            els.dapp_panel.set_hidden(true);
            dom::set_text(&els.account_label, "");
            dom::set_text(&els.scalar_label, sd_wallet_core::SCALAR_PLACEHOLDER);
            dom::sync_input_value(&els.value_input, "");
            els.submit_btn.set_disabled(true);
        }
        View::Connected {
            account,
            account_short,
            scalar,
            stale,
            input,
            submit_enabled,
            writing,
        } => {
            els.connect_panel.set_hidden(true);
            els.dapp_panel.set_hidden(false);

            dom::set_text(&els.account_label, &account_short);
            let _ = els.account_label.set_attribute("title", &account);

            dom::set_text(&els.scalar_label, &scalar);
            dom::toggle_class(&els.scalar_label, "stale", stale);

            dom::sync_input_value(&els.value_input, &input);
            els.value_input.set_disabled(writing);

            els.submit_btn.set_disabled(!submit_enabled);
            els.submit_btn
                .set_text_content(Some(if writing { "Submitting\u{2026}" } else { "Update" }));
        }
    }
}
