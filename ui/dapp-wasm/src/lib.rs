//! Storage dApp WASM Frontend
//!
//! Single page: connect a browser wallet, read the contract's stored value,
//! submit a new one. Logic lives in `sd-wallet-core`; this crate binds it to
//! the DOM and to `window.ethereum`.

pub mod config;
pub mod dapp_ops;
pub mod dom;
pub mod events;
pub mod injected;
pub mod notify;
pub mod render;
pub mod state;

use sd_api_types::Notification;
use sd_wallet_core::{Dapp, Notifier, ViewState};
use std::rc::Rc;
use wasm_bindgen::prelude::*;

/// WASM entry point – called automatically when the module is instantiated.
#[wasm_bindgen(start)]
pub async fn start() -> Result<(), JsValue> {
    // Improve panic messages in the browser console
    console_error_panic_hook::set_once();

    init().await
}

/// Main initialisation sequence.
async fn init() -> Result<(), JsValue> {
    let els = dom::Elements::bind()?;
    let notifier = notify::ToastNotifier::new(els.toast_container.clone());

    render::render(&els, &ViewState::default());

    let deployment = match config::load_deployment().await {
        Ok(deployment) => deployment,
        Err(e) => {
            notifier.notify(Notification::error(format!("deployment config unavailable: {}", e)));
            els.connect_btn.set_disabled(true);
            return Ok(());
        }
    };

    let app = match Dapp::new(injected::InjectedProvider, notifier.clone(), &deployment) {
        Ok(app) => Rc::new(app),
        Err(e) => {
            notifier.notify(Notification::error(e.to_string()));
            els.connect_btn.set_disabled(true);
            return Ok(());
        }
    };

    {
        let els = els.clone();
        app.subscribe(move |state| render::render(&els, state));
    }
    state::install(app);

    if !injected::InjectedProvider::detected() {
        gloo_console::log!("window.ethereum not found; connect will report a missing wallet");
    }

    events::bind_events(&els)?;

    Ok(())
}
