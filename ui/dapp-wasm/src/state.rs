//! Global application handle.
//!
//! Uses `RefCell`-wrapped `thread_local!` storage (WASM is single-threaded).
//! The view state itself lives inside the controller; this only holds the
//! controller so event handlers can reach it.

use sd_wallet_core::Dapp;
use std::cell::RefCell;
use std::rc::Rc;

use crate::injected::InjectedProvider;
use crate::notify::ToastNotifier;

pub type App = Dapp<InjectedProvider, ToastNotifier>;

thread_local! {
    static APP: RefCell<Option<Rc<App>>> = const { RefCell::new(None) };
}

pub fn install(app: Rc<App>) {
    APP.with(|slot| *slot.borrow_mut() = Some(app));
}

/// The controller, once `init()` has built it.
pub fn app() -> Option<Rc<App>> {
    APP.with(|slot| slot.borrow().clone())
}
