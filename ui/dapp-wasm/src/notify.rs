//! Toast notifications.
//!
//! Each notification becomes a `.toast` element in `#toastContainer` and removes
//! itself after `TOAST_MS`. Errors are mirrored to the browser console.

use gloo_timers::callback::Timeout;
use sd_api_types::{Notification, NotificationKind};
use sd_wallet_core::Notifier;
use web_sys::Element;

use crate::dom;

pub const TOAST_MS: u32 = 4_000;

#[derive(Clone)]
pub struct ToastNotifier {
    container: Element,
}

impl ToastNotifier {
    pub fn new(container: Element) -> Self {
        Self { container }
    }
}

impl Notifier for ToastNotifier {
    fn notify(&self, notification: Notification) {
        match notification.kind {
            NotificationKind::Error => gloo_console::error!(notification.message.clone()),
            _ => gloo_console::log!(notification.message.clone()),
        }

        let Ok(toast) = dom::create_element("div") else {
            return;
        };
        let _ = toast.set_attribute("class", &toast_class(notification.kind));
        let _ = toast.set_attribute("role", "status");
        dom::set_text(&toast, &notification.message);
        if self.container.append_child(&toast).is_err() {
            return;
        }

        Timeout::new(TOAST_MS, move || toast.remove()).forget();
    }
}

pub fn toast_class(kind: NotificationKind) -> String {
    format!("toast toast--{}", kind.as_str())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn toast_class_carries_kind_modifier() {
        assert_eq!(toast_class(NotificationKind::Error), "toast toast--error");
        assert_eq!(toast_class(NotificationKind::Success), "toast toast--success");
    }
}
