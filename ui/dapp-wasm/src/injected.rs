//! EIP-1193 provider injected by the wallet extension as `window.ethereum`.
//!
//! The object is looked up on every request: extensions may inject late, and a
//! missing object surfaces as `ProviderError::Unavailable`.

use async_trait::async_trait;
use js_sys::{Function, Object, Promise, Reflect};
use sd_chain_client::{Eip1193Provider, ProviderError};
use serde::Serialize;
use serde_json::Value;
use wasm_bindgen::JsCast;
use wasm_bindgen::prelude::*;
use wasm_bindgen_futures::JsFuture;

#[derive(Debug, Clone, Copy, Default)]
pub struct InjectedProvider;

impl InjectedProvider {
    fn ethereum() -> Option<JsValue> {
        let window = web_sys::window()?;
        let ethereum = Reflect::get(&window, &JsValue::from_str("ethereum")).ok()?;
        if ethereum.is_undefined() || ethereum.is_null() {
            None
        } else {
            Some(ethereum)
        }
    }

    pub fn detected() -> bool {
        Self::ethereum().is_some()
    }
}

#[async_trait(?Send)]
impl Eip1193Provider for InjectedProvider {
    async fn request(&self, method: &str, params: Value) -> Result<Value, ProviderError> {
        let ethereum = Self::ethereum().ok_or(ProviderError::Unavailable)?;

        let request_fn = Reflect::get(&ethereum, &JsValue::from_str("request"))
            .ok()
            .and_then(|f| f.dyn_into::<Function>().ok())
            .ok_or_else(|| ProviderError::Malformed("window.ethereum.request is not a function".to_string()))?;

        let js_params = params
            .serialize(&serde_wasm_bindgen::Serializer::json_compatible())
            .map_err(|e| ProviderError::Malformed(format!("params: {}", e)))?;

        let args = Object::new();
        Reflect::set(&args, &JsValue::from_str("method"), &JsValue::from_str(method))
            .map_err(js_error)?;
        Reflect::set(&args, &JsValue::from_str("params"), &js_params).map_err(js_error)?;

        let pending = request_fn.call1(&ethereum, &args).map_err(js_error)?;
        let promise = pending
            .dyn_into::<Promise>()
            .map_err(|_| ProviderError::Malformed(format!("{} did not return a promise", method)))?;

        let result = JsFuture::from(promise).await.map_err(js_error)?;
        if result.is_undefined() || result.is_null() {
            return Ok(Value::Null);
        }

        serde_wasm_bindgen::from_value(result)
            .map_err(|e| ProviderError::Malformed(format!("{} result: {}", method, e)))
    }
}

/// Map a rejected promise (`{ code, message }` per EIP-1193) to a provider error.
fn js_error(err: JsValue) -> ProviderError {
    let code = Reflect::get(&err, &JsValue::from_str("code"))
        .ok()
        .and_then(|c| c.as_f64());
    let message = Reflect::get(&err, &JsValue::from_str("message"))
        .ok()
        .and_then(|m| m.as_string())
        .or_else(|| err.as_string())
        .unwrap_or_else(|| format!("{:?}", err));

    match code {
        Some(code) => ProviderError::from_rpc(code as i64, message),
        None => ProviderError::Transport(message),
    }
}
