//! Deployment configuration loading.
//!
//! `deployment.json` sits next to the page, so each network build ships its own
//! contract address without recompiling the wasm module.

use gloo_utils::window;
use sd_api_types::DeploymentConfig;
use wasm_bindgen::JsCast;
use wasm_bindgen_futures::JsFuture;
use web_sys::{Request, RequestInit, Response};

pub const DEPLOYMENT_URL: &str = "deployment.json";

/// Fetch a URL and return the body as a plain string.
pub async fn fetch_text(url: &str) -> Result<String, String> {
    let opts = RequestInit::new();
    opts.set_method("GET");

    let request = Request::new_with_str_and_init(url, &opts).map_err(|e| format!("{:?}", e))?;

    let resp_value = JsFuture::from(window().fetch_with_request(&request))
        .await
        .map_err(|e| format!("fetch error: {:?}", e))?;

    let resp: Response = resp_value
        .dyn_into()
        .map_err(|_| "not a Response".to_string())?;

    if !resp.ok() {
        return Err(format!("{} {}: {}", resp.status(), resp.status_text(), url));
    }

    let text = JsFuture::from(resp.text().map_err(|e| format!("{:?}", e))?)
        .await
        .map_err(|e| format!("text error: {:?}", e))?;

    Ok(text.as_string().unwrap_or_default())
}

pub async fn load_deployment() -> Result<DeploymentConfig, String> {
    let raw = fetch_text(DEPLOYMENT_URL).await?;
    parse_deployment(&raw)
}

pub fn parse_deployment(raw: &str) -> Result<DeploymentConfig, String> {
    serde_json::from_str(raw).map_err(|e| format!("{}: {}", DEPLOYMENT_URL, e))
}
