//! REST Command Bindings
//!
//! Frontend glue to the backend API, organized by domain. Owns the
//! fetch plumbing and the error taxonomy; callers see typed results.

mod card;
mod category;

pub use card::*;
pub use category::*;

use serde::de::DeserializeOwned;
use serde::Serialize;
use wasm_bindgen::{JsCast, JsValue};
use wasm_bindgen_futures::JsFuture;
use web_sys::{Request, RequestInit, Response};

const API_BASE: &str = "/api";

/// Remote call failures as the UI distinguishes them.
#[derive(Debug, Clone, PartialEq)]
pub enum ApiError {
    /// 404: the target no longer exists server-side. Callers treat this
    /// as success-equivalent and update local state to reflect removal.
    Gone,
    Status(u16, String),
    Network(String),
    Decode(String),
}

impl std::fmt::Display for ApiError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ApiError::Gone => write!(f, "Item no longer exists"),
            ApiError::Status(code, text) => write!(f, "Server rejected the request ({code} {text})"),
            ApiError::Network(msg) => write!(f, "Network error: {msg}"),
            ApiError::Decode(msg) => write!(f, "Unexpected response: {msg}"),
        }
    }
}

pub type ApiResult<T> = Result<T, ApiError>;

fn encode<T: Serialize>(args: &T) -> ApiResult<String> {
    serde_json::to_string(args).map_err(|e| ApiError::Decode(e.to_string()))
}

async fn dispatch(method: &str, path: &str, body: Option<String>) -> ApiResult<Response> {
    let window = web_sys::window().ok_or_else(|| ApiError::Network("no window".into()))?;

    let opts = RequestInit::new();
    opts.set_method(method);
    if let Some(body) = body {
        opts.set_body(&JsValue::from_str(&body));
    }

    let url = format!("{API_BASE}{path}");
    let request = Request::new_with_str_and_init(&url, &opts)
        .map_err(|e| ApiError::Network(format!("{e:?}")))?;
    request
        .headers()
        .set("Content-Type", "application/json")
        .map_err(|e| ApiError::Network(format!("{e:?}")))?;

    let response = JsFuture::from(window.fetch_with_request(&request))
        .await
        .map_err(|e| ApiError::Network(format!("{e:?}")))?;
    let response: Response = response
        .dyn_into()
        .map_err(|e| ApiError::Network(format!("{e:?}")))?;

    if response.status() == 404 {
        return Err(ApiError::Gone);
    }
    if !response.ok() {
        return Err(ApiError::Status(response.status(), response.status_text()));
    }
    Ok(response)
}

async fn fetch_json<T: DeserializeOwned>(method: &str, path: &str, body: Option<String>) -> ApiResult<T> {
    let response = dispatch(method, path, body).await?;
    let json = JsFuture::from(response.json().map_err(|e| ApiError::Decode(format!("{e:?}")))?)
        .await
        .map_err(|e| ApiError::Decode(format!("{e:?}")))?;
    serde_wasm_bindgen::from_value(json).map_err(|e| ApiError::Decode(e.to_string()))
}

async fn fetch_unit(method: &str, path: &str, body: Option<String>) -> ApiResult<()> {
    dispatch(method, path, body).await.map(|_| ())
}
