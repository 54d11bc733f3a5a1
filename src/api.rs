//! Backend Transport
//!
//! The two operations the script service exposes: fetch the item list and
//! submit a stock update. No retries, no caching; failures surface to the
//! calling flow immediately. Bodies come back as `serde_json::Value` so the
//! envelope normalizer can dispatch on shape.

use serde_json::Value;
use wasm_bindgen::{JsCast, JsValue};
use wasm_bindgen_futures::JsFuture;
use web_sys::{Headers, Request, RequestInit, Response, UrlSearchParams};

use crate::error::ApiError;

/// Form keys fixed by the backend's wire contract.
const CODE_PARAM: &str = "商品ID";
const STOCK_PARAM: &str = "在庫p数";

/// Endpoint base: compile-time override for production builds, dev-server
/// proxy path otherwise. Trailing slash stripped like the query string
/// expects.
fn api_base() -> &'static str {
    option_env!("RESTOCK_API_URL")
        .map(|url| url.trim_end_matches('/'))
        .unwrap_or("/api")
}

/// `GET <base>?action=list` — the full item collection.
pub async fn fetch_list() -> Result<Value, ApiError> {
    request(&format!("{}?action=list", api_base()), None).await
}

/// `POST <base>` — record a stock count and trigger recomputation.
pub async fn submit_update(code: &str, new_stock_count: u32) -> Result<Value, ApiError> {
    let params = UrlSearchParams::new().map_err(js_error)?;
    params.append(CODE_PARAM, code);
    params.append(STOCK_PARAM, &new_stock_count.to_string());
    request(api_base(), Some(String::from(params.to_string()))).await
}

async fn request(url: &str, form_body: Option<String>) -> Result<Value, ApiError> {
    let opts = RequestInit::new();
    match &form_body {
        Some(body) => {
            opts.set_method("POST");
            let headers = Headers::new().map_err(js_error)?;
            // URL-encoded form keeps this a CORS simple request; the script
            // backend cannot answer a preflight OPTIONS.
            headers
                .set(
                    "Content-Type",
                    "application/x-www-form-urlencoded;charset=UTF-8",
                )
                .map_err(js_error)?;
            opts.set_headers(&JsValue::from(headers));
            opts.set_body(&JsValue::from_str(body));
        }
        None => opts.set_method("GET"),
    }

    let request = Request::new_with_str_and_init(url, &opts).map_err(js_error)?;
    let window = web_sys::window().ok_or_else(|| ApiError::Network("no window".to_string()))?;
    let response = JsFuture::from(window.fetch_with_request(&request))
        .await
        .map_err(js_error)?;
    let response: Response = response
        .dyn_into()
        .map_err(|_| ApiError::Network("fetchの戻り値が不正です".to_string()))?;
    if !response.ok() {
        return Err(ApiError::Status(response.status()));
    }
    let body = JsFuture::from(response.json().map_err(js_error)?)
        .await
        .map_err(|_| ApiError::Network("応答がJSONではありません".to_string()))?;
    serde_wasm_bindgen::from_value(body).map_err(|_| ApiError::Malformed)
}

fn js_error(value: JsValue) -> ApiError {
    ApiError::Network(value.as_string().unwrap_or_else(|| format!("{:?}", value)))
}
