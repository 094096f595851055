//! 解析サービス（analyze-food）呼び出し
//!
//! `fetch` で `{ imageData }` をPOSTし、レスポンスを共通パーサーで解釈する。

use nutrivision_common::config::ENDPOINT_ENV;
use nutrivision_common::{AnalyzeRequest, Error, Result, ServiceConfig, ServiceReply};
use wasm_bindgen::prelude::*;
use wasm_bindgen_futures::JsFuture;
use web_sys::{Request, RequestInit, RequestMode, Response};

/// ビルド時の環境変数から接続設定を作る
pub fn service_config() -> ServiceConfig {
    let endpoint = option_env!("NUTRIVISION_ENDPOINT");
    let api_key = option_env!("NUTRIVISION_API_KEY").map(str::to_string);

    match endpoint {
        Some(endpoint) => ServiceConfig::new(endpoint, api_key).unwrap_or_else(|err| {
            gloo::console::warn!(format!("{} is invalid ({}), using default", ENDPOINT_ENV, err));
            ServiceConfig::default()
        }),
        None => ServiceConfig {
            api_key: api_key.filter(|k| !k.trim().is_empty()),
            ..ServiceConfig::default()
        },
    }
}

/// リクエスト本文
pub fn request_body(request: &AnalyzeRequest) -> Result<String> {
    Ok(serde_json::to_string(request)?)
}

fn transport(err: JsValue) -> Error {
    Error::Transport(format!("{:?}", err))
}

fn unexpected(err: JsValue) -> Error {
    Error::Unexpected(format!("{:?}", err))
}

/// 解析サービスを1回呼び出す
pub async fn invoke_analysis(config: &ServiceConfig, request: &AnalyzeRequest) -> Result<ServiceReply> {
    let body = request_body(request)?;

    let opts = RequestInit::new();
    opts.set_method("POST");
    opts.set_mode(RequestMode::Cors);
    opts.set_body(&JsValue::from_str(&body));

    let request = Request::new_with_str_and_init(&config.endpoint, &opts).map_err(unexpected)?;
    let headers = request.headers();
    headers.set("Content-Type", "application/json").map_err(unexpected)?;
    for (name, value) in config.auth_headers() {
        headers.set(name, &value).map_err(unexpected)?;
    }

    let window = web_sys::window().ok_or_else(|| Error::Unexpected("window is not available".into()))?;
    let resp_value = JsFuture::from(window.fetch_with_request(&request))
        .await
        .map_err(transport)?;
    let resp: Response = resp_value.dyn_into().map_err(unexpected)?;

    if !resp.ok() {
        return Err(Error::Transport(format!("HTTP {}", resp.status())));
    }

    let json = JsFuture::from(resp.json().map_err(unexpected)?)
        .await
        .map_err(|e| Error::Unexpected(format!("response is not JSON: {:?}", e)))?;
    let value: serde_json::Value = serde_wasm_bindgen::from_value(json)
        .map_err(|e| Error::Unexpected(e.to_string()))?;

    ServiceReply::from_json(value)
}
