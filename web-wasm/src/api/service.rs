//! 解析サービス連携（ブラウザfetch）
//!
//! - fetch_listing: `GET /api/resumes`
//! - analyze: `POST /api/analyze`（multipart、フィールド名 `file`）
//!
//! 応答の解釈は resume_analyzer_common::contract に任せる。

use std::cell::Cell;
use std::rc::Rc;

use gloo::timers::callback::Timeout;
use wasm_bindgen::prelude::*;
use wasm_bindgen_futures::JsFuture;
use web_sys::{AbortController, File, FormData, Request, RequestInit, RequestMode, Response};
use resume_analyzer_common::{
    decode_listing, interpret_analyze_response, AnalysisResult, ResumeListing, ServiceConfig,
    SubmitError,
};

/// JsValueのエラーをログ用文字列に変換
pub fn describe_js_error(error: &JsValue) -> String {
    error.as_string().unwrap_or_else(|| format!("{:?}", error))
}

/// fetchを実行してステータスと本文を返す
async fn send(request: &Request) -> Result<(u16, String), JsValue> {
    let window = web_sys::window().ok_or_else(|| JsValue::from_str("window is not available"))?;
    let resp_value = JsFuture::from(window.fetch_with_request(request)).await?;
    let resp: Response = resp_value.dyn_into()?;

    let text = JsFuture::from(resp.text()?).await?;
    Ok((resp.status(), text.as_string().unwrap_or_default()))
}

/// 保存済み履歴書の一覧を取得
pub async fn fetch_listing(config: &ServiceConfig) -> Result<ResumeListing, String> {
    let opts = RequestInit::new();
    opts.set_method("GET");
    opts.set_mode(RequestMode::Cors);

    let request = Request::new_with_str_and_init(config.resumes_url().as_str(), &opts)
        .map_err(|e| describe_js_error(&e))?;

    let (status, body) = send(&request).await.map_err(|e| describe_js_error(&e))?;
    if !(200..300).contains(&status) {
        return Err(format!("listing request failed with status {}", status));
    }

    decode_listing(&body).map_err(|e| e.to_string())
}

/// 履歴書を解析サービスへ送信
///
/// `controller` を abort すると Cancelled、設定のタイムアウトを超えると Timeout。
pub async fn analyze(
    config: &ServiceConfig,
    file: &File,
    controller: &AbortController,
) -> Result<AnalysisResult, SubmitError> {
    let form = FormData::new().map_err(|e| SubmitError::Network(describe_js_error(&e)))?;
    form.append_with_blob_and_filename("file", file, &file.name())
        .map_err(|e| SubmitError::Network(describe_js_error(&e)))?;

    // Content-Type はブラウザがboundary付きで設定する
    let opts = RequestInit::new();
    opts.set_method("POST");
    opts.set_mode(RequestMode::Cors);
    opts.set_body(&form);
    opts.set_signal(Some(&controller.signal()));

    let request = Request::new_with_str_and_init(config.analyze_url().as_str(), &opts)
        .map_err(|e| SubmitError::Network(describe_js_error(&e)))?;

    let timed_out = Rc::new(Cell::new(false));
    let timeout_ms = u32::try_from(config.timeout().as_millis()).unwrap_or(u32::MAX);
    let _timer = {
        let timed_out = timed_out.clone();
        let controller = controller.clone();
        Timeout::new(timeout_ms, move || {
            timed_out.set(true);
            controller.abort();
        })
    };

    match send(&request).await {
        Ok((status, body)) => interpret_analyze_response(status, &body),
        Err(_) if timed_out.get() => Err(SubmitError::Timeout),
        Err(_) if controller.signal().aborted() => Err(SubmitError::Cancelled),
        Err(e) => Err(SubmitError::Network(describe_js_error(&e))),
    }
}
