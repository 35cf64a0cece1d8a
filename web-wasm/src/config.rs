//! 起動時の接続設定読み込み
//!
//! index.html の `<meta name="resume-analyzer-api" content="...">` を優先し、
//! なければページのオリジンを使う。

use std::time::Duration;

use gloo::console;
use resume_analyzer_common::ServiceConfig;

const API_META_NAME: &str = "resume-analyzer-api";
const TIMEOUT_META_NAME: &str = "resume-analyzer-timeout";

pub fn load_service_config() -> ServiceConfig {
    let base = meta_content(API_META_NAME).or_else(page_origin);

    let config = match base.as_deref().map(ServiceConfig::new) {
        Some(Ok(config)) => config,
        Some(Err(e)) => {
            console::warn!(format!("invalid analysis service URL, using default: {}", e));
            ServiceConfig::default()
        }
        None => ServiceConfig::default(),
    };

    match meta_content(TIMEOUT_META_NAME).map(|value| parse_timeout_secs(&value)) {
        Some(Some(secs)) => config.with_timeout(Duration::from_secs(secs)),
        Some(None) => {
            console::warn!("invalid resume-analyzer-timeout, using default");
            config
        }
        None => config,
    }
}

fn meta_content(name: &str) -> Option<String> {
    let document = web_sys::window()?.document()?;
    let element = document
        .query_selector(&format!("meta[name=\"{}\"]", name))
        .ok()
        .flatten()?;
    element
        .get_attribute("content")
        .map(|content| content.trim().to_string())
        .filter(|content| !content.is_empty())
}

fn page_origin() -> Option<String> {
    web_sys::window()?.location().origin().ok()
}

/// 0秒や数値以外は無効
fn parse_timeout_secs(value: &str) -> Option<u64> {
    value.trim().parse::<u64>().ok().filter(|secs| *secs > 0)
}
