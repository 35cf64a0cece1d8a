//! 解析サービスとのワイヤコントラクト
//!
//! HTTPクライアント（ブラウザfetch / reqwest）はステータスと本文だけを渡し、
//! 応答の判別と変換はここで行う。

use std::collections::BTreeMap;

use serde::Deserialize;
use serde_json::Value;

use crate::error::{Error, Result};
use crate::submission::SubmitError;
use crate::types::{AnalysisResult, ResumeListing, SectionFeedback};

/// サーバーがエラー本文を返さなかったときの汎用メッセージ
pub const FALLBACK_ERROR_MESSAGE: &str = "An error occurred while analyzing the resume";

/// `/api/analyze` 成功時の本文
///
/// `sections` があればそれを優先し、旧形式の `analysis` は代替として扱う。
#[derive(Deserialize)]
struct AnalyzeBody {
    #[serde(default)]
    sections: Option<BTreeMap<String, Value>>,
    #[serde(default)]
    analysis: Option<String>,
}

/// 2xx応答の本文を AnalysisResult に変換
///
/// セクションはキーでソートされる（BTreeMap）。
/// 個々のセクションは検証せず、オブジェクト以外の値も1セクションとして残す。
pub fn decode_analysis(body: &str) -> Result<AnalysisResult> {
    let parsed: AnalyzeBody = serde_json::from_str(body)?;

    match (parsed.sections, parsed.analysis) {
        (Some(sections), _) => Ok(AnalysisResult::Sections(
            sections
                .into_iter()
                .map(|(name, value)| (name, SectionFeedback::from_value(value)))
                .collect(),
        )),
        (None, Some(text)) => Ok(AnalysisResult::Text(text)),
        (None, None) => Err(Error::UnexpectedResponse(
            "body has neither 'sections' nor 'analysis'".into(),
        )),
    }
}

/// エラー応答の本文から表示用メッセージを取り出す
///
/// `error` が空でない文字列ならそのまま、それ以外は汎用メッセージ。
pub fn decode_error_message(body: &str) -> String {
    serde_json::from_str::<Value>(body)
        .ok()
        .as_ref()
        .and_then(|value| value.get("error"))
        .and_then(Value::as_str)
        .filter(|message| !message.trim().is_empty())
        .map(str::to_string)
        .unwrap_or_else(|| FALLBACK_ERROR_MESSAGE.to_string())
}

/// `/api/analyze` の応答をステータスで振り分ける
pub fn interpret_analyze_response(
    status: u16,
    body: &str,
) -> std::result::Result<AnalysisResult, SubmitError> {
    if (200..300).contains(&status) {
        decode_analysis(body).map_err(|e| SubmitError::Network(format!("malformed response: {}", e)))
    } else {
        Err(SubmitError::Remote {
            message: decode_error_message(body),
        })
    }
}

/// `GET /api/resumes` の本文を変換
pub fn decode_listing(body: &str) -> Result<ResumeListing> {
    Ok(serde_json::from_str(body)?)
}
