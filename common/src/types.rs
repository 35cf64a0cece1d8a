//! 解析結果・選択ファイル・一覧の型定義
//!
//! CLIとWeb(WASM)で共有される型:
//! - SelectedFile: 送信待ちのローカルファイル（ハンドル型はプラットフォームごと）
//! - AnalysisResult: 解析サービスの応答（セクション形式 / テキスト形式）
//! - ResumeListing: 保存済み履歴書ファイル名の一覧

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

/// ユーザーが選択したファイル
///
/// `handle` はブラウザでは `web_sys::File`、CLIでは `PathBuf`。
#[derive(Debug, Clone, PartialEq)]
pub struct SelectedFile<F> {
    pub name: String,
    pub handle: F,
}

impl<F> SelectedFile<F> {
    pub fn new(name: impl Into<String>, handle: F) -> Self {
        Self {
            name: name.into(),
            handle,
        }
    }
}

/// セクション単位の評価
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SectionFeedback {
    /// 0-10 の想定だが範囲チェックはしない
    #[serde(deserialize_with = "lenient_score")]
    pub score: Option<i64>,

    #[serde(deserialize_with = "lenient_text")]
    pub strengths: String,

    #[serde(deserialize_with = "lenient_text")]
    pub improvements: String,

    #[serde(deserialize_with = "lenient_text")]
    pub recommendations: String,
}

impl SectionFeedback {
    /// 1セクション分の値を変換する。オブジェクト以外は本文として strengths に入れる
    pub(crate) fn from_value(value: Value) -> Self {
        match value {
            Value::Object(_) => serde_json::from_value(value).unwrap_or_default(),
            Value::Null => Self::default(),
            Value::String(text) => Self {
                strengths: text,
                ..Default::default()
            },
            other => Self {
                strengths: other.to_string(),
                ..Default::default()
            },
        }
    }
}

/// 解析結果
///
/// `/api/analyze` の2種類の応答形式を境界で判別した結果。
/// 正規の形式は `Sections`、`Text` は旧形式 `{ "analysis": "..." }`。
#[derive(Debug, Clone, PartialEq)]
pub enum AnalysisResult {
    /// セクション名でソート済み
    Sections(Vec<(String, SectionFeedback)>),
    Text(String),
}

/// `GET /api/resumes` の応答
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ResumeListing {
    pub files: Vec<String>,
}

impl ResumeListing {
    pub fn len(&self) -> usize {
        self.files.len()
    }

    pub fn is_empty(&self) -> bool {
        self.files.is_empty()
    }
}

/// スコアは数値・数値文字列・"7/10" 形式を受け付け、それ以外は None
fn lenient_score<'de, D>(deserializer: D) -> std::result::Result<Option<i64>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Value::deserialize(deserializer)?;
    Ok(match value {
        Value::Number(n) => n.as_i64().or_else(|| n.as_f64().map(|f| f.round() as i64)),
        Value::String(s) => s
            .split('/')
            .next()
            .and_then(|head| head.trim().parse::<f64>().ok())
            .map(|f| f.round() as i64),
        _ => None,
    })
}

/// null は空文字、文字列以外はJSON表記のまま
fn lenient_text<'de, D>(deserializer: D) -> std::result::Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Value::deserialize(deserializer)?;
    Ok(match value {
        Value::Null => String::new(),
        Value::String(s) => s,
        other => other.to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_section_feedback_default() {
        let feedback = SectionFeedback::default();
        assert_eq!(feedback.score, None);
        assert_eq!(feedback.strengths, "");
    }

    #[test]
    fn test_section_feedback_deserialize() {
        let json = r#"{
            "score": 7,
            "strengths": "Clear impact metrics",
            "improvements": "Dates are inconsistent",
            "recommendations": "Use one date format"
        }"#;

        let feedback: SectionFeedback = serde_json::from_str(json).expect("デシリアライズ失敗");
        assert_eq!(feedback.score, Some(7));
        assert_eq!(feedback.strengths, "Clear impact metrics");
        assert_eq!(feedback.improvements, "Dates are inconsistent");
        assert_eq!(feedback.recommendations, "Use one date format");
    }

    #[test]
    fn test_section_feedback_missing_fields() {
        let feedback: SectionFeedback = serde_json::from_str(r#"{"strengths": "ok"}"#)
            .expect("デシリアライズ失敗");
        assert_eq!(feedback.score, None);
        assert_eq!(feedback.strengths, "ok");
        assert_eq!(feedback.improvements, "");
        assert_eq!(feedback.recommendations, "");
    }

    #[test]
    fn test_score_variants() {
        let cases = [
            (r#"{"score": 8}"#, Some(8)),
            (r#"{"score": 6.6}"#, Some(7)),
            (r#"{"score": "9"}"#, Some(9)),
            (r#"{"score": "5/10"}"#, Some(5)),
            (r#"{"score": 42}"#, Some(42)),
            (r#"{"score": null}"#, None),
            (r#"{"score": "great"}"#, None),
            (r#"{"score": [1]}"#, None),
        ];

        for (json, expected) in cases {
            let feedback: SectionFeedback = serde_json::from_str(json).expect("デシリアライズ失敗");
            assert_eq!(feedback.score, expected, "入力: {}", json);
        }
    }

    #[test]
    fn test_text_null_and_non_string() {
        let feedback: SectionFeedback =
            serde_json::from_str(r#"{"strengths": null, "improvements": 3}"#)
                .expect("デシリアライズ失敗");
        assert_eq!(feedback.strengths, "");
        assert_eq!(feedback.improvements, "3");
    }

    #[test]
    fn test_section_from_non_object_values() {
        let text = SectionFeedback::from_value(Value::String("Strong overall".into()));
        assert_eq!(text.score, None);
        assert_eq!(text.strengths, "Strong overall");
        assert_eq!(text.improvements, "");

        assert_eq!(SectionFeedback::from_value(Value::Null), SectionFeedback::default());
        assert_eq!(SectionFeedback::from_value(serde_json::json!(7)).strengths, "7");
        assert_eq!(SectionFeedback::from_value(serde_json::json!(["a"])).strengths, r#"["a"]"#);
    }

    #[test]
    fn test_section_from_object_value() {
        let feedback = SectionFeedback::from_value(serde_json::json!({"score": "8/10", "strengths": "Impact"}));
        assert_eq!(feedback.score, Some(8));
        assert_eq!(feedback.strengths, "Impact");
    }

    #[test]
    fn test_resume_listing_deserialize() {
        let listing: ResumeListing =
            serde_json::from_str(r#"{"files": ["a.pdf", "b.txt"]}"#).expect("デシリアライズ失敗");
        assert_eq!(listing.len(), 2);
        assert_eq!(listing.files, vec!["a.pdf", "b.txt"]);
    }

    #[test]
    fn test_selected_file_new() {
        let file = SelectedFile::new("resume.pdf", 42u32);
        assert_eq!(file.name, "resume.pdf");
        assert_eq!(file.handle, 42);
    }
}
