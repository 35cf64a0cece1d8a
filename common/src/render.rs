//! 表示用モデル
//!
//! 解析結果と一覧をWeb/CLI共通の表示単位に変換する。
//! 変換は純粋関数で、同じ入力なら常に同じ出力になる。

use std::fmt;

use crate::config::ServiceConfig;
use crate::types::{AnalysisResult, ResumeListing, SectionFeedback};

/// ファイル選択ダイアログに渡す拡張子フィルタ（参考値で強制はしない）
pub const ACCEPT_EXTENSIONS: &str = ".pdf,.docx,.txt";

const SUGGESTED_EXTENSIONS: &[&str] = &["pdf", "docx", "txt"];

/// 一覧が空のときの表示
pub const EMPTY_LISTING_MESSAGE: &str = "No resumes uploaded yet.";

/// 推奨拡張子かどうか（大文字小文字は無視）
pub fn has_suggested_extension(file_name: &str) -> bool {
    file_name
        .rsplit_once('.')
        .map(|(_, ext)| {
            SUGGESTED_EXTENSIONS
                .iter()
                .any(|suggested| suggested.eq_ignore_ascii_case(ext))
        })
        .unwrap_or(false)
}

/// セクション1つ分の表示
#[derive(Debug, Clone, PartialEq)]
pub struct SectionBlock {
    pub key: String,
    pub heading: String,
    pub score_label: String,
    pub strengths: String,
    pub improvements: String,
    pub recommendations: String,
}

impl SectionBlock {
    fn new(key: &str, feedback: &SectionFeedback) -> Self {
        let score = feedback
            .score
            .map(|score| score.to_string())
            .unwrap_or_else(|| "-".to_string());

        Self {
            key: key.to_string(),
            heading: format!("{} SECTION", key.to_uppercase()),
            score_label: format!("Score: {}/10", score),
            strengths: feedback.strengths.clone(),
            improvements: feedback.improvements.clone(),
            recommendations: feedback.recommendations.clone(),
        }
    }
}

/// 解析結果の表示
#[derive(Debug, Clone, PartialEq)]
pub enum RenderedResult {
    Sections(Vec<SectionBlock>),
    /// 改行を保持して表示する
    Preformatted(String),
}

pub fn render_result(result: &AnalysisResult) -> RenderedResult {
    match result {
        AnalysisResult::Sections(sections) => RenderedResult::Sections(
            sections
                .iter()
                .map(|(key, feedback)| SectionBlock::new(key, feedback))
                .collect(),
        ),
        AnalysisResult::Text(text) => RenderedResult::Preformatted(text.clone()),
    }
}

impl fmt::Display for RenderedResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RenderedResult::Preformatted(text) => write!(f, "{}", text),
            RenderedResult::Sections(blocks) => {
                for (i, block) in blocks.iter().enumerate() {
                    if i > 0 {
                        writeln!(f)?;
                    }
                    writeln!(f, "{}", block.heading)?;
                    writeln!(f, "{}", block.score_label)?;
                    writeln!(f, "Strengths:")?;
                    writeln!(f, "{}", block.strengths)?;
                    writeln!(f, "Areas for Improvement:")?;
                    writeln!(f, "{}", block.improvements)?;
                    writeln!(f, "Recommendations:")?;
                    writeln!(f, "{}", block.recommendations)?;
                }
                Ok(())
            }
        }
    }
}

/// 一覧の1行
#[derive(Debug, Clone, PartialEq)]
pub struct ListingEntry {
    pub name: String,
    pub download_url: String,
}

/// 一覧をダウンロードリンク付きの行に変換（順序は応答のまま）
pub fn listing_entries(listing: &ResumeListing, config: &ServiceConfig) -> Vec<ListingEntry> {
    listing
        .files
        .iter()
        .map(|name| ListingEntry {
            name: name.clone(),
            download_url: config.download_url(name).to_string(),
        })
        .collect()
}
