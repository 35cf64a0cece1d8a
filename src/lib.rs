//! 履歴書解析サービスのクライアント
//!
//! ブラウザ版と同じ状態機械（resume_analyzer_common::AnalyzerModel）をCLIから動かす。

pub mod cli;
pub mod config;
pub mod error;
pub mod client;
pub mod analyze;
