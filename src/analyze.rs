//! 履歴書1件の送信フロー
//!
//! 選択 → 送信開始 → スピナー表示 → 決着 を AnalyzerModel で進める。
//! `cancel` が先に完了したら送信を取り消して Idle に戻す。

use std::future::Future;
use std::path::Path;
use std::time::Duration;

use bytes::Bytes;
use indicatif::{ProgressBar, ProgressStyle};
use resume_analyzer_common::{
    has_suggested_extension, AnalyzerModel, SelectedFile, SubmissionState,
};

use crate::client::AnalysisClient;
use crate::error::{ResumeAnalyzerError, Result};

/// ファイルを読み込んで送信し、最終状態を返す
///
/// 返り値は Succeeded / Failed / Idle（取消）のいずれか。
pub async fn run_analysis<C>(
    client: &AnalysisClient,
    path: &Path,
    cancel: C,
) -> Result<SubmissionState>
where
    C: Future<Output = ()>,
{
    if !path.is_file() {
        return Err(ResumeAnalyzerError::FileNotFound(path.display().to_string()));
    }

    let name = path
        .file_name()
        .map(|n| n.to_string_lossy().to_string())
        .unwrap_or_default();
    if !has_suggested_extension(&name) {
        tracing::warn!(file = %name, "not a PDF, DOCX or TXT file; the service may reject it");
    }

    let bytes = Bytes::from(tokio::fs::read(path).await?);

    let mut model: AnalyzerModel<Bytes> = AnalyzerModel::new();
    model.select_file(SelectedFile::new(name, bytes));

    let (ticket, file) = model
        .begin_submit()
        .map_err(|e| ResumeAnalyzerError::Analysis(e.to_string()))?;

    let spinner = spinner(&format!("Analyzing {}...", file.name));

    tokio::select! {
        outcome = client.analyze(&file) => {
            if let Err(e) = &outcome {
                tracing::debug!(error = %e, "analysis failed");
            }
            model.settle(ticket, outcome);
        }
        _ = cancel => {
            tracing::info!("analysis cancelled");
            model.cancel();
        }
    }

    spinner.finish_and_clear();
    tracing::debug!(state = model.state().as_str(), "submission finished");
    Ok(model.state().clone())
}

fn spinner(message: &str) -> ProgressBar {
    let pb = ProgressBar::new_spinner();
    if let Ok(style) = ProgressStyle::default_spinner().template("{spinner} {msg}") {
        pb.set_style(style);
    }
    pb.set_message(message.to_string());
    pb.enable_steady_tick(Duration::from_millis(100));
    pb
}
