//! 解析サービスのHTTPクライアント（reqwest）
//!
//! 応答の解釈は resume_analyzer_common::contract を使い、ブラウザ版と同じ判定にする。

use std::path::{Path, PathBuf};

use bytes::Bytes;
use reqwest::multipart::{Form, Part};
use resume_analyzer_common::{
    decode_listing, interpret_analyze_response, AnalysisResult, ResumeListing, SelectedFile,
    ServiceConfig, SubmitError,
};

use crate::error::{ResumeAnalyzerError, Result};

pub struct AnalysisClient {
    http: reqwest::Client,
    config: ServiceConfig,
}

impl AnalysisClient {
    pub fn new(config: ServiceConfig) -> Result<Self> {
        let http = reqwest::Client::builder()
            .user_agent(concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION")))
            .build()?;
        Ok(Self { http, config })
    }

    pub fn config(&self) -> &ServiceConfig {
        &self.config
    }

    /// `GET /api/resumes`
    pub async fn fetch_listing(&self) -> Result<ResumeListing> {
        let url = self.config.resumes_url();
        tracing::debug!(%url, "fetching resume listing");

        let response = self.http.get(url.clone()).send().await?;
        let status = response.status();
        if !status.is_success() {
            return Err(ResumeAnalyzerError::UnexpectedStatus {
                url: url.to_string(),
                status: status.as_u16(),
            });
        }

        let body = response.text().await?;
        let listing = decode_listing(&body)?;
        tracing::debug!(count = listing.len(), "resume listing received");
        Ok(listing)
    }

    /// `POST /api/analyze`（multipart、フィールド名 `file`）
    ///
    /// 設定のタイムアウトを超えたら Timeout。
    pub async fn analyze(
        &self,
        file: &SelectedFile<Bytes>,
    ) -> std::result::Result<AnalysisResult, SubmitError> {
        let url = self.config.analyze_url();
        tracing::debug!(%url, file = %file.name, bytes = file.handle.len(), "submitting resume");

        // Bytesの複製は参照カウントのみ
        let part = Part::stream_with_length(file.handle.clone(), file.handle.len() as u64)
            .file_name(file.name.clone());
        let form = Form::new().part("file", part);

        let response = self
            .http
            .post(url)
            .multipart(form)
            .timeout(self.config.timeout())
            .send()
            .await
            .map_err(classify_error)?;

        let status = response.status().as_u16();
        let body = response.text().await.map_err(classify_error)?;
        tracing::debug!(status, body_len = body.len(), "analysis response received");

        interpret_analyze_response(status, &body)
    }

    /// `GET /api/download/:filename` を `dest_dir` に保存して保存先を返す
    pub async fn download(&self, filename: &str, dest_dir: &Path) -> Result<PathBuf> {
        // 保存先はファイル名部分だけ使う
        let local_name = Path::new(filename)
            .file_name()
            .ok_or_else(|| ResumeAnalyzerError::Config(format!("invalid file name: {}", filename)))?;

        let url = self.config.download_url(filename);
        tracing::debug!(%url, "downloading resume");

        let response = self.http.get(url.clone()).send().await?;
        let status = response.status();
        if !status.is_success() {
            return Err(ResumeAnalyzerError::UnexpectedStatus {
                url: url.to_string(),
                status: status.as_u16(),
            });
        }

        let bytes = response.bytes().await?;
        tokio::fs::create_dir_all(dest_dir).await?;
        let path = dest_dir.join(local_name);
        tokio::fs::write(&path, &bytes).await?;
        Ok(path)
    }
}

fn classify_error(error: reqwest::Error) -> SubmitError {
    if error.is_timeout() {
        SubmitError::Timeout
    } else {
        SubmitError::Network(error.to_string())
    }
}
