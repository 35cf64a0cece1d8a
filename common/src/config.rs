//! 解析サービスの接続設定
//!
//! ベースURLは起動時に注入する（Webはmetaタグ、CLIは設定ファイル/環境変数）。
//! エンドポイントURLはすべてここで組み立てる。

use crate::error::{Error, Result};
use std::time::Duration;
use url::Url;

/// ローカル開発用の既定ベースURL
pub const DEFAULT_BASE_URL: &str = "http://localhost:5000";

/// 解析リクエストの既定タイムアウト（秒）
pub const DEFAULT_TIMEOUT_SECS: u64 = 120;

#[derive(Debug, Clone, PartialEq)]
pub struct ServiceConfig {
    base_url: Url,
    timeout: Duration,
}

impl ServiceConfig {
    /// ベースURLを検証して設定を作る
    ///
    /// http/https 以外、または空文字はエラー。クエリとフラグメントは捨てる。
    pub fn new(base_url: &str) -> Result<Self> {
        let trimmed = base_url.trim();
        if trimmed.is_empty() {
            return Err(Error::Config("base URL is empty".into()));
        }

        let mut url = Url::parse(trimmed)?;
        if !matches!(url.scheme(), "http" | "https") {
            return Err(Error::Config(format!(
                "unsupported scheme '{}' in base URL {}",
                url.scheme(),
                trimmed
            )));
        }
        url.set_query(None);
        url.set_fragment(None);

        Ok(Self {
            base_url: url,
            timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
        })
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    pub fn timeout(&self) -> Duration {
        self.timeout
    }

    /// `POST /api/analyze`
    pub fn analyze_url(&self) -> Url {
        self.endpoint(&["api", "analyze"])
    }

    /// `GET /api/resumes`
    pub fn resumes_url(&self) -> Url {
        self.endpoint(&["api", "resumes"])
    }

    /// `GET /api/download/:filename`
    ///
    /// ファイル名は1セグメントとしてパーセントエンコードするだけで、内容の検証はしない。
    pub fn download_url(&self, filename: &str) -> Url {
        self.endpoint(&["api", "download", filename])
    }

    fn endpoint(&self, segments: &[&str]) -> Url {
        let mut url = self.base_url.clone();
        // http/https は常にベースになれるので Err にはならない
        if let Ok(mut path) = url.path_segments_mut() {
            path.pop_if_empty().extend(segments);
        }
        url
    }
}

impl Default for ServiceConfig {
    fn default() -> Self {
        Self {
            base_url: Url::parse(DEFAULT_BASE_URL).expect("default base URL is valid"),
            timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
        }
    }
}
