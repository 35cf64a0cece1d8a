use crate::error::{ResumeAnalyzerError, Result};
use resume_analyzer_common::{ServiceConfig, DEFAULT_BASE_URL, DEFAULT_TIMEOUT_SECS};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;

/// ベースURLを上書きする環境変数
pub const BASE_URL_ENV: &str = "RESUME_ANALYZER_URL";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub base_url: String,
    pub timeout_seconds: u64,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.into(),
            timeout_seconds: DEFAULT_TIMEOUT_SECS,
        }
    }
}

impl Config {
    pub fn load() -> Result<Self> {
        Self::load_from(&Self::config_path()?)
    }

    /// ファイルがなければ既定値
    pub fn load_from(path: &Path) -> Result<Self> {
        if path.exists() {
            let content = std::fs::read_to_string(path)?;
            let config: Config = serde_json::from_str(&content)?;
            Ok(config)
        } else {
            Ok(Self::default())
        }
    }

    /// 読めない設定ファイルは警告して既定値を使う（`config` サブコマンドでの修復用）
    pub fn load_or_default() -> Self {
        match Self::config_path() {
            Ok(path) => Self::load_from_or_default(&path),
            Err(e) => {
                tracing::warn!(error = %e, "config path unavailable; using defaults");
                Self::default()
            }
        }
    }

    pub fn load_from_or_default(path: &Path) -> Self {
        Self::load_from(path).unwrap_or_else(|e| {
            tracing::warn!(path = %path.display(), error = %e, "ignoring unreadable config; using defaults");
            Self::default()
        })
    }

    pub fn save(&self) -> Result<()> {
        self.save_to(&Self::config_path()?)
    }

    pub fn save_to(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let content = serde_json::to_string_pretty(self)?;
        std::fs::write(path, content)?;
        Ok(())
    }

    pub fn config_path() -> Result<PathBuf> {
        let home = dirs::home_dir()
            .ok_or_else(|| ResumeAnalyzerError::Config("home directory not found".into()))?;
        Ok(home.join(".config").join("resume-analyzer").join("config.json"))
    }

    /// 検証してからベースURLを設定
    pub fn set_base_url(&mut self, url: &str) -> Result<()> {
        ServiceConfig::new(url)?;
        self.base_url = url.trim().to_string();
        Ok(())
    }

    pub fn set_timeout(&mut self, seconds: u64) -> Result<()> {
        if seconds == 0 {
            return Err(ResumeAnalyzerError::Config("timeout must be at least 1 second".into()));
        }
        self.timeout_seconds = seconds;
        Ok(())
    }

    /// 優先順位: 引数 > 環境変数 > 設定ファイル
    pub fn resolve_base_url<'a>(&'a self, flag: Option<&'a str>, env: Option<&'a str>) -> &'a str {
        flag.or(env)
            .map(str::trim)
            .filter(|url| !url.is_empty())
            .unwrap_or(self.base_url.as_str())
    }

    pub fn service_config(&self, flag: Option<&str>) -> Result<ServiceConfig> {
        let env = std::env::var(BASE_URL_ENV).ok();
        let base_url = self.resolve_base_url(flag, env.as_deref());
        let timeout = Duration::from_secs(self.timeout_seconds.max(1));
        Ok(ServiceConfig::new(base_url)?.with_timeout(timeout))
    }
}
