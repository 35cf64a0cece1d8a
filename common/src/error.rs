//! エラー型定義

use thiserror::Error;

/// 共通エラー型
#[derive(Error, Debug)]
pub enum Error {
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("URL error: {0}")]
    Url(#[from] url::ParseError),

    #[error("Config error: {0}")]
    Config(String),

    #[error("Unexpected response: {0}")]
    UnexpectedResponse(String),
}

/// Result型エイリアス
pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display_json() {
        let json_error = serde_json::from_str::<serde_json::Value>("invalid json").unwrap_err();
        let error = Error::Json(json_error);
        let display = format!("{}", error);
        assert!(display.contains("JSON error"));
    }

    #[test]
    fn test_error_display_config() {
        let error = Error::Config("ベースURLが空です".to_string());
        let display = format!("{}", error);
        assert_eq!(display, "Config error: ベースURLが空です");
    }

    #[test]
    fn test_error_from_url() {
        let url_error = url::Url::parse("not a url").unwrap_err();
        let error: Error = url_error.into();
        assert!(matches!(error, Error::Url(_)));
        assert!(format!("{}", error).contains("URL error"));
    }

    #[test]
    fn test_error_from_json() {
        let json_error = serde_json::from_str::<serde_json::Value>("{").unwrap_err();
        let error: Error = json_error.into();
        assert!(matches!(error, Error::Json(_)));
    }

    #[test]
    fn test_error_debug() {
        let error = Error::UnexpectedResponse("テスト".to_string());
        let debug = format!("{:?}", error);
        assert!(debug.contains("UnexpectedResponse"));
        assert!(debug.contains("テスト"));
    }
}
