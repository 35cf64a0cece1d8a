//! 解析サービスクライアントの統合テスト
//!
//! ローカルに固定応答を返すHTTPサーバーを立てて、送信フローと応答の解釈を検証する

use std::path::Path;
use std::time::Duration;

use resume_analyzer::analyze::run_analysis;
use resume_analyzer::client::AnalysisClient;
use resume_analyzer::error::ResumeAnalyzerError;
use bytes::Bytes;
use resume_analyzer_common::{
    AnalysisResult, AnalyzerModel, SelectedFile, SubmissionState, ServiceConfig,
    FALLBACK_ERROR_MESSAGE,
};
use tempfile::tempdir;
use tokio::net::TcpListener;

mod support;
use support::{serve_once, serve_silent};

fn client_for(base_url: &str, timeout: Duration) -> AnalysisClient {
    let config = ServiceConfig::new(base_url)
        .expect("ServiceConfig作成失敗")
        .with_timeout(timeout);
    AnalysisClient::new(config).expect("クライアント作成失敗")
}

fn write_resume(dir: &Path, name: &str) -> std::path::PathBuf {
    let path = dir.join(name);
    std::fs::write(&path, "Experience: Rust developer\nEducation: BSc").unwrap();
    path
}

fn never() -> std::future::Pending<()> {
    std::future::pending()
}

// =============================================
// 一覧
// =============================================

#[tokio::test]
async fn test_fetch_listing_in_order() {
    let (base, server) = serve_once("200 OK", r#"{"files": ["a.pdf", "b.txt"]}"#).await;
    let client = client_for(&base, Duration::from_secs(5));

    let listing = client.fetch_listing().await.expect("一覧取得失敗");
    assert_eq!(listing.files, vec!["a.pdf", "b.txt"]);

    let request = server.await.unwrap();
    assert!(request.starts_with("GET /api/resumes "));
}

#[tokio::test]
async fn test_fetch_listing_empty() {
    let (base, _server) = serve_once("200 OK", r#"{"files": []}"#).await;
    let client = client_for(&base, Duration::from_secs(5));

    let listing = client.fetch_listing().await.expect("一覧取得失敗");
    assert!(listing.is_empty());
}

#[tokio::test]
async fn test_fetch_listing_server_error() {
    let (base, _server) = serve_once("500 Internal Server Error", "").await;
    let client = client_for(&base, Duration::from_secs(5));

    let err = client.fetch_listing().await.unwrap_err();
    assert!(matches!(err, ResumeAnalyzerError::UnexpectedStatus { status: 500, .. }));
}

// =============================================
// 解析
// =============================================

#[tokio::test]
async fn test_analyze_sections_success() {
    let body = r#"{"sections": {
        "experience": {"score": 8, "strengths": "Impact", "improvements": "Dates", "recommendations": "Quantify"},
        "education": {"score": 6, "strengths": "BSc", "improvements": "GPA", "recommendations": "Courses"}
    }}"#;
    let (base, server) = serve_once("200 OK", body).await;
    let client = client_for(&base, Duration::from_secs(5));
    let dir = tempdir().expect("Failed to create temp dir");
    let path = write_resume(dir.path(), "resume.txt");

    let state = run_analysis(&client, &path, never()).await.expect("送信失敗");

    let SubmissionState::Succeeded(AnalysisResult::Sections(sections)) = state else {
        panic!("Succeeded(Sections) であるべき");
    };
    let names: Vec<&str> = sections.iter().map(|(name, _)| name.as_str()).collect();
    assert_eq!(names, vec!["education", "experience"]);
    assert_eq!(sections[1].1.score, Some(8));

    let request = server.await.unwrap();
    assert!(request.starts_with("POST /api/analyze "));
    assert!(request.contains("name=\"file\""));
    assert!(request.contains("filename=\"resume.txt\""));
    assert!(request.contains("Rust developer"));
}

#[tokio::test]
async fn test_analyze_legacy_text_success() {
    let (base, _server) = serve_once("200 OK", r#"{"analysis": "Score: 6/10\nFeedback: ok"}"#).await;
    let client = client_for(&base, Duration::from_secs(5));
    let dir = tempdir().expect("Failed to create temp dir");
    let path = write_resume(dir.path(), "resume.pdf");

    let state = run_analysis(&client, &path, never()).await.expect("送信失敗");
    assert_eq!(
        state,
        SubmissionState::Succeeded(AnalysisResult::Text("Score: 6/10\nFeedback: ok".into()))
    );
}

#[tokio::test]
async fn test_analyze_remote_error_message() {
    let (base, _server) = serve_once("413 Payload Too Large", r#"{"error": "too large"}"#).await;
    let client = client_for(&base, Duration::from_secs(5));
    let dir = tempdir().expect("Failed to create temp dir");
    let path = write_resume(dir.path(), "resume.docx");

    let state = run_analysis(&client, &path, never()).await.expect("送信失敗");
    assert_eq!(state, SubmissionState::Failed("too large".into()));
}

#[tokio::test]
async fn test_analyze_remote_error_without_body() {
    let (base, _server) = serve_once("500 Internal Server Error", "").await;
    let client = client_for(&base, Duration::from_secs(5));
    let dir = tempdir().expect("Failed to create temp dir");
    let path = write_resume(dir.path(), "resume.txt");

    let state = run_analysis(&client, &path, never()).await.expect("送信失敗");
    assert_eq!(state, SubmissionState::Failed(FALLBACK_ERROR_MESSAGE.into()));
}

#[tokio::test]
async fn test_analyze_connection_refused() {
    // 一度bindして閉じたポートには接続できない
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);

    let client = client_for(&format!("http://{}", addr), Duration::from_secs(5));
    let dir = tempdir().expect("Failed to create temp dir");
    let path = write_resume(dir.path(), "resume.txt");

    let state = run_analysis(&client, &path, never()).await.expect("送信失敗");
    assert_eq!(state, SubmissionState::Failed(FALLBACK_ERROR_MESSAGE.into()));
}

#[tokio::test]
async fn test_analyze_timeout() {
    let (base, _server) = serve_silent().await;
    let client = client_for(&base, Duration::from_millis(300));
    let dir = tempdir().expect("Failed to create temp dir");
    let path = write_resume(dir.path(), "resume.txt");

    let state = run_analysis(&client, &path, never()).await.expect("送信失敗");
    assert_eq!(state, SubmissionState::Failed(FALLBACK_ERROR_MESSAGE.into()));
}

#[tokio::test]
async fn test_analyze_cancel_returns_idle() {
    let (base, _server) = serve_silent().await;
    let client = client_for(&base, Duration::from_secs(30));
    let dir = tempdir().expect("Failed to create temp dir");
    let path = write_resume(dir.path(), "resume.txt");

    let cancel = tokio::time::sleep(Duration::from_millis(100));
    let state = run_analysis(&client, &path, cancel).await.expect("送信失敗");
    assert_eq!(state, SubmissionState::Idle);
}

#[tokio::test]
async fn test_analyze_missing_file() {
    let client = client_for("http://127.0.0.1:9", Duration::from_secs(1));
    let err = run_analysis(&client, Path::new("/nonexistent/resume.pdf"), never())
        .await
        .unwrap_err();
    assert!(matches!(err, ResumeAnalyzerError::FileNotFound(_)));
}

/// 送信するファイルは読み込んだバッファを共有し、複製しない
#[tokio::test]
async fn test_analyze_shares_file_buffer() {
    let (base, server) = serve_once("200 OK", r#"{"analysis": "ok"}"#).await;
    let client = client_for(&base, Duration::from_secs(5));

    let content = Bytes::from_static(b"Skills: Rust, Tokio");
    let mut model: AnalyzerModel<Bytes> = AnalyzerModel::new();
    model.select_file(SelectedFile::new("cv.txt", content.clone()));

    let (ticket, file) = model.begin_submit().expect("送信開始失敗");
    assert_eq!(file.handle.as_ptr(), content.as_ptr());

    let outcome = client.analyze(&file).await;
    assert!(model.settle(ticket, outcome));
    assert_eq!(model.state(), &SubmissionState::Succeeded(AnalysisResult::Text("ok".into())));

    let request = server.await.unwrap();
    assert!(request.contains("filename=\"cv.txt\""));
    assert!(request.contains("Skills: Rust, Tokio"));
}

// =============================================
// ダウンロード
// =============================================

#[tokio::test]
async fn test_download_saves_file() {
    let (base, server) = serve_once("200 OK", "resume bytes").await;
    let client = client_for(&base, Duration::from_secs(5));
    let dir = tempdir().expect("Failed to create temp dir");

    let saved = client.download("a.pdf", dir.path()).await.expect("ダウンロード失敗");
    assert_eq!(saved, dir.path().join("a.pdf"));
    assert_eq!(std::fs::read_to_string(&saved).unwrap(), "resume bytes");

    let request = server.await.unwrap();
    assert!(request.starts_with("GET /api/download/a.pdf "));
}

#[tokio::test]
async fn test_download_not_found() {
    let (base, _server) = serve_once("404 Not Found", r#"{"error": "missing"}"#).await;
    let client = client_for(&base, Duration::from_secs(5));
    let dir = tempdir().expect("Failed to create temp dir");

    let err = client.download("gone.pdf", dir.path()).await.unwrap_err();
    assert!(matches!(err, ResumeAnalyzerError::UnexpectedStatus { status: 404, .. }));
    assert!(!dir.path().join("gone.pdf").exists());
}
