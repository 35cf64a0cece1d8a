//! Resume Analyzer Common Library
//!
//! CLIとWeb(WASM)で共有される型・状態機械・APIコントラクト

pub mod types;
pub mod error;
pub mod config;
pub mod contract;
pub mod submission;
pub mod render;

pub use types::{AnalysisResult, ResumeListing, SectionFeedback, SelectedFile};
pub use error::{Error, Result};
pub use config::{ServiceConfig, DEFAULT_BASE_URL, DEFAULT_TIMEOUT_SECS};
pub use contract::{
    decode_analysis, decode_error_message, decode_listing, interpret_analyze_response,
    FALLBACK_ERROR_MESSAGE,
};
pub use submission::{AnalyzerModel, SubmissionState, SubmitError, Ticket, VALIDATION_MESSAGE};
pub use render::{
    has_suggested_extension, listing_entries, render_result, ListingEntry, RenderedResult,
    SectionBlock, ACCEPT_EXTENSIONS, EMPTY_LISTING_MESSAGE,
};
