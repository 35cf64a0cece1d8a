//! 送信状態機械
//!
//! アップロード画面1つにつき1つの `AnalyzerModel` を持つ。
//! 状態遷移: Idle → Submitting → Succeeded | Failed
//!
//! - 同時に送信中にできるのは1件だけ
//! - 決着（settle）はチケットが現在のものと一致したときに1回だけ反映される
//! - 画面破棄後（teardown）の決着は何もしない

use thiserror::Error;

use crate::contract::FALLBACK_ERROR_MESSAGE;
use crate::types::{AnalysisResult, SelectedFile};

/// ファイル未選択で送信したときのメッセージ
pub const VALIDATION_MESSAGE: &str = "Please select a file";

/// 送信1回分の識別子
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Ticket(u64);

impl Ticket {
    pub fn id(&self) -> u64 {
        self.0
    }
}

/// 送信状態
#[derive(Debug, Clone, PartialEq, Default)]
pub enum SubmissionState {
    #[default]
    Idle,
    Submitting(Ticket),
    Succeeded(AnalysisResult),
    /// 1行の表示用メッセージ
    Failed(String),
}

impl SubmissionState {
    pub fn is_submitting(&self) -> bool {
        matches!(self, SubmissionState::Submitting(_))
    }

    pub fn result(&self) -> Option<&AnalysisResult> {
        match self {
            SubmissionState::Succeeded(result) => Some(result),
            _ => None,
        }
    }

    pub fn error_message(&self) -> Option<&str> {
        match self {
            SubmissionState::Failed(message) => Some(message),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            SubmissionState::Idle => "idle",
            SubmissionState::Submitting(_) => "submitting",
            SubmissionState::Succeeded(_) => "succeeded",
            SubmissionState::Failed(_) => "failed",
        }
    }
}

/// 送信エラー
#[derive(Error, Debug, Clone, PartialEq)]
pub enum SubmitError {
    #[error("no file selected")]
    Validation,

    #[error("analysis service returned an error: {message}")]
    Remote { message: String },

    /// 接続失敗・応答の解釈失敗。原因はログ用で画面には出さない
    #[error("network error: {0}")]
    Network(String),

    #[error("request timed out")]
    Timeout,

    #[error("request cancelled")]
    Cancelled,

    #[error("a submission is already in progress")]
    AlreadySubmitting,
}

impl SubmitError {
    /// 画面に出す1行メッセージ。取消・多重送信は表示しない
    pub fn user_message(&self) -> Option<String> {
        match self {
            SubmitError::Validation => Some(VALIDATION_MESSAGE.to_string()),
            SubmitError::Remote { message } => Some(message.clone()),
            SubmitError::Network(_) | SubmitError::Timeout => {
                Some(FALLBACK_ERROR_MESSAGE.to_string())
            }
            SubmitError::Cancelled | SubmitError::AlreadySubmitting => None,
        }
    }
}

/// アップロード画面のモデル
#[derive(Debug, Clone)]
pub struct AnalyzerModel<F> {
    selected: Option<SelectedFile<F>>,
    state: SubmissionState,
    next_ticket: u64,
    alive: bool,
}

impl<F> Default for AnalyzerModel<F> {
    fn default() -> Self {
        Self {
            selected: None,
            state: SubmissionState::Idle,
            next_ticket: 1,
            alive: true,
        }
    }
}

impl<F> AnalyzerModel<F> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn selected(&self) -> Option<&SelectedFile<F>> {
        self.selected.as_ref()
    }

    pub fn state(&self) -> &SubmissionState {
        &self.state
    }

    pub fn is_submitting(&self) -> bool {
        self.state.is_submitting()
    }

    /// 送信ボタンを押せるか
    pub fn can_submit(&self) -> bool {
        self.alive && self.selected.is_some() && !self.is_submitting()
    }

    /// ファイル選択
    ///
    /// 前回の結果・エラーは消えて Idle に戻る。送信中は選択だけ差し替える。
    pub fn select_file(&mut self, file: SelectedFile<F>) {
        self.selected = Some(file);
        if !self.is_submitting() {
            self.state = SubmissionState::Idle;
        }
    }

    /// 送信中の取消。取り消したチケットを返す
    pub fn cancel(&mut self) -> Option<Ticket> {
        match self.state {
            SubmissionState::Submitting(ticket) => {
                self.state = SubmissionState::Idle;
                Some(ticket)
            }
            _ => None,
        }
    }

    /// 画面破棄。以降の決着はすべて無視される
    pub fn teardown(&mut self) -> Option<Ticket> {
        self.alive = false;
        match self.state {
            SubmissionState::Submitting(ticket) => Some(ticket),
            _ => None,
        }
    }

    /// 送信結果を反映する。反映したら true
    pub fn settle(
        &mut self,
        ticket: Ticket,
        outcome: std::result::Result<AnalysisResult, SubmitError>,
    ) -> bool {
        if !self.alive || self.state != SubmissionState::Submitting(ticket) {
            return false;
        }

        self.state = match outcome {
            Ok(result) => SubmissionState::Succeeded(result),
            Err(error) => match error.user_message() {
                Some(message) => SubmissionState::Failed(message),
                None => SubmissionState::Idle,
            },
        };
        true
    }
}

impl<F: Clone> AnalyzerModel<F> {
    /// 送信開始
    ///
    /// 未選択なら Failed(検証メッセージ) にして通信しない。
    /// 成功時は Submitting に遷移し、チケットと送信するファイルを返す。
    pub fn begin_submit(
        &mut self,
    ) -> std::result::Result<(Ticket, SelectedFile<F>), SubmitError> {
        if !self.alive {
            return Err(SubmitError::Cancelled);
        }
        if self.is_submitting() {
            return Err(SubmitError::AlreadySubmitting);
        }

        let Some(file) = self.selected.clone() else {
            self.state = SubmissionState::Failed(VALIDATION_MESSAGE.to_string());
            return Err(SubmitError::Validation);
        };

        let ticket = Ticket(self.next_ticket);
        self.next_ticket += 1;
        self.state = SubmissionState::Submitting(ticket);
        Ok((ticket, file))
    }
}
