//! 解析ワークフロー
//!
//! 状態遷移:
//! - Idle / Completed / Failed --begin--> Analyzing
//! - Analyzing --finish--> Completed | Failed
//!
//! 解析中の再送信は `Error::Busy` で拒否する。送信IDが一致しない応答は破棄する。

use crate::data_url::DataUrl;
use crate::error::{Error, Result};
use crate::notice::{Notice, MSG_SUCCESS, MSG_TRANSPORT_FAILURE, MSG_UNEXPECTED};
use crate::parser::ServiceReply;
use crate::types::{AnalysisResult, AnalyzeRequest};

/// 外部の解析サービス
#[allow(async_fn_in_trait)]
pub trait AnalysisService {
    async fn analyze(&self, request: &AnalyzeRequest) -> Result<ServiceReply>;
}

/// 送信ID
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SubmissionId(u64);

/// 送信待ちリクエスト
#[derive(Debug, Clone)]
pub struct Submission {
    pub id: SubmissionId,
    pub request: AnalyzeRequest,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FailureKind {
    Transport,
    Application,
    Unexpected,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Failure {
    pub kind: FailureKind,
    pub detail: String,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub enum WorkflowState {
    #[default]
    Idle,
    Analyzing(SubmissionId),
    Completed(AnalysisResult),
    Failed(Failure),
}

impl WorkflowState {
    pub fn as_str(&self) -> &'static str {
        match self {
            WorkflowState::Idle => "idle",
            WorkflowState::Analyzing(_) => "analyzing",
            WorkflowState::Completed(_) => "completed",
            WorkflowState::Failed(_) => "failed",
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct Orchestrator {
    state: WorkflowState,
    next_id: u64,
}

impl Orchestrator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> &WorkflowState {
        &self.state
    }

    pub fn is_analyzing(&self) -> bool {
        matches!(self.state, WorkflowState::Analyzing(_))
    }

    /// 再選択が可能か
    pub fn can_select(&self) -> bool {
        !self.is_analyzing()
    }

    pub fn result(&self) -> Option<&AnalysisResult> {
        match &self.state {
            WorkflowState::Completed(result) => Some(result),
            _ => None,
        }
    }

    pub fn failure(&self) -> Option<&Failure> {
        match &self.state {
            WorkflowState::Failed(failure) => Some(failure),
            _ => None,
        }
    }

    /// 解析を開始する。前回の結果はここで破棄される。
    pub fn begin(&mut self, image: DataUrl) -> Result<Submission> {
        if self.is_analyzing() {
            tracing::warn!("submission rejected: analysis in flight");
            return Err(Error::Busy);
        }

        self.next_id += 1;
        let id = SubmissionId(self.next_id);
        self.state = WorkflowState::Analyzing(id);
        tracing::debug!(
            submission = id.0,
            mime_type = %image.mime_type(),
            payload_len = image.base64_payload().len(),
            "analysis started"
        );

        Ok(Submission {
            id,
            request: AnalyzeRequest { image_data: image.into_string() },
        })
    }

    /// 応答を反映して通知を返す。古い送信IDの応答は `None`。
    pub fn finish(&mut self, id: SubmissionId, outcome: Result<ServiceReply>) -> Option<Notice> {
        if self.state != WorkflowState::Analyzing(id) {
            tracing::warn!(submission = id.0, state = self.state.as_str(), "stale analysis reply ignored");
            return None;
        }

        let (state, notice) = match outcome {
            Ok(ServiceReply::Analysis(result)) => {
                tracing::debug!(submission = id.0, items = result.item_count(), "analysis completed");
                (WorkflowState::Completed(result), Notice::success(MSG_SUCCESS))
            }
            Ok(ServiceReply::Rejected(message)) | Err(Error::Application(message)) => {
                tracing::warn!(submission = id.0, %message, "analysis rejected by service");
                let notice = Notice::warning(message.clone());
                (failed(FailureKind::Application, message), notice)
            }
            Err(Error::Transport(detail)) => {
                tracing::warn!(submission = id.0, %detail, "analysis transport failure");
                (failed(FailureKind::Transport, detail), Notice::error(MSG_TRANSPORT_FAILURE))
            }
            Err(other) => {
                tracing::error!(submission = id.0, error = %other, "unexpected analysis failure");
                (failed(FailureKind::Unexpected, other.to_string()), Notice::error(MSG_UNEXPECTED))
            }
        };

        self.state = state;
        Some(notice)
    }

    /// begin → サービス呼び出し（1回のみ） → finish
    pub async fn submit<S: AnalysisService>(&mut self, service: &S, image: DataUrl) -> Result<Notice> {
        let submission = self.begin(image)?;
        let outcome = service.analyze(&submission.request).await;
        Ok(self
            .finish(submission.id, outcome)
            .unwrap_or_else(|| Notice::error(MSG_UNEXPECTED)))
    }
}

fn failed(kind: FailureKind, detail: String) -> WorkflowState {
    WorkflowState::Failed(Failure { kind, detail })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::notice::NoticeLevel;
    use crate::types::FoodItem;

    fn image() -> DataUrl {
        DataUrl::encode("image/png", b"png")
    }

    fn apple() -> AnalysisResult {
        AnalysisResult {
            items: vec![FoodItem {
                name: Some("Apple".into()),
                serving_size: Some("1 medium (182g)".into()),
                calories: Some(95.0),
                protein: Some(0.5),
                carbs: Some(25.0),
                fat: Some(0.3),
                confidence: Some(92.0),
            }],
            total_calories: 95.0,
        }
    }

    #[test]
    fn test_begin_transitions_to_analyzing() {
        let mut workflow = Orchestrator::new();
        let submission = workflow.begin(image()).unwrap();

        assert!(workflow.is_analyzing());
        assert!(!workflow.can_select());
        assert_eq!(submission.request.image_data, "data:image/png;base64,cG5n");
    }

    #[test]
    fn test_begin_while_analyzing_is_busy() {
        let mut workflow = Orchestrator::new();
        let first = workflow.begin(image()).unwrap();

        assert!(matches!(workflow.begin(image()), Err(Error::Busy)));
        assert_eq!(workflow.state(), &WorkflowState::Analyzing(first.id));
    }

    #[test]
    fn test_success_stores_result_verbatim() {
        let mut workflow = Orchestrator::new();
        let submission = workflow.begin(image()).unwrap();
        let notice = workflow
            .finish(submission.id, Ok(ServiceReply::Analysis(apple())))
            .unwrap();

        assert_eq!(notice.level, NoticeLevel::Success);
        assert_eq!(workflow.result(), Some(&apple()));
        assert!(workflow.can_select());
    }

    #[test]
    fn test_new_submission_clears_previous_result() {
        let mut workflow = Orchestrator::new();
        let first = workflow.begin(image()).unwrap();
        workflow.finish(first.id, Ok(ServiceReply::Analysis(apple())));

        workflow.begin(image()).unwrap();
        assert_eq!(workflow.result(), None);
    }

    #[test]
    fn test_rejected_reply_surfaces_message() {
        let mut workflow = Orchestrator::new();
        let submission = workflow.begin(image()).unwrap();
        let notice = workflow
            .finish(submission.id, Ok(ServiceReply::Rejected("No food detected".into())))
            .unwrap();

        assert_eq!(notice.message, "No food detected");
        assert_eq!(workflow.result(), None);
        assert_eq!(workflow.failure().map(|f| f.kind), Some(FailureKind::Application));
        assert!(workflow.can_select());
    }

    #[test]
    fn test_transport_failure_is_generic() {
        let mut workflow = Orchestrator::new();
        let submission = workflow.begin(image()).unwrap();
        let notice = workflow
            .finish(submission.id, Err(Error::Transport("HTTP 500".into())))
            .unwrap();

        assert_eq!(notice.message, MSG_TRANSPORT_FAILURE);
        assert_eq!(workflow.failure().map(|f| f.kind), Some(FailureKind::Transport));
    }

    #[test]
    fn test_unexpected_failure() {
        let mut workflow = Orchestrator::new();
        let submission = workflow.begin(image()).unwrap();
        let notice = workflow
            .finish(submission.id, Err(Error::Unexpected("malformed".into())))
            .unwrap();

        assert_eq!(notice.message, MSG_UNEXPECTED);
        assert_eq!(workflow.failure().map(|f| f.kind), Some(FailureKind::Unexpected));
    }

    #[test]
    fn test_stale_reply_is_ignored() {
        let mut workflow = Orchestrator::new();
        let first = workflow.begin(image()).unwrap();
        workflow.finish(first.id, Err(Error::Transport("timeout".into())));
        let second = workflow.begin(image()).unwrap();

        assert!(workflow.finish(first.id, Ok(ServiceReply::Analysis(apple()))).is_none());
        assert_eq!(workflow.state(), &WorkflowState::Analyzing(second.id));
    }

    #[test]
    fn test_finish_twice_is_ignored() {
        let mut workflow = Orchestrator::new();
        let submission = workflow.begin(image()).unwrap();
        workflow.finish(submission.id, Ok(ServiceReply::Analysis(apple())));

        let again = workflow.finish(submission.id, Err(Error::Transport("late".into())));
        assert!(again.is_none());
        assert_eq!(workflow.result(), Some(&apple()));
    }

    #[test]
    fn test_state_as_str() {
        assert_eq!(WorkflowState::Idle.as_str(), "idle");
        assert_eq!(WorkflowState::Completed(apple()).as_str(), "completed");
    }
}
