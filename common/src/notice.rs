//! ユーザー向け通知

use crate::error::Error;

pub const MSG_INVALID_IMAGE: &str = "Please select a valid image file";
pub const MSG_TRANSPORT_FAILURE: &str = "Failed to analyze image. Please try again.";
pub const MSG_UNEXPECTED: &str = "An unexpected error occurred. Please try again.";
pub const MSG_SUCCESS: &str = "Food analyzed successfully!";
pub const MSG_BUSY: &str = "An analysis is already in progress";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoticeLevel {
    Success,
    Warning,
    Error,
}

impl NoticeLevel {
    pub fn as_str(&self) -> &'static str {
        match self {
            NoticeLevel::Success => "success",
            NoticeLevel::Warning => "warning",
            NoticeLevel::Error => "error",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notice {
    pub level: NoticeLevel,
    pub message: String,
}

impl Notice {
    pub fn success(message: impl Into<String>) -> Self {
        Self { level: NoticeLevel::Success, message: message.into() }
    }

    pub fn warning(message: impl Into<String>) -> Self {
        Self { level: NoticeLevel::Warning, message: message.into() }
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self { level: NoticeLevel::Error, message: message.into() }
    }

    /// エラーを通知に変換（文言は固定、サービスのメッセージのみそのまま）
    pub fn from_error(error: &Error) -> Self {
        match error {
            Error::InvalidInputType(_) | Error::InvalidDataUrl(_) => Notice::warning(MSG_INVALID_IMAGE),
            Error::Application(message) => Notice::warning(message.clone()),
            Error::Busy => Notice::warning(MSG_BUSY),
            Error::Transport(_) => Notice::error(MSG_TRANSPORT_FAILURE),
            Error::Unexpected(_) | Error::Json(_) | Error::Config(_) => Notice::error(MSG_UNEXPECTED),
        }
    }
}

/// 表示中の通知
///
/// 表示ごとに番号を振る。自動で閉じるタイマーは番号が一致する場合だけ閉じる。
#[derive(Debug, Clone, Default)]
pub struct NoticeSlot {
    current: Option<Notice>,
    shown: u64,
}

impl NoticeSlot {
    /// 通知を表示して番号を返す
    pub fn show(&mut self, notice: Notice) -> u64 {
        self.shown += 1;
        self.current = Some(notice);
        self.shown
    }

    /// `ticket` の通知がまだ表示中なら閉じる
    pub fn expire(&mut self, ticket: u64) -> bool {
        if ticket != self.shown || self.current.is_none() {
            return false;
        }
        self.current = None;
        true
    }

    pub fn dismiss(&mut self) {
        self.current = None;
    }

    pub fn current(&self) -> Option<&Notice> {
        self.current.as_ref()
    }
}
