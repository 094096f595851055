//! エラー型定義

use thiserror::Error;

/// 共通エラー型
#[derive(Error, Debug)]
pub enum Error {
    /// 画像以外のファイルが選択された
    #[error("Unsupported content type: {0}")]
    InvalidInputType(String),

    /// 解析サービスに到達できない、またはHTTPエラー
    #[error("Transport error: {0}")]
    Transport(String),

    /// サービスが返したエラーメッセージ（そのまま表示する）
    #[error("{0}")]
    Application(String),

    #[error("Unexpected error: {0}")]
    Unexpected(String),

    /// 解析中の再選択・再送信
    #[error("An analysis is already in progress")]
    Busy,

    #[error("Invalid data URL: {0}")]
    InvalidDataUrl(String),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Config error: {0}")]
    Config(String),
}

/// Result型エイリアス
pub type Result<T> = std::result::Result<T, Error>;
