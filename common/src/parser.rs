//! 解析サービスのレスポンスパーサー
//!
//! サービスは次のどちらかを返す:
//! - `{ "items": [...], "totalCalories": n }`
//! - `{ "error": "..." }`

use crate::error::{Error, Result};
use crate::types::AnalysisResult;
use serde_json::Value;

/// パース済みのレスポンス
#[derive(Debug, Clone, PartialEq)]
pub enum ServiceReply {
    Analysis(AnalysisResult),
    /// サービスが返したエラーメッセージ
    Rejected(String),
}

impl ServiceReply {
    /// JSON値からパース
    ///
    /// `error` が空でなければ `Rejected`。それ以外は `AnalysisResult` として
    /// デシリアライズし、失敗した場合は `Error::Unexpected`。
    pub fn from_json(value: Value) -> Result<Self> {
        if let Some(message) = value.get("error").and_then(error_message) {
            return Ok(ServiceReply::Rejected(message));
        }

        serde_json::from_value::<AnalysisResult>(value)
            .map(ServiceReply::Analysis)
            .map_err(|e| Error::Unexpected(format!("malformed analysis response: {}", e)))
    }

    /// レスポンス本文からパース
    pub fn from_body(body: &str) -> Result<Self> {
        let value: Value = serde_json::from_str(body.trim())
            .map_err(|e| Error::Unexpected(format!("response is not JSON: {}", e)))?;
        Self::from_json(value)
    }
}

/// null・false・空文字はエラーなしとみなす
fn error_message(value: &Value) -> Option<String> {
    match value {
        Value::Null | Value::Bool(false) => None,
        Value::String(s) if s.is_empty() => None,
        Value::String(s) => Some(s.clone()),
        other => Some(other.to_string()),
    }
}
