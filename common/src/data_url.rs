//! Data URL ("data:image/jpeg;base64,/9j/4AAQ...")

use crate::error::{Error, Result};
use base64::{engine::general_purpose::STANDARD, Engine as _};
use std::fmt;

/// base64形式のData URL
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DataUrl(String);

impl DataUrl {
    /// バイト列をData URLにエンコード
    pub fn encode(mime_type: &str, bytes: &[u8]) -> Self {
        DataUrl(format!("data:{};base64,{}", mime_type, STANDARD.encode(bytes)))
    }

    /// FileReaderなどが生成した文字列を検証して取り込む
    pub fn parse(value: impl Into<String>) -> Result<Self> {
        let value = value.into();
        let Some(meta) = value.strip_prefix("data:").and_then(|rest| rest.split(',').next()) else {
            return Err(Error::InvalidDataUrl("missing data: prefix".into()));
        };
        if !value.contains(',') {
            return Err(Error::InvalidDataUrl("missing payload separator".into()));
        }
        if !meta.ends_with(";base64") {
            return Err(Error::InvalidDataUrl("payload is not base64".into()));
        }
        Ok(DataUrl(value))
    }

    pub fn mime_type(&self) -> &str {
        extract_mime_type_from_data_url(&self.0)
    }

    pub fn base64_payload(&self) -> &str {
        extract_base64_from_data_url(&self.0).unwrap_or_default()
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_string(self) -> String {
        self.0
    }
}

impl fmt::Display for DataUrl {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Data URLからBase64データ部分を抽出
pub fn extract_base64_from_data_url(data_url: &str) -> Option<&str> {
    data_url.split(',').nth(1)
}

/// Data URLからMIMEタイプを抽出（抽出失敗時は"application/octet-stream"）
pub fn extract_mime_type_from_data_url(data_url: &str) -> &str {
    data_url
        .strip_prefix("data:")
        .and_then(|s| s.split(';').next())
        .filter(|s| !s.is_empty() && !s.contains(','))
        .unwrap_or("application/octet-stream")
}
