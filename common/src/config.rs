//! 解析サービスの接続設定

use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};

/// ローカルのSupabase Functions（analyze-food）
pub const DEFAULT_ENDPOINT: &str = "http://localhost:54321/functions/v1/analyze-food";

pub const ENDPOINT_ENV: &str = "NUTRIVISION_ENDPOINT";
pub const API_KEY_ENV: &str = "NUTRIVISION_API_KEY";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ServiceConfig {
    pub endpoint: String,
    pub api_key: Option<String>,
}

impl ServiceConfig {
    pub fn new(endpoint: impl Into<String>, api_key: Option<String>) -> Result<Self> {
        let endpoint = endpoint.into().trim().to_string();
        if !(endpoint.starts_with("http://") || endpoint.starts_with("https://")) {
            return Err(Error::Config(format!("endpoint must be an http(s) URL: {}", endpoint)));
        }
        let api_key = api_key.map(|k| k.trim().to_string()).filter(|k| !k.is_empty());
        Ok(Self { endpoint, api_key })
    }

    /// 送信する認証ヘッダ（Functionsゲートウェイ用）
    pub fn auth_headers(&self) -> Vec<(&'static str, String)> {
        match &self.api_key {
            Some(key) => vec![
                ("Authorization", format!("Bearer {}", key)),
                ("apikey", key.clone()),
            ],
            None => Vec::new(),
        }
    }
}

impl Default for ServiceConfig {
    fn default() -> Self {
        Self { endpoint: DEFAULT_ENDPOINT.to_string(), api_key: None }
    }
}
