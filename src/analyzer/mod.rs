//! 解析サービス（HTTP）
//!
//! `POST <endpoint>` に `{ "imageData": "<data-url>" }` を送信する。
//! 非2xxと通信エラーは `Transport`、本文の解釈は共通パーサーに任せる。

use crate::error::{NutriVisionError, Result};
use nutrivision_common::{AnalysisService, AnalyzeRequest, ServiceConfig, ServiceReply};

pub struct HttpAnalysisService {
    client: reqwest::Client,
    config: ServiceConfig,
}

impl HttpAnalysisService {
    pub fn new(config: ServiceConfig) -> Result<Self> {
        // タイムアウトは設定しない
        let client = reqwest::Client::builder()
            .user_agent(concat!("nutrivision/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(|e| NutriVisionError::ApiCall(format!("HTTP client: {}", e)))?;
        Ok(Self { client, config })
    }

    pub fn endpoint(&self) -> &str {
        &self.config.endpoint
    }
}

impl AnalysisService for HttpAnalysisService {
    async fn analyze(&self, request: &AnalyzeRequest) -> nutrivision_common::Result<ServiceReply> {
        use nutrivision_common::Error;

        let mut builder = self.client.post(&self.config.endpoint).json(request);
        for (name, value) in self.config.auth_headers() {
            builder = builder.header(name, value);
        }

        tracing::debug!(endpoint = %self.config.endpoint, bytes = request.image_data.len(), "sending analysis request");

        let response = builder
            .send()
            .await
            .map_err(|e| Error::Transport(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            tracing::warn!(%status, %body, "analysis service returned an error status");
            return Err(Error::Transport(format!("HTTP {}", status)));
        }

        let body = response
            .text()
            .await
            .map_err(|e| Error::Transport(e.to_string()))?;
        ServiceReply::from_body(&body)
    }
}
