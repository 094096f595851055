use crate::error::{NutriVisionError, Result};
use nutrivision_common::config::{API_KEY_ENV, DEFAULT_ENDPOINT, ENDPOINT_ENV};
use nutrivision_common::ServiceConfig;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
pub struct Config {
    /// 解析サービス（analyze-food）のURL
    pub endpoint: Option<String>,
    pub api_key: Option<String>,
}

impl Config {
    pub fn load() -> Result<Self> {
        Self::load_from(&Self::config_path()?)
    }

    pub fn load_from(config_path: &Path) -> Result<Self> {
        if config_path.exists() {
            let content = std::fs::read_to_string(config_path)?;
            let config: Config = serde_json::from_str(&content)?;
            Ok(config)
        } else {
            Ok(Self::default())
        }
    }

    pub fn save(&self) -> Result<()> {
        self.save_to(&Self::config_path()?)
    }

    pub fn save_to(&self, config_path: &Path) -> Result<()> {
        if let Some(parent) = config_path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let content = serde_json::to_string_pretty(self)?;
        std::fs::write(config_path, content)?;
        Ok(())
    }

    pub fn config_path() -> Result<PathBuf> {
        let home = dirs::home_dir()
            .ok_or_else(|| NutriVisionError::Config("home directory not found".into()))?;
        Ok(home.join(".config").join("nutrivision").join("config.json"))
    }

    /// 環境変数 → 設定ファイル → デフォルトの順で接続設定を解決
    pub fn service(&self) -> Result<ServiceConfig> {
        let endpoint = env_var(ENDPOINT_ENV)
            .or_else(|| self.endpoint.clone())
            .unwrap_or_else(|| {
                tracing::info!("{ENDPOINT_ENV} not set, using default: {DEFAULT_ENDPOINT}");
                DEFAULT_ENDPOINT.to_string()
            });
        let api_key = env_var(API_KEY_ENV).or_else(|| self.api_key.clone());

        Ok(ServiceConfig::new(endpoint, api_key)?)
    }

    pub fn set_endpoint(&mut self, endpoint: String) -> Result<()> {
        // 保存前にURLとして妥当か確認
        ServiceConfig::new(endpoint.clone(), None)?;
        self.endpoint = Some(endpoint);
        self.save()
    }

    pub fn set_api_key(&mut self, key: String) -> Result<()> {
        self.api_key = Some(key);
        self.save()
    }
}

fn env_var(key: &str) -> Option<String> {
    std::env::var(key).ok().filter(|v| !v.trim().is_empty())
}
