//! 画像取得
//!
//! カメラ/ファイル選択から画像を受け取り、画像タイプを検証して
//! Data URLに変換する。成功した選択ごとにData URLを1つだけ返す。

use crate::data_url::DataUrl;
use crate::error::{Error, Result};

/// 画像の取得元
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ImageSource {
    /// 端末カメラ（背面カメラを優先）
    Camera,
    FilePicker,
}

impl ImageSource {
    /// file inputの `capture` 属性値
    pub fn capture_hint(&self) -> Option<&'static str> {
        match self {
            ImageSource::Camera => Some("environment"),
            ImageSource::FilePicker => None,
        }
    }
}

/// file inputの `accept` 属性値
pub const ACCEPT_IMAGES: &str = "image/*";

/// 選択されたファイル
#[derive(Debug, Clone)]
pub struct SelectedFile {
    pub name: String,
    pub content_type: String,
    pub bytes: Vec<u8>,
}

pub fn is_image_content_type(content_type: &str) -> bool {
    content_type.trim().to_ascii_lowercase().starts_with("image/")
}

/// 画像以外は `InvalidInputType`
pub fn check_content_type(content_type: &str) -> Result<()> {
    if is_image_content_type(content_type) {
        Ok(())
    } else {
        Err(Error::InvalidInputType(content_type.to_string()))
    }
}

/// プレビューを保持する取得ユニット
#[derive(Debug, Clone, Default)]
pub struct ImageAcquisition {
    preview: Option<DataUrl>,
}

impl ImageAcquisition {
    pub fn new() -> Self {
        Self::default()
    }

    /// ファイルを検証・エンコードし、プレビューを設定してData URLを返す
    ///
    /// 失敗時はプレビューを変更しない。
    pub fn select(&mut self, file: &SelectedFile, analyzing: bool) -> Result<DataUrl> {
        ensure_idle(analyzing)?;
        check_content_type(&file.content_type).inspect_err(|_| {
            tracing::warn!(file = %file.name, content_type = %file.content_type, "rejected non-image file");
        })?;

        let mime_type = file.content_type.trim().to_ascii_lowercase();
        Ok(self.present(DataUrl::encode(&mime_type, &file.bytes)))
    }

    /// ブラウザ側で読み込み済みのData URLを取り込む
    pub fn accept_data_url(&mut self, content_type: &str, data_url: &str, analyzing: bool) -> Result<DataUrl> {
        ensure_idle(analyzing)?;
        check_content_type(content_type)?;
        let url = DataUrl::parse(data_url)?;
        Ok(self.present(url))
    }

    /// 「別の画像を選ぶ」: プレビューをクリア（解析中は不可）
    pub fn reset(&mut self, analyzing: bool) -> Result<()> {
        ensure_idle(analyzing)?;
        self.preview = None;
        Ok(())
    }

    pub fn preview(&self) -> Option<&DataUrl> {
        self.preview.as_ref()
    }

    fn present(&mut self, url: DataUrl) -> DataUrl {
        tracing::debug!(mime_type = %url.mime_type(), "image selected");
        self.preview = Some(url.clone());
        url
    }
}

fn ensure_idle(analyzing: bool) -> Result<()> {
    if analyzing {
        Err(Error::Busy)
    } else {
        Ok(())
    }
}
