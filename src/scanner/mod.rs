//! 画像ファイルの読み込み
//!
//! ブラウザのファイル選択に相当する。Content-Typeはマジックバイトから判定し、
//! 判定できない場合は拡張子から推定する。

use crate::error::{NutriVisionError, Result};
use image::ImageFormat;
use nutrivision_common::SelectedFile;
use std::path::Path;

/// 画像以外で判定したい主な拡張子
const NON_IMAGE_TYPES: &[(&str, &str)] = &[
    ("pdf", "application/pdf"),
    ("txt", "text/plain"),
    ("json", "application/json"),
    ("csv", "text/csv"),
    ("html", "text/html"),
    ("zip", "application/zip"),
    ("mp4", "video/mp4"),
];

const FALLBACK_TYPE: &str = "application/octet-stream";

pub fn read_image(path: &Path) -> Result<SelectedFile> {
    if !path.is_file() {
        return Err(NutriVisionError::FileNotFound(path.display().to_string()));
    }

    let bytes = std::fs::read(path)
        .map_err(|e| NutriVisionError::ImageLoad(format!("{}: {}", path.display(), e)))?;
    let name = path
        .file_name()
        .map(|n| n.to_string_lossy().to_string())
        .unwrap_or_default();
    let content_type = detect_content_type(path, &bytes).to_string();

    tracing::debug!(file = %name, %content_type, size = bytes.len(), "file read");

    Ok(SelectedFile { name, content_type, bytes })
}

pub fn detect_content_type(path: &Path, bytes: &[u8]) -> &'static str {
    if let Ok(format) = image::guess_format(bytes) {
        return format.to_mime_type();
    }

    if let Ok(format) = ImageFormat::from_path(path) {
        return format.to_mime_type();
    }

    path.extension()
        .map(|ext| ext.to_string_lossy().to_lowercase())
        .and_then(|ext| {
            NON_IMAGE_TYPES
                .iter()
                .find(|(known, _)| *known == ext)
                .map(|(_, mime)| *mime)
        })
        .unwrap_or(FALLBACK_TYPE)
}
