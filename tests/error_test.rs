//! エラーケーステスト
//!
//! 各種エラー条件でのエラーハンドリングを検証

use nutrivision::error::NutriVisionError;
use nutrivision::scanner;
use std::path::Path;

/// 存在しないファイルを読み込んだ場合
#[test]
fn test_read_nonexistent_file() {
    let result = scanner::read_image(Path::new("/nonexistent/path/12345.png"));
    assert!(matches!(result, Err(NutriVisionError::FileNotFound(_))));
}

/// ディレクトリを指定した場合
#[test]
fn test_read_directory() {
    let dir = tempfile::tempdir().expect("Failed to create temp dir");
    let result = scanner::read_image(dir.path());
    assert!(matches!(result, Err(NutriVisionError::FileNotFound(_))));
}

/// Display実装確認
#[test]
fn test_error_display() {
    let errors = vec![
        NutriVisionError::Config("bad config".to_string()),
        NutriVisionError::FileNotFound("apple.png".to_string()),
        NutriVisionError::ImageLoad("broken".to_string()),
        NutriVisionError::ApiCall("client".to_string()),
        NutriVisionError::AnalysisFailed("No food detected".to_string()),
    ];

    for err in errors {
        let display = format!("{}", err);
        assert!(!display.is_empty(), "エラーメッセージが空: {:?}", err);
    }
}

/// IOエラーからの変換
#[test]
fn test_io_error_conversion() {
    let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "file not found");
    let err: NutriVisionError = io_err.into();

    assert!(matches!(err, NutriVisionError::Io(_)));
    assert!(format!("{}", err).contains("IO"));
}

/// JSONエラーからの変換
#[test]
fn test_json_error_conversion() {
    let json_err = serde_json::from_str::<serde_json::Value>("{ invalid }").unwrap_err();
    let err: NutriVisionError = json_err.into();

    assert!(matches!(err, NutriVisionError::JsonParse(_)));
}

/// common::Errorからの変換（透過的エラー）
#[test]
fn test_common_error_is_transparent() {
    let common_err = nutrivision_common::Error::Application("No food detected".to_string());
    let err: NutriVisionError = common_err.into();

    assert!(matches!(err, NutriVisionError::Common(_)));
    assert_eq!(format!("{}", err), "No food detected");
}
