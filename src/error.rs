use thiserror::Error;

#[derive(Error, Debug)]
pub enum NutriVisionError {
    #[error("Config error: {0}")]
    Config(String),

    #[error("File not found: {0}")]
    FileNotFound(String),

    #[error("Failed to read image: {0}")]
    ImageLoad(String),

    #[error("API call failed: {0}")]
    ApiCall(String),

    #[error("Analysis failed: {0}")]
    AnalysisFailed(String),

    #[error("JSON error: {0}")]
    JsonParse(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Prompt error: {0}")]
    Prompt(#[from] dialoguer::Error),

    #[error(transparent)]
    Common(#[from] nutrivision_common::Error),
}

pub type Result<T> = std::result::Result<T, NutriVisionError>;
