//! NutriVision Common Library
//!
//! CLIとWeb(WASM)で共有されるワークフロー・型・表示モデル

pub mod acquisition;
pub mod config;
pub mod data_url;
pub mod error;
pub mod notice;
pub mod parser;
pub mod presentation;
pub mod types;
pub mod workflow;

pub use acquisition::{check_content_type, ImageAcquisition, ImageSource, SelectedFile, ACCEPT_IMAGES};
pub use config::ServiceConfig;
pub use data_url::DataUrl;
pub use error::{Error, Result};
pub use notice::{Notice, NoticeLevel, NoticeSlot};
pub use parser::ServiceReply;
pub use presentation::{ConfidenceTier, ItemCard, MacroBar, NutritionReport};
pub use types::{AnalysisResult, AnalyzeRequest, FoodItem};
pub use workflow::{AnalysisService, Failure, FailureKind, Orchestrator, Submission, SubmissionId, WorkflowState};
