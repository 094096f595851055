//! 画像選択から解析までのセッション
//!
//! 取得ユニットとオーケストレーターをまとめ、CLIの対話ループから使う。

use crate::error::{NutriVisionError, Result};
use crate::scanner;
use nutrivision_common::{
    AnalysisResult, AnalysisService, DataUrl, ImageAcquisition, Notice, NutritionReport, Orchestrator,
    SelectedFile, WorkflowState,
};
use std::path::Path;

/// パス指定での選択結果
#[derive(Debug, Clone, PartialEq)]
pub enum Selection {
    Ready(DataUrl),
    /// 画像として受け付けなかった。状態は変わらない
    Rejected(Notice),
}

pub struct Session<S> {
    service: S,
    acquisition: ImageAcquisition,
    workflow: Orchestrator,
}

impl<S: AnalysisService> Session<S> {
    pub fn new(service: S) -> Self {
        Self {
            service,
            acquisition: ImageAcquisition::new(),
            workflow: Orchestrator::new(),
        }
    }

    /// ファイルを選択する。画像以外は状態を変えずにエラー。
    pub fn select(&mut self, file: &SelectedFile) -> Result<DataUrl> {
        Ok(self.acquisition.select(file, self.workflow.is_analyzing())?)
    }

    pub fn select_path(&mut self, path: &Path) -> Result<DataUrl> {
        let file = scanner::read_image(path)?;
        self.select(&file)
    }

    /// パスの画像を選択する。入力の不備は通知として返す
    pub fn choose(&mut self, path: &Path) -> Result<Selection> {
        match self.select_path(path) {
            Ok(image) => Ok(Selection::Ready(image)),
            Err(NutriVisionError::Common(err)) => Ok(Selection::Rejected(Notice::from_error(&err))),
            Err(err) => Err(err),
        }
    }

    /// 解析を1回実行して通知を返す
    pub async fn analyze(&mut self, image: DataUrl) -> Result<Notice> {
        Ok(self.workflow.submit(&self.service, image).await?)
    }

    /// 「別の画像を選ぶ」
    pub fn reset(&mut self) -> Result<()> {
        self.acquisition.reset(self.workflow.is_analyzing())?;
        Ok(())
    }

    pub fn state(&self) -> &WorkflowState {
        self.workflow.state()
    }

    pub fn result(&self) -> Option<&AnalysisResult> {
        self.workflow.result()
    }

    pub fn report(&self) -> Option<NutritionReport> {
        self.result().map(NutritionReport::from_result)
    }

    pub fn preview(&self) -> Option<&DataUrl> {
        self.acquisition.preview()
    }

    pub fn can_select(&self) -> bool {
        self.workflow.can_select()
    }

    /// 直近の解析が完了していなければエラーとして返す
    pub fn ensure_completed(&self) -> Result<&AnalysisResult> {
        match self.workflow.state() {
            WorkflowState::Completed(result) => Ok(result),
            WorkflowState::Failed(failure) => Err(NutriVisionError::AnalysisFailed(failure.detail.clone())),
            other => Err(NutriVisionError::AnalysisFailed(format!("workflow is {}", other.as_str()))),
        }
    }

    pub fn service(&self) -> &S {
        &self.service
    }
}
