//! 結果表示モデル
//!
//! AnalysisResult から描画用のデータを組み立てる。値の変換は行わず、
//! 信頼度の区分とプログレスバーのクランプのみを計算する。

use crate::types::{AnalysisResult, FoodItem};
use serde::Serialize;

/// 信頼度の区分（下限を含む）
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ConfidenceTier {
    High,
    Medium,
    Low,
}

impl ConfidenceTier {
    pub const HIGH_THRESHOLD: f64 = 80.0;
    pub const MEDIUM_THRESHOLD: f64 = 60.0;

    pub fn classify(confidence: f64) -> Self {
        if confidence >= Self::HIGH_THRESHOLD {
            ConfidenceTier::High
        } else if confidence >= Self::MEDIUM_THRESHOLD {
            ConfidenceTier::Medium
        } else {
            // NaNもここに落ちる
            ConfidenceTier::Low
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            ConfidenceTier::High => "high",
            ConfidenceTier::Medium => "medium",
            ConfidenceTier::Low => "low",
        }
    }
}

/// サービスが値を返さなかった項目の表示
pub const PLACEHOLDER: &str = "--";

/// 不明な食品名の表示
pub const UNKNOWN_FOOD: &str = "Unknown food";

/// 数値をサービスの値のまま表示する。欠落は `PLACEHOLDER`
pub fn display_number(value: Option<f64>) -> String {
    value.map_or_else(|| PLACEHOLDER.to_string(), |v| v.to_string())
}

/// 栄養素のプログレスバー
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MacroBar {
    pub label: &'static str,
    pub grams: Option<f64>,
    /// 0-100にクランプした値
    pub percent: f64,
}

impl MacroBar {
    pub fn new(label: &'static str, grams: Option<f64>) -> Self {
        Self { label, grams, percent: grams.map_or(0.0, clamp_percent) }
    }

    pub fn amount_label(&self) -> String {
        match self.grams {
            Some(grams) => format!("{}g", grams),
            None => PLACEHOLDER.to_string(),
        }
    }
}

/// 食品カード
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ItemCard {
    pub name: String,
    pub serving_size: Option<String>,
    pub confidence: Option<f64>,
    pub tier: ConfidenceTier,
    pub calories: Option<f64>,
    pub macros: [MacroBar; 3],
}

impl ItemCard {
    pub fn from_item(item: &FoodItem) -> Self {
        Self {
            name: item.name.clone().unwrap_or_else(|| UNKNOWN_FOOD.to_string()),
            serving_size: item.serving_size.clone(),
            confidence: item.confidence,
            tier: item.confidence.map_or(ConfidenceTier::Low, ConfidenceTier::classify),
            calories: item.calories,
            macros: [
                MacroBar::new("Protein", item.protein),
                MacroBar::new("Carbohydrates", item.carbs),
                MacroBar::new("Fat", item.fat),
            ],
        }
    }

    pub fn confidence_label(&self) -> String {
        format!("{}% confident", display_number(self.confidence))
    }

    pub fn calories_label(&self) -> String {
        display_number(self.calories)
    }
}

/// 表示全体
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NutritionReport {
    pub total_calories: f64,
    pub item_count: usize,
    pub cards: Vec<ItemCard>,
}

impl NutritionReport {
    pub fn from_result(result: &AnalysisResult) -> Self {
        Self {
            total_calories: result.total_calories,
            item_count: result.item_count(),
            cards: result.items.iter().map(ItemCard::from_item).collect(),
        }
    }
}

fn clamp_percent(value: f64) -> f64 {
    if value.is_nan() {
        0.0
    } else {
        value.clamp(0.0, 100.0)
    }
}
