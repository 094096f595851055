//! 解析結果の型定義
//!
//! CLIとWeb(WASM)で共有される型:
//! - FoodItem: 画像から認識された食品1件
//! - AnalysisResult: 解析サービスの成功レスポンス
//! - AnalyzeRequest: 解析サービスへのリクエスト

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

/// 認識された食品
///
/// サービスのレスポンスからのみ生成される。フィールドの検証は行わず、
/// 欠落・null・型違いの値は `None` として保持する。
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FoodItem {
    #[serde(default, deserialize_with = "lenient_text", skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    /// 分量（自由記述）
    #[serde(default, deserialize_with = "lenient_text", skip_serializing_if = "Option::is_none")]
    pub serving_size: Option<String>,
    #[serde(default, deserialize_with = "lenient_number", skip_serializing_if = "Option::is_none")]
    pub calories: Option<f64>,
    #[serde(default, deserialize_with = "lenient_number", skip_serializing_if = "Option::is_none")]
    pub protein: Option<f64>, // g
    #[serde(default, deserialize_with = "lenient_number", skip_serializing_if = "Option::is_none")]
    pub carbs: Option<f64>, // g
    #[serde(default, deserialize_with = "lenient_number", skip_serializing_if = "Option::is_none")]
    pub fat: Option<f64>, // g
    /// 0-100
    #[serde(default, deserialize_with = "lenient_number", skip_serializing_if = "Option::is_none")]
    pub confidence: Option<f64>,
}

/// 数値以外は `None`
fn lenient_number<'de, D>(deserializer: D) -> Result<Option<f64>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Value::deserialize(deserializer)?.as_f64())
}

/// 文字列以外は `None`
fn lenient_text<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Value::deserialize(deserializer)? {
        Value::String(text) => Some(text),
        _ => None,
    })
}

/// 解析結果
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalysisResult {
    /// サービスの検出順
    pub items: Vec<FoodItem>,

    /// サービスが返した合計値（再計算しない）
    pub total_calories: f64,
}

impl AnalysisResult {
    pub fn item_count(&self) -> usize {
        self.items.len()
    }
}

/// 解析サービスへのリクエスト
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalyzeRequest {
    pub image_data: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_analysis_result_deserialize() {
        let json = r#"{
            "items": [
                {"name": "Apple", "servingSize": "1 medium (182g)", "calories": 95,
                 "protein": 0.5, "carbs": 25, "fat": 0.3, "confidence": 92}
            ],
            "totalCalories": 95
        }"#;

        let result: AnalysisResult = serde_json::from_str(json).expect("デシリアライズ失敗");
        assert_eq!(result.item_count(), 1);
        assert_eq!(result.items[0].name.as_deref(), Some("Apple"));
        assert_eq!(result.items[0].serving_size.as_deref(), Some("1 medium (182g)"));
        assert_eq!(result.items[0].protein, Some(0.5));
        assert_eq!(result.total_calories, 95.0);
    }

    #[test]
    fn test_food_item_missing_fields_are_none() {
        let json = r#"{"name": "Rice"}"#;
        let item: FoodItem = serde_json::from_str(json).expect("デシリアライズ失敗");
        assert_eq!(item.name.as_deref(), Some("Rice"));
        assert_eq!(item.serving_size, None);
        assert_eq!(item.confidence, None);
    }

    #[test]
    fn test_food_item_tolerates_null_and_wrong_types() {
        let json = r#"{"name": 7, "servingSize": null, "calories": "95", "protein": null, "fat": true}"#;
        let item: FoodItem = serde_json::from_str(json).expect("デシリアライズ失敗");
        assert_eq!(item, FoodItem::default());
    }

    #[test]
    fn test_missing_fields_are_not_invented_on_output() {
        let item: FoodItem = serde_json::from_str(r#"{"name": "Apple", "calories": 95}"#).unwrap();
        let json = serde_json::to_value(&item).unwrap();
        assert_eq!(json, serde_json::json!({"name": "Apple", "calories": 95.0}));
    }

    #[test]
    fn test_analysis_result_requires_items() {
        let json = r#"{"totalCalories": 10}"#;
        assert!(serde_json::from_str::<AnalysisResult>(json).is_err());
    }

    #[test]
    fn test_total_is_not_recomputed() {
        let json = r#"{
            "items": [{"name": "A", "calories": 100}, {"name": "B", "calories": 50}],
            "totalCalories": 120
        }"#;
        let result: AnalysisResult = serde_json::from_str(json).unwrap();
        assert_eq!(result.total_calories, 120.0);
        assert_eq!(result.items[0].calories, Some(100.0));
    }

    #[test]
    fn test_analyze_request_serialize() {
        let request = AnalyzeRequest {
            image_data: "data:image/png;base64,iVBORw0KGgo=".to_string(),
        };
        let json = serde_json::to_string(&request).expect("シリアライズ失敗");
        assert_eq!(json, r#"{"imageData":"data:image/png;base64,iVBORw0KGgo="}"#);
    }
}
