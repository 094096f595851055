//! 解析結果のターミナル表示

use nutrivision_common::{ConfidenceTier, ItemCard, MacroBar, Notice, NoticeLevel, NutritionReport};
use std::fmt::Write;

const BAR_WIDTH: usize = 20;

pub fn render_report(report: &NutritionReport) -> String {
    let mut out = String::new();

    let _ = writeln!(out, "🔥 Total Calories: {}", report.total_calories);
    let _ = writeln!(out, "   Detected Items: {}", report.item_count);
    let _ = writeln!(out);
    let _ = writeln!(out, "🍎 Nutritional Breakdown");

    for card in &report.cards {
        let _ = writeln!(out);
        render_card(&mut out, card);
    }

    out
}

fn render_card(out: &mut String, card: &ItemCard) {
    let _ = writeln!(out, "  {}  [{}] {}", card.name, tier_badge(card.tier), card.confidence_label());
    if let Some(serving_size) = card.serving_size.as_deref().filter(|s| !s.is_empty()) {
        let _ = writeln!(out, "  {}", serving_size);
    }
    let _ = writeln!(out, "  Calories: {}", card.calories_label());
    for bar in &card.macros {
        let _ = writeln!(out, "    {:<14}{:>8}  {}", bar.label, bar.amount_label(), progress(bar));
    }
}

fn tier_badge(tier: ConfidenceTier) -> &'static str {
    match tier {
        ConfidenceTier::High => "HIGH",
        ConfidenceTier::Medium => "MEDIUM",
        ConfidenceTier::Low => "LOW",
    }
}

/// 0-100% を固定幅のバーで表示
pub fn progress(bar: &MacroBar) -> String {
    let filled = ((bar.percent / 100.0) * BAR_WIDTH as f64).round() as usize;
    let filled = filled.min(BAR_WIDTH);
    format!("[{}{}]", "█".repeat(filled), "░".repeat(BAR_WIDTH - filled))
}

pub fn render_notice(notice: &Notice) -> String {
    let icon = match notice.level {
        NoticeLevel::Success => "✔",
        NoticeLevel::Warning => "⚠",
        NoticeLevel::Error => "✖",
    };
    format!("{} {}", icon, notice.message)
}
