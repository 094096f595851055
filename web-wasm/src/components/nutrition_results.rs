//! 栄養素の解析結果コンポーネント

use leptos::prelude::*;
use nutrivision_common::{ItemCard, MacroBar, NutritionReport};

#[component]
pub fn NutritionResults(report: NutritionReport) -> impl IntoView {
    let total_calories = report.total_calories.to_string();
    let item_count = report.item_count.to_string();
    let cards = report
        .cards
        .into_iter()
        .map(|card| view! { <FoodItemCard card=card /> })
        .collect_view();

    view! {
        <section class="nutrition-results">
            <div class="total-card">
                <div class="total-calories">
                    <span class="total-icon">"🔥"</span>
                    <div>
                        <p class="total-label">"Total Calories"</p>
                        <p class="total-value">{total_calories}</p>
                    </div>
                </div>
                <div class="total-items">
                    <p class="total-label">"Detected Items"</p>
                    <p class="total-value">{item_count}</p>
                </div>
            </div>

            <h3 class="breakdown-title">"🍎 Nutritional Breakdown"</h3>
            {cards}
        </section>
    }
}

#[component]
fn FoodItemCard(card: ItemCard) -> impl IntoView {
    let badge_class = format!("confidence-badge tier-{}", card.tier.as_str());
    let confidence_label = card.confidence_label();
    let calories = card.calories_label();
    let serving_size = card.serving_size.clone().unwrap_or_default();
    let macros = card
        .macros
        .into_iter()
        .map(|bar| view! { <MacroProgress bar=bar /> })
        .collect_view();

    view! {
        <div class="food-card">
            <div class="food-card-header">
                <div>
                    <h4>{card.name}</h4>
                    <p class="text-muted">{serving_size}</p>
                </div>
                <span class=badge_class>{confidence_label}</span>
            </div>

            <div class="food-calories">
                <p class="text-muted">"Calories"</p>
                <p class="food-calories-value">{calories}</p>
            </div>

            <div class="macros">
                <p class="macros-title">"Macronutrients"</p>
                {macros}
            </div>
        </div>
    }
}

#[component]
fn MacroProgress(bar: MacroBar) -> impl IntoView {
    let amount = bar.amount_label();
    let width = format!("width: {}%", bar.percent);

    view! {
        <div class="macro">
            <div class="macro-header">
                <span class="text-muted">{bar.label}</span>
                <span class="macro-amount">{amount}</span>
            </div>
            <div class="progress-bar">
                <div class="progress-fill" style=width />
            </div>
        </div>
    }
}
