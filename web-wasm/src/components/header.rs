//! ヘッダーコンポーネント

use leptos::prelude::*;

#[component]
pub fn Header() -> impl IntoView {
    view! {
        <header class="header">
            <div class="container header-inner">
                <div class="header-logo">"🍽"</div>
                <div>
                    <h1>"NutriVision"</h1>
                    <p class="text-muted">"AI-Powered Food Recognition & Calorie Tracker"</p>
                </div>
            </div>
        </header>
    }
}
