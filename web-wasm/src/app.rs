//! メインアプリケーションコンポーネント

use crate::api::analyze;
use crate::components::{
    header::Header,
    image_upload::ImageUpload,
    notice_banner::NoticeBanner,
    nutrition_results::NutritionResults,
};
use gloo::timers::callback::Timeout;
use leptos::prelude::*;
use leptos::task::spawn_local;
use nutrivision_common::{DataUrl, Notice, NoticeSlot, NutritionReport, Orchestrator};

/// 通知を自動で閉じるまでの時間(ms)
const NOTICE_TIMEOUT_MS: u32 = 4_000;

#[component]
pub fn App() -> impl IntoView {
    let config = analyze::service_config();
    let workflow = RwSignal::new(Orchestrator::new());
    let notices = RwSignal::new(NoticeSlot::default());
    let is_analyzing = Signal::derive(move || workflow.with(|w| w.is_analyzing()));

    let show_notice = move |next: Notice| {
        gloo::console::log!(format!("[{}] {}", next.level.as_str(), next.message));
        let Some(ticket) = notices.try_update(|slot| slot.show(next)) else {
            return;
        };
        Timeout::new(NOTICE_TIMEOUT_MS, move || {
            notices.update(|slot| {
                slot.expire(ticket);
            });
        })
        .forget();
    };

    // 画像が選ばれたら解析を開始
    let on_image_selected = move |image: DataUrl| {
        let submission = match workflow.try_update(|w| w.begin(image)) {
            Some(Ok(submission)) => submission,
            Some(Err(err)) => {
                show_notice(Notice::from_error(&err));
                return;
            }
            None => return,
        };

        let config = config.clone();
        spawn_local(async move {
            let outcome = analyze::invoke_analysis(&config, &submission.request).await;
            if let Err(err) = &outcome {
                gloo::console::error!(format!("analysis failed: {}", err));
            }
            if let Some(Some(next)) = workflow.try_update(|w| w.finish(submission.id, outcome)) {
                show_notice(next);
            }
        });
    };

    let report = move || workflow.with(|w| w.result().map(NutritionReport::from_result));

    view! {
        <div class="app">
            <Header />

            <main class="container">
                <NoticeBanner notices=notices />

                <ImageUpload
                    is_analyzing=is_analyzing
                    on_image_selected=on_image_selected
                    on_notice=show_notice
                />

                {move || report().map(|report| view! { <NutritionResults report=report /> })}
            </main>
        </div>
    }
}
