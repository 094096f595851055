//! 通知バナー

use leptos::prelude::*;
use nutrivision_common::NoticeSlot;

#[component]
pub fn NoticeBanner(notices: RwSignal<NoticeSlot>) -> impl IntoView {
    view! {
        {move || notices.with(|slot| slot.current().cloned()).map(|notice| {
            let class = format!("notice notice-{}", notice.level.as_str());
            view! {
                <div class=class>
                    <span class="notice-message">{notice.message}</span>
                    <button class="notice-close" on:click=move |_| notices.update(|slot| slot.dismiss())>
                        "×"
                    </button>
                </div>
            }
        })}
    }
}
