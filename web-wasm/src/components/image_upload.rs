//! 画像取得コンポーネント（カメラ / ファイル選択）

use leptos::html::Input;
use leptos::prelude::*;
use nutrivision_common::{
    check_content_type, DataUrl, Error, ImageAcquisition, ImageSource, Notice, ACCEPT_IMAGES,
};
use wasm_bindgen::prelude::*;
use web_sys::{File, FileReader, HtmlInputElement};

#[component]
pub fn ImageUpload<F, N>(
    is_analyzing: Signal<bool>,
    on_image_selected: F,
    on_notice: N,
) -> impl IntoView
where
    F: Fn(DataUrl) + 'static + Clone + Send + Sync,
    N: Fn(Notice) + 'static + Clone + Send + Sync,
{
    let acquisition = RwSignal::new(ImageAcquisition::new());
    let file_input: NodeRef<Input> = NodeRef::new();

    // カメラとアップロードは同じinputを開く。captureの有無だけが違う
    let open_picker = move |source: ImageSource| {
        let Some(input) = file_input.get() else {
            return;
        };
        let applied = match source.capture_hint() {
            Some(hint) => input.set_attribute("capture", hint),
            None => input.remove_attribute("capture"),
        };
        if let Err(err) = applied {
            gloo::console::warn!(format!("capture attribute: {:?}", err));
        }
        input.click();
    };

    let on_change = {
        let on_image_selected = on_image_selected.clone();
        let on_notice = on_notice.clone();
        move |ev: web_sys::Event| {
            let Some(input) = ev
                .target()
                .and_then(|target| target.dyn_into::<HtmlInputElement>().ok())
            else {
                return;
            };
            let Some(file) = input.files().and_then(|files| files.get(0)) else {
                return;
            };

            let content_type = file.type_();
            // 同じファイルを選び直しても change が発火するように値を消す
            input.set_value("");
            if let Err(err) = check_content_type(&content_type) {
                gloo::console::warn!(format!("rejected {}: {}", file.name(), err));
                on_notice(Notice::from_error(&err));
                return;
            }

            let on_image_selected = on_image_selected.clone();
            let on_notice = on_notice.clone();
            read_as_data_url(file, move |loaded| {
                let Some(data_url) = loaded else {
                    on_notice(Notice::from_error(&Error::Unexpected(
                        "file could not be read".into(),
                    )));
                    return;
                };
                let analyzing = is_analyzing.get_untracked();
                match acquisition.try_update(|a| a.accept_data_url(&content_type, &data_url, analyzing)) {
                    Some(Ok(image)) => on_image_selected(image),
                    Some(Err(err)) => on_notice(Notice::from_error(&err)),
                    None => {}
                }
            });
        }
    };

    let choose_different = move || {
        if let Some(Err(err)) = acquisition.try_update(|a| a.reset(is_analyzing.get_untracked())) {
            gloo::console::warn!(format!("reset ignored: {}", err));
        }
    };

    view! {
        <div class="image-upload">
            {move || match acquisition.with(|a| a.preview().map(|url| url.to_string())) {
                None => view! {
                    <div class="upload-card">
                        <div class="upload-icon">"📷"</div>
                        <h2>"Capture or Upload Food"</h2>
                        <p class="text-muted">
                            "Take a photo or upload an image to analyze nutritional content"
                        </p>
                        <div class="upload-actions">
                            <button
                                class="btn btn-primary"
                                on:click=move |_| open_picker(ImageSource::Camera)
                            >
                                "Camera"
                            </button>
                            <button
                                class="btn btn-secondary"
                                on:click=move |_| open_picker(ImageSource::FilePicker)
                            >
                                "Upload"
                            </button>
                        </div>
                    </div>
                }
                .into_any(),
                Some(src) => view! {
                    <div class="preview">
                        <div class="preview-frame">
                            <img src=src alt="Food preview" />
                            <Show when=move || is_analyzing.get()>
                                <div class="analyzing-overlay">
                                    <div class="spinner"></div>
                                    <p>"Analyzing food..."</p>
                                </div>
                            </Show>
                        </div>
                        <button
                            class="btn btn-secondary btn-block"
                            disabled=move || is_analyzing.get()
                            on:click=move |_| choose_different()
                        >
                            "Choose Different Image"
                        </button>
                    </div>
                }
                .into_any(),
            }}
            <input
                node_ref=file_input
                type="file"
                accept=ACCEPT_IMAGES
                class="hidden"
                on:change=on_change
            />
        </div>
    }
}

/// FileReaderでdata URLに変換する。読み込めなければ `None`
fn read_as_data_url<F>(file: File, on_loaded: F)
where
    F: Fn(Option<String>) + 'static,
{
    let reader = match FileReader::new() {
        Ok(reader) => reader,
        Err(err) => {
            gloo::console::error!(format!("FileReader: {:?}", err));
            on_loaded(None);
            return;
        }
    };

    let reader_clone = reader.clone();
    let closure = Closure::wrap(Box::new(move |_: web_sys::ProgressEvent| {
        let data_url = reader_clone.result().ok().and_then(|result| result.as_string());
        on_loaded(data_url);
    }) as Box<dyn FnMut(_)>);

    reader.set_onloadend(Some(closure.as_ref().unchecked_ref()));
    closure.forget();

    if let Err(err) = reader.read_as_data_url(&file) {
        gloo::console::error!(format!("read_as_data_url: {:?}", err));
    }
}
