//! 履歴書ファイル選択コンポーネント
//!
//! クリックでファイルダイアログ、またはドラッグ&ドロップ。複数渡されても先頭の1件だけ使う。
//! accept属性の拡張子は参考表示で、選択内容は検証しない。

use leptos::prelude::*;
use web_sys::{DragEvent, File, FileList, HtmlInputElement};
use resume_analyzer_common::ACCEPT_EXTENSIONS;

#[component]
pub fn FilePicker<F>(on_file_selected: F) -> impl IntoView
where
    F: Fn(File) + 'static + Clone,
{
    let (is_dragover, set_is_dragover) = signal(false);
    let input_ref = NodeRef::<leptos::html::Input>::new();

    let on_change = {
        let on_file_selected = on_file_selected.clone();
        move |ev: web_sys::Event| {
            let input: HtmlInputElement = event_target(&ev);
            if let Some(file) = first_file(input.files()) {
                on_file_selected(file);
            }
            // 同じファイルを選び直しても change が発火するように
            input.set_value("");
        }
    };

    let on_drop = {
        let on_file_selected = on_file_selected.clone();
        move |ev: DragEvent| {
            ev.prevent_default();
            set_is_dragover.set(false);

            if let Some(file) = first_file(ev.data_transfer().and_then(|dt| dt.files())) {
                on_file_selected(file);
            }
        }
    };

    let on_dragover = move |ev: DragEvent| {
        ev.prevent_default();
        set_is_dragover.set(true);
    };

    let on_dragleave = move |_: DragEvent| {
        set_is_dragover.set(false);
    };

    let on_click = move |_| {
        if let Some(input) = input_ref.get() {
            input.click();
        }
    };

    view! {
        <input
            type="file"
            id="resume-upload"
            accept=ACCEPT_EXTENSIONS
            style="display: none"
            node_ref=input_ref
            on:change=on_change
        />
        <div
            class=move || {
                let mut classes = vec!["upload-area"];
                if is_dragover.get() {
                    classes.push("dragover");
                }
                classes.join(" ")
            }
            on:drop=on_drop
            on:dragover=on_dragover
            on:dragleave=on_dragleave
            on:click=on_click
        >
            <div class="upload-icon">"📄"</div>
            <p>"Select Resume (PDF, DOCX, or TXT)"</p>
            <p class="text-muted">"Click to choose a file or drag it here"</p>
        </div>
    }
}

fn first_file(files: Option<FileList>) -> Option<File> {
    files.and_then(|files| files.get(0))
}
