//! 履歴書アップロード・解析ページ
//!
//! 状態は `AnalyzerModel` が持ち、このコンポーネントはイベントをモデルへ渡すだけ。
//! 送信中のリクエストは AbortController で取消でき、ページ破棄時にも中断する。

use gloo::console;
use leptos::prelude::*;
use leptos::task::spawn_local;
use web_sys::{AbortController, File, SubmitEvent};
use resume_analyzer_common::{
    has_suggested_extension, AnalyzerModel, SelectedFile, ServiceConfig, SubmitError, Ticket,
};

use crate::api::service::{analyze, describe_js_error};
use crate::app::Page;
use crate::components::{
    busy_indicator::BusyIndicator,
    file_picker::FilePicker,
    result_view::ResultView,
};

type Model = AnalyzerModel<File>;

#[component]
pub fn AnalyzerPage() -> impl IntoView {
    let config = expect_context::<ServiceConfig>();
    let model = RwSignal::new_local(Model::new());
    let in_flight = StoredValue::new_local(None::<(Ticket, AbortController)>);

    // ページ破棄後の決着は反映しない
    on_cleanup(move || {
        let _ = model.try_update_untracked(|m| m.teardown());
        let _ = in_flight.try_update_value(|slot| {
            if let Some((_, controller)) = slot.take() {
                controller.abort();
            }
        });
    });

    let on_file_selected = move |file: File| {
        let name = file.name();
        if !has_suggested_extension(&name) {
            console::warn!(format!("selected file has an unexpected extension: {}", name));
        }
        model.update(|m| m.select_file(SelectedFile::new(name, file)));
    };

    let on_submit = move |ev: SubmitEvent| {
        ev.prevent_default();

        let (ticket, selected) = match model.try_update(|m| m.begin_submit()) {
            Some(Ok(begun)) => begun,
            Some(Err(e)) => {
                console::debug!(format!("submission not started: {}", e));
                return;
            }
            None => return,
        };

        let controller = match AbortController::new() {
            Ok(controller) => controller,
            Err(e) => {
                let error = SubmitError::Network(describe_js_error(&e));
                model.update(|m| {
                    m.settle(ticket, Err(error));
                });
                return;
            }
        };
        in_flight.set_value(Some((ticket, controller.clone())));

        let config = config.clone();
        spawn_local(async move {
            let outcome = analyze(&config, &selected.handle, &controller).await;
            if let Err(e) = &outcome {
                console::warn!(format!("analysis of {} failed: {}", selected.name, e));
            }

            let applied = model.try_update(|m| m.settle(ticket, outcome)).unwrap_or(false);
            if !applied {
                console::debug!(format!("discarded stale result for submission {}", ticket.id()));
            }

            let _ = in_flight.try_update_value(|slot| {
                if matches!(slot, Some((current, _)) if *current == ticket) {
                    *slot = None;
                }
            });
        });
    };

    let on_cancel = move || {
        if model.try_update(|m| m.cancel()).flatten().is_some() {
            in_flight.update_value(|slot| {
                if let Some((_, controller)) = slot.take() {
                    controller.abort();
                }
            });
        }
    };

    let is_submitting = move || model.with(|m| m.is_submitting());
    let selected_name = move || model.with(|m| m.selected().map(|f| f.name.clone()));
    let error_message = move || model.with(|m| m.state().error_message().map(str::to_string));

    view! {
        <section class="analyzer">
            <a class="btn btn-secondary" href=Page::Home.href()>"Return Home"</a>

            <h2>"Resume Analyzer"</h2>

            <form class="analyze-form" on:submit=on_submit>
                <FilePicker on_file_selected=on_file_selected />

                {move || selected_name().map(|name| {
                    let unexpected = !has_suggested_extension(&name);
                    view! {
                        <p class="selected-file">"Selected file: " {name}</p>
                        <Show when=move || unexpected>
                            <p class="text-muted">
                                "This is not a PDF, DOCX or TXT file. The service may reject it."
                            </p>
                        </Show>
                    }
                })}

                <AnalyzeActions
                    can_submit=Signal::derive(move || model.with(|m| m.can_submit()))
                    is_submitting=Signal::derive(is_submitting)
                    on_cancel=on_cancel
                />
            </form>

            <Show when=is_submitting>
                <BusyIndicator label="Analyzing your resume..." />
            </Show>

            {move || error_message().map(|message| view! {
                <div class="alert alert-error" role="alert">{message}</div>
            })}

            {move || model
                .with(|m| m.state().result().cloned())
                .map(|result| view! { <ResultView result=result /> })}
        </section>
    }
}

/// 送信ボタンと取消ボタン。送信中は送信ボタンを無効にする
#[component]
pub fn AnalyzeActions<C>(
    #[prop(into)] can_submit: Signal<bool>,
    #[prop(into)] is_submitting: Signal<bool>,
    on_cancel: C,
) -> impl IntoView
where
    C: Fn() + Clone + Send + Sync + 'static,
{
    view! {
        <div class="analyze-actions">
            <button
                type="submit"
                class="btn btn-primary"
                disabled=move || !can_submit.get()
            >
                {move || if is_submitting.get() { "Analyzing..." } else { "Analyze Resume" }}
            </button>

            <Show when=move || is_submitting.get()>
                {
                    let on_cancel = on_cancel.clone();
                    view! {
                        <button type="button" class="btn btn-tertiary" on:click=move |_| on_cancel()>
                            "Cancel"
                        </button>
                    }
                }
            </Show>
        </div>
    }
}

#[cfg(all(target_arch = "wasm32", test))]
mod wasm_tests {
    use super::*;
    use leptos::mount::mount_to;
    use wasm_bindgen::JsCast;
    use wasm_bindgen_test::*;
    use web_sys::{Element, HtmlElement};

    wasm_bindgen_test_configure!(run_in_browser);

    fn container() -> HtmlElement {
        let document = web_sys::window().unwrap().document().unwrap();
        let div: HtmlElement = document.create_element("div").unwrap().dyn_into().unwrap();
        document.body().unwrap().append_child(&div).unwrap();
        div
    }

    fn submit_button(parent: &HtmlElement) -> Element {
        parent.query_selector("button[type=submit]").unwrap().unwrap()
    }

    fn mount_actions(model: RwSignal<AnalyzerModel<u32>, LocalStorage>) -> HtmlElement {
        let parent = container();
        let handle = mount_to(parent.clone(), move || {
            view! {
                <AnalyzeActions
                    can_submit=Signal::derive(move || model.with(|m| m.can_submit()))
                    is_submitting=Signal::derive(move || model.with(|m| m.is_submitting()))
                    on_cancel=move || {
                        model.update(|m| {
                            m.cancel();
                        });
                    }
                />
            }
        });
        // テスト中はマウントしたままにする
        std::mem::forget(handle);
        parent
    }

    #[wasm_bindgen_test]
    fn submit_disabled_without_file() {
        let model = RwSignal::new_local(AnalyzerModel::<u32>::new());
        let parent = mount_actions(model);

        let button = submit_button(&parent);
        assert!(button.has_attribute("disabled"));
        assert_eq!(button.text_content().as_deref(), Some("Analyze Resume"));
        assert!(parent.query_selector("button[type=button]").unwrap().is_none());
    }

    #[wasm_bindgen_test]
    async fn submit_disabled_while_submitting() {
        let model = RwSignal::new_local(AnalyzerModel::<u32>::new());
        model.update(|m| m.select_file(SelectedFile::new("resume.pdf", 1)));
        let parent = mount_actions(model);
        assert!(!submit_button(&parent).has_attribute("disabled"));

        let begun = model.try_update(|m| m.begin_submit()).unwrap();
        assert!(begun.is_ok());
        leptos::task::tick().await;

        let button = submit_button(&parent);
        assert!(button.has_attribute("disabled"));
        assert_eq!(button.text_content().as_deref(), Some("Analyzing..."));

        let cancel: HtmlElement = parent
            .query_selector("button[type=button]")
            .unwrap()
            .unwrap()
            .dyn_into()
            .unwrap();
        cancel.click();
        leptos::task::tick().await;

        assert!(model.with_untracked(|m| !m.is_submitting()));
        assert!(!submit_button(&parent).has_attribute("disabled"));
    }
}
