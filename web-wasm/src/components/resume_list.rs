//! 保存済み履歴書一覧ページ
//!
//! 表示時に1回だけ一覧を取得する。失敗はコンソールに出すだけで画面には出さない。

use gloo::console;
use leptos::prelude::*;
use leptos::task::spawn_local;
use resume_analyzer_common::{
    listing_entries, ListingEntry, ResumeListing, ServiceConfig, EMPTY_LISTING_MESSAGE,
};

use crate::api::service::fetch_listing;
use crate::app::Page;

/// 取得結果を一覧に反映する。画面破棄後なら何もせず false
pub(crate) fn apply_listing(
    entries: WriteSignal<Vec<ListingEntry>>,
    is_loading: WriteSignal<bool>,
    outcome: Result<ResumeListing, String>,
    config: &ServiceConfig,
) -> bool {
    let applied = match outcome {
        Ok(listing) => entries.try_set(listing_entries(&listing, config)).is_none(),
        Err(e) => {
            console::error!(format!("Failed to fetch resumes: {}", e));
            true
        }
    };
    is_loading.try_set(false).is_none() && applied
}

#[component]
pub fn ResumeList() -> impl IntoView {
    let config = expect_context::<ServiceConfig>();
    let (entries, set_entries) = signal(Vec::<ListingEntry>::new());
    let (is_loading, set_is_loading) = signal(true);

    spawn_local(async move {
        let outcome = fetch_listing(&config).await;
        if !apply_listing(set_entries, set_is_loading, outcome, &config) {
            console::debug!("resume listing arrived after the page was closed");
        }
    });

    view! {
        <section class="resume-list">
            <h2>"Welcome to RateMyResume"</h2>

            <ListingView entries=entries is_loading=is_loading />

            <div class="actions">
                <a class="btn btn-primary" href=Page::Analyze.href()>
                    "Upload and Analyze a Resume"
                </a>
            </div>
        </section>
    }
}

/// 一覧本体。空なら読み込み中か空メッセージ
#[component]
pub fn ListingView(
    entries: ReadSignal<Vec<ListingEntry>>,
    is_loading: ReadSignal<bool>,
) -> impl IntoView {
    view! {
        <Show
            when=move || !entries.with(|e| e.is_empty())
            fallback=move || view! {
                <p class="text-muted">
                    {move || if is_loading.get() { "Loading..." } else { EMPTY_LISTING_MESSAGE }}
                </p>
            }
        >
            <ul class="file-list">
                <For
                    each=move || entries.get().into_iter().enumerate()
                    key=|(i, entry)| (*i, entry.name.clone())
                    children=|(_, entry)| {
                        view! {
                            <li class="file-item">
                                <span class="file-name">{entry.name.clone()}</span>
                                <a
                                    class="btn btn-small btn-secondary"
                                    href=entry.download_url.clone()
                                    target="_blank"
                                    rel="noreferrer"
                                >
                                    "Download"
                                </a>
                            </li>
                        }
                    }
                />
            </ul>
        </Show>
    }
}


#[cfg(all(target_arch = "wasm32", test))]
mod wasm_tests {
    use super::*;
    use leptos::mount::mount_to;
    use wasm_bindgen::JsCast;
    use wasm_bindgen_test::*;
    use web_sys::HtmlElement;

    wasm_bindgen_test_configure!(run_in_browser);

    fn container() -> HtmlElement {
        let document = web_sys::window().unwrap().document().unwrap();
        let div: HtmlElement = document.create_element("div").unwrap().dyn_into().unwrap();
        document.body().unwrap().append_child(&div).unwrap();
        div
    }

    fn config() -> ServiceConfig {
        ServiceConfig::new("http://localhost:5000").unwrap()
    }

    #[wasm_bindgen_test]
    fn renders_entries_in_order_with_download_links() {
        let listing = ResumeListing { files: vec!["a.pdf".into(), "b.txt".into()] };
        let (entries, _) = signal(listing_entries(&listing, &config()));
        let (is_loading, _) = signal(false);

        let parent = container();
        let _handle = mount_to(parent.clone(), move || {
            view! { <ListingView entries=entries is_loading=is_loading /> }
        });

        let items = parent.query_selector_all(".file-item").unwrap();
        assert_eq!(items.length(), 2);

        let names = parent.query_selector_all(".file-name").unwrap();
        assert_eq!(names.item(0).unwrap().text_content().as_deref(), Some("a.pdf"));
        assert_eq!(names.item(1).unwrap().text_content().as_deref(), Some("b.txt"));

        let links = parent.query_selector_all(".file-item a").unwrap();
        let first: web_sys::Element = links.item(0).unwrap().dyn_into().unwrap();
        let second: web_sys::Element = links.item(1).unwrap().dyn_into().unwrap();
        assert_eq!(
            first.get_attribute("href").as_deref(),
            Some("http://localhost:5000/api/download/a.pdf")
        );
        assert_eq!(
            second.get_attribute("href").as_deref(),
            Some("http://localhost:5000/api/download/b.txt")
        );
    }

    #[wasm_bindgen_test]
    async fn empty_listing_replaces_loading_text() {
        let (entries, set_entries) = signal(Vec::<ListingEntry>::new());
        let (is_loading, set_is_loading) = signal(true);

        let parent = container();
        let _handle = mount_to(parent.clone(), move || {
            view! { <ListingView entries=entries is_loading=is_loading /> }
        });
        assert_eq!(parent.text_content().as_deref(), Some("Loading..."));

        assert!(apply_listing(set_entries, set_is_loading, Ok(ResumeListing::default()), &config()));
        leptos::task::tick().await;

        assert_eq!(parent.text_content().as_deref(), Some(EMPTY_LISTING_MESSAGE));
        assert!(parent.query_selector(".file-item").unwrap().is_none());
    }
}
