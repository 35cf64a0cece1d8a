//! メインアプリケーションコンポーネント
//!
//! ページはURLハッシュで切り替える（`#/` 一覧、`#/analyze` 解析）。

use leptos::prelude::*;
use crate::components::{
    header::Header,
    resume_list::ResumeList,
    analyzer_page::AnalyzerPage,
};
use crate::config::load_service_config;

/// 表示ページ
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Page {
    Home,
    Analyze,
}

impl Page {
    /// `location.hash` からページを決める。不明なハッシュは一覧
    pub fn from_hash(hash: &str) -> Self {
        match hash.trim_start_matches('#').trim_matches('/') {
            "analyze" => Page::Analyze,
            _ => Page::Home,
        }
    }

    pub fn href(&self) -> &'static str {
        match self {
            Page::Home => "#/",
            Page::Analyze => "#/analyze",
        }
    }
}

fn current_page() -> Page {
    web_sys::window()
        .and_then(|window| window.location().hash().ok())
        .map(|hash| Page::from_hash(&hash))
        .unwrap_or(Page::Home)
}

/// メインアプリケーションコンポーネント
#[component]
pub fn App() -> impl IntoView {
    provide_context(load_service_config());

    let (page, set_page) = signal(current_page());
    let _ = window_event_listener(leptos::ev::hashchange, move |_| {
        set_page.set(current_page());
    });

    view! {
        <div class="container">
            <Header />

            {move || match page.get() {
                Page::Home => view! { <ResumeList /> }.into_any(),
                Page::Analyze => view! { <AnalyzerPage /> }.into_any(),
            }}
        </div>
    }
}
