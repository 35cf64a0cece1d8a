//! ヘッダーコンポーネント

use leptos::prelude::*;
use crate::app::Page;

#[component]
pub fn Header() -> impl IntoView {
    view! {
        <header class="header">
            <h1><a href=Page::Home.href()>"RateMyResume"</a></h1>
        </header>
    }
}
