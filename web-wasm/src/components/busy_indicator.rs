//! 送信中インジケータ

use leptos::prelude::*;

#[component]
pub fn BusyIndicator(#[prop(into)] label: String) -> impl IntoView {
    view! {
        <div class="progress-container" role="status" aria-live="polite">
            <div class="spinner" />
            <p class="progress-text">{label}</p>
        </div>
    }
}
