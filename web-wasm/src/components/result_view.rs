//! 解析結果表示コンポーネント

use leptos::prelude::*;
use resume_analyzer_common::{render_result, AnalysisResult, RenderedResult, SectionBlock};

#[component]
pub fn ResultView(result: AnalysisResult) -> impl IntoView {
    match render_result(&result) {
        RenderedResult::Sections(blocks) if blocks.is_empty() => view! {
            <p class="text-muted">"The analysis did not return any sections."</p>
        }
        .into_any(),
        RenderedResult::Sections(blocks) => view! {
            <div class="analysis-sections">
                {blocks
                    .into_iter()
                    .map(|block| view! { <SectionCard block=block /> })
                    .collect_view()}
            </div>
        }
        .into_any(),
        RenderedResult::Preformatted(text) => view! {
            <pre class="analysis-text">{text}</pre>
        }
        .into_any(),
    }
}

#[component]
fn SectionCard(block: SectionBlock) -> impl IntoView {
    view! {
        <div class="section-card" data-section=block.key>
            <h3>{block.heading}</h3>
            <p class="section-score">{block.score_label}</p>

            <h4>"Strengths:"</h4>
            <p>{block.strengths}</p>

            <h4>"Areas for Improvement:"</h4>
            <p>{block.improvements}</p>

            <h4>"Recommendations:"</h4>
            <p>{block.recommendations}</p>
        </div>
    }
}
