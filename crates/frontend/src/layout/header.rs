use leptos::prelude::*;

use crate::session::SessionContext;

/// Top bar: sidebar toggle plus the current selection so every view shows
/// which document quiz/chat features will run against.
#[component]
pub fn Header() -> impl IntoView {
    let ctx = expect_context::<SessionContext>();

    view! {
        <header class="app-header">
            <button class="sidebar-toggle" on:click=move |_| ctx.toggle_sidebar()>
                "☰"
            </button>
            <div class="header-selection">
                {move || match ctx.selected_document() {
                    Some(doc) => view! {
                        <span class="selected-pdf">{doc.name}</span>
                    }
                    .into_any(),
                    None => view! {
                        <span class="selected-pdf-none">"No PDF selected"</span>
                    }
                    .into_any(),
                }}
                {move || {
                    ctx.pdf_loading
                        .get()
                        .then(|| view! { <span class="pdf-loading">"Syncing..."</span> })
                }}
            </div>
        </header>
    }
}
