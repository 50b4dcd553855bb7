use contracts::domain::DocumentSource;
use leptos::prelude::*;
use leptos::task::spawn_local;
use wasm_bindgen::JsCast;

use crate::api;
use crate::session::SessionContext;

/// Library view: pick or upload a PDF on the left, preview it on the right.
#[component]
pub fn HomePage() -> impl IntoView {
    let ctx = expect_context::<SessionContext>();
    let upload_error = RwSignal::new(None::<String>);
    let uploading = RwSignal::new(false);

    let handle_file = move |ev: web_sys::Event| {
        let input = ev
            .target()
            .and_then(|t| t.dyn_into::<web_sys::HtmlInputElement>().ok());
        let Some(file) = input.and_then(|i| i.files()).and_then(|files| files.get(0)) else {
            return;
        };

        // Only PDF files are accepted for upload.
        if !file.name().to_lowercase().ends_with(".pdf") {
            upload_error.set(Some("Only PDF files can be uploaded".to_string()));
            return;
        }

        upload_error.set(None);
        uploading.set(true);
        spawn_local(async move {
            match api::upload_pdf(file.clone()).await {
                Ok(uploaded) => {
                    // Keep a same-tab preview; the object URL dies with the tab.
                    let source = match web_sys::Url::create_object_url_with_blob(&file) {
                        Ok(url) => DocumentSource::Blob(url),
                        Err(_) => DocumentSource::NoPreview,
                    };
                    log::info!("Uploaded {}: {}", uploaded.filename, uploaded.message);
                    ctx.add_document(uploaded.filename, source, 0);
                }
                Err(err) => {
                    log::error!("PDF upload failed: {}", err);
                    upload_error.set(Some(err));
                }
            }
            uploading.set(false);
        });
    };

    view! {
        <div class="home-page">
            <section class="library-panel">
                <h2>"Your Library"</h2>
                <div class="library-list">
                    <For
                        each=move || ctx.state.with(|s| s.library.clone())
                        key=|doc| doc.id.clone()
                        children=move |doc| {
                            let doc_id = doc.id.clone();
                            let doc_for_click = doc.clone();
                            let is_selected = Memo::new(move |_| {
                                ctx.state.with(|s| s.selected_id.as_deref() == Some(doc_id.as_str()))
                            });
                            view! {
                                <button
                                    class=move || {
                                        if is_selected.get() {
                                            "library-item library-item-selected"
                                        } else {
                                            "library-item"
                                        }
                                    }
                                    on:click=move |_| ctx.select_document(doc_for_click.clone())
                                >
                                    <span class="library-item-name">{doc.name.clone()}</span>
                                </button>
                            }
                        }
                    />
                </div>

                <div class="upload-box">
                    <label for="pdf-upload">"Upload PDF"</label>
                    <input
                        id="pdf-upload"
                        type="file"
                        accept="application/pdf"
                        on:change=handle_file
                    />
                    {move || uploading.get().then(|| view! { <p class="upload-busy">"Uploading..."</p> })}
                    {move || {
                        upload_error
                            .get()
                            .map(|err| view! { <p class="upload-error">{err}</p> })
                    }}
                </div>
            </section>

            <section class="preview-panel">
                {move || match ctx.selected_document() {
                    Some(doc) => match doc.source.preview_url() {
                        Some(url) => view! {
                            <iframe class="pdf-frame" src=url.to_string() title=doc.name></iframe>
                        }
                        .into_any(),
                        None => view! {
                            <div class="preview-empty">
                                <p>{format!("No preview available for {}", doc.name)}</p>
                            </div>
                        }
                        .into_any(),
                    },
                    None => view! {
                        <div class="preview-empty">
                            <p>"Select a PDF from your library to get started"</p>
                        </div>
                    }
                    .into_any(),
                }}
            </section>
        </div>
    }
}
