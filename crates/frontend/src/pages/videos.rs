use contracts::analytics::topic_label;
use contracts::api::VideoRecommendation;
use leptos::prelude::*;
use leptos::task::spawn_local;

use crate::api;
use crate::session::SessionContext;

/// Video view: turns the topics the user has been quizzed on into YouTube
/// search recommendations.
#[component]
pub fn VideosPage() -> impl IntoView {
    let ctx = expect_context::<SessionContext>();
    let recommendations = RwSignal::new(Vec::<VideoRecommendation>::new());
    let loading = RwSignal::new(false);
    let error = RwSignal::new(None::<String>);

    // Distinct topic labels from the attempt history, in first-seen order.
    let topics = Memo::new(move |_| {
        ctx.state.with(|s| {
            let mut labels: Vec<String> = Vec::new();
            for attempt in &s.quiz_attempts {
                let label = topic_label(&attempt.document_name);
                if !labels.contains(&label) {
                    labels.push(label);
                }
            }
            labels
        })
    });

    let fetch = move |_| {
        let joined = topics.get_untracked().join(",");
        if joined.is_empty() {
            error.set(Some("Take a quiz first so we know your topics".to_string()));
            return;
        }
        loading.set(true);
        error.set(None);
        spawn_local(async move {
            match api::youtube_recommendations(&joined).await {
                Ok(recs) => recommendations.set(recs),
                Err(err) => {
                    log::error!("YouTube recommendations failed: {}", err);
                    error.set(Some(format!("Failed to fetch recommendations: {}", err)));
                }
            }
            loading.set(false);
        });
    };

    view! {
        <div class="videos-page">
            <div class="videos-toolbar">
                <h2>"Video Recommendations"</h2>
                <button on:click=fetch disabled=move || loading.get()>
                    {move || if loading.get() { "Searching..." } else { "Find Videos" }}
                </button>
            </div>

            <p class="videos-topics">
                {move || {
                    let t = topics.get();
                    if t.is_empty() {
                        "No quiz topics yet".to_string()
                    } else {
                        format!("Topics: {}", t.join(", "))
                    }
                }}
            </p>

            {move || {
                error.get().map(|err| view! { <p class="alert alert-error">{err}</p> })
            }}

            <div class="video-list">
                <For
                    each=move || recommendations.get()
                    key=|rec| rec.search_url.clone()
                    children=move |rec| {
                        view! {
                            <div class="video-row">
                                <span class="video-topic">{rec.topic}</span>
                                <span class="video-query">{rec.suggested_query}</span>
                                <a href=rec.search_url target="_blank" rel="noopener">
                                    "Search on YouTube"
                                </a>
                            </div>
                        }
                    }
                />
            </div>
        </div>
    }
}
