pub mod footer;
pub mod header;
pub mod sidebar;

use leptos::prelude::*;

use crate::pages::{ChatPage, DashboardPage, HomePage, QuizPage, VideosPage};
use crate::session::{SessionContext, View};

/// Application shell: sidebar navigation on the left, header plus the active
/// view in the main column.
///
/// ```text
/// +---------+--------------------------+
/// |         |         Header           |
/// | Sidebar +--------------------------+
/// |         |       active view        |
/// +---------+--------------------------+
/// |              Footer                |
/// +------------------------------------+
/// ```
#[component]
pub fn Shell() -> impl IntoView {
    let ctx = expect_context::<SessionContext>();

    view! {
        <div class="app-layout">
            <sidebar::Sidebar />
            <div class="app-main">
                <header::Header />
                <main class="app-content">
                    {move || match ctx.current_view.get() {
                        View::Home => view! { <HomePage /> }.into_any(),
                        View::Quiz => view! { <QuizPage /> }.into_any(),
                        View::Chat => view! { <ChatPage /> }.into_any(),
                        View::Dashboard => view! { <DashboardPage /> }.into_any(),
                        View::Videos => view! { <VideosPage /> }.into_any(),
                    }}
                </main>
                <footer::Footer />
            </div>
        </div>
    }
}
