use leptos::prelude::*;

use crate::session::{SessionContext, View};

const MENU: [(View, &str); 5] = [
    (View::Home, "Home"),
    (View::Quiz, "Quiz"),
    (View::Chat, "Chat"),
    (View::Dashboard, "Progress"),
    (View::Videos, "Videos"),
];

#[component]
pub fn Sidebar() -> impl IntoView {
    let ctx = expect_context::<SessionContext>();

    view! {
        <aside class=move || {
            if ctx.sidebar_open.get() { "sidebar sidebar-open" } else { "sidebar sidebar-closed" }
        }>
            <div class="sidebar-brand">
                <h1>"StudyBuddy"</h1>
                <button class="sidebar-close" on:click=move |_| ctx.toggle_sidebar()>
                    "×"
                </button>
            </div>
            <nav class="sidebar-nav">
                {MENU
                    .into_iter()
                    .map(|(view, label)| {
                        view! {
                            <button
                                class=move || {
                                    if ctx.current_view.get() == view {
                                        "nav-item nav-item-active"
                                    } else {
                                        "nav-item"
                                    }
                                }
                                on:click=move |_| ctx.set_view(view)
                            >
                                {label}
                            </button>
                        }
                    })
                    .collect_view()}
            </nav>
        </aside>
    }
}
