use leptos::prelude::*;

use crate::layout::Shell;
use crate::session::SessionContext;

#[component]
pub fn App() -> impl IntoView {
    // One session store for the whole app, shared via context.
    provide_context(SessionContext::new());

    view! {
        <Shell />
    }
}
