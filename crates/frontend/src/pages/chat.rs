use contracts::domain::{Chat, Message, MessageRole};
use leptos::prelude::*;
use leptos::task::spawn_local;

use crate::api;
use crate::session::SessionContext;

/// Chat view: conversation list on the left, the active transcript with its
/// citations on the right.
#[component]
pub fn ChatPage() -> impl IntoView {
    let ctx = expect_context::<SessionContext>();
    let input = RwSignal::new(String::new());
    let waiting = RwSignal::new(false);

    let send = move || {
        let query = input.get_untracked().trim().to_string();
        if query.is_empty() || waiting.get_untracked() {
            return;
        }
        if ctx.state.with_untracked(|s| s.active_chat_id.is_none()) {
            return;
        }

        ctx.append_message(MessageRole::User, query.clone(), Vec::new());
        input.set(String::new());
        waiting.set(true);

        spawn_local(async move {
            match api::chat_with_citations(&query).await {
                Ok(answer) => {
                    ctx.append_message(MessageRole::Assistant, answer.answer, answer.citations);
                }
                Err(err) => {
                    log::error!("Chat request failed: {}", err);
                    // Rendered as an assistant message in the transcript.
                    ctx.append_message(
                        MessageRole::Assistant,
                        format!("Sorry, I couldn't process that request. {}", err),
                        Vec::new(),
                    );
                }
            }
            waiting.set(false);
        });
    };

    view! {
        <div class="chat-page">
            {move || {
                if ctx.selected_document().is_none() {
                    view! {
                        <div class="page-placeholder">
                            <p>"Select a PDF before starting a chat"</p>
                        </div>
                    }
                    .into_any()
                } else {
                    view! {
                        <div class="chat-layout">
                            <aside class="chat-list">
                                <button class="new-chat" on:click=move |_| ctx.create_chat()>
                                    "+ New Chat"
                                </button>
                                <For
                                    each=move || ctx.state.with(|s| s.chats.clone())
                                    key=|chat| chat.id.clone()
                                    children=move |chat: Chat| {
                                        let id = chat.id.clone();
                                        let id_for_class = chat.id.clone();
                                        let is_active = Memo::new(move |_| {
                                            ctx.state.with(|s| {
                                                s.active_chat_id.as_deref()
                                                    == Some(id_for_class.as_str())
                                            })
                                        });
                                        view! {
                                            <button
                                                class=move || {
                                                    if is_active.get() {
                                                        "chat-list-item chat-list-item-active"
                                                    } else {
                                                        "chat-list-item"
                                                    }
                                                }
                                                on:click=move |_| ctx.activate_chat(&id)
                                            >
                                                {chat.title.clone()}
                                            </button>
                                        }
                                    }
                                />
                            </aside>

                            <section class="chat-main">
                                {move || match ctx.state.with(|s| s.active_chat().cloned()) {
                                    Some(chat) => view! {
                                        <div class="chat-transcript">
                                            <h2>{chat.title.clone()}</h2>
                                            {chat
                                                .messages
                                                .iter()
                                                .map(|msg| message_view(msg))
                                                .collect_view()}
                                            {move || {
                                                waiting
                                                    .get()
                                                    .then(|| view! { <p class="chat-thinking">"Thinking..."</p> })
                                            }}
                                        </div>
                                    }
                                    .into_any(),
                                    None => view! {
                                        <div class="page-placeholder">
                                            <p>"Create a chat to ask questions about your PDF"</p>
                                        </div>
                                    }
                                    .into_any(),
                                }}

                                <div class="chat-input-row">
                                    <input
                                        type="text"
                                        placeholder="Ask a question about the PDF..."
                                        prop:value=move || input.get()
                                        on:input=move |ev| input.set(event_target_value(&ev))
                                        on:keydown=move |ev| {
                                            if ev.key() == "Enter" {
                                                send();
                                            }
                                        }
                                    />
                                    <button on:click=move |_| send() disabled=move || waiting.get()>
                                        "Send"
                                    </button>
                                </div>
                            </section>
                        </div>
                    }
                    .into_any()
                }
            }}
        </div>
    }
}

fn message_view(msg: &Message) -> impl IntoView {
    let role_class = match msg.role {
        MessageRole::User => "message message-user",
        MessageRole::Assistant => "message message-assistant",
    };
    let citations = msg.citations.clone();
    view! {
        <div class=role_class>
            <p class="message-content">{msg.content.clone()}</p>
            {(!citations.is_empty())
                .then(|| {
                    view! {
                        <div class="message-citations">
                            {citations
                                .into_iter()
                                .map(|c| {
                                    view! {
                                        <blockquote class="citation">
                                            <span class="citation-source">{c.source}</span>
                                            <p class="citation-text">{c.text}</p>
                                        </blockquote>
                                    }
                                })
                                .collect_view()}
                        </div>
                    }
                })}
        </div>
    }
}
