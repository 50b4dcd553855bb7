//! Leptos context wrapper around [`SessionState`].
//!
//! Owns the write-through persistence discipline: every collection mutation
//! re-serializes that collection to its session-storage key before control
//! returns to the caller. Transient flags (loading, sidebar, current view)
//! are never persisted.

use contracts::domain::{Citation, Document, DocumentSource, MessageRole, QuizAttempt};
use leptos::prelude::*;
use leptos::task::spawn_local;

use crate::api;
use crate::session::state::{seed_library, SelectAction, SessionState};
use crate::session::storage;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum View {
    Home,
    Quiz,
    Chat,
    Dashboard,
    Videos,
}

#[derive(Clone, Copy)]
pub struct SessionContext {
    pub state: RwSignal<SessionState>,
    /// True while a selection change awaits backend activation.
    pub pdf_loading: RwSignal<bool>,
    pub sidebar_open: RwSignal<bool>,
    pub current_view: RwSignal<View>,
}

impl SessionContext {
    /// Restore from session storage, seed an empty library, and repair the
    /// selection so it always references a library entry (or nothing).
    pub fn new() -> Self {
        let mut state = SessionState {
            library: storage::load(storage::LIBRARY_KEY),
            chats: storage::load(storage::CHATS_KEY),
            quiz_attempts: storage::load(storage::ATTEMPTS_KEY),
            ..SessionState::default()
        };

        if state.library.is_empty() {
            state.library = seed_library();
            storage::save(storage::LIBRARY_KEY, &state.library);
        }

        let persisted: Option<String> = storage::load_opt(storage::SELECTION_KEY);
        state.resolve_selection(persisted);
        persist_selection(&state);

        log::info!(
            "Session restored: {} documents, {} chats, {} quiz attempts",
            state.library.len(),
            state.chats.len(),
            state.quiz_attempts.len()
        );

        Self {
            state: RwSignal::new(state),
            pdf_loading: RwSignal::new(false),
            sidebar_open: RwSignal::new(true),
            current_view: RwSignal::new(View::Home),
        }
    }

    pub fn selected_document(&self) -> Option<Document> {
        self.state.with(|s| s.selected().cloned())
    }

    /// Add an uploaded or locally picked document to the library.
    pub fn add_document(&self, name: String, source: DocumentSource, page_count: u32) {
        self.state.update(|s| {
            s.add_document(name, source, page_count);
            storage::save(storage::LIBRARY_KEY, &s.library);
        });
    }

    /// Change the selection and activate the document on the backend.
    ///
    /// The selection is set optimistically; on activation failure it is
    /// cleared (fail closed), never restored to the previous value. A second
    /// call while one is in flight is not cancelled; the last write wins on
    /// both the selection and the loading flag.
    pub fn select_document(&self, document: Document) {
        let action = self
            .state
            .try_update(|s| s.begin_select(&document))
            .unwrap_or(SelectAction::Ignore);
        let SelectAction::Activate(document) = action else {
            return;
        };

        self.state.with_untracked(persist_selection);
        self.pdf_loading.set(true);
        log::debug!("Selecting PDF: {}", document.name);

        let ctx = *self;
        spawn_local(async move {
            let ok = match api::select_pdf(&document.name).await {
                Ok(()) => {
                    log::debug!("Synced with backend: {}", document.name);
                    true
                }
                Err(err) => {
                    log::error!("Failed to sync PDF with backend: {}", err);
                    false
                }
            };
            ctx.state.update(|s| {
                s.apply_activation(ok);
                persist_selection(s);
            });
            ctx.pdf_loading.set(false);
        });
    }

    pub fn activate_chat(&self, id: &str) {
        self.state.update(|s| {
            s.activate_chat(id);
        });
    }

    pub fn create_chat(&self) {
        self.state.update(|s| {
            s.create_chat();
            storage::save(storage::CHATS_KEY, &s.chats);
        });
    }

    /// Append a message to the active chat. Silently does nothing without
    /// one, matching the store's no-throw contract.
    pub fn append_message(&self, role: MessageRole, content: String, citations: Vec<Citation>) {
        self.state.update(|s| {
            if s.append_message(role, content, citations) {
                storage::save(storage::CHATS_KEY, &s.chats);
            }
        });
    }

    pub fn record_attempt(&self, attempt: QuizAttempt) {
        self.state.update(|s| {
            s.record_attempt(attempt);
            storage::save(storage::ATTEMPTS_KEY, &s.quiz_attempts);
        });
    }

    pub fn set_view(&self, view: View) {
        self.current_view.set(view);
    }

    pub fn toggle_sidebar(&self) {
        self.sidebar_open.update(|open| *open = !*open);
    }
}

impl Default for SessionContext {
    fn default() -> Self {
        Self::new()
    }
}

/// Selection persists as the bare id; an empty selection removes the key
/// instead of storing a null marker.
fn persist_selection(state: &SessionState) {
    match &state.selected_id {
        Some(id) => storage::save(storage::SELECTION_KEY, id),
        None => storage::remove(storage::SELECTION_KEY),
    }
}
