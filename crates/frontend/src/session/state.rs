//! The session aggregate and its invariant-bearing transitions.
//!
//! `SessionState` is plain data so every transition can be unit tested on the
//! host. Signal wiring, persistence, and the async backend call live in
//! [`super::context`].

use contracts::domain::{
    derive_chat_title, Chat, Citation, Document, DocumentSource, Message, MessageRole, QuizAttempt,
};
use chrono::{TimeZone, Utc};

#[derive(Debug, Clone, Default, PartialEq)]
pub struct SessionState {
    /// Insertion order is display order. Only ever grows.
    pub library: Vec<Document>,
    /// Id of the selected document. Must reference a library entry.
    pub selected_id: Option<String>,
    pub chats: Vec<Chat>,
    pub active_chat_id: Option<String>,
    pub quiz_attempts: Vec<QuizAttempt>,
}

/// What a selection request requires of the caller.
#[derive(Debug, Clone, PartialEq)]
pub enum SelectAction {
    /// Same document or nothing to do; no backend call, no state change.
    Ignore,
    /// Selection was set optimistically; the caller must activate this
    /// document on the backend and report back via `apply_activation`.
    Activate(Document),
}

impl SessionState {
    pub fn selected(&self) -> Option<&Document> {
        let id = self.selected_id.as_deref()?;
        self.library.iter().find(|d| d.id == id)
    }

    pub fn active_chat(&self) -> Option<&Chat> {
        let id = self.active_chat_id.as_deref()?;
        self.chats.iter().find(|c| c.id == id)
    }

    /// Append a new document with a fresh id. Selection is untouched.
    /// Returns the new document's id.
    pub fn add_document(
        &mut self,
        name: impl Into<String>,
        source: DocumentSource,
        page_count: u32,
    ) -> String {
        let document = Document::new(name, source, page_count);
        let id = document.id.clone();
        self.library.push(document);
        id
    }

    /// Repair the selection after restore: a persisted id that still exists
    /// wins, otherwise the first library entry, otherwise nothing.
    pub fn resolve_selection(&mut self, persisted: Option<String>) {
        self.selected_id = persisted
            .filter(|id| self.library.iter().any(|d| &d.id == id))
            .or_else(|| self.library.first().map(|d| d.id.clone()));
    }

    /// Start a selection change. Sets the selection optimistically so
    /// dependent views render the new choice before the backend confirms.
    pub fn begin_select(&mut self, document: &Document) -> SelectAction {
        if self.selected_id.as_deref() == Some(document.id.as_str()) {
            return SelectAction::Ignore;
        }
        self.selected_id = Some(document.id.clone());
        SelectAction::Activate(document.clone())
    }

    /// Settle a selection change. Failure clears the selection entirely
    /// rather than restoring the previous one: a partially activated backend
    /// must not be presented as usable.
    pub fn apply_activation(&mut self, success: bool) {
        if !success {
            self.selected_id = None;
        }
    }

    /// Append an empty chat and make it active.
    pub fn create_chat(&mut self) -> String {
        let chat = Chat::new();
        let id = chat.id.clone();
        self.chats.push(chat);
        self.active_chat_id = Some(id.clone());
        id
    }

    /// Append a message to the active chat. A no-op without one; the UI is
    /// expected to have created a chat first, but misuse must not panic.
    ///
    /// The first user message retitles the chat.
    pub fn append_message(
        &mut self,
        role: MessageRole,
        content: impl Into<String>,
        citations: Vec<Citation>,
    ) -> bool {
        let active_id = match &self.active_chat_id {
            Some(id) => id.clone(),
            None => return false,
        };
        let Some(chat) = self.chats.iter_mut().find(|c| c.id == active_id) else {
            return false;
        };
        let content = content.into();
        if chat.messages.is_empty() && role == MessageRole::User {
            chat.title = derive_chat_title(&content);
        }
        chat.messages.push(Message::new(role, content, citations));
        true
    }

    /// Make an existing chat the active one. Unknown ids are ignored so the
    /// active-chat invariant holds.
    pub fn activate_chat(&mut self, id: &str) -> bool {
        if self.chats.iter().any(|c| c.id == id) {
            self.active_chat_id = Some(id.to_string());
            true
        } else {
            false
        }
    }

    pub fn record_attempt(&mut self, attempt: QuizAttempt) {
        self.quiz_attempts.push(attempt);
    }
}

/// Built-in documents for a first run with nothing persisted yet.
pub fn seed_library() -> Vec<Document> {
    let seeded_at = Utc
        .with_ymd_and_hms(2024, 1, 1, 0, 0, 0)
        .single()
        .unwrap_or_default();
    [
        ("ncert-xi-phy-1", "NCERT XI Physics — Sample 1", "/pdfs/ncert-sample1.pdf"),
        ("ncert-xi-phy-2", "NCERT XI Physics — Sample 2", "/pdfs/ncert-sample2.pdf"),
    ]
    .into_iter()
    .map(|(id, name, path)| Document {
        id: id.to_string(),
        name: name.to_string(),
        source: DocumentSource::Remote(path.to_string()),
        page_count: 0,
        uploaded_at: seeded_at,
    })
    .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use contracts::domain::{AnswerMap, Quiz};
    use std::collections::HashSet;

    fn state_with_library(n: usize) -> SessionState {
        let mut state = SessionState::default();
        for i in 0..n {
            state.add_document(
                format!("Doc{}.pdf", i),
                DocumentSource::Remote(format!("/pdfs/doc{}.pdf", i)),
                0,
            );
        }
        state
    }

    fn selection_is_valid(state: &SessionState) -> bool {
        match &state.selected_id {
            None => true,
            Some(id) => state.library.iter().any(|d| &d.id == id),
        }
    }

    #[test]
    fn test_added_documents_get_distinct_ids() {
        let state = state_with_library(20);
        let ids: HashSet<_> = state.library.iter().map(|d| d.id.as_str()).collect();
        assert_eq!(ids.len(), 20);
    }

    #[test]
    fn test_add_document_leaves_selection_alone() {
        let mut state = state_with_library(1);
        state.resolve_selection(None);
        let before = state.selected_id.clone();
        state.add_document("Extra.pdf", DocumentSource::NoPreview, 0);
        assert_eq!(state.selected_id, before);
    }

    #[test]
    fn test_resolve_selection_keeps_valid_persisted_id() {
        let mut state = state_with_library(3);
        let wanted = state.library[2].id.clone();
        state.resolve_selection(Some(wanted.clone()));
        assert_eq!(state.selected_id, Some(wanted));
    }

    #[test]
    fn test_resolve_selection_repairs_dangling_id() {
        let mut state = state_with_library(3);
        state.resolve_selection(Some("gone".to_string()));
        assert_eq!(state.selected_id, Some(state.library[0].id.clone()));
        assert!(selection_is_valid(&state));
    }

    #[test]
    fn test_resolve_selection_empty_library() {
        let mut state = SessionState::default();
        state.resolve_selection(Some("gone".to_string()));
        assert_eq!(state.selected_id, None);
    }

    #[test]
    fn test_begin_select_is_idempotent_for_current_selection() {
        let mut state = state_with_library(2);
        let doc = state.library[0].clone();

        let first = state.begin_select(&doc);
        assert!(matches!(first, SelectAction::Activate(_)));

        let second = state.begin_select(&doc);
        assert_eq!(second, SelectAction::Ignore);
        assert_eq!(state.selected_id, Some(doc.id));
    }

    #[test]
    fn test_begin_select_sets_selection_optimistically() {
        let mut state = state_with_library(2);
        let doc = state.library[1].clone();
        match state.begin_select(&doc) {
            SelectAction::Activate(activated) => assert_eq!(activated.id, doc.id),
            SelectAction::Ignore => panic!("expected activation"),
        }
        assert_eq!(state.selected_id, Some(doc.id));
    }

    #[test]
    fn test_failed_activation_clears_selection_not_previous() {
        let mut state = state_with_library(2);
        let first = state.library[0].clone();
        let second = state.library[1].clone();

        state.begin_select(&first);
        state.apply_activation(true);
        assert_eq!(state.selected_id, Some(first.id.clone()));

        state.begin_select(&second);
        state.apply_activation(false);
        // Fail closed: empty, not back to the previous selection.
        assert_eq!(state.selected_id, None);
        assert!(selection_is_valid(&state));
    }

    #[test]
    fn test_successful_activation_keeps_selection() {
        let mut state = state_with_library(1);
        let doc = state.library[0].clone();
        state.begin_select(&doc);
        state.apply_activation(true);
        assert_eq!(state.selected_id, Some(doc.id));
    }

    #[test]
    fn test_create_chat_becomes_active() {
        let mut state = SessionState::default();
        let id = state.create_chat();
        assert_eq!(state.active_chat_id, Some(id.clone()));
        assert_eq!(state.chats.len(), 1);
        assert_eq!(state.active_chat().unwrap().id, id);
    }

    #[test]
    fn test_activate_chat_rejects_unknown_id() {
        let mut state = SessionState::default();
        let first = state.create_chat();
        let second = state.create_chat();
        assert_eq!(state.active_chat_id, Some(second));

        assert!(state.activate_chat(&first));
        assert_eq!(state.active_chat_id, Some(first.clone()));

        assert!(!state.activate_chat("missing"));
        assert_eq!(state.active_chat_id, Some(first));
    }

    #[test]
    fn test_append_message_without_active_chat_is_noop() {
        let mut state = SessionState::default();
        assert!(!state.append_message(MessageRole::User, "hello", Vec::new()));
        assert!(state.chats.is_empty());
    }

    #[test]
    fn test_first_user_message_sets_title() {
        let mut state = SessionState::default();
        state.create_chat();
        state.append_message(MessageRole::User, "What is Newton's second law?", Vec::new());
        let chat = state.active_chat().unwrap();
        assert_eq!(chat.title, "What is Newton's second law?");

        state.append_message(MessageRole::Assistant, "F = ma", Vec::new());
        state.append_message(MessageRole::User, "And the third law?", Vec::new());
        let chat = state.active_chat().unwrap();
        assert_eq!(chat.title, "What is Newton's second law?");
        assert_eq!(chat.messages.len(), 3);
    }

    #[test]
    fn test_first_assistant_message_does_not_retitle() {
        let mut state = SessionState::default();
        state.create_chat();
        state.append_message(MessageRole::Assistant, "Welcome!", Vec::new());
        assert_eq!(state.active_chat().unwrap().title, "New Chat");
    }

    #[test]
    fn test_message_ids_unique_within_chat() {
        let mut state = SessionState::default();
        state.create_chat();
        for i in 0..10 {
            state.append_message(MessageRole::User, format!("msg {}", i), Vec::new());
        }
        let chat = state.active_chat().unwrap();
        let ids: HashSet<_> = chat.messages.iter().map(|m| m.id.as_str()).collect();
        assert_eq!(ids.len(), 10);
    }

    #[test]
    fn test_history_is_append_only() {
        let mut state = SessionState::default();
        let quiz = Quiz::new("doc-1", Vec::new());
        state.record_attempt(QuizAttempt::new(&quiz, "Physics.pdf", 3, 4, AnswerMap::new()));
        let recorded = state.quiz_attempts[0].clone();

        state.record_attempt(QuizAttempt::new(&quiz, "Physics.pdf", 4, 4, AnswerMap::new()));
        assert_eq!(state.quiz_attempts.len(), 2);
        assert_eq!(state.quiz_attempts[0], recorded);
    }

    #[test]
    fn test_seed_library_is_stable() {
        let seeded = seed_library();
        assert_eq!(seeded.len(), 2);
        assert_eq!(seeded[0].id, "ncert-xi-phy-1");
        assert!(matches!(seeded[0].source, DocumentSource::Remote(_)));
    }

    #[test]
    fn test_persisted_collections_round_trip() {
        let mut state = state_with_library(2);
        state.resolve_selection(None);
        state.create_chat();
        state.append_message(MessageRole::User, "hello there", Vec::new());
        state.append_message(
            MessageRole::Assistant,
            "hi",
            vec![Citation {
                source: "Page 1".to_string(),
                text: "greeting".to_string(),
            }],
        );
        let quiz = Quiz::new(state.library[0].id.clone(), Vec::new());
        state.record_attempt(QuizAttempt::new(&quiz, "Doc0.pdf", 2, 4, AnswerMap::new()));

        let library: Vec<Document> =
            serde_json::from_str(&serde_json::to_string(&state.library).unwrap()).unwrap();
        let chats: Vec<Chat> =
            serde_json::from_str(&serde_json::to_string(&state.chats).unwrap()).unwrap();
        let attempts: Vec<QuizAttempt> =
            serde_json::from_str(&serde_json::to_string(&state.quiz_attempts).unwrap()).unwrap();

        assert_eq!(library, state.library);
        assert_eq!(chats, state.chats);
        assert_eq!(attempts, state.quiz_attempts);
    }
}
