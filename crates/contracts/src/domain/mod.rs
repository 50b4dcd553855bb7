pub mod chat;
pub mod document;
pub mod quiz;

pub use chat::{derive_chat_title, Chat, Citation, Message, MessageRole};
pub use document::{Document, DocumentSource};
pub use quiz::{grade_mcq, score_percent, AnswerMap, QuestionKind, Quiz, QuizAttempt, QuizQuestion};
