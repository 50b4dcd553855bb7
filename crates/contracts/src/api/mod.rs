//! Wire shapes for the study backend.
//!
//! Every endpoint answers with a `success` flag instead of relying on HTTP
//! status alone, so each response type converts itself into a `Result` at the
//! boundary rather than letting callers trust ambient object shape.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::domain::{Citation, QuestionKind, QuizQuestion};

/// MCQ items below this option count are considered malformed.
const MIN_MCQ_OPTIONS: usize = 4;

fn failure(error: Option<String>, fallback: &str) -> String {
    error.unwrap_or_else(|| fallback.to_string())
}

/// `POST /api/upload` (multipart file upload).
#[derive(Debug, Clone, Deserialize)]
pub struct UploadResponse {
    pub success: bool,
    #[serde(default)]
    pub filename: Option<String>,
    #[serde(default)]
    pub message: Option<String>,
    #[serde(default)]
    pub error: Option<String>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct UploadOk {
    /// Server-confirmed filename, used as the document name.
    pub filename: String,
    pub message: String,
}

impl UploadResponse {
    pub fn into_result(self) -> Result<UploadOk, String> {
        if !self.success {
            return Err(failure(self.error, "PDF upload failed"));
        }
        let filename = self
            .filename
            .ok_or_else(|| "Upload response missing filename".to_string())?;
        Ok(UploadOk {
            filename,
            message: self.message.unwrap_or_default(),
        })
    }
}

/// `POST /api/select-pdf`. Loads a document into the backend's retrieval
/// context; carries no payload beyond the success flag.
#[derive(Debug, Clone, Deserialize)]
pub struct SelectResponse {
    pub success: bool,
    #[serde(default)]
    pub error: Option<String>,
}

impl SelectResponse {
    pub fn into_result(self) -> Result<(), String> {
        if self.success {
            Ok(())
        } else {
            Err(failure(self.error, "PDF selection failed"))
        }
    }
}

/// `POST /api/chat-with-citations`.
#[derive(Debug, Clone, Deserialize)]
pub struct ChatResponse {
    pub success: bool,
    #[serde(default)]
    pub answer: Option<String>,
    #[serde(default)]
    pub citations: Option<Vec<Citation>>,
    #[serde(default)]
    pub error: Option<String>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ChatAnswer {
    pub answer: String,
    pub citations: Vec<Citation>,
}

impl ChatResponse {
    pub fn into_result(self) -> Result<ChatAnswer, String> {
        if !self.success {
            return Err(failure(self.error, "Chat request failed"));
        }
        let answer = self
            .answer
            .ok_or_else(|| "Chat response missing answer".to_string())?;
        Ok(ChatAnswer {
            answer,
            citations: self.citations.unwrap_or_default(),
        })
    }
}

/// `POST /api/quiz`.
#[derive(Debug, Clone, Deserialize)]
pub struct QuizResponse {
    pub success: bool,
    #[serde(default)]
    pub quiz: Option<Vec<QuizQuestion>>,
    #[serde(default)]
    pub error: Option<String>,
}

impl QuizResponse {
    /// A quiz that is empty, or whose MCQ items carry fewer than 4 options,
    /// is rejected outright so no attempt is ever recorded against it.
    pub fn into_result(self) -> Result<Vec<QuizQuestion>, String> {
        if !self.success {
            return Err(failure(self.error, "Quiz generation failed"));
        }
        let questions = self
            .quiz
            .ok_or_else(|| "Invalid quiz format received from server".to_string())?;
        if questions.is_empty() {
            return Err("Server returned an empty quiz".to_string());
        }
        for q in &questions {
            if q.kind == QuestionKind::Mcq && q.options.len() < MIN_MCQ_OPTIONS {
                return Err(format!(
                    "Malformed quiz question (only {} options): {}",
                    q.options.len(),
                    q.question
                ));
            }
        }
        Ok(questions)
    }
}

/// Per-question verdict from `POST /api/analyze-quiz-attempt`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnswerScore {
    /// 0..=10 as graded by the backend.
    pub score: u32,
    pub feedback: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct AnalysisResponse {
    pub success: bool,
    #[serde(default)]
    pub scores: Option<HashMap<String, AnswerScore>>,
    #[serde(default)]
    pub error: Option<String>,
}

impl AnalysisResponse {
    pub fn into_result(self) -> Result<HashMap<String, AnswerScore>, String> {
        if !self.success {
            return Err(failure(self.error, "Answer analysis failed"));
        }
        Ok(self.scores.unwrap_or_default())
    }
}

/// One row from `POST /api/youtube-recommendations`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VideoRecommendation {
    pub topic: String,
    pub suggested_query: String,
    pub search_url: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct RecommendationsResponse {
    pub success: bool,
    #[serde(default)]
    pub recommendations: Option<Vec<VideoRecommendation>>,
    #[serde(default)]
    pub error: Option<String>,
}

impl RecommendationsResponse {
    pub fn into_result(self) -> Result<Vec<VideoRecommendation>, String> {
        if !self.success {
            return Err(failure(self.error, "Failed to get recommendations"));
        }
        Ok(self.recommendations.unwrap_or_default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_select_failure_uses_server_message() {
        let resp: SelectResponse =
            serde_json::from_str(r#"{"success": false, "error": "no such pdf"}"#).unwrap();
        assert_eq!(resp.into_result(), Err("no such pdf".to_string()));
    }

    #[test]
    fn test_select_failure_falls_back_to_generic_message() {
        let resp: SelectResponse = serde_json::from_str(r#"{"success": false}"#).unwrap();
        assert_eq!(resp.into_result(), Err("PDF selection failed".to_string()));
    }

    #[test]
    fn test_chat_response_parses_citations() {
        let raw = r#"{
            "success": true,
            "answer": "Force is mass times acceleration.",
            "citations": [{"source": "Page 12", "text": "F = ma"}]
        }"#;
        let resp: ChatResponse = serde_json::from_str(raw).unwrap();
        let answer = resp.into_result().unwrap();
        assert_eq!(answer.citations.len(), 1);
        assert_eq!(answer.citations[0].source, "Page 12");
    }

    #[test]
    fn test_quiz_rejects_empty_array() {
        let resp: QuizResponse =
            serde_json::from_str(r#"{"success": true, "quiz": []}"#).unwrap();
        assert!(resp.into_result().is_err());
    }

    #[test]
    fn test_quiz_rejects_mcq_with_too_few_options() {
        let raw = r#"{
            "success": true,
            "quiz": [{
                "type": "mcq",
                "question": "Pick one",
                "options": ["A", "B"],
                "correctAnswer": 0
            }]
        }"#;
        let resp: QuizResponse = serde_json::from_str(raw).unwrap();
        assert!(resp.into_result().is_err());
    }

    #[test]
    fn test_quiz_accepts_wellformed_payload() {
        let raw = r#"{
            "success": true,
            "quiz": [
                {
                    "type": "mcq",
                    "question": "SI unit of force?",
                    "options": ["Newton", "Joule", "Watt", "Pascal"],
                    "correctAnswer": 0,
                    "explanation": "Named after Isaac Newton."
                },
                {"type": "saq", "question": "Define velocity."}
            ]
        }"#;
        let resp: QuizResponse = serde_json::from_str(raw).unwrap();
        let questions = resp.into_result().unwrap();
        assert_eq!(questions.len(), 2);
        assert_eq!(questions[0].kind, QuestionKind::Mcq);
        assert_eq!(questions[1].kind, QuestionKind::Saq);
        assert_eq!(questions[1].correct_answer, None);
    }
}
