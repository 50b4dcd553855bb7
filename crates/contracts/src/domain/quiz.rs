use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Raw submitted answers, keyed by question index. For MCQ questions the
/// value is the chosen option index as a string; for open-ended questions it
/// is the free-text answer.
pub type AnswerMap = BTreeMap<usize, String>;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum QuestionKind {
    /// Multiple choice, machine-gradable.
    Mcq,
    /// Short answer, scored by the backend.
    Saq,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QuizQuestion {
    #[serde(rename = "type")]
    pub kind: QuestionKind,
    pub question: String,
    #[serde(default)]
    pub options: Vec<String>,
    /// Index into `options` for MCQ questions.
    #[serde(rename = "correctAnswer")]
    pub correct_answer: Option<usize>,
    #[serde(default)]
    pub explanation: Option<String>,
}

/// A generated quiz as held by the quiz page while it is being taken.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Quiz {
    pub id: String,
    pub document_id: String,
    pub questions: Vec<QuizQuestion>,
}

impl Quiz {
    pub fn new(document_id: impl Into<String>, questions: Vec<QuizQuestion>) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            document_id: document_id.into(),
            questions,
        }
    }
}

/// Immutable record of one completed quiz. Never mutated once recorded.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QuizAttempt {
    pub id: String,
    pub quiz_id: String,
    pub document_id: String,
    /// Name of the document at attempt time. Kept denormalized so topic
    /// grouping survives even if the document disappears.
    pub document_name: String,
    /// Percentage, 0..=100.
    pub score: u32,
    pub date: DateTime<Utc>,
    /// Count of machine-gradable (MCQ) questions.
    pub total_questions: u32,
    pub correct_answers: u32,
    #[serde(default)]
    pub answers: AnswerMap,
}

impl QuizAttempt {
    pub fn new(
        quiz: &Quiz,
        document_name: impl Into<String>,
        correct_answers: u32,
        total_questions: u32,
        answers: AnswerMap,
    ) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            quiz_id: quiz.id.clone(),
            document_id: quiz.document_id.clone(),
            document_name: document_name.into(),
            score: score_percent(correct_answers, total_questions),
            date: Utc::now(),
            total_questions,
            correct_answers,
            answers,
        }
    }
}

/// Percentage score rounded to the nearest integer. A quiz with no gradable
/// questions scores 0 rather than dividing by zero.
pub fn score_percent(correct: u32, total: u32) -> u32 {
    if total == 0 {
        return 0;
    }
    ((100.0 * correct as f64) / total as f64).round() as u32
}

/// Grade the MCQ subset of a quiz against submitted answers.
///
/// Returns `(correct, total)` where `total` counts only MCQ questions. An
/// answer is correct iff it parses to the question's designated option index.
pub fn grade_mcq(questions: &[QuizQuestion], answers: &AnswerMap) -> (u32, u32) {
    let mut correct = 0;
    let mut total = 0;
    for (idx, q) in questions.iter().enumerate() {
        if q.kind != QuestionKind::Mcq {
            continue;
        }
        total += 1;
        let submitted = answers.get(&idx).and_then(|a| a.parse::<usize>().ok());
        if submitted.is_some() && submitted == q.correct_answer {
            correct += 1;
        }
    }
    (correct, total)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn mcq(question: &str, correct: usize) -> QuizQuestion {
        QuizQuestion {
            kind: QuestionKind::Mcq,
            question: question.to_string(),
            options: vec!["A".into(), "B".into(), "C".into(), "D".into()],
            correct_answer: Some(correct),
            explanation: None,
        }
    }

    fn saq(question: &str) -> QuizQuestion {
        QuizQuestion {
            kind: QuestionKind::Saq,
            question: question.to_string(),
            options: Vec::new(),
            correct_answer: None,
            explanation: None,
        }
    }

    #[test]
    fn test_score_percent_rounds() {
        assert_eq!(score_percent(3, 4), 75);
        assert_eq!(score_percent(1, 3), 33);
        assert_eq!(score_percent(2, 3), 67);
        assert_eq!(score_percent(4, 4), 100);
    }

    #[test]
    fn test_score_percent_zero_total() {
        assert_eq!(score_percent(0, 0), 0);
    }

    #[test]
    fn test_grade_mcq_counts_only_mcq() {
        let questions = vec![mcq("q1", 0), mcq("q2", 1), saq("q3")];
        let mut answers = AnswerMap::new();
        answers.insert(0, "0".to_string());
        answers.insert(1, "2".to_string());
        answers.insert(2, "some free text".to_string());

        let (correct, total) = grade_mcq(&questions, &answers);
        assert_eq!(total, 2);
        assert_eq!(correct, 1);
    }

    #[test]
    fn test_grade_mcq_unanswered_and_garbage() {
        let questions = vec![mcq("q1", 0), mcq("q2", 1)];
        let mut answers = AnswerMap::new();
        answers.insert(1, "not a number".to_string());

        let (correct, total) = grade_mcq(&questions, &answers);
        assert_eq!(total, 2);
        assert_eq!(correct, 0);
    }

    #[test]
    fn test_attempt_scores_from_grading() {
        let quiz = Quiz::new("doc-1", vec![mcq("q1", 0), mcq("q2", 1), mcq("q3", 2), mcq("q4", 3)]);
        let attempt = QuizAttempt::new(&quiz, "Physics-Ch1.pdf", 3, 4, AnswerMap::new());
        assert_eq!(attempt.score, 75);
        assert_eq!(attempt.quiz_id, quiz.id);
        assert_eq!(attempt.document_id, "doc-1");
    }
}
