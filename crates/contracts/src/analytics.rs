//! Learning-progress statistics derived from the quiz attempt history.
//!
//! Pure computation: no state of its own, recomputed from the full attempt
//! sequence on every call. Attempts are treated as chronological in append
//! order; the `date` field is not re-sorted.

use serde::{Deserialize, Serialize};

use crate::domain::QuizAttempt;

/// Topics with an average at or above this are "strong", below it "weak".
const STRONG_TOPIC_THRESHOLD: u32 = 75;
/// How many topics each of the strong/weak lists is capped to.
const TOPIC_LIST_CAP: usize = 3;
/// Window size for the improvement comparison (last N vs the N before).
const IMPROVEMENT_WINDOW: usize = 3;
/// Ceiling for the simplified recent-activity count.
const STREAK_CAP: usize = 7;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TopicStat {
    pub name: String,
    pub avg_score: u32,
    pub attempts: usize,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TopicsAnalysis {
    pub strong: Vec<TopicStat>,
    pub weak: Vec<TopicStat>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Statistics {
    pub total_quizzes: usize,
    pub avg_score: u32,
    pub highest_score: u32,
    pub lowest_score: u32,
    /// Mean of the last 3 scores minus the mean of the 3 before them.
    /// Only computed once 6 attempts exist, otherwise 0.
    pub improvement: i32,
    /// `min(total_quizzes, 7)`, a simplified activity count rather than a
    /// true consecutive-day streak.
    pub recent_streak: usize,
    pub topics_analysis: TopicsAnalysis,
}

/// Topic label for a document name: trailing ".pdf" stripped, then the part
/// before the first '-' or '_'. "Physics-Ch1.pdf" and "Physics_Ch2.pdf" both
/// group under "Physics".
pub fn topic_label(document_name: &str) -> String {
    let stem = document_name
        .strip_suffix(".pdf")
        .unwrap_or(document_name);
    stem.split(['-', '_'])
        .next()
        .unwrap_or(stem)
        .to_string()
}

fn mean(scores: &[u32]) -> f64 {
    if scores.is_empty() {
        return 0.0;
    }
    scores.iter().map(|&s| s as f64).sum::<f64>() / scores.len() as f64
}

pub fn compute_statistics(attempts: &[QuizAttempt]) -> Statistics {
    if attempts.is_empty() {
        return Statistics::default();
    }

    let scores: Vec<u32> = attempts.iter().map(|a| a.score).collect();
    let total_quizzes = scores.len();
    let avg_score = mean(&scores).round() as u32;
    let highest_score = scores.iter().copied().max().unwrap_or(0);
    let lowest_score = scores.iter().copied().min().unwrap_or(0);

    let improvement = if total_quizzes >= 2 * IMPROVEMENT_WINDOW {
        let recent = &scores[total_quizzes - IMPROVEMENT_WINDOW..];
        let previous =
            &scores[total_quizzes - 2 * IMPROVEMENT_WINDOW..total_quizzes - IMPROVEMENT_WINDOW];
        (mean(recent) - mean(previous)).round() as i32
    } else {
        0
    };

    Statistics {
        total_quizzes,
        avg_score,
        highest_score,
        lowest_score,
        improvement,
        recent_streak: total_quizzes.min(STREAK_CAP),
        topics_analysis: analyze_topics(attempts),
    }
}

fn analyze_topics(attempts: &[QuizAttempt]) -> TopicsAnalysis {
    // Grouped in first-seen order so equal averages stay deterministic.
    let mut groups: Vec<(String, Vec<u32>)> = Vec::new();
    for attempt in attempts {
        let label = topic_label(&attempt.document_name);
        match groups.iter_mut().find(|(name, _)| *name == label) {
            Some((_, scores)) => scores.push(attempt.score),
            None => groups.push((label, vec![attempt.score])),
        }
    }

    let topics: Vec<TopicStat> = groups
        .into_iter()
        .map(|(name, scores)| TopicStat {
            name,
            avg_score: mean(&scores).round() as u32,
            attempts: scores.len(),
        })
        .collect();

    let mut strong: Vec<TopicStat> = topics
        .iter()
        .filter(|t| t.avg_score >= STRONG_TOPIC_THRESHOLD)
        .cloned()
        .collect();
    strong.sort_by(|a, b| b.avg_score.cmp(&a.avg_score));
    strong.truncate(TOPIC_LIST_CAP);

    let mut weak: Vec<TopicStat> = topics
        .into_iter()
        .filter(|t| t.avg_score < STRONG_TOPIC_THRESHOLD)
        .collect();
    weak.sort_by(|a, b| a.avg_score.cmp(&b.avg_score));
    weak.truncate(TOPIC_LIST_CAP);

    TopicsAnalysis { strong, weak }
}
