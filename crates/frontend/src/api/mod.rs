//! Client for the study backend.
//!
//! The backend takes multipart form fields and answers JSON envelopes with a
//! `success` flag; the envelope types in `contracts::api` convert those into
//! `Result` so nothing downstream inspects ambient object shape.

use contracts::api::{
    AnalysisResponse, AnswerScore, ChatAnswer, ChatResponse, QuizResponse,
    RecommendationsResponse, SelectResponse, UploadOk, UploadResponse, VideoRecommendation,
};
use contracts::domain::{AnswerMap, QuizQuestion};
use gloo_net::http::Request;
use std::collections::HashMap;
use web_sys::FormData;

use crate::shared::api_utils::api_url;

fn form_data(fields: &[(&str, &str)]) -> Result<FormData, String> {
    let form = FormData::new().map_err(|_| "Failed to build form data".to_string())?;
    for (name, value) in fields {
        form.append_with_str(name, value)
            .map_err(|_| format!("Failed to append form field '{}'", name))?;
    }
    Ok(form)
}

async fn post_form<T>(path: &str, form: FormData, what: &str) -> Result<T, String>
where
    T: for<'de> serde::Deserialize<'de>,
{
    let response = Request::post(&api_url(path))
        .body(form)
        .map_err(|e| format!("Failed to build request: {}", e))?
        .send()
        .await
        .map_err(|e| format!("Failed to send request: {}", e))?;

    if !response.ok() {
        return Err(format!("{} failed: {}", what, response.status()));
    }

    response
        .json::<T>()
        .await
        .map_err(|e| format!("Failed to parse response: {}", e))
}

/// Upload a PDF for ingestion. The server-confirmed filename becomes the
/// library entry's name.
pub async fn upload_pdf(file: web_sys::File) -> Result<UploadOk, String> {
    let form = FormData::new().map_err(|_| "Failed to build form data".to_string())?;
    form.append_with_blob_and_filename("file", &file, &file.name())
        .map_err(|_| "Failed to attach file".to_string())?;

    post_form::<UploadResponse>("/api/upload", form, "PDF upload")
        .await?
        .into_result()
}

/// Load a document into the backend's retrieval context.
pub async fn select_pdf(pdf_name: &str) -> Result<(), String> {
    let form = form_data(&[("pdf_name", pdf_name)])?;
    post_form::<SelectResponse>("/api/select-pdf", form, "PDF selection")
        .await?
        .into_result()
}

/// Ask a question about the selected document; the answer carries citations.
pub async fn chat_with_citations(query: &str) -> Result<ChatAnswer, String> {
    let form = form_data(&[("query", query)])?;
    post_form::<ChatResponse>("/api/chat-with-citations", form, "Chat request")
        .await?
        .into_result()
}

/// Generate a quiz for a topic or document name. Malformed payloads are
/// rejected here so no attempt is ever recorded against them.
pub async fn generate_quiz(topic: &str) -> Result<Vec<QuizQuestion>, String> {
    let form = form_data(&[("topic", topic)])?;
    post_form::<QuizResponse>("/api/quiz", form, "Quiz generation")
        .await?
        .into_result()
}

/// Have the backend score open-ended answers. MCQ results are already known
/// locally, so callers log a failure here without blocking them.
pub async fn analyze_quiz_attempt(
    questions: &[QuizQuestion],
    answers: &AnswerMap,
) -> Result<HashMap<String, AnswerScore>, String> {
    let quiz_json = serde_json::to_string(questions)
        .map_err(|e| format!("Failed to serialize quiz: {}", e))?;
    let answers_json = serde_json::to_string(answers)
        .map_err(|e| format!("Failed to serialize answers: {}", e))?;

    let form = form_data(&[("quiz_data", &quiz_json), ("answers", &answers_json)])?;
    post_form::<AnalysisResponse>("/api/analyze-quiz-attempt", form, "Answer analysis")
        .await?
        .into_result()
}

/// Video recommendations for a comma-separated list of topic labels.
pub async fn youtube_recommendations(topics: &str) -> Result<Vec<VideoRecommendation>, String> {
    let form = form_data(&[("topics", topics)])?;
    post_form::<RecommendationsResponse>(
        "/api/youtube-recommendations",
        form,
        "YouTube recommendations",
    )
    .await?
    .into_result()
}

/// Liveness probe used by the shell footer.
pub async fn ping() -> bool {
    match Request::get(&api_url("/api/status")).send().await {
        Ok(response) => response.ok(),
        Err(_) => false,
    }
}
