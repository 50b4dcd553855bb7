use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Where a document's bytes can be previewed from.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "url", rename_all = "snake_case")]
pub enum DocumentSource {
    /// Path served by the app host, e.g. "/pdfs/ncert-sample1.pdf".
    Remote(String),
    /// Object URL for a file picked in this tab. Invalid once the tab closes.
    Blob(String),
    /// Uploaded in an earlier session; the bytes are gone, only metadata remains.
    NoPreview,
}

impl DocumentSource {
    /// URL usable as an embed target, if the source still has one.
    pub fn preview_url(&self) -> Option<&str> {
        match self {
            DocumentSource::Remote(url) | DocumentSource::Blob(url) => Some(url),
            DocumentSource::NoPreview => None,
        }
    }
}

/// A PDF the user studies from, either pre-seeded or uploaded.
///
/// Immutable after creation; the library only grows.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Document {
    pub id: String,
    /// Display name; also the basis for analytics topic labels.
    pub name: String,
    pub source: DocumentSource,
    /// 0 when the page count is unknown.
    #[serde(default)]
    pub page_count: u32,
    pub uploaded_at: DateTime<Utc>,
}

impl Document {
    pub fn new(name: impl Into<String>, source: DocumentSource, page_count: u32) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            name: name.into(),
            source,
            page_count,
            uploaded_at: Utc::now(),
        }
    }
}
