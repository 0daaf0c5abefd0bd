//! Snippet types and operations

use chrono::{DateTime, SecondsFormat, SubsecRound, Utc};
use serde::{Deserialize, Serialize};
use ulid::Ulid;

use crate::error::Result;
use crate::limits::ValidationError;

/// Unique identifier for a snippet
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct SnippetId(pub Ulid);

impl SnippetId {
    pub fn new() -> Self {
        Self(Ulid::new())
    }
}

impl Default for SnippetId {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Display for SnippetId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A stored snippet
///
/// Snippets are immutable once created; the only lifecycle change is
/// deletion. `created_at` is persisted as milliseconds since the epoch.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Snippet {
    /// Unique identifier, assigned at creation
    pub id: SnippetId,

    /// Snippet title (the only field searched)
    pub title: String,

    /// Snippet body
    pub content: String,

    /// Creation timestamp
    #[serde(with = "chrono::serde::ts_milliseconds")]
    pub created_at: DateTime<Utc>,
}

impl Snippet {
    /// Create a new snippet with a fresh id and the current time
    pub fn new(title: impl Into<String>, content: impl Into<String>) -> Self {
        Self {
            id: SnippetId::new(),
            title: title.into(),
            content: content.into(),
            // Millisecond precision so the value survives a storage round trip unchanged
            created_at: Utc::now().trunc_subsecs(3),
        }
    }
}

/// Data for creating a new snippet
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct NewSnippet {
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub content: Option<String>,
}

impl NewSnippet {
    pub fn new(title: impl Into<String>, content: impl Into<String>) -> Self {
        Self {
            title: Some(title.into()),
            content: Some(content.into()),
        }
    }

    /// Check that both `title` and `content` are present and non-empty
    pub fn validate(&self) -> std::result::Result<(), ValidationError> {
        let present = |field: &Option<String>| field.as_deref().is_some_and(|s| !s.is_empty());
        if present(&self.title) && present(&self.content) {
            Ok(())
        } else {
            Err(ValidationError::MissingTitleOrContent)
        }
    }

    /// Validate and turn the request into a snippet ready to persist
    pub fn into_snippet(self) -> Result<Snippet> {
        self.validate()?;
        let title = self.title.unwrap_or_default();
        let content = self.content.unwrap_or_default();
        Ok(Snippet::new(title, content))
    }
}

/// Client-facing representation of a snippet
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SnippetView {
    pub id: String,
    pub title: String,
    pub content: String,
    /// ISO-8601 with millisecond precision, e.g. `2026-10-19T08:30:00.000Z`
    pub created_at: String,
}

impl From<&Snippet> for SnippetView {
    fn from(snippet: &Snippet) -> Self {
        Self {
            id: snippet.id.to_string(),
            title: snippet.title.clone(),
            content: snippet.content.clone(),
            created_at: format_timestamp(&snippet.created_at),
        }
    }
}

impl From<Snippet> for SnippetView {
    fn from(snippet: Snippet) -> Self {
        Self::from(&snippet)
    }
}

/// Render a timestamp the way clients expect it
pub fn format_timestamp(ts: &DateTime<Utc>) -> String {
    ts.to_rfc3339_opts(SecondsFormat::Millis, true)
}
