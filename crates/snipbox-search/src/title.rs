//! Title search engine - word overlap scoring

use async_trait::async_trait;

use crate::query::SearchQuery;
use crate::traits::{Result, SearchEngine, SearchHit};
use snipbox_core::Snippet;

/// Case-insensitive substring test
pub fn matches(pattern: &str, text: &str) -> bool {
    text.to_lowercase().contains(&pattern.to_lowercase())
}

/// Number of patterns found in `text`; each pattern counts at most once
pub fn matching_words<S: AsRef<str>>(patterns: &[S], text: &str) -> u32 {
    let text = text.to_lowercase();
    patterns
        .iter()
        .map(|pattern| pattern.as_ref())
        .filter(|pattern| !pattern.is_empty())
        .filter(|pattern| text.contains(&pattern.to_lowercase()))
        .count() as u32
}

/// Scores snippets by how many query words appear in their title
/// (stateless, full scan)
///
/// Content is never searched. Snippets scoring zero are dropped and the
/// rest are sorted by descending score; ties keep scan order.
pub struct TitleMatchEngine;

impl TitleMatchEngine {
    pub fn new() -> Self {
        Self
    }

    /// Relevance of one snippet for the given query words
    pub fn score(words: &[String], snippet: &Snippet) -> u32 {
        matching_words(words, &snippet.title)
    }

    /// Build the ranked result set
    pub fn rank(query: &SearchQuery, snippets: &[Snippet]) -> Vec<SearchHit> {
        let words = query.words();
        let mut hits: Vec<SearchHit> = snippets
            .iter()
            .filter_map(|snippet| {
                let score = Self::score(&words, snippet);
                (score > 0).then(|| SearchHit {
                    id: snippet.id.to_string(),
                    score,
                })
            })
            .collect();

        // Stable sort, descending
        hits.sort_by(|a, b| b.score.cmp(&a.score));
        hits
    }
}

impl Default for TitleMatchEngine {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl SearchEngine for TitleMatchEngine {
    async fn search(&self, query: &SearchQuery, snippets: &[Snippet]) -> Result<Vec<SearchHit>> {
        let hits = Self::rank(query, snippets);
        tracing::debug!(
            "Query '{}' matched {} of {} snippets",
            query.as_str(),
            hits.len(),
            snippets.len()
        );
        Ok(hits)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn mock_snippets() -> Vec<Snippet> {
        vec![
            Snippet::new(
                "Python Poetry installation",
                "How to install Python packages using Poetry.",
            ),
            Snippet::new("Deno KV basics", "Introduction to Deno's key-value store."),
            Snippet::new(
                "JavaScript async/await",
                "Understanding asynchronous programming in JS.",
            ),
        ]
    }

    async fn run(query: &str, snippets: &[Snippet]) -> Vec<SearchHit> {
        let engine = TitleMatchEngine::new();
        let query = SearchQuery::parse(query).unwrap();
        engine.search(&query, snippets).await.unwrap()
    }

    #[test]
    fn test_matches() {
        assert!(matches("test", "this is a test"));
        assert!(matches("TEST", "this is a test"));
        assert!(!matches("absent", "this is a test"));
    }

    #[test]
    fn test_matching_words() {
        let patterns = ["python", "deno", "kv"];
        assert_eq!(matching_words(&patterns, "Python and Deno are great"), 2);
        assert_eq!(matching_words(&patterns, "No matches here"), 0);
        assert_eq!(matching_words(&patterns, "kv is key-value store"), 1);
        assert_eq!(matching_words(&patterns, "PYTHON, DENO, and KV"), 3);
    }

    #[test]
    fn test_word_counts_once_per_title() {
        assert_eq!(matching_words(&["kv"], "kv kv kv"), 1);
        assert_eq!(matching_words(&["", "kv"], "kv store"), 1);
    }

    #[tokio::test]
    async fn test_scores() {
        let snippets = mock_snippets();

        let results = run("Python Poetry install", &snippets).await;
        assert_eq!(results.len(), 1);
        assert_eq!(results[0].id, snippets[0].id.to_string());
        assert_eq!(results[0].score, 3);

        let results = run("deno kv basics", &snippets).await;
        assert_eq!(results.len(), 1);
        assert_eq!(results[0].id, snippets[1].id.to_string());
        assert_eq!(results[0].score, 3);

        let results = run("async programming", &snippets).await;
        assert_eq!(results.len(), 1);
        assert_eq!(results[0].id, snippets[2].id.to_string());
        assert_eq!(results[0].score, 1);

        let results = run("nonexistent term", &snippets).await;
        assert!(results.is_empty());
    }

    #[tokio::test]
    async fn test_content_is_not_searched() {
        let snippets = mock_snippets();
        // "packages" only appears in the first snippet's content
        assert!(run("packages", &snippets).await.is_empty());
    }

    #[tokio::test]
    async fn test_sorted_by_descending_score() {
        let snippets = vec![
            Snippet::new("Rust", "one"),
            Snippet::new("Rust async tokio", "three"),
            Snippet::new("Rust async", "two"),
        ];

        let results = run("rust async tokio", &snippets).await;
        let scores: Vec<u32> = results.iter().map(|h| h.score).collect();
        assert_eq!(scores, vec![3, 2, 1]);
        assert_eq!(results[0].id, snippets[1].id.to_string());
    }

    #[tokio::test]
    async fn test_empty_search() {
        assert!(run("anything", &[]).await.is_empty());
    }

    #[test]
    fn test_hit_serializes_as_id_and_score() {
        let hit = SearchHit {
            id: "abc123".into(),
            score: 3,
        };
        assert_eq!(
            serde_json::to_value(&hit).unwrap(),
            serde_json::json!({"id": "abc123", "score": 3})
        );
    }
}
