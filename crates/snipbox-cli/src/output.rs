//! Output formatting utilities

use std::fmt;
use std::str::FromStr;

use clap::ValueEnum;
use serde::Serialize;
use snipbox_core::{Snippet, SnippetView};
use snipbox_search::SearchHit;

/// Output format
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    Table,
    Json,
}

impl FromStr for OutputFormat {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "table" => Ok(Self::Table),
            "json" => Ok(Self::Json),
            other => anyhow::bail!("Unknown output format: {} (expected table or json)", other),
        }
    }
}

impl fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Table => write!(f, "table"),
            Self::Json => write!(f, "json"),
        }
    }
}

fn to_json<T: Serialize>(data: &T) -> anyhow::Result<String> {
    Ok(serde_json::to_string_pretty(data)?)
}

/// Width of the title column, capped so content stays on screen
fn title_width(titles: impl Iterator<Item = usize>) -> usize {
    titles.max().unwrap_or(0).clamp(5, 40)
}

fn truncate(text: &str, max: usize) -> String {
    if text.chars().count() <= max {
        return text.to_string();
    }
    let cut: String = text.chars().take(max.saturating_sub(3)).collect();
    format!("{}...", cut)
}

/// Render one snippet
pub fn format_snippet(snippet: &Snippet, format: OutputFormat) -> anyhow::Result<String> {
    let view = SnippetView::from(snippet);
    match format {
        OutputFormat::Json => to_json(&view),
        OutputFormat::Table => Ok(format!(
            "Snippet: {}\n  Title: {}\n  Created: {}\n  Content:\n    {}",
            view.id,
            view.title,
            view.created_at,
            view.content.replace('\n', "\n    ")
        )),
    }
}

/// Render a list of snippets
pub fn format_snippets(snippets: &[Snippet], format: OutputFormat) -> anyhow::Result<String> {
    match format {
        OutputFormat::Json => {
            let views: Vec<SnippetView> = snippets.iter().map(SnippetView::from).collect();
            to_json(&views)
        }
        OutputFormat::Table => {
            if snippets.is_empty() {
                return Ok("No snippets found".to_string());
            }
            let width = title_width(snippets.iter().map(|s| s.title.chars().count()));
            let mut lines = vec![format!("{:<26}  {:<width$}  CREATED", "ID", "TITLE")];
            for snippet in snippets {
                lines.push(format!(
                    "{:<26}  {:<width$}  {}",
                    snippet.id.to_string(),
                    truncate(&snippet.title, width),
                    SnippetView::from(snippet).created_at,
                ));
            }
            Ok(lines.join("\n"))
        }
    }
}

/// Render ranked search hits, resolving titles where the snippet is known
pub fn format_hits(
    hits: &[SearchHit],
    snippets: &[Snippet],
    format: OutputFormat,
) -> anyhow::Result<String> {
    match format {
        OutputFormat::Json => to_json(&hits),
        OutputFormat::Table => {
            if hits.is_empty() {
                return Ok("No matching snippets".to_string());
            }
            let mut lines = vec![format!("{:>5}  {:<26}  TITLE", "SCORE", "ID")];
            for hit in hits {
                let title = snippets
                    .iter()
                    .find(|s| s.id.to_string() == hit.id)
                    .map(|s| truncate(&s.title, 40))
                    .unwrap_or_default();
                lines.push(format!("{:>5}  {:<26}  {}", hit.score, hit.id, title));
            }
            Ok(lines.join("\n"))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_format() {
        assert_eq!("json".parse::<OutputFormat>().unwrap(), OutputFormat::Json);
        assert_eq!("Table".parse::<OutputFormat>().unwrap(), OutputFormat::Table);
        assert!("csv".parse::<OutputFormat>().is_err());
    }

    #[test]
    fn test_truncate() {
        assert_eq!(truncate("short", 10), "short");
        assert_eq!(truncate("a much longer title", 10), "a much ...");
    }

    #[test]
    fn test_table_output() {
        let snippets = vec![Snippet::new("Deno KV basics", "kv")];
        let table = format_snippets(&snippets, OutputFormat::Table).unwrap();
        assert!(table.starts_with("ID"));
        assert!(table.contains("Deno KV basics"));

        let empty = format_snippets(&[], OutputFormat::Table).unwrap();
        assert_eq!(empty, "No snippets found");
    }

    #[test]
    fn test_json_hits() {
        let snippet = Snippet::new("Deno KV basics", "kv");
        let hits = vec![SearchHit {
            id: snippet.id.to_string(),
            score: 3,
        }];
        let json = format_hits(&hits, &[snippet], OutputFormat::Json).unwrap();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();
        assert_eq!(value[0]["score"], 3);
    }
}
