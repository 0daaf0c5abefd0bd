//! Search query parsing and validation

use snipbox_core::MAX_QUERY_LEN;

use crate::error::{SearchError, SearchResult};

/// Name of the only query parameter `/search` understands
pub const QUERY_PARAM: &str = "query";

/// A validated free-text search query
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchQuery {
    text: String,
}

impl SearchQuery {
    /// Validate a raw query string
    pub fn parse(raw: &str) -> SearchResult<Self> {
        if raw.is_empty() {
            return Err(SearchError::MissingQuery);
        }
        Self::check_text(raw)?;
        Ok(Self {
            text: raw.to_string(),
        })
    }

    /// Validate a complete search request.
    ///
    /// Checks run in a fixed order and the first failure wins:
    /// missing query, request body, extra parameters, length, characters.
    pub fn from_request(params: &[(String, String)], has_body: bool) -> SearchResult<Self> {
        let raw = params
            .iter()
            .find(|(name, _)| name == QUERY_PARAM)
            .map(|(_, value)| value.as_str())
            .unwrap_or_default();

        if raw.is_empty() {
            return Err(SearchError::MissingQuery);
        }
        if has_body {
            return Err(SearchError::BodyNotAllowed);
        }
        if params.len() > 1 {
            return Err(SearchError::UnexpectedParameters);
        }
        Self::check_text(raw)?;

        Ok(Self {
            text: raw.to_string(),
        })
    }

    fn check_text(raw: &str) -> SearchResult<()> {
        // Measured in UTF-16 code units, so astral characters count twice
        let len = raw.encode_utf16().count();
        if len > MAX_QUERY_LEN {
            return Err(SearchError::QueryTooLong {
                len,
                max: MAX_QUERY_LEN,
            });
        }
        if !raw
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == ' ' || c == '_' || c == '-')
        {
            return Err(SearchError::InvalidCharacters);
        }
        Ok(())
    }

    /// The query exactly as supplied
    pub fn as_str(&self) -> &str {
        &self.text
    }

    /// Words of the query, split on single spaces, lowercased and
    /// de-duplicated. Empty words from repeated spaces are dropped.
    pub fn words(&self) -> Vec<String> {
        let mut words: Vec<String> = Vec::new();
        for word in self.text.split(' ').filter(|w| !w.is_empty()) {
            let word = word.to_lowercase();
            if !words.contains(&word) {
                words.push(word);
            }
        }
        words
    }
}
