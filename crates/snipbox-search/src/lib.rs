//! Snipbox Search - Relevance search over snippet titles
//!
//! Every query scans the full set of snippets it is handed; there is no
//! index to maintain.

pub mod error;
pub mod query;
pub mod title;
pub mod traits;

pub use error::{SearchError, SearchResult};
pub use query::SearchQuery;
pub use title::{matches, matching_words, TitleMatchEngine};
pub use traits::{SearchEngine, SearchHit};
