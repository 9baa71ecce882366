//! Search errors

use thiserror::Error;

pub type SearchResult<T> = std::result::Result<T, SearchError>;

#[derive(Error, Debug)]
pub enum SearchError {
    /// The query cannot be run, e.g. it has no text
    #[error("Invalid search query: {0}")]
    Query(String),
}
