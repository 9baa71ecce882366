//! Error types for plwordnet core

use thiserror::Error;

/// Result type alias using plwordnet's Error
pub type Result<T> = std::result::Result<T, Error>;

/// plwordnet error types
#[derive(Error, Debug)]
pub enum Error {
    /// Malformed or missing required source field. Aborts the load.
    #[error("Schema error in {context}: {message}")]
    Schema { context: String, message: String },

    /// A relation query was issued without any filter.
    #[error("Invalid query: {0}")]
    InvalidQuery(String),

    #[error("XML error: {0}")]
    Xml(#[from] quick_xml::Error),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl Error {
    pub fn schema(context: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Schema {
            context: context.into(),
            message: message.into(),
        }
    }

    /// Whether this error came from malformed source data rather than I/O.
    pub fn is_schema(&self) -> bool {
        matches!(self, Self::Schema { .. })
    }
}
