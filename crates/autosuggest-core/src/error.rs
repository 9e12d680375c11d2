//! Error types for the suggestion controller

use thiserror::Error;

/// Failures surfaced to the caller of the input handler
///
/// Cancellation of a superseded request is not an error; it is reported
/// through [`InputOutcome::Superseded`](crate::InputOutcome::Superseded).
#[derive(Debug, Error)]
pub enum SuggestError {
    #[error("search backend rejected query {query:?}: {source}")]
    SearchRejected {
        query: String,
        #[source]
        source: anyhow::Error,
    },
}

impl SuggestError {
    /// Query the failed request was issued for
    pub fn query(&self) -> &str {
        match self {
            SuggestError::SearchRejected { query, .. } => query,
        }
    }
}

pub type Result<T> = std::result::Result<T, SuggestError>;
