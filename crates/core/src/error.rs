use serde::{Deserialize, Serialize};

/// Recoverable search failures.
///
/// These are reported to the caller as values. A response body that does not
/// match the expected shape is not represented here: it means the API changed
/// and is surfaced as a hard error by the shell instead.
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum SearchError {
    #[error("Missing search phrase")]
    MissingQuery,

    #[error("HTTP error from Library of Congress server: {status} {message}")]
    Http { status: u16, message: String },

    #[error("Network error talking to Library of Congress server: {0}")]
    Network(String),
}

impl SearchError {
    /// Whether the error was caught before any request was made
    pub fn is_input_error(&self) -> bool {
        matches!(self, SearchError::MissingQuery)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_http_error_message() {
        let err = SearchError::Http {
            status: 503,
            message: "Service Unavailable".to_string(),
        };

        let text = err.to_string();

        assert!(text.contains("503"));
        assert!(text.contains("Service Unavailable"));
        assert!(!err.is_input_error());
    }

    #[test]
    fn test_missing_query_message() {
        assert_eq!(SearchError::MissingQuery.to_string(), "Missing search phrase");
        assert!(SearchError::MissingQuery.is_input_error());
    }
}
