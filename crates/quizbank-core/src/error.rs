//! Error types for Quizbank

use thiserror::Error;

/// Result type alias using Quizbank's Error
pub type Result<T> = std::result::Result<T, Error>;

/// Quizbank error types with helpful messages
#[derive(Error, Debug)]
pub enum Error {
    // Lookup errors
    #[error("Question {0} not found. Run `quizbank questions list` to see stored questions.")]
    QuestionNotFound(i64),

    #[error("Category {0} not found. Run `quizbank categories list` to see all categories.")]
    CategoryNotFound(i64),

    #[error("Category {0} has no questions.")]
    NoQuestionsInCategory(i64),

    #[error("Page {0} is beyond the last page of results.")]
    PageNotFound(u32),

    #[error("No questions match '{0}'.")]
    NoSearchMatches(String),

    #[error("The category directory is empty.")]
    NoCategories,

    // Input errors
    #[error("Invalid quiz category selector: {0}")]
    InvalidCategorySelector(String),

    #[error("Field '{0}' is required.")]
    MissingField(&'static str),

    #[error("Field '{0}' must not be empty.")]
    InvalidField(&'static str),

    #[error("Operation not supported for this resource: {0}")]
    UnsupportedOperation(String),

    // Database errors
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),
}

/// The fixed set of transport-agnostic error kinds.
///
/// Every fault surfaced by the engine classifies into exactly one of these;
/// a transport layer maps them onto its own status vocabulary.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    NotFound,
    BadRequest,
    Unprocessable,
    MethodNotAllowed,
}

impl ErrorKind {
    /// Canonical numeric code for this kind
    pub fn code(&self) -> u16 {
        match self {
            ErrorKind::NotFound => 404,
            ErrorKind::BadRequest => 400,
            ErrorKind::Unprocessable => 422,
            ErrorKind::MethodNotAllowed => 405,
        }
    }

    /// Stable string form for logs and machine-readable output
    pub fn as_str(&self) -> &'static str {
        match self {
            ErrorKind::NotFound => "not_found",
            ErrorKind::BadRequest => "bad_request",
            ErrorKind::Unprocessable => "unprocessable",
            ErrorKind::MethodNotAllowed => "method_not_allowed",
        }
    }
}

impl Error {
    /// Classify this error into one of the fixed kinds.
    ///
    /// Store faults never leak unclassified: a missing row is NotFound,
    /// every other database fault (constraint violations included) is
    /// Unprocessable.
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::QuestionNotFound(_)
            | Self::CategoryNotFound(_)
            | Self::NoQuestionsInCategory(_)
            | Self::PageNotFound(_) => ErrorKind::NotFound,
            Self::NoSearchMatches(_) => ErrorKind::Unprocessable,
            Self::NoCategories
            | Self::InvalidCategorySelector(_)
            | Self::MissingField(_)
            | Self::InvalidField(_) => ErrorKind::BadRequest,
            Self::UnsupportedOperation(_) => ErrorKind::MethodNotAllowed,
            Self::Database(sqlx::Error::RowNotFound) => ErrorKind::NotFound,
            Self::Database(_) => ErrorKind::Unprocessable,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_question_not_found_kind() {
        let error = Error::QuestionNotFound(42);
        assert_eq!(error.kind(), ErrorKind::NotFound);
        assert_eq!(error.kind().code(), 404);
        assert!(error.to_string().contains("42"));
    }

    #[test]
    fn test_no_search_matches_is_unprocessable() {
        let error = Error::NoSearchMatches("quark".to_string());
        assert_eq!(error.kind(), ErrorKind::Unprocessable);
        assert_eq!(error.kind().code(), 422);
        assert!(error.to_string().contains("quark"));
    }

    #[test]
    fn test_selector_errors_are_bad_request() {
        let error = Error::InvalidCategorySelector("id is not an integer".to_string());
        assert_eq!(error.kind(), ErrorKind::BadRequest);
        assert_eq!(error.kind().code(), 400);

        let error = Error::MissingField("answer");
        assert_eq!(error.kind(), ErrorKind::BadRequest);
        assert!(error.to_string().contains("answer"));
    }

    #[test]
    fn test_unsupported_operation_kind() {
        let error = Error::UnsupportedOperation("create on /questions/5".to_string());
        assert_eq!(error.kind(), ErrorKind::MethodNotAllowed);
        assert_eq!(error.kind().code(), 405);
    }

    #[test]
    fn test_database_fault_classification() {
        let error = Error::Database(sqlx::Error::RowNotFound);
        assert_eq!(error.kind(), ErrorKind::NotFound);

        let error = Error::Database(sqlx::Error::PoolTimedOut);
        assert_eq!(error.kind(), ErrorKind::Unprocessable);
    }

    #[test]
    fn test_kind_string_forms() {
        assert_eq!(ErrorKind::NotFound.as_str(), "not_found");
        assert_eq!(ErrorKind::BadRequest.as_str(), "bad_request");
        assert_eq!(ErrorKind::Unprocessable.as_str(), "unprocessable");
        assert_eq!(ErrorKind::MethodNotAllowed.as_str(), "method_not_allowed");
    }
}
