//! Question search
//!
//! Wraps the repository substring query and applies the zero-match policy:
//! by default, no matches is an Unprocessable error rather than an empty
//! success. The policy is a flag because reimplementers may legitimately
//! want the empty-success behavior instead.

use crate::bank::{Question, QuestionRepository};
use crate::storage::Database;
use crate::{Error, Result};

/// Search outcome: matches plus the total count before any paging
#[derive(Debug, Clone)]
pub struct SearchResults {
    pub matches: Vec<Question>,
    pub total: usize,
}

/// Case-insensitive substring search over question text
pub struct SearchService<'a> {
    db: &'a Database,
    empty_result_is_error: bool,
}

impl<'a> SearchService<'a> {
    /// Create a search service with the default zero-match-is-error policy
    pub fn new(db: &'a Database) -> Self {
        Self {
            db,
            empty_result_is_error: true,
        }
    }

    /// Report zero matches as an empty success instead of an error
    pub fn allow_empty_results(mut self) -> Self {
        self.empty_result_is_error = false;
        self
    }

    /// Set the zero-match policy explicitly (e.g. from configuration)
    pub fn empty_result_is_error(mut self, flag: bool) -> Self {
        self.empty_result_is_error = flag;
        self
    }

    /// Search question text for `term`.
    ///
    /// An empty term matches every stored question.
    pub async fn search(&self, term: &str) -> Result<SearchResults> {
        let repo = QuestionRepository::new(self.db);
        let matches = repo.search(term).await?;

        tracing::debug!(term, matches = matches.len(), "Search completed");

        if matches.is_empty() && self.empty_result_is_error {
            return Err(Error::NoSearchMatches(term.to_string()));
        }

        let total = matches.len();
        Ok(SearchResults { matches, total })
    }
}
