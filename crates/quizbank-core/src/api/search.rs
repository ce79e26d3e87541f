//! Search operation

use serde::{Deserialize, Serialize};

use super::QuestionView;
use crate::paging::paginate;
use crate::search::SearchService;
use crate::storage::Database;
use crate::{Error, Result};

/// Search request; a missing term matches every question
#[derive(Debug, Clone, Default, Deserialize)]
pub struct SearchRequest {
    #[serde(rename = "searchTerm")]
    pub search_term: Option<String>,
}

/// One page of search results
#[derive(Debug, Clone, Serialize)]
pub struct SearchPage {
    pub questions: Vec<QuestionView>,
    pub total_questions: usize,
}

/// Search question text, paged.
///
/// Zero matches is an Unprocessable outcome under the given policy; a page
/// beyond the match set is NotFound.
pub async fn search_questions(
    db: &Database,
    request: SearchRequest,
    page: u32,
    page_size: usize,
    empty_result_is_error: bool,
) -> Result<SearchPage> {
    let term = request.search_term.unwrap_or_default();
    let results = SearchService::new(db)
        .empty_result_is_error(empty_result_is_error)
        .search(&term)
        .await?;

    if results.matches.is_empty() {
        // Zero matches with the lenient policy: an empty success
        return Ok(SearchPage {
            questions: Vec::new(),
            total_questions: 0,
        });
    }

    let slice = paginate(&results.matches, page, page_size);
    if slice.is_empty() {
        return Err(Error::PageNotFound(page));
    }

    Ok(SearchPage {
        questions: slice.iter().map(QuestionView::from).collect(),
        total_questions: results.total,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::bank::{NewQuestion, QuestionRepository};
    use crate::error::ErrorKind;

    async fn seeded_db() -> Database {
        let db = Database::in_memory().await.expect("Failed to create database");
        let repo = QuestionRepository::new(&db);
        for i in 0..12 {
            repo.create(&NewQuestion {
                question: format!("What is fact number {}?", i),
                answer: "a".to_string(),
                category: 1,
                difficulty: 1,
            })
            .await
            .unwrap();
        }
        db
    }

    fn request(term: &str) -> SearchRequest {
        SearchRequest {
            search_term: Some(term.to_string()),
        }
    }

    #[tokio::test]
    async fn test_search_pages_results() {
        let db = seeded_db().await;
        let result = search_questions(&db, request("fact"), 1, 10, true).await.unwrap();
        assert_eq!(result.questions.len(), 10);
        assert_eq!(result.total_questions, 12);

        let result = search_questions(&db, request("fact"), 2, 10, true).await.unwrap();
        assert_eq!(result.questions.len(), 2);
    }

    #[tokio::test]
    async fn test_missing_term_matches_everything() {
        let db = seeded_db().await;
        let result = search_questions(&db, SearchRequest::default(), 1, 10, true)
            .await
            .unwrap();
        assert_eq!(result.total_questions, 12);
    }

    #[tokio::test]
    async fn test_zero_matches_is_error_by_default_policy() {
        let db = seeded_db().await;
        let err = search_questions(&db, request("xyzzy"), 1, 10, true).await.unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Unprocessable);
    }

    #[tokio::test]
    async fn test_zero_matches_with_lenient_policy() {
        let db = seeded_db().await;
        let result = search_questions(&db, request("xyzzy"), 1, 10, false).await.unwrap();
        assert_eq!(result.total_questions, 0);
        assert!(result.questions.is_empty());
    }

    #[tokio::test]
    async fn test_page_beyond_matches_is_not_found() {
        let db = seeded_db().await;
        let err = search_questions(&db, request("fact"), 9, 10, true).await.unwrap_err();
        assert!(matches!(err, Error::PageNotFound(9)));
    }
}
