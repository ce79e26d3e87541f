//! Category operations
//!
//! Listing the category directory and resolving questions for a
//! client-facing category index.

use serde::Serialize;

use super::QuestionView;
use crate::bank::{
    client_category_to_stored, Category, CategoryRepository, QuestionFilter, QuestionRepository,
};
use crate::paging::paginate;
use crate::storage::Database;
use crate::{Error, Result};

/// The category directory
#[derive(Debug, Clone, Serialize)]
pub struct CategoryList {
    pub categories: Vec<Category>,
}

/// Questions resolved for one category
#[derive(Debug, Clone, Serialize)]
pub struct CategoryQuestions {
    pub questions: Vec<QuestionView>,
    pub total_questions: usize,
    /// The stored category id actually used for filtering
    pub current_category: i64,
}

/// List all categories. An empty directory is a client-visible fault.
pub async fn list_categories(db: &Database) -> Result<CategoryList> {
    let categories = CategoryRepository::new(db).list().await?;
    if categories.is_empty() {
        return Err(Error::NoCategories);
    }
    Ok(CategoryList { categories })
}

/// Resolve questions for a client-facing category index, paged.
///
/// The index is remapped to a stored id via `client_category_to_stored`;
/// the response reports the resolved id so clients can tell what was
/// actually filtered on.
pub async fn questions_by_category(
    db: &Database,
    client_id: i64,
    page: u32,
    page_size: usize,
) -> Result<CategoryQuestions> {
    let stored = client_category_to_stored(client_id);

    if !CategoryRepository::new(db).exists(stored).await? {
        return Err(Error::CategoryNotFound(stored));
    }

    let matches = QuestionRepository::new(db)
        .find(&QuestionFilter::default().category(stored))
        .await?;
    if matches.is_empty() {
        return Err(Error::NoQuestionsInCategory(stored));
    }

    let slice = paginate(&matches, page, page_size);
    if slice.is_empty() {
        return Err(Error::PageNotFound(page));
    }

    Ok(CategoryQuestions {
        questions: slice.iter().map(QuestionView::from).collect(),
        total_questions: matches.len(),
        current_category: stored,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::bank::NewQuestion;
    use crate::error::ErrorKind;

    async fn seeded_db() -> Database {
        let db = Database::in_memory().await.expect("Failed to create database");
        let repo = QuestionRepository::new(&db);
        // Three questions in stored category 2 (Art)
        for text in ["art a", "art b", "art c"] {
            repo.create(&NewQuestion {
                question: text.to_string(),
                answer: "a".to_string(),
                category: 2,
                difficulty: 1,
            })
            .await
            .unwrap();
        }
        db
    }

    #[tokio::test]
    async fn test_list_categories() {
        let db = seeded_db().await;
        let result = list_categories(&db).await.unwrap();
        assert_eq!(result.categories.len(), 6);
    }

    #[tokio::test]
    async fn test_client_index_resolves_with_offset() {
        let db = seeded_db().await;

        // Client-facing index 1 resolves to stored category 2
        let result = questions_by_category(&db, 1, 1, 10).await.unwrap();
        assert_eq!(result.current_category, 2);
        assert_eq!(result.total_questions, 3);
        assert_eq!(result.questions.len(), 3);
        assert!(result.questions.iter().all(|q| q.category == 2));
    }

    #[tokio::test]
    async fn test_unknown_category_is_not_found() {
        let db = seeded_db().await;
        let err = questions_by_category(&db, 99, 1, 10).await.unwrap_err();
        assert_eq!(err.kind(), ErrorKind::NotFound);
        assert!(matches!(err, Error::CategoryNotFound(100)));
    }

    #[tokio::test]
    async fn test_category_without_questions_is_distinct_not_found() {
        let db = seeded_db().await;
        // Client index 0 -> stored 1 (Science), which has no questions
        let err = questions_by_category(&db, 0, 1, 10).await.unwrap_err();
        assert!(matches!(err, Error::NoQuestionsInCategory(1)));
        assert_eq!(err.kind(), ErrorKind::NotFound);
    }

    #[tokio::test]
    async fn test_page_beyond_category_matches() {
        let db = seeded_db().await;
        let err = questions_by_category(&db, 1, 5, 10).await.unwrap_err();
        assert!(matches!(err, Error::PageNotFound(5)));
    }
}
