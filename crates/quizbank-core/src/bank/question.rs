//! Question records and repository
//!
//! Provides CRUD and query operations over stored trivia questions.

use crate::storage::Database;
use crate::{Error, Result};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::{QueryBuilder, Row, Sqlite};

/// A stored trivia question
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Question {
    /// Unique identifier, assigned by the store on creation
    pub id: i64,
    /// Question text
    pub question: String,
    /// Answer text
    pub answer: String,
    /// Stored category id
    pub category: i64,
    /// Difficulty rating (opaque, no enforced range)
    pub difficulty: i64,
    /// When the question was created
    pub created_at: DateTime<Utc>,
}

/// Fields for a question that has not been stored yet
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewQuestion {
    pub question: String,
    pub answer: String,
    pub category: i64,
    pub difficulty: i64,
}

impl NewQuestion {
    /// Reject blank question or answer text.
    pub fn validate(&self) -> Result<()> {
        if self.question.trim().is_empty() {
            return Err(Error::InvalidField("question"));
        }
        if self.answer.trim().is_empty() {
            return Err(Error::InvalidField("answer"));
        }
        Ok(())
    }
}

/// Composable question predicate: category match plus id exclusion.
///
/// Both constraints are optional; an empty filter selects every question.
#[derive(Debug, Clone, Default)]
pub struct QuestionFilter {
    /// Restrict to this stored category id
    pub category: Option<i64>,
    /// Exclude these question ids
    pub exclude: Vec<i64>,
}

impl QuestionFilter {
    /// Restrict the filter to a stored category id
    pub fn category(mut self, category: i64) -> Self {
        self.category = Some(category);
        self
    }

    /// Exclude the given question ids
    pub fn excluding(mut self, ids: impl IntoIterator<Item = i64>) -> Self {
        self.exclude = ids.into_iter().collect();
        self
    }
}

/// Question repository for database operations
pub struct QuestionRepository<'a> {
    db: &'a Database,
}

impl<'a> QuestionRepository<'a> {
    /// Create a new question repository
    pub fn new(db: &'a Database) -> Self {
        Self { db }
    }

    /// List all questions ordered by id ascending
    pub async fn list(&self) -> Result<Vec<Question>> {
        let rows = sqlx::query(
            "SELECT id, question, answer, category, difficulty, created_at FROM questions ORDER BY id",
        )
        .fetch_all(self.db.pool())
        .await?;

        Ok(rows.into_iter().map(row_to_question).collect())
    }

    /// Count all stored questions
    pub async fn count(&self) -> Result<i64> {
        let (count,): (i64,) = sqlx::query_as("SELECT COUNT(*) FROM questions")
            .fetch_one(self.db.pool())
            .await?;
        Ok(count)
    }

    /// Get a question by id
    pub async fn get(&self, id: i64) -> Result<Option<Question>> {
        let row = sqlx::query(
            "SELECT id, question, answer, category, difficulty, created_at FROM questions WHERE id = ?",
        )
        .bind(id)
        .fetch_optional(self.db.pool())
        .await?;

        Ok(row.map(row_to_question))
    }

    /// Find questions whose text contains `term`, case-insensitively.
    ///
    /// An empty term matches every question. Results are ordered by id.
    pub async fn search(&self, term: &str) -> Result<Vec<Question>> {
        let pattern = format!("%{}%", term);
        let rows = sqlx::query(
            "SELECT id, question, answer, category, difficulty, created_at FROM questions WHERE question LIKE ? ORDER BY id",
        )
        .bind(pattern)
        .fetch_all(self.db.pool())
        .await?;

        Ok(rows.into_iter().map(row_to_question).collect())
    }

    /// Fetch questions matching the given filter, ordered by id.
    pub async fn find(&self, filter: &QuestionFilter) -> Result<Vec<Question>> {
        let mut builder: QueryBuilder<Sqlite> = QueryBuilder::new(
            "SELECT id, question, answer, category, difficulty, created_at FROM questions",
        );

        let mut has_where = false;
        if let Some(category) = filter.category {
            builder.push(" WHERE category = ").push_bind(category);
            has_where = true;
        }
        if !filter.exclude.is_empty() {
            builder.push(if has_where {
                " AND id NOT IN ("
            } else {
                " WHERE id NOT IN ("
            });
            let mut ids = builder.separated(", ");
            for id in &filter.exclude {
                ids.push_bind(*id);
            }
            ids.push_unseparated(")");
        }
        builder.push(" ORDER BY id");

        let rows = builder.build().fetch_all(self.db.pool()).await?;
        Ok(rows.into_iter().map(row_to_question).collect())
    }

    /// Insert a new question and return it with its store-assigned id
    pub async fn create(&self, new: &NewQuestion) -> Result<Question> {
        new.validate()?;

        let result = sqlx::query(
            "INSERT INTO questions (question, answer, category, difficulty) VALUES (?, ?, ?, ?)",
        )
        .bind(&new.question)
        .bind(&new.answer)
        .bind(new.category)
        .bind(new.difficulty)
        .execute(self.db.pool())
        .await?;

        let id = result.last_insert_rowid();
        tracing::debug!(id, category = new.category, "Question created");

        self.get(id).await?.ok_or(Error::QuestionNotFound(id))
    }

    /// Delete a question by id; fails with NotFound if no such id exists
    pub async fn delete_by_id(&self, id: i64) -> Result<()> {
        let result = sqlx::query("DELETE FROM questions WHERE id = ?")
            .bind(id)
            .execute(self.db.pool())
            .await?;

        if result.rows_affected() == 0 {
            return Err(Error::QuestionNotFound(id));
        }

        tracing::debug!(id, "Question deleted");
        Ok(())
    }
}

/// Convert a database row to a Question
fn row_to_question(row: sqlx::sqlite::SqliteRow) -> Question {
    Question {
        id: row.get("id"),
        question: row.get("question"),
        answer: row.get("answer"),
        category: row.get("category"),
        difficulty: row.get("difficulty"),
        created_at: row.get("created_at"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorKind;

    async fn test_db() -> Database {
        Database::in_memory()
            .await
            .expect("Failed to create database")
    }

    fn sample(question: &str, category: i64) -> NewQuestion {
        NewQuestion {
            question: question.to_string(),
            answer: "42".to_string(),
            category,
            difficulty: 1,
        }
    }

    #[tokio::test]
    async fn test_create_assigns_fresh_id() {
        let db = test_db().await;
        let repo = QuestionRepository::new(&db);

        let first = repo.create(&sample("What is the speed of light?", 1)).await.unwrap();
        let second = repo.create(&sample("Who painted the Mona Lisa?", 2)).await.unwrap();

        assert!(second.id > first.id);
        assert_eq!(second.question, "Who painted the Mona Lisa?");
        assert_eq!(second.category, 2);
    }

    #[tokio::test]
    async fn test_list_ordered_by_id() {
        let db = test_db().await;
        let repo = QuestionRepository::new(&db);

        repo.create(&sample("q one", 1)).await.unwrap();
        repo.create(&sample("q two", 2)).await.unwrap();
        repo.create(&sample("q three", 3)).await.unwrap();

        let all = repo.list().await.unwrap();
        assert_eq!(all.len(), 3);
        assert!(all.windows(2).all(|w| w[0].id < w[1].id));
        assert_eq!(repo.count().await.unwrap(), 3);
    }

    #[tokio::test]
    async fn test_created_question_lists_last() {
        let db = test_db().await;
        let repo = QuestionRepository::new(&db);

        repo.create(&sample("existing", 2)).await.unwrap();
        let created = repo
            .create(&NewQuestion {
                question: "Q".to_string(),
                answer: "A".to_string(),
                category: 2,
                difficulty: 1,
            })
            .await
            .unwrap();

        let all = repo.list().await.unwrap();
        assert_eq!(all.last().map(|q| q.id), Some(created.id));
    }

    #[tokio::test]
    async fn test_search_is_case_insensitive() {
        let db = test_db().await;
        let repo = QuestionRepository::new(&db);

        repo.create(&sample("Which planet is the largest?", 1)).await.unwrap();
        repo.create(&sample("Who discovered penicillin?", 1)).await.unwrap();

        let matches = repo.search("PLANET").await.unwrap();
        assert_eq!(matches.len(), 1);
        assert!(matches[0].question.contains("planet"));

        let matches = repo.search("title").await.unwrap();
        assert!(matches.is_empty());
    }

    #[tokio::test]
    async fn test_search_empty_term_matches_all() {
        let db = test_db().await;
        let repo = QuestionRepository::new(&db);

        repo.create(&sample("alpha", 1)).await.unwrap();
        repo.create(&sample("beta", 2)).await.unwrap();

        let matches = repo.search("").await.unwrap();
        assert_eq!(matches.len(), 2);
    }

    #[tokio::test]
    async fn test_find_by_category() {
        let db = test_db().await;
        let repo = QuestionRepository::new(&db);

        repo.create(&sample("science q", 1)).await.unwrap();
        repo.create(&sample("art q", 2)).await.unwrap();
        repo.create(&sample("another science q", 1)).await.unwrap();

        let science = repo.find(&QuestionFilter::default().category(1)).await.unwrap();
        assert_eq!(science.len(), 2);
        assert!(science.iter().all(|q| q.category == 1));
    }

    #[tokio::test]
    async fn test_find_excluding_ids() {
        let db = test_db().await;
        let repo = QuestionRepository::new(&db);

        let a = repo.create(&sample("a", 1)).await.unwrap();
        let b = repo.create(&sample("b", 1)).await.unwrap();
        let c = repo.create(&sample("c", 1)).await.unwrap();

        let found = repo
            .find(&QuestionFilter::default().excluding([a.id, c.id]))
            .await
            .unwrap();
        assert_eq!(found.len(), 1);
        assert_eq!(found[0].id, b.id);
    }

    #[tokio::test]
    async fn test_find_category_and_exclusion_compose() {
        let db = test_db().await;
        let repo = QuestionRepository::new(&db);

        let a = repo.create(&sample("a", 2)).await.unwrap();
        repo.create(&sample("b", 2)).await.unwrap();
        repo.create(&sample("c", 3)).await.unwrap();

        let found = repo
            .find(&QuestionFilter::default().category(2).excluding([a.id]))
            .await
            .unwrap();
        assert_eq!(found.len(), 1);
        assert_eq!(found[0].question, "b");
    }

    #[tokio::test]
    async fn test_empty_filter_selects_everything() {
        let db = test_db().await;
        let repo = QuestionRepository::new(&db);

        repo.create(&sample("a", 1)).await.unwrap();
        repo.create(&sample("b", 2)).await.unwrap();

        let found = repo.find(&QuestionFilter::default()).await.unwrap();
        assert_eq!(found.len(), 2);
    }

    #[tokio::test]
    async fn test_delete_then_delete_again_errors() {
        let db = test_db().await;
        let repo = QuestionRepository::new(&db);

        let q = repo.create(&sample("to be deleted", 1)).await.unwrap();

        repo.delete_by_id(q.id).await.expect("First delete should succeed");

        let err = repo.delete_by_id(q.id).await.unwrap_err();
        assert_eq!(err.kind(), ErrorKind::NotFound);
    }

    #[tokio::test]
    async fn test_delete_never_existing_id() {
        let db = test_db().await;
        let repo = QuestionRepository::new(&db);

        let err = repo.delete_by_id(12345).await.unwrap_err();
        assert!(matches!(err, Error::QuestionNotFound(12345)));
    }

    #[tokio::test]
    async fn test_blank_fields_rejected() {
        let db = test_db().await;
        let repo = QuestionRepository::new(&db);

        let err = repo.create(&sample("   ", 1)).await.unwrap_err();
        assert_eq!(err.kind(), ErrorKind::BadRequest);

        let err = repo
            .create(&NewQuestion {
                question: "valid".to_string(),
                answer: "".to_string(),
                category: 1,
                difficulty: 1,
            })
            .await
            .unwrap_err();
        assert!(matches!(err, Error::InvalidField("answer")));
    }

    #[tokio::test]
    async fn test_get_missing_returns_none() {
        let db = test_db().await;
        let repo = QuestionRepository::new(&db);

        assert!(repo.get(999).await.unwrap().is_none());
    }
}
