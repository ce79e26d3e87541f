//! Question listing and mutation operations

use serde::{Deserialize, Serialize};

use super::QuestionView;
use crate::bank::{Category, CategoryRepository, NewQuestion, QuestionRepository};
use crate::paging::paginate;
use crate::storage::Database;
use crate::{Error, Result};

/// One page of questions plus listing context
#[derive(Debug, Clone, Serialize)]
pub struct QuestionPage {
    pub questions: Vec<QuestionView>,
    pub total_questions: usize,
    pub categories: Vec<Category>,
}

/// Outcome of a create: the new id plus the refreshed page
#[derive(Debug, Clone, Serialize)]
pub struct CreatedQuestion {
    pub created: i64,
    pub questions: Vec<QuestionView>,
    pub total_questions: usize,
}

/// Outcome of a delete: the removed id plus the refreshed page
#[derive(Debug, Clone, Serialize)]
pub struct DeletedQuestion {
    pub deleted: i64,
    pub questions: Vec<QuestionView>,
    pub total_questions: usize,
}

/// Create request with every field optional so absence is reportable
#[derive(Debug, Clone, Default, Deserialize)]
pub struct CreateQuestionRequest {
    pub question: Option<String>,
    pub answer: Option<String>,
    pub category: Option<i64>,
    pub difficulty: Option<i64>,
}

impl CreateQuestionRequest {
    /// All four fields are required; absence is a validation error,
    /// never a silent null insert.
    fn into_new_question(self) -> Result<NewQuestion> {
        Ok(NewQuestion {
            question: self.question.ok_or(Error::MissingField("question"))?,
            answer: self.answer.ok_or(Error::MissingField("answer"))?,
            category: self.category.ok_or(Error::MissingField("category"))?,
            difficulty: self.difficulty.ok_or(Error::MissingField("difficulty"))?,
        })
    }
}

/// List stored questions, paged, with totals and the category directory.
///
/// An empty page (store empty, or page beyond range) is a NotFound outcome.
pub async fn list_questions(db: &Database, page: u32, page_size: usize) -> Result<QuestionPage> {
    let all = QuestionRepository::new(db).list().await?;
    let slice = paginate(&all, page, page_size);
    if slice.is_empty() {
        return Err(Error::PageNotFound(page));
    }

    let categories = CategoryRepository::new(db).list().await?;
    Ok(QuestionPage {
        questions: slice.iter().map(QuestionView::from).collect(),
        total_questions: all.len(),
        categories,
    })
}

/// Create a question and return the refreshed page.
pub async fn create_question(
    db: &Database,
    request: CreateQuestionRequest,
    page: u32,
    page_size: usize,
) -> Result<CreatedQuestion> {
    let new = request.into_new_question()?;
    let repo = QuestionRepository::new(db);
    let created = repo.create(&new).await?;

    let all = repo.list().await?;
    Ok(CreatedQuestion {
        created: created.id,
        questions: paginate(&all, page, page_size)
            .iter()
            .map(QuestionView::from)
            .collect(),
        total_questions: all.len(),
    })
}

/// Delete a question by id and return the refreshed page.
pub async fn delete_question(
    db: &Database,
    id: i64,
    page: u32,
    page_size: usize,
) -> Result<DeletedQuestion> {
    let repo = QuestionRepository::new(db);
    repo.delete_by_id(id).await?;

    let all = repo.list().await?;
    Ok(DeletedQuestion {
        deleted: id,
        questions: paginate(&all, page, page_size)
            .iter()
            .map(QuestionView::from)
            .collect(),
        total_questions: all.len(),
    })
}
