//! Quiz draw operation
//!
//! Parses the wire-shaped quiz payload and runs one draw. A missing or
//! non-integer category id is a BadRequest, kept strictly apart from the
//! exhaustion outcome (`question: None`), because the two call for
//! different recovery actions: fix the payload vs. end the session.

use std::collections::HashSet;

use serde::{Deserialize, Serialize};

use super::QuestionView;
use crate::quiz::{CategorySelector, QuizSelector};
use crate::storage::Database;
use crate::{Error, Result};

/// Wire payload for a quiz draw
#[derive(Debug, Clone, Default, Deserialize)]
pub struct QuizRequest {
    #[serde(default)]
    pub previous_questions: Vec<i64>,
    pub quiz_category: Option<QuizCategoryPayload>,
}

/// The category selector as it arrives off the wire.
///
/// `id` is raw JSON so a non-integer value can be rejected rather than
/// silently coerced; id 0 means "all categories".
#[derive(Debug, Clone, Deserialize)]
pub struct QuizCategoryPayload {
    #[serde(default)]
    pub id: Option<serde_json::Value>,
    #[serde(default, rename = "type")]
    pub label: Option<String>,
}

/// Outcome of a quiz draw; `None` signals exhaustion
#[derive(Debug, Clone, Serialize)]
pub struct QuizDraw {
    pub question: Option<QuestionView>,
}

/// Validate the wire selector into a `CategorySelector`.
fn parse_selector(payload: Option<&QuizCategoryPayload>) -> Result<CategorySelector> {
    let payload = payload.ok_or_else(|| {
        Error::InvalidCategorySelector("quiz_category is missing".to_string())
    })?;
    let id = payload.id.as_ref().ok_or_else(|| {
        Error::InvalidCategorySelector("quiz_category.id is missing".to_string())
    })?;
    let id = id.as_i64().ok_or_else(|| {
        Error::InvalidCategorySelector(format!("quiz_category.id is not an integer: {}", id))
    })?;
    Ok(CategorySelector::from_wire_id(id))
}

/// Draw the next quiz question, avoiding previously served ids.
pub async fn next_question(db: &Database, request: QuizRequest) -> Result<QuizDraw> {
    let selector = parse_selector(request.quiz_category.as_ref())?;
    let previous: HashSet<i64> = request.previous_questions.iter().copied().collect();

    let question = QuizSelector::new().draw(db, selector, &previous).await?;
    Ok(QuizDraw {
        question: question.map(QuestionView::from),
    })
}
