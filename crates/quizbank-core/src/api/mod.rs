//! DTO api
//!
//! High-level async functions over the question bank for frontends (the
//! CLI, or a future transport layer). Functions take a `&Database` handle
//! and translate domain types to wire-shaped DTOs. This is the only layer
//! that turns an empty page into a NotFound outcome; slicing itself stays
//! pure in `paging`.

pub mod categories;
pub mod questions;
pub mod quiz;
pub mod search;

use serde::{Deserialize, Serialize};

use crate::bank::Question;

/// Formatted question view: the wire shape of a stored question.
///
/// Deliberately excludes bookkeeping fields like `created_at`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct QuestionView {
    pub id: i64,
    pub question: String,
    pub answer: String,
    pub category: i64,
    pub difficulty: i64,
}

impl From<Question> for QuestionView {
    fn from(q: Question) -> Self {
        Self {
            id: q.id,
            question: q.question,
            answer: q.answer,
            category: q.category,
            difficulty: q.difficulty,
        }
    }
}

impl From<&Question> for QuestionView {
    fn from(q: &Question) -> Self {
        Self {
            id: q.id,
            question: q.question.clone(),
            answer: q.answer.clone(),
            category: q.category,
            difficulty: q.difficulty,
        }
    }
}
