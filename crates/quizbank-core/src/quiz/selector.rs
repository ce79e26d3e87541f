//! Random quiz question selection
//!
//! Each call draws uniformly from the eligible set: questions matching the
//! requested category (or all of them) minus the ids the session has
//! already seen. Exhaustion of the eligible set is a normal terminal state
//! of a quiz session, reported as `Ok(None)` and kept strictly apart from
//! client errors such as an unknown category.
//!
//! Session state (`previous` ids) is caller-held; the selector keeps no
//! state between calls beyond its RNG.

use std::collections::HashSet;

use rand::prelude::*;

use crate::bank::{CategoryRepository, Question, QuestionFilter, QuestionRepository};
use crate::storage::Database;
use crate::{Error, Result};

/// Which categories a quiz draw may pull from
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CategorySelector {
    /// Draw from every category
    Any,
    /// Draw only from the given stored category id
    Id(i64),
}

impl CategorySelector {
    /// Build a selector from a raw wire id, where 0 means "all categories".
    pub fn from_wire_id(id: i64) -> Self {
        if id == 0 {
            CategorySelector::Any
        } else {
            CategorySelector::Id(id)
        }
    }
}

/// Random question selector for quiz sessions
#[derive(Debug)]
pub struct QuizSelector {
    rng: StdRng,
}

impl Default for QuizSelector {
    fn default() -> Self {
        Self::new()
    }
}

impl QuizSelector {
    /// Create a selector seeded from system entropy
    pub fn new() -> Self {
        Self {
            rng: StdRng::from_entropy(),
        }
    }

    /// Create a selector with a fixed seed (for reproducibility in tests)
    pub fn with_seed(seed: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
        }
    }

    /// Draw one eligible question at random, or report exhaustion.
    ///
    /// For a specific category the category must exist; an unknown id is a
    /// client error, not exhaustion. `Ok(None)` means the eligible set is
    /// empty and the quiz session is complete.
    pub async fn draw(
        &mut self,
        db: &Database,
        selector: CategorySelector,
        previous: &HashSet<i64>,
    ) -> Result<Option<Question>> {
        let mut filter = QuestionFilter::default().excluding(previous.iter().copied());

        if let CategorySelector::Id(category) = selector {
            let categories = CategoryRepository::new(db);
            if !categories.exists(category).await? {
                return Err(Error::CategoryNotFound(category));
            }
            filter = filter.category(category);
        }

        let eligible = QuestionRepository::new(db).find(&filter).await?;
        tracing::debug!(
            eligible = eligible.len(),
            excluded = previous.len(),
            ?selector,
            "Quiz draw"
        );

        // choose() returns None exactly when the eligible set is empty
        Ok(eligible.choose(&mut self.rng).cloned())
    }
}
