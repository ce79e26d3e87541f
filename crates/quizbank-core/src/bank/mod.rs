//! Question bank domain
//!
//! Questions, categories, and their repositories. All reads are fresh
//! queries against current state; nothing is cached between calls.

pub mod category;
pub mod question;

pub use category::{client_category_to_stored, Category, CategoryRepository};
pub use question::{NewQuestion, Question, QuestionFilter, QuestionRepository};
