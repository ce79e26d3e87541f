//! Quiz selection engine
//!
//! Draws one eligible question at random for a quiz session, honoring a
//! category constraint and a caller-held exclusion history.

pub mod selector;

pub use selector::{CategorySelector, QuizSelector};
