//! Category directory
//!
//! Read-only lookup of category id -> display label. Seeding is a
//! migration concern; the core never writes this table.

use crate::storage::Database;
use crate::Result;
use serde::{Deserialize, Serialize};
use sqlx::Row;

/// A question category
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Category {
    /// Unique category identifier
    pub id: i64,
    /// Display label
    #[serde(rename = "type")]
    pub label: String,
}

/// Translate a client-facing category index to a stored category id.
///
/// The category list shown to clients is zero-indexed while stored ids
/// start at 1, so the resolved id is the requested index plus one. This
/// offset is part of the external contract and must not change without
/// coordinating with clients.
pub fn client_category_to_stored(client_id: i64) -> i64 {
    client_id + 1
}

/// Category repository for read-only database operations
pub struct CategoryRepository<'a> {
    db: &'a Database,
}

impl<'a> CategoryRepository<'a> {
    /// Create a new category repository
    pub fn new(db: &'a Database) -> Self {
        Self { db }
    }

    /// List all categories ordered by id
    pub async fn list(&self) -> Result<Vec<Category>> {
        let rows = sqlx::query("SELECT id, type FROM categories ORDER BY id")
            .fetch_all(self.db.pool())
            .await?;

        Ok(rows
            .into_iter()
            .map(|row| Category {
                id: row.get("id"),
                label: row.get("type"),
            })
            .collect())
    }

    /// Get a category by id
    pub async fn get(&self, id: i64) -> Result<Option<Category>> {
        let row = sqlx::query("SELECT id, type FROM categories WHERE id = ?")
            .bind(id)
            .fetch_optional(self.db.pool())
            .await?;

        Ok(row.map(|r| Category {
            id: r.get("id"),
            label: r.get("type"),
        }))
    }

    /// Check if a category exists
    pub async fn exists(&self, id: i64) -> Result<bool> {
        let row: Option<(i32,)> = sqlx::query_as("SELECT 1 FROM categories WHERE id = ?")
            .bind(id)
            .fetch_optional(self.db.pool())
            .await?;

        Ok(row.is_some())
    }

    /// Count all categories
    pub async fn count(&self) -> Result<i64> {
        let (count,): (i64,) = sqlx::query_as("SELECT COUNT(*) FROM categories")
            .fetch_one(self.db.pool())
            .await?;
        Ok(count)
    }
}
