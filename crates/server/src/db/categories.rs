//! Category repository for database operations.
//!
//! Categories are append-only: there is no delete or rename. The canonical
//! name column carries a unique constraint, which the lookup-or-create path
//! leans on to resolve concurrent inserts of the same new name.

use sqlx::SqlitePool;

use palengke_core::{CategoryId, CategoryName};

use super::RepositoryError;
use crate::models::Category;

/// Internal row type for category queries.
#[derive(Debug, sqlx::FromRow)]
struct CategoryRow {
    id: CategoryId,
    name: CategoryName,
}

impl From<CategoryRow> for Category {
    fn from(row: CategoryRow) -> Self {
        Self {
            id: row.id,
            name: row.name,
        }
    }
}

/// Repository for category database operations.
pub struct CategoryRepository<'a> {
    pool: &'a SqlitePool,
}

impl<'a> CategoryRepository<'a> {
    /// Create a new category repository.
    #[must_use]
    pub const fn new(pool: &'a SqlitePool) -> Self {
        Self { pool }
    }

    /// Get a category by its canonical name.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn get_by_name(
        &self,
        name: &CategoryName,
    ) -> Result<Option<Category>, RepositoryError> {
        let row = sqlx::query_as::<_, CategoryRow>("SELECT id, name FROM categories WHERE name = ?")
            .bind(name)
            .fetch_optional(self.pool)
            .await?;

        Ok(row.map(Into::into))
    }

    /// Get the category with this canonical name, creating it if missing.
    ///
    /// The lookup-then-insert is not atomic. When two requests race on the
    /// same new name, the loser's insert hits the unique constraint; it then
    /// re-fetches and returns the winner's row instead of failing.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if a query fails.
    pub async fn get_or_create(&self, name: &CategoryName) -> Result<Category, RepositoryError> {
        if let Some(existing) = self.get_by_name(name).await? {
            return Ok(existing);
        }

        let inserted = sqlx::query_as::<_, CategoryRow>(
            "INSERT INTO categories (name) VALUES (?) RETURNING id, name",
        )
        .bind(name)
        .fetch_one(self.pool)
        .await;

        match inserted {
            Ok(row) => Ok(row.into()),
            Err(sqlx::Error::Database(db_err)) if db_err.is_unique_violation() => {
                // Lost the race; the row exists now.
                self.get_by_name(name)
                    .await?
                    .ok_or_else(|| RepositoryError::Conflict("category vanished".to_owned()))
            }
            Err(e) => Err(RepositoryError::Database(e)),
        }
    }
}
