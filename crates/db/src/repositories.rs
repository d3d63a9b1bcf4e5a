//! Repository for the `cats` table.
//!
//! A zero-sized struct providing async CRUD methods that accept `&PgPool`
//! as the first argument. Callers validate input first; the table
//! constraints are the last line.

use catdb_core::cat::NewCat;
use catdb_core::types::CatId;
use sqlx::PgPool;

use crate::models::CatRow;

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str =
    "id, name, age, gender, breed, image_url, revision, created_at, updated_at";

/// Provides CRUD operations for cats.
pub struct CatRepo;

impl CatRepo {
    /// All cats in insertion order.
    pub async fn list(pool: &PgPool) -> Result<Vec<CatRow>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM cats ORDER BY created_at, id");
        sqlx::query_as::<_, CatRow>(&query).fetch_all(pool).await
    }

    pub async fn find_by_id(pool: &PgPool, id: CatId) -> Result<Option<CatRow>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM cats WHERE id = $1");
        sqlx::query_as::<_, CatRow>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// Insert a new cat with `revision = 0`, returning the created row.
    pub async fn create(pool: &PgPool, id: CatId, input: &NewCat) -> Result<CatRow, sqlx::Error> {
        let query = format!(
            "INSERT INTO cats (id, name, age, gender, breed, image_url, revision)
             VALUES ($1, $2, $3, $4, $5, $6, 0)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, CatRow>(&query)
            .bind(id)
            .bind(&input.name)
            .bind(input.age)
            .bind(input.gender.as_str())
            .bind(&input.breed)
            .bind(&input.image_url)
            .fetch_one(pool)
            .await
    }

    /// Replace every caller-supplied column and bump `revision`.
    ///
    /// Returns `None` if no row with the given `id` exists.
    pub async fn replace(
        pool: &PgPool,
        id: CatId,
        input: &NewCat,
    ) -> Result<Option<CatRow>, sqlx::Error> {
        let query = format!(
            "UPDATE cats SET
                name = $2,
                age = $3,
                gender = $4,
                breed = $5,
                image_url = $6,
                revision = revision + 1,
                updated_at = now()
             WHERE id = $1
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, CatRow>(&query)
            .bind(id)
            .bind(&input.name)
            .bind(input.age)
            .bind(input.gender.as_str())
            .bind(&input.breed)
            .bind(&input.image_url)
            .fetch_optional(pool)
            .await
    }

    /// Delete a cat by ID. Returns `true` if a row was removed.
    pub async fn delete(pool: &PgPool, id: CatId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM cats WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }

    pub async fn exists(pool: &PgPool, id: CatId) -> Result<bool, sqlx::Error> {
        let (exists,): (bool,) = sqlx::query_as("SELECT EXISTS(SELECT 1 FROM cats WHERE id = $1)")
            .bind(id)
            .fetch_one(pool)
            .await?;
        Ok(exists)
    }
}
