//! Row types for the `cats` table.

use catdb_core::cat::{Cat, Gender};
use catdb_core::error::CoreError;
use catdb_core::types::{CatId, Timestamp};
use sqlx::FromRow;

/// A row from the `cats` table. `gender` is stored as text and checked by
/// the table constraint.
#[derive(Debug, Clone, FromRow)]
pub struct CatRow {
    pub id: CatId,
    pub name: String,
    pub age: i32,
    pub gender: String,
    pub breed: String,
    pub image_url: Option<String>,
    pub revision: i32,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

impl TryFrom<CatRow> for Cat {
    type Error = CoreError;

    fn try_from(row: CatRow) -> Result<Self, Self::Error> {
        let gender: Gender = row
            .gender
            .parse()
            .map_err(|e| CoreError::Internal(format!("cat {}: {e}", row.id)))?;

        Ok(Cat {
            id: row.id,
            name: row.name,
            age: row.age,
            gender,
            breed: row.breed,
            image_url: row.image_url,
            revision: row.revision,
            created_at: row.created_at,
            updated_at: row.updated_at,
        })
    }
}
