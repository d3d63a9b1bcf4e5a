//! The record store contract.

use async_trait::async_trait;
use catdb_core::cat::{Cat, NewCat};
use catdb_core::error::CoreError;
use catdb_core::types::CatId;

/// Errors a store operation can produce.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    /// Validation failures and missing records.
    #[error(transparent)]
    Core(#[from] CoreError),

    /// The backing database failed or is unreachable.
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),
}

pub type StoreResult<T> = Result<T, StoreError>;

/// Durable storage and schema enforcement for cat records.
///
/// Implementations validate every write with [`NewCat::check`] and never
/// touch existing records when validation fails.
#[async_trait]
pub trait CatStore: Send + Sync {
    /// All records, oldest first.
    async fn list(&self) -> StoreResult<Vec<Cat>>;

    async fn find(&self, id: CatId) -> StoreResult<Option<Cat>>;

    /// Assign a fresh id, set `revision = 0` and persist.
    async fn create(&self, input: &NewCat) -> StoreResult<Cat>;

    /// Replace every caller-supplied field and bump `revision` by one.
    ///
    /// Fails with [`CoreError::NotFound`] before validating when `id` is
    /// absent.
    async fn update(&self, id: CatId, input: &NewCat) -> StoreResult<Cat>;

    /// Remove a record permanently. Returns `false` if nothing was removed.
    async fn delete(&self, id: CatId) -> StoreResult<bool>;

    /// Confirm the backend can serve requests.
    async fn health_check(&self) -> StoreResult<()>;
}

/// Build the not-found error for a cat id.
pub fn not_found(id: CatId) -> StoreError {
    StoreError::Core(CoreError::NotFound {
        entity: catdb_core::cat::ENTITY,
        id: id.to_string(),
    })
}

/// Run the constraint pass, mapping failures to a store error.
pub(crate) fn check(input: &NewCat) -> StoreResult<()> {
    input
        .check()
        .map_err(|errors| StoreError::Core(CoreError::Validation(errors)))
}
