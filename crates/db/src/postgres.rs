use async_trait::async_trait;
use catdb_core::cat::{Cat, NewCat};
use catdb_core::types::CatId;

use crate::repositories::CatRepo;
use crate::store::{check, not_found, CatStore, StoreResult};
use crate::DbPool;

/// [`CatStore`] backed by the `cats` table.
#[derive(Clone)]
pub struct PgCatStore {
    pool: DbPool,
}

impl PgCatStore {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }

    pub fn pool(&self) -> &DbPool {
        &self.pool
    }
}

#[async_trait]
impl CatStore for PgCatStore {
    async fn list(&self) -> StoreResult<Vec<Cat>> {
        let rows = CatRepo::list(&self.pool).await?;
        let cats = rows
            .into_iter()
            .map(Cat::try_from)
            .collect::<Result<Vec<_>, _>>()?;
        Ok(cats)
    }

    async fn find(&self, id: CatId) -> StoreResult<Option<Cat>> {
        match CatRepo::find_by_id(&self.pool, id).await? {
            Some(row) => Ok(Some(Cat::try_from(row)?)),
            None => Ok(None),
        }
    }

    async fn create(&self, input: &NewCat) -> StoreResult<Cat> {
        check(input)?;
        let row = CatRepo::create(&self.pool, CatId::now_v7(), input).await?;
        Ok(Cat::try_from(row)?)
    }

    async fn update(&self, id: CatId, input: &NewCat) -> StoreResult<Cat> {
        if !CatRepo::exists(&self.pool, id).await? {
            return Err(not_found(id));
        }
        check(input)?;
        // The row can vanish between the existence check and the write.
        let row = CatRepo::replace(&self.pool, id, input)
            .await?
            .ok_or_else(|| not_found(id))?;
        Ok(Cat::try_from(row)?)
    }

    async fn delete(&self, id: CatId) -> StoreResult<bool> {
        Ok(CatRepo::delete(&self.pool, id).await?)
    }

    async fn health_check(&self) -> StoreResult<()> {
        Ok(crate::health_check(&self.pool).await?)
    }
}
