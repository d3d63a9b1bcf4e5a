use async_trait::async_trait;
use catdb_core::cat::{Cat, NewCat};
use catdb_core::types::CatId;
use chrono::Utc;
use indexmap::IndexMap;
use tokio::sync::RwLock;

use crate::store::{check, not_found, CatStore, StoreResult};

/// In-process [`CatStore`]. Records live as long as the store does.
///
/// Each operation holds the lock for its whole duration, so a write is
/// atomic with respect to every other call.
#[derive(Default)]
pub struct MemoryCatStore {
    cats: RwLock<IndexMap<CatId, Cat>>,
}

impl MemoryCatStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn len(&self) -> usize {
        self.cats.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.cats.read().await.is_empty()
    }
}

#[async_trait]
impl CatStore for MemoryCatStore {
    async fn list(&self) -> StoreResult<Vec<Cat>> {
        Ok(self.cats.read().await.values().cloned().collect())
    }

    async fn find(&self, id: CatId) -> StoreResult<Option<Cat>> {
        Ok(self.cats.read().await.get(&id).cloned())
    }

    async fn create(&self, input: &NewCat) -> StoreResult<Cat> {
        check(input)?;
        let now = Utc::now();
        let cat = Cat {
            id: CatId::now_v7(),
            name: input.name.clone(),
            age: input.age,
            gender: input.gender,
            breed: input.breed.clone(),
            image_url: input.image_url.clone(),
            revision: 0,
            created_at: now,
            updated_at: now,
        };
        self.cats.write().await.insert(cat.id, cat.clone());
        Ok(cat)
    }

    async fn update(&self, id: CatId, input: &NewCat) -> StoreResult<Cat> {
        let mut cats = self.cats.write().await;
        let Some(existing) = cats.get_mut(&id) else {
            return Err(not_found(id));
        };
        check(input)?;

        existing.name = input.name.clone();
        existing.age = input.age;
        existing.gender = input.gender;
        existing.breed = input.breed.clone();
        existing.image_url = input.image_url.clone();
        existing.revision += 1;
        existing.updated_at = Utc::now();
        Ok(existing.clone())
    }

    async fn delete(&self, id: CatId) -> StoreResult<bool> {
        Ok(self.cats.write().await.shift_remove(&id).is_some())
    }

    async fn health_check(&self) -> StoreResult<()> {
        Ok(())
    }
}
