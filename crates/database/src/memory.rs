use crate::{ConcernField, ConcernStore, DbError};
use async_trait::async_trait;
use core_types::{Concern, NewConcern};
use tokio::sync::RwLock;
use uuid::Uuid;

/// A process-local `ConcernStore` that keeps records in insertion order.
///
/// Nothing survives a restart. Used by the test suites and by `--store memory`.
#[derive(Debug, Default)]
pub struct InMemoryConcernStore {
    records: RwLock<Vec<Concern>>,
}

impl InMemoryConcernStore {
    pub fn new() -> Self {
        Self::default()
    }

    async fn upsert(&self, concern: Concern) -> Concern {
        let mut records = self.records.write().await;
        match records.iter_mut().find(|c| c.id == concern.id) {
            Some(existing) => *existing = concern.clone(),
            None => records.push(concern.clone()),
        }
        concern
    }
}

#[async_trait]
impl ConcernStore for InMemoryConcernStore {
    async fn insert(&self, new: NewConcern) -> Result<Concern, DbError> {
        let id = new.id.unwrap_or_else(Uuid::new_v4);
        Ok(self.upsert(Concern::from_new(id, new)).await)
    }

    async fn save(&self, concern: Concern) -> Result<Concern, DbError> {
        Ok(self.upsert(concern).await)
    }

    async fn find_by_id(&self, id: Uuid) -> Result<Option<Concern>, DbError> {
        let records = self.records.read().await;
        Ok(records.iter().find(|c| c.id == id).cloned())
    }

    async fn find_all(&self) -> Result<Vec<Concern>, DbError> {
        Ok(self.records.read().await.clone())
    }

    async fn find_by_field(&self, field: ConcernField, value: &str) -> Result<Vec<Concern>, DbError> {
        let records = self.records.read().await;
        Ok(records
            .iter()
            .filter(|c| field.value_of(c) == value)
            .cloned()
            .collect())
    }

    async fn exists_by_id(&self, id: Uuid) -> Result<bool, DbError> {
        Ok(self.records.read().await.iter().any(|c| c.id == id))
    }

    async fn delete_by_id(&self, id: Uuid) -> Result<(), DbError> {
        self.records.write().await.retain(|c| c.id != id);
        Ok(())
    }
}
