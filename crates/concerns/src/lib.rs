//! # Concerns Crate
//!
//! The service layer between the HTTP handlers and the record store. It
//! validates incoming payloads, applies the status default and turns missing
//! records into [`ServiceError::NotFound`].

use core_types::{Concern, ConcernPayload};
use database::ConcernStore;
use std::sync::Arc;
use uuid::Uuid;

pub mod error;

pub use error::ServiceError;

/// Orchestrates all concern operations over an injected [`ConcernStore`].
#[derive(Clone)]
pub struct ConcernService {
    store: Arc<dyn ConcernStore>,
}

impl ConcernService {
    pub fn new(store: Arc<dyn ConcernStore>) -> Self {
        Self { store }
    }

    /// Returns every concern, unfiltered.
    pub async fn list_all(&self) -> Result<Vec<Concern>, ServiceError> {
        let concerns = self.store.find_all().await?;
        tracing::debug!(count = concerns.len(), "Listed all concerns.");
        Ok(concerns)
    }

    /// Returns the concerns whose student name matches exactly.
    pub async fn list_by_student_name(&self, student_name: &str) -> Result<Vec<Concern>, ServiceError> {
        let concerns = self.store.find_by_student_name(student_name).await?;
        tracing::debug!(student_name, count = concerns.len(), "Listed concerns for student.");
        Ok(concerns)
    }

    pub async fn get(&self, id: Uuid) -> Result<Concern, ServiceError> {
        self.store.find_by_id(id).await?.ok_or_else(|| {
            tracing::warn!(%id, "Concern not found.");
            ServiceError::NotFound(id)
        })
    }

    /// Validates and stores a new concern.
    ///
    /// A missing status is stored as "Open"; a missing timestamp is set to now.
    pub async fn create(&self, payload: ConcernPayload) -> Result<Concern, ServiceError> {
        let new = payload.into_new_concern().inspect_err(|e| {
            tracing::warn!(error = %e, "Rejected concern.");
        })?;
        let created = self.store.insert(new).await?;
        tracing::info!(id = %created.id, status = %created.status, "Concern created.");
        Ok(created)
    }

    /// Overwrites the mutable fields of an existing concern.
    ///
    /// The stored id is kept whatever `payload.id` says. Missing text fields
    /// are stored as empty strings; only an unknown id fails.
    pub async fn update(&self, id: Uuid, payload: ConcernPayload) -> Result<Concern, ServiceError> {
        let mut existing = self.get(id).await?;
        existing.apply(payload.into_update());
        let updated = self.store.save(existing).await?;
        tracing::info!(%id, status = %updated.status, "Concern updated.");
        Ok(updated)
    }

    pub async fn delete(&self, id: Uuid) -> Result<(), ServiceError> {
        if !self.store.exists_by_id(id).await? {
            tracing::warn!(%id, "Concern not found for deletion.");
            return Err(ServiceError::NotFound(id));
        }
        self.store.delete_by_id(id).await?;
        tracing::info!(%id, "Concern deleted.");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use chrono::{TimeZone, Utc};
    use core_types::NewConcern;
    use database::{ConcernField, DbError, InMemoryConcernStore};

    fn service() -> ConcernService {
        ConcernService::new(Arc::new(InMemoryConcernStore::new()))
    }

    fn alice(status: Option<&str>) -> ConcernPayload {
        ConcernPayload {
            id: None,
            student_name: Some("Alice Johnson".to_string()),
            reported_by: Some("Teacher A".to_string()),
            description: Some("Bullying in class".to_string()),
            status: status.map(str::to_string),
            date_time: None,
        }
    }

    #[tokio::test]
    async fn create_keeps_supplied_status() {
        let created = service().create(alice(Some("In Progress"))).await.unwrap();
        assert_eq!(created.status, "In Progress");
    }

    #[tokio::test]
    async fn create_defaults_missing_or_blank_status() {
        let svc = service();
        assert_eq!(svc.create(alice(None)).await.unwrap().status, "Open");
        assert_eq!(svc.create(alice(Some("  "))).await.unwrap().status, "Open");
    }

    #[tokio::test]
    async fn create_rejects_missing_required_fields() {
        let svc = service();
        let strips: [fn(&mut ConcernPayload); 3] = [
            |p| p.student_name = None,
            |p| p.reported_by = None,
            |p| p.description = None,
        ];
        for strip in strips {
            let mut payload = alice(None);
            strip(&mut payload);
            let err = svc.create(payload).await.unwrap_err();
            assert!(matches!(err, ServiceError::InvalidInput(_)), "got {err:?}");
        }
        assert!(svc.list_all().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn create_stamps_time_unless_supplied() {
        let svc = service();
        let before = Utc::now();
        let stamped = svc.create(alice(None)).await.unwrap();
        assert!(stamped.date_time >= before);

        let reported_at = Utc.with_ymd_and_hms(2024, 11, 5, 14, 0, 0).unwrap();
        let mut payload = alice(None);
        payload.date_time = Some(reported_at);
        assert_eq!(svc.create(payload).await.unwrap().date_time, reported_at);
    }

    #[tokio::test]
    async fn get_returns_created_record() {
        let svc = service();
        let created = svc.create(alice(None)).await.unwrap();
        assert_eq!(svc.get(created.id).await.unwrap(), created);
    }

    #[tokio::test]
    async fn get_unknown_id_is_not_found() {
        let id = Uuid::new_v4();
        let err = service().get(id).await.unwrap_err();
        assert!(matches!(err, ServiceError::NotFound(missing) if missing == id));
    }

    #[tokio::test]
    async fn update_overwrites_fields_and_keeps_id() {
        let svc = service();
        let created = svc.create(alice(None)).await.unwrap();

        let mut changes = alice(Some("Resolved"));
        changes.id = Some(Uuid::new_v4());
        changes.description = Some("Updated description".to_string());
        let updated = svc.update(created.id, changes).await.unwrap();

        assert_eq!(updated.id, created.id);
        assert_eq!(updated.status, "Resolved");
        assert_eq!(updated.description, "Updated description");
        assert_eq!(svc.get(created.id).await.unwrap(), updated);
        assert_eq!(svc.list_all().await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn update_with_blank_status_resets_to_open() {
        let svc = service();
        let created = svc.create(alice(Some("Resolved"))).await.unwrap();
        let updated = svc.update(created.id, alice(Some(""))).await.unwrap();
        assert_eq!(updated.status, "Open");
    }

    #[tokio::test]
    async fn update_with_partial_payload_succeeds() {
        let svc = service();
        let created = svc.create(alice(None)).await.unwrap();

        let changes = ConcernPayload {
            status: Some("Resolved".to_string()),
            description: Some("Updated description".to_string()),
            ..ConcernPayload::default()
        };
        let updated = svc.update(created.id, changes).await.unwrap();

        assert_eq!(updated.id, created.id);
        assert_eq!(updated.student_name, "");
        assert_eq!(updated.reported_by, "");
        assert_eq!(updated.description, "Updated description");
        assert_eq!(updated.status, "Resolved");
        assert_eq!(svc.get(created.id).await.unwrap(), updated);
    }

    #[tokio::test]
    async fn update_unknown_id_is_not_found() {
        let err = service().update(Uuid::new_v4(), alice(None)).await.unwrap_err();
        assert!(matches!(err, ServiceError::NotFound(_)));
    }

    #[tokio::test]
    async fn delete_then_get_is_not_found() {
        let svc = service();
        let created = svc.create(alice(None)).await.unwrap();

        svc.delete(created.id).await.unwrap();

        assert!(matches!(svc.get(created.id).await, Err(ServiceError::NotFound(_))));
        assert!(matches!(svc.delete(created.id).await, Err(ServiceError::NotFound(_))));
    }

    #[tokio::test]
    async fn list_by_student_name_returns_exact_matches() {
        let svc = service();
        svc.create(alice(None)).await.unwrap();
        svc.create(alice(Some("Resolved"))).await.unwrap();
        let mut bob = alice(None);
        bob.student_name = Some("Bob Smith".to_string());
        svc.create(bob).await.unwrap();

        let result = svc.list_by_student_name("Alice Johnson").await.unwrap();
        assert_eq!(result.len(), 2);
        assert!(result.iter().all(|c| c.student_name == "Alice Johnson"));
        assert_eq!(svc.list_all().await.unwrap().len(), 3);
        assert!(svc.list_by_student_name("Carol").await.unwrap().is_empty());
    }

    struct UnreachableStore;

    #[async_trait]
    impl ConcernStore for UnreachableStore {
        async fn insert(&self, _new: NewConcern) -> Result<Concern, DbError> {
            Err(down())
        }
        async fn save(&self, _concern: Concern) -> Result<Concern, DbError> {
            Err(down())
        }
        async fn find_by_id(&self, _id: Uuid) -> Result<Option<Concern>, DbError> {
            Err(down())
        }
        async fn find_all(&self) -> Result<Vec<Concern>, DbError> {
            Err(down())
        }
        async fn find_by_field(&self, _field: ConcernField, _value: &str) -> Result<Vec<Concern>, DbError> {
            Err(down())
        }
        async fn exists_by_id(&self, _id: Uuid) -> Result<bool, DbError> {
            Err(down())
        }
        async fn delete_by_id(&self, _id: Uuid) -> Result<(), DbError> {
            Err(down())
        }
    }

    fn down() -> DbError {
        DbError::ConnectionConfigError("store offline".to_string())
    }

    #[tokio::test]
    async fn store_failures_propagate() {
        let svc = ConcernService::new(Arc::new(UnreachableStore));
        assert!(matches!(svc.list_all().await, Err(ServiceError::Store(_))));
        assert!(matches!(svc.get(Uuid::new_v4()).await, Err(ServiceError::Store(_))));
        assert!(matches!(svc.create(alice(None)).await, Err(ServiceError::Store(_))));
    }
}
