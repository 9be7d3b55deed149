use crate::{ConcernField, ConcernStore, DbError};
use async_trait::async_trait;
use core_types::{Concern, NewConcern};
use sqlx::postgres::PgPool;
use uuid::Uuid;

const SELECT_CONCERNS: &str =
    "SELECT id, student_name, reported_by, description, status, date_time FROM concerns";

/// The `DbRepository` provides a high-level, application-specific interface
/// to the database. It encapsulates all SQL queries and data access logic.
#[derive(Debug, Clone)]
pub struct DbRepository {
    pool: PgPool,
}

impl DbRepository {
    /// Creates a new `DbRepository` with a shared database connection pool.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Inserts the record, or overwrites every mutable column when the id
    /// already exists. The id column itself is never updated.
    async fn upsert(&self, concern: &Concern) -> Result<Concern, DbError> {
        let stored = sqlx::query_as::<_, Concern>(
            r#"
            INSERT INTO concerns (id, student_name, reported_by, description, status, date_time)
            VALUES ($1, $2, $3, $4, $5, $6)
            ON CONFLICT (id) DO UPDATE SET
                student_name = EXCLUDED.student_name,
                reported_by = EXCLUDED.reported_by,
                description = EXCLUDED.description,
                status = EXCLUDED.status,
                date_time = EXCLUDED.date_time
            RETURNING id, student_name, reported_by, description, status, date_time
            "#,
        )
        .bind(concern.id)
        .bind(&concern.student_name)
        .bind(&concern.reported_by)
        .bind(&concern.description)
        .bind(&concern.status)
        .bind(concern.date_time)
        .fetch_one(&self.pool)
        .await?;
        Ok(stored)
    }
}

#[async_trait]
impl ConcernStore for DbRepository {
    async fn insert(&self, new: NewConcern) -> Result<Concern, DbError> {
        let id = new.id.unwrap_or_else(Uuid::new_v4);
        self.upsert(&Concern::from_new(id, new)).await
    }

    async fn save(&self, concern: Concern) -> Result<Concern, DbError> {
        self.upsert(&concern).await
    }

    async fn find_by_id(&self, id: Uuid) -> Result<Option<Concern>, DbError> {
        let concern = sqlx::query_as::<_, Concern>(&format!("{SELECT_CONCERNS} WHERE id = $1"))
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;
        Ok(concern)
    }

    async fn find_all(&self) -> Result<Vec<Concern>, DbError> {
        let concerns = sqlx::query_as::<_, Concern>(&format!(
            "{SELECT_CONCERNS} ORDER BY date_time ASC, id ASC"
        ))
        .fetch_all(&self.pool)
        .await?;
        Ok(concerns)
    }

    async fn find_by_field(&self, field: ConcernField, value: &str) -> Result<Vec<Concern>, DbError> {
        // The column name comes from a closed enum, never from the request.
        let sql = format!(
            "{SELECT_CONCERNS} WHERE {} = $1 ORDER BY date_time ASC, id ASC",
            field.column()
        );
        let concerns = sqlx::query_as::<_, Concern>(&sql)
            .bind(value)
            .fetch_all(&self.pool)
            .await?;
        Ok(concerns)
    }

    async fn exists_by_id(&self, id: Uuid) -> Result<bool, DbError> {
        let exists: bool = sqlx::query_scalar("SELECT EXISTS(SELECT 1 FROM concerns WHERE id = $1)")
            .bind(id)
            .fetch_one(&self.pool)
            .await?;
        Ok(exists)
    }

    async fn delete_by_id(&self, id: Uuid) -> Result<(), DbError> {
        sqlx::query("DELETE FROM concerns WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;
        Ok(())
    }
}
