use crate::DbError;
use async_trait::async_trait;
use core_types::{Concern, NewConcern};
use uuid::Uuid;

/// The text columns a concern can be filtered on by exact equality.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConcernField {
    StudentName,
    ReportedBy,
    Status,
}

impl ConcernField {
    /// The column name in the `concerns` table.
    pub fn column(&self) -> &'static str {
        match self {
            ConcernField::StudentName => "student_name",
            ConcernField::ReportedBy => "reported_by",
            ConcernField::Status => "status",
        }
    }

    /// Reads this field from a record.
    pub fn value_of<'a>(&self, concern: &'a Concern) -> &'a str {
        match self {
            ConcernField::StudentName => &concern.student_name,
            ConcernField::ReportedBy => &concern.reported_by,
            ConcernField::Status => &concern.status,
        }
    }
}

/// The persistence contract for concern records.
///
/// Implementations only need to make each single call atomic; callers never
/// hold a transaction across calls, so concurrent writes to one id are
/// last-write-wins.
#[async_trait]
pub trait ConcernStore: Send + Sync {
    /// Stores a new record, assigning a fresh id when the draft has none.
    /// A draft carrying an existing id overwrites that record.
    async fn insert(&self, new: NewConcern) -> Result<Concern, DbError>;

    /// Writes `concern` under its id, inserting it if the id is unknown.
    async fn save(&self, concern: Concern) -> Result<Concern, DbError>;

    async fn find_by_id(&self, id: Uuid) -> Result<Option<Concern>, DbError>;

    async fn find_all(&self) -> Result<Vec<Concern>, DbError>;

    /// Returns every record whose `field` equals `value` exactly.
    /// No match is an empty list, not an error.
    async fn find_by_field(&self, field: ConcernField, value: &str) -> Result<Vec<Concern>, DbError>;

    async fn exists_by_id(&self, id: Uuid) -> Result<bool, DbError>;

    /// Removes the record if present. Deleting an unknown id is a no-op.
    async fn delete_by_id(&self, id: Uuid) -> Result<(), DbError>;

    async fn find_by_student_name(&self, student_name: &str) -> Result<Vec<Concern>, DbError> {
        self.find_by_field(ConcernField::StudentName, student_name).await
    }
}
