use crate::error::CoreError;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

/// The status every concern starts with when the caller does not supply one.
pub const DEFAULT_STATUS: &str = "Open";

/// Applies the status default: a missing or blank status becomes `"Open"`.
pub fn normalize_status(status: Option<&str>) -> String {
    match status {
        Some(s) if !s.trim().is_empty() => s.to_string(),
        _ => DEFAULT_STATUS.to_string(),
    }
}

/// A safeguarding concern reported about a student.
///
/// This is both the row stored in the `concerns` table and the JSON object
/// returned by the API.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct Concern {
    pub id: Uuid,
    pub student_name: String,
    pub reported_by: String,
    pub description: String,
    /// Free-form label ("Open", "In Progress", "Resolved", ...). Never blank.
    pub status: String,
    /// When the concern was reported.
    pub date_time: DateTime<Utc>,
}

impl Concern {
    /// Builds a stored record from a validated draft under the given id.
    /// A draft without a timestamp is stamped with the current time.
    pub fn from_new(id: Uuid, new: NewConcern) -> Self {
        Self {
            id,
            student_name: new.student_name,
            reported_by: new.reported_by,
            description: new.description,
            status: normalize_status(Some(&new.status)),
            date_time: new.date_time.unwrap_or_else(Utc::now),
        }
    }

    /// Overwrites every mutable field with the values from `update`.
    ///
    /// The id is never touched. An update without a timestamp keeps the
    /// existing one.
    pub fn apply(&mut self, update: NewConcern) {
        self.student_name = update.student_name;
        self.reported_by = update.reported_by;
        self.description = update.description;
        self.status = normalize_status(Some(&update.status));
        if let Some(date_time) = update.date_time {
            self.date_time = date_time;
        }
    }
}

/// A validated concern that has not been stored yet.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewConcern {
    /// Caller-chosen id; the store assigns one when this is `None`.
    pub id: Option<Uuid>,
    pub student_name: String,
    pub reported_by: String,
    pub description: String,
    pub status: String,
    pub date_time: Option<DateTime<Utc>>,
}

/// The request body accepted by the create and update endpoints.
///
/// Every field is optional on the wire so that missing values can be reported
/// as invalid input instead of a deserialization failure.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ConcernPayload {
    pub id: Option<Uuid>,
    pub student_name: Option<String>,
    pub reported_by: Option<String>,
    pub description: Option<String>,
    pub status: Option<String>,
    pub date_time: Option<DateTime<Utc>>,
}

impl ConcernPayload {
    /// Validates the payload and turns it into a [`NewConcern`].
    ///
    /// `studentName`, `reportedBy` and `description` must be present (blank
    /// text is accepted). The status is defaulted rather than rejected.
    pub fn into_new_concern(self) -> Result<NewConcern, CoreError> {
        let student_name = self.student_name.ok_or(CoreError::MissingField("studentName"))?;
        let reported_by = self.reported_by.ok_or(CoreError::MissingField("reportedBy"))?;
        let description = self.description.ok_or(CoreError::MissingField("description"))?;

        Ok(NewConcern {
            id: self.id,
            student_name,
            reported_by,
            description,
            status: normalize_status(self.status.as_deref()),
            date_time: self.date_time,
        })
    }

    /// Turns the payload into the replacement values for an update.
    ///
    /// Updates never reject a body: a missing text field becomes an empty
    /// string and the status is defaulted as usual.
    pub fn into_update(self) -> NewConcern {
        NewConcern {
            id: self.id,
            student_name: self.student_name.unwrap_or_default(),
            reported_by: self.reported_by.unwrap_or_default(),
            description: self.description.unwrap_or_default(),
            status: normalize_status(self.status.as_deref()),
            date_time: self.date_time,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn payload() -> ConcernPayload {
        ConcernPayload {
            id: None,
            student_name: Some("Alice Johnson".to_string()),
            reported_by: Some("Teacher A".to_string()),
            description: Some("Bullying in class".to_string()),
            status: None,
            date_time: None,
        }
    }

    #[test]
    fn blank_or_missing_status_defaults_to_open() {
        assert_eq!(normalize_status(None), "Open");
        assert_eq!(normalize_status(Some("")), "Open");
        assert_eq!(normalize_status(Some("   ")), "Open");
        assert_eq!(normalize_status(Some("Resolved")), "Resolved");
    }

    #[test]
    fn payload_without_status_is_valid() {
        let new = payload().into_new_concern().unwrap();
        assert_eq!(new.status, DEFAULT_STATUS);
        assert_eq!(new.student_name, "Alice Johnson");
    }

    #[test]
    fn payload_missing_required_field_is_rejected() {
        let mut p = payload();
        p.reported_by = None;
        assert_eq!(p.into_new_concern(), Err(CoreError::MissingField("reportedBy")));

        let mut p = payload();
        p.description = None;
        assert_eq!(p.into_new_concern(), Err(CoreError::MissingField("description")));
    }

    #[test]
    fn apply_keeps_id_and_timestamp_when_absent() {
        let id = Uuid::new_v4();
        let created = Utc.with_ymd_and_hms(2025, 1, 15, 9, 30, 0).unwrap();
        let mut concern = Concern::from_new(
            id,
            NewConcern { date_time: Some(created), ..payload().into_new_concern().unwrap() },
        );

        let mut update = payload();
        update.id = Some(Uuid::new_v4());
        update.status = Some("Resolved".to_string());
        update.description = Some("Updated description".to_string());
        concern.apply(update.into_update());

        assert_eq!(concern.id, id);
        assert_eq!(concern.date_time, created);
        assert_eq!(concern.status, "Resolved");
        assert_eq!(concern.description, "Updated description");
    }

    #[test]
    fn apply_overwrites_timestamp_when_supplied() {
        let created = Utc.with_ymd_and_hms(2025, 1, 15, 9, 30, 0).unwrap();
        let revised = Utc.with_ymd_and_hms(2025, 2, 1, 16, 45, 0).unwrap();
        let mut concern = Concern::from_new(
            Uuid::new_v4(),
            NewConcern { date_time: Some(created), ..payload().into_new_concern().unwrap() },
        );

        let mut update = payload();
        update.date_time = Some(revised);
        concern.apply(update.into_update());

        assert_eq!(concern.date_time, revised);
    }

    #[test]
    fn update_payload_never_fails() {
        let update = ConcernPayload {
            status: Some("Resolved".to_string()),
            description: Some("Updated description".to_string()),
            ..ConcernPayload::default()
        }
        .into_update();

        assert_eq!(update.student_name, "");
        assert_eq!(update.reported_by, "");
        assert_eq!(update.description, "Updated description");
        assert_eq!(update.status, "Resolved");

        assert_eq!(ConcernPayload::default().into_update().status, DEFAULT_STATUS);
    }

    #[test]
    fn wire_format_uses_camel_case() {
        let json = r#"{"studentName":"Bob","reportedBy":"Nurse","description":"Absent","status":null,"dateTime":"2025-03-01T10:00:00Z"}"#;
        let p: ConcernPayload = serde_json::from_str(json).unwrap();
        assert_eq!(p.student_name.as_deref(), Some("Bob"));
        assert!(p.status.is_none());
        assert!(p.date_time.is_some());

        let concern = Concern::from_new(Uuid::nil(), p.into_new_concern().unwrap());
        let value = serde_json::to_value(&concern).unwrap();
        assert_eq!(value["status"], "Open");
        assert_eq!(value["dateTime"], "2025-03-01T10:00:00Z");
        assert_eq!(value["id"], "00000000-0000-0000-0000-000000000000");
    }
}
