//! Audit action model
//!
//! Append-only trail of user actions for traceability. Rows carry a
//! creation timestamp only; they are never updated.

use serde::{Deserialize, Serialize};
use chrono::{DateTime, Utc};
use sqlx::FromRow;

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct AuditAction {
    pub id: i64,
    pub user_id: i64,
    pub action: String,
    pub exam_id: Option<i64>,
    pub status: bool,
    pub created_at: DateTime<Utc>,
}

/// user_id, action and status are mandatory; exam_id may be omitted
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateAuditActionRequest {
    pub user_id: i64,
    pub action: String,
    pub exam_id: Option<i64>,
    pub status: bool,
}

/// Filter for listing audit entries; all fields optional
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AuditFilter {
    pub user_id: Option<i64>,
    pub exam_id: Option<i64>,
    pub action: Option<String>,
    pub status: Option<bool>,
    pub limit: Option<i64>,
    pub offset: Option<i64>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_create_request_requires_user_action_status() {
        assert!(serde_json::from_str::<CreateAuditActionRequest>(
            r#"{"action": "LOGIN", "status": true}"#
        )
        .is_err());
        assert!(serde_json::from_str::<CreateAuditActionRequest>(
            r#"{"user_id": 1, "status": true}"#
        )
        .is_err());
        assert!(serde_json::from_str::<CreateAuditActionRequest>(
            r#"{"user_id": 1, "action": "LOGIN"}"#
        )
        .is_err());
    }

    #[test]
    fn test_create_request_accepts_missing_exam_id() {
        let req: CreateAuditActionRequest =
            serde_json::from_str(r#"{"user_id": 1, "action": "LOGIN", "status": true}"#).unwrap();
        assert_eq!(req.user_id, 1);
        assert_eq!(req.action, "LOGIN");
        assert!(req.status);
        assert!(req.exam_id.is_none());
    }

    #[test]
    fn test_filter_defaults_to_unfiltered() {
        let filter = AuditFilter::default();
        assert!(filter.user_id.is_none());
        assert!(filter.exam_id.is_none());
        assert!(filter.action.is_none());
        assert!(filter.status.is_none());
    }
}
