//! Audit service implementation
//!
//! Records who did what, against which exam, and whether it
//! succeeded. Entries are append-only.

use tracing::{debug, info};

use crate::database::repositories::{AuditRepository, UserRepository};
use crate::models::{AuditAction, AuditFilter, CreateAuditActionRequest};
use crate::utils::errors::{ExamGuardError, Result};
use crate::utils::logging::log_audit_action;

/// Longest accepted action name
const MAX_ACTION_LENGTH: usize = 128;

/// Audit service for recording and querying the audit trail
#[derive(Clone)]
pub struct AuditService {
    audit_repository: AuditRepository,
    user_repository: UserRepository,
}

impl AuditService {
    /// Create a new AuditService instance
    pub fn new(audit_repository: AuditRepository, user_repository: UserRepository) -> Self {
        Self {
            audit_repository,
            user_repository,
        }
    }

    /// Record an audit action
    pub async fn record_action(&self, request: CreateAuditActionRequest) -> Result<AuditAction> {
        debug!(
            user_id = request.user_id,
            action = %request.action,
            "Recording audit action"
        );

        validate_audit_request(&request)?;

        let user_id = request.user_id;
        self.user_repository
            .find_by_id(user_id)
            .await?
            .ok_or(ExamGuardError::UserNotFound { user_id })?;

        let action = self.audit_repository.create(request).await?;

        log_audit_action(action.user_id, &action.action, action.exam_id, action.status);
        info!(audit_id = action.id, "Audit action recorded");

        Ok(action)
    }

    /// List audit actions matching a filter, newest first
    pub async fn list_actions(&self, filter: AuditFilter) -> Result<Vec<AuditAction>> {
        debug!(
            user_id = ?filter.user_id,
            exam_id = ?filter.exam_id,
            action = ?filter.action,
            "Listing audit actions"
        );

        super::validate_pagination(filter.limit.unwrap_or(50), filter.offset.unwrap_or(0))?;

        self.audit_repository.list(filter).await
    }
}

/// Validate an audit record request
fn validate_audit_request(request: &CreateAuditActionRequest) -> Result<()> {
    if request.action.trim().is_empty() {
        return Err(ExamGuardError::InvalidInput(
            "Audit action name cannot be empty".to_string(),
        ));
    }

    if request.action.len() > MAX_ACTION_LENGTH {
        return Err(ExamGuardError::InvalidInput(format!(
            "Audit action name cannot exceed {} characters",
            MAX_ACTION_LENGTH
        )));
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_matches::assert_matches;

    fn valid_request() -> CreateAuditActionRequest {
        CreateAuditActionRequest {
            user_id: 1,
            action: "CREATE_EXAM".to_string(),
            exam_id: Some(7),
            status: true,
        }
    }

    #[test]
    fn test_validate_accepts_valid_request() {
        assert!(validate_audit_request(&valid_request()).is_ok());
    }

    #[test]
    fn test_validate_accepts_missing_exam_reference() {
        let mut request = valid_request();
        request.exam_id = None;
        assert!(validate_audit_request(&request).is_ok());
    }

    #[test]
    fn test_validate_rejects_empty_action() {
        let mut request = valid_request();
        request.action = "".to_string();
        assert_matches!(
            validate_audit_request(&request),
            Err(ExamGuardError::InvalidInput(_))
        );
    }

    #[test]
    fn test_validate_rejects_overlong_action() {
        let mut request = valid_request();
        request.action = "X".repeat(MAX_ACTION_LENGTH + 1);
        assert_matches!(
            validate_audit_request(&request),
            Err(ExamGuardError::InvalidInput(_))
        );
    }

    #[test]
    fn test_validate_accepts_action_at_limit() {
        let mut request = valid_request();
        request.action = "X".repeat(MAX_ACTION_LENGTH);
        assert!(validate_audit_request(&request).is_ok());
    }
}
