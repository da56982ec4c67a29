//! Services module
//!
//! This module contains business logic services

pub mod attendance;
pub mod audit;
pub mod exam;
pub mod import;
pub mod user;

// Re-export commonly used services
pub use attendance::AttendanceService;
pub use audit::AuditService;
pub use exam::ExamService;
pub use import::ImportService;
pub use user::UserService;

use crate::config::Settings;
use crate::database::DatabaseService;
use crate::utils::errors::{ExamGuardError, Result};

/// Largest page size a list query accepts
const MAX_PAGE_SIZE: i64 = 100;

/// Check list query bounds before they reach a LIMIT/OFFSET bind
pub(crate) fn validate_pagination(limit: i64, offset: i64) -> Result<()> {
    if limit < 0 || offset < 0 {
        return Err(ExamGuardError::InvalidInput(
            "Limit and offset must be non-negative".to_string(),
        ));
    }

    if limit > MAX_PAGE_SIZE {
        return Err(ExamGuardError::InvalidInput(
            "Limit cannot exceed 100".to_string(),
        ));
    }

    Ok(())
}

/// Service factory for creating and managing all services
#[derive(Clone)]
pub struct ServiceFactory {
    pub user_service: UserService,
    pub exam_service: ExamService,
    pub attendance_service: AttendanceService,
    pub audit_service: AuditService,
    pub import_service: ImportService,
}

impl ServiceFactory {
    /// Create a new ServiceFactory with all services initialized
    pub fn new(db: &DatabaseService, settings: Settings) -> Self {
        let user_service = UserService::new(db.users.clone());
        let exam_service = ExamService::new(db.exams.clone(), db.lecturers.clone());
        let attendance_service = AttendanceService::new(db.attendance.clone(), db.exams.clone());
        let audit_service = AuditService::new(db.audit.clone(), db.users.clone());
        let import_service = ImportService::new(
            db.exams.clone(),
            db.lecturers.clone(),
            db.audit.clone(),
            db.users.clone(),
            settings,
        );

        Self {
            user_service,
            exam_service,
            attendance_service,
            audit_service,
            import_service,
        }
    }
}
