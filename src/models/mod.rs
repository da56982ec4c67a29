//! Data models module
//!
//! This module contains all data structures used throughout the application

pub mod user;
pub mod exam;
pub mod attendance;
pub mod audit;
pub mod import;

// Re-export commonly used models
pub use user::{User, CreateUserRequest, UpdateUserRequest};
pub use exam::{
    Exam, ExamDetail, Lecturer, Rule, RuleIcon, ChecklistItem,
    CreateExamRequest, UpdateExamRequest, CreateLecturerRequest, AttachLecturerRequest,
    CreateRuleRequest, UpdateRuleRequest, CreateChecklistItemRequest, UpdateChecklistItemRequest,
};
pub use attendance::{
    AttendanceRecord, AttendanceStatus, CreateAttendanceRequest, UpdateAttendanceRequest,
};
pub use audit::{AuditAction, AuditFilter, CreateAuditActionRequest};
pub use import::{ExamCsvRow, ImportReport, ImportRowError};
