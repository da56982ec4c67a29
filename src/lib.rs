//! ExamGuard exam monitoring service
//!
//! Backend for exam-day operations: scheduling exams with their
//! lecturers, rules and checklists, tracking per-student attendance,
//! bulk-importing schedules from CSV, and keeping an audit trail of
//! committee actions.

#![allow(non_snake_case)]

pub mod config;
pub mod database;
pub mod handlers;
pub mod middleware;
pub mod models;
pub mod server;
pub mod services;
pub mod utils;

// Re-export commonly used types
pub use config::Settings;
pub use utils::errors::{ExamGuardError, Result};

// Re-export main components for easy access
pub use database::DatabaseService;
pub use server::{build_router, AppState};
pub use services::ServiceFactory;

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Library name
pub const NAME: &str = env!("CARGO_PKG_NAME");

/// Get library information
pub fn info() -> String {
    format!("{} v{}", NAME, VERSION)
}
