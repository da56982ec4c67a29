//! Repository layer for database operations
//!
//! This module contains repository implementations for all entities

pub mod attendance;
pub mod audit;
pub mod exam;
pub mod lecturer;
pub mod user;

// Re-export repositories
pub use attendance::AttendanceRepository;
pub use audit::AuditRepository;
pub use exam::ExamRepository;
pub use lecturer::LecturerRepository;
pub use user::UserRepository;
