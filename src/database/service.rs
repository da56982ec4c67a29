//! Database service facade
//!
//! Bundles the connection pool and all repositories behind a
//! single cloneable handle.

use serde_json::json;
use sqlx::PgPool;
use tracing::info;

use super::connection;
use super::repositories::{
    AttendanceRepository, AuditRepository, ExamRepository, LecturerRepository, UserRepository,
};
use crate::models::AttendanceStatus;
use crate::utils::errors::Result;

/// Central access point for all database operations
#[derive(Clone)]
pub struct DatabaseService {
    pool: PgPool,
    pub users: UserRepository,
    pub exams: ExamRepository,
    pub lecturers: LecturerRepository,
    pub attendance: AttendanceRepository,
    pub audit: AuditRepository,
}

impl DatabaseService {
    /// Create a new database service from an existing pool
    pub fn new(pool: PgPool) -> Self {
        Self {
            users: UserRepository::new(pool.clone()),
            exams: ExamRepository::new(pool.clone()),
            lecturers: LecturerRepository::new(pool.clone()),
            attendance: AttendanceRepository::new(pool.clone()),
            audit: AuditRepository::new(pool.clone()),
            pool,
        }
    }

    /// Access the underlying pool
    pub fn pool(&self) -> &PgPool {
        &self.pool
    }

    /// Run pending migrations
    pub async fn migrate(&self) -> Result<()> {
        connection::run_migrations(&self.pool).await
    }

    /// Check database connectivity
    pub async fn health_check(&self) -> Result<()> {
        connection::health_check(&self.pool).await
    }

    /// Aggregate counters for the stats endpoint
    pub async fn get_stats(&self) -> Result<serde_json::Value> {
        let total_exams = self.exams.count().await?;
        let total_lecturers = self.lecturers.count().await?;
        let total_users = self.users.count().await?;
        let present = self
            .attendance
            .count_by_status(AttendanceStatus::Present)
            .await?;
        let absent = self
            .attendance
            .count_by_status(AttendanceStatus::Absent)
            .await?;
        let total_audit_actions = self.audit.count().await?;

        info!("Collected system statistics");

        Ok(json!({
            "exams": total_exams,
            "lecturers": total_lecturers,
            "users": total_users,
            "attendance": {
                "present": present,
                "absent": absent,
                "total": present + absent,
            },
            "audit_actions": total_audit_actions,
        }))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::database::connection::{create_lazy_pool, DatabaseConfig};

    #[tokio::test]
    async fn test_service_creation() {
        let pool = create_lazy_pool(&DatabaseConfig::default()).unwrap();
        let service = DatabaseService::new(pool);
        let _clone = service.clone();
        assert!(!service.pool().is_closed());
    }
}
