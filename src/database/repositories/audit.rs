//! Audit repository implementation
//!
//! Audit rows are append-only; there is no update path.

use sqlx::PgPool;
use tracing::debug;

use crate::models::{AuditAction, AuditFilter, CreateAuditActionRequest};
use crate::utils::errors::Result;

/// Repository for audit trail database operations
#[derive(Clone)]
pub struct AuditRepository {
    pool: PgPool,
}

impl AuditRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Record an audit action
    pub async fn create(&self, request: CreateAuditActionRequest) -> Result<AuditAction> {
        debug!(
            "Recording audit action {} for user {}",
            request.action, request.user_id
        );

        let action = sqlx::query_as::<_, AuditAction>(
            r#"
            INSERT INTO audit_actions (user_id, action, exam_id, status)
            VALUES ($1, $2, $3, $4)
            RETURNING id, user_id, action, exam_id, status, created_at
            "#,
        )
        .bind(request.user_id)
        .bind(request.action)
        .bind(request.exam_id)
        .bind(request.status)
        .fetch_one(&self.pool)
        .await?;

        Ok(action)
    }

    /// List audit actions, newest first
    ///
    /// Every filter field is optional; a NULL bind leaves that
    /// column unconstrained.
    pub async fn list(&self, filter: AuditFilter) -> Result<Vec<AuditAction>> {
        let limit = filter.limit.unwrap_or(50);
        let offset = filter.offset.unwrap_or(0);

        let actions = sqlx::query_as::<_, AuditAction>(
            r#"
            SELECT id, user_id, action, exam_id, status, created_at
            FROM audit_actions
            WHERE ($1::BIGINT IS NULL OR user_id = $1)
              AND ($2::BIGINT IS NULL OR exam_id = $2)
              AND ($3::TEXT IS NULL OR action = $3)
              AND ($4::BOOLEAN IS NULL OR status = $4)
            ORDER BY created_at DESC
            LIMIT $5 OFFSET $6
            "#,
        )
        .bind(filter.user_id)
        .bind(filter.exam_id)
        .bind(filter.action)
        .bind(filter.status)
        .bind(limit)
        .bind(offset)
        .fetch_all(&self.pool)
        .await?;

        Ok(actions)
    }

    /// Count all audit actions
    pub async fn count(&self) -> Result<i64> {
        let count: (i64,) = sqlx::query_as("SELECT COUNT(*) FROM audit_actions")
            .fetch_one(&self.pool)
            .await?;

        Ok(count.0)
    }
}
