//! Lecturer repository implementation
//!
//! Lecturers are shared across exams through the exam_lecturers
//! join table.

use sqlx::PgPool;
use tracing::debug;

use crate::models::{CreateLecturerRequest, Lecturer};
use crate::utils::errors::Result;

/// Repository for lecturer-related database operations
#[derive(Clone)]
pub struct LecturerRepository {
    pool: PgPool,
}

impl LecturerRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Create a new lecturer
    pub async fn create(&self, request: CreateLecturerRequest) -> Result<Lecturer> {
        debug!("Creating lecturer: {}", request.name);

        let lecturer = sqlx::query_as::<_, Lecturer>(
            r#"
            INSERT INTO lecturers (name, email, phone)
            VALUES ($1, $2, $3)
            RETURNING id, name, email, phone, created_at, updated_at
            "#,
        )
        .bind(request.name)
        .bind(request.email)
        .bind(request.phone)
        .fetch_one(&self.pool)
        .await?;

        Ok(lecturer)
    }

    /// Find lecturer by ID
    pub async fn find_by_id(&self, id: i64) -> Result<Option<Lecturer>> {
        let lecturer = sqlx::query_as::<_, Lecturer>(
            "SELECT id, name, email, phone, created_at, updated_at
             FROM lecturers WHERE id = $1",
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(lecturer)
    }

    /// Find lecturer by exact name
    pub async fn find_by_name(&self, name: &str) -> Result<Option<Lecturer>> {
        let lecturer = sqlx::query_as::<_, Lecturer>(
            "SELECT id, name, email, phone, created_at, updated_at
             FROM lecturers WHERE name = $1",
        )
        .bind(name)
        .fetch_optional(&self.pool)
        .await?;

        Ok(lecturer)
    }

    /// List lecturers ordered by name
    pub async fn list(&self, limit: i64, offset: i64) -> Result<Vec<Lecturer>> {
        let lecturers = sqlx::query_as::<_, Lecturer>(
            "SELECT id, name, email, phone, created_at, updated_at
             FROM lecturers ORDER BY name ASC LIMIT $1 OFFSET $2",
        )
        .bind(limit)
        .bind(offset)
        .fetch_all(&self.pool)
        .await?;

        Ok(lecturers)
    }

    /// Count all lecturers
    pub async fn count(&self) -> Result<i64> {
        let count: (i64,) = sqlx::query_as("SELECT COUNT(*) FROM lecturers")
            .fetch_one(&self.pool)
            .await?;

        Ok(count.0)
    }

    /// Attach a lecturer to an exam
    ///
    /// Attaching the same lecturer twice is a no-op.
    pub async fn attach_to_exam(&self, exam_id: i64, lecturer_id: i64) -> Result<()> {
        sqlx::query(
            "INSERT INTO exam_lecturers (exam_id, lecturer_id)
             VALUES ($1, $2) ON CONFLICT DO NOTHING",
        )
        .bind(exam_id)
        .bind(lecturer_id)
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    /// Detach a lecturer from an exam
    pub async fn detach_from_exam(&self, exam_id: i64, lecturer_id: i64) -> Result<bool> {
        let result = sqlx::query(
            "DELETE FROM exam_lecturers WHERE exam_id = $1 AND lecturer_id = $2",
        )
        .bind(exam_id)
        .bind(lecturer_id)
        .execute(&self.pool)
        .await?;

        Ok(result.rows_affected() > 0)
    }

    /// Get all lecturers attached to an exam
    pub async fn get_for_exam(&self, exam_id: i64) -> Result<Vec<Lecturer>> {
        let lecturers = sqlx::query_as::<_, Lecturer>(
            r#"
            SELECT l.id, l.name, l.email, l.phone, l.created_at, l.updated_at
            FROM lecturers l
            INNER JOIN exam_lecturers el ON l.id = el.lecturer_id
            WHERE el.exam_id = $1
            ORDER BY l.name ASC
            "#,
        )
        .bind(exam_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(lecturers)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::database::connection::{create_lazy_pool, DatabaseConfig};

    #[tokio::test]
    async fn test_repository_is_cloneable() {
        let pool = create_lazy_pool(&DatabaseConfig::default()).unwrap();
        let repo = LecturerRepository::new(pool);
        let _clone = repo.clone();
    }
}
