//! Attendance repository implementation

use sqlx::PgPool;
use tracing::debug;

use crate::models::{
    AttendanceRecord, AttendanceStatus, CreateAttendanceRequest, UpdateAttendanceRequest,
};
use crate::utils::errors::Result;

/// Repository for attendance-related database operations
#[derive(Clone)]
pub struct AttendanceRepository {
    pool: PgPool,
}

impl AttendanceRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Create an attendance record for an exam
    ///
    /// New records start as absent with the toilet flag cleared.
    pub async fn create(
        &self,
        exam_id: i64,
        request: CreateAttendanceRequest,
        seq_number: i32,
    ) -> Result<AttendanceRecord> {
        debug!(
            "Creating attendance record for student {} in exam {}",
            request.student_id, exam_id
        );

        let record = sqlx::query_as::<_, AttendanceRecord>(
            r#"
            INSERT INTO attendance_records
                (exam_id, student_id, student_number, student_name, seq_number, status, is_on_toilet)
            VALUES ($1, $2, $3, $4, $5, $6, FALSE)
            RETURNING id, exam_id, student_id, student_number, student_name, seq_number,
                      status, photo_ref, is_on_toilet, created_at, updated_at
            "#,
        )
        .bind(exam_id)
        .bind(request.student_id)
        .bind(request.student_number)
        .bind(request.student_name)
        .bind(seq_number)
        .bind(AttendanceStatus::Absent)
        .fetch_one(&self.pool)
        .await?;

        Ok(record)
    }

    /// Find attendance record by ID
    pub async fn find_by_id(&self, id: i64) -> Result<Option<AttendanceRecord>> {
        let record = sqlx::query_as::<_, AttendanceRecord>(
            "SELECT id, exam_id, student_id, student_number, student_name, seq_number,
                    status, photo_ref, is_on_toilet, created_at, updated_at
             FROM attendance_records WHERE id = $1",
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(record)
    }

    /// Find a record by exam and student number
    ///
    /// Used to reject duplicate registrations within one exam.
    pub async fn find_by_exam_and_student(
        &self,
        exam_id: i64,
        student_number: &str,
    ) -> Result<Option<AttendanceRecord>> {
        let record = sqlx::query_as::<_, AttendanceRecord>(
            "SELECT id, exam_id, student_id, student_number, student_name, seq_number,
                    status, photo_ref, is_on_toilet, created_at, updated_at
             FROM attendance_records WHERE exam_id = $1 AND student_number = $2",
        )
        .bind(exam_id)
        .bind(student_number)
        .fetch_optional(&self.pool)
        .await?;

        Ok(record)
    }

    /// Update an attendance record
    pub async fn update(
        &self,
        id: i64,
        request: UpdateAttendanceRequest,
    ) -> Result<Option<AttendanceRecord>> {
        let record = sqlx::query_as::<_, AttendanceRecord>(
            r#"
            UPDATE attendance_records SET
                status = COALESCE($2, status),
                is_on_toilet = COALESCE($3, is_on_toilet),
                photo_ref = COALESCE($4, photo_ref),
                updated_at = NOW()
            WHERE id = $1
            RETURNING id, exam_id, student_id, student_number, student_name, seq_number,
                      status, photo_ref, is_on_toilet, created_at, updated_at
            "#,
        )
        .bind(id)
        .bind(request.status)
        .bind(request.is_on_toilet)
        .bind(request.photo_ref)
        .fetch_optional(&self.pool)
        .await?;

        Ok(record)
    }

    /// Delete an attendance record
    pub async fn delete(&self, id: i64) -> Result<bool> {
        let result = sqlx::query("DELETE FROM attendance_records WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }

    /// List all records for an exam in roster order
    pub async fn list_for_exam(&self, exam_id: i64) -> Result<Vec<AttendanceRecord>> {
        let records = sqlx::query_as::<_, AttendanceRecord>(
            "SELECT id, exam_id, student_id, student_number, student_name, seq_number,
                    status, photo_ref, is_on_toilet, created_at, updated_at
             FROM attendance_records WHERE exam_id = $1 ORDER BY seq_number ASC",
        )
        .bind(exam_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(records)
    }

    /// Next free sequence number within an exam roster
    pub async fn next_seq_number(&self, exam_id: i64) -> Result<i32> {
        let row: (i32,) = sqlx::query_as(
            "SELECT COALESCE(MAX(seq_number), 0) + 1
             FROM attendance_records WHERE exam_id = $1",
        )
        .bind(exam_id)
        .fetch_one(&self.pool)
        .await?;

        Ok(row.0)
    }

    /// Count all records with a given status
    pub async fn count_by_status(&self, status: AttendanceStatus) -> Result<i64> {
        let count: (i64,) =
            sqlx::query_as("SELECT COUNT(*) FROM attendance_records WHERE status = $1")
                .bind(status)
                .fetch_one(&self.pool)
                .await?;

        Ok(count.0)
    }
}
