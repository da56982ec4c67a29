//! Exam repository implementation
//!
//! Covers the exam table itself plus the per-exam rule and
//! checklist tables that share its lifecycle.

use chrono::NaiveDate;
use sqlx::PgPool;
use tracing::debug;

use crate::models::{
    ChecklistItem, CreateExamRequest, Exam, Rule, RuleIcon, UpdateChecklistItemRequest,
    UpdateExamRequest, UpdateRuleRequest,
};
use crate::utils::errors::Result;

/// Repository for exam-related database operations
#[derive(Clone)]
pub struct ExamRepository {
    pool: PgPool,
}

impl ExamRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Create a new exam
    pub async fn create(&self, request: CreateExamRequest) -> Result<Exam> {
        debug!(
            "Creating exam {} on {}",
            request.course_code, request.exam_date
        );

        let exam = sqlx::query_as::<_, Exam>(
            r#"
            INSERT INTO exams (course_name, course_code, exam_date, start_time, end_time, location, created_by)
            VALUES ($1, $2, $3, $4, $5, $6, $7)
            RETURNING id, course_name, course_code, exam_date, start_time, end_time,
                      location, created_by, created_at, updated_at
            "#,
        )
        .bind(request.course_name)
        .bind(request.course_code)
        .bind(request.exam_date)
        .bind(request.start_time)
        .bind(request.end_time)
        .bind(request.location)
        .bind(request.created_by)
        .fetch_one(&self.pool)
        .await?;

        Ok(exam)
    }

    /// Find exam by ID
    pub async fn find_by_id(&self, id: i64) -> Result<Option<Exam>> {
        let exam = sqlx::query_as::<_, Exam>(
            "SELECT id, course_name, course_code, exam_date, start_time, end_time,
                    location, created_by, created_at, updated_at
             FROM exams WHERE id = $1",
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(exam)
    }

    /// Find an exam by its course code and date
    ///
    /// Used to detect duplicate rows during CSV import.
    pub async fn find_by_course_and_date(
        &self,
        course_code: &str,
        exam_date: NaiveDate,
    ) -> Result<Option<Exam>> {
        let exam = sqlx::query_as::<_, Exam>(
            "SELECT id, course_name, course_code, exam_date, start_time, end_time,
                    location, created_by, created_at, updated_at
             FROM exams WHERE course_code = $1 AND exam_date = $2",
        )
        .bind(course_code)
        .bind(exam_date)
        .fetch_optional(&self.pool)
        .await?;

        Ok(exam)
    }

    /// Update exam information
    pub async fn update(&self, id: i64, request: UpdateExamRequest) -> Result<Option<Exam>> {
        let exam = sqlx::query_as::<_, Exam>(
            r#"
            UPDATE exams SET
                course_name = COALESCE($2, course_name),
                course_code = COALESCE($3, course_code),
                exam_date = COALESCE($4, exam_date),
                start_time = COALESCE($5, start_time),
                end_time = COALESCE($6, end_time),
                location = COALESCE($7, location),
                updated_at = NOW()
            WHERE id = $1
            RETURNING id, course_name, course_code, exam_date, start_time, end_time,
                      location, created_by, created_at, updated_at
            "#,
        )
        .bind(id)
        .bind(request.course_name)
        .bind(request.course_code)
        .bind(request.exam_date)
        .bind(request.start_time)
        .bind(request.end_time)
        .bind(request.location)
        .fetch_optional(&self.pool)
        .await?;

        Ok(exam)
    }

    /// Delete an exam
    ///
    /// Rules, checklist items, attendance records and lecturer links
    /// are removed by cascade; audit references are set to NULL.
    pub async fn delete(&self, id: i64) -> Result<bool> {
        let result = sqlx::query("DELETE FROM exams WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }

    /// List exams ordered by schedule
    pub async fn list(&self, limit: i64, offset: i64) -> Result<Vec<Exam>> {
        let exams = sqlx::query_as::<_, Exam>(
            "SELECT id, course_name, course_code, exam_date, start_time, end_time,
                    location, created_by, created_at, updated_at
             FROM exams ORDER BY exam_date ASC, start_time ASC LIMIT $1 OFFSET $2",
        )
        .bind(limit)
        .bind(offset)
        .fetch_all(&self.pool)
        .await?;

        Ok(exams)
    }

    /// Count all exams
    pub async fn count(&self) -> Result<i64> {
        let count: (i64,) = sqlx::query_as("SELECT COUNT(*) FROM exams")
            .fetch_one(&self.pool)
            .await?;

        Ok(count.0)
    }

    /// Add a rule to an exam
    pub async fn add_rule(
        &self,
        exam_id: i64,
        label: String,
        icon: RuleIcon,
        allowed: bool,
    ) -> Result<Rule> {
        let rule = sqlx::query_as::<_, Rule>(
            r#"
            INSERT INTO exam_rules (exam_id, label, icon, allowed)
            VALUES ($1, $2, $3, $4)
            RETURNING id, exam_id, label, icon, allowed
            "#,
        )
        .bind(exam_id)
        .bind(label)
        .bind(icon)
        .bind(allowed)
        .fetch_one(&self.pool)
        .await?;

        Ok(rule)
    }

    /// Update a rule
    pub async fn update_rule(
        &self,
        rule_id: i64,
        request: UpdateRuleRequest,
    ) -> Result<Option<Rule>> {
        let rule = sqlx::query_as::<_, Rule>(
            r#"
            UPDATE exam_rules SET
                label = COALESCE($2, label),
                allowed = COALESCE($3, allowed)
            WHERE id = $1
            RETURNING id, exam_id, label, icon, allowed
            "#,
        )
        .bind(rule_id)
        .bind(request.label)
        .bind(request.allowed)
        .fetch_optional(&self.pool)
        .await?;

        Ok(rule)
    }

    /// Delete a rule
    pub async fn delete_rule(&self, rule_id: i64) -> Result<bool> {
        let result = sqlx::query("DELETE FROM exam_rules WHERE id = $1")
            .bind(rule_id)
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }

    /// Get all rules for an exam
    pub async fn get_rules(&self, exam_id: i64) -> Result<Vec<Rule>> {
        let rules = sqlx::query_as::<_, Rule>(
            "SELECT id, exam_id, label, icon, allowed
             FROM exam_rules WHERE exam_id = $1 ORDER BY id ASC",
        )
        .bind(exam_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(rules)
    }

    /// Add a checklist item to an exam
    pub async fn add_checklist_item(
        &self,
        exam_id: i64,
        description: String,
        is_done: bool,
    ) -> Result<ChecklistItem> {
        let item = sqlx::query_as::<_, ChecklistItem>(
            r#"
            INSERT INTO checklist_items (exam_id, description, is_done)
            VALUES ($1, $2, $3)
            RETURNING id, exam_id, description, is_done
            "#,
        )
        .bind(exam_id)
        .bind(description)
        .bind(is_done)
        .fetch_one(&self.pool)
        .await?;

        Ok(item)
    }

    /// Update a checklist item
    pub async fn update_checklist_item(
        &self,
        item_id: i64,
        request: UpdateChecklistItemRequest,
    ) -> Result<Option<ChecklistItem>> {
        let item = sqlx::query_as::<_, ChecklistItem>(
            r#"
            UPDATE checklist_items SET
                description = COALESCE($2, description),
                is_done = COALESCE($3, is_done)
            WHERE id = $1
            RETURNING id, exam_id, description, is_done
            "#,
        )
        .bind(item_id)
        .bind(request.description)
        .bind(request.is_done)
        .fetch_optional(&self.pool)
        .await?;

        Ok(item)
    }

    /// Delete a checklist item
    pub async fn delete_checklist_item(&self, item_id: i64) -> Result<bool> {
        let result = sqlx::query("DELETE FROM checklist_items WHERE id = $1")
            .bind(item_id)
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }

    /// Get all checklist items for an exam
    pub async fn get_checklist(&self, exam_id: i64) -> Result<Vec<ChecklistItem>> {
        let items = sqlx::query_as::<_, ChecklistItem>(
            "SELECT id, exam_id, description, is_done
             FROM checklist_items WHERE exam_id = $1 ORDER BY id ASC",
        )
        .bind(exam_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(items)
    }
}
