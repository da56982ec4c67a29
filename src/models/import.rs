//! CSV import models
//!
//! A flat row mirroring the exam/lecturer/rule fields for bulk ingestion,
//! plus the report returned to the caller. Date, time and permission
//! columns stay raw strings here; parsing happens row by row in the
//! import service so one bad row cannot abort the batch.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

#[derive(Debug, Clone, Deserialize)]
pub struct ExamCsvRow {
    pub course_name: String,
    pub course_code: String,
    pub lecturer_1: Option<String>,
    pub lecturer_2: Option<String>,
    pub lecturer_3: Option<String>,
    pub lecturer_4: Option<String>,
    pub lecturer_5: Option<String>,
    pub exam_date: String,
    pub start_time: String,
    pub end_time: String,
    pub location: String,
    pub calculator: String,
    pub book: String,
    pub phone: String,
    pub headphones: String,
}

impl ExamCsvRow {
    /// Lecturer name fields that are actually filled in, in column order
    pub fn lecturer_names(&self) -> Vec<String> {
        [
            &self.lecturer_1,
            &self.lecturer_2,
            &self.lecturer_3,
            &self.lecturer_4,
            &self.lecturer_5,
        ]
        .into_iter()
        .filter_map(|name| name.as_deref())
        .map(str::trim)
        .filter(|name| !name.is_empty())
        .map(str::to_string)
        .collect()
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct ImportRowError {
    /// 1-based data row number (the header is row 1)
    pub row: usize,
    pub message: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct ImportReport {
    pub batch_id: Uuid,
    pub total_rows: usize,
    pub imported: usize,
    pub failed: usize,
    pub errors: Vec<ImportRowError>,
}

impl ImportReport {
    pub fn new(batch_id: Uuid) -> Self {
        Self {
            batch_id,
            total_rows: 0,
            imported: 0,
            failed: 0,
            errors: Vec::new(),
        }
    }

    /// Record a failed row
    pub fn push_error(&mut self, row: usize, message: impl Into<String>) {
        self.failed += 1;
        self.errors.push(ImportRowError {
            row,
            message: message.into(),
        });
    }
}
