//! CSV import service implementation
//!
//! Bulk-creates exams from an uploaded CSV. Rows are independent:
//! a bad row is reported and skipped, the rest of the batch
//! continues.

use chrono::{NaiveDate, NaiveTime};
use csv::ReaderBuilder;
use tracing::{debug, info};
use uuid::Uuid;

use crate::config::Settings;
use crate::database::repositories::{
    AuditRepository, ExamRepository, LecturerRepository, UserRepository,
};
use crate::models::{
    CreateAuditActionRequest, CreateExamRequest, CreateLecturerRequest, ExamCsvRow, ImportReport,
    RuleIcon,
};
use crate::utils::errors::{ExamGuardError, Result};
use crate::utils::helpers;
use crate::utils::logging::log_import_summary;

/// Audit action name recorded for import batches
const IMPORT_ACTION: &str = "IMPORT_EXAMS";

/// Import service for bulk exam creation from CSV
#[derive(Clone)]
pub struct ImportService {
    exam_repository: ExamRepository,
    lecturer_repository: LecturerRepository,
    audit_repository: AuditRepository,
    user_repository: UserRepository,
    settings: Settings,
}

impl ImportService {
    /// Create a new ImportService instance
    pub fn new(
        exam_repository: ExamRepository,
        lecturer_repository: LecturerRepository,
        audit_repository: AuditRepository,
        user_repository: UserRepository,
        settings: Settings,
    ) -> Self {
        Self {
            exam_repository,
            lecturer_repository,
            audit_repository,
            user_repository,
            settings,
        }
    }

    /// Import exams from a CSV document
    ///
    /// When an acting user is given the batch outcome is recorded in
    /// the audit trail under that user.
    pub async fn import_csv(&self, data: &[u8], acting_user: Option<i64>) -> Result<ImportReport> {
        let batch_id = Uuid::new_v4();
        debug!(batch_id = %batch_id, "Starting CSV import");

        // Resolve the acting user before touching any rows
        if let Some(user_id) = acting_user {
            self.user_repository
                .find_by_id(user_id)
                .await?
                .ok_or(ExamGuardError::UserNotFound { user_id })?;
        }

        let rows = parse_csv(data)?;

        let max_rows = self.settings.import.max_rows;
        if rows.len() > max_rows {
            return Err(ExamGuardError::InvalidInput(format!(
                "CSV has {} rows, the maximum per upload is {}",
                rows.len(),
                max_rows
            )));
        }

        let mut report = ImportReport::new(batch_id);
        report.total_rows = rows.len();

        for (row_number, parsed) in rows {
            match parsed {
                Ok(row) => match self.import_row(row).await {
                    Ok(()) => report.imported += 1,
                    Err(e) => report.push_error(row_number, e.to_string()),
                },
                Err(message) => report.push_error(row_number, message),
            }
        }

        if let Some(user_id) = acting_user {
            self.audit_repository
                .create(CreateAuditActionRequest {
                    user_id,
                    action: IMPORT_ACTION.to_string(),
                    exam_id: None,
                    status: report.failed == 0,
                })
                .await?;
        }

        log_import_summary(
            &report.batch_id.to_string(),
            report.total_rows,
            report.imported,
            report.failed,
        );
        info!(
            batch_id = %report.batch_id,
            imported = report.imported,
            failed = report.failed,
            "CSV import completed"
        );

        Ok(report)
    }

    /// Import a single validated CSV row
    async fn import_row(&self, row: ExamCsvRow) -> Result<()> {
        if row.course_name.trim().is_empty() || row.course_code.trim().is_empty() {
            return Err(ExamGuardError::InvalidInput(
                "Course name and course code are required".to_string(),
            ));
        }

        if row.location.trim().is_empty() {
            return Err(ExamGuardError::InvalidInput(
                "Location is required".to_string(),
            ));
        }

        let exam_date = parse_date(&row.exam_date)?;
        let start_time = parse_time(&row.start_time)?;
        let end_time = parse_time(&row.end_time)?;
        if start_time >= end_time {
            return Err(ExamGuardError::InvalidInput(
                "Exam start time must be before end time".to_string(),
            ));
        }

        let permissions = [
            (RuleIcon::Calculator, parse_permission(&row.calculator, "calculator")?),
            (RuleIcon::Book, parse_permission(&row.book, "book")?),
            (RuleIcon::Phone, parse_permission(&row.phone, "phone")?),
            (RuleIcon::Headphones, parse_permission(&row.headphones, "headphones")?),
        ];

        let course_code = row.course_code.trim().to_string();
        if self
            .exam_repository
            .find_by_course_and_date(&course_code, exam_date)
            .await?
            .is_some()
        {
            return Err(ExamGuardError::InvalidInput(format!(
                "Exam {} on {} already exists",
                course_code, exam_date
            )));
        }

        let exam = self
            .exam_repository
            .create(CreateExamRequest {
                course_name: row.course_name.trim().to_string(),
                course_code,
                exam_date,
                start_time,
                end_time,
                location: row.location.trim().to_string(),
                lecturer_ids: vec![],
                rules: vec![],
                checklist: vec![],
                created_by: None,
            })
            .await?;

        for name in row.lecturer_names() {
            let lecturer = match self.lecturer_repository.find_by_name(&name).await? {
                Some(lecturer) => lecturer,
                None => {
                    self.lecturer_repository
                        .create(CreateLecturerRequest {
                            name,
                            email: None,
                            phone: None,
                        })
                        .await?
                }
            };
            self.lecturer_repository
                .attach_to_exam(exam.id, lecturer.id)
                .await?;
        }

        for (icon, allowed) in permissions {
            self.exam_repository
                .add_rule(exam.id, icon.default_label().to_string(), icon, allowed)
                .await?;
        }

        debug!(exam_id = exam.id, "Imported exam row");
        Ok(())
    }
}

/// Parse the CSV body into numbered rows
///
/// Row numbers are 1-based over data rows; the header is not
/// counted. A row that fails to deserialize is kept as an error
/// entry so the caller can report it in place.
fn parse_csv(data: &[u8]) -> Result<Vec<(usize, std::result::Result<ExamCsvRow, String>)>> {
    let mut reader = ReaderBuilder::new()
        .trim(csv::Trim::All)
        .from_reader(data);

    let mut rows = Vec::new();
    for (index, record) in reader.deserialize::<ExamCsvRow>().enumerate() {
        let row_number = index + 1;
        match record {
            Ok(row) => rows.push((row_number, Ok(row))),
            Err(e) => rows.push((row_number, Err(format!("Malformed CSV row: {}", e)))),
        }
    }

    Ok(rows)
}

/// Parse an ISO date, tolerating the common day-first form
fn parse_date(input: &str) -> Result<NaiveDate> {
    let input = input.trim();
    NaiveDate::parse_from_str(input, "%Y-%m-%d")
        .or_else(|_| NaiveDate::parse_from_str(input, "%d/%m/%Y"))
        .map_err(|_| ExamGuardError::InvalidInput(format!("Unparseable exam date: {}", input)))
}

/// Parse a time of day, with or without seconds
fn parse_time(input: &str) -> Result<NaiveTime> {
    let input = input.trim();
    NaiveTime::parse_from_str(input, "%H:%M:%S")
        .or_else(|_| NaiveTime::parse_from_str(input, "%H:%M"))
        .map_err(|_| ExamGuardError::InvalidInput(format!("Unparseable time: {}", input)))
}

/// Interpret a permission cell as an allowed flag
fn parse_permission(input: &str, column: &str) -> Result<bool> {
    helpers::parse_permission_flag(input).ok_or_else(|| {
        ExamGuardError::InvalidInput(format!(
            "Unknown permission value '{}' in column {}",
            input, column
        ))
    })
}
