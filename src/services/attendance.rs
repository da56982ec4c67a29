//! Attendance service implementation
//!
//! Handles the per-exam student roster: registration, presence
//! status, toilet breaks and ID-photo references.

use tracing::{debug, info};

use crate::database::repositories::{AttendanceRepository, ExamRepository};
use crate::models::{
    AttendanceRecord, AttendanceStatus, CreateAttendanceRequest, UpdateAttendanceRequest,
};
use crate::utils::errors::{ExamGuardError, Result};
use crate::utils::logging::log_attendance_change;

/// Attendance service for managing student attendance
#[derive(Clone)]
pub struct AttendanceService {
    attendance_repository: AttendanceRepository,
    exam_repository: ExamRepository,
}

impl AttendanceService {
    /// Create a new AttendanceService instance
    pub fn new(
        attendance_repository: AttendanceRepository,
        exam_repository: ExamRepository,
    ) -> Self {
        Self {
            attendance_repository,
            exam_repository,
        }
    }

    /// Register a student on an exam roster
    ///
    /// The record starts as absent; the sequence number is assigned
    /// from the roster unless the caller supplies one.
    pub async fn register_student(
        &self,
        exam_id: i64,
        request: CreateAttendanceRequest,
    ) -> Result<AttendanceRecord> {
        debug!(
            exam_id = exam_id,
            student_id = request.student_id,
            "Registering student for exam"
        );

        validate_attendance_request(&request)?;

        self.exam_repository
            .find_by_id(exam_id)
            .await?
            .ok_or(ExamGuardError::ExamNotFound { exam_id })?;

        if let Some(existing) = self
            .attendance_repository
            .find_by_exam_and_student(exam_id, &request.student_number)
            .await?
        {
            return Err(ExamGuardError::InvalidInput(format!(
                "Student {} is already registered for this exam (record {})",
                existing.student_number, existing.id
            )));
        }

        let seq_number = match request.seq_number {
            Some(seq) if seq > 0 => seq,
            Some(_) => {
                return Err(ExamGuardError::InvalidInput(
                    "Sequence number must be positive".to_string(),
                ))
            }
            None => self.attendance_repository.next_seq_number(exam_id).await?,
        };

        let record = self
            .attendance_repository
            .create(exam_id, request, seq_number)
            .await?;

        info!(
            exam_id = exam_id,
            record_id = record.id,
            seq_number = record.seq_number,
            "Student registered"
        );

        Ok(record)
    }

    /// Get attendance record by ID
    pub async fn get_record(&self, record_id: i64) -> Result<AttendanceRecord> {
        debug!(record_id = record_id, "Getting attendance record");

        self.attendance_repository
            .find_by_id(record_id)
            .await?
            .ok_or(ExamGuardError::AttendanceNotFound { record_id })
    }

    /// List the roster for an exam, ordered by sequence number
    pub async fn list_for_exam(&self, exam_id: i64) -> Result<Vec<AttendanceRecord>> {
        debug!(exam_id = exam_id, "Listing attendance for exam");

        self.exam_repository
            .find_by_id(exam_id)
            .await?
            .ok_or(ExamGuardError::ExamNotFound { exam_id })?;

        self.attendance_repository.list_for_exam(exam_id).await
    }

    /// Update the status, toilet flag or photo reference of a record
    pub async fn update_record(
        &self,
        record_id: i64,
        request: UpdateAttendanceRequest,
    ) -> Result<AttendanceRecord> {
        debug!(record_id = record_id, "Updating attendance record");

        let request = normalize_update(request);

        let record = self
            .attendance_repository
            .update(record_id, request)
            .await?
            .ok_or(ExamGuardError::AttendanceNotFound { record_id })?;

        log_attendance_change(
            record.id,
            record.exam_id,
            &record.status.to_string(),
            record.is_on_toilet,
        );

        Ok(record)
    }

    /// Remove a record from the roster
    pub async fn delete_record(&self, record_id: i64) -> Result<()> {
        debug!(record_id = record_id, "Deleting attendance record");

        if !self.attendance_repository.delete(record_id).await? {
            return Err(ExamGuardError::AttendanceNotFound { record_id });
        }

        info!(record_id = record_id, "Attendance record deleted");
        Ok(())
    }
}

/// Apply the absence rule to an update request
///
/// A student marked absent cannot be on a toilet break, so an
/// absent status without an explicit toilet flag clears it.
fn normalize_update(mut request: UpdateAttendanceRequest) -> UpdateAttendanceRequest {
    if request.status == Some(AttendanceStatus::Absent) && request.is_on_toilet.is_none() {
        request.is_on_toilet = Some(false);
    }
    request
}

/// Validate a student registration request
fn validate_attendance_request(request: &CreateAttendanceRequest) -> Result<()> {
    if request.student_number.trim().is_empty() {
        return Err(ExamGuardError::InvalidInput(
            "Student number cannot be empty".to_string(),
        ));
    }

    if request.student_name.trim().is_empty() {
        return Err(ExamGuardError::InvalidInput(
            "Student name cannot be empty".to_string(),
        ));
    }

    if request.student_id <= 0 {
        return Err(ExamGuardError::InvalidInput(
            "Student ID must be positive".to_string(),
        ));
    }

    Ok(())
}
