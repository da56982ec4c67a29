//! Exam service implementation
//!
//! This service handles exam scheduling, lecturer assignment,
//! per-exam rules and the preparation checklist.

use tracing::{debug, info, warn};

use crate::database::repositories::{ExamRepository, LecturerRepository};
use crate::models::{
    ChecklistItem, CreateChecklistItemRequest, CreateExamRequest, CreateLecturerRequest,
    CreateRuleRequest, Exam, ExamDetail, Lecturer, Rule, RuleIcon, UpdateChecklistItemRequest,
    UpdateExamRequest, UpdateRuleRequest,
};
use crate::utils::errors::{ExamGuardError, Result};
use crate::utils::helpers;

/// Exam service for managing exam operations
#[derive(Clone)]
pub struct ExamService {
    exam_repository: ExamRepository,
    lecturer_repository: LecturerRepository,
}

impl ExamService {
    /// Create a new ExamService instance
    pub fn new(exam_repository: ExamRepository, lecturer_repository: LecturerRepository) -> Self {
        Self {
            exam_repository,
            lecturer_repository,
        }
    }

    /// Create a new exam together with its lecturers, rules and checklist
    pub async fn create_exam(&self, request: CreateExamRequest) -> Result<ExamDetail> {
        debug!(course_code = %request.course_code, "Creating exam");

        validate_exam_request(&request)?;

        // Verify lecturer references before touching the exam table
        for lecturer_id in &request.lecturer_ids {
            self.lecturer_repository
                .find_by_id(*lecturer_id)
                .await?
                .ok_or(ExamGuardError::LecturerNotFound {
                    lecturer_id: *lecturer_id,
                })?;
        }

        if request.lecturer_ids.is_empty() {
            warn!(course_code = %request.course_code, "Exam created without lecturers");
        }

        let lecturer_ids = request.lecturer_ids.clone();
        let rules = request.rules.clone();
        let checklist = request.checklist.clone();

        let exam = self.exam_repository.create(request).await?;

        for lecturer_id in lecturer_ids {
            self.lecturer_repository
                .attach_to_exam(exam.id, lecturer_id)
                .await?;
        }

        self.materialize_rules(exam.id, rules).await?;

        for item in checklist {
            self.exam_repository
                .add_checklist_item(exam.id, item.description, item.is_done)
                .await?;
        }

        info!(exam_id = exam.id, course_code = %exam.course_code, "Exam created");

        self.get_exam_detail(exam.id).await
    }

    /// Get exam by ID
    pub async fn get_exam(&self, exam_id: i64) -> Result<Exam> {
        debug!(exam_id = exam_id, "Getting exam by ID");

        self.exam_repository
            .find_by_id(exam_id)
            .await?
            .ok_or(ExamGuardError::ExamNotFound { exam_id })
    }

    /// Get the full exam view: exam plus lecturers, rules and checklist
    pub async fn get_exam_detail(&self, exam_id: i64) -> Result<ExamDetail> {
        let exam = self.get_exam(exam_id).await?;
        let lecturers = self.lecturer_repository.get_for_exam(exam_id).await?;
        let rules = self.exam_repository.get_rules(exam_id).await?;
        let checklist = self.exam_repository.get_checklist(exam_id).await?;

        Ok(ExamDetail {
            exam,
            lecturers,
            rules,
            checklist,
        })
    }

    /// List exams with pagination, ordered by schedule
    pub async fn list_exams(&self, limit: i64, offset: i64) -> Result<Vec<Exam>> {
        debug!(limit = limit, offset = offset, "Listing exams");

        super::validate_pagination(limit, offset)?;

        self.exam_repository.list(limit, offset).await
    }

    /// Update exam fields; absent fields keep their stored values
    pub async fn update_exam(&self, exam_id: i64, request: UpdateExamRequest) -> Result<Exam> {
        debug!(exam_id = exam_id, "Updating exam");

        let existing = self.get_exam(exam_id).await?;

        if let Some(course_name) = &request.course_name {
            if course_name.trim().is_empty() {
                return Err(ExamGuardError::InvalidInput(
                    "Course name cannot be empty".to_string(),
                ));
            }
        }
        if let Some(course_code) = &request.course_code {
            if course_code.trim().is_empty() {
                return Err(ExamGuardError::InvalidInput(
                    "Course code cannot be empty".to_string(),
                ));
            }
        }

        // Time ordering must hold for the merged row, not just the patch
        let start = request.start_time.unwrap_or(existing.start_time);
        let end = request.end_time.unwrap_or(existing.end_time);
        if start >= end {
            return Err(ExamGuardError::InvalidInput(
                "Exam start time must be before end time".to_string(),
            ));
        }

        let exam = self
            .exam_repository
            .update(exam_id, request)
            .await?
            .ok_or(ExamGuardError::ExamNotFound { exam_id })?;

        info!(exam_id = exam.id, "Exam updated");
        Ok(exam)
    }

    /// Delete an exam and everything attached to it
    pub async fn delete_exam(&self, exam_id: i64) -> Result<()> {
        debug!(exam_id = exam_id, "Deleting exam");

        if !self.exam_repository.delete(exam_id).await? {
            return Err(ExamGuardError::ExamNotFound { exam_id });
        }

        info!(exam_id = exam_id, "Exam deleted");
        Ok(())
    }

    /// Create a new lecturer
    pub async fn create_lecturer(&self, request: CreateLecturerRequest) -> Result<Lecturer> {
        debug!(name = %request.name, "Creating lecturer");

        validate_lecturer_request(&request)?;

        let lecturer = self.lecturer_repository.create(request).await?;
        info!(lecturer_id = lecturer.id, "Lecturer created");

        Ok(lecturer)
    }

    /// List lecturers with pagination
    pub async fn list_lecturers(&self, limit: i64, offset: i64) -> Result<Vec<Lecturer>> {
        super::validate_pagination(limit, offset)?;

        self.lecturer_repository.list(limit, offset).await
    }

    /// Attach an existing lecturer to an exam
    pub async fn attach_lecturer(&self, exam_id: i64, lecturer_id: i64) -> Result<()> {
        debug!(
            exam_id = exam_id,
            lecturer_id = lecturer_id,
            "Attaching lecturer to exam"
        );

        self.get_exam(exam_id).await?;
        self.lecturer_repository
            .find_by_id(lecturer_id)
            .await?
            .ok_or(ExamGuardError::LecturerNotFound { lecturer_id })?;

        self.lecturer_repository
            .attach_to_exam(exam_id, lecturer_id)
            .await?;

        info!(
            exam_id = exam_id,
            lecturer_id = lecturer_id,
            "Lecturer attached"
        );
        Ok(())
    }

    /// Detach a lecturer from an exam
    pub async fn detach_lecturer(&self, exam_id: i64, lecturer_id: i64) -> Result<()> {
        debug!(
            exam_id = exam_id,
            lecturer_id = lecturer_id,
            "Detaching lecturer from exam"
        );

        self.get_exam(exam_id).await?;

        if !self
            .lecturer_repository
            .detach_from_exam(exam_id, lecturer_id)
            .await?
        {
            return Err(ExamGuardError::LecturerNotFound { lecturer_id });
        }

        info!(
            exam_id = exam_id,
            lecturer_id = lecturer_id,
            "Lecturer detached"
        );
        Ok(())
    }

    /// Add a rule to an exam
    pub async fn add_rule(&self, exam_id: i64, request: CreateRuleRequest) -> Result<Rule> {
        debug!(exam_id = exam_id, icon = %request.icon, "Adding rule");

        self.get_exam(exam_id).await?;

        let label = request
            .label
            .unwrap_or_else(|| request.icon.default_label().to_string());
        if label.trim().is_empty() {
            return Err(ExamGuardError::InvalidInput(
                "Rule label cannot be empty".to_string(),
            ));
        }

        self.exam_repository
            .add_rule(exam_id, label, request.icon, request.allowed)
            .await
    }

    /// Update a rule's label or allowed flag
    pub async fn update_rule(&self, rule_id: i64, request: UpdateRuleRequest) -> Result<Rule> {
        debug!(rule_id = rule_id, "Updating rule");

        if let Some(label) = &request.label {
            if label.trim().is_empty() {
                return Err(ExamGuardError::InvalidInput(
                    "Rule label cannot be empty".to_string(),
                ));
            }
        }

        self.exam_repository
            .update_rule(rule_id, request)
            .await?
            .ok_or(ExamGuardError::RuleNotFound { rule_id })
    }

    /// Remove a rule from an exam
    pub async fn delete_rule(&self, rule_id: i64) -> Result<()> {
        if !self.exam_repository.delete_rule(rule_id).await? {
            return Err(ExamGuardError::RuleNotFound { rule_id });
        }

        Ok(())
    }

    /// Add a checklist item to an exam
    pub async fn add_checklist_item(
        &self,
        exam_id: i64,
        request: CreateChecklistItemRequest,
    ) -> Result<ChecklistItem> {
        debug!(exam_id = exam_id, "Adding checklist item");

        self.get_exam(exam_id).await?;

        if request.description.trim().is_empty() {
            return Err(ExamGuardError::InvalidInput(
                "Checklist item description cannot be empty".to_string(),
            ));
        }

        self.exam_repository
            .add_checklist_item(exam_id, request.description, request.is_done)
            .await
    }

    /// Update a checklist item
    pub async fn update_checklist_item(
        &self,
        item_id: i64,
        request: UpdateChecklistItemRequest,
    ) -> Result<ChecklistItem> {
        debug!(item_id = item_id, "Updating checklist item");

        if let Some(description) = &request.description {
            if description.trim().is_empty() {
                return Err(ExamGuardError::InvalidInput(
                    "Checklist item description cannot be empty".to_string(),
                ));
            }
        }

        self.exam_repository
            .update_checklist_item(item_id, request)
            .await?
            .ok_or(ExamGuardError::ChecklistItemNotFound { item_id })
    }

    /// Remove a checklist item
    pub async fn delete_checklist_item(&self, item_id: i64) -> Result<()> {
        if !self.exam_repository.delete_checklist_item(item_id).await? {
            return Err(ExamGuardError::ChecklistItemNotFound { item_id });
        }

        Ok(())
    }

    /// Create the rule set for a fresh exam
    ///
    /// Without explicit rules every exam still gets one rule per icon,
    /// all forbidden.
    async fn materialize_rules(&self, exam_id: i64, rules: Vec<CreateRuleRequest>) -> Result<()> {
        if rules.is_empty() {
            for icon in RuleIcon::ALL {
                self.exam_repository
                    .add_rule(exam_id, icon.default_label().to_string(), icon, false)
                    .await?;
            }
            return Ok(());
        }

        for rule in rules {
            let label = rule
                .label
                .unwrap_or_else(|| rule.icon.default_label().to_string());
            self.exam_repository
                .add_rule(exam_id, label, rule.icon, rule.allowed)
                .await?;
        }

        Ok(())
    }
}

/// Validate an exam creation request
fn validate_exam_request(request: &CreateExamRequest) -> Result<()> {
    if request.course_name.trim().is_empty() {
        return Err(ExamGuardError::InvalidInput(
            "Course name cannot be empty".to_string(),
        ));
    }

    if request.course_code.trim().is_empty() {
        return Err(ExamGuardError::InvalidInput(
            "Course code cannot be empty".to_string(),
        ));
    }

    if request.location.trim().is_empty() {
        return Err(ExamGuardError::InvalidInput(
            "Location cannot be empty".to_string(),
        ));
    }

    if request.start_time >= request.end_time {
        return Err(ExamGuardError::InvalidInput(
            "Exam start time must be before end time".to_string(),
        ));
    }

    Ok(())
}

/// Validate a lecturer creation request
fn validate_lecturer_request(request: &CreateLecturerRequest) -> Result<()> {
    if request.name.trim().is_empty() {
        return Err(ExamGuardError::InvalidInput(
            "Lecturer name cannot be empty".to_string(),
        ));
    }

    if let Some(email) = &request.email {
        if !helpers::is_valid_email(email) {
            return Err(ExamGuardError::InvalidInput(format!(
                "Invalid email address: {}",
                email
            )));
        }
    }

    if let Some(phone) = &request.phone {
        if !helpers::is_valid_phone(phone) {
            return Err(ExamGuardError::InvalidInput(format!(
                "Invalid phone number: {}",
                phone
            )));
        }
    }

    Ok(())
}
