//! Test data helpers for creating test objects
//!
//! This module provides helper functions for building the request payloads
//! and CSV import bodies used across the integration tests.

use chrono::{NaiveDate, NaiveTime};

use ExamGuard::models::{
    CreateAttendanceRequest, CreateExamRequest, CreateLecturerRequest, CreateUserRequest,
};

/// Column header line understood by the import endpoint
pub const CSV_HEADER: &str = "course_name,course_code,lecturer_1,lecturer_2,lecturer_3,lecturer_4,lecturer_5,exam_date,start_time,end_time,location,calculator,book,phone,headphones";

/// Helper function to create a test user request
pub fn create_test_user_request(username: &str, full_name: &str) -> CreateUserRequest {
    CreateUserRequest {
        username: username.to_string(),
        full_name: full_name.to_string(),
        email: Some(format!("{}@example.edu", username)),
        role: None,
    }
}

/// Helper function to create a test exam request
///
/// The sitting is scheduled for a fixed morning slot; lecturers, rules
/// and checklist start out empty.
pub fn create_test_exam_request(course_name: &str, course_code: &str) -> CreateExamRequest {
    CreateExamRequest {
        course_name: course_name.to_string(),
        course_code: course_code.to_string(),
        exam_date: NaiveDate::from_ymd_opt(2026, 6, 15).expect("valid date"),
        start_time: NaiveTime::from_hms_opt(9, 0, 0).expect("valid time"),
        end_time: NaiveTime::from_hms_opt(11, 0, 0).expect("valid time"),
        location: "Hall A".to_string(),
        lecturer_ids: vec![],
        rules: vec![],
        checklist: vec![],
        created_by: None,
    }
}

/// Helper function to create a test lecturer request
pub fn create_test_lecturer_request(name: &str) -> CreateLecturerRequest {
    CreateLecturerRequest {
        name: name.to_string(),
        email: None,
        phone: None,
    }
}

/// Helper function to create a test attendance registration
pub fn create_test_attendance_request(
    student_id: i64,
    student_number: &str,
    student_name: &str,
) -> CreateAttendanceRequest {
    CreateAttendanceRequest {
        student_id,
        student_number: student_number.to_string(),
        student_name: student_name.to_string(),
        seq_number: None,
    }
}

/// Build one well-formed CSV data row for the given course
pub fn csv_exam_row(course_name: &str, course_code: &str, exam_date: &str, lecturer: &str) -> String {
    format!(
        "{},{},{},,,,,{},09:00,11:00,Hall A,yes,no,no,no",
        course_name, course_code, lecturer, exam_date
    )
}

/// Assemble a CSV import body from data rows
pub fn build_import_csv(rows: &[String]) -> String {
    let mut body = String::from(CSV_HEADER);
    for row in rows {
        body.push('\n');
        body.push_str(row);
    }
    body.push('\n');
    body
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_exam_request_defaults() {
        let request = create_test_exam_request("Databases", "CS2102");
        assert_eq!(request.course_code, "CS2102");
        assert!(request.start_time < request.end_time);
        assert!(request.lecturer_ids.is_empty());
        assert!(request.created_by.is_none());
    }

    #[test]
    fn test_csv_row_has_all_columns() {
        let header_columns = CSV_HEADER.split(',').count();
        let row = csv_exam_row("Databases", "CS2102", "2026-06-15", "Dr. Sari");
        assert_eq!(row.split(',').count(), header_columns);
    }

    #[test]
    fn test_import_body_layout() {
        let rows = vec![csv_exam_row("Databases", "CS2102", "2026-06-15", "Dr. Sari")];
        let body = build_import_csv(&rows);
        assert!(body.starts_with(CSV_HEADER));
        assert_eq!(body.lines().count(), 2);
    }
}
