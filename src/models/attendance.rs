//! Attendance model
//!
//! One row per student per exam sitting. The student reference is embedded
//! (registry identifier, displayed ID number, name); there is no separate
//! student table behind it.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use chrono::{DateTime, Utc};
use sqlx::FromRow;

use crate::utils::errors::ExamGuardError;

/// Attendance status of a student; the enumeration is closed
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type)]
#[serde(rename_all = "lowercase")]
#[sqlx(type_name = "attendance_status", rename_all = "lowercase")]
pub enum AttendanceStatus {
    Present,
    Absent,
}

impl fmt::Display for AttendanceStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let tag = match self {
            AttendanceStatus::Present => "present",
            AttendanceStatus::Absent => "absent",
        };
        write!(f, "{}", tag)
    }
}

impl FromStr for AttendanceStatus {
    type Err = ExamGuardError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "present" => Ok(AttendanceStatus::Present),
            "absent" => Ok(AttendanceStatus::Absent),
            other => Err(ExamGuardError::InvalidInput(format!(
                "Unknown attendance status: {}",
                other
            ))),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct AttendanceRecord {
    pub id: i64,
    pub exam_id: i64,
    pub student_id: i64,
    pub student_number: String,
    pub student_name: String,
    pub seq_number: i32,
    pub status: AttendanceStatus,
    pub photo_ref: Option<String>,
    pub is_on_toilet: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateAttendanceRequest {
    pub student_id: i64,
    pub student_number: String,
    pub student_name: String,
    /// Sequence number within the exam; the next free one is assigned
    /// when omitted
    pub seq_number: Option<i32>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct UpdateAttendanceRequest {
    pub status: Option<AttendanceStatus>,
    pub is_on_toilet: Option<bool>,
    pub photo_ref: Option<String>,
}
