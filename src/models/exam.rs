//! Exam model
//!
//! An exam aggregates the scheduled sitting itself plus its lecturers,
//! its item rules (calculator/book/phone/headphones policy) and its
//! preparation checklist.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use chrono::{DateTime, NaiveDate, NaiveTime, Utc};
use sqlx::FromRow;

use crate::utils::errors::ExamGuardError;

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Exam {
    pub id: i64,
    pub course_name: String,
    pub course_code: String,
    pub exam_date: NaiveDate,
    pub start_time: NaiveTime,
    pub end_time: NaiveTime,
    pub location: String,
    pub created_by: Option<i64>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Lecturer {
    pub id: i64,
    pub name: String,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Icon tag of an exam rule; the enumeration is closed
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type)]
#[serde(rename_all = "lowercase")]
#[sqlx(type_name = "rule_icon", rename_all = "lowercase")]
pub enum RuleIcon {
    Calculator,
    Book,
    Phone,
    Headphones,
}

impl RuleIcon {
    pub const ALL: [RuleIcon; 4] = [
        RuleIcon::Calculator,
        RuleIcon::Book,
        RuleIcon::Phone,
        RuleIcon::Headphones,
    ];

    /// Human-readable default label for a rule with this icon
    pub fn default_label(&self) -> &'static str {
        match self {
            RuleIcon::Calculator => "Calculator",
            RuleIcon::Book => "Book",
            RuleIcon::Phone => "Phone",
            RuleIcon::Headphones => "Headphones",
        }
    }
}

impl fmt::Display for RuleIcon {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let tag = match self {
            RuleIcon::Calculator => "calculator",
            RuleIcon::Book => "book",
            RuleIcon::Phone => "phone",
            RuleIcon::Headphones => "headphones",
        };
        write!(f, "{}", tag)
    }
}

impl FromStr for RuleIcon {
    type Err = ExamGuardError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "calculator" => Ok(RuleIcon::Calculator),
            "book" => Ok(RuleIcon::Book),
            "phone" => Ok(RuleIcon::Phone),
            "headphones" => Ok(RuleIcon::Headphones),
            other => Err(ExamGuardError::InvalidInput(format!(
                "Unknown rule icon: {}",
                other
            ))),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Rule {
    pub id: i64,
    pub exam_id: i64,
    pub label: String,
    pub icon: RuleIcon,
    pub allowed: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct ChecklistItem {
    pub id: i64,
    pub exam_id: i64,
    pub description: String,
    pub is_done: bool,
}

/// Full exam view: the exam row plus its lecturers, rules and checklist
#[derive(Debug, Clone, Serialize)]
pub struct ExamDetail {
    #[serde(flatten)]
    pub exam: Exam,
    pub lecturers: Vec<Lecturer>,
    pub rules: Vec<Rule>,
    pub checklist: Vec<ChecklistItem>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateExamRequest {
    pub course_name: String,
    pub course_code: String,
    pub exam_date: NaiveDate,
    pub start_time: NaiveTime,
    pub end_time: NaiveTime,
    pub location: String,
    #[serde(default)]
    pub lecturer_ids: Vec<i64>,
    #[serde(default)]
    pub rules: Vec<CreateRuleRequest>,
    #[serde(default)]
    pub checklist: Vec<CreateChecklistItemRequest>,
    pub created_by: Option<i64>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct UpdateExamRequest {
    pub course_name: Option<String>,
    pub course_code: Option<String>,
    pub exam_date: Option<NaiveDate>,
    pub start_time: Option<NaiveTime>,
    pub end_time: Option<NaiveTime>,
    pub location: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateLecturerRequest {
    pub name: String,
    pub email: Option<String>,
    pub phone: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AttachLecturerRequest {
    pub lecturer_id: i64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateRuleRequest {
    pub label: Option<String>,
    pub icon: RuleIcon,
    #[serde(default)]
    pub allowed: bool,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct UpdateRuleRequest {
    pub label: Option<String>,
    pub allowed: Option<bool>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateChecklistItemRequest {
    pub description: String,
    #[serde(default)]
    pub is_done: bool,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct UpdateChecklistItemRequest {
    pub description: Option<String>,
    pub is_done: Option<bool>,
}
