//! CSV import integration tests
//!
//! End-to-end import runs against a real PostgreSQL (skipped when none
//! is reachable): created exams carry their permission rules and
//! lecturers, bad rows are reported in place, duplicates are refused on
//! a second run, and the batch lands in the audit trail when an acting
//! user is given.

mod helpers;

use assert_matches::assert_matches;
use serial_test::serial;

use ExamGuard::config::Settings;
use ExamGuard::database::DatabaseService;
use ExamGuard::models::{AuditFilter, RuleIcon};
use ExamGuard::services::ServiceFactory;
use ExamGuard::ExamGuardError;

use helpers::*;

async fn setup() -> Option<(DatabaseService, ServiceFactory)> {
    let pool = connect_test_database().await?;
    let db = DatabaseService::new(pool);
    db.migrate().await.expect("Failed to run migrations");
    cleanup_database(db.pool()).await.expect("Failed to clean database");
    let services = ServiceFactory::new(&db, Settings::default());
    Some((db, services))
}

#[tokio::test]
#[serial]
async fn test_import_creates_exams_with_lecturers_and_rules() {
    let Some((db, services)) = setup().await else { return };

    let body = build_import_csv(&[
        "Databases,CS2102,Dr. Sari,Prof. Handoko,,,,2026-06-15,09:00,11:00,Hall A,yes,no,no,no"
            .to_string(),
        // Shares a lecturer with the first row
        "Algorithms,CS3230,Dr. Sari,,,,,2026-06-16,13:00,15:00,Hall B,no,yes,no,no".to_string(),
    ]);

    let report = services
        .import_service
        .import_csv(body.as_bytes(), None)
        .await
        .expect("Import failed");

    assert_eq!(report.total_rows, 2);
    assert_eq!(report.imported, 2);
    assert_eq!(report.failed, 0);
    assert!(report.errors.is_empty());

    let exams = db.exams.list(50, 0).await.expect("Failed to list exams");
    assert_eq!(exams.len(), 2);

    let databases = exams
        .iter()
        .find(|exam| exam.course_code == "CS2102")
        .expect("CS2102 missing");
    let rules = db
        .exams
        .get_rules(databases.id)
        .await
        .expect("Failed to read rules");
    assert_eq!(rules.len(), 4);
    let calculator = rules
        .iter()
        .find(|rule| rule.icon == RuleIcon::Calculator)
        .expect("calculator rule missing");
    assert!(calculator.allowed);
    assert!(rules
        .iter()
        .filter(|rule| rule.icon != RuleIcon::Calculator)
        .all(|rule| !rule.allowed));

    let lecturers = db
        .lecturers
        .get_for_exam(databases.id)
        .await
        .expect("Failed to read lecturers");
    assert_eq!(lecturers.len(), 2);

    // Shared names resolve to one lecturer record, not two
    assert_eq!(db.lecturers.count().await.expect("count failed"), 2);
}

#[tokio::test]
#[serial]
async fn test_import_continues_past_bad_rows() {
    let Some((db, services)) = setup().await else { return };

    let body = build_import_csv(&[
        csv_exam_row("Databases", "CS2102", "June 15th", "Dr. Sari"),
        csv_exam_row("Algorithms", "CS3230", "2026-06-16", "Dr. Chen"),
    ]);

    let report = services
        .import_service
        .import_csv(body.as_bytes(), None)
        .await
        .expect("Import failed");

    assert_eq!(report.total_rows, 2);
    assert_eq!(report.imported, 1);
    assert_eq!(report.failed, 1);
    assert_eq!(report.errors[0].row, 1);
    assert!(report.errors[0].message.contains("exam date"));

    assert_eq!(db.exams.count().await.expect("count failed"), 1);
}

#[tokio::test]
#[serial]
async fn test_import_refuses_duplicate_sittings() {
    let Some((db, services)) = setup().await else { return };

    let body = build_import_csv(&[csv_exam_row("Databases", "CS2102", "2026-06-15", "Dr. Sari")]);

    let first = services
        .import_service
        .import_csv(body.as_bytes(), None)
        .await
        .expect("Import failed");
    assert_eq!(first.imported, 1);

    // Same course and date again: reported per row, nothing created
    let second = services
        .import_service
        .import_csv(body.as_bytes(), None)
        .await
        .expect("Import failed");
    assert_eq!(second.imported, 0);
    assert_eq!(second.failed, 1);
    assert!(second.errors[0].message.contains("already exists"));

    assert_eq!(db.exams.count().await.expect("count failed"), 1);
}

#[tokio::test]
#[serial]
async fn test_import_records_audit_action_for_acting_user() {
    let Some((_db, services)) = setup().await else { return };

    let user = services
        .user_service
        .create_user(create_test_user_request("akim", "Alex Kim"))
        .await
        .expect("Failed to create user");

    let clean = build_import_csv(&[csv_exam_row("Databases", "CS2102", "2026-06-15", "Dr. Sari")]);
    services
        .import_service
        .import_csv(clean.as_bytes(), Some(user.id))
        .await
        .expect("Import failed");

    let dirty = build_import_csv(&[csv_exam_row("Algorithms", "CS3230", "bad-date", "Dr. Chen")]);
    services
        .import_service
        .import_csv(dirty.as_bytes(), Some(user.id))
        .await
        .expect("Import failed");

    let entries = services
        .audit_service
        .list_actions(AuditFilter {
            user_id: Some(user.id),
            action: Some("IMPORT_EXAMS".to_string()),
            ..Default::default()
        })
        .await
        .expect("Failed to list audit entries");

    assert_eq!(entries.len(), 2);
    assert_eq!(entries.iter().filter(|entry| entry.status).count(), 1);
    assert_eq!(entries.iter().filter(|entry| !entry.status).count(), 1);
    assert!(entries.iter().all(|entry| entry.exam_id.is_none()));
}

#[tokio::test]
#[serial]
async fn test_import_rejects_unknown_acting_user() {
    let Some((db, services)) = setup().await else { return };

    let body = build_import_csv(&[csv_exam_row("Databases", "CS2102", "2026-06-15", "Dr. Sari")]);
    let result = services.import_service.import_csv(body.as_bytes(), Some(9999)).await;

    assert_matches!(result, Err(ExamGuardError::UserNotFound { user_id: 9999 }));
    assert_eq!(db.exams.count().await.expect("count failed"), 0);
}
