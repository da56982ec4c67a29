//! Database integration tests
//!
//! These run against a real PostgreSQL (TEST_DATABASE_URL, falling back
//! to a local `examguard_test` database) and skip themselves when none
//! is reachable. They cover the repository layer and the service rules
//! that only show up with real rows: default rule materialization,
//! sequence-number assignment, the absence rule, and audit references
//! surviving exam deletion.

mod helpers;

use assert_matches::assert_matches;
use axum::body::Body;
use axum::http::{header, Request, StatusCode};
use http_body_util::BodyExt;
use serde_json::{json, Value};
use serial_test::serial;
use tower::ServiceExt;

use ExamGuard::config::Settings;
use ExamGuard::database::DatabaseService;
use ExamGuard::models::{
    AttendanceStatus, AuditFilter, CreateAuditActionRequest, RuleIcon, UpdateAttendanceRequest,
    UpdateExamRequest,
};
use ExamGuard::server::{build_router, AppState};
use ExamGuard::services::ServiceFactory;
use ExamGuard::ExamGuardError;

use helpers::*;

/// Connect, migrate and wipe, or skip the test
async fn setup() -> Option<(DatabaseService, ServiceFactory)> {
    let pool = connect_test_database().await?;
    let db = DatabaseService::new(pool);
    db.migrate().await.expect("Failed to run migrations");
    cleanup_database(db.pool()).await.expect("Failed to clean database");
    let services = ServiceFactory::new(&db, Settings::default());
    Some((db, services))
}

/// Build the full router over the live test pool
fn build_live_app(db: DatabaseService) -> axum::Router {
    let mut settings = Settings::default();
    settings.database.url = test_database_url();
    build_router(AppState::new(db, settings))
}

async fn read_json(response: axum::response::Response) -> Value {
    let bytes = response
        .into_body()
        .collect()
        .await
        .expect("body collect failed")
        .to_bytes();
    serde_json::from_slice(&bytes).expect("body is not JSON")
}

#[tokio::test]
#[serial]
async fn test_health_reports_ok_when_database_is_reachable() {
    let Some((db, _services)) = setup().await else { return };
    let app = build_live_app(db);

    let response = app
        .oneshot(
            Request::builder()
                .uri("/api/health")
                .body(Body::empty())
                .expect("request build failed"),
        )
        .await
        .expect("request failed");

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(read_json(response).await, json!({ "status": "OK" }));
}

#[tokio::test]
#[serial]
async fn test_update_user_over_http() {
    let Some((db, services)) = setup().await else { return };

    let user = services
        .user_service
        .create_user(create_test_user_request("akim", "Alex Kim"))
        .await
        .expect("Failed to create user");

    let app = build_live_app(db);

    let request = Request::builder()
        .method("PATCH")
        .uri(format!("/api/users/{}", user.id))
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(
            json!({ "full_name": "Alexandra Kim", "role": "supervisor" }).to_string(),
        ))
        .expect("request build failed");
    let response = app.clone().oneshot(request).await.expect("request failed");

    assert_eq!(response.status(), StatusCode::OK);
    let body = read_json(response).await;
    assert_eq!(body["full_name"], "Alexandra Kim");
    assert_eq!(body["role"], "supervisor");
    assert_eq!(body["username"], "akim");

    // Unknown user
    let request = Request::builder()
        .method("PATCH")
        .uri("/api/users/999999")
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(json!({ "full_name": "Nobody" }).to_string()))
        .expect("request build failed");
    let response = app.oneshot(request).await.expect("request failed");
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
#[serial]
async fn test_user_roundtrip() {
    let Some((db, services)) = setup().await else { return };

    let created = services
        .user_service
        .create_user(create_test_user_request("akim", "Alex Kim"))
        .await
        .expect("Failed to create user");
    assert_eq!(created.username, "akim");
    assert_eq!(created.role, "committee");

    let fetched = services
        .user_service
        .get_user(created.id)
        .await
        .expect("Failed to fetch user");
    assert_eq!(fetched.full_name, "Alex Kim");

    let by_name = db
        .users
        .find_by_username("akim")
        .await
        .expect("Failed to query by username");
    assert_eq!(by_name.map(|u| u.id), Some(created.id));
}

#[tokio::test]
#[serial]
async fn test_exam_without_rules_gets_the_four_defaults() {
    let Some((_db, services)) = setup().await else { return };

    let detail = services
        .exam_service
        .create_exam(create_test_exam_request("Databases", "CS2102"))
        .await
        .expect("Failed to create exam");

    assert_eq!(detail.rules.len(), 4);
    assert!(detail.rules.iter().all(|rule| !rule.allowed));
    for icon in RuleIcon::ALL {
        assert!(detail.rules.iter().any(|rule| rule.icon == icon));
    }
}

#[tokio::test]
#[serial]
async fn test_exam_partial_update_keeps_unset_fields() {
    let Some((_db, services)) = setup().await else { return };

    let detail = services
        .exam_service
        .create_exam(create_test_exam_request("Databases", "CS2102"))
        .await
        .expect("Failed to create exam");

    let updated = services
        .exam_service
        .update_exam(
            detail.exam.id,
            UpdateExamRequest {
                location: Some("Hall C".to_string()),
                ..Default::default()
            },
        )
        .await
        .expect("Failed to update exam");

    assert_eq!(updated.location, "Hall C");
    assert_eq!(updated.course_name, "Databases");
    assert_eq!(updated.start_time, detail.exam.start_time);
}

#[tokio::test]
#[serial]
async fn test_attendance_roster_and_absence_rule() {
    let Some((_db, services)) = setup().await else { return };

    let detail = services
        .exam_service
        .create_exam(create_test_exam_request("Databases", "CS2102"))
        .await
        .expect("Failed to create exam");
    let exam_id = detail.exam.id;

    // Sequence numbers are assigned from the roster
    let first = services
        .attendance_service
        .register_student(exam_id, create_test_attendance_request(1, "S-1042", "Alex Kim"))
        .await
        .expect("Failed to register first student");
    let second = services
        .attendance_service
        .register_student(exam_id, create_test_attendance_request(2, "S-1043", "Dewi Sari"))
        .await
        .expect("Failed to register second student");
    assert_eq!(first.seq_number, 1);
    assert_eq!(second.seq_number, 2);
    assert_eq!(first.status, AttendanceStatus::Absent);

    // Double registration of the same student number is rejected
    let duplicate = services
        .attendance_service
        .register_student(exam_id, create_test_attendance_request(3, "S-1042", "Imposter"))
        .await;
    assert_matches!(duplicate, Err(ExamGuardError::InvalidInput(_)));

    // Present and on a toilet break
    let updated = services
        .attendance_service
        .update_record(
            first.id,
            UpdateAttendanceRequest {
                status: Some(AttendanceStatus::Present),
                is_on_toilet: Some(true),
                photo_ref: None,
            },
        )
        .await
        .expect("Failed to update record");
    assert_eq!(updated.status, AttendanceStatus::Present);
    assert!(updated.is_on_toilet);

    // Marking absent without a flag clears the break
    let absent = services
        .attendance_service
        .update_record(
            first.id,
            UpdateAttendanceRequest {
                status: Some(AttendanceStatus::Absent),
                is_on_toilet: None,
                photo_ref: None,
            },
        )
        .await
        .expect("Failed to update record");
    assert_eq!(absent.status, AttendanceStatus::Absent);
    assert!(!absent.is_on_toilet);

    let roster = services
        .attendance_service
        .list_for_exam(exam_id)
        .await
        .expect("Failed to list roster");
    assert_eq!(roster.len(), 2);
    assert_eq!(roster[0].seq_number, 1);
}

#[tokio::test]
#[serial]
async fn test_audit_trail_references() {
    let Some((_db, services)) = setup().await else { return };

    let user = services
        .user_service
        .create_user(create_test_user_request("akim", "Alex Kim"))
        .await
        .expect("Failed to create user");

    // Unknown actor is rejected
    let orphan = services
        .audit_service
        .record_action(CreateAuditActionRequest {
            user_id: user.id + 1000,
            action: "LOGIN".to_string(),
            exam_id: None,
            status: true,
        })
        .await;
    assert_matches!(orphan, Err(ExamGuardError::UserNotFound { .. }));

    // An entry needs no exam reference
    let login = services
        .audit_service
        .record_action(CreateAuditActionRequest {
            user_id: user.id,
            action: "LOGIN".to_string(),
            exam_id: None,
            status: true,
        })
        .await
        .expect("Failed to record action");
    assert!(login.exam_id.is_none());

    // An exam-scoped entry survives exam deletion with a cleared reference
    let detail = services
        .exam_service
        .create_exam(create_test_exam_request("Databases", "CS2102"))
        .await
        .expect("Failed to create exam");
    services
        .audit_service
        .record_action(CreateAuditActionRequest {
            user_id: user.id,
            action: "DELETE_EXAM".to_string(),
            exam_id: Some(detail.exam.id),
            status: true,
        })
        .await
        .expect("Failed to record action");
    services
        .exam_service
        .delete_exam(detail.exam.id)
        .await
        .expect("Failed to delete exam");

    let deletions = services
        .audit_service
        .list_actions(AuditFilter {
            action: Some("DELETE_EXAM".to_string()),
            ..Default::default()
        })
        .await
        .expect("Failed to list actions");
    assert_eq!(deletions.len(), 1);
    assert!(deletions[0].exam_id.is_none());

    let successes = services
        .audit_service
        .list_actions(AuditFilter {
            user_id: Some(user.id),
            status: Some(true),
            ..Default::default()
        })
        .await
        .expect("Failed to list actions");
    assert_eq!(successes.len(), 2);
}

#[tokio::test]
#[serial]
async fn test_stats_counts_entities() {
    let Some((db, services)) = setup().await else { return };

    services
        .user_service
        .create_user(create_test_user_request("akim", "Alex Kim"))
        .await
        .expect("Failed to create user");
    let detail = services
        .exam_service
        .create_exam(create_test_exam_request("Databases", "CS2102"))
        .await
        .expect("Failed to create exam");
    services
        .attendance_service
        .register_student(
            detail.exam.id,
            create_test_attendance_request(1, "S-1042", "Alex Kim"),
        )
        .await
        .expect("Failed to register student");

    let stats = db.get_stats().await.expect("Failed to collect stats");
    assert_eq!(stats["exams"], 1);
    assert_eq!(stats["users"], 1);
    assert_eq!(stats["attendance"]["absent"], 1);
    assert_eq!(stats["attendance"]["total"], 1);
}

#[tokio::test]
#[serial]
async fn test_exam_deletion_cascades_to_children() {
    let Some((db, services)) = setup().await else { return };

    let lecturer = services
        .exam_service
        .create_lecturer(create_test_lecturer_request("Dr. Sari"))
        .await
        .expect("Failed to create lecturer");

    let mut request = create_test_exam_request("Databases", "CS2102");
    request.lecturer_ids = vec![lecturer.id];
    let detail = services
        .exam_service
        .create_exam(request)
        .await
        .expect("Failed to create exam");
    let exam_id = detail.exam.id;
    assert_eq!(detail.lecturers.len(), 1);

    services
        .exam_service
        .delete_exam(exam_id)
        .await
        .expect("Failed to delete exam");

    let missing = services.exam_service.get_exam_detail(exam_id).await;
    assert_matches!(missing, Err(ExamGuardError::ExamNotFound { .. }));

    // Children are gone; the lecturer record itself stays
    assert_eq!(db.exams.get_rules(exam_id).await.expect("query failed").len(), 0);
    assert!(db
        .lecturers
        .find_by_id(lecturer.id)
        .await
        .expect("query failed")
        .is_some());
}
