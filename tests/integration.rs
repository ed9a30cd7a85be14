//! Integration tests for the time and leave engine HTTP API.
//!
//! This suite covers the full surface:
//! - Clock-in/clock-out cycles and arrival classification
//! - Leave application, approval, rejection, cancellation
//! - Sandwich-rule day counting over weekends
//! - Balance queries and the pending/available split
//! - Attendance regularization
//! - Comp-off grants
//! - Error envelope and status codes

use axum::{
    body::Body,
    http::{Request, StatusCode},
    Router,
};
use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde_json::{json, Value};
use std::str::FromStr;
use tower::ServiceExt;
use uuid::Uuid;

use hr_engine::api::{create_router, AppState};
use hr_engine::config::ConfigLoader;
use hr_engine::models::{Employee, Gender, Role};
use hr_engine::store::MemStore;

// =============================================================================
// Test Helpers
// =============================================================================

struct TestApp {
    router: Router,
    employee_id: Uuid,
    manager_id: Uuid,
}

fn test_app() -> TestApp {
    let loader = ConfigLoader::load("./config/hr").expect("Failed to load config");
    let mut store = MemStore::new(loader.config().clone());

    let manager_id = Uuid::new_v4();
    store.add_employee(
        Employee {
            id: manager_id,
            gender: Gender::Female,
            reporting_manager_id: None,
            l2_manager_id: None,
            location: None,
        },
        vec![Role::Manager],
        2026,
    );

    let employee_id = Uuid::new_v4();
    store.add_employee(
        Employee {
            id: employee_id,
            gender: Gender::Male,
            reporting_manager_id: Some(manager_id),
            l2_manager_id: None,
            location: Some("bengaluru".to_string()),
        },
        vec![Role::Employee],
        2026,
    );
    store
        .assign_shift(
            employee_id,
            "general",
            "standard_weekend",
            NaiveDate::from_ymd_opt(2026, 1, 1).unwrap(),
        )
        .unwrap();

    TestApp {
        router: create_router(AppState::new(store)),
        employee_id,
        manager_id,
    }
}

fn normalize_decimal(s: &str) -> String {
    Decimal::from_str(s).unwrap().normalize().to_string()
}

fn assert_decimal_eq(value: &Value, expected: &str) {
    let actual = value.as_str().unwrap();
    assert_eq!(
        normalize_decimal(actual),
        normalize_decimal(expected),
        "Expected {}, got {}",
        expected,
        actual
    );
}

async fn post(router: &Router, uri: &str, body: Value) -> (StatusCode, Value) {
    let response = router
        .clone()
        .oneshot(
            Request::builder()
                .method("POST")
                .uri(uri)
                .header("Content-Type", "application/json")
                .body(Body::from(body.to_string()))
                .unwrap(),
        )
        .await
        .unwrap();

    let status = response.status();
    let body_bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    let json: Value = serde_json::from_slice(&body_bytes).unwrap();

    (status, json)
}

async fn get(router: &Router, uri: &str) -> (StatusCode, Value) {
    let response = router
        .clone()
        .oneshot(
            Request::builder()
                .method("GET")
                .uri(uri)
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    let status = response.status();
    let body_bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    let json: Value = serde_json::from_slice(&body_bytes).unwrap();

    (status, json)
}

async fn apply_leave(
    app: &TestApp,
    leave_type: &str,
    today: &str,
    from: &str,
    to: &str,
) -> (StatusCode, Value) {
    post(
        &app.router,
        "/leave/apply",
        json!({
            "employee_id": app.employee_id,
            "leave_type": leave_type,
            "today": today,
            "from_date": from,
            "to_date": to,
            "reason": "integration test"
        }),
    )
    .await
}

async fn balance(app: &TestApp, leave_type: &str) -> Value {
    let uri = format!(
        "/leave/balance?employee_id={}&leave_type={}&year=2026",
        app.employee_id, leave_type
    );
    let (status, body) = get(&app.router, &uri).await;
    assert_eq!(status, StatusCode::OK);
    body
}

// =============================================================================
// Attendance
// =============================================================================

#[tokio::test]
async fn test_clock_cycle_full_day() {
    let app = test_app();

    let (status, body) = post(
        &app.router,
        "/attendance/clock-in",
        json!({
            "employee_id": app.employee_id,
            "timestamp": "2026-03-02T09:05:00"
        }),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["record_created"], json!(true));
    assert_eq!(body["record"]["arrival_status"], json!("on_time"));
    assert_eq!(body["record"]["status"], json!("present"));

    let (status, body) = post(
        &app.router,
        "/attendance/clock-out",
        json!({
            "employee_id": app.employee_id,
            "timestamp": "2026-03-02T18:05:00"
        }),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["record"]["status"], json!("present"));
    assert_eq!(body["record"]["total_work_minutes"], json!(540));
    assert_eq!(body["record"]["effective_work_minutes"], json!(480));
    assert_eq!(body["entry"]["duration_minutes"], json!(540));
}

#[tokio::test]
async fn test_late_arrival_classification() {
    let app = test_app();

    let (status, body) = post(
        &app.router,
        "/attendance/clock-in",
        json!({
            "employee_id": app.employee_id,
            "timestamp": "2026-03-02T09:25:00"
        }),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["record"]["arrival_status"], json!("late"));
}

#[tokio::test]
async fn test_double_clock_in_conflicts() {
    let app = test_app();

    post(
        &app.router,
        "/attendance/clock-in",
        json!({
            "employee_id": app.employee_id,
            "timestamp": "2026-03-02T09:05:00"
        }),
    )
    .await;

    let (status, body) = post(
        &app.router,
        "/attendance/clock-in",
        json!({
            "employee_id": app.employee_id,
            "timestamp": "2026-03-02T09:10:00"
        }),
    )
    .await;
    assert_eq!(status, StatusCode::CONFLICT);
    assert_eq!(body["code"], json!("CONFLICT"));
}

#[tokio::test]
async fn test_clock_out_without_clock_in() {
    let app = test_app();

    let (status, body) = post(
        &app.router,
        "/attendance/clock-out",
        json!({
            "employee_id": app.employee_id,
            "timestamp": "2026-03-02T18:00:00"
        }),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["code"], json!("VALIDATION_ERROR"));
}

#[tokio::test]
async fn test_clock_in_unknown_employee() {
    let app = test_app();

    let (status, body) = post(
        &app.router,
        "/attendance/clock-in",
        json!({
            "employee_id": Uuid::new_v4(),
            "timestamp": "2026-03-02T09:00:00"
        }),
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["code"], json!("EMPLOYEE_NOT_FOUND"));
}

// =============================================================================
// Leave lifecycle
// =============================================================================

#[tokio::test]
async fn test_leave_lifecycle_and_balance_invariant() {
    let app = test_app();

    // Apply: Mon-Wed, 3 days.
    let (status, request) =
        apply_leave(&app, "casual_leave", "2026-02-20", "2026-03-02", "2026-03-04").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(request["status"], json!("pending"));
    assert_decimal_eq(&request["total_days"], "3");
    let request_id = request["id"].as_str().unwrap().to_string();

    // Pending days reduce availability but not the stored balance.
    let summary = balance(&app, "casual_leave").await;
    assert_decimal_eq(&summary["current"], "12");
    assert_decimal_eq(&summary["pending"], "3");
    assert_decimal_eq(&summary["available"], "9");

    // Approve deducts.
    let (status, approved) = post(
        &app.router,
        &format!("/leave/{}/approve", request_id),
        json!({
            "actor_id": app.manager_id,
            "timestamp": "2026-02-21T10:00:00"
        }),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(approved["status"], json!("approved"));

    let summary = balance(&app, "casual_leave").await;
    assert_decimal_eq(&summary["current"], "9");
    assert_decimal_eq(&summary["available"], "9");

    // Cancel restores.
    let (status, cancelled) = post(
        &app.router,
        &format!("/leave/{}/cancel", request_id),
        json!({
            "actor_id": app.employee_id,
            "timestamp": "2026-02-25T10:00:00"
        }),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(cancelled["status"], json!("cancelled"));

    let summary = balance(&app, "casual_leave").await;
    assert_decimal_eq(&summary["current"], "12");
    assert_decimal_eq(&summary["available"], "12");

    // Re-apply over the same dates succeeds; cancelled requests do not
    // block.
    let (status, reapplied) =
        apply_leave(&app, "casual_leave", "2026-02-25", "2026-03-02", "2026-03-04").await;
    assert_eq!(status, StatusCode::OK);
    assert_decimal_eq(&reapplied["total_days"], "3");
}

#[tokio::test]
async fn test_sandwich_rule_counts_interior_weekend() {
    let app = test_app();

    // Friday 2026-01-16 through Monday 2026-01-19.
    let (status, request) =
        apply_leave(&app, "casual_leave", "2026-01-10", "2026-01-16", "2026-01-19").await;
    assert_eq!(status, StatusCode::OK);
    assert_decimal_eq(&request["total_days"], "4");
    assert_eq!(request["day_details"]["2026-01-17"], json!("full_day"));
    assert_eq!(request["day_details"]["2026-01-18"], json!("full_day"));
}

#[tokio::test]
async fn test_trailing_weekend_not_sandwiched() {
    let app = test_app();

    // Thursday 2026-01-15 through Saturday 2026-01-17; the weekend has no
    // working leave day after it.
    let (status, request) =
        apply_leave(&app, "casual_leave", "2026-01-10", "2026-01-15", "2026-01-17").await;
    assert_eq!(status, StatusCode::OK);
    assert_decimal_eq(&request["total_days"], "2");
    assert_eq!(request["day_details"]["2026-01-17"], json!("weekend"));
}

#[tokio::test]
async fn test_half_day_override() {
    let app = test_app();

    let (status, request) = post(
        &app.router,
        "/leave/apply",
        json!({
            "employee_id": app.employee_id,
            "leave_type": "casual_leave",
            "today": "2026-02-20",
            "from_date": "2026-03-02",
            "to_date": "2026-03-02",
            "half_day_overrides": {"2026-03-02": "first_half"},
            "reason": "morning errand"
        }),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_decimal_eq(&request["total_days"], "0.5");
    assert_eq!(request["day_details"]["2026-03-02"], json!("first_half"));
}

#[tokio::test]
async fn test_overlap_rejected_across_leave_types() {
    let app = test_app();

    let (status, _) =
        apply_leave(&app, "casual_leave", "2026-02-20", "2026-03-02", "2026-03-04").await;
    assert_eq!(status, StatusCode::OK);

    let (status, body) =
        apply_leave(&app, "sick_leave", "2026-02-20", "2026-03-04", "2026-03-05").await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["code"], json!("VALIDATION_ERROR"));
    assert!(body["message"].as_str().unwrap().contains("overlap"));
}

#[tokio::test]
async fn test_max_consecutive_days_rejected() {
    let app = test_app();

    // Mon 2026-03-02 through Mon 2026-03-09 with the sandwich rule counts
    // 8 days; casual leave allows at most 5.
    let (status, body) =
        apply_leave(&app, "casual_leave", "2026-02-20", "2026-03-02", "2026-03-09").await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["message"].as_str().unwrap().contains("at most"));
}

#[tokio::test]
async fn test_notice_period_rejected() {
    let app = test_app();

    // Earned leave requires 7 days notice.
    let (status, body) =
        apply_leave(&app, "earned_leave", "2026-03-01", "2026-03-03", "2026-03-04").await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["message"].as_str().unwrap().contains("notice"));
}

#[tokio::test]
async fn test_gender_restricted_leave_type() {
    let app = test_app();

    let (status, body) =
        apply_leave(&app, "maternity_leave", "2026-02-01", "2026-03-02", "2026-03-06").await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["message"].as_str().unwrap().contains("not applicable"));
}

#[tokio::test]
async fn test_approval_by_self_is_forbidden() {
    let app = test_app();

    let (_, request) =
        apply_leave(&app, "casual_leave", "2026-02-20", "2026-03-02", "2026-03-04").await;
    let request_id = request["id"].as_str().unwrap();

    let (status, body) = post(
        &app.router,
        &format!("/leave/{}/approve", request_id),
        json!({
            "actor_id": app.employee_id,
            "timestamp": "2026-02-21T10:00:00"
        }),
    )
    .await;
    assert_eq!(status, StatusCode::FORBIDDEN);
    assert_eq!(body["code"], json!("FORBIDDEN"));
}

#[tokio::test]
async fn test_reject_then_cancel_is_rejected() {
    let app = test_app();

    let (_, request) =
        apply_leave(&app, "casual_leave", "2026-02-20", "2026-03-02", "2026-03-04").await;
    let request_id = request["id"].as_str().unwrap().to_string();

    let (status, rejected) = post(
        &app.router,
        &format!("/leave/{}/reject", request_id),
        json!({
            "actor_id": app.manager_id,
            "remarks": "short staffed",
            "timestamp": "2026-02-21T10:00:00"
        }),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(rejected["status"], json!("rejected"));

    let (status, body) = post(
        &app.router,
        &format!("/leave/{}/cancel", request_id),
        json!({
            "actor_id": app.employee_id,
            "timestamp": "2026-02-22T10:00:00"
        }),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["message"].as_str().unwrap().contains("rejected"));
}

#[tokio::test]
async fn test_unknown_leave_request_is_404() {
    let app = test_app();

    let (status, body) = post(
        &app.router,
        &format!("/leave/{}/approve", Uuid::new_v4()),
        json!({
            "actor_id": app.manager_id,
            "timestamp": "2026-02-21T10:00:00"
        }),
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["code"], json!("REQUEST_NOT_FOUND"));
}

#[tokio::test]
async fn test_unknown_leave_type_is_404() {
    let app = test_app();

    let (status, body) =
        apply_leave(&app, "study_leave", "2026-02-20", "2026-03-02", "2026-03-04").await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["code"], json!("LEAVE_TYPE_NOT_FOUND"));
}

// =============================================================================
// Regularization
// =============================================================================

#[tokio::test]
async fn test_regularization_flow() {
    let app = test_app();

    let (status, submission) = post(
        &app.router,
        "/regularizations",
        json!({
            "employee_id": app.employee_id,
            "date": "2026-03-02",
            "today": "2026-03-04",
            "requested_status": "work_from_home",
            "reason": "worked from home, forgot to mark"
        }),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(submission["record_created"], json!(true));
    assert_eq!(submission["record"]["status"], json!("absent"));
    let regularization_id = submission["regularization"]["id"].as_str().unwrap();

    let (status, decision) = post(
        &app.router,
        &format!("/regularizations/{}/approve", regularization_id),
        json!({
            "actor_id": app.manager_id,
            "timestamp": "2026-03-04T11:00:00"
        }),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(decision["record"]["status"], json!("work_from_home"));
    assert_eq!(decision["record"]["is_regularized"], json!(true));
    assert_eq!(decision["regularization"]["status"], json!("approved"));
}

#[tokio::test]
async fn test_regularization_of_future_date_rejected() {
    let app = test_app();

    let (status, body) = post(
        &app.router,
        "/regularizations",
        json!({
            "employee_id": app.employee_id,
            "date": "2026-03-04",
            "today": "2026-03-04",
            "requested_status": "present",
            "reason": "x"
        }),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["message"].as_str().unwrap().contains("past"));
}

#[tokio::test]
async fn test_duplicate_pending_regularization_conflicts() {
    let app = test_app();

    let body = json!({
        "employee_id": app.employee_id,
        "date": "2026-03-02",
        "today": "2026-03-04",
        "requested_status": "present",
        "reason": "forgot"
    });
    let (status, _) = post(&app.router, "/regularizations", body.clone()).await;
    assert_eq!(status, StatusCode::OK);

    let (status, error) = post(&app.router, "/regularizations", body).await;
    assert_eq!(status, StatusCode::CONFLICT);
    assert_eq!(error["code"], json!("CONFLICT"));
}

// =============================================================================
// Comp-off
// =============================================================================

#[tokio::test]
async fn test_comp_off_flow_credits_balance() {
    let app = test_app();

    // 2026-03-07 is a Saturday.
    let (status, grant) = post(
        &app.router,
        "/comp-off",
        json!({
            "employee_id": app.employee_id,
            "work_date": "2026-03-07",
            "reason": "production release"
        }),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(grant["granted_by"], json!(null));
    assert_eq!(grant["expires_at"], json!("2026-06-05"));
    let grant_id = grant["id"].as_str().unwrap();

    let (status, approval) = post(
        &app.router,
        &format!("/comp-off/{}/approve", grant_id),
        json!({"actor_id": app.manager_id}),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_decimal_eq(&approval["balance"]["accrued"], "1");

    let summary = balance(&app, "comp_off").await;
    assert_decimal_eq(&summary["current"], "1");
    assert_decimal_eq(&summary["available"], "1");
}

#[tokio::test]
async fn test_duplicate_comp_off_request_conflicts() {
    let app = test_app();

    let body = json!({
        "employee_id": app.employee_id,
        "work_date": "2026-03-07",
        "reason": "release"
    });
    let (status, _) = post(&app.router, "/comp-off", body.clone()).await;
    assert_eq!(status, StatusCode::OK);

    let (status, error) = post(&app.router, "/comp-off", body).await;
    assert_eq!(status, StatusCode::CONFLICT);
    assert_eq!(error["code"], json!("CONFLICT"));
}

// =============================================================================
// Request parsing
// =============================================================================

#[tokio::test]
async fn test_malformed_json_is_bad_request() {
    let app = test_app();

    let response = app
        .router
        .clone()
        .oneshot(
            Request::builder()
                .method("POST")
                .uri("/leave/apply")
                .header("Content-Type", "application/json")
                .body(Body::from("{not json"))
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let body_bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    let body: Value = serde_json::from_slice(&body_bytes).unwrap();
    assert_eq!(body["code"], json!("MALFORMED_JSON"));
}

#[tokio::test]
async fn test_missing_field_is_validation_error() {
    let app = test_app();

    let (status, body) = post(
        &app.router,
        "/leave/apply",
        json!({"employee_id": app.employee_id}),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["code"], json!("VALIDATION_ERROR"));
}
