//! End-to-end API tests against the full router
//!
//! Requests go through the real middleware stack (auth + role checks)
//! using an in-memory SQLite database.

use axum::body::Body;
use axum::Router;
use http::{header, Method, Request, StatusCode};
use http_body_util::BodyExt;
use serde_json::{json, Value};
use tower::ServiceExt;

use staff_server::auth::{JwtConfig, JwtService};
use staff_server::db::models::{EmployeeCreate, Role};
use staff_server::db::repository::employee;
use staff_server::db::DbService;
use staff_server::{build_router, Config, ServerState};

const ADMIN_EMAIL: &str = "admin@example.com";
const ADMIN_PASSWORD: &str = "admin-password-1";

fn test_config() -> Config {
    let jwt = JwtConfig {
        secret: "integration-test-secret-0123456789abcdef".to_string(),
        expiration_minutes: 60,
        issuer: "staff-server".to_string(),
        audience: "staff-clients".to_string(),
    };
    Config {
        database_path: ":memory:".to_string(),
        http_port: 0,
        timezone: chrono_tz::UTC,
        jwt,
        environment: "test".to_string(),
        admin_email: None,
        admin_password: None,
    }
}

/// Router backed by a fresh in-memory database with one seeded admin
async fn test_app() -> Router {
    let config = test_config();
    let db = DbService::new_in_memory().await.unwrap();
    let jwt_service = std::sync::Arc::new(JwtService::with_config(config.jwt.clone()));
    let state = ServerState::new(config, db.pool, jwt_service);

    employee::create(
        &state.pool,
        EmployeeCreate {
            email: ADMIN_EMAIL.to_string(),
            password: ADMIN_PASSWORD.to_string(),
            first_name: "System".to_string(),
            last_name: "Administrator".to_string(),
            department: Some("Operations".to_string()),
            position: Some("Manager".to_string()),
            role: Role::Admin,
            leave_balance: None,
        },
        1000,
    )
    .await
    .unwrap();

    build_router(state)
}

/// Send a JSON request; returns (status, parsed body)
async fn send(
    app: &Router,
    method: Method,
    path: &str,
    token: Option<&str>,
    body: Option<Value>,
) -> (StatusCode, Value) {
    let mut builder = Request::builder().method(method).uri(path);
    if let Some(token) = token {
        builder = builder.header(header::AUTHORIZATION, format!("Bearer {token}"));
    }
    let request = match body {
        Some(json) => builder
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(json.to_string()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    };

    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    let parsed = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap_or(Value::Null)
    };
    (status, parsed)
}

async fn login(app: &Router, email: &str, password: &str) -> String {
    let (status, body) = send(
        app,
        Method::POST,
        "/api/auth/login",
        None,
        Some(json!({ "email": email, "password": password })),
    )
    .await;
    assert_eq!(status, StatusCode::OK, "login failed: {body}");
    body["token"].as_str().unwrap().to_string()
}

async fn create_employee(app: &Router, admin_token: &str, email: &str) -> i64 {
    let (status, body) = send(
        app,
        Method::POST,
        "/api/employees",
        Some(admin_token),
        Some(json!({
            "email": email,
            "password": "employee-pass-1",
            "first_name": "Alice",
            "last_name": "Nguyen",
            "department": "Engineering",
            "position": "Developer"
        })),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED, "create failed: {body}");
    body["id"].as_i64().unwrap()
}

#[tokio::test]
async fn leave_request_approval_flow() {
    let app = test_app().await;

    // 1. Admin creates an employee account
    let admin_token = login(&app, ADMIN_EMAIL, ADMIN_PASSWORD).await;
    let emp_id = create_employee(&app, &admin_token, "alice@example.com").await;

    // 2. Employee logs in and submits a three-day vacation request
    let emp_token = login(&app, "alice@example.com", "employee-pass-1").await;
    let (status, body) = send(
        &app,
        Method::POST,
        "/api/leave-requests",
        Some(&emp_token),
        Some(json!({
            "leave_type": "vacation",
            "start_date": "2024-06-10",
            "end_date": "2024-06-12",
            "reason": "family trip"
        })),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body["status"], "pending");
    assert_eq!(body["days_requested"], 3);
    let request_id = body["id"].as_i64().unwrap();

    // 3. Request shows up in the admin review queue
    let (status, body) = send(
        &app,
        Method::GET,
        "/api/leave-requests/pending",
        Some(&admin_token),
        None,
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    let queue = body.as_array().unwrap();
    assert_eq!(queue.len(), 1);
    assert_eq!(queue[0]["id"].as_i64(), Some(request_id));
    assert_eq!(queue[0]["email"], "alice@example.com");

    // 4. Admin approves with a comment
    let (status, body) = send(
        &app,
        Method::PUT,
        &format!("/api/leave-requests/{request_id}/status"),
        Some(&admin_token),
        Some(json!({ "status": "approved", "review_comments": "ok" })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "approved");
    assert_eq!(body["review_comments"], "ok");
    assert!(body["reviewed_by"].as_i64().is_some());
    assert!(body["reviewed_at"].as_i64().is_some());

    // 5. Employee sees the decision
    let (status, body) = send(
        &app,
        Method::GET,
        "/api/leave-requests/my",
        Some(&emp_token),
        None,
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    let mine = body.as_array().unwrap();
    assert_eq!(mine.len(), 1);
    assert_eq!(mine[0]["status"], "approved");
    assert_eq!(mine[0]["review_comments"], "ok");

    // 6. A second decision is rejected; the first one stands
    let (status, body) = send(
        &app,
        Method::PUT,
        &format!("/api/leave-requests/{request_id}/status"),
        Some(&admin_token),
        Some(json!({ "status": "rejected", "review_comments": "changed my mind" })),
    )
    .await;
    assert_eq!(status, StatusCode::CONFLICT);
    assert_eq!(body["code"], "E5001");

    // Deciding a nonexistent request is 404, not a conflict
    let (status, _) = send(
        &app,
        Method::PUT,
        "/api/leave-requests/99999/status",
        Some(&admin_token),
        Some(json!({ "status": "approved" })),
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    // Rejected decision value "pending" is refused at parse time
    let (status, _) = send(
        &app,
        Method::PUT,
        &format!("/api/leave-requests/{request_id}/status"),
        Some(&admin_token),
        Some(json!({ "status": "pending" })),
    )
    .await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);

    let _ = emp_id;
}

#[tokio::test]
async fn attendance_lifecycle() {
    let app = test_app().await;
    let admin_token = login(&app, ADMIN_EMAIL, ADMIN_PASSWORD).await;
    create_employee(&app, &admin_token, "bob@example.com").await;
    let emp_token = login(&app, "bob@example.com", "employee-pass-1").await;

    // Checkout before checkin: no record for today
    let (status, body) = send(
        &app,
        Method::POST,
        "/api/attendance/checkout",
        Some(&emp_token),
        None,
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["code"], "E4002");

    // First check-in succeeds
    let (status, body) = send(
        &app,
        Method::POST,
        "/api/attendance/checkin",
        Some(&emp_token),
        None,
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body["status"], "present");
    assert!(body["check_out_time"].is_null());

    // Second check-in the same day conflicts
    let (status, body) = send(
        &app,
        Method::POST,
        "/api/attendance/checkin",
        Some(&emp_token),
        None,
    )
    .await;
    assert_eq!(status, StatusCode::CONFLICT);
    assert_eq!(body["code"], "E4001");

    // Check-out closes the day
    let (status, body) = send(
        &app,
        Method::POST,
        "/api/attendance/checkout",
        Some(&emp_token),
        None,
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert!(body["check_out_time"].as_i64().is_some());
    assert!(body["hours_worked"].as_f64().is_some());

    // Second check-out conflicts
    let (status, body) = send(
        &app,
        Method::POST,
        "/api/attendance/checkout",
        Some(&emp_token),
        None,
    )
    .await;
    assert_eq!(status, StatusCode::CONFLICT);
    assert_eq!(body["code"], "E4003");

    // Own record for today is visible
    let (status, body) = send(
        &app,
        Method::GET,
        "/api/attendance/my",
        Some(&emp_token),
        None,
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "present");

    // Admin sees the day roster with employee identity
    let (status, body) = send(
        &app,
        Method::GET,
        "/api/attendance/today",
        Some(&admin_token),
        None,
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    let roster = body.as_array().unwrap();
    assert_eq!(roster.len(), 1);
    assert_eq!(roster[0]["email"], "bob@example.com");
}

#[tokio::test]
async fn admin_can_check_in_on_behalf() {
    let app = test_app().await;
    let admin_token = login(&app, ADMIN_EMAIL, ADMIN_PASSWORD).await;
    let emp_id = create_employee(&app, &admin_token, "carol@example.com").await;
    let emp_token = login(&app, "carol@example.com", "employee-pass-1").await;

    // Admin records a check-in for the employee
    let (status, body) = send(
        &app,
        Method::POST,
        "/api/attendance/checkin",
        Some(&admin_token),
        Some(json!({ "employee_id": emp_id })),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body["employee_id"].as_i64(), Some(emp_id));

    // A non-admin cannot target someone else
    let (status, _) = send(
        &app,
        Method::POST,
        "/api/attendance/checkin",
        Some(&emp_token),
        Some(json!({ "employee_id": 1 })),
    )
    .await;
    assert_eq!(status, StatusCode::FORBIDDEN);

    // Targeting a nonexistent employee is 404, not a database error
    let (status, _) = send(
        &app,
        Method::POST,
        "/api/attendance/checkin",
        Some(&admin_token),
        Some(json!({ "employee_id": 99999 })),
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn role_gates_and_token_errors() {
    let app = test_app().await;
    let admin_token = login(&app, ADMIN_EMAIL, ADMIN_PASSWORD).await;
    create_employee(&app, &admin_token, "dave@example.com").await;
    let emp_token = login(&app, "dave@example.com", "employee-pass-1").await;

    // Admin-only routes reject an employee token with 403
    for path in [
        "/api/employees",
        "/api/attendance/today",
        "/api/leave-requests/pending",
        "/api/dashboard/stats",
    ] {
        let (status, body) = send(&app, Method::GET, path, Some(&emp_token), None).await;
        assert_eq!(status, StatusCode::FORBIDDEN, "{path} not gated");
        assert_eq!(body["code"], "E2001");
    }

    // Missing token is 401
    let (status, body) = send(&app, Method::GET, "/api/employees", None, None).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body["code"], "E3001");

    // Garbage token is 403
    let (status, body) = send(
        &app,
        Method::GET,
        "/api/employees",
        Some("not-a-real-token"),
        None,
    )
    .await;
    assert_eq!(status, StatusCode::FORBIDDEN);
    assert_eq!(body["code"], "E3002");

    // Health endpoint is public
    let (status, body) = send(&app, Method::GET, "/api/health", None, None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "ok");
}

#[tokio::test]
async fn login_hides_account_detail_and_password_hashes() {
    let app = test_app().await;
    let admin_token = login(&app, ADMIN_EMAIL, ADMIN_PASSWORD).await;
    create_employee(&app, &admin_token, "erin@example.com").await;

    // Wrong password and unknown account produce the same error
    let (status, body) = send(
        &app,
        Method::POST,
        "/api/auth/login",
        None,
        Some(json!({ "email": "erin@example.com", "password": "wrong-password" })),
    )
    .await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body["code"], "E3004");

    let (status, body2) = send(
        &app,
        Method::POST,
        "/api/auth/login",
        None,
        Some(json!({ "email": "nobody@example.com", "password": "wrong-password" })),
    )
    .await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body2["message"], body["message"]);

    // No hash material ever leaves the API
    let (_, login_body) = send(
        &app,
        Method::POST,
        "/api/auth/login",
        None,
        Some(json!({ "email": "erin@example.com", "password": "employee-pass-1" })),
    )
    .await;
    assert!(login_body["employee"].get("hash_pass").is_none());
    assert!(login_body["employee"].get("password").is_none());

    let (_, list) = send(&app, Method::GET, "/api/employees", Some(&admin_token), None).await;
    for emp in list.as_array().unwrap() {
        assert!(emp.get("hash_pass").is_none());
        assert!(emp.get("password").is_none());
    }
}

#[tokio::test]
async fn disabled_account_cannot_login() {
    let app = test_app().await;
    let admin_token = login(&app, ADMIN_EMAIL, ADMIN_PASSWORD).await;
    let emp_id = create_employee(&app, &admin_token, "frank@example.com").await;

    let (status, _) = send(
        &app,
        Method::PUT,
        &format!("/api/employees/{emp_id}"),
        Some(&admin_token),
        Some(json!({ "is_active": false })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);

    let (status, body) = send(
        &app,
        Method::POST,
        "/api/auth/login",
        None,
        Some(json!({ "email": "frank@example.com", "password": "employee-pass-1" })),
    )
    .await;
    assert_eq!(status, StatusCode::FORBIDDEN);
    assert_eq!(body["code"], "E2001");

    // A wrong password against a disabled account gets the same generic
    // error as an unknown account; the disabled state is only disclosed
    // to a caller holding valid credentials.
    let (status, body) = send(
        &app,
        Method::POST,
        "/api/auth/login",
        None,
        Some(json!({ "email": "frank@example.com", "password": "wrong-password" })),
    )
    .await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body["code"], "E3004");
}

#[tokio::test]
async fn profile_update_is_restricted_to_own_fields() {
    let app = test_app().await;
    let admin_token = login(&app, ADMIN_EMAIL, ADMIN_PASSWORD).await;
    create_employee(&app, &admin_token, "grace@example.com").await;
    let emp_token = login(&app, "grace@example.com", "employee-pass-1").await;

    // Privilege escalation via unknown fields is rejected outright
    let (status, _) = send(
        &app,
        Method::PUT,
        "/api/auth/me",
        Some(&emp_token),
        Some(json!({ "first_name": "Gracie", "role": "admin" })),
    )
    .await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);

    let (status, body) = send(
        &app,
        Method::PUT,
        "/api/auth/me",
        Some(&emp_token),
        Some(json!({ "first_name": "Gracie" })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["first_name"], "Gracie");
    assert_eq!(body["role"], "employee");

    // /me reflects the stored profile
    let (status, body) = send(&app, Method::GET, "/api/auth/me", Some(&emp_token), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["first_name"], "Gracie");
}

#[tokio::test]
async fn leave_request_date_validation() {
    let app = test_app().await;
    let admin_token = login(&app, ADMIN_EMAIL, ADMIN_PASSWORD).await;
    create_employee(&app, &admin_token, "hana@example.com").await;
    let emp_token = login(&app, "hana@example.com", "employee-pass-1").await;

    // end before start
    let (status, body) = send(
        &app,
        Method::POST,
        "/api/leave-requests",
        Some(&emp_token),
        Some(json!({
            "leave_type": "sick",
            "start_date": "2024-06-12",
            "end_date": "2024-06-10"
        })),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["code"], "E0002");

    // malformed date
    let (status, _) = send(
        &app,
        Method::POST,
        "/api/leave-requests",
        Some(&emp_token),
        Some(json!({
            "leave_type": "sick",
            "start_date": "12/06/2024",
            "end_date": "2024-06-12"
        })),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    // unknown leave type fails at parse time
    let (status, _) = send(
        &app,
        Method::POST,
        "/api/leave-requests",
        Some(&emp_token),
        Some(json!({
            "leave_type": "holiday",
            "start_date": "2024-06-10",
            "end_date": "2024-06-12"
        })),
    )
    .await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);

    // single-day request counts one day
    let (status, body) = send(
        &app,
        Method::POST,
        "/api/leave-requests",
        Some(&emp_token),
        Some(json!({
            "leave_type": "personal",
            "start_date": "2024-06-10",
            "end_date": "2024-06-10"
        })),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body["days_requested"], 1);
}

#[tokio::test]
async fn dashboard_counts() {
    let app = test_app().await;
    let admin_token = login(&app, ADMIN_EMAIL, ADMIN_PASSWORD).await;
    create_employee(&app, &admin_token, "ivan@example.com").await;
    let emp_token = login(&app, "ivan@example.com", "employee-pass-1").await;

    let (status, _) = send(
        &app,
        Method::POST,
        "/api/attendance/checkin",
        Some(&emp_token),
        None,
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);

    let (status, _) = send(
        &app,
        Method::POST,
        "/api/leave-requests",
        Some(&emp_token),
        Some(json!({
            "leave_type": "vacation",
            "start_date": "2024-07-01",
            "end_date": "2024-07-05"
        })),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);

    let (status, body) = send(
        &app,
        Method::GET,
        "/api/dashboard/stats",
        Some(&admin_token),
        None,
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["total_employees"], 2);
    assert_eq!(body["present_today"], 1);
    assert_eq!(body["pending_leaves"], 1);
    // admin in Operations, employee in Engineering
    assert_eq!(body["departments"], 2);
}
