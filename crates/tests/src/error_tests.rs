use axum::{
    http::StatusCode,
    routing::{get, post},
    Json, Router,
};
use chrono::NaiveDate;
use pretty_assertions::assert_eq;
use serde_json::json;
use shared_types::{
    ApiSettings, AppErrorKind, ErrorDisposition, PayrollAmounts, PayrollRequest, PayrollStatus,
    PAYROLL_VALIDATION_MESSAGE,
};

use crate::common;

#[tokio::test]
async fn validation_detail_maps_to_field_errors() {
    let routes = Router::new().route(
        "/users",
        post(|| async {
            (
                StatusCode::UNPROCESSABLE_ENTITY,
                Json(json!({ "detail": [{ "loc": ["body", "email"], "msg": "invalid" }] })),
            )
        }),
    );
    let client = common::test_client(routes).await;

    let err = api::users::create_user(
        &client,
        &shared_types::CreateUserRequest {
            email: "nope".into(),
            password: "longenough".into(),
            first_name: "A".into(),
            last_name: "B".into(),
            role: shared_types::Role::Employee,
            organization_id: None,
            department_id: None,
            phone: None,
        },
    )
    .await
    .unwrap_err();

    assert_eq!(err.kind, AppErrorKind::ValidationError);
    assert_eq!(err.field_errors.get("email").map(String::as_str), Some("invalid"));
    assert_eq!(err.disposition(), ErrorDisposition::Inline);
}

#[tokio::test]
async fn not_found_detail_is_inline() {
    let routes = Router::new().route(
        "/users/{id}",
        get(|| async { (StatusCode::NOT_FOUND, Json(json!({ "detail": "User not found" }))) }),
    );
    let client = common::test_client(routes).await;

    let err = api::users::get_user(&client, 99).await.unwrap_err();

    assert_eq!(err.kind, AppErrorKind::NotFound);
    assert_eq!(err.message, "User not found");
    assert_eq!(err.disposition(), ErrorDisposition::Inline);
}

#[tokio::test]
async fn unauthorized_clears_session() {
    let routes = Router::new().route(
        "/dashboard/summary",
        get(|| async { StatusCode::UNAUTHORIZED }),
    );
    let client = common::test_client(routes).await;
    common::sign_in(&client, "expired");

    let err = api::dashboard::dashboard_summary(&client).await.unwrap_err();

    assert_eq!(err.disposition(), ErrorDisposition::ReLogin);
    assert!(!client.session().is_authenticated());
}

#[tokio::test]
async fn forbidden_keeps_session() {
    let routes = Router::new().route(
        "/organizations",
        get(|| async {
            (
                StatusCode::FORBIDDEN,
                Json(json!({ "detail": "Not enough permissions" })),
            )
        }),
    );
    let client = common::test_client(routes).await;
    common::sign_in(&client, "tok-mgr");

    let err = api::organizations::list_organizations(&client).await.unwrap_err();

    assert_eq!(err.disposition(), ErrorDisposition::AccessDenied);
    assert_eq!(err.message, "Not enough permissions");
    assert!(client.session().is_authenticated());
}

#[tokio::test]
async fn unreachable_backend_is_a_retryable_network_error() {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);
    let client = api::ApiClient::new(ApiSettings {
        base_url: format!("http://{addr}/api/v1"),
        timeout_secs: 2,
    });

    let err = api::departments::list_departments(&client).await.unwrap_err();

    assert_eq!(err.kind, AppErrorKind::Network);
    assert_eq!(err.disposition(), ErrorDisposition::Retry);
}

#[tokio::test]
async fn malformed_success_body_is_internal_error() {
    let routes = Router::new().route("/departments", get(|| async { "<html>oops</html>" }));
    let client = common::test_client(routes).await;

    let err = api::departments::list_departments(&client).await.unwrap_err();

    assert_eq!(err.kind, AppErrorKind::InternalError);
}

fn payroll_request() -> PayrollRequest {
    let mut amounts = PayrollAmounts::default();
    amounts.basic_salary = 1000.0;
    PayrollRequest {
        employee_id: 4,
        period_start: NaiveDate::from_ymd_opt(2025, 1, 1).unwrap(),
        period_end: NaiveDate::from_ymd_opt(2025, 1, 31).unwrap(),
        amounts,
        status: PayrollStatus::Draft,
        payment_date: None,
    }
}

#[tokio::test]
async fn payroll_422_without_fields_is_flattened() {
    let routes = Router::new().route(
        "/payroll",
        post(|| async {
            (
                StatusCode::UNPROCESSABLE_ENTITY,
                Json(json!({ "detail": "Amounts rejected" })),
            )
        }),
    );
    let client = common::test_client(routes).await;

    let err = api::payroll::create_payroll(&client, &payroll_request())
        .await
        .unwrap_err();

    assert_eq!(err.message, PAYROLL_VALIDATION_MESSAGE);
    assert!(err.field_errors.is_empty());
}

#[tokio::test]
async fn payroll_422_with_fields_keeps_them() {
    let routes = Router::new().route(
        "/payroll/{id}",
        axum::routing::put(|| async {
            (
                StatusCode::UNPROCESSABLE_ENTITY,
                Json(json!({ "detail": [{ "loc": ["body", "tax"], "msg": "must be >= 0" }] })),
            )
        }),
    );
    let client = common::test_client(routes).await;

    let err = api::payroll::update_payroll(&client, 3, &payroll_request())
        .await
        .unwrap_err();

    assert_eq!(err.field_errors.get("tax").map(String::as_str), Some("must be >= 0"));
    assert_eq!(err.message, "must be >= 0");
}
