use axum::{
    http::{HeaderMap, StatusCode, Uri},
    routing::{delete, get},
    Json, Router,
};
use chrono::NaiveDate;
use pretty_assertions::assert_eq;
use serde_json::json;
use shared_types::{DateRange, EmployeeFilter, EmployeeStatus, LeaveStatus, UserFilter};

use crate::common::{self, Recorder};

#[tokio::test]
async fn bare_array_decodes_and_carries_bearer_token() {
    let recorder = Recorder::default();
    let rec = recorder.clone();
    let routes = Router::new().route(
        "/employees",
        get(move |uri: Uri, headers: HeaderMap| {
            rec.record(&uri, &headers);
            async {
                Json(json!([
                    common::employee_json(1, "Kofi"),
                    common::employee_json(2, "Esi")
                ]))
            }
        }),
    );
    let client = common::test_client(routes).await;
    common::sign_in(&client, "tok-hr");

    let employees = api::employees::list_employees(&client, &EmployeeFilter::default())
        .await
        .unwrap();

    assert_eq!(employees.len(), 2);
    assert_eq!(employees[1].first_name, "Esi");
    let seen = recorder.last();
    assert_eq!(seen.authorization.as_deref(), Some("Bearer tok-hr"));
    assert_eq!(seen.query, None);
}

#[tokio::test]
async fn paged_envelope_decodes() {
    let routes = Router::new().route(
        "/users",
        get(|| async {
            Json(json!({
                "items": [common::user_json(1, "SUPER_ADMIN"), common::user_json(2, "EMPLOYEE")],
                "total": 57
            }))
        }),
    );
    let client = common::test_client(routes).await;

    let users = api::users::list_users(&client, &UserFilter::default()).await.unwrap();

    assert_eq!(users.iter().map(|u| u.id).collect::<Vec<_>>(), vec![1, 2]);
}

#[tokio::test]
async fn employee_filter_becomes_query_string() {
    let recorder = Recorder::default();
    let rec = recorder.clone();
    let routes = Router::new().route(
        "/employees",
        get(move |uri: Uri, headers: HeaderMap| {
            rec.record(&uri, &headers);
            async { Json(json!([])) }
        }),
    );
    let client = common::test_client(routes).await;

    let filter = EmployeeFilter::new("  ama ", None, Some(EmployeeStatus::OnLeave));
    api::employees::list_employees(&client, &filter).await.unwrap();

    assert_eq!(recorder.last().query.as_deref(), Some("search=ama&status=ON_LEAVE"));
}

#[tokio::test]
async fn leave_status_filter_is_optional() {
    let recorder = Recorder::default();
    let rec = recorder.clone();
    let routes = Router::new().route(
        "/leave",
        get(move |uri: Uri, headers: HeaderMap| {
            rec.record(&uri, &headers);
            async { Json(json!([common::leave_json(1, "PENDING")])) }
        }),
    );
    let client = common::test_client(routes).await;

    let pending = api::leave::list_leave_requests(&client, Some(LeaveStatus::Pending))
        .await
        .unwrap();
    assert_eq!(pending[0].days(), 3);
    assert_eq!(recorder.last().query.as_deref(), Some("status=PENDING"));

    api::leave::list_leave_requests(&client, None).await.unwrap();
    assert_eq!(recorder.last().query, None);
}

#[tokio::test]
async fn attendance_sends_date_range() {
    let recorder = Recorder::default();
    let rec = recorder.clone();
    let routes = Router::new().route(
        "/attendance",
        get(move |uri: Uri, headers: HeaderMap| {
            rec.record(&uri, &headers);
            async { Json(json!({ "items": [] })) }
        }),
    );
    let client = common::test_client(routes).await;

    let day = NaiveDate::from_ymd_opt(2025, 3, 14).unwrap();
    let records = api::attendance::list_attendance(&client, &DateRange::month_of(day))
        .await
        .unwrap();

    assert!(records.is_empty());
    assert_eq!(
        recorder.last().query.as_deref(),
        Some("start_date=2025-03-01&end_date=2025-03-31")
    );
}

#[tokio::test]
async fn delete_accepts_no_content() {
    let recorder = Recorder::default();
    let rec = recorder.clone();
    let routes = Router::new().route(
        "/departments/{id}",
        delete(move |uri: Uri, headers: HeaderMap| {
            rec.record(&uri, &headers);
            async { StatusCode::NO_CONTENT }
        }),
    );
    let client = common::test_client(routes).await;

    api::departments::delete_department(&client, 12).await.unwrap();

    assert_eq!(recorder.last().path, "/departments/12");
}

#[tokio::test]
async fn organization_module_toggles_decode_from_flat_fields() {
    let routes = Router::new().route(
        "/organizations",
        get(|| async {
            Json(json!([{
                "id": 1,
                "name": "Acme Ghana",
                "code": "ACME",
                "payroll_enabled": false
            }]))
        }),
    );
    let client = common::test_client(routes).await;

    let orgs = api::organizations::list_organizations(&client).await.unwrap();

    assert!(orgs[0].is_active);
    assert!(!orgs[0].modules.is_enabled(shared_types::Module::Payroll));
    assert!(orgs[0].modules.is_enabled(shared_types::Module::Leave));
}

#[tokio::test]
async fn single_employee_is_fetched_by_id() {
    let recorder = Recorder::default();
    let rec = recorder.clone();
    let routes = Router::new().route(
        "/employees/{id}",
        get(move |uri: Uri, headers: HeaderMap| {
            rec.record(&uri, &headers);
            async { Json(common::employee_json(7, "Yaw")) }
        }),
    );
    let client = common::test_client(routes).await;

    let employee = api::employees::get_employee(&client, 7).await.unwrap();

    assert_eq!(employee.id, 7);
    assert_eq!(employee.first_name, "Yaw");
    assert_eq!(recorder.last().path, "/employees/7");
}
