use axum::{
    extract::Path,
    http::{HeaderMap, Uri},
    routing::{get, post},
    Json, Router,
};
use chrono::NaiveDate;
use pretty_assertions::assert_eq;
use serde_json::{json, Value};
use shared_types::{
    AssessmentSubmission, CheckRequest, DateRange, EnrollRequest, ExpenseDecision, ExpenseStatus,
    LeaveDecision, LeaveStatus, ReportKind,
};
use std::sync::{Arc, Mutex};

use crate::common::{self, Recorder};

fn expense_json(id: i64, status: &str) -> Value {
    json!({
        "id": id,
        "title": "Client visit",
        "status": status,
        "total_amount": 365.0,
        "items": [
            { "description": "Bus fare", "category": "TRAVEL", "amount": 45.0, "date": "2025-03-04" },
            { "description": "Hotel", "category": "ACCOMMODATION", "amount": 320.0, "date": "2025-03-04" }
        ]
    })
}

#[tokio::test]
async fn leave_decisions_post_to_action_endpoints() {
    let bodies: Arc<Mutex<Vec<(String, Value)>>> = Arc::default();
    let (approve_sink, reject_sink) = (bodies.clone(), bodies.clone());
    let routes = Router::new()
        .route(
            "/leave/{id}/approve",
            post(move |Path(id): Path<i64>, Json(body): Json<Value>| {
                approve_sink.lock().unwrap().push(("approve".into(), body));
                async move { Json(common::leave_json(id, "APPROVED")) }
            }),
        )
        .route(
            "/leave/{id}/reject",
            post(move |Path(id): Path<i64>, Json(body): Json<Value>| {
                reject_sink.lock().unwrap().push(("reject".into(), body));
                async move { Json(common::leave_json(id, "REJECTED")) }
            }),
        )
        .route(
            "/leave/{id}/cancel",
            post(|Path(id): Path<i64>| async move { Json(common::leave_json(id, "CANCELLED")) }),
        );
    let client = common::test_client(routes).await;

    let approved = api::leave::approve_leave(&client, 4, &LeaveDecision::default())
        .await
        .unwrap();
    let rejected = api::leave::reject_leave(
        &client,
        5,
        &LeaveDecision {
            comment: Some("Peak season".into()),
        },
    )
    .await
    .unwrap();
    let cancelled = api::leave::cancel_leave(&client, 6).await.unwrap();

    assert_eq!(approved.status, LeaveStatus::Approved);
    assert_eq!(rejected.status, LeaveStatus::Rejected);
    assert_eq!(cancelled.id, 6);
    assert_eq!(cancelled.status, LeaveStatus::Cancelled);
    assert_eq!(
        bodies.lock().unwrap().clone(),
        vec![
            ("approve".to_string(), json!({})),
            ("reject".to_string(), json!({ "comment": "Peak season" })),
        ]
    );
}

#[tokio::test]
async fn expense_report_moves_through_review() {
    let recorder = Recorder::default();
    let (rec_submit, rec_approve, rec_reject) = (recorder.clone(), recorder.clone(), recorder.clone());
    let routes = Router::new()
        .route(
            "/expenses/{id}/submit",
            post(move |uri: Uri, headers: HeaderMap, Path(id): Path<i64>| {
                rec_submit.record(&uri, &headers);
                async move { Json(expense_json(id, "SUBMITTED")) }
            }),
        )
        .route(
            "/expenses/{id}/approve",
            post(move |uri: Uri, headers: HeaderMap, Path(id): Path<i64>| {
                rec_approve.record(&uri, &headers);
                async move { Json(expense_json(id, "APPROVED")) }
            }),
        )
        .route(
            "/expenses/{id}/reject",
            post(move |uri: Uri, headers: HeaderMap, Path(id): Path<i64>, Json(body): Json<Value>| {
                rec_reject.record(&uri, &headers);
                let reason = body["reason"].as_str().unwrap_or_default().to_string();
                async move {
                    let mut report = expense_json(id, "REJECTED");
                    report["description"] = json!(reason);
                    Json(report)
                }
            }),
        );
    let client = common::test_client(routes).await;

    let submitted = api::expenses::submit_expense_report(&client, 2).await.unwrap();
    assert!(submitted.awaits_review());
    assert_eq!(submitted.total_amount, submitted.items_total());

    let approved = api::expenses::approve_expense_report(&client, 2).await.unwrap();
    assert_eq!(approved.status, ExpenseStatus::Approved);

    let rejected = api::expenses::reject_expense_report(
        &client,
        3,
        &ExpenseDecision {
            reason: Some("Missing receipt".into()),
        },
    )
    .await
    .unwrap();
    assert_eq!(rejected.description.as_deref(), Some("Missing receipt"));

    let paths: Vec<String> = recorder.all().into_iter().map(|s| s.path).collect();
    assert_eq!(
        paths,
        vec!["/expenses/2/submit", "/expenses/2/approve", "/expenses/3/reject"]
    );
}

#[tokio::test]
async fn training_enroll_and_assessment_submission() {
    let routes = Router::new()
        .route(
            "/training/enrollments",
            post(|Json(body): Json<Value>| async move {
                Json(json!({
                    "id": 11,
                    "course_id": body["course_id"],
                    "employee_id": 4,
                    "status": "ENROLLED"
                }))
            }),
        )
        .route(
            "/training/assessments/{id}/submit",
            post(|Path(id): Path<i64>, Json(body): Json<Value>| async move {
                let answered = body["answers"].as_array().map(Vec::len).unwrap_or(0);
                Json(json!({
                    "id": id,
                    "course_id": 2,
                    "title": "Data Protection Quiz",
                    "passing_score": 70.0,
                    "score": answered as f64 * 25.0
                }))
            }),
        );
    let client = common::test_client(routes).await;

    let enrollment = api::training::enroll(
        &client,
        &EnrollRequest {
            course_id: 2,
            employee_id: None,
        },
    )
    .await
    .unwrap();
    assert_eq!(enrollment.course_id, 2);
    assert_eq!(enrollment.progress_percent(), 0);

    let assessment = api::training::submit_assessment(
        &client,
        9,
        &AssessmentSubmission {
            answers: vec!["a".into(), "c".into(), "b".into(), "d".into()],
        },
    )
    .await
    .unwrap();
    assert_eq!(assessment.score, Some(100.0));
    assert_eq!(assessment.passed(), Some(true));
}

#[tokio::test]
async fn report_is_requested_by_kind_and_range() {
    let recorder = Recorder::default();
    let rec = recorder.clone();
    let routes = Router::new().route(
        "/reports/{kind}",
        get(move |uri: Uri, headers: HeaderMap, Path(kind): Path<String>| {
            rec.record(&uri, &headers);
            async move {
                Json(json!({
                    "kind": kind,
                    "title": "Headcount Report",
                    "columns": ["Department", "Employees"],
                    "rows": [["Engineering, Platform", 24]],
                    "summary": [{ "label": "Total", "value": 24 }]
                }))
            }
        }),
    );
    let client = common::test_client(routes).await;

    let range = DateRange::new(
        NaiveDate::from_ymd_opt(2025, 6, 30).unwrap(),
        NaiveDate::from_ymd_opt(2025, 1, 1).unwrap(),
    );
    let report = api::reports::get_report(&client, ReportKind::Headcount, &range)
        .await
        .unwrap();

    assert_eq!(report.kind, ReportKind::Headcount);
    assert_eq!(report.to_csv(), "Department,Employees\r\n\"Engineering, Platform\",24\r\n");
    let seen = recorder.last();
    assert_eq!(seen.path, "/reports/headcount");
    assert_eq!(seen.query.as_deref(), Some("start_date=2025-01-01&end_date=2025-06-30"));
}

#[tokio::test]
async fn check_in_then_check_out() {
    let routes = Router::new()
        .route(
            "/attendance/check-in",
            post(|| async {
                Json(json!({
                    "id": 1, "employee_id": 4, "date": "2025-03-14",
                    "check_in": "2025-03-14T08:00:00Z", "status": "PRESENT"
                }))
            }),
        )
        .route(
            "/attendance/check-out",
            post(|| async {
                Json(json!({
                    "id": 1, "employee_id": 4, "date": "2025-03-14",
                    "check_in": "2025-03-14T08:00:00Z",
                    "check_out": "2025-03-14T16:30:00Z", "status": "PRESENT"
                }))
            }),
        );
    let client = common::test_client(routes).await;

    let opened = api::attendance::check_in(&client, &CheckRequest::default()).await.unwrap();
    assert!(opened.is_open());

    let closed = api::attendance::check_out(&client, &CheckRequest::default()).await.unwrap();
    assert!(!closed.is_open());
    assert_eq!(closed.hours(), Some(8.5));
}
