use axum::{
    http::{HeaderMap, StatusCode, Uri},
    routing::{get, post},
    Json, Router,
};
use pretty_assertions::assert_eq;
use serde_json::{json, Value};
use shared_types::{guard_decision, AppErrorKind, DashboardKind, GuardDecision, LoginRequest, Role};
use std::sync::{Arc, Mutex};

use crate::common::{self, Recorder};

fn credentials() -> LoginRequest {
    LoginRequest {
        email: "ama@acme.test".into(),
        password: "secret123".into(),
    }
}

#[tokio::test]
async fn login_stores_tokens_and_returns_user() {
    let routes = Router::new().route(
        "/auth/login",
        post(|| async {
            Json(json!({
                "access_token": "tok-1",
                "refresh_token": "ref-1",
                "token_type": "bearer",
                "user": common::user_json(7, "HR")
            }))
        }),
    );
    let client = common::test_client(routes).await;

    let (tokens, user) = api::auth::login(&client, &credentials()).await.unwrap();

    assert_eq!(tokens.access_token, "tok-1");
    assert_eq!(user.id, 7);
    assert_eq!(user.role(), Some(Role::Hr));
    assert_eq!(client.session().access_token().as_deref(), Some("tok-1"));
    assert_eq!(client.session().refresh_token().as_deref(), Some("ref-1"));
}

#[tokio::test]
async fn login_without_user_fetches_profile_with_new_token() {
    let recorder = Recorder::default();
    let rec = recorder.clone();
    let routes = Router::new()
        .route(
            "/auth/login",
            post(|| async { Json(json!({ "access_token": "tok-2" })) }),
        )
        .route(
            "/auth/me",
            get(move |uri: Uri, headers: HeaderMap| {
                rec.record(&uri, &headers);
                async { Json(common::user_json(3, "MANAGER")) }
            }),
        );
    let client = common::test_client(routes).await;

    let (tokens, user) = api::auth::login(&client, &credentials()).await.unwrap();

    assert_eq!(tokens.token_type, "bearer");
    assert!(tokens.refresh_token.is_none());
    assert_eq!(user.role(), Some(Role::Manager));
    assert_eq!(recorder.last().authorization.as_deref(), Some("Bearer tok-2"));
}

#[tokio::test]
async fn failed_login_leaves_session_empty() {
    let routes = Router::new().route(
        "/auth/login",
        post(|| async {
            (
                StatusCode::UNAUTHORIZED,
                Json(json!({ "detail": "Incorrect email or password" })),
            )
        }),
    );
    let client = common::test_client(routes).await;

    let err = api::auth::login(&client, &credentials()).await.unwrap_err();

    assert_eq!(err.kind, AppErrorKind::Unauthorized);
    assert_eq!(err.message, "Incorrect email or password");
    assert!(!client.session().is_authenticated());
}

#[tokio::test]
async fn logout_clears_session_even_when_backend_fails() {
    let routes = Router::new().route(
        "/auth/logout",
        post(|| async { StatusCode::INTERNAL_SERVER_ERROR }),
    );
    let client = common::test_client(routes).await;
    common::sign_in(&client, "tok-3");

    api::auth::logout(&client).await;

    assert!(!client.session().is_authenticated());
}

#[tokio::test]
async fn refresh_sends_refresh_token_and_keeps_it_when_not_rotated() {
    let bodies: Arc<Mutex<Vec<Value>>> = Arc::default();
    let captured = bodies.clone();
    let routes = Router::new().route(
        "/auth/refresh",
        post(move |Json(body): Json<Value>| {
            captured.lock().unwrap().push(body);
            async { Json(json!({ "access_token": "tok-new" })) }
        }),
    );
    let client = common::test_client(routes).await;
    common::sign_in(&client, "tok-old");

    let tokens = api::auth::refresh(&client).await.unwrap();

    assert_eq!(tokens.access_token, "tok-new");
    assert_eq!(tokens.refresh_token.as_deref(), Some("tok-old-refresh"));
    assert_eq!(client.session().access_token().as_deref(), Some("tok-new"));
    assert_eq!(
        bodies.lock().unwrap().clone(),
        vec![json!({ "refresh_token": "tok-old-refresh" })]
    );
}

#[tokio::test]
async fn refresh_without_session_is_unauthorized() {
    let client = common::test_client(Router::new()).await;
    let err = api::auth::refresh(&client).await.unwrap_err();
    assert_eq!(err.kind, AppErrorKind::Unauthorized);
}

#[tokio::test]
async fn profile_update_and_password_change_hit_auth_endpoints() {
    let recorder = Recorder::default();
    let (rec_me, rec_pw) = (recorder.clone(), recorder.clone());
    let routes = Router::new()
        .route(
            "/auth/me",
            axum::routing::put(move |uri: Uri, headers: HeaderMap, Json(body): Json<Value>| {
                rec_me.record(&uri, &headers);
                async move {
                    let mut user = common::user_json(5, "EMPLOYEE");
                    user["phone"] = body["phone"].clone();
                    Json(user)
                }
            }),
        )
        .route(
            "/auth/change-password",
            post(move |uri: Uri, headers: HeaderMap| {
                rec_pw.record(&uri, &headers);
                async { Json(json!({ "message": "Password updated" })) }
            }),
        );
    let client = common::test_client(routes).await;
    common::sign_in(&client, "tok-5");

    let user = api::auth::update_profile(
        &client,
        &shared_types::UpdateProfileRequest {
            first_name: "Ama".into(),
            last_name: "Mensah".into(),
            phone: Some("+233 20 000 0000".into()),
        },
    )
    .await
    .unwrap();
    assert_eq!(user.phone.as_deref(), Some("+233 20 000 0000"));

    let ack = api::auth::change_password(
        &client,
        &shared_types::ChangePasswordRequest {
            current_password: "old-secret".into(),
            new_password: "new-secret".into(),
        },
    )
    .await
    .unwrap();
    assert_eq!(ack.message, "Password updated");

    let paths: Vec<String> = recorder.all().into_iter().map(|s| s.path).collect();
    assert_eq!(paths, vec!["/auth/me", "/auth/change-password"]);
}

#[tokio::test]
async fn unrecognized_role_signs_in_to_the_employee_dashboard() {
    let routes = Router::new().route(
        "/auth/login",
        post(|| async {
            Json(json!({
                "access_token": "tok-intern",
                "user": common::user_json(11, "INTERN")
            }))
        }),
    );
    let client = common::test_client(routes).await;

    let (_, user) = api::auth::login(&client, &credentials()).await.unwrap();

    assert_eq!(user.role(), None);
    assert_eq!(DashboardKind::for_role_name(&user.role_name), DashboardKind::Employee);
    assert_eq!(guard_decision(Some(&user), &[], "/dashboard"), GuardDecision::Allow);
    assert_eq!(guard_decision(Some(&user), &[], "/payroll"), GuardDecision::Deny);
}
