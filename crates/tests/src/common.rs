use std::sync::{Arc, Mutex};

use api::ApiClient;
use axum::{
    http::{HeaderMap, Uri},
    Router,
};
use serde_json::{json, Value};
use shared_types::{ApiSettings, TokenPair};
use tokio::net::TcpListener;

/// Serve `routes` under `/api/v1` on an ephemeral port and return the
/// base URL the client should use.
pub async fn spawn_backend(routes: Router) -> String {
    let listener = TcpListener::bind("127.0.0.1:0")
        .await
        .expect("Failed to bind mock backend");
    let addr = listener.local_addr().expect("Mock backend has no address");
    let app = Router::new().nest("/api/v1", routes);
    tokio::spawn(async move {
        axum::serve(listener, app).await.expect("Mock backend stopped");
    });
    format!("http://{addr}/api/v1")
}

/// A client pointed at a freshly spawned mock backend.
pub async fn test_client(routes: Router) -> ApiClient {
    let base_url = spawn_backend(routes).await;
    ApiClient::new(ApiSettings {
        base_url,
        timeout_secs: 5,
    })
}

/// Put an access token in the client's session.
pub fn sign_in(client: &ApiClient, token: &str) {
    client.session().set(TokenPair {
        access_token: token.to_string(),
        refresh_token: Some(format!("{token}-refresh")),
        token_type: "bearer".to_string(),
    });
}

/// What a mock handler saw of one request. Paths are relative to `/api/v1`
/// because the nested router strips the prefix.
#[derive(Debug, Clone, PartialEq)]
pub struct Seen {
    pub path: String,
    pub query: Option<String>,
    pub authorization: Option<String>,
}

/// Shared log of requests seen by mock handlers.
#[derive(Debug, Clone, Default)]
pub struct Recorder {
    seen: Arc<Mutex<Vec<Seen>>>,
}

impl Recorder {
    pub fn record(&self, uri: &Uri, headers: &HeaderMap) {
        let seen = Seen {
            path: uri.path().to_string(),
            query: uri.query().map(str::to_string),
            authorization: headers
                .get("authorization")
                .and_then(|v| v.to_str().ok())
                .map(str::to_string),
        };
        self.seen.lock().expect("recorder poisoned").push(seen);
    }

    pub fn all(&self) -> Vec<Seen> {
        self.seen.lock().expect("recorder poisoned").clone()
    }

    pub fn last(&self) -> Seen {
        self.all().pop().expect("no request recorded")
    }
}

pub fn user_json(id: i64, role: &str) -> Value {
    json!({
        "id": id,
        "email": format!("user{id}@acme.test"),
        "first_name": "Ama",
        "last_name": "Mensah",
        "role": role,
        "status": "ACTIVE",
        "organization_id": 1
    })
}

pub fn employee_json(id: i64, first_name: &str) -> Value {
    json!({
        "id": id,
        "organization_id": 1,
        "department_id": 2,
        "employee_number": format!("EMP-{id:03}"),
        "first_name": first_name,
        "last_name": "Boateng",
        "email": format!("{}@acme.test", first_name.to_lowercase()),
        "status": "ACTIVE",
        "employment_type": "FULL_TIME"
    })
}

pub fn document_json(id: i64, title: &str) -> Value {
    json!({
        "id": id,
        "title": title,
        "category": "POLICY",
        "file_name": "handbook.pdf",
        "content_type": "application/pdf",
        "file_size": 2048,
        "status": "ACTIVE"
    })
}

pub fn leave_json(id: i64, status: &str) -> Value {
    json!({
        "id": id,
        "employee_id": 4,
        "leave_type": "ANNUAL",
        "start_date": "2025-07-01",
        "end_date": "2025-07-03",
        "status": status
    })
}
