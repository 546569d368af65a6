use axum::{
    extract::Multipart,
    http::{header, HeaderMap, Uri},
    routing::{get, post},
    Json, Router,
};
use pretty_assertions::assert_eq;
use shared_types::{DocumentCategory, FilePayload, UploadDocumentRequest};
use std::{
    collections::BTreeMap,
    sync::{Arc, Mutex},
};

use crate::common::{self, Recorder};

/// Field name -> (file name, content type, body) as the backend received it.
type Received = BTreeMap<String, (Option<String>, Option<String>, Vec<u8>)>;

#[tokio::test]
async fn upload_sends_metadata_and_file_as_multipart() {
    let received: Arc<Mutex<Received>> = Arc::default();
    let sink = received.clone();
    let routes = Router::new().route(
        "/documents/upload",
        post(move |mut form: Multipart| {
            let sink = sink.clone();
            async move {
                while let Some(field) = form.next_field().await.unwrap() {
                    let name = field.name().unwrap_or_default().to_string();
                    let file_name = field.file_name().map(str::to_string);
                    let content_type = field.content_type().map(str::to_string);
                    let bytes = field.bytes().await.unwrap().to_vec();
                    sink.lock().unwrap().insert(name, (file_name, content_type, bytes));
                }
                Json(common::document_json(31, "Leave Policy"))
            }
        }),
    );
    let client = common::test_client(routes).await;

    let request = UploadDocumentRequest {
        title: "Leave Policy".into(),
        description: Some("2025 edition".into()),
        category: DocumentCategory::Policy,
    };
    let file = FilePayload {
        file_name: "leave.pdf".into(),
        content_type: Some("application/pdf".into()),
        bytes: b"%PDF-1.7 test".to_vec(),
    };
    let doc = api::documents::upload_document(&client, &request, file).await.unwrap();

    assert_eq!(doc.id, 31);
    let received = received.lock().unwrap().clone();
    assert_eq!(received["title"].2, b"Leave Policy".to_vec());
    assert_eq!(received["category"].2, b"POLICY".to_vec());
    assert_eq!(received["description"].2, b"2025 edition".to_vec());
    let (file_name, content_type, body) = &received["file"];
    assert_eq!(file_name.as_deref(), Some("leave.pdf"));
    assert_eq!(content_type.as_deref(), Some("application/pdf"));
    assert_eq!(body, &b"%PDF-1.7 test".to_vec());
}

#[tokio::test]
async fn blank_description_is_not_sent() {
    let names: Arc<Mutex<Vec<String>>> = Arc::default();
    let sink = names.clone();
    let routes = Router::new().route(
        "/documents/upload",
        post(move |mut form: Multipart| {
            let sink = sink.clone();
            async move {
                while let Some(field) = form.next_field().await.unwrap() {
                    sink.lock().unwrap().push(field.name().unwrap_or_default().to_string());
                }
                Json(common::document_json(32, "Contract"))
            }
        }),
    );
    let client = common::test_client(routes).await;

    let request = UploadDocumentRequest {
        title: "Contract".into(),
        description: Some("   ".into()),
        category: DocumentCategory::Contract,
    };
    let file = FilePayload {
        file_name: "c.txt".into(),
        content_type: None,
        bytes: b"terms".to_vec(),
    };
    api::documents::upload_document(&client, &request, file).await.unwrap();

    assert_eq!(names.lock().unwrap().clone(), vec!["title", "category", "file"]);
}

#[tokio::test]
async fn download_returns_exact_bytes() {
    let recorder = Recorder::default();
    let rec = recorder.clone();
    let payload: Vec<u8> = (0u8..=255).collect();
    let served = payload.clone();
    let routes = Router::new().route(
        "/documents/{id}/download",
        get(move |uri: Uri, headers: HeaderMap| {
            rec.record(&uri, &headers);
            let served = served.clone();
            async move { ([(header::CONTENT_TYPE, "application/octet-stream")], served) }
        }),
    );
    let client = common::test_client(routes).await;
    common::sign_in(&client, "tok-doc");

    let bytes = api::documents::download_document(&client, 8).await.unwrap();

    assert_eq!(bytes, payload);
    let seen = recorder.last();
    assert_eq!(seen.path, "/documents/8/download");
    assert_eq!(seen.authorization.as_deref(), Some("Bearer tok-doc"));
}

#[tokio::test]
async fn list_documents_decodes_categories() {
    let routes = Router::new().route(
        "/documents",
        get(|| async {
            Json(serde_json::json!([
                common::document_json(1, "Handbook"),
                common::document_json(2, "Leave Policy")
            ]))
        }),
    );
    let client = common::test_client(routes).await;

    let docs = api::documents::list_documents(&client).await.unwrap();

    assert!(docs.iter().all(|d| d.category == DocumentCategory::Policy));
    assert_eq!(docs[0].file_size, Some(2048));
}
